//! Snapshot tests for status-line text.
//!
//! The status line is read by people watching a live run, so its wording and
//! number formats are pinned here.

use simdrive_telemetry::{
    MapContext, PlayerMeasurements, StatusLayout, StatusLine, Vector2, format_status,
    format_status_with_map,
};

fn cruising() -> PlayerMeasurements {
    PlayerMeasurements {
        forward_speed: 13.5,
        intersection_otherlane: 0.1,
        intersection_offroad: 0.75,
    }
}

#[test]
fn test_compact_status_line() {
    insta::assert_snapshot!("compact_status_line", format_status(&cruising(), 1042, 59.7));
}

#[test]
fn test_full_status_line() {
    let map = MapContext::new(Vector2::new(-88.4, 210.6), Vector2::new(0.7, -0.7));
    insta::assert_snapshot!(
        "full_status_line",
        format_status_with_map(&cruising(), map, 1042, 59.7)
    );
}

#[test]
fn test_parked_status_line() {
    let parked = PlayerMeasurements::default();
    let line = StatusLine::for_layout(StatusLayout::Full, &parked, None, 0, 0.0);
    insta::assert_snapshot!("parked_status_line", line.to_string());
}
