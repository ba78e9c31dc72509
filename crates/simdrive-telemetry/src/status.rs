//! Status-line text

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{MapContext, PlayerMeasurements};

/// Which status line to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusLayout {
    /// Step, FPS, speed and lane figures.
    #[default]
    Compact,
    /// Compact plus map position and lane orientation.
    Full,
}

/// One status line, formatted on display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatusLine<'a> {
    pub step: u64,
    pub fps: f64,
    pub measurements: &'a PlayerMeasurements,
    pub map: Option<MapContext>,
}

impl<'a> StatusLine<'a> {
    pub fn compact(measurements: &'a PlayerMeasurements, step: u64, fps: f64) -> Self {
        Self {
            step,
            fps,
            measurements,
            map: None,
        }
    }

    pub fn full(
        measurements: &'a PlayerMeasurements,
        map: MapContext,
        step: u64,
        fps: f64,
    ) -> Self {
        Self {
            step,
            fps,
            measurements,
            map: Some(map),
        }
    }

    /// Pick the line for `layout`. The full layout falls back to compact
    /// when no map context is available.
    pub fn for_layout(
        layout: StatusLayout,
        measurements: &'a PlayerMeasurements,
        map: Option<MapContext>,
        step: u64,
        fps: f64,
    ) -> Self {
        match (layout, map) {
            (StatusLayout::Full, Some(map)) => Self::full(measurements, map, step, fps),
            _ => Self::compact(measurements, step, fps),
        }
    }
}

impl fmt::Display for StatusLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Step {} ({:.1} FPS): ", self.step, self.fps)?;
        if let Some(map) = &self.map {
            write!(
                f,
                "Map Position ({:.1},{:.1}) Lane Orientation ({:.1},{:.1}) ",
                map.map_position.x,
                map.map_position.y,
                map.lane_orientation.x,
                map.lane_orientation.y
            )?;
        }
        write!(
            f,
            "{:.2} km/h, {:.0}% other lane, {:.0}% off-road",
            self.measurements.speed_kmh(),
            self.measurements.other_lane_percent(),
            self.measurements.offroad_percent()
        )
    }
}

pub fn format_status(measurements: &PlayerMeasurements, step: u64, fps: f64) -> String {
    StatusLine::compact(measurements, step, fps).to_string()
}

pub fn format_status_with_map(
    measurements: &PlayerMeasurements,
    map: MapContext,
    step: u64,
    fps: f64,
) -> String {
    StatusLine::full(measurements, map, step, fps).to_string()
}
