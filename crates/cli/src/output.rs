//! Output formatting for CLI responses

use anyhow::Error;
use colored::*;
use serde_json::json;

use crate::session::SessionSummary;

/// Print error in JSON format
pub fn print_error_json(error: &Error) {
    let error_json = json!({
        "success": false,
        "error": {
            "message": error.to_string(),
            "chain": error
                .chain()
                .skip(1)
                .map(ToString::to_string)
                .collect::<Vec<_>>(),
        }
    });
    match serde_json::to_string_pretty(&error_json) {
        Ok(s) => println!("{s}"),
        Err(e) => eprintln!("Failed to format error as JSON: {e}"),
    }
}

/// Print error in human-readable format
pub fn print_error_human(error: &Error) {
    eprintln!("{} {}", "Error:".red().bold(), error);

    let mut source = error.source();
    while let Some(err) = source {
        eprintln!("  {} {}", "Caused by:".yellow(), err);
        source = err.source();
    }
}

/// Print the end-of-session totals
pub fn print_summary(summary: &SessionSummary, json: bool) {
    if json {
        let output = json!({
            "success": true,
            "summary": summary,
        });
        match serde_json::to_string_pretty(&output) {
            Ok(s) => println!("{s}"),
            Err(e) => eprintln!("Failed to format summary as JSON: {e}"),
        }
        return;
    }

    println!("{}", "Session summary:".bold());
    println!("  Frames:          {}", summary.frames);
    println!("  Resets:          {}", summary.resets);
    println!("  Distance:        {:.1} m", summary.distance_m);
    println!("  Top speed:       {:.2} km/h", summary.max_speed_kmh);
    println!("  Final speed:     {:.2} km/h", summary.final_speed_kmh);
    println!("  Off-road frames: {}", summary.offroad_frames);
    println!("  Autopilot:       {}", on_off(summary.autopilot_engaged));
    println!("  Reverse:         {}", on_off(summary.reverse_engaged));
}

fn on_off(engaged: bool) -> ColoredString {
    if engaged {
        "on".green()
    } else {
        "off".dimmed()
    }
}
