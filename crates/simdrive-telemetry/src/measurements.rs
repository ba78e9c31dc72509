//! Player vehicle measurements

use serde::{Deserialize, Serialize};

use crate::MPS_TO_KMH;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector2 {
    pub x: f32,
    pub y: f32,
}

impl Vector2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn length(&self) -> f32 {
        self.x.hypot(self.y)
    }
}

/// Readings for the player vehicle after a simulation step.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PlayerMeasurements {
    /// Forward speed in metres per second. Negative while reversing.
    pub forward_speed: f32,
    /// Fraction of the vehicle footprint in the opposite lane, 0.0 to 1.0.
    pub intersection_otherlane: f32,
    /// Fraction of the vehicle footprint off the road, 0.0 to 1.0.
    pub intersection_offroad: f32,
}

impl PlayerMeasurements {
    pub fn speed_kmh(&self) -> f64 {
        f64::from(self.forward_speed) * MPS_TO_KMH
    }

    pub fn other_lane_percent(&self) -> f64 {
        100.0 * f64::from(self.intersection_otherlane)
    }

    pub fn offroad_percent(&self) -> f64 {
        100.0 * f64::from(self.intersection_offroad)
    }

    pub fn is_stationary(&self) -> bool {
        self.forward_speed.abs() < 0.5
    }
}

/// Where the vehicle sits on the city map, for the full status layout.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MapContext {
    pub map_position: Vector2,
    pub lane_orientation: Vector2,
}

impl MapContext {
    pub fn new(map_position: Vector2, lane_orientation: Vector2) -> Self {
        Self {
            map_position,
            lane_orientation,
        }
    }
}
