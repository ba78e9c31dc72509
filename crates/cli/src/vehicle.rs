//! Local kinematic vehicle
//!
//! Stands in for the simulator when driving offline. The road runs along the
//! +x axis; +y is to the left. The right-hand lane spans y in [-3.5, 0] and
//! the opposite lane y in [0, 3.5]. Everything beyond |y| = 3.5 is off-road.

use std::time::Duration;

use simdrive_input::ControlCommand;
use simdrive_telemetry::{MapContext, PlayerMeasurements, Vector2};

use crate::config::AutopilotConfig;

const LANE_WIDTH: f32 = 3.5;
const VEHICLE_WIDTH: f32 = 2.0;
const START_Y: f32 = -LANE_WIDTH / 2.0;

const MAX_FORWARD_SPEED: f32 = 40.0;
const MAX_REVERSE_SPEED: f32 = 6.0;
const ACCELERATION: f32 = 5.0;
const BRAKE_DECELERATION: f32 = 9.0;
const HAND_BRAKE_DECELERATION: f32 = 6.0;
const ROLLING_DRAG: f32 = 0.4;
/// Yaw rate at full lock, per m/s of speed.
const STEER_YAW_GAIN: f32 = 0.08;

#[derive(Debug, Clone, PartialEq)]
pub struct KinematicVehicle {
    position: Vector2,
    heading: f32,
    speed: f32,
    odometer: f32,
}

impl Default for KinematicVehicle {
    fn default() -> Self {
        Self::new()
    }
}

impl KinematicVehicle {
    pub fn new() -> Self {
        Self {
            position: Vector2::new(0.0, START_Y),
            heading: 0.0,
            speed: 0.0,
            odometer: 0.0,
        }
    }

    /// Back to the start of the road, stationary.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn position(&self) -> Vector2 {
        self.position
    }

    pub fn heading(&self) -> f32 {
        self.heading
    }

    /// Distance covered since the last reset, in metres.
    pub fn odometer(&self) -> f32 {
        self.odometer
    }

    /// Advance the vehicle by `dt` under `command`.
    pub fn apply(&mut self, command: &ControlCommand, dt: Duration) {
        let command = command.clamped();
        let dt = dt.as_secs_f32();
        if dt <= 0.0 {
            return;
        }

        let direction = if command.reverse { -1.0 } else { 1.0 };
        self.speed += direction * command.throttle * ACCELERATION * dt;

        let mut deceleration = ROLLING_DRAG + command.brake * BRAKE_DECELERATION;
        if command.hand_brake {
            deceleration += HAND_BRAKE_DECELERATION;
        }
        let slowed = (self.speed.abs() - deceleration * dt).max(0.0);
        self.speed = slowed.copysign(self.speed);
        self.speed = self.speed.clamp(-MAX_REVERSE_SPEED, MAX_FORWARD_SPEED);

        // Steering right turns towards -y.
        self.heading -= command.steer * STEER_YAW_GAIN * self.speed * dt;

        let distance = self.speed * dt;
        self.position.x += distance * self.heading.cos();
        self.position.y += distance * self.heading.sin();
        self.odometer += distance.abs();
    }

    pub fn measurements(&self) -> PlayerMeasurements {
        let left = self.position.y - VEHICLE_WIDTH / 2.0;
        let right = self.position.y + VEHICLE_WIDTH / 2.0;

        let other_lane = overlap(left, right, 0.0, LANE_WIDTH);
        let on_road = overlap(left, right, -LANE_WIDTH, LANE_WIDTH);

        PlayerMeasurements {
            forward_speed: self.speed,
            intersection_otherlane: other_lane / VEHICLE_WIDTH,
            intersection_offroad: (VEHICLE_WIDTH - on_road) / VEHICLE_WIDTH,
        }
    }

    pub fn map_context(&self) -> MapContext {
        MapContext::new(self.position, Vector2::new(1.0, 0.0))
    }

    /// Lane-keeping command: steer back to the lane centre and hold the
    /// cruise speed.
    pub fn autopilot_command(&self, config: &AutopilotConfig) -> ControlCommand {
        let lateral_error = self.position.y - START_Y;
        let steer = 0.4 * lateral_error + 2.0 * self.heading;
        let below_cruise = self.measurements().speed_kmh() < f64::from(config.cruise_speed_kmh);

        ControlCommand {
            steer,
            throttle: if below_cruise {
                config.cruise_throttle
            } else {
                0.0
            },
            brake: 0.0,
            hand_brake: false,
            reverse: false,
        }
        .clamped()
    }
}

fn overlap(a_min: f32, a_max: f32, b_min: f32, b_max: f32) -> f32 {
    (a_max.min(b_max) - a_min.max(b_min)).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: Duration = Duration::from_millis(100);

    fn throttle() -> ControlCommand {
        ControlCommand {
            throttle: 1.0,
            ..ControlCommand::default()
        }
    }

    fn drive(vehicle: &mut KinematicVehicle, command: &ControlCommand, frames: usize) {
        for _ in 0..frames {
            vehicle.apply(command, FRAME);
        }
    }

    #[test]
    fn test_starts_stationary_in_own_lane() {
        let vehicle = KinematicVehicle::new();
        let m = vehicle.measurements();
        assert!(m.is_stationary());
        assert!(m.intersection_otherlane.abs() < f32::EPSILON);
        assert!(m.intersection_offroad.abs() < f32::EPSILON);
    }

    #[test]
    fn test_throttle_accelerates_forward() {
        let mut vehicle = KinematicVehicle::new();
        drive(&mut vehicle, &throttle(), 10);
        assert!(vehicle.speed() > 3.0);
        assert!(vehicle.position().x > 0.0);
        assert!(vehicle.odometer() > 0.0);
    }

    #[test]
    fn test_reverse_drives_backwards() {
        let mut vehicle = KinematicVehicle::new();
        let command = ControlCommand {
            reverse: true,
            ..throttle()
        };
        drive(&mut vehicle, &command, 10);
        assert!(vehicle.speed() < 0.0);
        assert!(vehicle.speed() >= -MAX_REVERSE_SPEED);
        assert!(vehicle.position().x < 0.0);
    }

    #[test]
    fn test_brake_stops_without_reversing() {
        let mut vehicle = KinematicVehicle::new();
        drive(&mut vehicle, &throttle(), 20);
        let brake = ControlCommand {
            brake: 1.0,
            ..ControlCommand::default()
        };
        drive(&mut vehicle, &brake, 50);
        assert!(vehicle.speed().abs() < f32::EPSILON);
    }

    #[test]
    fn test_speed_is_capped() {
        let mut vehicle = KinematicVehicle::new();
        drive(&mut vehicle, &throttle(), 1000);
        assert!(vehicle.speed() <= MAX_FORWARD_SPEED);
    }

    #[test]
    fn test_steering_left_moves_into_other_lane() {
        let mut vehicle = KinematicVehicle::new();
        drive(&mut vehicle, &throttle(), 20);
        let left = ControlCommand {
            steer: -1.0,
            ..throttle()
        };
        drive(&mut vehicle, &left, 10);
        assert!(vehicle.heading() > 0.0);
        assert!(vehicle.position().y > START_Y);
    }

    #[test]
    fn test_lane_fractions() {
        let mut vehicle = KinematicVehicle::new();
        vehicle.position.y = 0.0;
        let m = vehicle.measurements();
        assert!((m.intersection_otherlane - 0.5).abs() < 1e-6);
        assert!(m.intersection_offroad.abs() < 1e-6);

        vehicle.position.y = -LANE_WIDTH;
        let m = vehicle.measurements();
        assert!((m.intersection_offroad - 0.5).abs() < 1e-6);
        assert!(m.intersection_otherlane.abs() < 1e-6);
    }

    #[test]
    fn test_reset_restores_start() {
        let mut vehicle = KinematicVehicle::new();
        drive(&mut vehicle, &throttle(), 10);
        vehicle.reset();
        assert_eq!(vehicle, KinematicVehicle::new());
    }

    #[test]
    fn test_autopilot_reaches_cruise_and_keeps_lane() {
        let config = AutopilotConfig::default();
        let mut vehicle = KinematicVehicle::new();
        vehicle.position.y = -0.5;
        for _ in 0..600 {
            let command = vehicle.autopilot_command(&config);
            assert!(command.validate().is_ok());
            vehicle.apply(&command, FRAME);
        }
        let kmh = vehicle.measurements().speed_kmh();
        assert!(kmh > 20.0 && kmh < 40.0, "cruise speed {kmh}");
        assert!((vehicle.position().y - START_Y).abs() < 0.5);
    }

    #[test]
    fn test_zero_dt_is_ignored() {
        let mut vehicle = KinematicVehicle::new();
        vehicle.apply(&throttle(), Duration::ZERO);
        assert_eq!(vehicle, KinematicVehicle::new());
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        prop_compose! {
            fn any_command()(
                steer in -2.0f32..2.0,
                throttle in -1.0f32..2.0,
                brake in -1.0f32..2.0,
                hand_brake in any::<bool>(),
                reverse in any::<bool>(),
            ) -> ControlCommand {
                ControlCommand { steer, throttle, brake, hand_brake, reverse }
            }
        }

        proptest! {
            #![proptest_config(proptest::test_runner::Config::with_cases(256))]

            #[test]
            fn prop_speed_and_fractions_stay_bounded(
                commands in proptest::collection::vec(any_command(), 1..100),
            ) {
                let mut vehicle = KinematicVehicle::new();
                for command in &commands {
                    vehicle.apply(command, FRAME);
                    let speed = vehicle.speed();
                    prop_assert!((-MAX_REVERSE_SPEED..=MAX_FORWARD_SPEED).contains(&speed));
                    let m = vehicle.measurements();
                    // Lane edges are subtracted in f32, allow rounding slack.
                    prop_assert!((-1e-4..=1.0 + 1e-4).contains(&m.intersection_otherlane));
                    prop_assert!((-1e-4..=1.0 + 1e-4).contains(&m.intersection_offroad));
                }
            }
        }
    }
}
