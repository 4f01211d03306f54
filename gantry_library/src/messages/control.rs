//! Actuator command messages

use gantry_core::LogSummary;
use serde::{Deserialize, Serialize};

use super::input::now_nanos;

/// Speed command for the carriage actuators, recomputed every control cycle.
///
/// Both speeds are signed percentages in [-100, 100]. `linear_speed` drives
/// the DC carriage motor, `stepper_speed` the steering stepper.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MotorCommand {
    pub linear_speed: f32,
    pub stepper_speed: f32,
    /// Timestamp in nanoseconds since epoch
    pub timestamp: u64,
}

impl MotorCommand {
    pub fn new(linear_speed: f32, stepper_speed: f32) -> Self {
        Self {
            linear_speed,
            stepper_speed,
            timestamp: now_nanos(),
        }
    }

    /// Command with both actuators idle.
    pub fn stop() -> Self {
        Self::new(0.0, 0.0)
    }

    /// Both speeds finite and within the signed percentage range.
    pub fn is_valid(&self) -> bool {
        let in_range =
            |v: f32| v.is_finite() && (-100.0..=100.0).contains(&v);
        in_range(self.linear_speed) && in_range(self.stepper_speed)
    }
}

impl Default for MotorCommand {
    fn default() -> Self {
        Self::stop()
    }
}

impl LogSummary for MotorCommand {
    fn log_summary(&self) -> String {
        format!(
            "linear:{:.1} stepper:{:.1}",
            self.linear_speed, self.stepper_speed
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stop_command_is_idle_and_valid() {
        let cmd = MotorCommand::stop();
        assert_eq!(cmd.linear_speed, 0.0);
        assert_eq!(cmd.stepper_speed, 0.0);
        assert!(cmd.is_valid());
    }

    #[test]
    fn out_of_range_speed_is_invalid() {
        assert!(!MotorCommand::new(150.0, 0.0).is_valid());
        assert!(!MotorCommand::new(0.0, -100.5).is_valid());
        assert!(!MotorCommand::new(f32::NAN, 0.0).is_valid());
        assert!(MotorCommand::new(-100.0, 100.0).is_valid());
    }
}
