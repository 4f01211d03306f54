//! Operator input messages

use gantry_core::LogSummary;
use serde::{Deserialize, Serialize};

/// Maximum raw value of an analog axis (16-bit ADC reading)
pub const AXIS_MAX: u16 = 65535;

/// One snapshot of the joystick rig, captured once per control cycle.
///
/// Axes are raw 16-bit readings; buttons are level samples (edge detection is
/// the consumer's job).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct JoystickSample {
    /// X-axis raw reading, 0..=65535
    pub x: u16,
    /// Y-axis raw reading, 0..=65535
    pub y: u16,
    /// Joystick click button level (true = pressed)
    pub joystick_pressed: bool,
    /// Separate action button level (true = pressed)
    pub action_pressed: bool,
    /// Timestamp in nanoseconds since epoch
    pub timestamp: u64,
}

impl JoystickSample {
    pub fn new(x: u16, y: u16, joystick_pressed: bool, action_pressed: bool) -> Self {
        Self {
            x,
            y,
            joystick_pressed,
            action_pressed,
            timestamp: now_nanos(),
        }
    }

    /// Both axes at rest, no buttons held.
    pub fn centered() -> Self {
        Self::new(AXIS_MAX / 2, AXIS_MAX / 2, false, false)
    }
}

impl Default for JoystickSample {
    fn default() -> Self {
        Self::centered()
    }
}

impl LogSummary for JoystickSample {
    fn log_summary(&self) -> String {
        format!(
            "x:{} y:{} click:{} btn:{}",
            self.x, self.y, self.joystick_pressed, self.action_pressed
        )
    }
}

pub(crate) fn now_nanos() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos() as u64
}
