//! Hardware capability traits
//!
//! Nodes consume sensors and actuators through these traits, keeping the
//! control logic independent of any GPIO backend. Readers are infallible by
//! contract: a line that cannot be sampled is a wiring problem, not a runtime
//! condition the loop handles.

pub mod mock;

/// Button-like digital line (read-only)
pub trait DigitalInput: Send {
    /// Sample the line level (true = pressed/high)
    fn is_high(&mut self) -> bool;
}

/// Analog axis sampled as a raw 16-bit value
pub trait AnalogInput: Send {
    /// Read the current value, 0..=65535
    fn read(&mut self) -> u16;
}

/// Direction or winding line (write-only)
pub trait DigitalOutput: Send {
    /// Drive the line level
    fn set(&mut self, high: bool);
}

/// PWM channel with a 16-bit duty cycle
pub trait PwmOutput: Send {
    /// Set the duty cycle, 0 (off) ..= 65535 (always on)
    fn set_duty(&mut self, duty: u16);
}
