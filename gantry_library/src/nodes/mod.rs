//! Reusable nodes for the carriage rig
//!
//! Each node owns its hardware handles and talks to the rest of the system
//! exclusively through Hub topics.

pub mod dc_motor;
pub mod display;
pub mod joystick;
pub mod stepper;

pub use dc_motor::DcMotorNode;
pub use display::StatusDisplayNode;
pub use joystick::JoystickInputNode;
pub use stepper::StepperNode;
