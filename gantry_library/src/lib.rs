//! # GANTRY Standard Library
//!
//! Messages, hardware capability traits, and reusable nodes for GANTRY
//! control applications.
//!
//! ## Structure
//!
//! ```text
//! gantry_library/
//! ── messages/   # Message types passed between nodes
//! ── hardware/   # Capability traits for pins, axes, and PWM (+ mock backend)
//! ── nodes/      # Reusable nodes (joystick input, motor drivers, display)
//! ```

pub mod hardware;
pub mod messages;
pub mod nodes;

// Re-export core traits needed for message types
pub use gantry_core::LogSummary;

// Re-export message types at the crate root for convenience
pub use messages::*;

// Re-export commonly used nodes for convenience
pub use nodes::{DcMotorNode, JoystickInputNode, StatusDisplayNode, StepperNode};
