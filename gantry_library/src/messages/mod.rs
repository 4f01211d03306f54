//! Message types passed between GANTRY nodes
//!
//! Messages are plain-old-data structs with nanosecond timestamps and
//! constructor helpers. Each implements `LogSummary` so Hub traffic can be
//! logged compactly.

pub mod control;
pub mod game;
pub mod input;

pub use control::MotorCommand;
pub use game::{GameState, GameStatus};
pub use input::{JoystickSample, AXIS_MAX};
