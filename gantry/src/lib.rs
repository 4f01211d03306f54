//! # GANTRY - Game-loop Actuator Node Framework
//!
//! GANTRY provides a small framework for building joystick-driven actuator
//! control applications in Rust: nodes, pub/sub Hubs, and a fixed-rate
//! scheduler, plus a standard library of messages and hardware nodes.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use gantry::prelude::*;
//!
//! pub struct MyNode {
//!     publisher: Hub<MotorCommand>,
//! }
//!
//! impl Node for MyNode {
//!     fn name(&self) -> &'static str { "MyNode" }
//!
//!     fn tick(&mut self, _ctx: Option<&mut NodeInfo>) {
//!         // Node logic here
//!     }
//! }
//! ```

// Re-export core components
pub use gantry_core::{self, *};

// Re-export standard library with alias
pub use gantry_library as library;

/// The GANTRY prelude - everything you need to get started
pub mod prelude {
    // Core node types
    pub use gantry_core::core::node::NodeConfig;
    pub use gantry_core::core::{Node, NodeInfo, NodeState};

    // Communication types
    pub use gantry_core::communication::Hub;

    // Scheduling
    pub use gantry_core::scheduling::{Scheduler, SchedulerConfig};

    // Error types
    pub use gantry_core::error::{GantryError, GantryResult};
    pub type Result<T> = GantryResult<T>;

    // Common std types
    pub use std::sync::{Arc, Mutex};
    pub use std::time::{Duration, Instant};

    // Common traits
    pub use serde::{Deserialize, Serialize};

    // Re-export all message types from gantry_library for convenience
    pub use gantry_library::messages::*;
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get GANTRY version
pub fn version() -> &'static str {
    VERSION
}
