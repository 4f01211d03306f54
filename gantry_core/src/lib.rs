//! # GANTRY Core
//!
//! The core runtime for the GANTRY control framework.
//!
//! GANTRY drives small real-time control applications as a set of single-purpose
//! nodes ticked sequentially by one scheduler at a fixed rate. This crate provides
//! the fundamental building blocks:
//!
//! - **Nodes**: Independent computational units ticked once per cycle
//! - **Communication**: Publisher-subscriber message passing between nodes
//! - **Scheduling**: Fixed-rate tick loop with self-correcting pacing
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use gantry_core::{Hub, Node, NodeInfo, Scheduler};
//!
//! struct ExampleNode {
//!     output: Hub<u32>,
//! }
//!
//! impl Node for ExampleNode {
//!     fn name(&self) -> &'static str { "example" }
//!
//!     fn tick(&mut self, mut ctx: Option<&mut NodeInfo>) {
//!         let _ = self.output.send(42, ctx.as_deref_mut());
//!     }
//! }
//! ```

pub mod communication;
pub mod core;
pub mod error;
pub mod scheduling;

// Re-export commonly used types for easy access
pub use communication::Hub;
pub use core::{LogSummary, Node, NodeConfig, NodeInfo, NodeState};
pub use error::{GantryError, GantryResult};
pub use scheduling::{Scheduler, SchedulerConfig};
