pub mod config;
pub mod scheduler;

pub use config::{SchedulerConfig, TimingConfig};
pub use scheduler::Scheduler;
