use std::collections::HashMap;
use std::fmt;
use std::time::{Duration, Instant};

use colored::Colorize;

/// Trait for providing lightweight logging summaries of message types
///
/// Allows message types to provide compact string representations for
/// logging without cloning the entire payload.
pub trait LogSummary {
    /// Return a compact string representation suitable for logging
    fn log_summary(&self) -> String;
}

/// Node states for monitoring and lifecycle management
#[derive(Debug, Clone, PartialEq)]
pub enum NodeState {
    Uninitialized,
    Initializing,
    Running,
    Stopping,
    Stopped,
    Error(String),
}

impl fmt::Display for NodeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeState::Uninitialized => write!(f, "Uninitialized"),
            NodeState::Initializing => write!(f, "Initializing"),
            NodeState::Running => write!(f, "Running"),
            NodeState::Stopping => write!(f, "Stopping"),
            NodeState::Stopped => write!(f, "Stopped"),
            NodeState::Error(msg) => write!(f, "Error: {}", msg),
        }
    }
}

/// Performance metrics for node execution
#[derive(Debug, Clone, Default)]
pub struct NodeMetrics {
    pub total_ticks: u64,
    pub successful_ticks: u64,
    pub failed_ticks: u64,
    pub avg_tick_duration_ms: f64,
    pub max_tick_duration_ms: f64,
    pub min_tick_duration_ms: f64,
    pub last_tick_duration_ms: f64,
    pub messages_sent: u64,
    pub messages_received: u64,
    pub errors_count: u64,
    pub warnings_count: u64,
    pub uptime_seconds: f64,
}

/// Configuration parameters for node behavior
#[derive(Debug, Clone)]
pub struct NodeConfig {
    pub enable_logging: bool,
    pub log_level: String,
}

impl Default for NodeConfig {
    fn default() -> Self {
        NodeConfig {
            enable_logging: true,
            log_level: "INFO".to_string(),
        }
    }
}

/// Execution context handed to a node on every tick.
///
/// Carries identification, lifecycle state, per-node logging configuration,
/// and tick/traffic metrics. Owned by the scheduler, one per registered node.
pub struct NodeInfo {
    name: String,
    instance_id: String,

    state: NodeState,
    previous_state: NodeState,
    state_change_time: Instant,

    config: NodeConfig,
    metrics: NodeMetrics,

    creation_time: Instant,
    last_tick_time: Option<Instant>,
    tick_start_time: Option<Instant>,

    error_history: Vec<(Instant, String)>,
    warning_history: Vec<(Instant, String)>,

    // topic -> message count
    published_topics: HashMap<String, u64>,
    subscribed_topics: HashMap<String, u64>,
}

impl NodeInfo {
    pub fn new(node_name: String, logging_enabled: bool) -> Self {
        let now = Instant::now();
        let config = NodeConfig {
            enable_logging: logging_enabled,
            ..Default::default()
        };

        Self {
            name: node_name,
            instance_id: uuid::Uuid::new_v4().to_string(),
            state: NodeState::Uninitialized,
            previous_state: NodeState::Uninitialized,
            state_change_time: now,
            config,
            metrics: NodeMetrics::default(),
            creation_time: now,
            last_tick_time: None,
            tick_start_time: None,
            error_history: Vec::new(),
            warning_history: Vec::new(),
            published_topics: HashMap::new(),
            subscribed_topics: HashMap::new(),
        }
    }

    pub fn new_with_config(node_name: String, config: NodeConfig) -> Self {
        let mut node_info = Self::new(node_name, config.enable_logging);
        node_info.config = config;
        node_info
    }

    // State management

    pub fn state(&self) -> &NodeState {
        &self.state
    }

    pub fn previous_state(&self) -> &NodeState {
        &self.previous_state
    }

    pub fn set_state(&mut self, new_state: NodeState) {
        if self.state != new_state {
            self.previous_state = self.state.clone();
            self.state = new_state;
            self.state_change_time = Instant::now();
        }
    }

    pub fn transition_to_error(&mut self, error_msg: String) {
        self.log_error(&error_msg);
        self.set_state(NodeState::Error(error_msg));
    }

    // Lifecycle

    pub fn initialize(&mut self) -> crate::error::GantryResult<()> {
        self.set_state(NodeState::Initializing);
        self.set_state(NodeState::Running);
        Ok(())
    }

    pub fn shutdown(&mut self) -> crate::error::GantryResult<()> {
        self.set_state(NodeState::Stopping);
        self.set_state(NodeState::Stopped);
        Ok(())
    }

    // Tick management

    pub fn start_tick(&mut self) {
        self.tick_start_time = Some(Instant::now());
        if self.state == NodeState::Uninitialized {
            let _ = self.initialize();
        }
    }

    pub fn record_tick(&mut self) {
        if let Some(start_time) = self.tick_start_time {
            let duration_ms = start_time.elapsed().as_secs_f64() * 1000.0;

            self.metrics.total_ticks += 1;
            self.metrics.successful_ticks += 1;
            self.metrics.last_tick_duration_ms = duration_ms;

            if self.metrics.min_tick_duration_ms == 0.0
                || duration_ms < self.metrics.min_tick_duration_ms
            {
                self.metrics.min_tick_duration_ms = duration_ms;
            }
            if duration_ms > self.metrics.max_tick_duration_ms {
                self.metrics.max_tick_duration_ms = duration_ms;
            }

            let total_duration =
                self.metrics.avg_tick_duration_ms * (self.metrics.successful_ticks - 1) as f64;
            self.metrics.avg_tick_duration_ms =
                (total_duration + duration_ms) / self.metrics.successful_ticks as f64;

            self.last_tick_time = Some(Instant::now());
            self.tick_start_time = None;

            self.metrics.uptime_seconds = self.creation_time.elapsed().as_secs_f64();
        }
    }

    pub fn record_tick_failure(&mut self, error_msg: String) {
        self.metrics.total_ticks += 1;
        self.metrics.failed_ticks += 1;

        if let Some(start_time) = self.tick_start_time {
            self.metrics.last_tick_duration_ms = start_time.elapsed().as_secs_f64() * 1000.0;
            self.tick_start_time = None;
        }

        self.log_error(&error_msg);
    }

    // Logging

    pub fn log_pub<T: LogSummary>(&mut self, topic: &str, data: &T) {
        let summary = data.log_summary();
        self.log_pub_summary(topic, &summary);
    }

    pub fn log_sub<T: LogSummary>(&mut self, topic: &str, data: &T) {
        let summary = data.log_summary();
        self.log_sub_summary(topic, &summary);
    }

    /// Internal logging method that accepts a pre-computed summary string.
    /// Used by Hub::send() to avoid needing the message reference after move.
    pub fn log_pub_summary(&mut self, topic: &str, summary: &str) {
        if self.config.enable_logging {
            let now = chrono::Local::now();
            println!(
                "[{}] {} {} '{}' = {}",
                now.format("%H:%M:%S%.3f").to_string().cyan(),
                self.name.yellow(),
                "--PUB-->".green().bold(),
                topic.magenta(),
                summary
            );
        }

        *self.published_topics.entry(topic.to_string()).or_insert(0) += 1;
        self.metrics.messages_sent += 1;
    }

    /// Counterpart of [`NodeInfo::log_pub_summary`] for the receive path.
    pub fn log_sub_summary(&mut self, topic: &str, summary: &str) {
        if self.config.enable_logging {
            let now = chrono::Local::now();
            println!(
                "[{}] {} {} '{}' = {}",
                now.format("%H:%M:%S%.3f").to_string().cyan(),
                self.name.yellow(),
                "<--SUB--".blue().bold(),
                topic.magenta(),
                summary
            );
        }

        *self.subscribed_topics.entry(topic.to_string()).or_insert(0) += 1;
        self.metrics.messages_received += 1;
    }

    pub fn log_info(&self, message: &str) {
        if self.config.enable_logging
            && (self.config.log_level == "INFO" || self.config.log_level == "DEBUG")
        {
            eprintln!("{} [{}] {}", "[INFO]".blue(), self.name.yellow(), message);
        }
    }

    pub fn log_warning(&mut self, message: &str) {
        if self.config.enable_logging {
            eprintln!("{} [{}] {}", "[WARN]".yellow(), self.name.yellow(), message);
        }

        self.warning_history
            .push((Instant::now(), message.to_string()));
        if self.warning_history.len() > 100 {
            self.warning_history.remove(0);
        }
        self.metrics.warnings_count += 1;
    }

    pub fn log_error(&mut self, message: &str) {
        if self.config.enable_logging {
            eprintln!("{} [{}] {}", "[ERROR]".red(), self.name.yellow(), message);
        }

        self.error_history
            .push((Instant::now(), message.to_string()));
        if self.error_history.len() > 100 {
            self.error_history.remove(0);
        }
        self.metrics.errors_count += 1;
    }

    pub fn log_debug(&mut self, message: &str) {
        if self.config.enable_logging && self.config.log_level == "DEBUG" {
            eprintln!(
                "{} [{}] {}",
                "[DEBUG]".bright_black(),
                self.name.yellow(),
                message
            );
        }
    }

    // Getters

    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn instance_id(&self) -> &str {
        &self.instance_id
    }
    pub fn config(&self) -> &NodeConfig {
        &self.config
    }
    pub fn metrics(&self) -> &NodeMetrics {
        &self.metrics
    }
    pub fn published_topics(&self) -> &HashMap<String, u64> {
        &self.published_topics
    }
    pub fn subscribed_topics(&self) -> &HashMap<String, u64> {
        &self.subscribed_topics
    }
    pub fn uptime(&self) -> Duration {
        self.creation_time.elapsed()
    }
    pub fn time_in_current_state(&self) -> Duration {
        self.state_change_time.elapsed()
    }

    pub fn set_config(&mut self, config: NodeConfig) {
        self.config = config;
    }
}

/// Trait for GANTRY nodes with lifecycle support.
pub trait Node: Send {
    /// Get the node's name (must be unique)
    fn name(&self) -> &'static str;

    /// Initialize the node (called once at startup)
    fn init(&mut self, ctx: &mut NodeInfo) -> crate::error::GantryResult<()> {
        ctx.log_info("Node initialized successfully");
        Ok(())
    }

    /// Main execution step (called once per scheduler cycle)
    fn tick(&mut self, ctx: Option<&mut NodeInfo>);

    /// Shutdown the node (called once at cleanup)
    fn shutdown(&mut self, ctx: &mut NodeInfo) -> crate::error::GantryResult<()> {
        ctx.log_info("Node shutdown successfully");
        Ok(())
    }
}

// LogSummary implementations for primitive types
impl LogSummary for f32 {
    fn log_summary(&self) -> String {
        format!("{:.3}", self)
    }
}

impl LogSummary for f64 {
    fn log_summary(&self) -> String {
        format!("{:.3}", self)
    }
}

impl LogSummary for i32 {
    fn log_summary(&self) -> String {
        self.to_string()
    }
}

impl LogSummary for u32 {
    fn log_summary(&self) -> String {
        self.to_string()
    }
}

impl LogSummary for u64 {
    fn log_summary(&self) -> String {
        self.to_string()
    }
}

impl LogSummary for bool {
    fn log_summary(&self) -> String {
        self.to_string()
    }
}

impl LogSummary for String {
    fn log_summary(&self) -> String {
        self.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_transitions_track_previous() {
        let mut info = NodeInfo::new("test".to_string(), false);
        assert_eq!(*info.state(), NodeState::Uninitialized);

        info.initialize().unwrap();
        assert_eq!(*info.state(), NodeState::Running);
        assert_eq!(*info.previous_state(), NodeState::Initializing);
    }

    #[test]
    fn tick_metrics_accumulate() {
        let mut info = NodeInfo::new("test".to_string(), false);
        for _ in 0..3 {
            info.start_tick();
            info.record_tick();
        }
        assert_eq!(info.metrics().total_ticks, 3);
        assert_eq!(info.metrics().successful_ticks, 3);
        assert_eq!(*info.state(), NodeState::Running);
    }

    #[test]
    fn failed_tick_counts_error() {
        let mut info = NodeInfo::new("test".to_string(), false);
        info.start_tick();
        info.record_tick_failure("boom".to_string());
        assert_eq!(info.metrics().failed_ticks, 1);
        assert_eq!(info.metrics().errors_count, 1);
    }

    #[test]
    fn pub_sub_counters_track_topics() {
        let mut info = NodeInfo::new("test".to_string(), false);
        info.log_pub_summary("motor_cmd", "10.0");
        info.log_pub_summary("motor_cmd", "11.0");
        info.log_sub_summary("joystick", "centered");

        assert_eq!(info.published_topics()["motor_cmd"], 2);
        assert_eq!(info.subscribed_topics()["joystick"], 1);
        assert_eq!(info.metrics().messages_sent, 2);
        assert_eq!(info.metrics().messages_received, 1);
    }
}
