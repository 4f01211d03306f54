use std::sync::Arc;
use std::time::{Duration, Instant};

use colored::Colorize;
use parking_lot::Mutex;

use super::config::SchedulerConfig;
use crate::core::{Node, NodeInfo};
use crate::error::GantryResult;

/// Node registration info with lifecycle tracking and per-node rate control
struct RegisteredNode {
    node: Box<dyn Node>,
    priority: u32,
    logging_enabled: bool,
    initialized: bool,
    context: NodeInfo,
    rate_hz: Option<f64>, // Per-node rate control (None = use global scheduler rate)
    last_tick: Option<Instant>,
}

/// Central orchestrator: holds nodes, drives the tick loop.
///
/// Nodes run strictly sequentially in priority order (lower number first,
/// insertion order within a priority), once per cycle. At the end of each cycle
/// the scheduler measures its own elapsed time and sleeps only the residual
/// needed to hit the configured tick period; if a cycle overruns the budget the
/// next one starts immediately — no catch-up or frame skipping.
pub struct Scheduler {
    nodes: Vec<RegisteredNode>,
    running: Arc<Mutex<bool>>,
    scheduler_name: String,
    config: SchedulerConfig,
    tick_count: u64,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler {
    /// Create an empty scheduler with the standard 10 Hz configuration.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            running: Arc::new(Mutex::new(true)),
            scheduler_name: "DefaultScheduler".to_string(),
            config: SchedulerConfig::standard(),
            tick_count: 0,
        }
    }

    /// Apply a configuration to this scheduler (builder pattern)
    pub fn with_config(mut self, config: SchedulerConfig) -> Self {
        self.set_config(config);
        self
    }

    pub fn set_config(&mut self, config: SchedulerConfig) {
        self.config = config;
    }

    /// Set the scheduler name (chainable)
    pub fn name(mut self, name: &str) -> Self {
        self.scheduler_name = name.to_string();
        self
    }

    /// Add a node with given priority (lower number = higher priority).
    /// If logging is not specified it defaults to false.
    ///
    /// # Example
    /// ```ignore
    /// scheduler.add(node, 0, None);   // Highest priority
    /// scheduler.add(node, 10, None);  // Lower priority
    /// ```
    pub fn add(
        &mut self,
        node: Box<dyn Node>,
        priority: u32,
        logging_enabled: Option<bool>,
    ) -> &mut Self {
        let node_name = node.name().to_string();
        let logging_enabled = logging_enabled.unwrap_or(false);

        let context = NodeInfo::new(node_name.clone(), logging_enabled);

        self.nodes.push(RegisteredNode {
            node,
            priority,
            logging_enabled,
            initialized: false,
            context,
            rate_hz: None,
            last_tick: None,
        });

        println!(
            "Added node '{}' with priority {} (logging: {})",
            node_name, priority, logging_enabled
        );

        self
    }

    /// Set per-node rate control (chainable)
    ///
    /// Allows individual nodes to run at a lower frequency than the global
    /// scheduler rate. Without an override a node ticks every cycle.
    pub fn set_node_rate(&mut self, name: &str, rate_hz: f64) -> &mut Self {
        for registered in self.nodes.iter_mut() {
            if registered.node.name() == name {
                registered.rate_hz = Some(rate_hz);
                println!("Set node '{}' rate to {:.1} Hz", name, rate_hz);
                return self;
            }
        }
        eprintln!("Warning: Node '{}' not found for rate configuration", name);
        self
    }

    /// Enable/disable logging for a specific node (chainable)
    pub fn set_node_logging(&mut self, name: &str, enabled: bool) -> &mut Self {
        for registered in self.nodes.iter_mut() {
            if registered.node.name() == name {
                registered.logging_enabled = enabled;
                let mut config = registered.context.config().clone();
                config.enable_logging = enabled;
                registered.context.set_config(config);
                return self;
            }
        }
        eprintln!("Warning: Node '{}' not found for logging configuration", name);
        self
    }

    /// Check if the scheduler is running
    pub fn is_running(&self) -> bool {
        *self.running.lock()
    }

    /// Stop the scheduler
    pub fn stop(&self) {
        *self.running.lock() = false;
    }

    /// Total cycles completed so far
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Get names of all registered nodes
    pub fn get_node_list(&self) -> Vec<String> {
        self.nodes
            .iter()
            .map(|registered| registered.node.name().to_string())
            .collect()
    }

    /// Main loop with signal handling and cleanup
    pub fn run(&mut self) -> GantryResult<()> {
        self.run_with_filter(None, None)
    }

    /// Run all nodes for a specified duration, then shut down gracefully
    pub fn run_for(&mut self, duration: Duration) -> GantryResult<()> {
        self.run_with_filter(None, Some(duration))
    }

    /// Tick specific nodes by name (runs continuously with the specified nodes)
    pub fn tick(&mut self, node_names: &[&str]) -> GantryResult<()> {
        self.run_with_filter(Some(node_names), None)
    }

    /// Run specific nodes for a specified duration, then shut down gracefully
    pub fn tick_for(&mut self, node_names: &[&str], duration: Duration) -> GantryResult<()> {
        self.run_with_filter(Some(node_names), Some(duration))
    }

    /// Internal method to run the loop with optional node filtering and duration
    fn run_with_filter(
        &mut self,
        node_filter: Option<&[&str]>,
        duration: Option<Duration>,
    ) -> GantryResult<()> {
        let start_time = Instant::now();

        // Set up signal handling; a second scheduler in the same process keeps
        // the first handler, which stops via the shared flag anyway.
        let running = self.running.clone();
        if let Err(e) = ctrlc::set_handler(move || {
            eprintln!("{}", "\nCtrl+C received! Shutting down scheduler...".red());
            *running.lock() = false;
        }) {
            eprintln!("Warning: Failed to set signal handler: {}", e);
        }

        // Execution order: priority first, insertion order within a priority
        self.nodes.sort_by_key(|registered| registered.priority);

        // Initialize nodes
        for registered in self.nodes.iter_mut() {
            let node_name = registered.node.name();
            let should_run = node_filter.is_none_or(|filter| filter.contains(&node_name));

            if should_run && !registered.initialized {
                match registered.node.init(&mut registered.context) {
                    Ok(()) => {
                        registered.initialized = true;
                        println!("Initialized node '{}'", node_name);
                    }
                    Err(e) => {
                        println!("Failed to initialize node '{}': {}", node_name, e);
                        registered
                            .context
                            .transition_to_error(format!("Initialization failed: {}", e));
                    }
                }
            }
        }

        let tick_period = self.config.tick_period();

        // Main tick loop
        while self.is_running() {
            if let Some(max_duration) = duration {
                if start_time.elapsed() >= max_duration {
                    println!("Scheduler reached time limit of {:?}", max_duration);
                    break;
                }
            }

            let tick_start = Instant::now();

            for registered in self.nodes.iter_mut() {
                let node_name = registered.node.name();
                let should_run = node_filter.is_none_or(|filter| filter.contains(&node_name));
                if !should_run || !registered.initialized {
                    continue;
                }

                // Per-node rate gate
                if let (Some(rate_hz), Some(last_tick)) = (registered.rate_hz, registered.last_tick)
                {
                    if last_tick.elapsed() < Duration::from_secs_f64(1.0 / rate_hz) {
                        continue;
                    }
                }

                registered.context.start_tick();
                registered.node.tick(Some(&mut registered.context));
                registered.context.record_tick();
                registered.last_tick = Some(Instant::now());
            }

            self.tick_count += 1;

            // Pace to the target frequency, accounting for the time the cycle
            // itself took. An overrunning cycle gets no sleep and the next one
            // starts immediately; drift accumulates under sustained overrun.
            let elapsed = tick_start.elapsed();
            if elapsed < tick_period {
                std::thread::sleep(tick_period - elapsed);
            }
        }

        // Shutdown nodes
        for registered in self.nodes.iter_mut() {
            let node_name = registered.node.name();
            let should_run = node_filter.is_none_or(|filter| filter.contains(&node_name));

            if should_run && registered.initialized {
                registered.context.shutdown().ok();
                match registered.node.shutdown(&mut registered.context) {
                    Ok(()) => println!("Shutdown node '{}' successfully", node_name),
                    Err(e) => println!("Error shutting down node '{}': {}", node_name, e),
                }
            }
        }

        println!("Scheduler '{}' shutdown complete", self.scheduler_name);
        Ok(())
    }
}
