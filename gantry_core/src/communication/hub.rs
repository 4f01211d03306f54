use std::any::Any;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crossbeam::queue::ArrayQueue;
use once_cell::sync::Lazy;
use parking_lot::Mutex;

use crate::core::node::NodeInfo;
use crate::error::{GantryError, GantryResult};

/// Process-wide topic registry. Two hubs created with the same topic name share
/// one queue, so a publisher node and a subscriber node connect by name alone.
static TOPICS: Lazy<Mutex<HashMap<String, Arc<dyn Any + Send + Sync>>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

/// Lock-free atomic metrics for Hub monitoring
#[derive(Debug, Default)]
pub struct AtomicHubMetrics {
    pub messages_sent: AtomicU64,
    pub messages_received: AtomicU64,
    pub send_failures: AtomicU64,
    pub recv_failures: AtomicU64,
}

impl AtomicHubMetrics {
    /// Get current metrics snapshot (for monitoring/debugging)
    pub fn snapshot(&self) -> HubMetrics {
        HubMetrics {
            messages_sent: self.messages_sent.load(Ordering::Relaxed),
            messages_received: self.messages_received.load(Ordering::Relaxed),
            send_failures: self.send_failures.load(Ordering::Relaxed),
            recv_failures: self.recv_failures.load(Ordering::Relaxed),
        }
    }
}

/// Snapshot of Hub traffic counters
#[derive(Debug, Clone, Default)]
pub struct HubMetrics {
    pub messages_sent: u64,
    pub messages_received: u64,
    pub send_failures: u64,
    pub recv_failures: u64,
}

/// Pub/sub handle for one topic.
///
/// The backend is a bounded lock-free ring shared by every Hub with the same
/// topic name. Messages are consumed exactly once: each topic is expected to
/// have a single subscriber node draining it per tick.
pub struct Hub<T> {
    queue: Arc<ArrayQueue<T>>,
    topic_name: String,
    metrics: Arc<AtomicHubMetrics>,
}

impl<T> Clone for Hub<T> {
    fn clone(&self) -> Self {
        Self {
            queue: self.queue.clone(),
            topic_name: self.topic_name.clone(),
            metrics: self.metrics.clone(),
        }
    }
}

impl<T> std::fmt::Debug for Hub<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Hub")
            .field("topic_name", &self.topic_name)
            .finish_non_exhaustive()
    }
}

impl<T: Send + Sync + 'static + Clone + std::fmt::Debug> Hub<T> {
    /// Create a new Hub with the default queue capacity.
    pub fn new(topic_name: &str) -> GantryResult<Self> {
        Self::new_with_capacity(topic_name, 1024)
    }

    /// Create a new Hub with custom capacity.
    ///
    /// If the topic already exists, the existing queue (and its capacity) is
    /// reused; the message type must match the one that created the topic.
    pub fn new_with_capacity(topic_name: &str, capacity: usize) -> GantryResult<Self> {
        if capacity == 0 {
            return Err(GantryError::invalid_input(format!(
                "topic '{}': capacity must be nonzero",
                topic_name
            )));
        }

        let mut topics = TOPICS.lock();
        let queue = match topics.get(topic_name) {
            Some(existing) => existing
                .clone()
                .downcast::<ArrayQueue<T>>()
                .map_err(|_| {
                    GantryError::communication(format!(
                        "topic '{}' already exists with a different message type",
                        topic_name
                    ))
                })?,
            None => {
                let queue = Arc::new(ArrayQueue::<T>::new(capacity));
                topics.insert(
                    topic_name.to_string(),
                    queue.clone() as Arc<dyn Any + Send + Sync>,
                );
                queue
            }
        };

        Ok(Hub {
            queue,
            topic_name: topic_name.to_string(),
            metrics: Arc::new(AtomicHubMetrics::default()),
        })
    }

    /// Publish a message to the topic.
    ///
    /// Returns the message back on failure (queue full) so the caller can
    /// decide whether to drop or retry.
    pub fn send(&self, msg: T, ctx: Option<&mut NodeInfo>) -> Result<(), T>
    where
        T: crate::core::LogSummary,
    {
        // Get the summary before the move; only pay for it when logging
        let summary = ctx.as_ref().map(|_| msg.log_summary());

        match self.queue.push(msg) {
            Ok(()) => {
                self.metrics.messages_sent.fetch_add(1, Ordering::Relaxed);
                if let (Some(ctx), Some(summary)) = (ctx, summary) {
                    ctx.log_pub_summary(&self.topic_name, &summary);
                }
                Ok(())
            }
            Err(msg) => {
                self.metrics.send_failures.fetch_add(1, Ordering::Relaxed);
                Err(msg)
            }
        }
    }

    /// Receive the next pending message, if any.
    pub fn recv(&self, ctx: Option<&mut NodeInfo>) -> Option<T>
    where
        T: crate::core::LogSummary,
    {
        match self.queue.pop() {
            Some(msg) => {
                self.metrics
                    .messages_received
                    .fetch_add(1, Ordering::Relaxed);
                if let Some(ctx) = ctx {
                    let summary = msg.log_summary();
                    ctx.log_sub_summary(&self.topic_name, &summary);
                }
                Some(msg)
            }
            None => {
                self.metrics.recv_failures.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    /// Get current metrics snapshot (lock-free)
    pub fn get_metrics(&self) -> HubMetrics {
        self.metrics.snapshot()
    }

    /// Get the topic name for this Hub
    pub fn get_topic_name(&self) -> &str {
        &self.topic_name
    }
}
