pub mod node;

pub use node::{LogSummary, Node, NodeConfig, NodeInfo, NodeMetrics, NodeState};
