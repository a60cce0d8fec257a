//! 图模型模块
//!
//! 定义无权图、带权图和容量图三种输入结构

mod adjacency;
mod capacity;
mod node;
mod weighted;

pub use adjacency::Graph;
pub use capacity::CapacityGraph;
pub use node::{format_path, NodeId};
pub use weighted::WeightedGraph;
