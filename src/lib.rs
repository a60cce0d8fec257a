//! graphkit - 图算法与经典算法练习引擎
//!
//! 提供：
//! - 图遍历、环检测与连通分量
//! - Dijkstra / Bellman-Ford 单源最短路径
//! - Ford-Fulkerson / Edmonds-Karp 最大流与最小割
//! - 快速排序、AVL/BST、CNF 赋值校验和旅行商问题
//! - 基于 JSON 配置的命令菜单

pub mod algorithm;
pub mod cli;
pub mod config;
pub mod error;
pub mod graph;
pub mod report;
pub mod sat;
pub mod sort;
pub mod tree;

// 重导出常用类型
pub use config::Config;
pub use error::{Error, Result};
pub use graph::{CapacityGraph, Graph, NodeId, WeightedGraph};
pub use report::{NullReporter, RecordingReporter, Reporter, Severity, TracingReporter};
pub use tree::{AvlTree, BstTree};

/// 库版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
