//! 图算法模块
//!
//! 包含遍历、最短路径、最大流和旅行商算法

pub mod max_flow;
pub mod shortest_path;
pub mod traversal;
pub mod tsp;

pub use max_flow::{edmonds_karp, ford_fulkerson, max_flow, AugmentStrategy, MaxFlow};
pub use shortest_path::{bellman_ford, dijkstra, reconstruct_path, ShortestPaths};
pub use traversal::{breadth_first, connected_components, depth_first, has_cycle};
pub use tsp::Tour;
