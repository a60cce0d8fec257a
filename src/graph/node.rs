//! 节点标识
//!
//! 任何可比较、可哈希、可打印的标签都可以作为节点 ID（字符串或整数）

use std::fmt::{Debug, Display};
use std::hash::Hash;

/// 节点 ID 约束
pub trait NodeId: Clone + Eq + Hash + Debug + Display {}

impl<T> NodeId for T where T: Clone + Eq + Hash + Debug + Display {}

/// 将节点序列格式化为 `A -> B -> C`
pub fn format_path<N: Display>(path: &[N]) -> String {
    path.iter()
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join(" -> ")
}
