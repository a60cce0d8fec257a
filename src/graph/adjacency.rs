//! 无权图
//!
//! 邻接表表示，键的插入顺序即遍历顺序

use super::NodeId;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::hash::Hash;

/// 无权有向图（无向图通过双向邻接项表示）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
#[serde(bound(deserialize = "N: Deserialize<'de> + Eq + Hash"))]
pub struct Graph<N: Eq + Hash> {
    adjacency: IndexMap<N, Vec<N>>,
}

impl<N: Eq + Hash> Default for Graph<N> {
    fn default() -> Self {
        Self {
            adjacency: IndexMap::new(),
        }
    }
}

impl<N: NodeId> Graph<N> {
    /// 创建空图
    pub fn new() -> Self {
        Self::default()
    }

    /// 从邻接表创建
    pub fn from_adjacency(adjacency: IndexMap<N, Vec<N>>) -> Self {
        Self { adjacency }
    }

    /// 添加节点（已存在时不变）
    pub fn add_node(&mut self, node: N) {
        self.adjacency.entry(node).or_default();
    }

    /// 添加有向边，两端节点都会获得邻接项
    pub fn add_edge(&mut self, from: N, to: N) {
        self.adjacency.entry(from).or_default().push(to.clone());
        self.add_node(to);
    }

    /// 添加无向边
    pub fn add_undirected_edge(&mut self, a: N, b: N) {
        self.add_edge(a.clone(), b.clone());
        self.add_edge(b, a);
    }

    /// 获取邻居列表，节点没有邻接项时返回 None
    pub fn neighbors(&self, node: &N) -> Option<&[N]> {
        self.adjacency.get(node).map(Vec::as_slice)
    }

    /// 获取邻居列表，缺失节点视为没有邻居
    pub fn neighbors_or_empty(&self, node: &N) -> &[N] {
        self.neighbors(node).unwrap_or(&[])
    }

    pub fn contains(&self, node: &N) -> bool {
        self.adjacency.contains_key(node)
    }

    /// 按键顺序遍历节点
    pub fn nodes(&self) -> impl Iterator<Item = &N> {
        self.adjacency.keys()
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }
}

impl<N: NodeId> FromIterator<(N, Vec<N>)> for Graph<N> {
    fn from_iter<I: IntoIterator<Item = (N, Vec<N>)>>(iter: I) -> Self {
        Self {
            adjacency: iter.into_iter().collect(),
        }
    }
}
