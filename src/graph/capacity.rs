//! 容量图
//!
//! 最大流算法的输入，容量为非负整数

use super::NodeId;
use crate::error::{Error, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::hash::Hash;

/// 容量图：节点 -> {邻居 -> 容量}
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
#[serde(bound(deserialize = "N: Deserialize<'de> + Eq + Hash"))]
pub struct CapacityGraph<N: Eq + Hash> {
    capacities: IndexMap<N, IndexMap<N, u64>>,
}

impl<N: Eq + Hash> Default for CapacityGraph<N> {
    fn default() -> Self {
        Self {
            capacities: IndexMap::new(),
        }
    }
}

impl<N: NodeId> CapacityGraph<N> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_capacities(capacities: IndexMap<N, IndexMap<N, u64>>) -> Self {
        Self { capacities }
    }

    pub fn add_node(&mut self, node: N) {
        self.capacities.entry(node).or_default();
    }

    /// 设置边容量，两端节点都会获得邻接项
    pub fn add_edge(&mut self, from: N, to: N, capacity: u64) {
        self.capacities
            .entry(from)
            .or_default()
            .insert(to.clone(), capacity);
        self.add_node(to);
    }

    /// 边容量，不存在的边为 0
    pub fn capacity(&self, from: &N, to: &N) -> u64 {
        self.capacities
            .get(from)
            .and_then(|m| m.get(to))
            .copied()
            .unwrap_or(0)
    }

    /// 出边容量表
    pub fn edges_from(&self, node: &N) -> Option<&IndexMap<N, u64>> {
        self.capacities.get(node)
    }

    /// 出边容量之和，超出 `u64` 时饱和
    pub fn out_capacity(&self, node: &N) -> u64 {
        self.capacities
            .get(node)
            .map(|m| m.values().fold(0u64, |total, &c| total.saturating_add(c)))
            .unwrap_or(0)
    }

    pub fn contains(&self, node: &N) -> bool {
        self.capacities.contains_key(node)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &N> {
        self.capacities.keys()
    }

    pub fn node_count(&self) -> usize {
        self.capacities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.capacities.is_empty()
    }

    /// 检查所有被引用的节点都有邻接项
    pub fn validate(&self) -> Result<()> {
        for edges in self.capacities.values() {
            if let Some(to) = edges.keys().find(|to| !self.contains(to)) {
                return Err(Error::unknown_node(to));
            }
        }
        Ok(())
    }

    pub(crate) fn capacities(&self) -> &IndexMap<N, IndexMap<N, u64>> {
        &self.capacities
    }
}

impl<N: NodeId> FromIterator<(N, Vec<(N, u64)>)> for CapacityGraph<N> {
    fn from_iter<I: IntoIterator<Item = (N, Vec<(N, u64)>)>>(iter: I) -> Self {
        Self {
            capacities: iter
                .into_iter()
                .map(|(node, edges)| (node, edges.into_iter().collect()))
                .collect(),
        }
    }
}
