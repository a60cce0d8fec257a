//! 带权图
//!
//! 边权为实数，负权只允许用于 Bellman-Ford

use super::NodeId;
use crate::error::{Error, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::hash::Hash;

/// 带权有向图：节点 -> [(邻居, 权重)]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
#[serde(bound(deserialize = "N: Deserialize<'de> + Eq + Hash"))]
pub struct WeightedGraph<N: Eq + Hash> {
    adjacency: IndexMap<N, Vec<(N, f64)>>,
}

impl<N: Eq + Hash> Default for WeightedGraph<N> {
    fn default() -> Self {
        Self {
            adjacency: IndexMap::new(),
        }
    }
}

impl<N: NodeId> WeightedGraph<N> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_adjacency(adjacency: IndexMap<N, Vec<(N, f64)>>) -> Self {
        Self { adjacency }
    }

    pub fn add_node(&mut self, node: N) {
        self.adjacency.entry(node).or_default();
    }

    /// 添加带权有向边，两端节点都会获得邻接项
    pub fn add_edge(&mut self, from: N, to: N, weight: f64) {
        self.adjacency
            .entry(from)
            .or_default()
            .push((to.clone(), weight));
        self.add_node(to);
    }

    /// 获取出边
    pub fn edges_from(&self, node: &N) -> Option<&[(N, f64)]> {
        self.adjacency.get(node).map(Vec::as_slice)
    }

    /// 按键顺序遍历所有边 (from, to, weight)
    pub fn edges(&self) -> impl Iterator<Item = (&N, &N, f64)> {
        self.adjacency
            .iter()
            .flat_map(|(from, edges)| edges.iter().map(move |(to, w)| (from, to, *w)))
    }

    pub fn contains(&self, node: &N) -> bool {
        self.adjacency.contains_key(node)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &N> {
        self.adjacency.keys()
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// 检查所有被引用的节点都有邻接项
    pub fn validate(&self) -> Result<()> {
        match self.edges().find(|(_, to, _)| !self.contains(to)) {
            Some((_, to, _)) => Err(Error::unknown_node(to)),
            None => Ok(()),
        }
    }

    /// 第一条负权边
    pub fn first_negative_edge(&self) -> Option<(&N, &N, f64)> {
        self.edges().find(|(_, _, w)| *w < 0.0)
    }
}

impl<N: NodeId> FromIterator<(N, Vec<(N, f64)>)> for WeightedGraph<N> {
    fn from_iter<I: IntoIterator<Item = (N, Vec<(N, f64)>)>>(iter: I) -> Self {
        Self {
            adjacency: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges_in_key_order() {
        let mut graph = WeightedGraph::new();
        graph.add_edge("A", "B", 1.0);
        graph.add_edge("A", "C", 4.0);
        graph.add_edge("B", "C", 2.0);

        let edges: Vec<_> = graph.edges().map(|(u, v, w)| (*u, *v, w)).collect();
        assert_eq!(
            edges,
            vec![("A", "B", 1.0), ("A", "C", 4.0), ("B", "C", 2.0)]
        );
    }

    #[test]
    fn test_validate_missing_entry() {
        let graph: WeightedGraph<&str> = [("A", vec![("B", 1.0)])].into_iter().collect();

        match graph.validate() {
            Err(Error::UnknownNode(node)) => assert_eq!(node, "B"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_first_negative_edge() {
        let mut graph = WeightedGraph::new();
        graph.add_edge(1, 2, 3.0);
        assert!(graph.first_negative_edge().is_none());

        graph.add_edge(2, 3, -1.5);
        assert_eq!(graph.first_negative_edge(), Some((&2, &3, -1.5)));
    }

    #[test]
    fn test_deserialize_pairs() {
        let graph: WeightedGraph<String> =
            serde_json::from_str(r#"{"A": [["B", 1], ["C", 4.5]], "B": [], "C": []}"#).unwrap();

        assert!(graph.validate().is_ok());
        let a = graph.edges_from(&"A".to_string()).unwrap();
        assert_eq!(a[1], ("C".to_string(), 4.5));
    }
}
