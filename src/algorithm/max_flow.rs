//! 最大流算法
//!
//! Ford-Fulkerson（DFS 找增广路径）与 Edmonds-Karp（BFS 找最短增广路径），
//! 二者共用同一个驱动：在私有的残量图上反复寻找增广路径并推送瓶颈流量，
//! 直到汇点不可达为止。

use crate::error::{Error, Result};
use crate::graph::{format_path, CapacityGraph, NodeId};
use crate::report::Reporter;
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt;
use std::hash::Hash;

/// 增广路径搜索策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AugmentStrategy {
    /// 深度优先（Ford-Fulkerson）
    DepthFirst,
    /// 广度优先，每次取边数最少的增广路径（Edmonds-Karp）
    BreadthFirst,
}

impl fmt::Display for AugmentStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AugmentStrategy::DepthFirst => write!(f, "Ford-Fulkerson"),
            AugmentStrategy::BreadthFirst => write!(f, "Edmonds-Karp"),
        }
    }
}

/// 最大流结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MaxFlow<N: Eq + Hash> {
    /// 最大流量值
    pub value: u64,
    /// 增广次数
    pub augmentations: usize,
    /// 最小割的源侧顶点集（结束时残量图中从源点可达的节点）
    pub source_side: IndexSet<N>,
}

impl<N: NodeId> MaxFlow<N> {
    fn empty() -> Self {
        Self {
            value: 0,
            augmentations: 0,
            source_side: IndexSet::new(),
        }
    }

    /// 跨越最小割的原图边 (from, to, capacity)
    pub fn cut_edges(&self, graph: &CapacityGraph<N>) -> Vec<(N, N, u64)> {
        let mut edges = Vec::new();
        for from in &self.source_side {
            if let Some(targets) = graph.edges_from(from) {
                for (to, &capacity) in targets {
                    if !self.source_side.contains(to) {
                        edges.push((from.clone(), to.clone(), capacity));
                    }
                }
            }
        }
        edges
    }

    /// 最小割容量，等于最大流量值（超出 `u64` 时饱和）
    pub fn cut_capacity(&self, graph: &CapacityGraph<N>) -> u64 {
        self.cut_edges(graph)
            .iter()
            .fold(0u64, |total, (_, _, c)| total.saturating_add(*c))
    }
}

/// 残量图
///
/// 两层映射：`forward` 是输入容量的工作副本，`reverse` 记录已推送流量形成的
/// 反向容量，按需创建。边 (u, v) 的残量为两层之和。
struct ResidualGraph<N: Eq + Hash> {
    forward: IndexMap<N, IndexMap<N, u64>>,
    reverse: IndexMap<N, IndexMap<N, u64>>,
}

fn layer_capacity<N: NodeId>(layer: &IndexMap<N, IndexMap<N, u64>>, from: &N, to: &N) -> u64 {
    layer
        .get(from)
        .and_then(|m| m.get(to))
        .copied()
        .unwrap_or(0)
}

impl<N: NodeId> ResidualGraph<N> {
    fn new(graph: &CapacityGraph<N>) -> Self {
        Self {
            forward: graph.capacities().clone(),
            reverse: IndexMap::new(),
        }
    }

    fn residual(&self, from: &N, to: &N) -> u64 {
        layer_capacity(&self.forward, from, to)
            .saturating_add(layer_capacity(&self.reverse, from, to))
    }

    /// 邻居顺序：先是输入中的正向邻居，再是按创建顺序排列的仅反向邻居
    fn neighbors<'a>(&'a self, node: &N) -> impl Iterator<Item = &'a N> + 'a {
        let forward = self.forward.get(node);
        let reverse = self.reverse.get(node);

        forward.into_iter().flat_map(|m| m.keys()).chain(
            reverse
                .into_iter()
                .flat_map(|m| m.keys())
                .filter(move |v| !forward.is_some_and(|m| m.contains_key(*v))),
        )
    }

    /// 沿 (from, to) 推送流量：先抵消反向层，再扣减正向层，最后增加 (to, from) 的反向容量
    fn push(&mut self, from: &N, to: &N, amount: u64) {
        let mut remaining = amount;

        if let Some(capacity) = self.reverse.get_mut(from).and_then(|m| m.get_mut(to)) {
            let undo = remaining.min(*capacity);
            *capacity -= undo;
            remaining -= undo;
        }

        if remaining > 0 {
            if let Some(capacity) = self.forward.get_mut(from).and_then(|m| m.get_mut(to)) {
                debug_assert!(*capacity >= remaining);
                *capacity -= remaining;
            }
        }

        let back = self
            .reverse
            .entry(to.clone())
            .or_default()
            .entry(from.clone())
            .or_insert(0);
        *back = back.saturating_add(amount);
    }

    /// DFS 找增广路径（迭代实现，顺序与递归一致）
    fn dfs_find_path(&self, source: &N, sink: &N) -> Option<Vec<N>> {
        if source == sink {
            return None;
        }

        let mut visited: HashSet<&N> = HashSet::from([source]);
        let mut stack = vec![(source, self.neighbors(source))];

        while let Some((node, neighbors)) = stack.last_mut() {
            let node = *node;
            match neighbors.next() {
                Some(next) => {
                    if visited.contains(next) || self.residual(node, next) == 0 {
                        continue;
                    }
                    if next == sink {
                        let mut path: Vec<N> = stack.iter().map(|(n, _)| (*n).clone()).collect();
                        path.push(next.clone());
                        return Some(path);
                    }
                    visited.insert(next);
                    stack.push((next, self.neighbors(next)));
                }
                None => {
                    stack.pop();
                }
            }
        }

        None
    }

    /// BFS 找边数最少的增广路径
    fn bfs_find_path(&self, source: &N, sink: &N) -> Option<Vec<N>> {
        if source == sink {
            return None;
        }

        let mut visited: HashSet<&N> = HashSet::from([source]);
        let mut parent: HashMap<&N, &N> = HashMap::new();
        let mut queue = VecDeque::from([source]);

        'search: while let Some(u) = queue.pop_front() {
            for v in self.neighbors(u) {
                if visited.contains(v) || self.residual(u, v) == 0 {
                    continue;
                }
                visited.insert(v);
                parent.insert(v, u);
                if v == sink {
                    break 'search;
                }
                queue.push_back(v);
            }
        }

        // 重构路径
        let mut path = vec![sink.clone()];
        let mut current = sink;
        while current != source {
            let prev = *parent.get(current)?;
            path.push(prev.clone());
            current = prev;
        }
        path.reverse();

        Some(path)
    }

    /// 残量图中从源点可达的节点
    fn reachable_from(&self, source: &N) -> IndexSet<N> {
        let mut visited = IndexSet::new();
        let mut queue = VecDeque::from([source]);
        visited.insert(source.clone());

        while let Some(u) = queue.pop_front() {
            for v in self.neighbors(u) {
                if !visited.contains(v) && self.residual(u, v) > 0 {
                    visited.insert(v.clone());
                    queue.push_back(v);
                }
            }
        }

        visited
    }
}

/// 计算从 `source` 到 `sink` 的最大流
///
/// 每次增广都会以 `info` 级别报告路径与推送的流量。汇点不可达是正常的终止条件。
/// 调用方的容量图不会被修改。
pub fn max_flow<N: NodeId>(
    graph: &CapacityGraph<N>,
    source: &N,
    sink: &N,
    strategy: AugmentStrategy,
    reporter: &dyn Reporter,
) -> Result<MaxFlow<N>> {
    if graph.is_empty() {
        reporter.error("未提供容量图，无法计算最大流");
        return Ok(MaxFlow::empty());
    }
    for node in [source, sink] {
        if !graph.contains(node) {
            return Err(Error::unknown_node(node));
        }
    }
    graph.validate()?;

    let mut residual = ResidualGraph::new(graph);
    let mut result = MaxFlow::empty();

    loop {
        let path = match strategy {
            AugmentStrategy::DepthFirst => residual.dfs_find_path(source, sink),
            AugmentStrategy::BreadthFirst => residual.bfs_find_path(source, sink),
        };
        let Some(path) = path else {
            break;
        };

        let bottleneck = path
            .windows(2)
            .map(|edge| residual.residual(&edge[0], &edge[1]))
            .min()
            .unwrap_or(0);
        if bottleneck == 0 {
            break;
        }

        result.value = result.value.checked_add(bottleneck).ok_or_else(|| {
            Error::CapacityOverflow(format!(
                "{} 到 {} 的总流量超出 u64 范围",
                source, sink
            ))
        })?;
        for edge in path.windows(2) {
            residual.push(&edge[0], &edge[1], bottleneck);
        }
        result.augmentations += 1;

        reporter.info(&format!(
            "找到增广路径: {}，流量 = {}",
            format_path(&path),
            bottleneck
        ));
    }

    result.source_side = residual.reachable_from(source);
    Ok(result)
}

/// Ford-Fulkerson 最大流（DFS 增广）
///
/// 增广路径取决于邻居的遍历顺序，病态容量下可能需要很多次小流量增广。
pub fn ford_fulkerson<N: NodeId>(
    graph: &CapacityGraph<N>,
    source: &N,
    sink: &N,
    reporter: &dyn Reporter,
) -> Result<u64> {
    max_flow(graph, source, sink, AugmentStrategy::DepthFirst, reporter).map(|f| f.value)
}

/// Edmonds-Karp 最大流（BFS 增广）
pub fn edmonds_karp<N: NodeId>(
    graph: &CapacityGraph<N>,
    source: &N,
    sink: &N,
    reporter: &dyn Reporter,
) -> Result<u64> {
    max_flow(graph, source, sink, AugmentStrategy::BreadthFirst, reporter).map(|f| f.value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{NullReporter, RecordingReporter};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use rstest::rstest;

    fn create_flow_graph() -> CapacityGraph<&'static str> {
        // 经典最大流测试图
        //     10       10
        // S -----> A -----> T
        // |        ^        ^
        // |5       |5       |
        // v        |        |
        // B -----> C ------>|
        //     10       10
        [
            ("S", vec![("A", 10), ("B", 5)]),
            ("A", vec![("T", 10)]),
            ("B", vec![("C", 10)]),
            ("C", vec![("A", 5), ("T", 10)]),
            ("T", vec![]),
        ]
        .into_iter()
        .collect()
    }

    fn create_textbook_graph() -> CapacityGraph<&'static str> {
        [
            ("s", vec![("v1", 16), ("v2", 13)]),
            ("v1", vec![("v3", 12)]),
            ("v2", vec![("v1", 4), ("v4", 14)]),
            ("v3", vec![("v2", 9), ("t", 20)]),
            ("v4", vec![("v3", 7), ("t", 4)]),
            ("t", vec![]),
        ]
        .into_iter()
        .collect()
    }

    #[rstest]
    fn test_max_flow_basic(
        #[values(AugmentStrategy::DepthFirst, AugmentStrategy::BreadthFirst)] strategy: AugmentStrategy,
    ) {
        let graph = create_flow_graph();
        let result = max_flow(&graph, &"S", &"T", strategy, &NullReporter).unwrap();

        // 10 经 A + 5 经 B-C
        assert_eq!(result.value, 15);
        assert_eq!(result.cut_capacity(&graph), 15);
    }

    #[rstest]
    fn test_max_flow_textbook(
        #[values(AugmentStrategy::DepthFirst, AugmentStrategy::BreadthFirst)] strategy: AugmentStrategy,
    ) {
        let graph = create_textbook_graph();
        let result = max_flow(&graph, &"s", &"t", strategy, &NullReporter).unwrap();

        assert_eq!(result.value, 23);
        let mut source_side: Vec<&str> = result.source_side.iter().copied().collect();
        source_side.sort();
        assert_eq!(source_side, vec!["s", "v1", "v2", "v4"]);
        assert_eq!(result.cut_capacity(&graph), 23);
    }

    #[test]
    fn test_simple_flow() {
        let mut graph = CapacityGraph::new();
        graph.add_edge(1, 2, 10);
        graph.add_edge(2, 3, 5);

        // 瓶颈在 2 -> 3
        assert_eq!(ford_fulkerson(&graph, &1, &3, &NullReporter).unwrap(), 5);
        assert_eq!(edmonds_karp(&graph, &1, &3, &NullReporter).unwrap(), 5);
    }

    #[test]
    fn test_parallel_paths() {
        let mut graph = CapacityGraph::new();
        graph.add_edge("S", "A", 5);
        graph.add_edge("A", "T", 5);
        graph.add_edge("S", "B", 10);
        graph.add_edge("B", "T", 10);

        let reporter = RecordingReporter::new();
        assert_eq!(edmonds_karp(&graph, &"S", &"T", &reporter).unwrap(), 15);
        assert_eq!(
            reporter.infos(),
            vec![
                "找到增广路径: S -> A -> T，流量 = 5",
                "找到增广路径: S -> B -> T，流量 = 10",
            ]
        );
    }

    #[rstest]
    fn test_total_flow_overflow(
        #[values(AugmentStrategy::DepthFirst, AugmentStrategy::BreadthFirst)] strategy: AugmentStrategy,
    ) {
        let mut graph = CapacityGraph::new();
        graph.add_edge("S", "A", u64::MAX);
        graph.add_edge("A", "T", u64::MAX);
        graph.add_edge("S", "B", u64::MAX);
        graph.add_edge("B", "T", u64::MAX);

        let result = max_flow(&graph, &"S", &"T", strategy, &NullReporter);
        assert!(matches!(result, Err(Error::CapacityOverflow(_))));

        // 单条路径恰好取满 u64::MAX
        let mut single = CapacityGraph::new();
        single.add_edge("S", "A", u64::MAX);
        single.add_edge("A", "T", u64::MAX);
        single.add_edge("T", "A", u64::MAX);
        let result = max_flow(&single, &"S", &"T", strategy, &NullReporter).unwrap();
        assert_eq!(result.value, u64::MAX);
        assert_eq!(result.cut_capacity(&single), u64::MAX);
        assert_eq!(graph.out_capacity(&"S"), u64::MAX);
    }

    #[test]
    fn test_ford_fulkerson_uses_reverse_edge() {
        // DFS 先走 S -> A -> B -> T，之后必须经 B -> A 的反向边撤销
        let graph: CapacityGraph<&str> = [
            ("S", vec![("A", 1), ("B", 1)]),
            ("A", vec![("B", 1), ("T", 1)]),
            ("B", vec![("T", 1)]),
            ("T", vec![]),
        ]
        .into_iter()
        .collect();

        let reporter = RecordingReporter::new();
        assert_eq!(ford_fulkerson(&graph, &"S", &"T", &reporter).unwrap(), 2);
        assert_eq!(
            reporter.infos(),
            vec![
                "找到增广路径: S -> A -> B -> T，流量 = 1",
                "找到增广路径: S -> B -> A -> T，流量 = 1",
            ]
        );
    }

    #[test]
    fn test_edmonds_karp_prefers_fewest_edges() {
        let graph: CapacityGraph<&str> = [
            ("S", vec![("A", 3), ("T", 2)]),
            ("A", vec![("B", 3)]),
            ("B", vec![("T", 3)]),
            ("T", vec![]),
        ]
        .into_iter()
        .collect();

        let dfs = RecordingReporter::new();
        let bfs = RecordingReporter::new();
        assert_eq!(ford_fulkerson(&graph, &"S", &"T", &dfs).unwrap(), 5);
        assert_eq!(edmonds_karp(&graph, &"S", &"T", &bfs).unwrap(), 5);

        assert_eq!(dfs.infos()[0], "找到增广路径: S -> A -> B -> T，流量 = 3");
        assert_eq!(bfs.infos()[0], "找到增广路径: S -> T，流量 = 2");
    }

    #[rstest]
    fn test_unreachable_sink(
        #[values(AugmentStrategy::DepthFirst, AugmentStrategy::BreadthFirst)] strategy: AugmentStrategy,
    ) {
        let graph: CapacityGraph<&str> = [("S", vec![("A", 4)]), ("A", vec![]), ("T", vec![])]
            .into_iter()
            .collect();

        let reporter = RecordingReporter::new();
        let result = max_flow(&graph, &"S", &"T", strategy, &reporter).unwrap();
        assert_eq!(result.value, 0);
        assert_eq!(result.augmentations, 0);
        assert!(reporter.events().is_empty());
        assert_eq!(result.source_side.len(), 2);
    }

    #[test]
    fn test_source_equals_sink() {
        let graph = create_flow_graph();
        assert_eq!(ford_fulkerson(&graph, &"S", &"S", &NullReporter).unwrap(), 0);
        assert_eq!(edmonds_karp(&graph, &"S", &"S", &NullReporter).unwrap(), 0);
    }

    #[test]
    fn test_unknown_terminals() {
        let graph = create_flow_graph();
        assert!(matches!(
            ford_fulkerson(&graph, &"X", &"T", &NullReporter),
            Err(Error::UnknownNode(n)) if n == "X"
        ));
        assert!(matches!(
            edmonds_karp(&graph, &"S", &"Y", &NullReporter),
            Err(Error::UnknownNode(n)) if n == "Y"
        ));
    }

    #[test]
    fn test_empty_graph_reports_error() {
        let graph: CapacityGraph<&str> = CapacityGraph::new();
        let reporter = RecordingReporter::new();

        assert_eq!(ford_fulkerson(&graph, &"A", &"F", &reporter).unwrap(), 0);
        assert_eq!(reporter.errors().len(), 1);
    }

    #[test]
    fn test_input_not_mutated() {
        let graph = create_textbook_graph();
        let snapshot = graph.clone();

        ford_fulkerson(&graph, &"s", &"t", &NullReporter).unwrap();
        edmonds_karp(&graph, &"s", &"t", &NullReporter).unwrap();
        assert_eq!(graph, snapshot);
    }

    #[test]
    fn test_residual_push_cancels_reverse_first() {
        let graph: CapacityGraph<&str> = [("A", vec![("B", 5)]), ("B", vec![("A", 2)])]
            .into_iter()
            .collect();
        let mut residual = ResidualGraph::new(&graph);

        residual.push(&"A", &"B", 3);
        assert_eq!(residual.residual(&"A", &"B"), 2);
        assert_eq!(residual.residual(&"B", &"A"), 5);

        // 先用掉反向层的 3，再用正向层的 1
        residual.push(&"B", &"A", 4);
        assert_eq!(layer_capacity(&residual.reverse, &"B", &"A"), 0);
        assert_eq!(layer_capacity(&residual.forward, &"B", &"A"), 1);
        assert_eq!(residual.residual(&"A", &"B"), 6);

        let neighbors: Vec<&&str> = residual.neighbors(&"A").collect();
        assert_eq!(neighbors, vec![&"B"]);
    }

    fn random_graph(rng: &mut StdRng, n: u32) -> CapacityGraph<u32> {
        let mut graph = CapacityGraph::new();
        for u in 0..n {
            graph.add_node(u);
        }
        for u in 0..n {
            for v in 0..n {
                if u != v && rng.gen_bool(0.4) {
                    graph.add_edge(u, v, rng.gen_range(1..20));
                }
            }
        }
        graph
    }

    #[test]
    fn test_strategies_agree_on_random_graphs() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            let graph = random_graph(&mut rng, 7);
            let sink = 6;

            let dfs = max_flow(&graph, &0, &sink, AugmentStrategy::DepthFirst, &NullReporter).unwrap();
            let bfs = max_flow(&graph, &0, &sink, AugmentStrategy::BreadthFirst, &NullReporter).unwrap();

            assert_eq!(dfs.value, bfs.value);
            assert!(dfs.value <= graph.out_capacity(&0));
            assert_eq!(dfs.cut_capacity(&graph), dfs.value);
            assert_eq!(bfs.cut_capacity(&graph), bfs.value);
            assert!(!bfs.source_side.contains(&sink));
        }
    }
}
