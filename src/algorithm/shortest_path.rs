//! 单源最短路径算法
//!
//! - Dijkstra：非负权图，优先队列按当前最优距离出队
//! - Bellman-Ford：允许负权，能检测从起点可达的负权环
//!
//! 距离表与父节点表只在一次调用内创建和修改。

use crate::error::{Error, Result};
use crate::graph::{NodeId, WeightedGraph};
use crate::report::Reporter;
use indexmap::IndexMap;
use priority_queue::PriorityQueue;
use serde::Serialize;
use std::cmp::{Ordering, Reverse};
use std::hash::Hash;

/// 单源最短路径结果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShortestPaths<N: Eq + Hash> {
    /// 起点
    source: N,
    /// 节点 -> 最短距离（不可达为正无穷）
    distances: IndexMap<N, f64>,
    /// 节点 -> 前驱节点
    parents: IndexMap<N, Option<N>>,
}

impl<N: NodeId> ShortestPaths<N> {
    fn empty(source: N) -> Self {
        Self {
            source,
            distances: IndexMap::new(),
            parents: IndexMap::new(),
        }
    }

    /// 所有节点距离为正无穷，起点为 0
    fn init(graph: &WeightedGraph<N>, source: &N) -> Self {
        let mut distances: IndexMap<N, f64> =
            graph.nodes().map(|n| (n.clone(), f64::INFINITY)).collect();
        distances.insert(source.clone(), 0.0);
        let parents = graph.nodes().map(|n| (n.clone(), None)).collect();

        Self {
            source: source.clone(),
            distances,
            parents,
        }
    }

    /// 当前最优距离，未知节点视为正无穷
    fn best(&self, node: &N) -> f64 {
        self.distances.get(node).copied().unwrap_or(f64::INFINITY)
    }

    /// 松弛成功时更新距离和前驱
    fn relax(&mut self, from: &N, to: &N, distance: f64) {
        self.distances.insert(to.clone(), distance);
        self.parents.insert(to.clone(), Some(from.clone()));
    }

    pub fn source(&self) -> &N {
        &self.source
    }

    /// 到某节点的距离；节点不在图中时返回 None
    pub fn distance(&self, node: &N) -> Option<f64> {
        self.distances.get(node).copied()
    }

    pub fn is_reachable(&self, node: &N) -> bool {
        self.distance(node).is_some_and(f64::is_finite)
    }

    /// 前驱节点
    pub fn parent(&self, node: &N) -> Option<&N> {
        self.parents.get(node).and_then(Option::as_ref)
    }

    pub fn distances(&self) -> &IndexMap<N, f64> {
        &self.distances
    }

    pub fn parents(&self) -> &IndexMap<N, Option<N>> {
        &self.parents
    }

    /// 从起点到 `end` 的路径，不可达时为空
    pub fn path_to(&self, end: &N) -> Vec<N> {
        reconstruct_path(&self.parents, &self.source, end)
    }

    /// 拆分为 (距离表, 父节点表)
    pub fn into_parts(self) -> (IndexMap<N, f64>, IndexMap<N, Option<N>>) {
        (self.distances, self.parents)
    }

    fn reachable_count(&self) -> usize {
        self.distances.values().filter(|d| d.is_finite()).count()
    }
}

/// 优先队列中的距离键（全序比较）
#[derive(Debug, Clone, Copy)]
struct Distance(f64);

impl PartialEq for Distance {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Distance {}

impl PartialOrd for Distance {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Distance {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// 起点必须存在，且所有被引用的节点都有邻接项
fn check_inputs<N: NodeId>(graph: &WeightedGraph<N>, start: &N) -> Result<()> {
    if !graph.contains(start) {
        return Err(Error::unknown_node(start));
    }
    graph.validate()
}

/// Dijkstra 最短路径
///
/// 要求所有边权非负，出现负权边时返回 [`Error::NegativeWeight`]。
pub fn dijkstra<N: NodeId>(
    graph: &WeightedGraph<N>,
    start: &N,
    reporter: &dyn Reporter,
) -> Result<ShortestPaths<N>> {
    if graph.is_empty() {
        reporter.error("未提供带权图，无法运行 Dijkstra");
        return Ok(ShortestPaths::empty(start.clone()));
    }
    check_inputs(graph, start)?;

    if let Some((from, to, weight)) = graph.first_negative_edge() {
        return Err(Error::NegativeWeight {
            from: from.to_string(),
            to: to.to_string(),
            weight,
        });
    }

    let mut paths = ShortestPaths::init(graph, start);
    let mut frontier: PriorityQueue<N, Reverse<Distance>> = PriorityQueue::new();
    frontier.push(start.clone(), Reverse(Distance(0.0)));

    while let Some((node, Reverse(Distance(current)))) = frontier.pop() {
        // 过期条目
        if current > paths.best(&node) {
            continue;
        }

        let edges = graph
            .edges_from(&node)
            .ok_or_else(|| Error::unknown_node(&node))?;

        for (neighbor, weight) in edges {
            let candidate = current + weight;
            if candidate < paths.best(neighbor) {
                paths.relax(&node, neighbor, candidate);
                frontier.push_increase(neighbor.clone(), Reverse(Distance(candidate)));
            }
        }
    }

    reporter.info(&format!(
        "Dijkstra 完成: 从 {} 可达 {}/{} 个节点",
        start,
        paths.reachable_count(),
        graph.node_count()
    ));

    Ok(paths)
}

/// Bellman-Ford 最短路径
///
/// 按图的键顺序松弛所有边，最多 |V|-1 轮，某轮无更新时提前结束。
/// 之后再检查一轮，仍可松弛则说明存在从起点可达的负权环，
/// 返回 [`Error::NegativeCycle`]，不返回部分结果。
pub fn bellman_ford<N: NodeId>(
    graph: &WeightedGraph<N>,
    start: &N,
    reporter: &dyn Reporter,
) -> Result<ShortestPaths<N>> {
    if graph.is_empty() {
        reporter.error("未提供带权图，无法运行 Bellman-Ford");
        return Ok(ShortestPaths::empty(start.clone()));
    }
    check_inputs(graph, start)?;

    let mut paths = ShortestPaths::init(graph, start);

    for pass in 1..graph.node_count() {
        let mut updated = false;
        for (u, v, w) in graph.edges() {
            let candidate = paths.best(u) + w;
            if candidate < paths.best(v) {
                paths.relax(u, v, candidate);
                updated = true;
            }
        }

        if !updated {
            reporter.info(&format!("Bellman-Ford 第 {} 轮无更新，提前结束", pass));
            break;
        }
    }

    let still_relaxes = graph
        .edges()
        .any(|(u, v, w)| paths.best(u) + w < paths.best(v));
    if still_relaxes {
        return Err(Error::NegativeCycle(start.to_string()));
    }

    Ok(paths)
}

/// 根据父节点表重构路径
///
/// 从 `end` 沿前驱回溯到没有前驱的节点，反转后仅当首节点为 `start` 时返回，
/// 否则（不可达或 `end` 不在表中）返回空序列。
pub fn reconstruct_path<N: NodeId>(
    parents: &IndexMap<N, Option<N>>,
    start: &N,
    end: &N,
) -> Vec<N> {
    if !parents.contains_key(end) {
        return Vec::new();
    }

    let mut path = vec![end.clone()];
    let mut current = end;
    while let Some(Some(prev)) = parents.get(current) {
        // 前驱链成环，表已损坏
        if path.len() > parents.len() {
            return Vec::new();
        }
        path.push(prev.clone());
        current = prev;
    }
    path.reverse();

    if path.first() == Some(start) {
        path
    } else {
        Vec::new()
    }
}
