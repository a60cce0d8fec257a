//! 图遍历算法
//!
//! 深度优先、广度优先、环检测和连通分量。深度优先类算法使用显式栈
//! 保存 (节点, 邻居游标)，访问顺序与递归写法一致，但不受调用栈深度限制。

use crate::error::{Error, Result};
use crate::graph::{Graph, NodeId};
use crate::report::Reporter;
use std::collections::{HashSet, VecDeque};

/// 深度优先遍历
///
/// 每个节点在首次被访问时报告一次。访问到没有邻接项的节点时返回
/// [`Error::UnknownNode`]（深度优先不容忍隐式叶子节点）。
pub fn depth_first<N: NodeId>(
    graph: &Graph<N>,
    start: &N,
    reporter: &dyn Reporter,
) -> Result<Vec<N>> {
    if graph.is_empty() {
        reporter.error("未提供图，无法进行深度优先遍历");
        return Ok(Vec::new());
    }

    let mut visited: HashSet<&N> = HashSet::new();
    let mut order = Vec::new();

    visited.insert(start);
    order.push(start.clone());
    reporter.info(&format!("DFS 访问: {}", start));

    let neighbors = graph
        .neighbors(start)
        .ok_or_else(|| Error::unknown_node(start))?;
    let mut stack: Vec<(&[N], usize)> = vec![(neighbors, 0)];

    while let Some(frame) = stack.last_mut() {
        let neighbors = frame.0;
        match neighbors.get(frame.1) {
            Some(next) => {
                frame.1 += 1;
                if visited.insert(next) {
                    order.push(next.clone());
                    reporter.info(&format!("DFS 访问: {}", next));

                    let next_neighbors = graph
                        .neighbors(next)
                        .ok_or_else(|| Error::unknown_node(next))?;
                    stack.push((next_neighbors, 0));
                }
            }
            None => {
                stack.pop();
            }
        }
    }

    Ok(order)
}

/// 广度优先遍历
///
/// 节点可能在首次出队前被多次入队，出队时已访问的直接跳过。
/// 缺失邻接项的节点视为没有邻居。
pub fn breadth_first<N: NodeId>(graph: &Graph<N>, start: &N, reporter: &dyn Reporter) -> Vec<N> {
    if graph.is_empty() {
        reporter.error("未提供图，无法进行广度优先遍历");
        return Vec::new();
    }

    let mut visited: HashSet<&N> = HashSet::new();
    let mut order = Vec::new();
    let mut queue = VecDeque::from([start]);

    while let Some(node) = queue.pop_front() {
        if !visited.insert(node) {
            continue;
        }
        reporter.info(&format!("BFS 访问: {}", node));
        order.push(node.clone());

        for neighbor in graph.neighbors_or_empty(node) {
            if !visited.contains(neighbor) {
                queue.push_back(neighbor);
            }
        }
    }

    order
}

/// 有向图环检测
///
/// 从每个未发现的节点出发做深度优先搜索，同时维护“在递归栈上”的集合。
/// 指向栈上节点的回边即为环（自环同样算作环）。
pub fn has_cycle<N: NodeId>(graph: &Graph<N>) -> bool {
    let mut visited: HashSet<&N> = HashSet::new();
    let mut on_stack: HashSet<&N> = HashSet::new();

    for root in graph.nodes() {
        if visited.contains(root) {
            continue;
        }

        visited.insert(root);
        on_stack.insert(root);
        let mut stack: Vec<(&N, &[N], usize)> = vec![(root, graph.neighbors_or_empty(root), 0)];

        while let Some(frame) = stack.last_mut() {
            let (node, neighbors) = (frame.0, frame.1);
            match neighbors.get(frame.2) {
                Some(next) => {
                    frame.2 += 1;
                    if on_stack.contains(next) {
                        return true;
                    }
                    if visited.insert(next) {
                        on_stack.insert(next);
                        stack.push((next, graph.neighbors_or_empty(next), 0));
                    }
                }
                None => {
                    // 所有后代都已探索完毕才出栈
                    on_stack.remove(node);
                    stack.pop();
                }
            }
        }
    }

    false
}

/// 连通分量（无向图）
///
/// 假设输入已包含对称邻接项。分量按图的键顺序发现，分量内按广度优先的发现顺序排列。
pub fn connected_components<N: NodeId>(graph: &Graph<N>) -> Vec<Vec<N>> {
    let mut visited: HashSet<&N> = HashSet::new();
    let mut components = Vec::new();

    for root in graph.nodes() {
        if visited.contains(root) {
            continue;
        }

        let mut component = Vec::new();
        let mut queue = VecDeque::from([root]);

        while let Some(current) = queue.pop_front() {
            if !visited.insert(current) {
                continue;
            }
            component.push(current.clone());

            for neighbor in graph.neighbors_or_empty(current) {
                if !visited.contains(neighbor) {
                    queue.push_back(neighbor);
                }
            }
        }

        components.push(component);
    }

    components
}
