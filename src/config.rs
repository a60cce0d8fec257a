//! JSON 配置
//!
//! 每个菜单项对应一个可选的配置段，缺失的段使用空数据和默认起点。
//! 段名同时接受 `ex1`..`ex7` 形式的别名。

use crate::error::{Error, Result};
use crate::graph::{CapacityGraph, Graph, WeightedGraph};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// 默认配置文件路径
pub const DEFAULT_CONFIG_PATH: &str = "Config.json";

/// 完整配置
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    #[serde(alias = "ex1")]
    pub traversal: TraversalConfig,
    #[serde(alias = "ex2")]
    pub dijkstra: ShortestPathConfig,
    #[serde(alias = "ex3")]
    pub bellman_ford: ShortestPathConfig,
    #[serde(alias = "ex4")]
    pub max_flow: MaxFlowConfig,
    #[serde(alias = "ex5")]
    pub sorting: SortingConfig,
    #[serde(alias = "ex6")]
    pub trees: TreesConfig,
    #[serde(alias = "ex7")]
    pub complexity: ComplexityConfig,
}

impl Config {
    /// 从 JSON 文件加载
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::ConfigError(format!(
                "配置文件不存在: {}",
                path.display()
            )));
        }
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// 从 JSON 字符串解析
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// 遍历（菜单 1）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraversalConfig {
    pub graph: Graph<String>,
    pub start: String,
}

impl Default for TraversalConfig {
    fn default() -> Self {
        Self {
            graph: Graph::default(),
            start: default_start(),
        }
    }
}

/// 最短路径（菜单 2 和 3）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShortestPathConfig {
    pub weighted_graph: WeightedGraph<String>,
    pub start: String,
}

impl Default for ShortestPathConfig {
    fn default() -> Self {
        Self {
            weighted_graph: WeightedGraph::default(),
            start: default_start(),
        }
    }
}

/// 最大流（菜单 4）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaxFlowConfig {
    pub capacity_graph: CapacityGraph<String>,
    pub source: String,
    pub sink: String,
}

impl Default for MaxFlowConfig {
    fn default() -> Self {
        Self {
            capacity_graph: CapacityGraph::default(),
            source: default_start(),
            sink: default_sink(),
        }
    }
}

/// 排序（菜单 5）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SortingConfig {
    pub test_arrays: Vec<Vec<i64>>,
}

/// 搜索树（菜单 6）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreesConfig {
    pub insert_sequence: Vec<i64>,
    pub delete_sequence: Vec<i64>,
}

/// SAT 与 TSP（菜单 7）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComplexityConfig {
    pub sat: SatConfig,
    pub tsp: TspConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SatConfig {
    pub clauses: Vec<Vec<String>>,
    pub assignment: IndexMap<String, bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TspConfig {
    pub distances: Vec<Vec<f64>>,
    /// 城市数不超过该值时才运行穷举
    #[serde(default = "default_brute_force_limit")]
    pub brute_force_limit: usize,
}

impl Default for TspConfig {
    fn default() -> Self {
        Self {
            distances: Vec::new(),
            brute_force_limit: default_brute_force_limit(),
        }
    }
}

fn default_start() -> String {
    "A".to_string()
}

fn default_sink() -> String {
    "F".to_string()
}

fn default_brute_force_limit() -> usize {
    8
}
