//! 菜单执行器
//!
//! 把配置段交给对应的算法，并通过报告器输出轨迹。缺少输入时报告 `error`
//! 并正常返回，算法本身的错误向上传递。

use super::menu::MenuChoice;
use crate::algorithm::{self, tsp, AugmentStrategy};
use crate::config::{
    ComplexityConfig, Config, MaxFlowConfig, ShortestPathConfig, SortingConfig, TraversalConfig,
    TreesConfig,
};
use crate::error::{Error, Result};
use crate::graph::{format_path, WeightedGraph};
use crate::report::Reporter;
use crate::sat;
use crate::sort::{quicksort_deterministic, quicksort_random, timed};
use crate::tree::{AvlTree, BstTree};
use std::fmt::Display;

fn format_list<T: Display>(items: &[T]) -> String {
    let parts: Vec<String> = items.iter().map(|i| i.to_string()).collect();
    format!("[{}]", parts.join(", "))
}

/// 菜单执行器
pub struct Runner<'a> {
    config: &'a Config,
    reporter: &'a dyn Reporter,
}

impl<'a> Runner<'a> {
    pub fn new(config: &'a Config, reporter: &'a dyn Reporter) -> Self {
        Self { config, reporter }
    }

    /// 执行一个菜单项；`Quit` 不做任何事
    pub fn run(&self, choice: MenuChoice) -> Result<()> {
        tracing::debug!("执行菜单项 {:?}", choice);
        match choice {
            MenuChoice::Traversal => self.run_traversal(&self.config.traversal),
            MenuChoice::Dijkstra => self.run_dijkstra(&self.config.dijkstra),
            MenuChoice::BellmanFord => self.run_bellman_ford(&self.config.bellman_ford),
            MenuChoice::MaxFlow => self.run_max_flow(&self.config.max_flow),
            MenuChoice::Sorting => {
                self.run_sorting(&self.config.sorting);
                Ok(())
            }
            MenuChoice::Trees => {
                self.run_trees(&self.config.trees);
                Ok(())
            }
            MenuChoice::Complexity => self.run_complexity(&self.config.complexity),
            MenuChoice::Quit => Ok(()),
        }
    }

    pub fn run_traversal(&self, section: &TraversalConfig) -> Result<()> {
        let graph = &section.graph;
        let start = &section.start;
        if graph.is_empty() {
            self.reporter.error("配置中未提供图");
            return Ok(());
        }

        self.reporter.info(&format!("从 {} 开始深度优先遍历:", start));
        algorithm::depth_first(graph, start, self.reporter)?;

        self.reporter.info(&format!("从 {} 开始广度优先遍历:", start));
        algorithm::breadth_first(graph, start, self.reporter);

        self.reporter.info("环检测 (DFS):");
        if algorithm::has_cycle(graph) {
            self.reporter.info("图中存在环");
        } else {
            self.reporter.info("图中不存在环");
        }

        self.reporter.info("连通分量 (BFS):");
        for (i, component) in algorithm::connected_components(graph).iter().enumerate() {
            self.reporter
                .info(&format!("  连通分量 {}: {}", i + 1, format_list(component)));
        }

        Ok(())
    }

    pub fn run_dijkstra(&self, section: &ShortestPathConfig) -> Result<()> {
        let graph = &section.weighted_graph;
        if graph.is_empty() {
            self.reporter.error("配置中未提供带权图");
            return Ok(());
        }

        self.reporter.info(&format!("从 {} 运行 Dijkstra:", section.start));
        let paths = algorithm::dijkstra(graph, &section.start, self.reporter)?;
        self.report_paths(graph, &paths);
        Ok(())
    }

    pub fn run_bellman_ford(&self, section: &ShortestPathConfig) -> Result<()> {
        let graph = &section.weighted_graph;
        if graph.is_empty() {
            self.reporter.error("配置中未提供带权图");
            return Ok(());
        }

        self.reporter
            .info(&format!("从 {} 运行 Bellman-Ford:", section.start));
        match algorithm::bellman_ford(graph, &section.start, self.reporter) {
            Ok(paths) => {
                self.report_paths(graph, &paths);
                Ok(())
            }
            Err(Error::NegativeCycle(_)) => {
                self.reporter.error("检测到负权环！");
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    fn report_paths(&self, graph: &WeightedGraph<String>, paths: &algorithm::ShortestPaths<String>) {
        for node in graph.nodes() {
            let path = paths.path_to(node);
            match paths.distance(node) {
                Some(distance) if !path.is_empty() => self.reporter.info(&format!(
                    "到 {} 的路径: {} (距离: {})",
                    node,
                    format_path(&path),
                    distance
                )),
                _ => self.reporter.info(&format!("没有到 {} 的路径", node)),
            }
        }
    }

    pub fn run_max_flow(&self, section: &MaxFlowConfig) -> Result<()> {
        let graph = &section.capacity_graph;
        if graph.is_empty() {
            self.reporter.error("配置中未提供容量图");
            return Ok(());
        }

        for (strategy, search) in [
            (AugmentStrategy::DepthFirst, "DFS"),
            (AugmentStrategy::BreadthFirst, "BFS"),
        ] {
            self.reporter.info(&format!("{} 算法 ({}):", strategy, search));
            let flow = algorithm::max_flow(
                graph,
                &section.source,
                &section.sink,
                strategy,
                self.reporter,
            )?;
            self.reporter
                .info(&format!("最大流 ({}): {}", strategy, flow.value));

            if strategy == AugmentStrategy::BreadthFirst {
                let side: Vec<&String> = flow.source_side.iter().collect();
                self.reporter.info(&format!(
                    "最小割源侧: {}，割容量 = {}",
                    format_list(&side),
                    flow.cut_capacity(graph)
                ));
            }
        }

        Ok(())
    }

    pub fn run_sorting(&self, section: &SortingConfig) {
        if section.test_arrays.is_empty() {
            self.reporter.error("配置中未提供测试数组");
            return;
        }

        let mut rng = rand::thread_rng();
        for (i, array) in section.test_arrays.iter().enumerate() {
            self.reporter
                .info(&format!("测试 {}，数组: {}", i + 1, format_list(array)));

            let (sorted, elapsed) = timed(|| quicksort_deterministic(array));
            self.reporter.info(&format!(
                "确定性快速排序: 结果 = {}，耗时 = {:.6}s",
                format_list(&sorted),
                elapsed.as_secs_f64()
            ));

            let (sorted, elapsed) = timed(|| quicksort_random(array, &mut rng));
            self.reporter.info(&format!(
                "随机快速排序: 结果 = {}，耗时 = {:.6}s",
                format_list(&sorted),
                elapsed.as_secs_f64()
            ));
        }
    }

    pub fn run_trees(&self, section: &TreesConfig) {
        let inserts = &section.insert_sequence;
        let deletes = &section.delete_sequence;
        if inserts.is_empty() {
            self.reporter.error("配置中未提供插入序列");
            return;
        }

        self.reporter
            .info(&format!("AVL 测试，插入序列: {}", format_list(inserts)));
        let mut avl = AvlTree::new();
        let ((), avl_insert) = timed(|| inserts.iter().for_each(|&k| avl.insert(k)));
        self.reporter.info(&format!(
            "AVL - 插入耗时: {:.6} 秒",
            avl_insert.as_secs_f64()
        ));
        self.reporter.info(&format!(
            "AVL - 插入后前序遍历: {}",
            format_list(&avl.pre_order())
        ));
        let ((), avl_delete) = timed(|| {
            deletes.iter().for_each(|k| {
                avl.remove(k);
            })
        });
        self.reporter.info(&format!(
            "AVL - 删除耗时: {:.6} 秒",
            avl_delete.as_secs_f64()
        ));
        self.reporter.info(&format!(
            "AVL - 删除后前序遍历: {}",
            format_list(&avl.pre_order())
        ));

        self.reporter
            .info(&format!("BST 测试，插入序列: {}", format_list(inserts)));
        let mut bst = BstTree::new();
        let ((), bst_insert) = timed(|| inserts.iter().for_each(|&k| bst.insert(k)));
        self.reporter.info(&format!(
            "BST - 插入耗时: {:.6} 秒",
            bst_insert.as_secs_f64()
        ));
        self.reporter.info(&format!(
            "BST - 插入后前序遍历: {}",
            format_list(&bst.pre_order())
        ));
        let ((), bst_delete) = timed(|| {
            deletes.iter().for_each(|k| {
                bst.remove(k);
            })
        });
        self.reporter.info(&format!(
            "BST - 删除耗时: {:.6} 秒",
            bst_delete.as_secs_f64()
        ));
        self.reporter.info(&format!(
            "BST - 删除后前序遍历: {}",
            format_list(&bst.pre_order())
        ));

        self.reporter.info("性能对比（秒）:");
        self.reporter.info(&format!(
            "插入 AVL: {:.6} | BST: {:.6}",
            avl_insert.as_secs_f64(),
            bst_insert.as_secs_f64()
        ));
        self.reporter.info(&format!(
            "删除 AVL: {:.6} | BST: {:.6}",
            avl_delete.as_secs_f64(),
            bst_delete.as_secs_f64()
        ));
        self.reporter.info(&format!(
            "树高 AVL: {} | BST: {}",
            avl.height(),
            bst.height()
        ));
    }

    pub fn run_complexity(&self, section: &ComplexityConfig) -> Result<()> {
        self.reporter.info("SAT 校验:");
        let sat_data = &section.sat;
        if !sat_data.clauses.is_empty() && !sat_data.assignment.is_empty() {
            let (satisfied, elapsed) =
                timed(|| sat::is_satisfied(&sat_data.clauses, &sat_data.assignment));
            let verdict = if satisfied { "满足" } else { "不满足" };
            self.reporter.info(&format!("结果: {}", verdict));
            self.reporter
                .info(&format!("SAT 耗时: {:.6} s", elapsed.as_secs_f64()));
        } else {
            self.reporter.error("未提供 SAT 数据");
        }

        self.reporter.info("TSP 最近邻启发式:");
        let tsp_data = &section.tsp;
        let matrix = &tsp_data.distances;
        if matrix.is_empty() {
            self.reporter.error("未提供 TSP 数据");
            return Ok(());
        }

        let (approx, elapsed) = timed(|| tsp::nearest_neighbor(matrix, 0));
        let approx = approx?;
        self.reporter
            .info(&format!("启发式路径: {}", format_list(&approx.cities)));
        self.reporter
            .info(&format!("启发式距离: {}", approx.length));
        self.reporter
            .info(&format!("启发式耗时: {:.6} s", elapsed.as_secs_f64()));

        if matrix.len() > tsp_data.brute_force_limit {
            self.reporter.error(&format!(
                "图过大，不运行穷举 (>{} 个城市)",
                tsp_data.brute_force_limit
            ));
            return Ok(());
        }

        let (exact, elapsed) = timed(|| tsp::brute_force(matrix));
        let exact = exact?;
        self.reporter
            .info(&format!("最优路径 (穷举): {}", format_list(&exact.cities)));
        self.reporter
            .info(&format!("穷举距离: {}", exact.length));
        self.reporter
            .info(&format!("穷举耗时: {:.6} s", elapsed.as_secs_f64()));

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::RecordingReporter;

    fn config(json: &str) -> Config {
        Config::from_json(json).unwrap()
    }

    #[test]
    fn test_traversal_trace() {
        let config = config(
            r#"{"traversal": {"graph": {"A": ["B", "C"], "B": ["A"], "C": ["A"], "D": []}}}"#,
        );
        let reporter = RecordingReporter::new();
        Runner::new(&config, &reporter)
            .run(MenuChoice::Traversal)
            .unwrap();

        assert_eq!(
            reporter.infos(),
            vec![
                "从 A 开始深度优先遍历:",
                "DFS 访问: A",
                "DFS 访问: B",
                "DFS 访问: C",
                "从 A 开始广度优先遍历:",
                "BFS 访问: A",
                "BFS 访问: B",
                "BFS 访问: C",
                "环检测 (DFS):",
                "图中存在环",
                "连通分量 (BFS):",
                "  连通分量 1: [A, B, C]",
                "  连通分量 2: [D]",
            ]
        );
        assert!(reporter.errors().is_empty());
    }

    #[test]
    fn test_missing_sections_report_errors() {
        let config = Config::default();
        let reporter = RecordingReporter::new();
        let runner = Runner::new(&config, &reporter);

        for choice in MenuChoice::ALL {
            runner.run(choice).unwrap();
        }

        assert_eq!(
            reporter.errors(),
            vec![
                "配置中未提供图",
                "配置中未提供带权图",
                "配置中未提供带权图",
                "配置中未提供容量图",
                "配置中未提供测试数组",
                "配置中未提供插入序列",
                "未提供 SAT 数据",
                "未提供 TSP 数据",
            ]
        );
    }

    #[test]
    fn test_shortest_path_lines() {
        let config = config(
            r#"{"dijkstra": {"weighted_graph": {"A": [["B", 1], ["C", 4]], "B": [["C", 2]], "C": [], "Z": []}}}"#,
        );
        let reporter = RecordingReporter::new();
        Runner::new(&config, &reporter)
            .run(MenuChoice::Dijkstra)
            .unwrap();

        let infos = reporter.infos();
        assert!(infos.contains(&"到 A 的路径: A (距离: 0)".to_string()));
        assert!(infos.contains(&"到 C 的路径: A -> B -> C (距离: 3)".to_string()));
        assert!(infos.contains(&"没有到 Z 的路径".to_string()));
    }

    #[test]
    fn test_negative_cycle_reported() {
        let config = config(
            r#"{"bellman_ford": {"weighted_graph": {"A": [["B", 1]], "B": [["C", -2]], "C": [["B", 1]]}}}"#,
        );
        let reporter = RecordingReporter::new();
        Runner::new(&config, &reporter)
            .run(MenuChoice::BellmanFord)
            .unwrap();

        assert_eq!(reporter.errors(), vec!["检测到负权环！"]);
    }

    #[test]
    fn test_unknown_start_propagates() {
        let config = config(r#"{"dijkstra": {"weighted_graph": {"B": []}}}"#);
        let reporter = RecordingReporter::new();
        let result = Runner::new(&config, &reporter).run(MenuChoice::Dijkstra);
        assert!(matches!(result, Err(Error::UnknownNode(_))));
    }

    #[test]
    fn test_max_flow_totals() {
        let config = config(
            r#"{"max_flow": {"capacity_graph": {
                "A": {"B": 10, "C": 10},
                "B": {"C": 2, "D": 4, "E": 8},
                "C": {"E": 9},
                "D": {"F": 10},
                "E": {"D": 6, "F": 10},
                "F": {}
            }}}"#,
        );
        let reporter = RecordingReporter::new();
        Runner::new(&config, &reporter)
            .run(MenuChoice::MaxFlow)
            .unwrap();

        let infos = reporter.infos();
        assert!(infos.contains(&"最大流 (Ford-Fulkerson): 19".to_string()));
        assert!(infos.contains(&"最大流 (Edmonds-Karp): 19".to_string()));
        assert!(infos.iter().any(|l| l.ends_with("割容量 = 19")));
    }

    #[test]
    fn test_sorting_and_trees() {
        let config = config(
            r#"{
                "sorting": {"test_arrays": [[3, 1, 2]]},
                "trees": {"insert_sequence": [10, 20, 30], "delete_sequence": [20]}
            }"#,
        );
        let reporter = RecordingReporter::new();
        let runner = Runner::new(&config, &reporter);
        runner.run(MenuChoice::Sorting).unwrap();
        runner.run(MenuChoice::Trees).unwrap();

        let infos = reporter.infos();
        let sorted_lines = infos
            .iter()
            .filter(|l| l.contains("结果 = [1, 2, 3]"))
            .count();
        assert_eq!(sorted_lines, 2);
        assert!(infos.contains(&"AVL - 插入后前序遍历: [20, 10, 30]".to_string()));
        assert!(infos.contains(&"BST - 插入后前序遍历: [10, 20, 30]".to_string()));
        assert!(infos.contains(&"AVL - 删除后前序遍历: [30, 10]".to_string()));
        assert!(infos.contains(&"BST - 删除后前序遍历: [10, 30]".to_string()));
        assert!(infos.contains(&"树高 AVL: 2 | BST: 2".to_string()));
    }

    #[test]
    fn test_bundled_config_runs_clean() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/Config.json");
        let config = Config::load(path).unwrap();
        let reporter = RecordingReporter::new();
        let runner = Runner::new(&config, &reporter);

        for choice in MenuChoice::ALL {
            runner.run(choice).unwrap();
        }
        assert!(reporter.errors().is_empty(), "{:?}", reporter.errors());
    }

    #[test]
    fn test_complexity() {
        let config = config(
            r#"{"complexity": {
                "sat": {"clauses": [["x", "-y"], ["y"]], "assignment": {"x": true, "y": true}},
                "tsp": {"distances": [[0, 2, 9, 10], [1, 0, 6, 4], [15, 7, 0, 8], [6, 3, 12, 0]],
                        "brute_force_limit": 3}
            }}"#,
        );
        let reporter = RecordingReporter::new();
        Runner::new(&config, &reporter)
            .run(MenuChoice::Complexity)
            .unwrap();

        let infos = reporter.infos();
        assert!(infos.contains(&"结果: 满足".to_string()));
        assert!(infos.contains(&"启发式路径: [0, 1, 3, 2, 0]".to_string()));
        assert!(infos.contains(&"启发式距离: 33".to_string()));
        assert_eq!(reporter.errors(), vec!["图过大，不运行穷举 (>3 个城市)"]);
    }
}
