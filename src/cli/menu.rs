//! 菜单选项

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// 菜单选项，编号从 1 开始
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuChoice {
    Traversal,
    Dijkstra,
    BellmanFord,
    MaxFlow,
    Sorting,
    Trees,
    Complexity,
    Quit,
}

impl MenuChoice {
    /// 按菜单顺序排列的全部选项
    pub const ALL: [MenuChoice; 8] = [
        MenuChoice::Traversal,
        MenuChoice::Dijkstra,
        MenuChoice::BellmanFord,
        MenuChoice::MaxFlow,
        MenuChoice::Sorting,
        MenuChoice::Trees,
        MenuChoice::Complexity,
        MenuChoice::Quit,
    ];

    pub fn number(self) -> usize {
        Self::ALL
            .iter()
            .position(|&c| c == self)
            .map_or(0, |i| i + 1)
    }

    pub fn label(self) -> &'static str {
        match self {
            MenuChoice::Traversal => "图遍历、环检测与连通分量",
            MenuChoice::Dijkstra => "Dijkstra 最短路径",
            MenuChoice::BellmanFord => "Bellman-Ford 最短路径",
            MenuChoice::MaxFlow => "最大流 (Ford-Fulkerson / Edmonds-Karp)",
            MenuChoice::Sorting => "快速排序对比",
            MenuChoice::Trees => "AVL 与 BST 对比",
            MenuChoice::Complexity => "SAT 校验与旅行商问题",
            MenuChoice::Quit => "退出",
        }
    }

    pub fn is_quit(self) -> bool {
        self == MenuChoice::Quit
    }
}

impl fmt::Display for MenuChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {}", self.number(), self.label())
    }
}

impl FromStr for MenuChoice {
    type Err = Error;

    /// 接受菜单编号，以及 `q`/`quit`/`exit`
    fn from_str(s: &str) -> Result<Self> {
        let input = s.trim();
        match input.to_lowercase().as_str() {
            "q" | "quit" | "exit" => return Ok(MenuChoice::Quit),
            _ => {}
        }

        input
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| Self::ALL.get(i).copied())
            .ok_or_else(|| Error::InvalidInput(format!("无效的选项: {}", input)))
    }
}
