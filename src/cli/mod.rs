//! 命令菜单
//!
//! 菜单选项解析与按配置执行

pub mod menu;
pub mod runner;

pub use menu::MenuChoice;
pub use runner::Runner;
