//! 错误类型定义

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("节点不存在: {0}")]
    UnknownNode(String),

    #[error("检测到从 {0} 可达的负权环")]
    NegativeCycle(String),

    #[error("Dijkstra 不支持负权边: {from} -> {to} (权重 {weight})")]
    NegativeWeight {
        from: String,
        to: String,
        weight: f64,
    },

    #[error("容量溢出: {0}")]
    CapacityOverflow(String),

    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("配置错误: {0}")]
    ConfigError(String),

    #[error("IO 错误: {0}")]
    IoError(#[from] std::io::Error),

    #[error("序列化错误: {0}")]
    SerializationError(String),
}

impl Error {
    /// 构造节点不存在错误
    pub(crate) fn unknown_node(node: &impl std::fmt::Display) -> Self {
        Error::UnknownNode(node.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::SerializationError(e.to_string())
    }
}
