//! 执行轨迹报告
//!
//! 算法通过 [`Reporter`] 输出人类可读的轨迹行。报告器由调用方持有，
//! 每次调用显式传入，算法本身不持有任何全局日志状态。

use std::cell::RefCell;

/// 报告级别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Error,
}

/// 一条报告记录
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportEvent {
    pub severity: Severity,
    pub message: String,
}

/// 只写的报告接口
pub trait Reporter {
    fn info(&self, message: &str);
    fn error(&self, message: &str);
}

/// 转发到 `tracing` 的报告器
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn info(&self, message: &str) {
        tracing::info!("{}", message);
    }

    fn error(&self, message: &str) {
        tracing::error!("{}", message);
    }
}

/// 丢弃所有报告
#[derive(Debug, Default, Clone, Copy)]
pub struct NullReporter;

impl Reporter for NullReporter {
    fn info(&self, _message: &str) {}

    fn error(&self, _message: &str) {}
}

/// 在内存中记录报告，便于检查轨迹
#[derive(Debug, Default)]
pub struct RecordingReporter {
    events: RefCell<Vec<ReportEvent>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// 所有记录（按时间顺序）
    pub fn events(&self) -> Vec<ReportEvent> {
        self.events.borrow().clone()
    }

    /// 指定级别的消息
    pub fn messages(&self, severity: Severity) -> Vec<String> {
        self.events
            .borrow()
            .iter()
            .filter(|e| e.severity == severity)
            .map(|e| e.message.clone())
            .collect()
    }

    pub fn infos(&self) -> Vec<String> {
        self.messages(Severity::Info)
    }

    pub fn errors(&self) -> Vec<String> {
        self.messages(Severity::Error)
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }

    fn push(&self, severity: Severity, message: &str) {
        self.events.borrow_mut().push(ReportEvent {
            severity,
            message: message.to_string(),
        });
    }
}

impl Reporter for RecordingReporter {
    fn info(&self, message: &str) {
        self.push(Severity::Info, message);
    }

    fn error(&self, message: &str) {
        self.push(Severity::Error, message);
    }
}
