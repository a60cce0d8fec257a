//! 合取范式（CNF）赋值校验
//!
//! 子句是文字的析取，公式是子句的合取。文字 `x` 表示变量为真，`-x` 表示变量非真。

use indexmap::IndexMap;

/// 解析后的文字
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Literal<'a> {
    pub variable: &'a str,
    pub negated: bool,
}

impl<'a> Literal<'a> {
    pub fn parse(text: &'a str) -> Self {
        Self {
            variable: text.trim_matches('-'),
            negated: text.starts_with('-'),
        }
    }

    /// 未赋值的变量视为假
    pub fn eval(&self, assignment: &IndexMap<String, bool>) -> bool {
        let value = assignment.get(self.variable).copied().unwrap_or(false);
        value != self.negated
    }
}

/// 每个子句至少有一个为真的文字时返回 true
pub fn is_satisfied<S: AsRef<str>>(clauses: &[Vec<S>], assignment: &IndexMap<String, bool>) -> bool {
    clauses.iter().all(|clause| {
        clause
            .iter()
            .any(|literal| Literal::parse(literal.as_ref()).eval(assignment))
    })
}
