//! Linear usage and quantitative budget clauses.
use serde::{Deserialize, Serialize};
use std::fmt;

/// `CONSUME AFTER n USE`: the connection is consumed after `count` uses.
///
/// The grammar accepts any unsigned literal; `count >= 1` is enforced by the
/// checker, not here.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UsageSpec {
    pub count: u64,
}

impl UsageSpec {
    pub fn new(count: u64) -> Self {
        Self { count }
    }
}

impl fmt::Display for UsageSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CONSUME AFTER {} USE", self.count)
    }
}

/// `USAGE LIMIT n`: resource budget for the whole query plan.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UsageLimit {
    pub limit: u64,
}

impl UsageLimit {
    pub fn new(limit: u64) -> Self {
        Self { limit }
    }

    /// Does this budget cover `count` uses?
    pub fn dominates(&self, spec: &UsageSpec) -> bool {
        self.limit >= spec.count
    }
}

impl fmt::Display for UsageLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "USAGE LIMIT {}", self.limit)
    }
}
