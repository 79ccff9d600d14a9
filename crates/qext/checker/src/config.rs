use serde::{Deserialize, Serialize};

/// Operator caps applied on top of the built-in checks.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckerConfig {
    /// Largest accepted `CONSUME AFTER` count (default: unlimited)
    pub max_consume_after: Option<u64>,
    /// Largest accepted `USAGE LIMIT` (default: unlimited)
    pub max_usage_limit: Option<u64>,
}

impl CheckerConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn with_max_consume_after(mut self, max: u64) -> Self {
        self.max_consume_after = Some(max);
        self
    }

    pub fn with_max_usage_limit(mut self, max: u64) -> Self {
        self.max_usage_limit = Some(max);
        self
    }
}
