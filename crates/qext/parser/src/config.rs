use serde::{Deserialize, Serialize};

/// Configuration for the clause parser.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Reject inputs longer than this many bytes (default: unlimited)
    #[serde(default)]
    pub max_input_bytes: Option<usize>,
}

impl ParserConfig {
    pub fn with_max_input_bytes(mut self, max: usize) -> Self {
        self.max_input_bytes = Some(max);
        self
    }
}
