//! Session protocol clause.
use serde::{Deserialize, Serialize};
use std::fmt;

/// Protocol declared by `WITH SESSION <protocol>`.
///
/// The closed set is what the checker accepts; `Custom` keeps unknown names so
/// the parser stays forward compatible and the checker can name them.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionProtocol {
    ReadOnly,
    Mutation,
    Stream,
    Batch,
    Custom(String),
}

impl SessionProtocol {
    /// Surface names of the closed protocol set, in declaration order.
    pub const KNOWN_NAMES: [&'static str; 4] = [
        "ReadOnlyProtocol",
        "MutationProtocol",
        "StreamProtocol",
        "BatchProtocol",
    ];

    /// Resolve a surface name. Unknown names become `Custom`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "ReadOnlyProtocol" => SessionProtocol::ReadOnly,
            "MutationProtocol" => SessionProtocol::Mutation,
            "StreamProtocol" => SessionProtocol::Stream,
            "BatchProtocol" => SessionProtocol::Batch,
            other => SessionProtocol::Custom(other.to_string()),
        }
    }

    /// Surface name as written in a clause.
    pub fn name(&self) -> &str {
        match self {
            SessionProtocol::ReadOnly => "ReadOnlyProtocol",
            SessionProtocol::Mutation => "MutationProtocol",
            SessionProtocol::Stream => "StreamProtocol",
            SessionProtocol::Batch => "BatchProtocol",
            SessionProtocol::Custom(name) => name,
        }
    }

    /// Resolve a `Custom` spelling of a known name to its variant. Runtime
    /// decisions go through this so they agree with [`is_known`](Self::is_known).
    pub fn canonical(&self) -> Self {
        Self::from_name(self.name())
    }

    /// Is this one of the four closed protocols?
    pub fn is_known(&self) -> bool {
        Self::KNOWN_NAMES.contains(&self.name())
    }
}

impl fmt::Display for SessionProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
