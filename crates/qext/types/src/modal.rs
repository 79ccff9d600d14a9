//! Transactional scope clause.
use serde::{Deserialize, Serialize};
use std::fmt;

/// Transaction state named by `IN TRANSACTION <state>`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionState {
    Fresh,
    Active,
    Committed,
    RolledBack,
    ReadSnapshot,
    Custom(String),
}

impl TransactionState {
    pub const KNOWN_NAMES: [&'static str; 5] =
        ["Fresh", "Active", "Committed", "RolledBack", "ReadSnapshot"];

    pub fn from_name(name: &str) -> Self {
        match name {
            "Fresh" => TransactionState::Fresh,
            "Active" => TransactionState::Active,
            "Committed" => TransactionState::Committed,
            "RolledBack" => TransactionState::RolledBack,
            "ReadSnapshot" => TransactionState::ReadSnapshot,
            other => TransactionState::Custom(other.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            TransactionState::Fresh => "Fresh",
            TransactionState::Active => "Active",
            TransactionState::Committed => "Committed",
            TransactionState::RolledBack => "RolledBack",
            TransactionState::ReadSnapshot => "ReadSnapshot",
            TransactionState::Custom(name) => name,
        }
    }

    /// Resolve a `Custom` spelling of a known name to its variant.
    pub fn canonical(&self) -> Self {
        Self::from_name(self.name())
    }

    pub fn is_known(&self) -> bool {
        Self::KNOWN_NAMES.contains(&self.name())
    }
}

impl fmt::Display for TransactionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// `IN TRANSACTION <state>`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModalDecl {
    pub state: TransactionState,
}

impl ModalDecl {
    pub fn new(state: TransactionState) -> Self {
        Self { state }
    }
}

impl fmt::Display for ModalDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IN TRANSACTION {}", self.state)
    }
}
