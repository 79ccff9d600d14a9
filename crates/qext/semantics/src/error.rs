use qext_types::{EffectLabel, TransactionState};
use thiserror::Error;

use crate::modal::WorldId;
use crate::proof::TheoremKind;
use crate::session::{SessionOp, SessionState};

/// A refused operation. Carries the handle it was called on, unchanged, so
/// the caller can still recover it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{error}")]
pub struct Rejected<E, H> {
    pub error: E,
    pub handle: H,
}

impl<E, H> Rejected<E, H> {
    pub fn new(error: E, handle: H) -> Self {
        Self { error, handle }
    }

    pub fn into_error(self) -> E {
        self.error
    }

    pub fn into_handle(self) -> H {
        self.handle
    }

    pub fn into_parts(self) -> (E, H) {
        (self.error, self.handle)
    }

    /// Re-wrap the handle, keeping the error.
    pub fn map_handle<H2>(self, f: impl FnOnce(H) -> H2) -> Rejected<E, H2> {
        Rejected {
            error: self.error,
            handle: f(self.handle),
        }
    }
}

/// Errors from linear connections.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LinearError {
    #[error("linear connection already fully consumed")]
    AlreadyDepleted,

    #[error("linear connection closed with {0} uses remaining")]
    UsesRemaining(u64),
}

impl<H> From<Rejected<LinearError, H>> for LinearError {
    fn from(rejected: Rejected<LinearError, H>) -> Self {
        rejected.error
    }
}

/// Errors from bounded resources.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BudgetError {
    #[error("resource budget depleted")]
    Depleted,

    #[error("split exceeds budget: requested {requested}, available {available}")]
    InsufficientBudget { requested: u64, available: u64 },

    #[error("merged budget overflows: {left} + {right}")]
    Overflow { left: u64, right: u64 },

    #[error("single-use consumption on a budget of {0}")]
    NotSingleUse(u64),
}

impl<H> From<Rejected<BudgetError, H>> for BudgetError {
    fn from(rejected: Rejected<BudgetError, H>) -> Self {
        rejected.error
    }
}

/// Errors from session state machines.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("illegal session transition: {operation} in state {state}")]
    IllegalTransition {
        state: SessionState,
        operation: SessionOp,
    },

    #[error("{protocol} does not permit {operation}")]
    ProtocolViolation {
        protocol: String,
        operation: SessionOp,
    },
}

impl SessionError {
    pub fn is_protocol_violation(&self) -> bool {
        matches!(self, SessionError::ProtocolViolation { .. })
    }
}

impl<H> From<Rejected<SessionError, H>> for SessionError {
    fn from(rejected: Rejected<SessionError, H>) -> Self {
        rejected.error
    }
}

/// Errors from transaction-scoped values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModalError {
    #[error("value belongs to {expected}, accessed from {found}")]
    WorldMismatch { expected: WorldId, found: WorldId },

    #[error("reads are not permitted in transaction state {0}")]
    ReadNotPermitted(TransactionState),

    #[error("writes are not permitted in transaction state {0}")]
    WriteNotPermitted(TransactionState),
}

impl<H> From<Rejected<ModalError, H>> for ModalError {
    fn from(rejected: Rejected<ModalError, H>) -> Self {
        rejected.error
    }
}

/// Errors from effect verification.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EffectError {
    #[error("undeclared effects performed: {}", join_labels(.0))]
    Undeclared(Vec<EffectLabel>),
}

fn join_labels(labels: &[EffectLabel]) -> String {
    labels
        .iter()
        .map(EffectLabel::name)
        .collect::<Vec<_>>()
        .join(", ")
}

fn with_article(kind: &TheoremKind) -> String {
    let name = kind.to_string();
    match name.chars().next() {
        Some('A' | 'E' | 'I' | 'O' | 'U') => format!("an {}", name),
        _ => format!("a {}", name),
    }
}

/// Errors from proof construction and verification.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProofError {
    #[error("not {} theorem: found {found}", with_article(.expected))]
    WrongTheorem {
        expected: TheoremKind,
        found: TheoremKind,
    },

    #[error("integrity mismatch: expected {expected}, actual {actual}")]
    IntegrityMismatch { expected: String, actual: String },

    #[error("stale data: age {actual_secs}s exceeds {max_age_secs}s")]
    Stale { max_age_secs: u64, actual_secs: u64 },

    #[error("timestamp lies in the future")]
    FutureTimestamp,

    #[error("theorem reference has no name")]
    MissingName,

    #[error("{theorem} requires parameter {param}")]
    MissingParam { theorem: String, param: String },

    #[error("invalid value for parameter {param}: {value}")]
    InvalidParam { param: String, value: String },
}
