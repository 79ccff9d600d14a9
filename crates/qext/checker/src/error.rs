use std::fmt;

use qext_parser::ParseError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which extension's invariant a [`Violation`] broke.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViolationKind {
    Linearity,
    Session,
    Effect,
    Modal,
    Proof,
    /// Usage limits, including the cross-extension consistency rule
    Usage,
}

impl ViolationKind {
    pub fn name(&self) -> &'static str {
        match self {
            ViolationKind::Linearity => "LinearityViolation",
            ViolationKind::Session => "SessionViolation",
            ViolationKind::Effect => "EffectViolation",
            ViolationKind::Modal => "ModalViolation",
            ViolationKind::Proof => "ProofViolation",
            ViolationKind::Usage => "UsageViolation",
        }
    }
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A syntactically valid annotation set that is meaningless or inconsistent.
#[derive(Error, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[error("{kind}: {message}")]
pub struct Violation {
    pub kind: ViolationKind,
    pub message: String,
}

impl Violation {
    pub fn new(kind: ViolationKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn linearity(message: impl Into<String>) -> Self {
        Self::new(ViolationKind::Linearity, message)
    }

    pub fn session(message: impl Into<String>) -> Self {
        Self::new(ViolationKind::Session, message)
    }

    pub fn effect(message: impl Into<String>) -> Self {
        Self::new(ViolationKind::Effect, message)
    }

    pub fn modal(message: impl Into<String>) -> Self {
        Self::new(ViolationKind::Modal, message)
    }

    pub fn proof(message: impl Into<String>) -> Self {
        Self::new(ViolationKind::Proof, message)
    }

    pub fn usage(message: impl Into<String>) -> Self {
        Self::new(ViolationKind::Usage, message)
    }
}

/// Failure of [`parse_and_validate`](crate::parse_and_validate).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CheckError {
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Violation(#[from] Violation),
}

impl CheckError {
    pub fn is_parse_error(&self) -> bool {
        matches!(self, CheckError::Parse(_))
    }

    /// The violation kind, if this is a semantic failure.
    pub fn violation_kind(&self) -> Option<ViolationKind> {
        match self {
            CheckError::Violation(v) => Some(v.kind),
            CheckError::Parse(_) => None,
        }
    }
}
