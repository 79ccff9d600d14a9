//! Proof-carrying results.
//!
//! A [`Theorem`] is a claim about a query result. Results are wrapped with
//! theorems only by explicit attachment ([`attach_proof`], [`attach_proofs`],
//! [`MultiProved::attach`]); nothing is inferred. The wrapped value is never
//! handed out mutably.

use std::fmt;

use chrono::{DateTime, Utc};
use qext_types::TheoremRef;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::ProofError;

pub const INTEGRITY_THEOREM: &str = "IntegrityTheorem";
pub const FRESHNESS_THEOREM: &str = "FreshnessTheorem";
pub const PROVENANCE_THEOREM: &str = "ProvenanceTheorem";
pub const CONSISTENCY_THEOREM: &str = "ConsistencyTheorem";

/// A claim that can be attached to a result and later verified.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Theorem {
    /// Content hash of the result (lower-case hex).
    Integrity { hash: String },
    /// The result is at most this many seconds old.
    Freshness { max_age_secs: u64 },
    /// Ordered chain of sources the result was derived from.
    Provenance { chain: Vec<String> },
    /// Modalities under which the result is consistent.
    Consistency { modalities: Vec<String> },
    Custom {
        name: String,
        params: Vec<(String, String)>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TheoremKind {
    Integrity,
    Freshness,
    Provenance,
    Consistency,
    Custom,
}

impl fmt::Display for TheoremKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TheoremKind::Integrity => "Integrity",
            TheoremKind::Freshness => "Freshness",
            TheoremKind::Provenance => "Provenance",
            TheoremKind::Consistency => "Consistency",
            TheoremKind::Custom => "Custom",
        };
        write!(f, "{}", name)
    }
}

/// Lower-case hex BLAKE3 digest of `bytes`.
pub fn integrity_hash(bytes: &[u8]) -> String {
    blake3::hash(bytes).to_hex().to_string()
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

impl Theorem {
    pub fn kind(&self) -> TheoremKind {
        match self {
            Theorem::Integrity { .. } => TheoremKind::Integrity,
            Theorem::Freshness { .. } => TheoremKind::Freshness,
            Theorem::Provenance { .. } => TheoremKind::Provenance,
            Theorem::Consistency { .. } => TheoremKind::Consistency,
            Theorem::Custom { .. } => TheoremKind::Custom,
        }
    }

    /// Integrity theorem for the given content.
    pub fn integrity_of(bytes: &[u8]) -> Self {
        Theorem::Integrity {
            hash: integrity_hash(bytes),
        }
    }

    /// Resolve a parsed `PROOF ATTACHED` reference.
    ///
    /// The four built-in theorem names need their parameter (`hash`, `max_age`,
    /// `chain`, `modalities`); list parameters are comma separated. Any other
    /// name becomes [`Theorem::Custom`] with its parameters kept in order.
    ///
    /// A bare `PROOF ATTACHED IntegrityTheorem` carries no hash and fails
    /// here with [`ProofError::MissingParam`]. Use
    /// [`from_ref_for_content`](Self::from_ref_for_content) when the result
    /// bytes are at hand.
    pub fn from_ref(theorem: &TheoremRef) -> Result<Self, ProofError> {
        if theorem.name.is_empty() {
            return Err(ProofError::MissingName);
        }
        let required = |param: &str| {
            theorem.param(param).ok_or_else(|| ProofError::MissingParam {
                theorem: theorem.name.clone(),
                param: param.to_string(),
            })
        };
        let resolved = match theorem.name.as_str() {
            INTEGRITY_THEOREM => Theorem::Integrity {
                hash: required("hash")?.to_ascii_lowercase(),
            },
            FRESHNESS_THEOREM => {
                let raw = required("max_age")?;
                let max_age_secs = raw.trim().parse().map_err(|_| ProofError::InvalidParam {
                    param: "max_age".into(),
                    value: raw.to_string(),
                })?;
                Theorem::Freshness { max_age_secs }
            }
            PROVENANCE_THEOREM => Theorem::Provenance {
                chain: split_list(required("chain")?),
            },
            CONSISTENCY_THEOREM => Theorem::Consistency {
                modalities: split_list(required("modalities")?),
            },
            other => Theorem::Custom {
                name: other.to_string(),
                params: theorem.params.clone().unwrap_or_default(),
            },
        };
        debug!(theorem = %theorem.name, kind = %resolved.kind(), "Theorem resolved");
        Ok(resolved)
    }

    /// Like [`from_ref`](Self::from_ref), but an `IntegrityTheorem` without a
    /// `hash` parameter is resolved against `content`.
    pub fn from_ref_for_content(
        theorem: &TheoremRef,
        content: &[u8],
    ) -> Result<Self, ProofError> {
        if theorem.name == INTEGRITY_THEOREM && theorem.param("hash").is_none() {
            debug!("Integrity hash taken from result content");
            return Ok(Theorem::integrity_of(content));
        }
        Theorem::from_ref(theorem)
    }
}

fn wrong_theorem(expected: TheoremKind, theorem: &Theorem) -> ProofError {
    warn!(expected = %expected, found = %theorem.kind(), "Verifier applied to wrong theorem");
    ProofError::WrongTheorem {
        expected,
        found: theorem.kind(),
    }
}

/// Confirm `actual_hash` against an integrity theorem. Hex case is ignored.
pub fn verify_integrity(actual_hash: &str, theorem: &Theorem) -> Result<(), ProofError> {
    let Theorem::Integrity { hash } = theorem else {
        return Err(wrong_theorem(TheoremKind::Integrity, theorem));
    };
    if hash.eq_ignore_ascii_case(actual_hash) {
        Ok(())
    } else {
        warn!(expected = %hash, actual = %actual_hash, "Integrity mismatch");
        Err(ProofError::IntegrityMismatch {
            expected: hash.clone(),
            actual: actual_hash.to_string(),
        })
    }
}

/// Confirm a result of age `actual_age_secs` against a freshness theorem.
pub fn verify_freshness(actual_age_secs: u64, theorem: &Theorem) -> Result<(), ProofError> {
    let Theorem::Freshness { max_age_secs } = theorem else {
        return Err(wrong_theorem(TheoremKind::Freshness, theorem));
    };
    if actual_age_secs <= *max_age_secs {
        Ok(())
    } else {
        warn!(max_age_secs, actual_age_secs, "Stale result");
        Err(ProofError::Stale {
            max_age_secs: *max_age_secs,
            actual_secs: actual_age_secs,
        })
    }
}

/// [`verify_freshness`] with the age computed from timestamps.
pub fn verify_freshness_at(
    produced_at: DateTime<Utc>,
    now: DateTime<Utc>,
    theorem: &Theorem,
) -> Result<(), ProofError> {
    let age = now.signed_duration_since(produced_at).num_seconds();
    let age = u64::try_from(age).map_err(|_| ProofError::FutureTimestamp)?;
    verify_freshness(age, theorem)
}

/// A result with one attached theorem.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvedResult<T> {
    value: T,
    theorem: Theorem,
}

impl<T> ProvedResult<T> {
    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn theorem(&self) -> &Theorem {
        &self.theorem
    }

    /// Attach a further theorem.
    pub fn attach(self, theorem: Theorem) -> MultiProved<T> {
        MultiProved {
            value: self.value,
            theorems: vec![self.theorem, theorem],
        }
    }

    pub fn into_parts(self) -> (T, Theorem) {
        (self.value, self.theorem)
    }
}

/// A result with any number of attached theorems, in attachment order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultiProved<T> {
    value: T,
    theorems: Vec<Theorem>,
}

impl<T> MultiProved<T> {
    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn theorems(&self) -> &[Theorem] {
        &self.theorems
    }

    pub fn attach(mut self, theorem: Theorem) -> Self {
        self.theorems.push(theorem);
        self
    }

    /// First attached theorem of the given kind.
    pub fn find(&self, kind: TheoremKind) -> Option<&Theorem> {
        self.theorems.iter().find(|t| t.kind() == kind)
    }

    pub fn into_parts(self) -> (T, Vec<Theorem>) {
        (self.value, self.theorems)
    }
}

impl<T> From<ProvedResult<T>> for MultiProved<T> {
    fn from(proved: ProvedResult<T>) -> Self {
        MultiProved {
            value: proved.value,
            theorems: vec![proved.theorem],
        }
    }
}

pub fn attach_proof<T>(value: T, theorem: Theorem) -> ProvedResult<T> {
    ProvedResult { value, theorem }
}

pub fn attach_proofs<T>(value: T, theorems: impl IntoIterator<Item = Theorem>) -> MultiProved<T> {
    MultiProved {
        value,
        theorems: theorems.into_iter().collect(),
    }
}
