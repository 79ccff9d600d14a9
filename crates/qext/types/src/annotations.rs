//! The aggregate annotation value produced by the clause parser.
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{EffectDecl, ModalDecl, SessionProtocol, TheoremRef, UsageLimit, UsageSpec};

/// Annotations parsed from one query's clause suffix.
///
/// Each field is `None` when its clause was not written; an absent field never
/// takes part in any cross-extension rule. Built once per query and read-only
/// afterwards.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExtensionAnnotations {
    pub consume_after: Option<UsageSpec>,
    pub session: Option<SessionProtocol>,
    pub effects: Option<EffectDecl>,
    pub modal: Option<ModalDecl>,
    pub proof: Option<TheoremRef>,
    pub usage_limit: Option<UsageLimit>,
}

impl ExtensionAnnotations {
    /// No clause written.
    pub const EMPTY: ExtensionAnnotations = ExtensionAnnotations {
        consume_after: None,
        session: None,
        effects: None,
        modal: None,
        proof: None,
        usage_limit: None,
    };

    pub fn is_empty(&self) -> bool {
        self.clause_count() == 0
    }

    /// Number of clauses present.
    pub fn clause_count(&self) -> usize {
        [
            self.consume_after.is_some(),
            self.session.is_some(),
            self.effects.is_some(),
            self.modal.is_some(),
            self.proof.is_some(),
            self.usage_limit.is_some(),
        ]
        .iter()
        .filter(|present| **present)
        .count()
    }

    pub fn with_consume_after(mut self, count: u64) -> Self {
        self.consume_after = Some(UsageSpec::new(count));
        self
    }

    pub fn with_session(mut self, protocol: SessionProtocol) -> Self {
        self.session = Some(protocol);
        self
    }

    pub fn with_effects(mut self, effects: EffectDecl) -> Self {
        self.effects = Some(effects);
        self
    }

    pub fn with_modal(mut self, modal: ModalDecl) -> Self {
        self.modal = Some(modal);
        self
    }

    pub fn with_proof(mut self, theorem: TheoremRef) -> Self {
        self.proof = Some(theorem);
        self
    }

    pub fn with_usage_limit(mut self, limit: u64) -> Self {
        self.usage_limit = Some(UsageLimit::new(limit));
        self
    }

    /// Canonical clause text for every present clause, in grammar order.
    pub fn clauses(&self) -> Vec<String> {
        let mut out = Vec::with_capacity(6);
        if let Some(spec) = &self.consume_after {
            out.push(spec.to_string());
        }
        if let Some(protocol) = &self.session {
            out.push(format!("WITH SESSION {}", protocol));
        }
        if let Some(effects) = &self.effects {
            out.push(effects.to_string());
        }
        if let Some(modal) = &self.modal {
            out.push(modal.to_string());
        }
        if let Some(proof) = &self.proof {
            out.push(proof.to_string());
        }
        if let Some(limit) = &self.usage_limit {
            out.push(limit.to_string());
        }
        out
    }
}

impl fmt::Display for ExtensionAnnotations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.clauses().join(" "))
    }
}
