//! Declared-vs-actual effect subsumption.
//!
//! `subsumes(declared, actual)` holds iff every label in `actual` appears in
//! `declared`. Both sides are read as sets, so order and duplicates are
//! irrelevant. Labels compare by name: `Custom("Read")` is `Read`.

use std::collections::BTreeSet;

use qext_types::{EffectDecl, EffectLabel};
use tracing::warn;

use crate::error::EffectError;

/// Is every effect in `actual` declared?
pub fn subsumes<'a, D, A>(declared: D, actual: A) -> bool
where
    D: IntoIterator<Item = &'a EffectLabel>,
    A: IntoIterator<Item = &'a EffectLabel>,
{
    let declared: BTreeSet<EffectLabel> = declared
        .into_iter()
        .map(EffectLabel::canonical)
        .collect();
    actual
        .into_iter()
        .all(|label| declared.contains(&label.canonical()))
}

/// Like [`subsumes`], but names the undeclared effects.
pub fn check_effects<'a, A>(declared: &EffectDecl, actual: A) -> Result<(), EffectError>
where
    A: IntoIterator<Item = &'a EffectLabel>,
{
    let undeclared: BTreeSet<EffectLabel> = actual
        .into_iter()
        .filter(|label| !declared.contains(label))
        .cloned()
        .collect();
    if undeclared.is_empty() {
        Ok(())
    } else {
        warn!(count = undeclared.len(), "Undeclared effects performed");
        Err(EffectError::Undeclared(undeclared.into_iter().collect()))
    }
}

/// `label :: declared`
pub fn widen(declared: &EffectDecl, label: EffectLabel) -> EffectDecl {
    let mut widened = declared.clone();
    widened.effects.insert(label);
    widened
}

pub fn union(left: &EffectDecl, right: &EffectDecl) -> EffectDecl {
    left.iter().chain(right.iter()).cloned().collect()
}

/// Effects actually performed while executing a plan.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EffectLog {
    performed: BTreeSet<EffectLabel>,
}

impl EffectLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, label: EffectLabel) {
        self.performed.insert(label);
    }

    pub fn performed(&self) -> impl Iterator<Item = &EffectLabel> {
        self.performed.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.performed.is_empty()
    }

    /// Was everything performed covered by `declared`?
    pub fn verify(&self, declared: &EffectDecl) -> Result<(), EffectError> {
        check_effects(declared, &self.performed)
    }
}
