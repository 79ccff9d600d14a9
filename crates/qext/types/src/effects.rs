//! Effect declaration clause.
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// A single effect label inside `EFFECTS { ... }`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectLabel {
    Read,
    Write,
    Cite,
    Audit,
    Transform,
    Federate,
    Custom(String),
}

impl EffectLabel {
    /// The six built-in labels.
    pub const BUILTIN: [EffectLabel; 6] = [
        EffectLabel::Read,
        EffectLabel::Write,
        EffectLabel::Cite,
        EffectLabel::Audit,
        EffectLabel::Transform,
        EffectLabel::Federate,
    ];

    pub fn from_name(name: &str) -> Self {
        match name {
            "Read" => EffectLabel::Read,
            "Write" => EffectLabel::Write,
            "Cite" => EffectLabel::Cite,
            "Audit" => EffectLabel::Audit,
            "Transform" => EffectLabel::Transform,
            "Federate" => EffectLabel::Federate,
            other => EffectLabel::Custom(other.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            EffectLabel::Read => "Read",
            EffectLabel::Write => "Write",
            EffectLabel::Cite => "Cite",
            EffectLabel::Audit => "Audit",
            EffectLabel::Transform => "Transform",
            EffectLabel::Federate => "Federate",
            EffectLabel::Custom(name) => name,
        }
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, EffectLabel::Custom(_))
    }

    /// Resolve a `Custom` spelling of a built-in name to the built-in.
    pub fn canonical(&self) -> Self {
        Self::from_name(self.name())
    }
}

impl fmt::Display for EffectLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// `EFFECTS { e1, e2, ... }`: the effects a query declares it may perform.
///
/// Labels form a set: duplicates written in the clause collapse. An empty set
/// parses but never validates.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EffectDecl {
    pub effects: BTreeSet<EffectLabel>,
}

impl EffectDecl {
    pub fn new(effects: impl IntoIterator<Item = EffectLabel>) -> Self {
        Self {
            effects: effects.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    /// Membership by name, so `Custom("Read")` and `Read` are the same label.
    pub fn contains(&self, label: &EffectLabel) -> bool {
        self.effects.iter().any(|declared| declared.name() == label.name())
    }

    pub fn iter(&self) -> impl Iterator<Item = &EffectLabel> {
        self.effects.iter()
    }

    /// Does this declaration cover every effect in `actual`?
    pub fn subsumes(&self, actual: &EffectDecl) -> bool {
        actual.iter().all(|label| self.contains(label))
    }
}

impl FromIterator<EffectLabel> for EffectDecl {
    fn from_iter<I: IntoIterator<Item = EffectLabel>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl fmt::Display for EffectDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.effects.is_empty() {
            return write!(f, "EFFECTS {{ }}");
        }
        let names: Vec<&str> = self.effects.iter().map(EffectLabel::name).collect();
        write!(f, "EFFECTS {{ {} }}", names.join(", "))
    }
}
