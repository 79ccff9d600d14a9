//! Proof attachment clause.
use serde::{Deserialize, Serialize};
use std::fmt;

/// `PROOF ATTACHED <name>[(k="v", ...)]`.
///
/// `params` is `None` when no parameter list was written and `Some` (possibly
/// empty) when one was, so `T` and `T()` stay distinguishable.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TheoremRef {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Vec<(String, String)>>,
}

impl TheoremRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: None,
        }
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params
            .get_or_insert_with(Vec::new)
            .push((key.into(), value.into()));
        self
    }

    /// First value bound to `key`, if any.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .as_ref()?
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Quote a parameter value the way the clause grammar reads it back.
pub fn quote_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for ch in value.chars() {
        if ch == '"' || ch == '\\' {
            out.push('\\');
        }
        out.push(ch);
    }
    out.push('"');
    out
}

impl fmt::Display for TheoremRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PROOF ATTACHED {}", self.name)?;
        if let Some(params) = &self.params {
            let rendered: Vec<String> = params
                .iter()
                .map(|(k, v)| format!("{}={}", k, quote_string(v)))
                .collect();
            write!(f, "({})", rendered.join(", "))?;
        }
        Ok(())
    }
}
