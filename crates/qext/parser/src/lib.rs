//! qext Parser - Recursive-descent parser for query clause extensions.
//!
//! Recognizes up to six optional clauses in one fixed canonical order:
//!
//! ```text
//! CONSUME AFTER n USE
//! WITH SESSION <protocol>
//! EFFECTS { e1, e2, ... }
//! IN TRANSACTION <state>
//! PROOF ATTACHED <name>[(k="v", ...)]
//! USAGE LIMIT n
//! ```
//!
//! Keywords are case-insensitive, identifiers are case-sensitive, and whitespace
//! between tokens is insignificant. A clause is committed to as soon as its
//! leading keyword matches; a malformed clause after that point is an error
//! carrying the byte offset of the offending token. The parser never reorders
//! clauses.

#![deny(unsafe_code)]

mod clauses;
mod config;
mod cursor;
mod error;

pub use clauses::ClauseParser;
pub use config::ParserConfig;
pub use error::{ParseError, ParseErrorKind};

use qext_types::ExtensionAnnotations;

/// Parse a clause suffix with the default [`ParserConfig`].
///
/// Empty (or all-whitespace) input yields [`ExtensionAnnotations::EMPTY`].
pub fn parse_extensions(text: &str) -> Result<ExtensionAnnotations, ParseError> {
    ClauseParser::new().parse(text)
}
