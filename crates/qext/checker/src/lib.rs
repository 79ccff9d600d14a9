//! # qext-checker
//!
//! Validates parsed clause annotations before a query plan may execute.
//!
//! Each extension is checked on its own, then the cross-extension consistency
//! rule runs (a `USAGE LIMIT` must be at least the `CONSUME AFTER` count). The
//! order is fixed and the first violation wins; see [`AnnotationChecker`].
//!
//! Parsing and checking are separate taxonomies: [`ParseError`] for malformed
//! text with a byte position, [`Violation`] for well-formed but meaningless
//! annotations. [`parse_and_validate`] runs both and reports either as a
//! [`CheckError`].

#![deny(unsafe_code)]

mod checker;
mod config;
mod error;
pub mod stages;
mod traits;

pub use checker::{AnnotationChecker, CheckReport, StageOutcome};
pub use config::CheckerConfig;
pub use error::{CheckError, Violation, ViolationKind};
pub use traits::CheckStage;

pub use qext_parser::ParseError;

use qext_types::ExtensionAnnotations;

/// Validate with the default configuration.
pub fn validate(annotations: ExtensionAnnotations) -> Result<ExtensionAnnotations, Violation> {
    AnnotationChecker::new().validate(annotations)
}

/// Parse a clause suffix, then validate it.
pub fn parse_and_validate(text: &str) -> Result<ExtensionAnnotations, CheckError> {
    let annotations = qext_parser::parse_extensions(text)?;
    Ok(validate(annotations)?)
}
