//! qext Types - Annotation model for query clause extensions
//!
//! A query may carry up to six optional clauses after its base grammar, one per
//! extension. Each clause parses into one of the value types below, and the
//! aggregate [`ExtensionAnnotations`] holds whichever clauses were written.
//!
//! Every value renders back to canonical clause text through `Display`, which is
//! what diagnostics show to the end user.

#![deny(unsafe_code)]
#![cfg_attr(feature = "strict-docs", warn(missing_docs))]
#![cfg_attr(not(feature = "strict-docs"), allow(missing_docs))]
#![warn(rust_2018_idioms)]

mod annotations;
mod effects;
mod ident;
mod modal;
mod proof;
mod session;
mod usage;

pub use annotations::*;
pub use effects::*;
pub use ident::*;
pub use modal::*;
pub use proof::*;
pub use session::*;
pub use usage::*;
