//! # qext-semantics
//!
//! Runtime entities behind the six clause extensions. The checker only
//! authorizes a query; the execution engine instantiates these values from the
//! validated annotations and threads them through the query plan.
//!
//! Every stateful entity is an owned value. Operations take `self` by value and
//! hand back a new value, so a consumed handle cannot be reused: the borrow
//! checker rejects it. A refused operation returns a [`Rejected`] holding the
//! typed error and the untouched handle. None of them derive `Clone`.
//!
//! ## Components
//!
//! - **Linear**: [`LinConn`], a connection usable exactly `n` times
//! - **Session**: [`SessionImpl`] (runtime-guarded) and [`Session`] (typestate)
//!   state machines, plus [`GuardedSession`] protocol compliance
//! - **Effects**: [`subsumes`] and [`EffectLog`] for declared-vs-actual checks
//! - **Modal**: [`Scope`] / [`ModalBox`] transaction-scoped values
//! - **Quantitative**: [`BoundedResource`] budgets with split/merge
//! - **Proof-Carrying**: [`Theorem`], [`ProvedResult`], [`MultiProved`]
//!
//! ## Laws
//!
//! - Subsumption is reflexive, transitive and monotone in the declared set, and
//!   closed under union of the actual side.
//! - `merge(split(r))` conserves the total remaining budget.
//! - A single-use budget behaves exactly like a single-use linear connection.

#![deny(unsafe_code)]

pub mod effects;
pub mod error;
pub mod linear;
pub mod modal;
pub mod proof;
pub mod quantitative;
pub mod session;

pub use effects::{check_effects, subsumes, union, widen, EffectLog};
pub use error::{
    BudgetError, EffectError, LinearError, ModalError, ProofError, Rejected, SessionError,
};
pub use linear::LinConn;
pub use modal::{can_read, can_write, ModalBox, Scope, WorldEvidence, WorldId};
pub use proof::{
    attach_proof, attach_proofs, integrity_hash, verify_freshness, verify_freshness_at,
    verify_integrity, MultiProved, ProvedResult, Theorem, TheoremKind,
};
pub use quantitative::{BoundedResource, BudgetStatus};
pub use session::{
    protocol_permits, AuthToken, GuardedSession, QueryKind, Session, SessionImpl, SessionOp,
    SessionState, TransactionId,
};
