//! Transaction-scoped values.
//!
//! A [`ModalBox`] is bound to the world (transaction scope) it was created in.
//! Getting the value out requires that world's [`WorldEvidence`], which only
//! the owning [`Scope`] can lend. Moving a value to another world goes through
//! [`ModalBox::marshal`], never through unwrapping.

use std::fmt;

use qext_types::{ModalDecl, TransactionState};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::{ModalError, Rejected};

/// Opaque identifier of a transaction scope.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorldId(Uuid);

impl WorldId {
    fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for WorldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "world:{}", self.0)
    }
}

/// Proof of being inside a world. Not `Clone`; only a [`Scope`] makes one.
#[derive(Debug)]
pub struct WorldEvidence {
    world: WorldId,
}

impl WorldEvidence {
    pub fn world(&self) -> WorldId {
        self.world
    }
}

/// Reads are allowed in `Active` and `ReadSnapshot`. A custom spelling of a
/// built-in state counts as that state.
pub fn can_read(state: &TransactionState) -> bool {
    matches!(
        state.canonical(),
        TransactionState::Active | TransactionState::ReadSnapshot
    )
}

/// Writes are allowed only in `Active`.
pub fn can_write(state: &TransactionState) -> bool {
    matches!(state.canonical(), TransactionState::Active)
}

/// A transaction scope: a fresh world plus the state it is in.
#[derive(Debug)]
pub struct Scope {
    state: TransactionState,
    evidence: WorldEvidence,
}

impl Scope {
    pub fn open(state: TransactionState) -> Self {
        let state = state.canonical();
        let world = WorldId::generate();
        debug!(world = %world, state = %state, "Scope opened");
        Self {
            state,
            evidence: WorldEvidence { world },
        }
    }

    /// Scope for a validated `IN TRANSACTION` clause.
    pub fn from_decl(decl: &ModalDecl) -> Self {
        Self::open(decl.state.clone())
    }

    pub fn world(&self) -> WorldId {
        self.evidence.world
    }

    pub fn state(&self) -> &TransactionState {
        &self.state
    }

    pub fn evidence(&self) -> &WorldEvidence {
        &self.evidence
    }

    /// Same world, new state (e.g. `Active` to `Committed`).
    pub fn transition(mut self, state: TransactionState) -> Self {
        let state = state.canonical();
        debug!(world = %self.world(), from = %self.state, to = %state, "Scope transition");
        self.state = state;
        self
    }

    /// Bind a value to this scope's world.
    pub fn bind<T>(&self, value: T) -> ModalBox<T> {
        ModalBox {
            world: self.world(),
            value,
        }
    }

    fn check_world<T>(&self, boxed: &ModalBox<T>) -> Result<(), ModalError> {
        if boxed.world == self.world() {
            Ok(())
        } else {
            warn!(expected = %boxed.world, found = %self.world(), "World mismatch");
            Err(ModalError::WorldMismatch {
                expected: boxed.world,
                found: self.world(),
            })
        }
    }

    /// Read a value bound here, if the state allows reads.
    pub fn read<T, R>(&self, boxed: &ModalBox<T>, f: impl FnOnce(&T) -> R) -> Result<R, ModalError> {
        self.check_world(boxed)?;
        if !can_read(&self.state) {
            return Err(ModalError::ReadNotPermitted(self.state.clone()));
        }
        Ok(f(&boxed.value))
    }

    /// Mutate a value bound here, if the state allows writes.
    pub fn write<T, R>(
        &self,
        boxed: &mut ModalBox<T>,
        f: impl FnOnce(&mut T) -> R,
    ) -> Result<R, ModalError> {
        self.check_world(boxed)?;
        if !can_write(&self.state) {
            return Err(ModalError::WriteNotPermitted(self.state.clone()));
        }
        Ok(f(&mut boxed.value))
    }
}

/// A value tagged with the world it belongs to.
#[derive(Debug, PartialEq, Eq)]
pub struct ModalBox<T> {
    world: WorldId,
    value: T,
}

impl<T> ModalBox<T> {
    pub fn world(&self) -> WorldId {
        self.world
    }

    /// Unwrap with matching evidence. Foreign evidence gets the box back.
    pub fn extract(self, evidence: &WorldEvidence) -> Result<T, Rejected<ModalError, Self>> {
        if evidence.world != self.world {
            warn!(expected = %self.world, found = %evidence.world, "Extraction rejected");
            let error = ModalError::WorldMismatch {
                expected: self.world,
                found: evidence.world,
            };
            return Err(Rejected::new(error, self));
        }
        Ok(self.value)
    }

    /// Transform within the same world.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ModalBox<U> {
        ModalBox {
            world: self.world,
            value: f(self.value),
        }
    }

    /// Move the value into world `to`, applying `f` at the boundary.
    pub fn marshal<U>(self, to: WorldId, f: impl FnOnce(T) -> U) -> ModalBox<U> {
        debug!(from = %self.world, to = %to, "Marshalling value across worlds");
        ModalBox {
            world: to,
            value: f(self.value),
        }
    }
}
