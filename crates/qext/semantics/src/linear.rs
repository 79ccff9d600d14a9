//! Linear connections: usable exactly `n` times, then closed.
use qext_types::UsageSpec;

use crate::error::{LinearError, Rejected};
use crate::quantitative::BoundedResource;

/// A connection that must be used exactly `remaining` times before it may be
/// closed. `remaining = 1` is the pure linear case.
///
/// This is a [`BoundedResource`] whose terminal step is an explicit close.
#[derive(Debug, PartialEq, Eq)]
pub struct LinConn<T> {
    resource: BoundedResource<T>,
}

impl<T> LinConn<T> {
    pub fn new(uses: u64, conn: T) -> Self {
        Self {
            resource: BoundedResource::new(uses, conn),
        }
    }

    pub fn single(conn: T) -> Self {
        Self::new(1, conn)
    }

    /// Connection for a validated `CONSUME AFTER n USE` clause.
    pub fn from_usage(spec: &UsageSpec, conn: T) -> Self {
        Self::new(spec.count, conn)
    }

    pub fn remaining(&self) -> u64 {
        self.resource.remaining()
    }

    pub fn has_uses(&self) -> bool {
        !self.resource.is_depleted()
    }

    pub fn is_fully_consumed(&self) -> bool {
        self.resource.is_depleted()
    }

    /// Use the connection once. Requires `remaining >= 1`.
    pub fn use_conn<R>(
        self,
        f: impl FnOnce(&mut T) -> R,
    ) -> Result<(R, Self), Rejected<LinearError, Self>> {
        match self.resource.consume(f) {
            Ok((value, resource)) => Ok((value, Self { resource })),
            Err(rejected) => Err(Rejected::new(
                LinearError::AlreadyDepleted,
                Self::from(rejected.into_handle()),
            )),
        }
    }

    /// Close the connection. Only legal once every use has been spent; an
    /// early close hands the connection back.
    pub fn close_conn(self) -> Result<T, Rejected<LinearError, Self>> {
        match self.resource.remaining() {
            0 => Ok(self.resource.into_payload()),
            n => Err(Rejected::new(LinearError::UsesRemaining(n), self)),
        }
    }

    pub fn into_resource(self) -> BoundedResource<T> {
        self.resource
    }
}

impl<T> From<BoundedResource<T>> for LinConn<T> {
    fn from(resource: BoundedResource<T>) -> Self {
        Self { resource }
    }
}
