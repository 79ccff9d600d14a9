use qext_types::UsageLimit;
use tracing::{debug, warn};

use crate::error::{BudgetError, Rejected};

/// Where a budget stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BudgetStatus {
    /// Uses remain
    Available(u64),
    /// Terminal: no further `consume` is permitted
    Depleted,
}

/// A budget counter paired with an opaque payload.
///
/// Owned by whichever plan node currently holds it. `consume`, `split` and
/// `merge` take the resource by value, so a budget is never duplicated: the
/// type does not implement `Clone`.
#[derive(Debug, PartialEq, Eq)]
pub struct BoundedResource<T> {
    remaining: u64,
    payload: T,
}

impl<T> BoundedResource<T> {
    pub fn new(budget: u64, payload: T) -> Self {
        Self {
            remaining: budget,
            payload,
        }
    }

    /// Budget taken from a validated `USAGE LIMIT` clause.
    pub fn from_limit(limit: &UsageLimit, payload: T) -> Self {
        Self::new(limit.limit, payload)
    }

    /// The `limit = 1` specialization.
    pub fn single_use(payload: T) -> Self {
        Self::new(1, payload)
    }

    pub fn remaining(&self) -> u64 {
        self.remaining
    }

    pub fn status(&self) -> BudgetStatus {
        match self.remaining {
            0 => BudgetStatus::Depleted,
            n => BudgetStatus::Available(n),
        }
    }

    pub fn is_depleted(&self) -> bool {
        self.remaining == 0
    }

    pub fn payload(&self) -> &T {
        &self.payload
    }

    pub fn into_payload(self) -> T {
        self.payload
    }

    /// Spend one use. Requires `remaining >= 1`.
    pub fn consume<R>(
        mut self,
        f: impl FnOnce(&mut T) -> R,
    ) -> Result<(R, Self), Rejected<BudgetError, Self>> {
        if self.remaining == 0 {
            warn!("Consume rejected: resource depleted");
            return Err(Rejected::new(BudgetError::Depleted, self));
        }
        let value = f(&mut self.payload);
        self.remaining -= 1;
        Ok((value, self))
    }

    /// Spend the only use of a single-use resource.
    pub fn consume_once<R>(
        self,
        f: impl FnOnce(&mut T) -> R,
    ) -> Result<R, Rejected<BudgetError, Self>> {
        match self.remaining {
            1 => self.consume(f).map(|(value, _depleted)| value),
            0 => Err(Rejected::new(BudgetError::Depleted, self)),
            n => {
                warn!(remaining = n, "Consume-once rejected: budget is not single-use");
                Err(Rejected::new(BudgetError::NotSingleUse(n), self))
            }
        }
    }

    /// Partition into `(left, remaining - left)`. Both halves carry a copy of
    /// the payload; their budgets are disjoint.
    pub fn split(self, left: u64) -> Result<(Self, Self), Rejected<BudgetError, Self>>
    where
        T: Clone,
    {
        if left > self.remaining {
            warn!(requested = left, available = self.remaining, "Split rejected");
            let error = BudgetError::InsufficientBudget {
                requested: left,
                available: self.remaining,
            };
            return Err(Rejected::new(error, self));
        }
        let right = self.remaining - left;
        debug!(left, right, "Budget split");
        Ok((
            Self::new(left, self.payload.clone()),
            Self::new(right, self.payload),
        ))
    }

    /// Recombine two budgets. The left payload is kept. On overflow both
    /// halves come back untouched.
    pub fn merge(self, other: Self) -> Result<Self, Rejected<BudgetError, (Self, Self)>> {
        match self.remaining.checked_add(other.remaining) {
            Some(total) => {
                debug!(total, "Budgets merged");
                Ok(Self::new(total, self.payload))
            }
            None => {
                let error = BudgetError::Overflow {
                    left: self.remaining,
                    right: other.remaining,
                };
                Err(Rejected::new(error, (self, other)))
            }
        }
    }
}
