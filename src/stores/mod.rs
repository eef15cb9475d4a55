//! Contains the trait and implementations for objects that store purchases.

mod memory;
mod sqlite;

pub use memory::MemoryExpenseStore;
pub use sqlite::SqliteExpenseStore;

use time::OffsetDateTime;

use crate::{
    Error,
    period::PeriodFilter,
    purchase::{NewPurchase, Purchase},
};

/// Handles the durable append and retrieval of purchases.
///
/// Purchases are append-only: the contract has no update or delete.
pub trait ExpenseStore {
    /// Append a validated purchase to the store and return the stored row,
    /// including its assigned id.
    fn append(&mut self, purchase: NewPurchase) -> Result<Purchase, Error>;

    /// Retrieve every purchase in insertion order.
    fn query_all(&self) -> Result<Vec<Purchase>, Error>;

    /// Retrieve the purchases whose calendar date falls inside `filter`'s
    /// window anchored at `now`.
    ///
    /// Implementations may push the window down to the underlying database or
    /// filter [ExpenseStore::query_all] results; either way the window comes
    /// from [PeriodFilter::bounds].
    fn query_by_period(
        &self,
        filter: PeriodFilter,
        now: OffsetDateTime,
    ) -> Result<Vec<Purchase>, Error>;
}
