//! Implements an in-memory expense store.

use std::sync::{Arc, Mutex};

use time::OffsetDateTime;

use crate::{
    Error,
    database_id::PurchaseId,
    period::PeriodFilter,
    purchase::{NewPurchase, Purchase},
    stores::ExpenseStore,
};

/// Stores purchases in an append-only in-memory sequence.
///
/// Backs tests and ephemeral runs. Mirrors the SQLite store's observable
/// behaviour: ids start at one and increase, and queries return purchases in
/// insertion order. Clones share the same underlying sequence.
#[derive(Debug, Clone, Default)]
pub struct MemoryExpenseStore {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Debug, Default)]
struct Inner {
    purchases: Vec<Purchase>,
    next_id: PurchaseId,
}

impl MemoryExpenseStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl ExpenseStore for MemoryExpenseStore {
    fn append(&mut self, purchase: NewPurchase) -> Result<Purchase, Error> {
        let mut inner = self.inner.lock().map_err(|_| Error::StoreUnavailable)?;

        inner.next_id += 1;
        let purchase = Purchase {
            id: inner.next_id,
            category: purchase.category,
            amount: purchase.amount,
            description: purchase.description,
            occurred_at: purchase.occurred_at,
        };
        inner.purchases.push(purchase.clone());

        Ok(purchase)
    }

    fn query_all(&self) -> Result<Vec<Purchase>, Error> {
        let inner = self.inner.lock().map_err(|_| Error::StoreUnavailable)?;

        Ok(inner.purchases.clone())
    }

    fn query_by_period(
        &self,
        filter: PeriodFilter,
        now: OffsetDateTime,
    ) -> Result<Vec<Purchase>, Error> {
        let today = now.date();
        let inner = self.inner.lock().map_err(|_| Error::StoreUnavailable)?;

        Ok(inner
            .purchases
            .iter()
            .filter(|purchase| {
                filter.matches(purchase.occurred_at.to_offset(now.offset()).date(), today)
            })
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use crate::{
        period::PeriodFilter,
        purchase::{NewPurchase, RawAmount},
        stores::ExpenseStore,
    };

    use super::MemoryExpenseStore;

    fn new_purchase(description: &str, occurred_at: time::OffsetDateTime) -> NewPurchase {
        NewPurchase::parse(
            "Lanches",
            RawAmount::Text("10,00".to_owned()),
            description,
            occurred_at,
        )
        .expect("test purchase should be valid")
    }

    #[test]
    fn append_assigns_sequential_ids() {
        let mut store = MemoryExpenseStore::new();
        let occurred_at = datetime!(2024-11-15 12:00 -3);

        let first = store.append(new_purchase("Café", occurred_at)).unwrap();
        let second = store.append(new_purchase("Pão", occurred_at)).unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[test]
    fn clones_share_the_same_sequence() {
        let mut store = MemoryExpenseStore::new();
        let reader = store.clone();

        store
            .append(new_purchase("Café", datetime!(2024-11-15 12:00 -3)))
            .unwrap();

        assert_eq!(reader.query_all().unwrap().len(), 1);
    }

    #[test]
    fn query_by_period_filters_by_calendar_date() {
        let mut store = MemoryExpenseStore::new();

        store
            .append(new_purchase("Ontem", datetime!(2024-11-14 23:00 -3)))
            .unwrap();
        store
            .append(new_purchase("Hoje", datetime!(2024-11-15 08:00 -3)))
            .unwrap();

        let now = datetime!(2024-11-15 09:00 -3);
        let purchases = store.query_by_period(PeriodFilter::Today, now).unwrap();

        assert_eq!(purchases.len(), 1);
        assert_eq!(purchases[0].description, "Hoje");
    }
}
