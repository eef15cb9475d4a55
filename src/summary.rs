//! Groups purchases by category and sums their amounts.
//!
//! This is the heart of the tracker: everything else is plumbing that feeds
//! purchases in or renders summaries out.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::Serialize;
use time::OffsetDateTime;

use crate::{Error, period::PeriodFilter, purchase::Purchase};

/// The per-category total and the purchases that produced it.
///
/// Recomputed on every query, never stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySummary {
    /// The category name.
    pub category: String,
    /// The sum of the amounts of the contributing purchases.
    pub total: Decimal,
    /// The contributing purchases in insertion order.
    pub purchases: Vec<PurchaseLine>,
}

/// The subset of a purchase shown inside a category summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PurchaseLine {
    /// A text description of what was bought.
    pub description: String,
    /// The amount of money spent.
    pub amount: Decimal,
    /// When the purchase was recorded.
    #[serde(with = "time::serde::rfc3339")]
    pub occurred_at: OffsetDateTime,
}

/// Group `purchases` by category and sum their amounts.
///
/// Only purchases whose calendar date falls inside `filter`'s window
/// participate; dates are compared in the time zone carried by `now`, so a
/// stamp recorded under a different offset still lands on the right calendar
/// day. Categories appear in first-seen order of the filtered purchases, and
/// within a category the contributing purchases keep their insertion order.
///
/// An empty input or a window that matches nothing yields an empty vector,
/// not an error.
///
/// # Errors
/// Returns a validation error if any purchase carries a non-positive amount
/// or an empty category. Such records should have been rejected at ingestion,
/// so they are surfaced here rather than silently skipped.
pub fn summarize_by_category(
    purchases: &[Purchase],
    filter: PeriodFilter,
    now: OffsetDateTime,
) -> Result<Vec<CategorySummary>, Error> {
    let today = now.date();

    let mut summaries: Vec<CategorySummary> = Vec::new();
    let mut index_by_category: HashMap<&str, usize> = HashMap::new();

    for purchase in purchases {
        if purchase.category.trim().is_empty() {
            return Err(Error::EmptyCategory);
        }

        if purchase.amount <= Decimal::ZERO {
            return Err(Error::NonPositiveAmount(purchase.amount));
        }

        let date = purchase.occurred_at.to_offset(now.offset()).date();

        if !filter.matches(date, today) {
            continue;
        }

        let index = *index_by_category
            .entry(purchase.category.as_str())
            .or_insert_with(|| {
                summaries.push(CategorySummary {
                    category: purchase.category.clone(),
                    total: Decimal::ZERO,
                    purchases: Vec::new(),
                });

                summaries.len() - 1
            });

        let summary = &mut summaries[index];
        summary.total += purchase.amount;
        summary.purchases.push(PurchaseLine {
            description: purchase.description.clone(),
            amount: purchase.amount,
            occurred_at: purchase.occurred_at,
        });
    }

    Ok(summaries)
}

/// The sum of the per-category totals of `summaries`.
pub fn grand_total(summaries: &[CategorySummary]) -> Decimal {
    summaries.iter().map(|summary| summary.total).sum()
}
