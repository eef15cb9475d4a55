//! Defines the endpoint for listing per-category summaries.

use axum::{
    Json,
    extract::{Query, State},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    period::PeriodFilter,
    stores::ExpenseStore,
    summary::{CategorySummary, grand_total, summarize_by_category},
    timezone::now_in_timezone,
};

/// The query parameters for the summary listing.
#[derive(Debug, Default, Deserialize)]
pub struct SummaryQuery {
    /// The period filter to apply. All purchases when absent.
    #[serde(default)]
    pub period: PeriodFilter,
}

/// The response body for the summary listing.
#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    /// One entry per category present among the filtered purchases.
    pub summaries: Vec<CategorySummary>,
    /// The grand total over all summaries.
    pub total: Decimal,
}

/// A route handler for listing per-category summaries.
///
/// The store narrows the purchases to the requested window and the
/// aggregation engine groups and sums them; both derive the window from the
/// same policy, so the second pass cannot drop anything the first kept.
pub async fn list_summaries_endpoint<S>(
    State(state): State<AppState<S>>,
    Query(query): Query<SummaryQuery>,
) -> Result<Json<SummaryResponse>, Error>
where
    S: ExpenseStore + Clone + Send + Sync,
{
    let now = now_in_timezone(&state.timezone)?;
    let purchases = state.store.query_by_period(query.period, now)?;
    let summaries = summarize_by_category(&purchases, query.period, now)?;
    let total = grand_total(&summaries);

    Ok(Json(SummaryResponse { summaries, total }))
}

#[cfg(test)]
mod tests {
    use axum::{
        Json,
        extract::{Query, State},
    };
    use rust_decimal::Decimal;
    use time::Duration;

    use crate::{
        AppState,
        period::PeriodFilter,
        purchase::{NewPurchase, RawAmount},
        stores::{ExpenseStore, MemoryExpenseStore},
        timezone::{DEFAULT_TIMEZONE, now_in_timezone},
    };

    use super::{SummaryQuery, list_summaries_endpoint};

    fn get_test_state() -> AppState<MemoryExpenseStore> {
        AppState::new(DEFAULT_TIMEZONE, MemoryExpenseStore::new())
    }

    fn record(
        state: &AppState<MemoryExpenseStore>,
        category: &str,
        amount: &str,
        description: &str,
        occurred_at: time::OffsetDateTime,
    ) {
        let purchase = NewPurchase::parse(
            category,
            RawAmount::Text(amount.to_owned()),
            description,
            occurred_at,
        )
        .unwrap();

        state
            .store
            .clone()
            .append(purchase)
            .expect("could not record test purchase");
    }

    #[tokio::test]
    async fn summaries_group_categories_and_carry_the_grand_total() {
        let state = get_test_state();
        let now = now_in_timezone(DEFAULT_TIMEZONE).unwrap();
        record(&state, "Refeições", "54,20", "Almoço", now);
        record(&state, "Lanches", "14,41", "Café", now);
        record(&state, "Marina", "103,99", "Flores", now);

        let Json(response) =
            list_summaries_endpoint(State(state), Query(SummaryQuery::default()))
                .await
                .unwrap();

        assert_eq!(response.summaries.len(), 3);
        assert_eq!(response.summaries[0].category, "Refeições");
        assert_eq!(response.total, Decimal::new(17260, 2));
    }

    #[tokio::test]
    async fn period_filter_narrows_the_listing() {
        let state = get_test_state();
        let now = now_in_timezone(DEFAULT_TIMEZONE).unwrap();
        record(&state, "Lanches", "5,00", "Ontem", now - Duration::days(1));
        record(&state, "Lanches", "7,00", "Hoje", now);

        let query = SummaryQuery {
            period: PeriodFilter::Today,
        };
        let Json(response) = list_summaries_endpoint(State(state), Query(query))
            .await
            .unwrap();

        assert_eq!(response.summaries.len(), 1);
        assert_eq!(response.summaries[0].purchases.len(), 1);
        assert_eq!(response.summaries[0].purchases[0].description, "Hoje");
        assert_eq!(response.total, Decimal::new(700, 2));
    }

    #[tokio::test]
    async fn an_empty_store_lists_no_summaries() {
        let state = get_test_state();

        let Json(response) =
            list_summaries_endpoint(State(state), Query(SummaryQuery::default()))
                .await
                .unwrap();

        assert!(response.summaries.is_empty());
        assert_eq!(response.total, Decimal::ZERO);
    }
}
