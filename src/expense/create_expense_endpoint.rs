//! Defines the endpoint for recording a new expense.

use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;

use crate::{
    AppState, Error,
    purchase::{NewPurchase, Purchase, RawAmount},
    stores::ExpenseStore,
    timezone::now_in_timezone,
};

/// The request body for recording an expense.
#[derive(Debug, Deserialize)]
pub struct ExpenseForm {
    /// The category to group the expense under.
    pub category: String,
    /// The amount spent, as the raw text of the amount input or a number.
    pub amount: RawAmount,
    /// Text detailing the expense.
    pub description: String,
}

/// A route handler for recording a new expense.
///
/// The purchase is stamped with the current time in the reference zone and
/// appended to the store. Nothing is written when validation fails.
pub async fn create_expense_endpoint<S>(
    State(state): State<AppState<S>>,
    Json(form): Json<ExpenseForm>,
) -> Result<(StatusCode, Json<Purchase>), Error>
where
    S: ExpenseStore + Clone + Send + Sync,
{
    let occurred_at = now_in_timezone(&state.timezone)?;
    let purchase = NewPurchase::parse(&form.category, form.amount, &form.description, occurred_at)?;

    let mut store = state.store;
    let purchase = store.append(purchase)?;

    Ok((StatusCode::CREATED, Json(purchase)))
}

#[cfg(test)]
mod tests {
    use axum::{Json, extract::State, http::StatusCode};
    use rust_decimal::Decimal;

    use crate::{
        AppState, Error,
        purchase::RawAmount,
        stores::{ExpenseStore, MemoryExpenseStore},
        timezone::DEFAULT_TIMEZONE,
    };

    use super::{ExpenseForm, create_expense_endpoint};

    fn get_test_state() -> AppState<MemoryExpenseStore> {
        AppState::new(DEFAULT_TIMEZONE, MemoryExpenseStore::new())
    }

    #[tokio::test]
    async fn can_record_expense() {
        let state = get_test_state();

        let form = ExpenseForm {
            category: "Lanches".to_owned(),
            amount: RawAmount::Text("25,90".to_owned()),
            description: "Café".to_owned(),
        };
        let (status_code, Json(purchase)) =
            create_expense_endpoint(State(state.clone()), Json(form))
                .await
                .unwrap();

        assert_eq!(status_code, StatusCode::CREATED);
        assert_eq!(purchase.id, 1);
        assert_eq!(purchase.amount, Decimal::new(2590, 2));

        let stored = state.store.query_all().unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].description, "Café");
    }

    #[tokio::test]
    async fn stamps_the_purchase_in_the_reference_zone() {
        let state = get_test_state();

        let form = ExpenseForm {
            category: "Lanches".to_owned(),
            amount: RawAmount::Number(10.0),
            description: "Café".to_owned(),
        };
        let (_, Json(purchase)) = create_expense_endpoint(State(state), Json(form))
            .await
            .unwrap();

        let expected_offset = crate::timezone::get_reference_offset(DEFAULT_TIMEZONE).unwrap();
        assert_eq!(purchase.occurred_at.offset(), expected_offset);
    }

    #[tokio::test]
    async fn rejects_invalid_amounts() {
        let state = get_test_state();

        let form = ExpenseForm {
            category: "Lanches".to_owned(),
            amount: RawAmount::Text("muito caro".to_owned()),
            description: "Café".to_owned(),
        };
        let result = create_expense_endpoint(State(state), Json(form)).await;

        assert_eq!(
            result.unwrap_err(),
            Error::InvalidAmount("muito caro".to_owned())
        );
    }

    #[tokio::test]
    async fn nothing_is_written_when_validation_fails() {
        let state = get_test_state();

        let form = ExpenseForm {
            category: "".to_owned(),
            amount: RawAmount::Text("10".to_owned()),
            description: "Café".to_owned(),
        };
        let result = create_expense_endpoint(State(state.clone()), Json(form)).await;

        assert_eq!(result.unwrap_err(), Error::EmptyCategory);
        assert!(state.store.query_all().unwrap().is_empty());
    }
}
