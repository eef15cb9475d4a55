//! Gastos is a small personal expense tracker: a JSON REST API that records
//! purchases under categories and serves per-category totals to a mobile
//! front-end.
//!
//! Amounts are handled as decimals end to end so category totals never drift
//! by a cent, and all calendar comparisons happen in a single reference time
//! zone.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use rust_decimal::Decimal;
use serde::Serialize;
use tokio::signal;

mod app_state;
mod database_id;
mod db;
mod endpoints;
mod expense;
mod logging;
mod period;
mod purchase;
mod routing;
mod stores;
mod summary;
mod timezone;

pub use app_state::AppState;
pub use db::initialize as initialize_db;
pub use logging::logging_middleware;
pub use period::PeriodFilter;
pub use purchase::{NewPurchase, Purchase, RawAmount};
pub use routing::build_router;
pub use stores::{ExpenseStore, MemoryExpenseStore, SqliteExpenseStore};
pub use summary::{CategorySummary, PurchaseLine, grand_total, summarize_by_category};
pub use timezone::{DEFAULT_TIMEZONE, now_in_timezone};

/// An async task that waits for either the ctrl+c or terminate signal,
/// whichever comes first, and then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// An empty string was used for a purchase category.
    ///
    /// Purchases are grouped by category, so a blank category would create a
    /// nameless group in every summary.
    #[error("category cannot be empty")]
    EmptyCategory,

    /// An empty string was used for a purchase description.
    #[error("description cannot be empty")]
    EmptyDescription,

    /// The amount could not be parsed as a decimal number.
    ///
    /// Holds the raw text the client sent so it can be echoed back.
    #[error("\"{0}\" is not a valid amount")]
    InvalidAmount(String),

    /// A zero or negative amount was used for a purchase.
    #[error("amount must be greater than zero, got {0}")]
    NonPositiveAmount(Decimal),

    /// The configured reference timezone is not a valid canonical name.
    #[error("invalid timezone {0}")]
    InvalidTimezone(String),

    /// The expense store could not be reached or queried.
    ///
    /// Summarization aborts with this error rather than returning partial
    /// results.
    #[error("the expense store is unavailable")]
    StoreUnavailable,

    /// The requested resource was not found.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl Error {
    /// The request field a validation error refers to, if any.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Error::EmptyCategory => Some("category"),
            Error::EmptyDescription => Some("description"),
            Error::InvalidAmount(_) | Error::NonPositiveAmount(_) => Some("amount"),
            _ => None,
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            Error::EmptyCategory
            | Error::EmptyDescription
            | Error::InvalidAmount(_)
            | Error::NonPositiveAmount(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Error::NotFound => StatusCode::NOT_FOUND,
            Error::StoreUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            Error::InvalidTimezone(_) | Error::SqlError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// The JSON body used for every error response.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<&'static str>,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status_code = self.status_code();

        // Errors that are not the client's fault are logged on the server and
        // reported without internal detail.
        if status_code.is_server_error() {
            tracing::error!("An unexpected error occurred: {}", self);
        }

        let body = ErrorBody {
            error: self.to_string(),
            field: self.field(),
        };

        (status_code, Json(body)).into_response()
    }
}
