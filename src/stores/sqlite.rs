//! Implements a SQLite backed expense store.

use std::{
    str::FromStr,
    sync::{Arc, Mutex},
};

use rusqlite::{Connection, Row, params_from_iter, types::Value};
use rust_decimal::Decimal;
use time::{Date, OffsetDateTime, format_description::BorrowedFormatItem, macros::format_description};

use crate::{
    Error,
    period::PeriodFilter,
    purchase::{NewPurchase, Purchase},
    stores::ExpenseStore,
};

/// The format of the `occurred_on` calendar-date column.
///
/// Used for both writes and query bounds so date comparisons stay plain text
/// comparisons.
static DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Stores purchases in a SQLite database.
///
/// The connection is shared behind a mutex. Each store operation is a single
/// append or a single read, so no coordination beyond the mutex is needed.
#[derive(Debug, Clone)]
pub struct SqliteExpenseStore {
    connection: Arc<Mutex<Connection>>,
}

impl SqliteExpenseStore {
    /// Create a new store for the SQLite `connection`.
    ///
    /// The schema must have been set up with
    /// [initialize](crate::initialize_db).
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }

    fn map_row(row: &Row) -> Result<Purchase, rusqlite::Error> {
        let amount_text: String = row.get(2)?;
        let amount = Decimal::from_str(&amount_text).map_err(|error| {
            rusqlite::Error::FromSqlConversionFailure(
                2,
                rusqlite::types::Type::Text,
                Box::new(error),
            )
        })?;

        Ok(Purchase {
            id: row.get(0)?,
            category: row.get(1)?,
            amount,
            description: row.get(3)?,
            occurred_at: row.get(4)?,
        })
    }
}

fn format_date(date: Date) -> String {
    date.format(&DATE_FORMAT)
        .expect("formatting a date with a constant format cannot fail")
}

impl ExpenseStore for SqliteExpenseStore {
    /// Append a purchase to the database.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::StoreUnavailable] if the connection lock cannot be acquired,
    /// - or [Error::SqlError] if there is some other SQL error.
    fn append(&mut self, purchase: NewPurchase) -> Result<Purchase, Error> {
        let connection = self
            .connection
            .lock()
            .map_err(|_| Error::StoreUnavailable)?;

        let purchase = connection
            .prepare(
                "INSERT INTO purchase (category, amount, description, occurred_at, occurred_on)
                 VALUES (?1, ?2, ?3, ?4, ?5)
                 RETURNING id, category, amount, description, occurred_at",
            )?
            .query_row(
                (
                    &purchase.category,
                    purchase.amount.to_string(),
                    &purchase.description,
                    purchase.occurred_at,
                    format_date(purchase.occurred_at.date()),
                ),
                Self::map_row,
            )?;

        Ok(purchase)
    }

    /// Retrieve every purchase in the database in insertion order.
    ///
    /// # Errors
    /// This function will return a [Error::SqlError] if there is a SQL error.
    fn query_all(&self) -> Result<Vec<Purchase>, Error> {
        let connection = self
            .connection
            .lock()
            .map_err(|_| Error::StoreUnavailable)?;

        let purchases = connection
            .prepare(
                "SELECT id, category, amount, description, occurred_at FROM purchase ORDER BY id",
            )?
            .query_map([], Self::map_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(purchases)
    }

    /// Query for purchases inside the period window, pushed down to SQL.
    ///
    /// # Errors
    /// This function will return a [Error::SqlError] if there is a SQL error.
    fn query_by_period(
        &self,
        filter: PeriodFilter,
        now: OffsetDateTime,
    ) -> Result<Vec<Purchase>, Error> {
        let (start, end) = filter.bounds(now.date());

        let mut conditions: Vec<String> = Vec::new();
        let mut params: Vec<Value> = Vec::new();

        if let Some(start) = start {
            params.push(Value::Text(format_date(start)));
            conditions.push(format!("occurred_on >= ?{}", params.len()));
        }

        if let Some(end) = end {
            params.push(Value::Text(format_date(end)));
            conditions.push(format!("occurred_on <= ?{}", params.len()));
        }

        let mut query =
            "SELECT id, category, amount, description, occurred_at FROM purchase".to_string();

        if !conditions.is_empty() {
            query.push_str(" WHERE ");
            query.push_str(&conditions.join(" AND "));
        }

        query.push_str(" ORDER BY id");

        let connection = self
            .connection
            .lock()
            .map_err(|_| Error::StoreUnavailable)?;

        let purchases = connection
            .prepare(&query)?
            .query_map(params_from_iter(params), Self::map_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(purchases)
    }
}
