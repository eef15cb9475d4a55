//! Defines the purchase model and the validation applied at ingestion.

use rust_decimal::{Decimal, prelude::FromPrimitive};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{Error, database_id::PurchaseId};

// ============================================================================
// MODELS
// ============================================================================

/// One recorded expense line.
///
/// Purchases are immutable once recorded: the API never updates or deletes
/// them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Purchase {
    /// The ID of the purchase.
    pub id: PurchaseId,
    /// The category the purchase is grouped under, e.g. "Lanches".
    pub category: String,
    /// The amount of money spent.
    pub amount: Decimal,
    /// A text description of what was bought.
    pub description: String,
    /// When the purchase was recorded, in the reference time zone.
    #[serde(with = "time::serde::rfc3339")]
    pub occurred_at: OffsetDateTime,
}

/// A validated purchase that has not been stored yet.
///
/// The only way to construct one is [NewPurchase::parse], so a value of this
/// type is always safe to hand to a store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPurchase {
    /// The category the purchase is grouped under.
    pub category: String,
    /// The amount of money spent. Always positive.
    pub amount: Decimal,
    /// A text description of what was bought.
    pub description: String,
    /// When the purchase was recorded, in the reference time zone.
    pub occurred_at: OffsetDateTime,
}

/// The amount field as it arrives on the wire.
///
/// The mobile client sends the raw text of its amount input (e.g. "25,90"),
/// but JSON numbers are accepted too.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawAmount {
    /// A JSON number.
    Number(f64),
    /// The raw text of an amount input field.
    Text(String),
}

// ============================================================================
// VALIDATION
// ============================================================================

impl NewPurchase {
    /// Validate raw client input into a purchase ready for storage.
    ///
    /// `category` and `description` must be non-empty after trimming and the
    /// amount must parse to a positive decimal. `occurred_at` should be the
    /// current instant in the reference time zone, see
    /// [now_in_timezone](crate::now_in_timezone).
    ///
    /// # Errors
    /// Returns the validation error naming the offending field. Nothing is
    /// written anywhere on failure.
    pub fn parse(
        category: &str,
        amount: RawAmount,
        description: &str,
        occurred_at: OffsetDateTime,
    ) -> Result<Self, Error> {
        let category = category.trim();

        if category.is_empty() {
            return Err(Error::EmptyCategory);
        }

        let description = description.trim();

        if description.is_empty() {
            return Err(Error::EmptyDescription);
        }

        let amount = amount.into_decimal()?;

        Ok(Self {
            category: category.to_owned(),
            amount,
            description: description.to_owned(),
            occurred_at,
        })
    }
}

impl RawAmount {
    fn into_decimal(self) -> Result<Decimal, Error> {
        match self {
            RawAmount::Number(value) => Decimal::from_f64(value)
                .ok_or_else(|| Error::InvalidAmount(value.to_string()))
                .and_then(ensure_positive),
            RawAmount::Text(text) => parse_amount(&text),
        }
    }
}

/// Parse an amount accepting both comma and dot as the decimal separator.
///
/// The comma is normalized to a dot before parsing, so "25,90" and "25.90"
/// both parse to the same decimal.
///
/// # Errors
/// Returns [Error::InvalidAmount] if the text is not a decimal number, or
/// [Error::NonPositiveAmount] if it is zero or negative.
pub fn parse_amount(raw: &str) -> Result<Decimal, Error> {
    let normalized = raw.trim().replace(',', ".");

    let amount: Decimal = normalized
        .parse()
        .map_err(|_| Error::InvalidAmount(raw.trim().to_owned()))?;

    ensure_positive(amount)
}

fn ensure_positive(amount: Decimal) -> Result<Decimal, Error> {
    if amount <= Decimal::ZERO {
        return Err(Error::NonPositiveAmount(amount));
    }

    Ok(amount)
}

// ============================================================================
// TESTS
// ============================================================================
