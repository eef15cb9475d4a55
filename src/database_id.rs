//! Integer id aliases for rows in the application database.

/// The integer id of a row in the application database.
pub type DatabaseId = i64;

/// The id of a recorded purchase.
pub type PurchaseId = DatabaseId;
