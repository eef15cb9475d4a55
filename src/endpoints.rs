//! The API endpoint URIs.

/// The route to list category summaries and record expenses.
pub const EXPENSES: &str = "/api/expenses";

/// The route to request a cup of coffee (experimental).
pub const COFFEE: &str = "/api/coffee";
