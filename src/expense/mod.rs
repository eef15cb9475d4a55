//! Expense endpoints for the tracker.
//!
//! This module contains the JSON handlers the mobile front-end talks to:
//! - Listing per-category summaries, optionally narrowed to a time window
//! - Recording a new expense

mod create_expense_endpoint;
mod list_summaries_endpoint;

pub use create_expense_endpoint::create_expense_endpoint;
pub use list_summaries_endpoint::list_summaries_endpoint;
