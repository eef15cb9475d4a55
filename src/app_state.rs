//! Implements a struct that holds the state of the REST server.

use crate::stores::ExpenseStore;

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState<S>
where
    S: ExpenseStore + Send + Sync,
{
    /// The reference time zone as a canonical timezone name, e.g.
    /// "America/Sao_Paulo".
    pub timezone: String,
    /// The store holding the recorded purchases.
    pub store: S,
}

impl<S> AppState<S>
where
    S: ExpenseStore + Send + Sync,
{
    /// Create a new [AppState].
    ///
    /// `timezone` should be a valid, canonical timezone name. It is resolved
    /// on every request, so a bad value surfaces as an error response rather
    /// than a start-up panic.
    pub fn new(timezone: &str, store: S) -> Self {
        Self {
            timezone: timezone.to_owned(),
            store,
        }
    }
}
