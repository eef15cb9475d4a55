//! Sets up the application's database schema.

use rusqlite::Connection;

/// Create the tables for the domain models if they do not exist yet.
///
/// Safe to call on every start-up.
///
/// # Errors
/// Returns an error if there is an SQL error.
pub fn initialize(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS purchase (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                category TEXT NOT NULL,
                amount TEXT NOT NULL,
                description TEXT NOT NULL,
                occurred_at TEXT NOT NULL,
                occurred_on TEXT NOT NULL
                )",
        (),
    )?;

    // Period filters query by calendar date.
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_purchase_occurred_on ON purchase(occurred_on);",
        (),
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;

    use super::initialize;

    #[test]
    fn initialize_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();

        initialize(&conn).expect("Could not initialize database");
        initialize(&conn).expect("Initializing twice should succeed");
    }
}
