use std::{
    error::Error,
    path::Path,
    process::exit,
    sync::{Arc, Mutex},
};

use clap::Parser;
use rusqlite::Connection;

use gastos_rs::{
    DEFAULT_TIMEZONE, ExpenseStore, NewPurchase, RawAmount, SqliteExpenseStore, initialize_db,
    now_in_timezone,
};

/// A utility for creating a demo database for the REST API server of
/// gastos_rs.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;
    initialize_db(&conn)?;

    println!("Recording demo purchases...");

    let mut store = SqliteExpenseStore::new(Arc::new(Mutex::new(conn)));
    let occurred_at = now_in_timezone(DEFAULT_TIMEZONE)?;

    for (category, amount, description) in [
        ("Refeições", "54,20", "Almoço"),
        ("Lanches", "14,41", "Café"),
        ("Marina", "103,99", "Flores"),
    ] {
        let purchase = NewPurchase::parse(
            category,
            RawAmount::Text(amount.to_owned()),
            description,
            occurred_at,
        )?;

        store.append(purchase)?;
    }

    println!("Success!");

    Ok(())
}
