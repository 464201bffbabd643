//! Sets up the application's SQLite database.

use rusqlite::{Connection, Transaction, TransactionBehavior};

use crate::{Error, expense::create_expense_tables};

/// Create the tables for the app's data if they do not already exist.
///
/// All tables are created in one exclusive transaction, so either every table
/// exists afterwards or none were added.
///
/// # Errors
/// Returns an error if there is an SQL error.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    let transaction = Transaction::new_unchecked(connection, TransactionBehavior::Exclusive)?;

    create_expense_tables(&transaction)?;

    transaction.commit()?;

    Ok(())
}
