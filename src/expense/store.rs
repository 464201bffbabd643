//! Persistence for default and specific expenses.

use rusqlite::{Connection, Row, types::Type};
use time::Month;

use crate::{
    Error,
    expense::{
        Amount, DefaultExpense, DefaultExpenseId, ExpenseName, NewDefaultExpense,
        NewSpecificExpense, SpecificExpense, SpecificExpenseId,
    },
};

/// The number of rows changed by a delete.
pub type RowsAffected = usize;

/// Create, list and delete operations over the two kinds of expense.
///
/// Listing returns records in insertion order. Deleting an id that does not
/// exist affects zero rows and is not an error.
pub trait ExpenseStore {
    /// Get every default expense in insertion order.
    fn list_defaults(&self) -> Result<Vec<DefaultExpense>, Error>;

    /// Get every specific expense in insertion order.
    fn list_specifics(&self) -> Result<Vec<SpecificExpense>, Error>;

    /// Store `expense` and return it with its new id.
    fn insert_default(&self, expense: NewDefaultExpense) -> Result<DefaultExpense, Error>;

    /// Store `expense` and return it with its new id.
    fn insert_specific(&self, expense: NewSpecificExpense) -> Result<SpecificExpense, Error>;

    fn delete_default(&self, id: DefaultExpenseId) -> Result<RowsAffected, Error>;

    fn delete_specific(&self, id: SpecificExpenseId) -> Result<RowsAffected, Error>;
}

impl ExpenseStore for Connection {
    fn list_defaults(&self) -> Result<Vec<DefaultExpense>, Error> {
        self.prepare("SELECT id, name, amount_cents FROM default_expense ORDER BY id ASC;")?
            .query_map([], map_default_row)?
            .map(|maybe_expense| maybe_expense.map_err(Error::from))
            .collect()
    }

    fn list_specifics(&self) -> Result<Vec<SpecificExpense>, Error> {
        self.prepare(
            "SELECT id, name, amount_cents, year, month FROM specific_expense ORDER BY id ASC;",
        )?
        .query_map([], map_specific_row)?
        .map(|maybe_expense| maybe_expense.map_err(Error::from))
        .collect()
    }

    fn insert_default(&self, expense: NewDefaultExpense) -> Result<DefaultExpense, Error> {
        self.execute(
            "INSERT INTO default_expense (name, amount_cents) VALUES (?1, ?2);",
            (expense.name.as_ref(), expense.amount.cents()),
        )?;

        let id = DefaultExpenseId::new(self.last_insert_rowid());

        Ok(DefaultExpense {
            id,
            name: expense.name,
            amount: expense.amount,
        })
    }

    fn insert_specific(&self, expense: NewSpecificExpense) -> Result<SpecificExpense, Error> {
        self.execute(
            "INSERT INTO specific_expense (name, amount_cents, year, month) VALUES (?1, ?2, ?3, ?4);",
            (
                expense.name.as_ref(),
                expense.amount.cents(),
                expense.year,
                u8::from(expense.month),
            ),
        )?;

        let id = SpecificExpenseId::new(self.last_insert_rowid());

        Ok(SpecificExpense {
            id,
            name: expense.name,
            amount: expense.amount,
            year: expense.year,
            month: expense.month,
        })
    }

    fn delete_default(&self, id: DefaultExpenseId) -> Result<RowsAffected, Error> {
        self.execute("DELETE FROM default_expense WHERE id = ?1;", [id.as_i64()])
            .map_err(Error::from)
    }

    fn delete_specific(&self, id: SpecificExpenseId) -> Result<RowsAffected, Error> {
        self.execute("DELETE FROM specific_expense WHERE id = ?1;", [id.as_i64()])
            .map_err(Error::from)
    }
}

/// Create the expense tables if they do not exist.
pub fn create_expense_tables(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS default_expense (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL CHECK (length(trim(name)) > 0),
            amount_cents INTEGER NOT NULL CHECK (amount_cents > 0)
        );

        CREATE TABLE IF NOT EXISTS specific_expense (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL CHECK (length(trim(name)) > 0),
            amount_cents INTEGER NOT NULL CHECK (amount_cents > 0),
            year INTEGER NOT NULL,
            month INTEGER NOT NULL CHECK (month BETWEEN 1 AND 12)
        );

        CREATE INDEX IF NOT EXISTS idx_specific_expense_year_month
            ON specific_expense(year, month);",
    )?;

    Ok(())
}

fn map_default_row(row: &Row) -> Result<DefaultExpense, rusqlite::Error> {
    let id = DefaultExpenseId::new(row.get(0)?);
    let raw_name: String = row.get(1)?;
    let name = ExpenseName::new_unchecked(&raw_name);
    let amount = Amount::from_cents(row.get(2)?);

    Ok(DefaultExpense { id, name, amount })
}

fn map_specific_row(row: &Row) -> Result<SpecificExpense, rusqlite::Error> {
    let id = SpecificExpenseId::new(row.get(0)?);
    let raw_name: String = row.get(1)?;
    let name = ExpenseName::new_unchecked(&raw_name);
    let amount = Amount::from_cents(row.get(2)?);
    let year = row.get(3)?;
    let raw_month: u8 = row.get(4)?;
    let month = Month::try_from(raw_month).map_err(|error| {
        rusqlite::Error::FromSqlConversionFailure(4, Type::Integer, Box::new(error))
    })?;

    Ok(SpecificExpense {
        id,
        name,
        amount,
        year,
        month,
    })
}
