/*! This module defines and implements traits for interacting with the application's database. */

use rusqlite::{Connection, Error, Row, Transaction as SqlTransaction};

use crate::{
    error::Error as AppError,
    stores::sqlite::{SQLiteCategoryStore, SQLiteTransactionStore, SQLiteUserStore},
};

/// A trait for adding an object schema to a database.
pub trait CreateTable {
    /// Create a table for the model.
    ///
    /// # Errors
    /// Returns an error if there is an SQL error.
    fn create_table(connection: &Connection) -> Result<(), Error>;
}

/// A trait for mapping from a `rusqlite::Row` from a SQLite database to a
/// concrete rust type.
pub trait MapRow {
    /// The type to map rows to.
    type ReturnType;

    /// Map a row to `ReturnType`, starting from the first column.
    ///
    /// # Errors
    /// Returns an error if a column is missing or contains an unexpected type.
    fn map_row(row: &Row) -> Result<Self::ReturnType, Error> {
        Self::map_row_with_offset(row, 0)
    }

    /// Map a row to `ReturnType`, starting from the column at `offset`.
    ///
    /// The offset variant exists for joined queries where the row holds the
    /// columns of more than one model.
    ///
    /// # Errors
    /// Returns an error if a column is missing or contains an unexpected type.
    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self::ReturnType, Error>;
}

/// Create the tables for the domain models in the database.
///
/// The tables are created in a single exclusive transaction, so a database is
/// either fully initialized or untouched. Foreign key enforcement is switched
/// on for the connection since SQLite leaves it off by default.
///
/// # Errors
/// Returns an [AppError::SqlError] if a table could not be created.
pub fn initialize(connection: &Connection) -> Result<(), AppError> {
    connection.pragma_update(None, "foreign_keys", "ON")?;

    let transaction =
        SqlTransaction::new_unchecked(connection, rusqlite::TransactionBehavior::Exclusive)?;

    SQLiteUserStore::create_table(&transaction)?;
    SQLiteCategoryStore::create_table(&transaction)?;
    SQLiteTransactionStore::create_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}
