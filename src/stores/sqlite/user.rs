//! Implements a SQLite backed user store.

use std::sync::{Arc, Mutex};

use rusqlite::{Connection, Row};

use crate::{
    Error,
    db::{CreateTable, MapRow},
    models::{PasswordHash, User, UserID},
    stores::UserStore,
};

/// Stores users in a SQLite database.
#[derive(Debug, Clone)]
pub struct SQLiteUserStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteUserStore {
    /// Create a new store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }
}

impl UserStore for SQLiteUserStore {
    /// Create a new user in the database.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::DuplicateLogin] if `login` is already registered,
    /// - [Error::SqlError] if there is some other SQL error.
    fn create(&self, login: &str, password_hash: PasswordHash) -> Result<User, Error> {
        let user = self
            .connection
            .lock()
            .unwrap()
            .prepare(
                "INSERT INTO user (login, password_hash) VALUES (?1, ?2)
                 RETURNING id, login, password_hash",
            )?
            .query_row((login, password_hash.as_ref()), Self::map_row)?;

        Ok(user)
    }

    /// Retrieve a user from the database by their `id`.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NotFound] if `id` does not refer to a valid user,
    /// - [Error::SqlError] if there is some other SQL error.
    fn get(&self, id: UserID) -> Result<User, Error> {
        let user = self
            .connection
            .lock()
            .unwrap()
            .prepare("SELECT id, login, password_hash FROM user WHERE id = ?1")?
            .query_row([id.as_i64()], Self::map_row)?;

        Ok(user)
    }

    /// Retrieve a user from the database by their unique `login`.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NotFound] if no user registered with `login`,
    /// - [Error::SqlError] if there is some other SQL error.
    fn get_by_login(&self, login: &str) -> Result<User, Error> {
        let user = self
            .connection
            .lock()
            .unwrap()
            .prepare("SELECT id, login, password_hash FROM user WHERE login = ?1")?
            .query_row([login], Self::map_row)?;

        Ok(user)
    }
}

impl CreateTable for SQLiteUserStore {
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        connection.execute(
            "CREATE TABLE IF NOT EXISTS user (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    login TEXT UNIQUE NOT NULL,
                    password_hash TEXT NOT NULL
                    )",
            (),
        )?;

        Ok(())
    }
}

impl MapRow for SQLiteUserStore {
    type ReturnType = User;

    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self::ReturnType, rusqlite::Error> {
        let id = row.get(offset)?;
        let login = row.get(offset + 1)?;
        let password_hash: String = row.get(offset + 2)?;

        Ok(User::new(
            UserID::new(id),
            login,
            PasswordHash::from_hash(password_hash),
        ))
    }
}
