//! Implements a struct that holds the state of the REST server.

use std::sync::{Arc, Mutex};

use axum::extract::FromRef;
use rusqlite::Connection;

use crate::{
    Error,
    auth::JwtKeys,
    db::initialize,
    stores::sqlite::{SQLiteCategoryStore, SQLiteTransactionStore, SQLiteUserStore},
};

/// The state of the REST server.
///
/// All stores share one database connection; there is no other shared mutable
/// state between requests.
#[derive(Clone)]
pub struct AppState {
    /// The store for users.
    pub user_store: SQLiteUserStore,
    /// The store for transaction categories.
    pub category_store: SQLiteCategoryStore,
    /// The store for transactions.
    pub transaction_store: SQLiteTransactionStore,
    jwt_keys: JwtKeys,
}

impl AppState {
    /// Create a new [AppState] with a SQLite database connection.
    ///
    /// This function will initialize the database by adding the tables for
    /// the domain models.
    ///
    /// # Errors
    /// Returns an error if the database cannot be initialized.
    pub fn new(db_connection: Connection, jwt_secret: &str) -> Result<Self, Error> {
        initialize(&db_connection)?;

        let connection = Arc::new(Mutex::new(db_connection));

        Ok(Self {
            user_store: SQLiteUserStore::new(connection.clone()),
            category_store: SQLiteCategoryStore::new(connection.clone()),
            transaction_store: SQLiteTransactionStore::new(connection),
            jwt_keys: JwtKeys::from_secret(jwt_secret),
        })
    }

    /// The keys used to sign and verify auth tokens.
    pub fn jwt_keys(&self) -> &JwtKeys {
        &self.jwt_keys
    }
}

// This impl tells the claims extractor how to access the token keys from the
// router state.
impl FromRef<AppState> for JwtKeys {
    fn from_ref(state: &AppState) -> Self {
        state.jwt_keys.clone()
    }
}
