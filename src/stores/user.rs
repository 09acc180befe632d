//! Defines the user store trait.

use crate::{
    Error,
    models::{PasswordHash, User, UserID},
};

/// Handles the creation and retrieval of users.
///
/// Users are never updated or deleted through this store.
pub trait UserStore {
    /// Create a new user and add it to the store.
    fn create(&self, login: &str, password_hash: PasswordHash) -> Result<User, Error>;

    /// Get a user by their ID.
    fn get(&self, id: UserID) -> Result<User, Error>;

    /// Get a user by their unique login.
    fn get_by_login(&self, login: &str) -> Result<User, Error>;
}
