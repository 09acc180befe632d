//! This file defines a user of the application and its supporting types.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::Error;

/// A newtype wrapper for integer user IDs.
///
/// This helps disambiguate user IDs from other types of IDs, leading to better
/// compile time errors, and lets the ownership guard compare owners without
/// accidentally accepting a category or transaction ID.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserID(i64);

impl UserID {
    /// Create a user ID from a raw database ID.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// The underlying integer ID.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl Display for UserID {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// A bcrypt hash of a user's password.
///
/// The raw password is only ever seen by [PasswordHash::new] and
/// [PasswordHash::verify]; everything else in the application handles the
/// opaque hash string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Hash a raw password.
    ///
    /// # Errors
    /// Returns [Error::HashingError] if the underlying hashing library fails.
    /// The error string should only be logged on the server, never shown to
    /// the client.
    pub fn new(raw_password: &str) -> Result<Self, Error> {
        bcrypt::hash(raw_password, bcrypt::DEFAULT_COST)
            .map(Self)
            .map_err(|error| Error::HashingError(error.to_string()))
    }

    /// Wrap a hash string that was previously produced by [PasswordHash::new],
    /// e.g. one read back from the database.
    pub fn from_hash(hash: String) -> Self {
        Self(hash)
    }

    /// Check a raw password against this hash.
    ///
    /// # Errors
    /// Returns [Error::HashingError] if the stored hash cannot be parsed.
    pub fn verify(&self, raw_password: &str) -> Result<bool, Error> {
        bcrypt::verify(raw_password, &self.0)
            .map_err(|error| Error::HashingError(error.to_string()))
    }
}

impl AsRef<str> for PasswordHash {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A user of the application.
///
/// Users are created once at registration and are never mutated or deleted
/// afterwards. Every category and transaction records the ID of the user that
/// owns it.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct User {
    id: UserID,
    login: String,
    #[serde(skip_serializing)]
    password_hash: PasswordHash,
}

impl User {
    /// Create a user from its stored parts.
    pub fn new(id: UserID, login: String, password_hash: PasswordHash) -> Self {
        Self {
            id,
            login,
            password_hash,
        }
    }

    /// The user's ID in the database.
    pub fn id(&self) -> UserID {
        self.id
    }

    /// The unique login name the user registered with.
    pub fn login(&self) -> &str {
        &self.login
    }

    /// The hash of the user's password.
    pub fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }
}
