//! Defines the application's domain models and their validation rules.

mod category;
mod transaction;
mod user;

pub use category::{Category, CategoryColor, CategoryName};
pub use transaction::{NewTransaction, Transaction, TransactionWithCategory};
pub use user::{PasswordHash, User, UserID};

/// An alias for the integer IDs the database assigns to rows.
pub type DatabaseID = i64;
