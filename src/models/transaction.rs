//! This file defines the `Transaction` type, the validated input type for
//! creating one, and the joined row type returned by ledger queries.

use serde::{Deserialize, Serialize};
use time::PrimitiveDateTime;

use crate::{
    Error,
    models::{Category, DatabaseID, UserID},
};

/// An amount of money spent or earned, recorded against a category.
///
/// Amounts are integer minor units (e.g. cents); the application performs no
/// currency conversion or rounding. The creation timestamp is assigned by the
/// store at insert time and is immutable afterwards, as are the owner and the
/// category. Only the amount of an existing transaction can be changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    id: DatabaseID,
    amount: i64,
    category_id: DatabaseID,
    created_at: PrimitiveDateTime,
    user_id: UserID,
}

impl Transaction {
    /// Create a transaction from its stored parts.
    pub fn new(
        id: DatabaseID,
        amount: i64,
        category_id: DatabaseID,
        created_at: PrimitiveDateTime,
        user_id: UserID,
    ) -> Self {
        Self {
            id,
            amount,
            category_id,
            created_at,
            user_id,
        }
    }

    /// The ID of the transaction.
    pub fn id(&self) -> DatabaseID {
        self.id
    }

    /// The amount of money, in integer minor units.
    pub fn amount(&self) -> i64 {
        self.amount
    }

    /// The ID of the category the transaction was recorded against.
    pub fn category_id(&self) -> DatabaseID {
        self.category_id
    }

    /// When the transaction was inserted into the store (UTC).
    pub fn created_at(&self) -> PrimitiveDateTime {
        self.created_at
    }

    /// The ID of the user that owns the transaction.
    pub fn user_id(&self) -> UserID {
        self.user_id
    }
}

/// The validated input for creating a transaction.
///
/// Constructing a `NewTransaction` checks everything that can be checked
/// without a database round-trip; whether the category exists and belongs to
/// the same user is checked by the caller against the category store before
/// the insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTransaction {
    amount: i64,
    category_id: DatabaseID,
    user_id: UserID,
}

impl NewTransaction {
    /// Validate the parts of a new transaction.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::ZeroAmount] if `amount` is zero,
    /// - [Error::InvalidCategory] if `category_id` is zero.
    pub fn new(amount: i64, category_id: DatabaseID, user_id: UserID) -> Result<Self, Error> {
        if amount == 0 {
            return Err(Error::ZeroAmount);
        }

        if category_id == 0 {
            return Err(Error::InvalidCategory);
        }

        Ok(Self {
            amount,
            category_id,
            user_id,
        })
    }

    /// The amount of money, in integer minor units.
    pub fn amount(&self) -> i64 {
        self.amount
    }

    /// The ID of the category the transaction is recorded against.
    pub fn category_id(&self) -> DatabaseID {
        self.category_id
    }

    /// The ID of the user that will own the transaction.
    pub fn user_id(&self) -> UserID {
        self.user_id
    }
}

/// A transaction with a snapshot of its category's name and color.
///
/// Returned by ledger list queries, which join the category in rather than
/// fetching it separately. The snapshot reflects the category as of read time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionWithCategory {
    id: DatabaseID,
    amount: i64,
    category_id: DatabaseID,
    created_at: PrimitiveDateTime,
    user_id: UserID,
    category: Category,
}

impl TransactionWithCategory {
    /// Pair a transaction with the category it was read alongside.
    pub fn new(transaction: Transaction, category: Category) -> Self {
        Self {
            id: transaction.id(),
            amount: transaction.amount(),
            category_id: transaction.category_id(),
            created_at: transaction.created_at(),
            user_id: transaction.user_id(),
            category,
        }
    }

    /// The ID of the transaction.
    pub fn id(&self) -> DatabaseID {
        self.id
    }

    /// The amount of money, in integer minor units.
    pub fn amount(&self) -> i64 {
        self.amount
    }

    /// The ID of the category the transaction was recorded against.
    pub fn category_id(&self) -> DatabaseID {
        self.category_id
    }

    /// When the transaction was inserted into the store (UTC).
    pub fn created_at(&self) -> PrimitiveDateTime {
        self.created_at
    }

    /// The ID of the user that owns the transaction.
    pub fn user_id(&self) -> UserID {
        self.user_id
    }

    /// The joined category snapshot.
    pub fn category(&self) -> &Category {
        &self.category
    }
}
