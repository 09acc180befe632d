//! Implements a SQLite backed transaction store.
//!
//! This is where the ledger queries are composed: the filtered, counted,
//! paginated list and the date/category scoped totals. Both build their SQL
//! from a list of `(clause, parameter)` pairs and render the positional
//! placeholder index of each clause from the length of the parameter list at
//! that point, so the statement and its parameters cannot drift apart.

use std::sync::{Arc, Mutex};

use rusqlite::{Connection, Row, params_from_iter, types::Value};

use crate::{
    Error,
    db::{CreateTable, MapRow},
    models::{DatabaseID, NewTransaction, Transaction, TransactionWithCategory, UserID},
    pagination::{PageWindow, PaginationResponse},
    stores::{
        TransactionStore,
        sqlite::SQLiteCategoryStore,
        transaction::{DateFilter, SumQuery},
    },
};

/// Stores transactions in a SQLite database.
///
/// Note that because a transaction depends on the [User](crate::models::User)
/// and [Category](crate::models::Category) models, these models must be set up
/// in the database.
#[derive(Debug, Clone)]
pub struct SQLiteTransactionStore {
    connection: Arc<Mutex<Connection>>,
}

/// The join used by the list query; the category columns become the embedded
/// snapshot on each returned row.
const FROM_WITH_CATEGORY: &str =
    "FROM \"transaction\" INNER JOIN category ON \"transaction\".category_id = category.id";

impl SQLiteTransactionStore {
    /// Create a new store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }
}

impl TransactionStore for SQLiteTransactionStore {
    /// Create a new transaction in the database.
    ///
    /// The database assigns the ID and the creation timestamp; the caller has
    /// already validated the amount and checked the category's owner.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::InvalidCategory] if the category does not exist,
    /// - [Error::SqlError] if there is some other SQL error.
    fn create(&self, new_transaction: NewTransaction) -> Result<Transaction, Error> {
        let transaction = self
            .connection
            .lock()
            .unwrap()
            .prepare(
                "INSERT INTO \"transaction\" (amount, category_id, user_id) VALUES (?1, ?2, ?3)
                 RETURNING id, amount, category_id, created_at, user_id",
            )?
            .query_row(
                (
                    new_transaction.amount(),
                    new_transaction.category_id(),
                    new_transaction.user_id().as_i64(),
                ),
                Self::map_row,
            )
            .map_err(|error| match error {
                // Code 787 occurs when a FOREIGN KEY constraint failed.
                // The caller tried to add a transaction for a non-existent category.
                rusqlite::Error::SqliteFailure(sql_error, Some(_))
                    if sql_error.extended_code == 787 =>
                {
                    Error::InvalidCategory
                }
                error => error.into(),
            })?;

        Ok(transaction)
    }

    /// Retrieve a transaction in the database by its `id`.
    ///
    /// The lookup is unscoped; the caller applies the ownership guard.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NotFound] if `id` does not refer to a valid transaction,
    /// - [Error::SqlError] if there is some other SQL error.
    fn get(&self, id: DatabaseID) -> Result<Transaction, Error> {
        let transaction = self
            .connection
            .lock()
            .unwrap()
            .prepare(
                "SELECT id, amount, category_id, created_at, user_id
                 FROM \"transaction\" WHERE id = ?1",
            )?
            .query_row([id], Self::map_row)?;

        Ok(transaction)
    }

    /// Overwrite the amount of an existing transaction.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NotFound] if `id` does not refer to a valid transaction,
    /// - [Error::SqlError] if there is some other SQL error.
    fn update_amount(&self, id: DatabaseID, amount: i64) -> Result<(), Error> {
        let rows_changed = self.connection.lock().unwrap().execute(
            "UPDATE \"transaction\" SET amount = ?1 WHERE id = ?2",
            (amount, id),
        )?;

        if rows_changed == 0 {
            Err(Error::NotFound)
        } else {
            Ok(())
        }
    }

    /// Permanently remove a transaction.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NotFound] if `id` does not refer to a valid transaction,
    /// - [Error::SqlError] if there is some other SQL error.
    fn delete(&self, id: DatabaseID) -> Result<(), Error> {
        let rows_changed = self
            .connection
            .lock()
            .unwrap()
            .execute("DELETE FROM \"transaction\" WHERE id = ?1", [id])?;

        if rows_changed == 0 {
            Err(Error::NotFound)
        } else {
            Ok(())
        }
    }

    /// Retrieve one page of `user_id`'s transactions with their category
    /// snapshots, most recent first.
    ///
    /// The owner predicate is always present; a non-empty `category_ids`
    /// appends a membership predicate, while an empty slice leaves the page
    /// unrestricted by category. The full filtered set is counted before the
    /// window is applied, so `count` does not change from page to page.
    ///
    /// # Errors
    /// This function will return an [Error::SqlError] if there is a SQL error.
    fn get_page(
        &self,
        user_id: UserID,
        category_ids: &[DatabaseID],
        window: PageWindow,
    ) -> Result<PaginationResponse<TransactionWithCategory>, Error> {
        let mut where_clauses = vec!["\"transaction\".user_id = ?1".to_string()];
        let mut params = vec![Value::from(user_id.as_i64())];

        if !category_ids.is_empty() {
            let placeholders: Vec<String> = (0..category_ids.len())
                .map(|index| format!("?{}", params.len() + index + 1))
                .collect();
            where_clauses.push(format!(
                "\"transaction\".category_id IN ({})",
                placeholders.join(", ")
            ));
            params.extend(category_ids.iter().map(|&category_id| Value::from(category_id)));
        }

        let filter = where_clauses.join(" AND ");

        let connection = self.connection.lock().unwrap();

        let count: i64 = connection
            .prepare(&format!("SELECT COUNT(*) {FROM_WITH_CATEGORY} WHERE {filter}"))?
            .query_row(params_from_iter(params.iter()), |row| row.get(0))?;

        // Sort by creation time, and then ID to keep the order of
        // transactions created in the same second stable.
        let page_query = format!(
            "SELECT \"transaction\".id, \"transaction\".amount, \"transaction\".category_id, \
             \"transaction\".created_at, \"transaction\".user_id, \
             category.id, category.user_id, category.name, category.color \
             {FROM_WITH_CATEGORY} WHERE {filter} \
             ORDER BY \"transaction\".created_at DESC, \"transaction\".id DESC \
             LIMIT ?{} OFFSET ?{}",
            params.len() + 1,
            params.len() + 2,
        );
        params.push(Value::from(window.limit as i64));
        params.push(Value::from(window.offset as i64));

        let items = connection
            .prepare(&page_query)?
            .query_map(params_from_iter(params.iter()), |row| {
                let transaction = Self::map_row(row)?;
                let category = SQLiteCategoryStore::map_row_with_offset(row, 5)?;

                Ok(TransactionWithCategory::new(transaction, category))
            })?
            .map(|maybe_item| maybe_item.map_err(Error::SqlError))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(PaginationResponse {
            items,
            count: count as u64,
        })
    }

    /// Sum the amounts of `user_id`'s transactions inside the query's
    /// calendar scope and optional category.
    ///
    /// The calendar parts are matched against `strftime` renderings of the
    /// creation timestamp: four digits for the year, two for the month and
    /// day. An empty matching set sums to zero.
    ///
    /// # Errors
    /// This function will return an [Error::SqlError] if there is a SQL error.
    fn sum(&self, user_id: UserID, query: SumQuery) -> Result<i64, Error> {
        let mut where_clauses = vec!["user_id = ?1".to_string()];
        let mut params = vec![Value::from(user_id.as_i64())];

        if let Some(category_id) = query.category_id {
            where_clauses.push(format!("category_id = ?{}", params.len() + 1));
            params.push(Value::from(category_id));
        }

        let (year, month, day) = match query.date {
            DateFilter::Year(year) => (year, None, None),
            DateFilter::YearMonth { year, month } => (year, Some(month), None),
            DateFilter::YearMonthDay { year, month, day } => (year, Some(month), Some(day)),
        };

        where_clauses.push(format!("strftime('%Y', created_at) = ?{}", params.len() + 1));
        params.push(Value::from(format!("{year:04}")));

        if let Some(month) = month {
            where_clauses.push(format!("strftime('%m', created_at) = ?{}", params.len() + 1));
            params.push(Value::from(format!("{month:02}")));
        }

        if let Some(day) = day {
            where_clauses.push(format!("strftime('%d', created_at) = ?{}", params.len() + 1));
            params.push(Value::from(format!("{day:02}")));
        }

        let sum_query = format!(
            "SELECT COALESCE(SUM(amount), 0) FROM \"transaction\" WHERE {}",
            where_clauses.join(" AND ")
        );

        let total = self
            .connection
            .lock()
            .unwrap()
            .prepare(&sum_query)?
            .query_row(params_from_iter(params.iter()), |row| row.get(0))?;

        Ok(total)
    }
}

impl CreateTable for SQLiteTransactionStore {
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        connection.execute(
            "CREATE TABLE IF NOT EXISTS \"transaction\" (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    amount INTEGER NOT NULL,
                    category_id INTEGER NOT NULL,
                    created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
                    user_id INTEGER NOT NULL,
                    FOREIGN KEY(category_id) REFERENCES category(id) ON UPDATE CASCADE ON DELETE CASCADE,
                    FOREIGN KEY(user_id) REFERENCES user(id)
                    )",
            (),
        )?;

        Ok(())
    }
}

impl MapRow for SQLiteTransactionStore {
    type ReturnType = Transaction;

    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self::ReturnType, rusqlite::Error> {
        let id = row.get(offset)?;
        let amount = row.get(offset + 1)?;
        let category_id = row.get(offset + 2)?;
        let created_at = row.get(offset + 3)?;
        let user_id = row.get(offset + 4)?;

        Ok(Transaction::new(
            id,
            amount,
            category_id,
            created_at,
            UserID::new(user_id),
        ))
    }
}
