//! Implements a SQLite backed category store.

use std::sync::{Arc, Mutex};

use rusqlite::{Connection, Row};

use crate::{
    Error,
    db::{CreateTable, MapRow},
    models::{Category, CategoryColor, CategoryName, DatabaseID, UserID},
    stores::CategoryStore,
};

/// Stores transaction categories in a SQLite database.
///
/// Note that because a category belongs to a [User](crate::models::User), the
/// user table must be set up in the database first.
#[derive(Debug, Clone)]
pub struct SQLiteCategoryStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteCategoryStore {
    /// Create a new store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }
}

impl CategoryStore for SQLiteCategoryStore {
    /// Create a new category in the database.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::InvalidForeignKey] if `user_id` does not refer to a valid user,
    /// - [Error::SqlError] if there is some other SQL error.
    fn create(
        &self,
        name: CategoryName,
        color: CategoryColor,
        user_id: UserID,
    ) -> Result<Category, Error> {
        let category = self
            .connection
            .lock()
            .unwrap()
            .prepare(
                "INSERT INTO category (user_id, name, color) VALUES (?1, ?2, ?3)
                 RETURNING id, user_id, name, color",
            )?
            .query_row(
                (user_id.as_i64(), name.as_ref(), color.as_ref()),
                Self::map_row,
            )?;

        Ok(category)
    }

    /// Retrieve a category in the database by its `id`.
    ///
    /// The lookup is unscoped; the caller applies the ownership guard.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NotFound] if `id` does not refer to a valid category,
    /// - [Error::SqlError] if there is some other SQL error.
    fn get(&self, category_id: DatabaseID) -> Result<Category, Error> {
        let category = self
            .connection
            .lock()
            .unwrap()
            .prepare("SELECT id, user_id, name, color FROM category WHERE id = ?1")?
            .query_row([category_id], Self::map_row)?;

        Ok(category)
    }

    /// Retrieve all of `user_id`'s categories, in creation order.
    ///
    /// A user with no categories gets an empty list, not an error.
    ///
    /// # Errors
    /// This function will return an [Error::SqlError] if there is a SQL error.
    fn get_by_user(&self, user_id: UserID) -> Result<Vec<Category>, Error> {
        self.connection
            .lock()
            .unwrap()
            .prepare("SELECT id, user_id, name, color FROM category WHERE user_id = ?1 ORDER BY id ASC")?
            .query_map([user_id.as_i64()], Self::map_row)?
            .map(|maybe_category| maybe_category.map_err(Error::SqlError))
            .collect()
    }

    /// Overwrite the name and color of an existing category.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NotFound] if `category_id` does not refer to a valid category,
    /// - [Error::SqlError] if there is some other SQL error.
    fn update(
        &self,
        category_id: DatabaseID,
        name: CategoryName,
        color: CategoryColor,
    ) -> Result<(), Error> {
        let rows_changed = self.connection.lock().unwrap().execute(
            "UPDATE category SET name = ?1, color = ?2 WHERE id = ?3",
            (name.as_ref(), color.as_ref(), category_id),
        )?;

        if rows_changed == 0 {
            Err(Error::NotFound)
        } else {
            Ok(())
        }
    }

    /// Permanently remove a category and the transactions recorded against it.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NotFound] if `category_id` does not refer to a valid category,
    /// - [Error::SqlError] if there is some other SQL error.
    fn delete(&self, category_id: DatabaseID) -> Result<(), Error> {
        let rows_changed = self
            .connection
            .lock()
            .unwrap()
            .execute("DELETE FROM category WHERE id = ?1", [category_id])?;

        if rows_changed == 0 {
            Err(Error::NotFound)
        } else {
            Ok(())
        }
    }
}

impl CreateTable for SQLiteCategoryStore {
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        connection.execute(
            "CREATE TABLE IF NOT EXISTS category (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    user_id INTEGER NOT NULL,
                    name TEXT NOT NULL,
                    color TEXT NOT NULL,
                    FOREIGN KEY(user_id) REFERENCES user(id)
                    )",
            (),
        )?;

        Ok(())
    }
}

impl MapRow for SQLiteCategoryStore {
    type ReturnType = Category;

    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self::ReturnType, rusqlite::Error> {
        let id = row.get(offset)?;
        let user_id = row.get(offset + 1)?;
        let name: String = row.get(offset + 2)?;
        let color: String = row.get(offset + 3)?;

        Ok(Category::new(
            id,
            UserID::new(user_id),
            CategoryName::new_unchecked(&name),
            CategoryColor::new_unchecked(&color),
        ))
    }
}

#[cfg(test)]
mod sqlite_category_store_tests {
    use std::sync::{Arc, Mutex};

    use rusqlite::Connection;

    use crate::{
        Error,
        db::initialize,
        models::{CategoryColor, CategoryName, PasswordHash, UserID},
        stores::{CategoryStore, UserStore, sqlite::SQLiteUserStore},
    };

    use super::SQLiteCategoryStore;

    fn get_test_store() -> (SQLiteCategoryStore, UserID) {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();
        let connection = Arc::new(Mutex::new(connection));

        let user = SQLiteUserStore::new(connection.clone())
            .create("alice", PasswordHash::from_hash("hash".to_string()))
            .unwrap();

        (SQLiteCategoryStore::new(connection), user.id())
    }

    fn name(name: &str) -> CategoryName {
        CategoryName::new_unchecked(name)
    }

    fn color(color: &str) -> CategoryColor {
        CategoryColor::new_unchecked(color)
    }

    #[test]
    fn create_then_get() {
        let (store, user_id) = get_test_store();

        let created = store.create(name("Food"), color("#00ff00"), user_id).unwrap();
        let got = store.get(created.id()).unwrap();

        assert_eq!(created, got);
        assert_eq!(got.user_id(), user_id);
    }

    #[test]
    fn get_fails_on_invalid_id() {
        let (store, user_id) = get_test_store();
        let category = store.create(name("Food"), color("#00ff00"), user_id).unwrap();

        let result = store.get(category.id() + 654);

        assert_eq!(result, Err(Error::NotFound));
    }

    #[test]
    fn get_by_user_returns_categories_in_creation_order() {
        let (store, user_id) = get_test_store();
        let want = vec![
            store.create(name("Food"), color("#00ff00"), user_id).unwrap(),
            store
                .create(name("Transport"), color("#0000ff"), user_id)
                .unwrap(),
            store.create(name("Rent"), color("#ff0000"), user_id).unwrap(),
        ];

        let got = store.get_by_user(user_id).unwrap();

        assert_eq!(want, got);
    }

    #[test]
    fn get_by_user_ignores_other_users_categories() {
        let (store, user_id) = get_test_store();
        store.create(name("Food"), color("#00ff00"), user_id).unwrap();

        let got = store.get_by_user(UserID::new(user_id.as_i64() + 1)).unwrap();

        assert_eq!(got, Vec::new());
    }

    #[test]
    fn update_overwrites_name_and_color() {
        let (store, user_id) = get_test_store();
        let category = store.create(name("Food"), color("#00ff00"), user_id).unwrap();

        store
            .update(category.id(), name("Groceries"), color("#008800"))
            .unwrap();

        let got = store.get(category.id()).unwrap();
        assert_eq!(got.name().as_ref(), "Groceries");
        assert_eq!(got.color().as_ref(), "#008800");
        assert_eq!(got.user_id(), user_id);
    }

    #[test]
    fn update_fails_on_invalid_id() {
        let (store, _) = get_test_store();

        let result = store.update(999, name("Groceries"), color("#008800"));

        assert_eq!(result, Err(Error::NotFound));
    }

    #[test]
    fn delete_removes_the_category() {
        let (store, user_id) = get_test_store();
        let category = store.create(name("Food"), color("#00ff00"), user_id).unwrap();

        store.delete(category.id()).unwrap();

        assert_eq!(store.get(category.id()), Err(Error::NotFound));
    }

    #[test]
    fn delete_fails_on_invalid_id() {
        let (store, _) = get_test_store();

        let result = store.delete(999);

        assert_eq!(result, Err(Error::NotFound));
    }
}
