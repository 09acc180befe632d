//! Defines the category store trait.

use crate::{
    Error,
    models::{Category, CategoryColor, CategoryName, DatabaseID, UserID},
};

/// Handles the creation and retrieval of transaction categories.
///
/// Lookups and deletes by ID are unscoped: callers are responsible for
/// passing the fetched row through [authorize](crate::ownership::authorize)
/// before acting on it.
pub trait CategoryStore {
    /// Create a new category and add it to the store.
    fn create(
        &self,
        name: CategoryName,
        color: CategoryColor,
        user_id: UserID,
    ) -> Result<Category, Error>;

    /// Get a category by its ID.
    fn get(&self, category_id: DatabaseID) -> Result<Category, Error>;

    /// Get all categories belonging to `user_id`, in creation order.
    fn get_by_user(&self, user_id: UserID) -> Result<Vec<Category>, Error>;

    /// Overwrite the name and color of an existing category.
    fn update(
        &self,
        category_id: DatabaseID,
        name: CategoryName,
        color: CategoryColor,
    ) -> Result<(), Error>;

    /// Permanently remove a category.
    ///
    /// Transactions recorded against the category are removed with it.
    fn delete(&self, category_id: DatabaseID) -> Result<(), Error>;
}
