//! This file defines the `Category` type and the types needed to create one.
//! A category groups transactions for filtering and aggregation; a transaction
//! always belongs to exactly one category.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::{
    Error,
    models::{DatabaseID, UserID},
};

/// The name of a category.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct CategoryName(String);

impl CategoryName {
    /// Create a category name.
    ///
    /// # Errors
    /// This function will return an error if `name` is an empty string.
    pub fn new(name: &str) -> Result<Self, Error> {
        if name.is_empty() {
            Err(Error::EmptyCategoryName)
        } else {
            Ok(Self(name.to_string()))
        }
    }

    /// Create a category name without validation.
    ///
    /// The caller should ensure that the string is not empty.
    pub fn new_unchecked(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl AsRef<str> for CategoryName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for CategoryName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The display color of a category, e.g. a hex code like `#ff8800`.
///
/// Only non-emptiness is validated; the client decides how to interpret the
/// string.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct CategoryColor(String);

impl CategoryColor {
    /// Create a category color.
    ///
    /// # Errors
    /// This function will return an error if `color` is an empty string.
    pub fn new(color: &str) -> Result<Self, Error> {
        if color.is_empty() {
            Err(Error::EmptyCategoryColor)
        } else {
            Ok(Self(color.to_string()))
        }
    }

    /// Create a category color without validation.
    ///
    /// The caller should ensure that the string is not empty.
    pub fn new_unchecked(color: &str) -> Self {
        Self(color.to_string())
    }
}

impl AsRef<str> for CategoryColor {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for CategoryColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A category for expenses, e.g. 'Groceries', 'Eating Out', 'Transport'.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct Category {
    id: DatabaseID,
    user_id: UserID,
    name: CategoryName,
    color: CategoryColor,
}

impl Category {
    /// Create a new category.
    pub fn new(id: DatabaseID, user_id: UserID, name: CategoryName, color: CategoryColor) -> Self {
        Self {
            id,
            user_id,
            name,
            color,
        }
    }

    /// The ID of the category.
    pub fn id(&self) -> DatabaseID {
        self.id
    }

    /// The ID of the user that owns the category.
    pub fn user_id(&self) -> UserID {
        self.user_id
    }

    /// The name of the category.
    pub fn name(&self) -> &CategoryName {
        &self.name
    }

    /// The display color of the category.
    pub fn color(&self) -> &CategoryColor {
        &self.color
    }
}

#[cfg(test)]
mod category_name_tests {
    use crate::{
        Error,
        models::category::{CategoryColor, CategoryName},
    };

    #[test]
    fn name_fails_on_empty_string() {
        let category_name = CategoryName::new("");

        assert_eq!(category_name, Err(Error::EmptyCategoryName));
    }

    #[test]
    fn name_succeeds_on_non_empty_string() {
        let category_name = CategoryName::new("🔥");

        assert!(category_name.is_ok())
    }

    #[test]
    fn color_fails_on_empty_string() {
        let category_color = CategoryColor::new("");

        assert_eq!(category_color, Err(Error::EmptyCategoryColor));
    }

    #[test]
    fn color_succeeds_on_non_empty_string() {
        let category_color = CategoryColor::new("#ff8800");

        assert!(category_color.is_ok())
    }
}
