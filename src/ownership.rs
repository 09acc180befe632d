//! The single enforcement point for the ownership invariant: a resource is
//! only visible and mutable to the user recorded as its owner.
//!
//! Handlers fetch a resource by ID without scoping, then pass it through
//! [authorize] before acting on it. A mismatch is reported as
//! [Error::NotFound], so a request for another user's resource is
//! indistinguishable from a request for a resource that does not exist.

use crate::{
    Error,
    models::{Category, Transaction, UserID},
};

/// A resource that records the user who owns it.
pub trait Owned {
    /// The ID of the user that owns this resource.
    fn owner(&self) -> UserID;
}

impl Owned for Category {
    fn owner(&self) -> UserID {
        self.user_id()
    }
}

impl Owned for Transaction {
    fn owner(&self) -> UserID {
        self.user_id()
    }
}

/// Check that `caller` owns `resource`, returning the resource on success.
///
/// # Errors
/// Returns [Error::NotFound] if the recorded owner is a different user.
pub fn authorize<R: Owned>(caller: UserID, resource: R) -> Result<R, Error> {
    if resource.owner() == caller {
        Ok(resource)
    } else {
        Err(Error::NotFound)
    }
}

#[cfg(test)]
mod ownership_tests {
    use crate::{
        Error,
        models::{Category, CategoryColor, CategoryName, UserID},
    };

    use super::authorize;

    fn category_owned_by(user_id: UserID) -> Category {
        Category::new(
            1,
            user_id,
            CategoryName::new_unchecked("Food"),
            CategoryColor::new_unchecked("#00ff00"),
        )
    }

    #[test]
    fn authorize_allows_the_owner() {
        let owner = UserID::new(7);
        let category = category_owned_by(owner);

        let result = authorize(owner, category.clone());

        assert_eq!(result, Ok(category));
    }

    #[test]
    fn authorize_reports_foreign_resources_as_not_found() {
        let category = category_owned_by(UserID::new(7));

        let result = authorize(UserID::new(8), category);

        assert_eq!(result, Err(Error::NotFound));
    }
}
