//! Defines the transaction store trait and the query shapes it accepts.

use crate::{
    Error,
    models::{DatabaseID, NewTransaction, Transaction, TransactionWithCategory, UserID},
    pagination::{PageWindow, PaginationResponse},
};

/// Handles the creation, retrieval, and aggregation of transactions.
///
/// Lookups, updates, and deletes by ID are unscoped: callers are responsible
/// for passing the fetched row through
/// [authorize](crate::ownership::authorize) before acting on it. The list and
/// sum operations are scoped by a mandatory owner parameter instead, since
/// they never return rows to authorize individually.
pub trait TransactionStore {
    /// Create a new transaction in the store.
    ///
    /// The store assigns the ID and the creation timestamp.
    fn create(&self, new_transaction: NewTransaction) -> Result<Transaction, Error>;

    /// Retrieve a transaction by its ID.
    fn get(&self, id: DatabaseID) -> Result<Transaction, Error>;

    /// Overwrite the amount of an existing transaction.
    ///
    /// The amount is the only mutable field; the owner, category, and
    /// creation timestamp are fixed at creation.
    fn update_amount(&self, id: DatabaseID, amount: i64) -> Result<(), Error>;

    /// Permanently remove a transaction.
    fn delete(&self, id: DatabaseID) -> Result<(), Error>;

    /// Retrieve one page of `user_id`'s transactions, most recent first, with
    /// each row carrying a snapshot of its category.
    ///
    /// A non-empty `category_ids` restricts the page to those categories; an
    /// empty slice applies no category restriction. The envelope's `count` is
    /// the size of the full filtered set, independent of the page window.
    fn get_page(
        &self,
        user_id: UserID,
        category_ids: &[DatabaseID],
        window: PageWindow,
    ) -> Result<PaginationResponse<TransactionWithCategory>, Error>;

    /// Sum the amounts of `user_id`'s transactions matching `query`.
    ///
    /// An empty matching set sums to zero.
    fn sum(&self, user_id: UserID, query: SumQuery) -> Result<i64, Error>;
}

/// The calendar scope of a totals query.
///
/// The variants make the dependent-filter rule explicit: a day can only
/// narrow a month, and a month can only narrow a year. There is no
/// "year and day" shape, so the rule that a day filter without a month is
/// ignored falls out of [DateFilter::resolve] rather than being scattered
/// through query-building code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFilter {
    /// Transactions created in a calendar year.
    Year(i32),
    /// Transactions created in a calendar month of a year.
    YearMonth {
        /// The calendar year.
        year: i32,
        /// The calendar month, 1-12.
        month: u8,
    },
    /// Transactions created on a single day.
    YearMonthDay {
        /// The calendar year.
        year: i32,
        /// The calendar month, 1-12.
        month: u8,
        /// The day of the month, 1-31.
        day: u8,
    },
}

impl DateFilter {
    /// Build the filter from optional month and day parameters.
    ///
    /// A zero month or day is treated the same as an absent one, matching the
    /// wire format where clients send zero for "no filter". A day supplied
    /// without a month is silently ignored.
    pub fn resolve(year: i32, month: Option<u8>, day: Option<u8>) -> Self {
        let month = month.filter(|&month| month != 0);
        let day = day.filter(|&day| day != 0);

        match (month, day) {
            (None, _) => Self::Year(year),
            (Some(month), None) => Self::YearMonth { year, month },
            (Some(month), Some(day)) => Self::YearMonthDay { year, month, day },
        }
    }
}

/// The scope of a totals query: a calendar range and an optional category.
///
/// The category filter is independent of how fine the date filter is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SumQuery {
    /// The calendar range to sum over.
    pub date: DateFilter,
    /// Restrict the sum to a single category, if present.
    pub category_id: Option<DatabaseID>,
}

impl SumQuery {
    /// Build a totals query from raw request parameters.
    ///
    /// A zero category ID is treated the same as an absent one.
    ///
    /// # Errors
    /// Returns [Error::InvalidYear] if `year` is zero: the year filter is
    /// mandatory.
    pub fn new(
        year: i32,
        month: Option<u8>,
        day: Option<u8>,
        category_id: Option<DatabaseID>,
    ) -> Result<Self, Error> {
        if year == 0 {
            return Err(Error::InvalidYear);
        }

        Ok(Self {
            date: DateFilter::resolve(year, month, day),
            category_id: category_id.filter(|&id| id != 0),
        })
    }
}

#[cfg(test)]
mod date_filter_tests {
    use crate::Error;

    use super::{DateFilter, SumQuery};

    #[test]
    fn resolve_keeps_a_full_date() {
        let filter = DateFilter::resolve(2024, Some(3), Some(5));

        assert_eq!(
            filter,
            DateFilter::YearMonthDay {
                year: 2024,
                month: 3,
                day: 5
            }
        );
    }

    #[test]
    fn resolve_ignores_a_day_without_a_month() {
        let filter = DateFilter::resolve(2024, None, Some(5));

        assert_eq!(filter, DateFilter::Year(2024));
    }

    #[test]
    fn resolve_treats_a_zero_month_as_absent() {
        let filter = DateFilter::resolve(2024, Some(0), Some(5));

        assert_eq!(filter, DateFilter::Year(2024));
    }

    #[test]
    fn resolve_treats_a_zero_day_as_absent() {
        let filter = DateFilter::resolve(2024, Some(3), Some(0));

        assert_eq!(
            filter,
            DateFilter::YearMonth {
                year: 2024,
                month: 3
            }
        );
    }

    #[test]
    fn sum_query_rejects_a_zero_year() {
        let result = SumQuery::new(0, None, None, None);

        assert_eq!(result, Err(Error::InvalidYear));
    }

    #[test]
    fn sum_query_treats_a_zero_category_as_absent() {
        let query = SumQuery::new(2024, None, None, Some(0)).unwrap();

        assert_eq!(query.category_id, None);
    }
}
