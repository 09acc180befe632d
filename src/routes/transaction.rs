//! Route handlers for the transaction ledger: create, list, update, delete,
//! and the date/category scoped totals endpoint.

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    auth::Claims,
    models::{DatabaseID, NewTransaction, Transaction, TransactionWithCategory},
    ownership::authorize,
    pagination::{Pagination, PaginationResponse},
    stores::{CategoryStore, SumQuery, TransactionStore},
};

/// The payload for creating a transaction.
#[derive(Debug, Deserialize)]
pub(super) struct NewTransactionRequest {
    amount: i64,
    category_id: DatabaseID,
}

/// The payload for overwriting a transaction's amount.
#[derive(Debug, Deserialize)]
pub(super) struct UpdateTransactionRequest {
    id: DatabaseID,
    amount: i64,
}

/// The payload for deleting a transaction.
#[derive(Debug, Deserialize)]
pub(super) struct DeleteTransactionRequest {
    id: DatabaseID,
}

/// The query parameters of the list endpoint.
#[derive(Debug, Deserialize)]
pub(super) struct ListParams {
    /// Comma-separated category IDs; absent or empty means no restriction.
    category_ids: Option<String>,
    /// The 1-based page number.
    page: u64,
    /// The page size.
    items: u64,
}

/// The query parameters of the totals endpoint.
#[derive(Debug, Deserialize)]
pub(super) struct TotalParams {
    year: i32,
    month: Option<u8>,
    day: Option<u8>,
    category_id: Option<DatabaseID>,
}

/// The response of the totals endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct TotalResponse {
    /// The summed amount in integer minor units.
    pub total: i64,
}

/// A route handler for creating a new transaction.
///
/// The transaction is owned by the authenticated user regardless of the
/// payload, and the category must already belong to that same user: a
/// category that does not exist and a category owned by someone else are
/// both reported as not found.
pub(super) async fn create(
    State(state): State<AppState>,
    claims: Claims,
    Json(payload): Json<NewTransactionRequest>,
) -> Result<Json<Transaction>, Error> {
    let new_transaction =
        NewTransaction::new(payload.amount, payload.category_id, claims.user_id)?;

    let category = state.category_store.get(payload.category_id)?;
    authorize(claims.user_id, category)?;

    let transaction = state.transaction_store.create(new_transaction)?;

    Ok(Json(transaction))
}

/// A route handler for listing one page of the caller's transactions.
pub(super) async fn list(
    State(state): State<AppState>,
    claims: Claims,
    Query(params): Query<ListParams>,
) -> Result<Json<PaginationResponse<TransactionWithCategory>>, Error> {
    let category_ids = parse_category_ids(params.category_ids.as_deref())?;
    let pagination = Pagination::new(params.page, params.items)?;

    let page = state
        .transaction_store
        .get_page(claims.user_id, &category_ids, pagination.window())?;

    Ok(Json(page))
}

/// A route handler for overwriting a transaction's amount.
pub(super) async fn update(
    State(state): State<AppState>,
    claims: Claims,
    Json(payload): Json<UpdateTransactionRequest>,
) -> Result<StatusCode, Error> {
    if payload.amount == 0 {
        return Err(Error::ZeroAmount);
    }

    let transaction = state.transaction_store.get(payload.id)?;
    let transaction = authorize(claims.user_id, transaction)?;

    state
        .transaction_store
        .update_amount(transaction.id(), payload.amount)?;

    Ok(StatusCode::OK)
}

/// A route handler for deleting a transaction.
pub(super) async fn remove(
    State(state): State<AppState>,
    claims: Claims,
    Json(payload): Json<DeleteTransactionRequest>,
) -> Result<StatusCode, Error> {
    let transaction = state.transaction_store.get(payload.id)?;
    let transaction = authorize(claims.user_id, transaction)?;

    state.transaction_store.delete(transaction.id())?;

    Ok(StatusCode::OK)
}

/// A route handler for summing the caller's transactions in a calendar scope.
pub(super) async fn total(
    State(state): State<AppState>,
    claims: Claims,
    Query(params): Query<TotalParams>,
) -> Result<Json<TotalResponse>, Error> {
    let query = SumQuery::new(params.year, params.month, params.day, params.category_id)?;

    let total = state.transaction_store.sum(claims.user_id, query)?;

    Ok(Json(TotalResponse { total }))
}

/// Parse a comma-separated list of category IDs.
///
/// An absent or empty parameter is an empty list, which the store treats as
/// "no category restriction".
fn parse_category_ids(raw: Option<&str>) -> Result<Vec<DatabaseID>, Error> {
    let raw = match raw {
        Some(raw) if !raw.is_empty() => raw,
        _ => return Ok(Vec::new()),
    };

    raw.split(',')
        .map(|part| {
            part.trim()
                .parse::<DatabaseID>()
                .map_err(|_| Error::InvalidCategoryId(part.to_string()))
        })
        .collect()
}
