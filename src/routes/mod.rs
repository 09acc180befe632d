//! Application router configuration and the HTTP request handlers.
//!
//! Handlers are thin: they parse the request into the typed inputs the core
//! expects, swap any client-supplied owner for the identity carried in the
//! verified claims, and translate outcomes into responses via
//! [Error](crate::Error). Validation runs before any store call, and every
//! single-resource mutation goes through the fetch-then-authorize pattern of
//! [ownership](crate::ownership).

mod category;
mod transaction;
mod user;

use axum::{
    Router,
    routing::{get, post},
};

use crate::AppState;

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/user/register", post(user::register))
        .route("/user/log_in", post(user::log_in))
        .route("/user", get(user::get_current))
        .route(
            "/category",
            post(category::create)
                .get(category::list)
                .put(category::update)
                .delete(category::remove),
        )
        .route(
            "/transaction",
            post(transaction::create)
                .get(transaction::list)
                .put(transaction::update)
                .delete(transaction::remove),
        )
        .route("/transaction/total", get(transaction::total))
        .with_state(state)
}
