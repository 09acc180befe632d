//! Expenseur is a JSON REST API for tracking personal expenses.
//!
//! Each user records transactions against their own categories and reads them
//! back through filtered, paginated ledger queries and date/category scoped
//! totals. A stateless bearer token identifies the caller, and every read and
//! write is scoped to the resources that caller owns.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

mod app_state;
pub mod auth;
pub mod db;
mod error;
pub mod models;
pub mod ownership;
pub mod pagination;
mod routes;
pub mod stores;

pub use app_state::AppState;
pub use error::Error;
pub use routes::build_router;

/// An async task that waits for either the ctrl+c or terminate signal,
/// whichever comes first, and then signals the server to shut down
/// gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}
