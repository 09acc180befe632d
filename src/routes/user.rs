//! Route handlers for registration, log-in, and the current user.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    auth::{Claims, encode_token},
    models::{PasswordHash, User},
    stores::UserStore,
};

/// The credentials sent to register or log in.
#[derive(Debug, Deserialize)]
pub(super) struct Credentials {
    login: String,
    password: String,
}

/// The response to a successful log-in.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct TokenResponse {
    /// A signed bearer token for the authenticated user.
    pub token: String,
}

/// A route handler for registering a new user.
pub(super) async fn register(
    State(state): State<AppState>,
    Json(credentials): Json<Credentials>,
) -> Result<Json<User>, Error> {
    if credentials.login.is_empty() {
        return Err(Error::EmptyLogin);
    }

    if credentials.password.is_empty() {
        return Err(Error::EmptyPassword);
    }

    let password_hash = PasswordHash::new(&credentials.password)?;
    let user = state.user_store.create(&credentials.login, password_hash)?;

    Ok(Json(user))
}

/// A route handler for exchanging credentials for an auth token.
///
/// An unknown login and a wrong password are reported identically so that
/// log-in attempts cannot probe which logins are registered.
pub(super) async fn log_in(
    State(state): State<AppState>,
    Json(credentials): Json<Credentials>,
) -> Result<Json<TokenResponse>, Error> {
    let user = state
        .user_store
        .get_by_login(&credentials.login)
        .map_err(|error| match error {
            Error::NotFound => Error::InvalidCredentials,
            error => error,
        })?;

    if !user.password_hash().verify(&credentials.password)? {
        return Err(Error::InvalidCredentials);
    }

    let token = encode_token(user.id(), state.jwt_keys())?;

    Ok(Json(TokenResponse { token }))
}

/// A route handler for getting the authenticated user.
pub(super) async fn get_current(
    State(state): State<AppState>,
    claims: Claims,
) -> Result<Json<User>, Error> {
    let user = state.user_store.get(claims.user_id)?;

    Ok(Json(user))
}
