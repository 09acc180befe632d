//! Defines the app level error type and its conversion to HTTP responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The login does not exist or the password does not match.
    ///
    /// The two cases are reported identically so that a failed log-in does
    /// not reveal whether the login is registered.
    #[error("invalid login or password")]
    InvalidCredentials,

    /// The request did not carry an `Authorization: Bearer` header.
    ///
    /// This is a distinct condition from [Error::InvalidToken]: the client
    /// did not attempt to authenticate at all.
    #[error("no bearer token in the request")]
    MissingToken,

    /// The bearer token is malformed, has a bad signature, or has expired.
    #[error("the bearer token is invalid or expired")]
    InvalidToken,

    /// An auth token could not be signed.
    #[error("could not create an auth token")]
    TokenCreation,

    /// An unexpected error occurred in the underlying hashing library.
    ///
    /// The error string should only be logged for debugging on the server,
    /// never shown to the client.
    #[error("hashing failed: {0}")]
    HashingError(String),

    /// The login used for registration is already taken.
    #[error("the login is already taken")]
    DuplicateLogin,

    /// An empty string was used as a login.
    #[error("a login cannot be empty")]
    EmptyLogin,

    /// An empty string was used as a password.
    #[error("a password cannot be empty")]
    EmptyPassword,

    /// An empty string was used to create a category name.
    #[error("a category name cannot be empty")]
    EmptyCategoryName,

    /// An empty string was used to create a category color.
    #[error("a category color cannot be empty")]
    EmptyCategoryColor,

    /// A transaction amount of zero was supplied.
    ///
    /// A transaction records money moving, so a zero amount is rejected
    /// before it reaches the store.
    #[error("a transaction amount cannot be zero")]
    ZeroAmount,

    /// The category ID used to create a transaction did not refer to a valid
    /// category.
    #[error("the category ID does not refer to a valid category")]
    InvalidCategory,

    /// A category ID in a query parameter list could not be parsed.
    #[error("\"{0}\" is not a valid category ID")]
    InvalidCategoryId(String),

    /// A query referenced a row that does not exist.
    #[error("a query referenced a row that does not exist")]
    InvalidForeignKey,

    /// A page number below one was supplied.
    #[error("a page number must be one or greater")]
    InvalidPageNumber,

    /// A page size below one was supplied.
    #[error("a page size must be one or greater")]
    InvalidPageSize,

    /// A year of zero was supplied to the totals query.
    #[error("a year filter cannot be zero")]
    InvalidYear,

    /// The requested resource was not found.
    ///
    /// This is also the error reported when a resource exists but is owned by
    /// a different user, so that requests cannot confirm the existence of
    /// other users' resources.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            // Code 787 occurs when a FOREIGN KEY constraint failed.
            rusqlite::Error::SqliteFailure(sql_error, Some(_)) if sql_error.extended_code == 787 => {
                Error::InvalidForeignKey
            }
            // Code 2067 occurs when a UNIQUE constraint failed.
            rusqlite::Error::SqliteFailure(sql_error, Some(ref desc))
                if sql_error.extended_code == 2067 && desc.ends_with("user.login") =>
            {
                Error::DuplicateLogin
            }
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            Error::InvalidCredentials | Error::MissingToken | Error::InvalidToken => {
                (StatusCode::UNAUTHORIZED, self.to_string())
            }
            Error::NotFound => (StatusCode::NOT_FOUND, self.to_string()),
            Error::DuplicateLogin
            | Error::EmptyLogin
            | Error::EmptyPassword
            | Error::EmptyCategoryName
            | Error::EmptyCategoryColor
            | Error::ZeroAmount
            | Error::InvalidCategory
            | Error::InvalidCategoryId(_)
            | Error::InvalidForeignKey
            | Error::InvalidPageNumber
            | Error::InvalidPageSize
            | Error::InvalidYear => (StatusCode::BAD_REQUEST, self.to_string()),
            // Any errors that are not handled above are not intended to be
            // shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({ "error": error_message }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod error_tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use super::Error;

    #[test]
    fn maps_missing_rows_to_not_found() {
        let error = Error::from(rusqlite::Error::QueryReturnedNoRows);

        assert_eq!(error, Error::NotFound);
    }

    #[test]
    fn not_found_renders_as_404() {
        let response = Error::NotFound.into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn auth_failures_render_as_401() {
        for error in [
            Error::MissingToken,
            Error::InvalidToken,
            Error::InvalidCredentials,
        ] {
            let response = error.into_response();

            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        }
    }

    #[test]
    fn internal_errors_do_not_leak_details() {
        let response = Error::HashingError("bcrypt exploded".to_string()).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
