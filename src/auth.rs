//! Stateless JWT authentication: token creation, verification, and the
//! extractor that turns a bearer header into a verified caller identity.
//!
//! The token is the sole source of truth for who is calling; every store
//! operation is scoped by the user ID carried in the verified claims, never
//! by anything the client submits in a request body.

use axum::{
    RequestPartsExt,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

use crate::{Error, models::UserID};

/// How long an auth token stays valid after it is issued.
pub const TOKEN_DURATION: Duration = Duration::hours(9);

/// The pair of keys used to sign and verify auth tokens.
///
/// Both keys are derived from one secret; the split exists because
/// `jsonwebtoken` uses distinct key types for the two directions.
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl JwtKeys {
    /// Derive the signing and verification keys from a secret.
    pub fn from_secret(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_ref()),
            decoding: DecodingKey::from_secret(secret.as_ref()),
        }
    }

    /// The key for signing new tokens.
    pub fn encoding(&self) -> &EncodingKey {
        &self.encoding
    }

    /// The key for verifying presented tokens.
    pub fn decoding(&self) -> &DecodingKey {
        &self.decoding
    }
}

/// The contents of an auth token.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// The ID of the authenticated user.
    pub user_id: UserID,
    /// The expiry time of the token as a unix timestamp.
    pub exp: usize,
    /// The time the token was issued as a unix timestamp.
    pub iat: usize,
}

/// Create a signed token for `user_id` that expires after [TOKEN_DURATION].
///
/// # Errors
/// Returns [Error::TokenCreation] if signing fails.
pub fn encode_token(user_id: UserID, keys: &JwtKeys) -> Result<String, Error> {
    let now = OffsetDateTime::now_utc();
    let claims = Claims {
        user_id,
        exp: (now + TOKEN_DURATION).unix_timestamp() as usize,
        iat: now.unix_timestamp() as usize,
    };

    encode(&Header::default(), &claims, keys.encoding()).map_err(|_| Error::TokenCreation)
}

/// Verify a presented token and return its claims.
///
/// Expired, unsigned, or otherwise malformed tokens are all reported as
/// [Error::InvalidToken]; verification never panics on attacker-controlled
/// input.
pub fn decode_token(token: &str, keys: &JwtKeys) -> Result<Claims, Error> {
    decode::<Claims>(token, keys.decoding(), &Validation::default())
        .map(|token_data| token_data.claims)
        .map_err(|_| Error::InvalidToken)
}

impl<S> FromRequestParts<S> for Claims
where
    JwtKeys: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .map_err(|rejection| {
                if rejection.is_missing() {
                    Error::MissingToken
                } else {
                    Error::InvalidToken
                }
            })?;

        let keys = JwtKeys::from_ref(state);

        decode_token(bearer.token(), &keys)
    }
}

#[cfg(test)]
mod auth_tests {
    use jsonwebtoken::{Header, encode};
    use time::OffsetDateTime;

    use crate::{Error, models::UserID};

    use super::{Claims, JwtKeys, decode_token, encode_token};

    fn keys() -> JwtKeys {
        JwtKeys::from_secret("a-test-secret")
    }

    #[test]
    fn decode_returns_the_encoded_user_id() {
        let keys = keys();
        let token = encode_token(UserID::new(42), &keys).unwrap();

        let claims = decode_token(&token, &keys).unwrap();

        assert_eq!(claims.user_id, UserID::new(42));
    }

    #[test]
    fn decode_rejects_an_expired_token() {
        let keys = keys();
        let now = OffsetDateTime::now_utc().unix_timestamp();
        let stale_claims = Claims {
            user_id: UserID::new(42),
            exp: (now - 7200) as usize,
            iat: (now - 7260) as usize,
        };
        let token = encode(&Header::default(), &stale_claims, keys.encoding()).unwrap();

        let result = decode_token(&token, &keys);

        assert_eq!(result.unwrap_err(), Error::InvalidToken);
    }

    #[test]
    fn decode_rejects_a_token_signed_with_another_secret() {
        let token = encode_token(UserID::new(42), &JwtKeys::from_secret("other")).unwrap();

        let result = decode_token(&token, &keys());

        assert_eq!(result.unwrap_err(), Error::InvalidToken);
    }

    #[test]
    fn decode_rejects_garbage_input() {
        let result = decode_token("not-a-token", &keys());

        assert_eq!(result.unwrap_err(), Error::InvalidToken);
    }
}
