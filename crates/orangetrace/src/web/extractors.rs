//! Custom Axum extractors.
//!
//! - [`UserIdentity`]: the caller's user id from the `x-user-id` header
//! - [`IdempotencyKey`]: optional `Idempotency-Key` header

use super::error::ApiError;
use crate::model::UserId;
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::request::Parts,
};

pub const USER_ID_HEADER: &str = "x-user-id";
pub const IDEMPOTENCY_KEY_HEADER: &str = "idempotency-key";

fn header_value(parts: &Parts, name: &str) -> Option<String> {
    parts
        .headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// The authenticated caller. Requests without it are rejected with 401.
///
/// Identity is asserted by the gateway in front of this service.
///
/// ```ignore
/// async fn handler(UserIdentity(user_id): UserIdentity) -> String {
///     format!("Hello {user_id}")
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct UserIdentity(pub UserId);

#[async_trait]
impl<S> FromRequestParts<S> for UserIdentity
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        header_value(parts, USER_ID_HEADER)
            .map(|id| Self(UserId(id)))
            .ok_or_else(ApiError::unauthenticated)
    }
}

/// Client-chosen key that makes a request safe to retry.
#[derive(Debug, Clone, PartialEq)]
pub struct IdempotencyKey(pub Option<String>);

#[async_trait]
impl<S> FromRequestParts<S> for IdempotencyKey
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(header_value(parts, IDEMPOTENCY_KEY_HEADER)))
    }
}
