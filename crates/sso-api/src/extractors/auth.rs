//! `BearerToken` extractor: pulls the raw token from the Authorization header.
//!
//! The token is not validated here because validation needs the target
//! application, which only the handler knows.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::TypedHeader;
use axum_extra::headers::Authorization;
use axum_extra::headers::authorization::Bearer;

use sso_core::error::AppError;

use crate::error::ApiError;

/// Raw bearer token from `Authorization: Bearer <token>`.
#[derive(Debug, Clone)]
pub struct BearerToken(pub String);

impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| AppError::malformed("missing or invalid bearer token"))?;

        let token = bearer.token().trim();
        if token.is_empty() {
            return Err(AppError::malformed("missing or invalid bearer token").into());
        }

        Ok(Self(token.to_string()))
    }
}
