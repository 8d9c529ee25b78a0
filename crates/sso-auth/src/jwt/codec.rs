//! Issues and validates tokens signed with an application's secret.
//!
//! The verification key always comes from the application the caller
//! supplies, never from claims inside the token, so a token minted for one
//! application cannot pass validation for another.

use std::collections::HashSet;

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use tracing::debug;

use sso_core::error::AppError;
use sso_entity::{Application, User};

use super::claims::{Claims, TokenIdentity};

/// Creates and checks HS256 tokens scoped to one application.
#[derive(Debug, Clone)]
pub struct TokenCodec {
    /// Decode settings: HS256 only, expiry checked by the codec itself.
    validation: Validation,
}

impl TokenCodec {
    /// Creates a codec.
    pub fn new() -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is enforced after decoding so that `exp == now` counts as
        // expired and a missing `exp` surfaces as a malformed token.
        validation.validate_exp = false;
        validation.required_spec_claims = HashSet::new();
        validation.leeway = 0;

        Self { validation }
    }

    /// Signs a token for `user` on `app`, valid for `ttl` from now.
    pub fn issue(&self, user: &User, app: &Application, ttl: Duration) -> Result<String, AppError> {
        if ttl <= Duration::zero() {
            return Err(AppError::invalid_duration());
        }
        if !app.has_signing_key() {
            return Err(AppError::missing_signing_key());
        }

        let now = Utc::now();
        let expires_at = now
            .checked_add_signed(ttl)
            .ok_or_else(AppError::invalid_duration)?;
        let claims = Claims {
            uid: user.id.into(),
            email: user.email.clone(),
            app_id: app.id,
            iat: Some(now.timestamp()),
            exp: expires_at.timestamp(),
        };

        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(app.secret.as_bytes()),
        )
        .map_err(|e| AppError::infrastructure(format!("Failed to sign token: {e}")))?;

        debug!(user_id = %user.id, app_id = %app.id, exp = claims.exp, "Token issued");
        Ok(token)
    }

    /// Verifies `token` against `app`'s secret and returns the identity it carries.
    ///
    /// Checks, in order:
    /// 1. Signature and algorithm, using `app`'s secret
    /// 2. Claim shape
    /// 3. The token is scoped to `app`
    /// 4. Expiration
    pub fn validate(&self, token: &str, app: &Application) -> Result<TokenIdentity, AppError> {
        if !app.has_signing_key() {
            return Err(AppError::missing_signing_key());
        }

        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(app.secret.as_bytes()),
            &self.validation,
        )
        .map_err(map_decode_error)?;

        let claims = token_data.claims;

        if claims.app_id != app.id {
            return Err(AppError::invalid_signature(
                "Token was issued for a different application",
            ));
        }

        if claims.is_expired_at(Utc::now()) {
            return Err(AppError::expired());
        }

        claims.into_identity()
    }
}

impl Default for TokenCodec {
    fn default() -> Self {
        Self::new()
    }
}

fn map_decode_error(e: jsonwebtoken::errors::Error) -> AppError {
    match e.kind() {
        JwtErrorKind::InvalidSignature
        | JwtErrorKind::InvalidAlgorithm
        | JwtErrorKind::InvalidAlgorithmName => {
            AppError::invalid_signature("Invalid token signature")
        }
        JwtErrorKind::ExpiredSignature => AppError::expired(),
        JwtErrorKind::InvalidKeyFormat => {
            AppError::infrastructure(format!("Token verification failed: {e}"))
        }
        _ => AppError::malformed(format!("Malformed token: {e}")),
    }
}
