//! Claims embedded in every token.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use sso_core::error::AppError;
use sso_core::{AppId, UserId};

/// JWT claims payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// The user the token was issued to.
    pub uid: UserIdClaim,
    /// The user's email at issuance.
    pub email: String,
    /// The application the token is scoped to.
    pub app_id: AppId,
    /// Issued-at timestamp (seconds since epoch).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

/// The `uid` claim as it appears on the wire.
///
/// Older issuers wrote the user ID as a string, so both shapes decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserIdClaim {
    /// `"uid": 42`
    Numeric(i64),
    /// `"uid": "42"`
    Text(String),
}

impl UserIdClaim {
    /// Normalizes the claim to a [`UserId`].
    pub fn to_user_id(&self) -> Result<UserId, AppError> {
        match self {
            Self::Numeric(id) => Ok(UserId(*id)),
            Self::Text(raw) => raw
                .parse::<UserId>()
                .map_err(|_| AppError::malformed(format!("uid claim is not numeric: '{raw}'"))),
        }
    }
}

impl From<UserId> for UserIdClaim {
    fn from(id: UserId) -> Self {
        Self::Numeric(id.get())
    }
}

/// The identity carried by a token that passed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenIdentity {
    /// Authenticated user.
    pub user_id: UserId,
    /// Email embedded at issuance.
    pub email: String,
    /// Application the token is valid for.
    pub app_id: AppId,
    /// When the token stops being valid.
    pub expires_at: DateTime<Utc>,
}

impl Claims {
    /// Returns the expiration as a `DateTime<Utc>`.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }

    /// Checks whether the token is expired at `now`. Expiry is exclusive:
    /// a token whose `exp` equals `now` is already expired.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.exp <= now.timestamp()
    }

    /// Converts decoded claims into a normalized identity.
    pub fn into_identity(self) -> Result<TokenIdentity, AppError> {
        let user_id = self.uid.to_user_id()?;
        let expires_at = self
            .expires_at()
            .ok_or_else(|| AppError::malformed("exp claim is out of range"))?;

        Ok(TokenIdentity {
            user_id,
            email: self.email,
            app_id: self.app_id,
            expires_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sso_core::error::ErrorKind;

    #[test]
    fn test_uid_decodes_from_number_and_string() {
        let numeric: Claims =
            serde_json::from_str(r#"{"uid":42,"email":"a@x.com","app_id":7,"exp":100}"#).unwrap();
        let text: Claims =
            serde_json::from_str(r#"{"uid":"42","email":"a@x.com","app_id":7,"exp":100}"#)
                .unwrap();

        assert_eq!(numeric.uid.to_user_id().unwrap(), UserId(42));
        assert_eq!(text.uid.to_user_id().unwrap(), UserId(42));
    }

    #[test]
    fn test_non_numeric_uid_is_malformed() {
        let claims: Claims =
            serde_json::from_str(r#"{"uid":"alice","email":"a@x.com","app_id":7,"exp":100}"#)
                .unwrap();
        assert_eq!(claims.into_identity().unwrap_err().kind, ErrorKind::Malformed);
    }

    #[test]
    fn test_uid_serializes_as_number() {
        let claims = Claims {
            uid: UserId(3).into(),
            email: "a@x.com".to_string(),
            app_id: AppId(7),
            iat: None,
            exp: 100,
        };
        let json = serde_json::to_value(&claims).unwrap();
        assert_eq!(json["uid"], 3);
        assert!(json.get("iat").is_none());
    }

    #[test]
    fn test_expiry_boundary_is_expired() {
        let now = Utc::now();
        let claims = Claims {
            uid: UserIdClaim::Numeric(1),
            email: String::new(),
            app_id: AppId(1),
            iat: None,
            exp: now.timestamp(),
        };
        assert!(claims.is_expired_at(now));
        assert!(!claims.is_expired_at(now - chrono::Duration::seconds(1)));
    }
}
