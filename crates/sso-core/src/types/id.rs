//! Newtype wrappers around `i64` for the numeric entity identifiers.
//!
//! Using distinct types prevents accidentally passing a `UserId` where an
//! `AppId` is expected. When the `sqlx` feature is enabled, each ID type
//! is encoded as a PostgreSQL `BIGINT`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Macro to define a newtype ID wrapper around `i64`.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        #[cfg_attr(feature = "sqlx", derive(sqlx::Type), sqlx(transparent))]
        pub struct $name(pub i64);

        impl $name {
            /// Return the inner numeric value.
            pub fn get(self) -> i64 {
                self.0
            }

            /// Whether the identifier is unset (zero or negative). `Default` is unset.
            pub fn is_unset(self) -> bool {
                self.0 <= 0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse::<i64>().map(Self)
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> i64 {
                id.0
            }
        }
    };
}

define_id!(
    /// Identifier of a registered user.
    UserId
);

define_id!(
    /// Identifier of a client application.
    AppId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_numeric_strings() {
        assert_eq!("42".parse::<UserId>().unwrap(), UserId(42));
        assert_eq!(" 7 ".parse::<AppId>().unwrap(), AppId(7));
        assert!("abc".parse::<UserId>().is_err());
    }

    #[test]
    fn test_unset() {
        assert!(UserId(0).is_unset());
        assert!(AppId(-1).is_unset());
        assert!(!AppId(1).is_unset());
    }

    #[test]
    fn test_serde_transparent() {
        let json = serde_json::to_string(&UserId(5)).unwrap();
        assert_eq!(json, "5");
        let back: AppId = serde_json::from_str("9").unwrap();
        assert_eq!(back, AppId(9));
    }
}
