//! Signing secrets for newly provisioned applications.

use argon2::password_hash::rand_core::{OsRng, RngCore};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

/// Number of random bytes in a generated secret.
pub const SECRET_BYTES: usize = 32;

/// Generate a random application secret, base64url-encoded without padding.
pub fn generate_app_secret() -> String {
    let mut bytes = [0u8; SECRET_BYTES];
    OsRng.fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secrets_are_random_and_sized() {
        let a = generate_app_secret();
        let b = generate_app_secret();
        assert_ne!(a, b);
        assert_eq!(URL_SAFE_NO_PAD.decode(&a).unwrap().len(), SECRET_BYTES);
    }
}
