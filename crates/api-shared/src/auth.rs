//! API-key authentication.
//!
//! The expected key is resolved once at startup and passed in; this module never reads the
//! environment.

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "x-api-key";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("missing x-api-key header")]
    MissingKey,
    #[error("invalid API key")]
    InvalidKey,
}

/// Validates the provided API key against the configured one.
///
/// When no key is configured every request is accepted.
///
/// # Errors
///
/// Returns [`AuthError::MissingKey`] if a key is configured but none was provided, or
/// [`AuthError::InvalidKey`] if the provided key does not match.
pub fn validate_api_key(provided: Option<&str>, expected: Option<&str>) -> Result<(), AuthError> {
    let Some(expected) = expected else {
        return Ok(());
    };

    match provided {
        None => Err(AuthError::MissingKey),
        Some(key) if constant_time_eq(key.as_bytes(), expected.as_bytes()) => Ok(()),
        Some(_) => Err(AuthError::InvalidKey),
    }
}

/// Compares two byte strings without short-circuiting on the first difference.
///
/// Only the length is allowed to leak.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b) {
        diff |= x ^ y;
    }
    diff == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_when_no_key_configured() {
        assert!(validate_api_key(None, None).is_ok());
        assert!(validate_api_key(Some("anything"), None).is_ok());
    }

    #[test]
    fn requires_matching_key_when_configured() {
        assert_eq!(validate_api_key(None, Some("secret")), Err(AuthError::MissingKey));
        assert_eq!(
            validate_api_key(Some("wrong"), Some("secret")),
            Err(AuthError::InvalidKey)
        );
        assert!(validate_api_key(Some("secret"), Some("secret")).is_ok());
    }

    #[test]
    fn key_comparison_checks_every_byte() {
        assert!(constant_time_eq(b"secret", b"secret"));
        assert!(!constant_time_eq(b"secret", b"secreT"));
        assert!(!constant_time_eq(b"Secret", b"secret"));
        assert!(!constant_time_eq(b"secret", b"secrets"));
        assert!(constant_time_eq(b"", b""));
    }

    #[test]
    fn near_miss_key_is_rejected() {
        assert_eq!(
            validate_api_key(Some("secreu"), Some("secret")),
            Err(AuthError::InvalidKey)
        );
        assert_eq!(
            validate_api_key(Some("secret "), Some("secret")),
            Err(AuthError::InvalidKey)
        );
    }
}
