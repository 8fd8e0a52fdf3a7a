//! Cart session identifier.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`SessionId`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum SessionIdError {
    /// The input string is empty.
    #[error("session id cannot be empty")]
    Empty,
    /// The input string is too long.
    #[error("session id must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input contains whitespace or control characters.
    #[error("session id must not contain whitespace or control characters")]
    InvalidCharacter,
}

/// An opaque token identifying one browsing cart lifetime.
///
/// The browser generates this once, persists it in local storage under a
/// fixed key, and sends it with every cart request. It is never rotated and
/// never expires. The server treats it as the partition key for all cart
/// row operations.
///
/// ## Examples
///
/// ```
/// use aurora_goods_core::SessionId;
///
/// assert!(SessionId::parse("k3j9x2m4q").is_ok());
/// assert!(SessionId::parse("").is_err());
/// assert!(SessionId::parse("has spaces").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Maximum accepted length of a session id.
    pub const MAX_LENGTH: usize = 64;

    /// Length of session ids minted by [`SessionId::generate`].
    const GENERATED_LENGTH: usize = 9;

    /// Parse a `SessionId` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, longer than 64 characters,
    /// or contains whitespace or control characters.
    pub fn parse(s: &str) -> Result<Self, SessionIdError> {
        if s.is_empty() {
            return Err(SessionIdError::Empty);
        }

        if s.len() > Self::MAX_LENGTH {
            return Err(SessionIdError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        if s.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(SessionIdError::InvalidCharacter);
        }

        Ok(Self(s.to_owned()))
    }

    /// Generate a fresh session id.
    ///
    /// Nine characters drawn from `[0-9a-z]`, matching the tokens browsers
    /// already have persisted in local storage.
    #[must_use]
    pub fn generate() -> Self {
        use rand::Rng;

        let mut rng = rand::rng();
        let token: String = (0..Self::GENERATED_LENGTH)
            .map(|_| char::from_digit(rng.random_range(0..36), 36).unwrap_or('0'))
            .collect();
        Self(token)
    }

    /// Returns the session id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `SessionId` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for SessionId {
    type Err = SessionIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for SessionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        let id = SessionId::parse("k3j9x2m4q").unwrap();
        assert_eq!(id.as_str(), "k3j9x2m4q");
    }

    #[test]
    fn test_parse_empty() {
        assert!(matches!(SessionId::parse(""), Err(SessionIdError::Empty)));
    }

    #[test]
    fn test_parse_too_long() {
        let long = "a".repeat(SessionId::MAX_LENGTH + 1);
        assert!(matches!(
            SessionId::parse(&long),
            Err(SessionIdError::TooLong { .. })
        ));
    }

    #[test]
    fn test_parse_whitespace() {
        assert!(matches!(
            SessionId::parse("has space"),
            Err(SessionIdError::InvalidCharacter)
        ));
        assert!(matches!(
            SessionId::parse("has\ttab"),
            Err(SessionIdError::InvalidCharacter)
        ));
    }

    #[test]
    fn test_generate_shape() {
        let id = SessionId::generate();
        assert_eq!(id.as_str().len(), 9);
        assert!(id.as_str().chars().all(|c| c.is_ascii_alphanumeric()));
        // Generated ids must round-trip through parse
        assert!(SessionId::parse(id.as_str()).is_ok());
    }

    #[test]
    fn test_generate_unique() {
        // Not a collision-resistance claim, just a sanity check
        assert_ne!(SessionId::generate(), SessionId::generate());
    }
}
