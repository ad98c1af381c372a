// models/src/identifiers.rs

use core::{hash::Hash, ops::Deref};
use std::{cmp::Ordering, fmt, str::FromStr};

use internment::Intern;
use serde::{Deserialize, Serialize};

use crate::errors::{RepoError, RepoResult};

/// An identifier. Identifiers are fixed-length strings (255 bytes max) that
/// uniquely identify a schema object, such as a vertex label or an edge
/// type. Interning keeps comparisons cheap.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct Identifier(pub Intern<String>);

impl Identifier {
    /// Creates a new identifier.
    ///
    /// # Errors
    /// Returns `RepoError::InvalidArgument` if `value` is not between 1 and
    /// 255 bytes in length (inclusive).
    pub fn new(value: impl Into<String>) -> RepoResult<Self> {
        let value = value.into();
        if value.is_empty() || value.len() > u8::MAX as usize {
            return Err(RepoError::invalid("identifier has invalid length"));
        }

        Ok(Self(Intern::new(value)))
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        self.0.as_ref()
    }
}

impl Deref for Identifier {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.0.deref()
    }
}

impl FromStr for Identifier {
    type Err = RepoError;

    fn from_str(s: &str) -> RepoResult<Self> {
        Self::new(s.to_string())
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Identifier> for String {
    fn from(value: Identifier) -> Self {
        value.0.to_string()
    }
}

impl PartialOrd for Identifier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Identifier {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

#[cfg(test)]
mod tests {
    use super::Identifier;
    use core::str::FromStr;

    #[test]
    fn should_not_create_empty_identifier() {
        assert!(Identifier::new("").is_err());
    }

    #[test]
    fn should_not_create_too_long_identifier() {
        assert!(Identifier::new("a".repeat(256)).is_err());
    }

    #[test]
    fn should_create_identifier() {
        let identifier = Identifier::new("Patient");
        assert!(identifier.is_ok());
        assert_eq!(identifier.unwrap().as_ref(), "Patient");
    }

    #[test]
    fn should_convert_identifier_from_str() {
        let identifier = Identifier::from_str("WITH_DOCTOR");
        assert!(identifier.is_ok());
        assert_eq!(identifier.unwrap().as_ref(), "WITH_DOCTOR");
    }
}
