//! Calendar URI, the stable identity of a logical calendar bucket

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// URI uniquely identifying a logical calendar in the local store
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CalendarUri(String);

impl CalendarUri {
    /// Create a calendar URI
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not an absolute http(s) URI.
    pub fn new(uri: impl Into<String>) -> Result<Self, DomainError> {
        let uri = uri.into();
        if !(uri.starts_with("http://") || uri.starts_with("https://")) {
            return Err(DomainError::InvalidUri(uri));
        }
        Ok(Self(uri))
    }

    /// Get the URI as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CalendarUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
