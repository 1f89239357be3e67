//! Remote event identifier assigned by the calendar provider

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// The opaque identifier the remote calendar provider assigns to a
/// mirrored event.
///
/// An event record carries at most one remote identifier at a time.
/// A record without one is either brand-new (not yet mirrored) or
/// mastered by an external system and read-only through this engine.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RemoteEventId(String);

impl RemoteEventId {
    /// Create a remote event ID from a provider-assigned string
    ///
    /// # Errors
    ///
    /// Returns an error if the identifier is empty.
    pub fn new(id: impl Into<String>) -> Result<Self, DomainError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(DomainError::InvalidIdentifier(
                "remote event identifier is empty".to_string(),
            ));
        }
        Ok(Self(id))
    }

    /// Get the identifier as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RemoteEventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
