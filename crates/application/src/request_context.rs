//! Request context carrying the acting user through the engine
//!
//! The request-handling layer authenticates the caller, builds a
//! `RequestContext`, and passes it into the sync service. The engine uses
//! it for provenance stamping and log correlation; it never performs
//! authentication itself.

use chrono::{DateTime, Utc};
use domain::UserId;
use uuid::Uuid;

/// Context for a single synchronization request
#[derive(Debug, Clone)]
pub struct RequestContext {
    user_id: UserId,
    request_id: Uuid,
    received_at: DateTime<Utc>,
}

impl RequestContext {
    /// Create a context for the given acting user
    ///
    /// Generates a fresh request ID and captures the current timestamp.
    #[must_use]
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            request_id: Uuid::new_v4(),
            received_at: Utc::now(),
        }
    }

    /// Create a context with a request ID supplied by an upstream layer
    #[must_use]
    pub fn with_request_id(user_id: UserId, request_id: Uuid) -> Self {
        Self {
            user_id,
            request_id,
            received_at: Utc::now(),
        }
    }

    /// The acting user
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Identifier correlating log lines of this request
    #[must_use]
    pub const fn request_id(&self) -> Uuid {
        self.request_id
    }

    /// When the request was received
    #[must_use]
    pub const fn received_at(&self) -> DateTime<Utc> {
        self.received_at
    }
}
