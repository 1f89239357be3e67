//! Linked resource reference - the single business resource an event belongs to
//!
//! Every calendar event is linked to exactly one resource: a visit request,
//! an intervention, or an order. The link determines which calendar the
//! event is routed to. The "exactly one of three" rule is enforced
//! structurally by this tagged union instead of three nullable fields.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// The kind of resource an event is linked to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkedResourceKind {
    /// A customer visit request
    VisitRequest,
    /// An on-site intervention
    Intervention,
    /// An order
    Order,
}

impl LinkedResourceKind {
    /// Get a human-readable label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::VisitRequest => "visit request",
            Self::Intervention => "intervention",
            Self::Order => "order",
        }
    }

    /// The URI path segment identifying this kind of resource
    #[must_use]
    pub const fn path_segment(&self) -> &'static str {
        match self {
            Self::VisitRequest => "requests",
            Self::Intervention => "interventions",
            Self::Order => "orders",
        }
    }
}

impl fmt::Display for LinkedResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Reference to the single business resource an event is linked to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "uri", rename_all = "snake_case")]
pub enum LinkedResource {
    /// Link to a customer visit request
    VisitRequest(String),
    /// Link to an intervention
    Intervention(String),
    /// Link to an order
    Order(String),
}

impl LinkedResource {
    /// Resolve a bare resource URI to a typed reference.
    ///
    /// The kind is determined from the URI's path segments (`requests`,
    /// `interventions`, `orders`). The resource kinds share a URI scheme,
    /// so the path is the only identifying information available.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::UnroutableResource`] when none of the known
    /// segments is present.
    pub fn from_uri(uri: impl Into<String>) -> Result<Self, DomainError> {
        let uri = uri.into();
        let segments: Vec<&str> = uri.split('/').collect();
        for kind in [
            LinkedResourceKind::VisitRequest,
            LinkedResourceKind::Intervention,
            LinkedResourceKind::Order,
        ] {
            if segments.contains(&kind.path_segment()) {
                return Ok(Self::with_kind(kind, uri));
            }
        }
        Err(DomainError::UnroutableResource(uri))
    }

    /// Build a reference of the given kind
    #[must_use]
    pub fn with_kind(kind: LinkedResourceKind, uri: String) -> Self {
        match kind {
            LinkedResourceKind::VisitRequest => Self::VisitRequest(uri),
            LinkedResourceKind::Intervention => Self::Intervention(uri),
            LinkedResourceKind::Order => Self::Order(uri),
        }
    }

    /// The kind of the linked resource
    #[must_use]
    pub const fn kind(&self) -> LinkedResourceKind {
        match self {
            Self::VisitRequest(_) => LinkedResourceKind::VisitRequest,
            Self::Intervention(_) => LinkedResourceKind::Intervention,
            Self::Order(_) => LinkedResourceKind::Order,
        }
    }

    /// The URI of the linked resource
    #[must_use]
    pub fn uri(&self) -> &str {
        match self {
            Self::VisitRequest(uri) | Self::Intervention(uri) | Self::Order(uri) => uri,
        }
    }
}

impl fmt::Display for LinkedResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}>", self.kind(), self.uri())
    }
}
