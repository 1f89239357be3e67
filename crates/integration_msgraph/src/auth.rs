//! Access token lookup for the Graph client
//!
//! Token acquisition is an external concern: the request-handling layer
//! knows the caller's session and how to exchange it for a bearer token.
//! The client only asks for a token per request.

use async_trait::async_trait;
use thiserror::Error;

/// Token lookup errors
#[derive(Debug, Error)]
pub enum TokenError {
    /// No token could be produced for the current session
    #[error("No access token available: {0}")]
    Unavailable(String),
}

/// Supplies the bearer token for Graph requests
#[async_trait]
pub trait AccessTokenProvider: Send + Sync {
    /// A currently valid access token for the acting user
    async fn access_token(&self) -> Result<String, TokenError>;
}

/// Token provider holding a fixed token
///
/// Useful in tests and in deployments where the caller refreshes tokens
/// itself and rebuilds the client per request.
#[derive(Debug, Clone)]
pub struct StaticTokenProvider {
    token: String,
}

impl StaticTokenProvider {
    /// Create a provider returning the given token
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

#[async_trait]
impl AccessTokenProvider for StaticTokenProvider {
    async fn access_token(&self) -> Result<String, TokenError> {
        if self.token.is_empty() {
            return Err(TokenError::Unavailable(
                "static token provider holds an empty token".to_string(),
            ));
        }
        Ok(self.token.clone())
    }
}
