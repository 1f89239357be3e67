//! Microsoft Graph calendar adapter
//!
//! Implements the application's `RemoteCalendarPort` against the
//! Graph-shaped event API. Requests are executed on behalf of a user; the
//! bearer token comes from an injected [`AccessTokenProvider`], so session
//! handling stays with the caller.
//!
//! This crate only talks to the remote provider. It never touches the
//! local record store.

mod auth;
mod client;
mod config;
mod payload;

pub use auth::{AccessTokenProvider, StaticTokenProvider, TokenError};
pub use client::GraphCalendarClient;
pub use config::GraphConfig;
