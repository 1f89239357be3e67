//! Infrastructure layer - persistence, configuration and telemetry
//!
//! Hosts the SQLite implementation of the event store port, the process
//! configuration, and tracing initialization. The remote calendar adapter
//! lives in its own integration crate.

pub mod config;
pub mod persistence;
pub mod telemetry;

pub use config::{AppConfig, CalendarSyncConfig, DatabaseConfig};
pub use persistence::{ConnectionPool, DatabaseError, SqliteEventStore, create_pool};
pub use telemetry::init_tracing;
