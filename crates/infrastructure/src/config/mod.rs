//! Application configuration
//!
//! Split into focused sub-modules:
//! - `database`: SQLite database settings
//! - `calendars`: well-known calendars, personal mode, local URI minting
//!
//! The Graph adapter's own settings are re-exported from its crate and
//! aggregated here.

mod calendars;
mod database;

use serde::{Deserialize, Serialize};

pub use calendars::CalendarSyncConfig;
pub use database::DatabaseConfig;
pub use integration_msgraph::GraphConfig;

/// Shared default for boolean `true` fields across config structs
pub(crate) const fn default_true() -> bool {
    true
}

/// Aggregated process configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// SQLite database settings
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Calendar routing and local URI settings
    #[serde(default)]
    pub calendars: CalendarSyncConfig,

    /// Graph adapter settings
    #[serde(default)]
    pub graph: GraphConfig,
}

impl AppConfig {
    /// Load configuration from an optional `config` file and environment
    /// overrides (e.g. `CALMIRROR_DATABASE_PATH`).
    ///
    /// # Errors
    ///
    /// Returns an error when the file or environment contents cannot be
    /// deserialized into the config shape.
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(
                config::Environment::with_prefix("CALMIRROR")
                    .separator("_")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        config.try_deserialize()
    }
}
