//! Graph adapter configuration

use serde::{Deserialize, Serialize};

/// Configuration for the Graph calendar client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphConfig {
    /// Graph API base URL (default: <https://graph.microsoft.com/v1.0>)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Connection timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Named time zone sent with start/end instants
    ///
    /// Passed to the provider verbatim, in the provider's own zone naming.
    #[serde(default = "default_time_zone")]
    pub time_zone: String,

    /// Start hour for customer-visit events (default: 17)
    #[serde(default = "default_visit_start_hour")]
    pub visit_start_hour: u32,

    /// Start hour for planning events (default: 19)
    #[serde(default = "default_planning_start_hour")]
    pub planning_start_hour: u32,

    /// Label prefixed to the reference hyperlink in the event body
    #[serde(default = "default_reference_label")]
    pub reference_label: String,
}

fn default_base_url() -> String {
    "https://graph.microsoft.com/v1.0".to_string()
}

const fn default_timeout() -> u64 {
    30
}

fn default_time_zone() -> String {
    "Romance Standard Time".to_string()
}

const fn default_visit_start_hour() -> u32 {
    17
}

const fn default_planning_start_hour() -> u32 {
    19
}

fn default_reference_label() -> String {
    "Reference".to_string()
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            time_zone: default_time_zone(),
            visit_start_hour: default_visit_start_hour(),
            planning_start_hour: default_planning_start_hour(),
            reference_label: default_reference_label(),
        }
    }
}
