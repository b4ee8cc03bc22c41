// src/config.rs
// =============================================================================
// Configuration for the search widget and the GitHub client.
//
// The CLI builds these from flags (with environment fallbacks); library users
// can start from Default and override what they need.
// =============================================================================

use std::time::Duration;

/// Public GitHub REST endpoint
pub const DEFAULT_HOST: &str = "https://api.github.com";

/// Username searched when the widget is mounted
pub const DEFAULT_QUERY: &str = "keajs";

/// Quiet period after the last keystroke before a request goes out
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Page size sent as `per_page`
pub const DEFAULT_PER_PAGE: u32 = 250;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Settings for the widget's own behaviour
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetConfig {
    /// Query used on mount, before any user input
    pub default_query: String,
    /// Debounce window between `set_query` and the network call
    pub debounce: Duration,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            default_query: DEFAULT_QUERY.to_string(),
            debounce: DEFAULT_DEBOUNCE,
        }
    }
}

/// Settings for the HTTP side
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL, e.g. `https://api.github.com` or a GitHub Enterprise `/api/v3` root
    pub host: String,
    /// Optional personal access token, sent as a bearer token
    pub token: Option<String>,
    /// Per-request timeout
    pub timeout: Duration,
    pub per_page: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            token: None,
            timeout: DEFAULT_TIMEOUT,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}
