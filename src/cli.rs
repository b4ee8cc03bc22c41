// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Two ways to drive the search widget:
// - `search`: one query, print the settled result, exit
// - `watch`:  every line read from stdin is a new query (like typing into
//             the search box); each settled result is printed
//
// Connection and timing options are global so they work with both.
// =============================================================================

use std::time::Duration;

use clap::{Args, Parser, Subcommand};

use repo_scout::config::{
    ClientConfig, WidgetConfig, DEFAULT_DEBOUNCE, DEFAULT_HOST, DEFAULT_PER_PAGE, DEFAULT_QUERY,
    DEFAULT_TIMEOUT,
};

#[derive(Parser, Debug)]
#[command(
    name = "repo-scout",
    version,
    about = "Search a GitHub user's repositories, sorted by stars",
    long_about = "repo-scout lists the public repositories of a GitHub user or organisation, \
                  most-starred first. Queries are debounced, so `watch` mode can be fed \
                  keystroke-by-keystroke input without flooding the API."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub options: GlobalOptions,
}

#[derive(Args, Debug)]
pub struct GlobalOptions {
    /// GitHub API base URL (use the /api/v3 root for GitHub Enterprise)
    #[arg(long, global = true, env = "REPO_SCOUT_HOST", default_value = DEFAULT_HOST)]
    pub host: String,

    /// Personal access token, raises the API rate limit
    #[arg(long, global = true, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Debounce window in milliseconds
    #[arg(long, global = true, default_value_t = DEFAULT_DEBOUNCE.as_millis() as u64)]
    pub debounce_ms: u64,

    /// Page size requested from the API
    #[arg(long, global = true, default_value_t = DEFAULT_PER_PAGE)]
    pub per_page: u32,

    /// Per-request timeout in seconds
    #[arg(long, global = true, default_value_t = DEFAULT_TIMEOUT.as_secs())]
    pub timeout_secs: u64,

    /// Debug logging on stderr (RUST_LOG overrides)
    #[arg(long, global = true)]
    pub debug: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Look up one user and print their repositories
    ///
    /// Example: repo-scout search keajs
    Search {
        /// GitHub username or organisation
        #[arg(default_value = DEFAULT_QUERY)]
        username: String,

        /// Output results in JSON format instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Read usernames from stdin, one per line, and print each settled result
    ///
    /// Example: printf 'kea\nkeajs\n' | repo-scout watch
    Watch {
        /// Query searched on startup, before any input arrives
        #[arg(long, default_value = DEFAULT_QUERY)]
        initial: String,

        /// Output one JSON object per result instead of tables
        #[arg(long)]
        json: bool,
    },
}

impl GlobalOptions {
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            host: self.host.clone(),
            token: self.token.clone().filter(|t| !t.is_empty()),
            timeout: Duration::from_secs(self.timeout_secs),
            per_page: self.per_page,
        }
    }

    pub fn widget_config(&self, default_query: &str) -> WidgetConfig {
        WidgetConfig {
            default_query: default_query.to_string(),
            debounce: Duration::from_millis(self.debounce_ms),
        }
    }
}
