// src/lib.rs
// =============================================================================
// Debounced GitHub repository search.
//
// SearchWidget holds a username, waits for typing to settle, lists that
// user's repositories through a RepoFetcher and exposes loading, error and
// star-sorted results. GithubClient is the HTTP implementation.
// =============================================================================

pub mod config;
pub mod error;
pub mod github;
pub mod logging;
pub mod widget;

pub use config::{ClientConfig, WidgetConfig};
pub use error::FetchError;
pub use github::{GithubClient, RepoFetcher, Repository};
pub use widget::{FetchState, SearchWidget, WidgetSnapshot};
