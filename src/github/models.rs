// src/github/models.rs
// =============================================================================
// Wire types for the GitHub "list repositories for a user" endpoint.
//
// Only the fields we display are declared; serde ignores the rest of the
// (large) repository object.
// =============================================================================

use serde::{Deserialize, Serialize};

/// One repository from `GET /users/{username}/repos`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    /// `owner/name`
    pub full_name: String,
    /// Browser URL of the repository
    pub html_url: String,
    pub stargazers_count: u64,
    pub forks: u64,
}

/// Error body GitHub sends with non-2xx statuses, e.g. `{"message": "Not Found"}`.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorBody {
    pub message: String,
}
