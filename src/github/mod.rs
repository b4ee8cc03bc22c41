// src/github/mod.rs
// =============================================================================
// This module talks to the GitHub REST API.
//
// Currently implements:
// - The `RepoFetcher` seam the search widget depends on
// - A reqwest-backed implementation for `GET /users/{username}/repos`
// - Classification of responses into repositories or typed errors
// =============================================================================

mod fetch;
mod models;

pub use fetch::{classify_response, GithubClient, RepoFetcher};
pub use models::Repository;
