// src/github/fetch.rs
// =============================================================================
// This module fetches a user's repositories from GitHub.
//
// Strategy:
// - Build `{host}/users/{username}/repos?per_page=N` with the url crate so the
//   username is encoded as a single path segment
// - Send one GET with GitHub's expected headers (User-Agent is mandatory)
// - Read the body as text, then classify (status, body) in a pure function
//
// Outcomes:
// - transport failure          -> FetchError::Transport
// - 2xx + array of repos       -> Ok(repos)
// - 2xx + anything else        -> FetchError::InvalidResponse
// - non-2xx                    -> FetchError::Application with the server message
// =============================================================================

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::{Client, StatusCode};
use tracing::{debug, info};
use url::Url;

use super::models::{ApiErrorBody, Repository};
use crate::config::ClientConfig;
use crate::error::FetchError;

/// Anything that can list repositories for a username.
///
/// The search widget only sees this trait, so tests (and other front-ends)
/// can substitute their own source.
#[async_trait]
pub trait RepoFetcher: Send + Sync {
    async fn list_repos(&self, username: &str) -> Result<Vec<Repository>, FetchError>;
}

/// reqwest-backed fetcher for the GitHub REST API.
#[derive(Debug, Clone)]
pub struct GithubClient {
    client: Client,
    host: String,
    per_page: u32,
}

impl GithubClient {
    /// Creates a client with GitHub's headers and the configured timeout.
    pub fn new(config: &ClientConfig) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("repo-scout/", env!("CARGO_PKG_VERSION"))),
        );
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github.v3+json"),
        );

        if let Some(token) = config.token.as_deref().filter(|t| !t.is_empty()) {
            let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|e| FetchError::Client(format!("invalid token value: {e}")))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;

        Ok(Self {
            client,
            host: config.host.clone(),
            per_page: config.per_page,
        })
    }

    /// The URL requested for `username`.
    pub fn repos_url(&self, username: &str) -> Result<Url, FetchError> {
        repos_url(&self.host, username, self.per_page)
    }
}

#[async_trait]
impl RepoFetcher for GithubClient {
    async fn list_repos(&self, username: &str) -> Result<Vec<Repository>, FetchError> {
        let url = self.repos_url(username)?;
        info!(%url, "fetching repositories");

        // `?` converts reqwest errors into FetchError::Transport
        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        debug!(%status, bytes = body.len(), "response received");
        classify_response(status, &body)
    }
}

// Builds the listing URL
//
// Examples:
//   ("https://api.github.com", "keajs", 250)
//     -> https://api.github.com/users/keajs/repos?per_page=250
//   ("https://ghe.example.com/api/v3/", "a b", 10)
//     -> https://ghe.example.com/api/v3/users/a%20b/repos?per_page=10
fn repos_url(host: &str, username: &str, per_page: u32) -> Result<Url, FetchError> {
    let mut url = Url::parse(host.trim_end_matches('/'))
        .map_err(|e| FetchError::Client(format!("invalid host '{host}': {e}")))?;

    url.path_segments_mut()
        .map_err(|_| FetchError::Client(format!("host cannot be used as a base URL: {host}")))?
        .pop_if_empty()
        .extend(&["users", username, "repos"]);

    url.query_pairs_mut()
        .append_pair("per_page", &per_page.to_string());

    Ok(url)
}

/// Maps a completed response to repositories or an error.
///
/// Non-2xx bodies without a `message` fall back to the status line
/// (`404 Not Found`) so the user always sees something.
pub fn classify_response(status: StatusCode, body: &str) -> Result<Vec<Repository>, FetchError> {
    if status.is_success() {
        return serde_json::from_str::<Vec<Repository>>(body)
            .map_err(|e| FetchError::InvalidResponse(e.to_string()));
    }

    let message = serde_json::from_str::<ApiErrorBody>(body)
        .map(|b| b.message)
        .unwrap_or_else(|_| status.to_string());

    Err(FetchError::Application { status, message })
}
