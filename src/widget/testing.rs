// src/widget/testing.rs
// =============================================================================
// Test helpers shared by the widget and watch-loop tests.
//
// RecordingFetcher remembers every username it was asked for and answers
// from a table of (delay, result) pairs. Unknown usernames get an empty list
// straight away.
// =============================================================================

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::FetchError;
use crate::github::{RepoFetcher, Repository};

pub(crate) fn repo(name: &str, stars: u64) -> Repository {
    Repository {
        full_name: name.to_string(),
        html_url: format!("https://github.com/{name}"),
        stargazers_count: stars,
        forks: 0,
    }
}

type Canned = (Duration, Result<Vec<Repository>, FetchError>);

#[derive(Default)]
pub(crate) struct RecordingFetcher {
    calls: Mutex<Vec<String>>,
    replies: HashMap<String, Canned>,
}

impl RecordingFetcher {
    pub(crate) fn reply(
        mut self,
        username: &str,
        delay_ms: u64,
        result: Result<Vec<Repository>, FetchError>,
    ) -> Self {
        self.replies
            .insert(username.to_string(), (Duration::from_millis(delay_ms), result));
        self
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl RepoFetcher for RecordingFetcher {
    async fn list_repos(&self, username: &str) -> Result<Vec<Repository>, FetchError> {
        self.calls.lock().unwrap().push(username.to_string());
        let (delay, result) = self
            .replies
            .get(username)
            .cloned()
            .unwrap_or((Duration::ZERO, Ok(Vec::new())));
        tokio::time::sleep(delay).await;
        result
    }
}
