// src/widget/state.rs
// =============================================================================
// The widget's state machine and its derived readouts.
//
// States: Idle -> Loading -> (Success | Error), and back to Loading on every
// new query. The result list lives inside Success and the message inside
// Error, so "results and error at the same time" cannot be represented.
//
// The star-sorted view is never stored. It is computed from the current
// result list each time it is read, so it cannot go stale.
// =============================================================================

use serde::Serialize;

use crate::github::Repository;

/// Where the current query's fetch stands.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FetchState {
    /// Nothing requested yet
    #[default]
    Idle,
    /// Debouncing or waiting for the server
    Loading,
    /// Repositories in the order the server sent them
    Success(Vec<Repository>),
    /// User-facing failure description
    Error(String),
}

impl FetchState {
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    /// Raw result set (empty unless Success).
    pub fn results(&self) -> &[Repository] {
        match self {
            FetchState::Success(repos) => repos,
            _ => &[],
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            FetchState::Error(message) => Some(message),
            _ => None,
        }
    }

    /// Short label for logs and the CLI
    pub fn label(&self) -> &'static str {
        match self {
            FetchState::Idle => "idle",
            FetchState::Loading => "loading",
            FetchState::Success(_) => "success",
            FetchState::Error(_) => "error",
        }
    }
}

/// Everything the widget owns.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WidgetState {
    /// Username currently being searched
    pub query: String,
    /// Bumped on every accepted query; continuations compare against it
    pub generation: u64,
    pub fetch: FetchState,
}

impl WidgetState {
    /// Accepts a new query: clears results/error, enters Loading and returns
    /// the generation the new continuation must carry.
    pub fn begin_query(&mut self, query: String) -> u64 {
        self.generation += 1;
        self.query = query;
        self.fetch = FetchState::Loading;
        self.generation
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }

    /// Applies a finished fetch if it still belongs to the latest query.
    ///
    /// Returns false (and changes nothing) for stale completions.
    pub fn complete(&mut self, generation: u64, outcome: FetchState) -> bool {
        if !self.is_current(generation) {
            return false;
        }
        self.fetch = outcome;
        true
    }

    /// Consistent copy of all readouts.
    pub fn snapshot(&self) -> WidgetSnapshot {
        WidgetSnapshot {
            query: self.query.clone(),
            state: self.fetch.label(),
            is_loading: self.fetch.is_loading(),
            sorted_results: sorted_by_stars(self.fetch.results()),
            error: self.fetch.error().map(str::to_string),
        }
    }
}

/// What a front-end renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WidgetSnapshot {
    pub query: String,
    pub state: &'static str,
    pub is_loading: bool,
    pub sorted_results: Vec<Repository>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Copy of `repos` ordered by descending star count.
///
/// `sort_by` is a stable sort, so equal star counts keep their input order.
pub fn sorted_by_stars(repos: &[Repository]) -> Vec<Repository> {
    let mut sorted = repos.to_vec();
    sorted.sort_by(|a, b| b.stargazers_count.cmp(&a.stargazers_count));
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn repo(name: &str, stars: u64) -> Repository {
        Repository {
            full_name: name.to_string(),
            html_url: format!("https://github.com/{name}"),
            stargazers_count: stars,
            forks: 0,
        }
    }

    #[test]
    fn test_begin_query_clears_previous_outcome() {
        let mut state = WidgetState::default();
        let first = state.begin_query("keajs".into());
        assert!(state.complete(first, FetchState::Success(vec![repo("a", 1)])));

        let second = state.begin_query("other".into());
        assert_eq!(second, first + 1);
        assert_eq!(state.fetch, FetchState::Loading);
        assert!(state.fetch.results().is_empty());
        assert!(state.fetch.error().is_none());

        state.complete(second, FetchState::Error("boom".into()));
        state.begin_query("again".into());
        assert!(state.fetch.error().is_none());
    }

    #[test]
    fn test_stale_completion_is_ignored() {
        let mut state = WidgetState::default();
        let old = state.begin_query("a".into());
        let new = state.begin_query("b".into());

        assert!(!state.complete(old, FetchState::Success(vec![repo("a/x", 1)])));
        assert_eq!(state.fetch, FetchState::Loading);

        assert!(state.complete(new, FetchState::Error("Not Found".into())));
        assert_eq!(state.fetch.error(), Some("Not Found"));
    }

    #[test]
    fn test_sorted_by_stars_descending() {
        let sorted = sorted_by_stars(&[repo("five", 5), repo("ten", 10)]);
        let names: Vec<_> = sorted.iter().map(|r| r.full_name.as_str()).collect();
        assert_eq!(names, ["ten", "five"]);
    }

    #[test]
    fn test_sorted_by_stars_keeps_tie_order() {
        let sorted = sorted_by_stars(&[repo("a", 3), repo("b", 7), repo("c", 3), repo("d", 7)]);
        let names: Vec<_> = sorted.iter().map(|r| r.full_name.as_str()).collect();
        assert_eq!(names, ["b", "d", "a", "c"]);
    }

    #[test]
    fn test_sorted_by_stars_empty_and_single() {
        assert!(sorted_by_stars(&[]).is_empty());
        assert_eq!(sorted_by_stars(&[repo("solo", 1)]), vec![repo("solo", 1)]);
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let mut state = WidgetState::default();
        let gen = state.begin_query("keajs".into());
        state.complete(gen, FetchState::Success(vec![repo("five", 5), repo("ten", 10)]));

        let snap = state.snapshot();
        assert_eq!(snap.query, "keajs");
        assert_eq!(snap.state, "success");
        assert!(!snap.is_loading);
        assert_eq!(snap.sorted_results[0].full_name, "ten");
        assert!(snap.error.is_none());
    }

    proptest! {
        #[test]
        fn prop_sorted_view_is_stable_descending_permutation(stars in prop::collection::vec(0u64..5, 0..40)) {
            let input: Vec<Repository> = stars
                .iter()
                .enumerate()
                .map(|(i, s)| repo(&format!("r{i}"), *s))
                .collect();
            let sorted = sorted_by_stars(&input);

            prop_assert_eq!(sorted.len(), input.len());
            for pair in sorted.windows(2) {
                prop_assert!(pair[0].stargazers_count >= pair[1].stargazers_count);
                if pair[0].stargazers_count == pair[1].stargazers_count {
                    // Names encode input position, so ties must stay ascending
                    let a: usize = pair[0].full_name[1..].parse().unwrap();
                    let b: usize = pair[1].full_name[1..].parse().unwrap();
                    prop_assert!(a < b);
                }
            }

            let mut left: Vec<_> = input.iter().map(|r| r.full_name.clone()).collect();
            let mut right: Vec<_> = sorted.iter().map(|r| r.full_name.clone()).collect();
            left.sort();
            right.sort();
            prop_assert_eq!(left, right);
        }
    }
}
