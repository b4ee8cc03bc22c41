// src/widget/search.rs
// =============================================================================
// The Search-and-Fetch Widget.
//
// How a query flows:
// 1. set_query() bumps the generation, clears results/error, enters Loading
// 2. A spawned continuation sleeps for the debounce window
// 3. If its generation is still current it calls the fetcher once
// 4. When the fetch finishes it applies the outcome only if its generation
//    is still current; anything superseded is dropped on the floor
//
// The state sits in a tokio watch channel. Every mutation is one short
// synchronous closure, so mutations are applied one at a time even though
// continuations run as separate tasks. Nothing is aborted: stale work runs
// to completion and its result is discarded.
//
// Continuations hold only a Weak reference to the widget. Once the widget is
// dropped (unmounted) they find nothing to upgrade and stop.
// =============================================================================

use std::sync::{Arc, Weak};
use std::time::Duration;

use tokio::sync::watch;
use tracing::{debug, warn};

use super::state::{FetchState, WidgetSnapshot, WidgetState};
use crate::config::WidgetConfig;
use crate::github::{RepoFetcher, Repository};

struct Shared {
    state: watch::Sender<WidgetState>,
    fetcher: Arc<dyn RepoFetcher>,
    debounce: Duration,
}

/// Debounced repository search bound to one username input.
pub struct SearchWidget {
    shared: Arc<Shared>,
}

impl SearchWidget {
    /// Creates the widget and immediately searches for `config.default_query`.
    ///
    /// Must be called from within a tokio runtime (continuations are spawned).
    pub fn mount(fetcher: Arc<dyn RepoFetcher>, config: WidgetConfig) -> Self {
        let (state, _) = watch::channel(WidgetState::default());
        let widget = Self {
            shared: Arc::new(Shared {
                state,
                fetcher,
                debounce: config.debounce,
            }),
        };
        widget.set_query(config.default_query);
        widget
    }

    /// The single mutation: replace the query and schedule a fetch for it.
    ///
    /// Must be called from within a tokio runtime (the fetch is spawned).
    pub fn set_query(&self, query: impl Into<String>) {
        let query = query.into();
        let mut generation = 0;
        self.shared
            .state
            .send_modify(|state| generation = state.begin_query(query.clone()));

        debug!(%query, generation, "query accepted");
        tokio::spawn(run_query(Arc::downgrade(&self.shared), generation, query));
    }

    pub fn query(&self) -> String {
        self.shared.state.borrow().query.clone()
    }

    pub fn fetch_state(&self) -> FetchState {
        self.shared.state.borrow().fetch.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.shared.state.borrow().fetch.is_loading()
    }

    /// Results ordered by descending stars, recomputed on every call.
    pub fn sorted_results(&self) -> Vec<Repository> {
        super::state::sorted_by_stars(self.shared.state.borrow().fetch.results())
    }

    pub fn error(&self) -> Option<String> {
        self.shared.state.borrow().fetch.error().map(str::to_string)
    }

    /// All readouts taken from the same state version.
    pub fn snapshot(&self) -> WidgetSnapshot {
        self.shared.state.borrow().snapshot()
    }

    /// Change notifications, one per state mutation.
    pub fn subscribe(&self) -> watch::Receiver<WidgetState> {
        self.shared.state.subscribe()
    }

    /// Waits until the latest query has left Loading.
    pub async fn settled(&self) -> WidgetSnapshot {
        let mut rx = self.subscribe();
        // The sender lives in `self`, so the channel cannot close while we wait
        let snapshot = match rx.wait_for(|state| !state.fetch.is_loading()).await {
            Ok(state) => state.snapshot(),
            Err(_) => self.snapshot(),
        };
        snapshot
    }
}

// One query's continuation: debounce, fetch, apply-if-current
async fn run_query(shared: Weak<Shared>, generation: u64, query: String) {
    let Some((fetcher, debounce)) = shared
        .upgrade()
        .map(|s| (Arc::clone(&s.fetcher), s.debounce))
    else {
        return;
    };

    tokio::time::sleep(debounce).await;

    match shared.upgrade() {
        Some(s) if s.state.borrow().is_current(generation) => {}
        Some(_) => {
            debug!(%query, generation, "superseded during debounce");
            return;
        }
        None => return,
    }

    let outcome = match fetcher.list_repos(&query).await {
        Ok(repos) => {
            debug!(%query, count = repos.len(), "repositories received");
            FetchState::Success(repos)
        }
        Err(err) if err.is_transport() => {
            warn!(%query, error = %err, "request did not complete");
            FetchState::Error(err.user_message())
        }
        Err(err) => {
            warn!(%query, error = %err, "repository fetch failed");
            FetchState::Error(err.user_message())
        }
    };

    let Some(s) = shared.upgrade() else {
        debug!(%query, generation, "widget unmounted, dropping result");
        return;
    };

    let applied = s
        .state
        .send_if_modified(|state| state.complete(generation, outcome));
    if !applied {
        debug!(%query, generation, "discarding stale response");
    }
}
