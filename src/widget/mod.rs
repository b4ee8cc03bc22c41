// src/widget/mod.rs
// =============================================================================
// The search widget: a username input bound to a debounced repository fetch.
//
// - state.rs: the Idle/Loading/Success/Error machine and derived readouts
// - search.rs: debounce, fetch and the stale-response guard
// - watch.rs: feeds lines of input into a widget and renders settled results
// =============================================================================

mod search;
mod state;
mod watch;

#[cfg(test)]
mod testing;

pub use search::SearchWidget;
pub use state::{sorted_by_stars, FetchState, WidgetSnapshot, WidgetState};
pub use watch::watch_lines;
