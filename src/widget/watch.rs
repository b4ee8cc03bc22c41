// src/widget/watch.rs
// =============================================================================
// Drives a widget from a stream of lines, like keystrokes into a search box.
//
// - every line is one set_query (surrounding whitespace trimmed)
// - each generation is rendered once, when it leaves Loading
// - superseded generations never settle, so they are never rendered
// - at EOF we wait for the latest query to settle, render it, and return
// =============================================================================

use anyhow::{Context, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use super::search::SearchWidget;
use super::state::WidgetSnapshot;

/// Feeds `input` into `widget` and calls `render` for every settled result.
pub async fn watch_lines<R, F>(widget: &SearchWidget, input: R, mut render: F) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    F: FnMut(&WidgetSnapshot) -> Result<()>,
{
    let mut rx = widget.subscribe();
    let mut lines = input.lines();

    let mut input_open = true;
    let mut last_rendered = 0u64;

    loop {
        tokio::select! {
            line = lines.next_line(), if input_open => {
                match line.context("failed to read input")? {
                    Some(line) => widget.set_query(line.trim()),
                    None => input_open = false,
                }
            }
            changed = rx.changed() => {
                if changed.is_err() {
                    break;
                }
            }
        }

        // Also covers a state that settled before we started waiting
        let pending = {
            let state = rx.borrow_and_update();
            if state.fetch.is_loading() || state.generation == last_rendered {
                None
            } else {
                Some((state.generation, state.snapshot()))
            }
        };
        if let Some((generation, snapshot)) = pending {
            last_rendered = generation;
            render(&snapshot)?;
        }

        if !input_open && last_rendered == rx.borrow().generation {
            break;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WidgetConfig;
    use crate::widget::testing::{repo, RecordingFetcher};
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::io::{AsyncWriteExt, BufReader};
    use tokio::time::Instant;

    fn mount(fetcher: Arc<RecordingFetcher>) -> SearchWidget {
        SearchWidget::mount(
            fetcher,
            WidgetConfig {
                default_query: "keajs".to_string(),
                debounce: Duration::from_millis(300),
            },
        )
    }

    async fn collect(widget: &SearchWidget, input: impl AsyncBufRead + Unpin) -> Vec<WidgetSnapshot> {
        let mut rendered = Vec::new();
        watch_lines(widget, input, |snapshot| {
            rendered.push(snapshot.clone());
            Ok(())
        })
        .await
        .unwrap();
        rendered
    }

    fn queries(rendered: &[WidgetSnapshot]) -> Vec<&str> {
        rendered.iter().map(|s| s.query.as_str()).collect()
    }

    #[tokio::test(start_paused = true)]
    async fn test_lines_within_window_render_only_last() {
        let fetcher = Arc::new(RecordingFetcher::default().reply("b", 0, Ok(vec![repo("b/x", 1)])));
        let widget = mount(fetcher.clone());

        let rendered = collect(&widget, &b"a\nb\n"[..]).await;

        assert_eq!(queries(&rendered), ["b"]);
        assert_eq!(rendered[0].sorted_results, vec![repo("b/x", 1)]);
        assert_eq!(fetcher.calls(), ["b"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_eof_waits_for_pending_query() {
        let fetcher = Arc::new(RecordingFetcher::default().reply("slow", 500, Ok(vec![repo("slow/x", 2)])));
        let widget = mount(fetcher.clone());
        let start = Instant::now();

        let rendered = collect(&widget, &b"  slow \n"[..]).await;

        assert_eq!(queries(&rendered), ["slow"]);
        assert!(!rendered[0].is_loading);
        assert!(start.elapsed() >= Duration::from_millis(800));
        assert!(!widget.is_loading());
    }

    #[tokio::test(start_paused = true)]
    async fn test_each_generation_rendered_once_and_eof_returns_at_once() {
        let fetcher = Arc::new(RecordingFetcher::default());
        let widget = mount(fetcher.clone());
        let start = Instant::now();

        let (reader, mut writer) = tokio::io::duplex(64);
        tokio::spawn(async move {
            writer.write_all(b"a\n").await.unwrap();
            tokio::time::sleep(Duration::from_secs(1)).await;
            writer.write_all(b"b\n").await.unwrap();
            tokio::time::sleep(Duration::from_secs(2)).await;
            // Dropping the writer is EOF, with both queries long settled
        });

        let rendered = collect(&widget, BufReader::new(reader)).await;

        assert_eq!(queries(&rendered), ["a", "b"]);
        assert_eq!(fetcher.calls(), ["a", "b"]);
        assert_eq!(start.elapsed(), Duration::from_secs(3));
    }

    #[tokio::test(start_paused = true)]
    async fn test_error_results_are_rendered() {
        let fetcher = Arc::new(RecordingFetcher::default().reply(
            "ghost",
            0,
            Err(crate::error::FetchError::Transport("connection refused".into())),
        ));
        let widget = mount(fetcher);

        let rendered = collect(&widget, &b"ghost\n"[..]).await;

        assert_eq!(rendered.len(), 1);
        assert_eq!(rendered[0].error.as_deref(), Some("connection refused"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_render_failure_stops_the_loop() {
        let widget = mount(Arc::new(RecordingFetcher::default()));

        let result = watch_lines(&widget, &b"a\n"[..], |_| Err(anyhow::anyhow!("stdout closed"))).await;

        assert_eq!(result.unwrap_err().to_string(), "stdout closed");
    }
}
