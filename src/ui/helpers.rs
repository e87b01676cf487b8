//! Helpers shared across the UI layer.

use crate::app::{App, AppEvent};
use crate::news::{LoadError, NewsRepository};
use crate::util::validate_url_for_open;
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use tokio::sync::mpsc;

/// Wraps a future to catch panics and convert them to errors.
///
/// Returns `Err(panic_message)` if the future panics, so a crashed task can
/// still report back to the event loop.
pub(super) async fn catch_task_panic<F, T>(future: F) -> Result<T, String>
where
    F: std::future::Future<Output = T>,
{
    AssertUnwindSafe(future)
        .catch_unwind()
        .await
        .map_err(|panic| {
            if let Some(s) = panic.downcast_ref::<&'static str>() {
                s.to_string()
            } else if let Some(s) = panic.downcast_ref::<String>() {
                s.clone()
            } else {
                "unknown panic payload".to_string()
            }
        })
}

/// Start a background load unless one is already running.
///
/// The spawned task always sends exactly one `AppEvent::NewsLoaded`, even if
/// the load panics, so the loading indicator is always cleared.
pub(super) fn spawn_news_load(
    app: &mut App,
    repository: &NewsRepository,
    event_tx: &mpsc::Sender<AppEvent>,
) {
    if !app.begin_load() {
        return;
    }

    let repository = repository.clone();
    let tx = event_tx.clone();

    tokio::spawn(async move {
        let result = match catch_task_panic(repository.load_today_or_recent()).await {
            Ok(result) => result,
            Err(panic_msg) => {
                tracing::error!(error = %panic_msg, "News load task panicked");
                Err(LoadError::TaskPanicked(panic_msg))
            }
        };

        if let Err(e) = tx.send(AppEvent::NewsLoaded(result)).await {
            tracing::warn!(error = %e, "Failed to send load result (receiver dropped)");
        }
    });
}

/// Open the highlighted card's link in the system browser.
pub(super) fn open_selected_link(app: &mut App) {
    let Some(link) = app.selected_link() else {
        return;
    };

    match validate_url_for_open(&link) {
        Err(e) => {
            tracing::warn!(link = %link, error = %e, "Refusing to open article link");
            app.set_status("기사 링크를 열 수 없습니다");
        }
        Ok(url) => match open::that(url.as_str()) {
            Ok(()) => {
                tracing::debug!(url = %url, "Opened article in browser");
                app.set_status("브라우저에서 여는 중...");
            }
            Err(e) => {
                tracing::warn!(url = %url, error = %e, "Failed to open browser");
                app.set_status("브라우저를 열지 못했습니다");
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{Content, LoadState, ERROR_MESSAGE};
    use crate::store::{MemoryStore, NewsItem, NewsStore, StoreError};
    use async_trait::async_trait;
    use chrono::{DateTime, Utc};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_catch_task_panic_ok() {
        assert_eq!(catch_task_panic(async { 7 }).await, Ok(7));
    }

    #[tokio::test]
    async fn test_catch_task_panic_message() {
        let result = catch_task_panic(async { panic!("boom") }).await;
        assert_eq!(result, Err::<(), _>("boom".to_string()));
    }

    #[tokio::test]
    async fn test_spawn_news_load_sends_one_result() {
        let mut app = App::new();
        let repository = NewsRepository::new(Arc::new(MemoryStore::default()));
        let (tx, mut rx) = mpsc::channel(4);

        spawn_news_load(&mut app, &repository, &tx);
        assert!(app.is_loading());

        // A second request while loading is ignored
        spawn_news_load(&mut app, &repository, &tx);
        drop(tx);

        let event = rx.recv().await.unwrap();
        app.handle_event(event);
        assert!(!app.is_loading());
        assert!(rx.recv().await.is_none());
    }

    struct PanickingStore;

    #[async_trait]
    impl NewsStore for PanickingStore {
        async fn query_since(&self, _: DateTime<Utc>) -> Result<Vec<NewsItem>, StoreError> {
            panic!("store exploded");
        }

        async fn query_recent(&self, _: usize) -> Result<Vec<NewsItem>, StoreError> {
            panic!("store exploded");
        }
    }

    #[tokio::test]
    async fn test_panicking_load_ends_in_failed_state() {
        let mut app = App::new();
        let repository = NewsRepository::new(Arc::new(PanickingStore));
        let (tx, mut rx) = mpsc::channel(4);

        spawn_news_load(&mut app, &repository, &tx);
        let event = rx.recv().await.unwrap();
        match &event {
            AppEvent::NewsLoaded(Err(LoadError::TaskPanicked(msg))) => {
                assert_eq!(msg, "store exploded")
            }
            other => panic!("expected a task panic, got {:?}", other),
        }

        app.handle_event(event);
        assert_eq!(app.load_state(), LoadState::Failed);
        assert!(!app.is_loading());
        assert_eq!(app.content(), &Content::Error(ERROR_MESSAGE));
    }

    #[test]
    fn test_open_without_cards_is_noop() {
        let mut app = App::new();
        open_selected_link(&mut app);
        assert!(app.status_message.is_none());
    }

    #[test]
    fn test_open_rejects_unsafe_link() {
        let mut app = App::new();
        app.begin_load();
        app.finish_load(Ok(vec![NewsItem {
            id: Arc::from("x"),
            category: crate::store::Category::It,
            title: Arc::from("t"),
            summary: Arc::from(""),
            image_url: None,
            link: Arc::from("file:///etc/passwd"),
            source: None,
            date: None,
        }]));

        open_selected_link(&mut app);
        let (msg, _) = app.status_message.as_ref().unwrap();
        assert_eq!(msg, "기사 링크를 열 수 없습니다");
    }
}
