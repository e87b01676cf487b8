//! View controller.
//!
//! [`App`] owns the view state (active category tab and the last loaded
//! items) and the load state machine. Every mutation goes through one of its
//! transitions:
//!
//! - [`App::begin_load`] / [`App::finish_load`] for the one-shot store load
//! - [`App::select_category`] for tab changes, which only re-filter resident
//!   data and never fetch
//!
//! The terminal layer only reads [`App::content`] and [`App::is_loading`].

use crate::news::{filter, render, LoadError, NewsRepository, Rendered, Selection, TABS};
use crate::store::NewsItem;
use std::borrow::Cow;
use std::sync::Arc;
use tokio::time::Instant;

/// Fixed message shown when a load fails.
pub const ERROR_MESSAGE: &str = "뉴스를 불러오는 중 오류가 발생했습니다.";

/// How long a status bar message stays visible.
const STATUS_TTL_SECS: u64 = 3;

// ============================================================================
// State
// ============================================================================

/// Load lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Idle,
    Loading,
    Loaded,
    Failed,
}

/// Category selection plus the items from the last successful load.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    pub current_category: Selection,
    /// Replaced wholesale on each successful load.
    pub news_data: Arc<Vec<NewsItem>>,
}

/// What the main panel shows.
#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    Feed(Rendered),
    Error(&'static str),
}

/// Results from background tasks.
#[derive(Debug)]
pub enum AppEvent {
    NewsLoaded(Result<Vec<NewsItem>, LoadError>),
}

// ============================================================================
// Controller
// ============================================================================

pub struct App {
    state: ViewState,
    load_state: LoadState,
    content: Content,

    /// Highlighted card in the current content.
    pub selected_card: usize,
    pub status_message: Option<(Cow<'static, str>, Instant)>,
    pub needs_redraw: bool,
    pub spinner_frame: usize,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub fn new() -> Self {
        Self {
            state: ViewState::default(),
            load_state: LoadState::Idle,
            content: Content::Feed(render(&[])),
            selected_card: 0,
            status_message: None,
            needs_redraw: true,
            spinner_frame: 0,
        }
    }

    pub fn view_state(&self) -> &ViewState {
        &self.state
    }

    pub fn load_state(&self) -> LoadState {
        self.load_state
    }

    pub fn content(&self) -> &Content {
        &self.content
    }

    /// Loading indicator signal.
    pub fn is_loading(&self) -> bool {
        self.load_state == LoadState::Loading
    }

    /// A load is running and nothing has been loaded yet, so neither the
    /// empty state nor cards mean anything.
    pub fn is_waiting_for_data(&self) -> bool {
        self.is_loading() && self.state.news_data.is_empty()
    }

    // ------------------------------------------------------------------------
    // Load transitions
    // ------------------------------------------------------------------------

    /// Enter `Loading` and show the indicator.
    ///
    /// Returns `false` without changing anything when a load is already in
    /// flight, so at most one load runs at a time.
    pub fn begin_load(&mut self) -> bool {
        if self.is_loading() {
            tracing::debug!("Load already in flight, ignoring request");
            return false;
        }
        tracing::debug!(from = ?self.load_state, "Starting news load");
        self.load_state = LoadState::Loading;
        self.needs_redraw = true;
        true
    }

    /// Leave `Loading` with the load's outcome. The indicator is cleared on
    /// both paths.
    ///
    /// On success the items replace `news_data` and are re-rendered under the
    /// current category. On failure `news_data` is kept and the fixed error
    /// message is shown.
    pub fn finish_load(&mut self, result: Result<Vec<NewsItem>, LoadError>) {
        if !self.is_loading() {
            tracing::warn!(state = ?self.load_state, "Load result arrived outside Loading");
        }
        self.needs_redraw = true;

        match result {
            Ok(items) => {
                tracing::info!(count = items.len(), "News loaded");
                self.load_state = LoadState::Loaded;
                self.state.news_data = Arc::new(items);
                self.rerender();
            }
            Err(e) => {
                tracing::error!(error = %e, "News load failed");
                self.load_state = LoadState::Failed;
                self.content = Content::Error(ERROR_MESSAGE);
                self.selected_card = 0;
            }
        }
    }

    /// Run one load against `repository` to completion.
    pub async fn load(&mut self, repository: &NewsRepository) {
        if !self.begin_load() {
            return;
        }
        let result = repository.load_today_or_recent().await;
        self.finish_load(result);
    }

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::NewsLoaded(result) => {
                if result.is_err() {
                    self.set_status("뉴스를 불러오지 못했습니다. [r] 다시 시도");
                }
                self.finish_load(result);
            }
        }
    }

    // ------------------------------------------------------------------------
    // Category selection
    // ------------------------------------------------------------------------

    /// Switch tabs and re-render the resident items. Never fetches.
    pub fn select_category(&mut self, selection: Selection) {
        tracing::debug!(category = %selection, "Category selected");
        self.state.current_category = selection;
        self.selected_card = 0;
        self.needs_redraw = true;
        self.rerender();
    }

    /// Select the tab at `index` in [`TABS`]; out-of-range indices are ignored.
    pub fn select_tab(&mut self, index: usize) {
        if let Some(tab) = TABS.get(index) {
            self.select_category(tab.clone());
        }
    }

    pub fn next_tab(&mut self) {
        let index = self.current_tab_index().map_or(0, |i| (i + 1) % TABS.len());
        self.select_tab(index);
    }

    pub fn prev_tab(&mut self) {
        let index = self
            .current_tab_index()
            .map_or(0, |i| (i + TABS.len() - 1) % TABS.len());
        self.select_tab(index);
    }

    pub fn current_tab_index(&self) -> Option<usize> {
        self.state.current_category.tab_index()
    }

    fn rerender(&mut self) {
        let visible = filter(&self.state.news_data, &self.state.current_category);
        let rendered = render(&visible);
        let count = rendered.cards().len();
        self.content = Content::Feed(rendered);
        self.selected_card = self.selected_card.min(count.saturating_sub(1));
    }

    // ------------------------------------------------------------------------
    // Card navigation
    // ------------------------------------------------------------------------

    fn card_count(&self) -> usize {
        match &self.content {
            Content::Feed(rendered) => rendered.cards().len(),
            Content::Error(_) => 0,
        }
    }

    pub fn nav_down(&mut self) {
        let count = self.card_count();
        if count > 0 && self.selected_card + 1 < count {
            self.selected_card += 1;
        }
    }

    pub fn nav_up(&mut self) {
        self.selected_card = self.selected_card.saturating_sub(1);
    }

    /// Link of the highlighted card, if any card is shown.
    pub fn selected_link(&self) -> Option<Arc<str>> {
        match &self.content {
            Content::Feed(rendered) => rendered
                .cards()
                .get(self.selected_card)
                .map(|card| Arc::clone(&card.link)),
            Content::Error(_) => None,
        }
    }

    // ------------------------------------------------------------------------
    // Status bar
    // ------------------------------------------------------------------------

    pub fn set_status(&mut self, msg: impl Into<Cow<'static, str>>) {
        self.status_message = Some((msg.into(), Instant::now()));
    }

    /// Clear status message if expired. Returns true if one was cleared.
    pub fn clear_expired_status(&mut self) -> bool {
        if let Some((_, time)) = &self.status_message {
            if time.elapsed().as_secs() >= STATUS_TTL_SECS {
                self.status_message = None;
                return true;
            }
        }
        false
    }
}
