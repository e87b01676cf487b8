use crate::store::{NewsItem, NewsStore, StoreError};
use chrono::{DateTime, Local, NaiveTime, TimeDelta, TimeZone, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Number of items shown when nothing has been published today.
pub const FALLBACK_LIMIT: usize = 4;

#[derive(Debug, Error)]
pub enum LoadError {
    /// The store query could not complete.
    #[error("Failed to fetch news: {0}")]
    Fetch(#[from] StoreError),

    /// The background load task panicked before producing a result.
    #[error("News load task panicked: {0}")]
    TaskPanicked(String),
}

/// Start of `now`'s calendar day in its own timezone, as UTC.
///
/// When local midnight does not exist (a DST gap), the day starts at the
/// first local time after the gap.
pub fn start_of_day<Tz: TimeZone>(now: &DateTime<Tz>) -> DateTime<Utc> {
    let tz = now.timezone();
    let day = now.date_naive();
    let mut local = day.and_time(NaiveTime::MIN);
    while local.date() == day {
        if let Some(start) = tz.from_local_datetime(&local).earliest() {
            return start.with_timezone(&Utc);
        }
        local += TimeDelta::minutes(1);
    }
    // Unreachable while `now` itself is a valid local time on `day`
    now.with_timezone(&Utc)
}

/// Today's news, or the most recent items when today has none.
#[derive(Clone)]
pub struct NewsRepository {
    store: Arc<dyn NewsStore>,
}

impl NewsRepository {
    pub fn new(store: Arc<dyn NewsStore>) -> Self {
        Self { store }
    }

    /// Load items dated since local midnight, falling back to the newest
    /// [`FALLBACK_LIMIT`] items when there are none.
    ///
    /// An empty store is `Ok(vec![])`, not an error.
    pub async fn load_today_or_recent(&self) -> Result<Vec<NewsItem>, LoadError> {
        self.load_since(start_of_day(&Local::now())).await
    }

    /// Same policy as [`load_today_or_recent`](Self::load_today_or_recent)
    /// with an explicit threshold.
    pub async fn load_since(&self, threshold: DateTime<Utc>) -> Result<Vec<NewsItem>, LoadError> {
        tracing::debug!(threshold = %threshold, "Querying today's news");

        let today = self.store.query_since(threshold).await.map_err(|e| {
            tracing::error!(error = %e, "Today's news query failed");
            LoadError::Fetch(e)
        })?;

        if !today.is_empty() {
            tracing::info!(count = today.len(), "Loaded today's news");
            return Ok(today);
        }

        tracing::info!(
            limit = FALLBACK_LIMIT,
            "No news dated today, falling back to most recent"
        );
        let mut recent = self.store.query_recent(FALLBACK_LIMIT).await.map_err(|e| {
            tracing::error!(error = %e, "Recent news query failed");
            LoadError::Fetch(e)
        })?;
        // Never show more than the fallback limit, whatever the store returned.
        recent.truncate(FALLBACK_LIMIT);

        tracing::info!(count = recent.len(), "Loaded recent news");
        Ok(recent)
    }
}
