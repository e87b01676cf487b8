use super::{Category, NewsItem, NewsStore, StoreError};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Local, Utc};
use std::sync::Arc;

/// In-process news collection.
///
/// Used as a test fixture and behind `--demo`. Queries follow the same
/// ordering contract as the remote store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items: Vec<NewsItem>,
}

impl MemoryStore {
    pub fn new(items: Vec<NewsItem>) -> Self {
        Self { items }
    }

    /// One item per known category, dated a few minutes before `now`.
    ///
    /// Document ids follow the `{date}_{category}` scheme the crawler writes.
    pub fn demo(now: DateTime<Utc>) -> Self {
        let day = now.with_timezone(&Local).format("%Y-%m-%d").to_string();
        let entries: [(Category, &str, &str, &str); 4] = [
            (
                Category::RealEstate,
                "서울 아파트 전세가격 12주 연속 상승",
                "수도권 전세 수요가 꾸준히 늘면서 서울 아파트 전세가격이 12주째 오름세를 이어갔다.",
                "한국경제",
            ),
            (
                Category::Stock,
                "코스피, 외국인 순매수에 2% 넘게 올라",
                "반도체 대형주를 중심으로 외국인 매수세가 몰리며 코스피가 하루 만에 반등했다.",
                "연합뉴스",
            ),
            (
                Category::Economy,
                "한은, 기준금리 동결…물가 둔화 흐름 주시",
                "한국은행이 기준금리를 현 수준으로 유지하고 하반기 물가 경로를 지켜보기로 했다.",
                "매일경제",
            ),
            (
                Category::It,
                "국내 AI 반도체 스타트업, 대규모 투자 유치",
                "추론 전용 칩을 개발하는 스타트업이 시리즈 C 투자를 마무리하고 양산 준비에 들어갔다.",
                "전자신문",
            ),
        ];

        let items = entries
            .into_iter()
            .enumerate()
            .map(|(i, (category, title, summary, source))| NewsItem {
                id: Arc::from(format!("{}_{}", day, category)),
                link: Arc::from(format!("https://news.example.com/{}/{}", day, category)),
                category,
                title: Arc::from(title),
                summary: Arc::from(summary),
                image_url: None,
                source: Some(Arc::from(source)),
                date: Some(now - Duration::minutes(i as i64 * 5)),
            })
            .collect();

        Self { items }
    }

    /// Items sorted newest first. Undated items sort last.
    fn sorted(&self) -> Vec<NewsItem> {
        let mut items = self.items.clone();
        items.sort_by(|a, b| b.date.cmp(&a.date));
        items
    }
}

#[async_trait]
impl NewsStore for MemoryStore {
    async fn query_since(&self, threshold: DateTime<Utc>) -> Result<Vec<NewsItem>, StoreError> {
        Ok(self
            .sorted()
            .into_iter()
            .filter(|item| item.date.is_some_and(|date| date >= threshold))
            .collect())
    }

    async fn query_recent(&self, limit: usize) -> Result<Vec<NewsItem>, StoreError> {
        let mut items = self.sorted();
        items.truncate(limit);
        Ok(items)
    }
}
