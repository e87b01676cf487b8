//! Card rendering.
//!
//! Turns loaded items into display-ready cards without touching a terminal.
//! Missing or unusable optional fields degrade to fixed fallbacks; rendering
//! never fails.

use crate::store::NewsItem;
use crate::util::{is_displayable_image, strip_control_chars};
use chrono::{DateTime, Local, Utc};
use std::sync::Arc;

/// Image reference used when an item has no usable image.
pub const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/400x200?text=No+Image";

/// Source label used when an item does not name its publisher.
pub const DEFAULT_SOURCE: &str = "네이버 뉴스";

/// Guidance shown when there is nothing to display.
pub const EMPTY_STATE: [&str; 2] = ["아직 등록된 뉴스가 없습니다.", "잠시 후 다시 확인해 주세요."];

/// A single news card.
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub id: Arc<str>,
    pub label: String,
    pub title: String,
    pub summary: String,
    pub image: String,
    pub source: String,
    pub link: Arc<str>,
    /// Local `YYYY.MM.DD HH:MM`, when the item is dated.
    pub date: Option<String>,
}

/// Output of [`render`].
#[derive(Debug, Clone, PartialEq)]
pub enum Rendered {
    Empty { lines: [&'static str; 2] },
    Cards(Vec<Card>),
}

impl Rendered {
    pub fn cards(&self) -> &[Card] {
        match self {
            Rendered::Cards(cards) => cards,
            Rendered::Empty { .. } => &[],
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Rendered::Empty { .. })
    }

    /// Plain-text rendering for non-interactive output.
    pub fn to_plain_text(&self) -> String {
        match self {
            Rendered::Empty { lines } => lines.iter().map(|line| format!("{}\n", line)).collect(),
            Rendered::Cards(cards) => cards
                .iter()
                .map(Card::to_plain_text)
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

impl Card {
    fn to_plain_text(&self) -> String {
        let mut out = format!("[{}] {}\n", self.label, self.title);
        if !self.summary.is_empty() {
            out.push_str(&format!("    {}\n", self.summary));
        }
        match &self.date {
            Some(date) => out.push_str(&format!("    {} · {}\n", self.source, date)),
            None => out.push_str(&format!("    {}\n", self.source)),
        }
        out.push_str(&format!("    {}\n", self.link));
        out
    }
}

/// Render `items` as cards, in input order.
pub fn render(items: &[NewsItem]) -> Rendered {
    if items.is_empty() {
        return Rendered::Empty { lines: EMPTY_STATE };
    }
    Rendered::Cards(items.iter().map(card_for).collect())
}

fn card_for(item: &NewsItem) -> Card {
    let image = item
        .image_url
        .as_deref()
        .filter(|url| is_displayable_image(url))
        .unwrap_or(PLACEHOLDER_IMAGE);

    let source = item
        .source
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_SOURCE);

    Card {
        id: Arc::clone(&item.id),
        label: strip_control_chars(item.category.label()).into_owned(),
        title: strip_control_chars(&item.title).into_owned(),
        summary: strip_control_chars(&item.summary).into_owned(),
        image: image.to_string(),
        source: strip_control_chars(source).into_owned(),
        link: Arc::clone(&item.link),
        date: item.date.map(format_date),
    }
}

fn format_date(date: DateTime<Utc>) -> String {
    date.with_timezone(&Local).format("%Y.%m.%d %H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::news::filter::{filter, Selection};
    use crate::store::Category;
    use pretty_assertions::assert_eq;

    fn item(id: &str, category: &str) -> NewsItem {
        NewsItem {
            id: Arc::from(id),
            category: Category::from(category),
            title: Arc::from(format!("title {}", id)),
            summary: Arc::from(format!("summary {}", id)),
            image_url: Some(Arc::from("https://imgnews.pstatic.net/image/1.jpg")),
            link: Arc::from(format!("https://n.news.naver.com/article/{}", id)),
            source: Some(Arc::from("연합뉴스")),
            date: None,
        }
    }

    #[test]
    fn test_empty_renders_empty_state() {
        let rendered = render(&[]);
        assert_eq!(rendered, Rendered::Empty { lines: EMPTY_STATE });
        assert!(rendered.cards().is_empty());
    }

    #[test]
    fn test_one_card_per_item_in_order() {
        let items = vec![item("a", "stock"), item("b", "it"), item("c", "economy")];
        let rendered = render(&items);
        let ids: Vec<&str> = rendered.cards().iter().map(|c| &*c.id).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_card_fields() {
        let card = card_for(&item("a", "realestate"));
        assert_eq!(card.label, "부동산");
        assert_eq!(card.title, "title a");
        assert_eq!(card.summary, "summary a");
        assert_eq!(card.image, "https://imgnews.pstatic.net/image/1.jpg");
        assert_eq!(card.source, "연합뉴스");
        assert_eq!(&*card.link, "https://n.news.naver.com/article/a");
    }

    #[test]
    fn test_unknown_category_shows_raw_label() {
        let card = card_for(&item("a", "sports"));
        assert_eq!(card.label, "sports");
    }

    #[test]
    fn test_missing_image_uses_placeholder() {
        let mut news = item("a", "it");
        news.image_url = None;
        assert_eq!(card_for(&news).image, PLACEHOLDER_IMAGE);
    }

    #[test]
    fn test_unusable_image_uses_placeholder() {
        let mut news = item("a", "it");
        news.image_url = Some(Arc::from("javascript:alert(1)"));
        assert_eq!(card_for(&news).image, PLACEHOLDER_IMAGE);

        news.image_url = Some(Arc::from("not a url"));
        assert_eq!(card_for(&news).image, PLACEHOLDER_IMAGE);
    }

    #[test]
    fn test_missing_source_uses_default() {
        let mut news = item("a", "it");
        news.source = None;
        assert_eq!(card_for(&news).source, DEFAULT_SOURCE);

        news.source = Some(Arc::from("   "));
        assert_eq!(card_for(&news).source, DEFAULT_SOURCE);
    }

    #[test]
    fn test_text_is_sanitized_not_interpreted() {
        let mut news = item("a", "it");
        news.title = Arc::from("\x1b[31m<b>속보</b>\x1b[0m");
        news.summary = Arc::from("line\x07 two");
        let card = card_for(&news);
        assert_eq!(card.title, "<b>속보</b>");
        assert_eq!(card.summary, "line two");
    }

    #[test]
    fn test_date_formatted_when_present() {
        let mut news = item("a", "it");
        news.date = Some(Utc::now());
        let date = card_for(&news).date.unwrap();
        // YYYY.MM.DD HH:MM
        assert_eq!(date.len(), 16);
        assert_eq!(&date[4..5], ".");
    }

    #[test]
    fn test_stock_selection_renders_single_card() {
        let items = vec![
            item("s1", "stock"),
            item("e1", "economy"),
            item("e2", "economy"),
        ];
        let rendered = render(&filter(&items, &Selection::from_token("stock")));
        assert_eq!(rendered.cards().len(), 1);
        assert_eq!(&*rendered.cards()[0].id, "s1");
    }

    #[test]
    fn test_plain_text_output() {
        let text = render(&[item("a", "stock")]).to_plain_text();
        assert!(text.contains("[주식] title a"));
        assert!(text.contains("연합뉴스"));
        assert!(text.contains("https://n.news.naver.com/article/a"));

        let two = render(&[item("a", "stock"), item("b", "it")]).to_plain_text();
        assert_eq!(
            two,
            "[주식] title a\n    summary a\n    연합뉴스\n    https://n.news.naver.com/article/a\n\n\
             [IT] title b\n    summary b\n    연합뉴스\n    https://n.news.naver.com/article/b\n"
        );

        let empty = render(&[]).to_plain_text();
        assert!(empty.contains(EMPTY_STATE[0]));
        assert!(empty.contains(EMPTY_STATE[1]));
    }
}
