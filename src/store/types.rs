use chrono::{DateTime, Utc};
use std::fmt;
use std::sync::Arc;

// ============================================================================
// Category
// ============================================================================

/// News category as stored in the `category` field of a document.
///
/// The four known categories form a closed set. Anything else the store hands
/// back is kept verbatim in `Other` so it can still be filtered and displayed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Category {
    RealEstate,
    Stock,
    Economy,
    It,
    Other(Arc<str>),
}

impl Category {
    /// Known categories in tab order.
    pub const KNOWN: [Category; 4] = [
        Category::RealEstate,
        Category::Stock,
        Category::Economy,
        Category::It,
    ];

    /// Token used in the store and on the command line.
    pub fn as_str(&self) -> &str {
        match self {
            Category::RealEstate => "realestate",
            Category::Stock => "stock",
            Category::Economy => "economy",
            Category::It => "it",
            Category::Other(raw) => raw,
        }
    }

    /// Display label. Unknown categories fall back to their raw token.
    pub fn label(&self) -> &str {
        match self {
            Category::RealEstate => "부동산",
            Category::Stock => "주식",
            Category::Economy => "경제",
            Category::It => "IT",
            Category::Other(raw) => raw,
        }
    }
}

impl From<&str> for Category {
    fn from(token: &str) -> Self {
        match token {
            "realestate" => Category::RealEstate,
            "stock" => Category::Stock,
            "economy" => Category::Economy,
            "it" => Category::It,
            other => Category::Other(Arc::from(other)),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// News Item
// ============================================================================

/// One document from the `news` collection.
///
/// String fields use `Arc<str>` so filtering and re-rendering clone cheaply.
/// Optional fields are kept as the store returned them; fallbacks are applied
/// by the card renderer, not here.
#[derive(Debug, Clone, PartialEq)]
pub struct NewsItem {
    pub id: Arc<str>,
    pub category: Category,
    pub title: Arc<str>,
    pub summary: Arc<str>,
    pub image_url: Option<Arc<str>>,
    pub link: Arc<str>,
    pub source: Option<Arc<str>>,
    pub date: Option<DateTime<Utc>>,
}
