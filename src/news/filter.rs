use crate::store::{Category, NewsItem};
use std::fmt;

/// The sentinel token that selects every category.
pub const ALL_TOKEN: &str = "all";

/// Active category tab.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Selection {
    #[default]
    All,
    Only(Category),
}

/// Tabs in display order: "all" first, then the known categories.
pub const TABS: [Selection; 5] = [
    Selection::All,
    Selection::Only(Category::RealEstate),
    Selection::Only(Category::Stock),
    Selection::Only(Category::Economy),
    Selection::Only(Category::It),
];

impl Selection {
    /// Parse a category token. Anything other than `"all"` selects that
    /// category, known or not.
    pub fn from_token(token: &str) -> Self {
        match token {
            ALL_TOKEN => Selection::All,
            other => Selection::Only(Category::from(other)),
        }
    }

    pub fn token(&self) -> &str {
        match self {
            Selection::All => ALL_TOKEN,
            Selection::Only(category) => category.as_str(),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Selection::All => "전체",
            Selection::Only(category) => category.label(),
        }
    }

    pub fn matches(&self, item: &NewsItem) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(category) => item.category == *category,
        }
    }

    /// Position in [`TABS`], if this is one of the fixed tabs.
    pub fn tab_index(&self) -> Option<usize> {
        TABS.iter().position(|tab| tab == self)
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Items matching `selection`, in their original order.
pub fn filter(items: &[NewsItem], selection: &Selection) -> Vec<NewsItem> {
    items
        .iter()
        .filter(|item| selection.matches(item))
        .cloned()
        .collect()
}
