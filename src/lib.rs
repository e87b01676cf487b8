//! Daily news feed: today's articles from a Firestore collection, with a
//! fallback to the most recent ones, filtered by category and drawn as cards.

pub mod app;
pub mod config;
pub mod news;
pub mod store;
pub mod ui;
pub mod util;
