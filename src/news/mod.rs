//! The news pipeline: load, filter, render.
//!
//! - [`repository`] - today's items with the most-recent fallback
//! - [`filter`] - category tab selection
//! - [`cards`] - pure card rendering
//!
//! Only the repository does I/O; filtering and rendering are pure functions
//! over already-loaded items.

pub mod cards;
pub mod filter;
pub mod repository;

pub use cards::{render, Card, Rendered, DEFAULT_SOURCE, EMPTY_STATE, PLACEHOLDER_IMAGE};
pub use filter::{filter, Selection, ALL_TOKEN, TABS};
pub use repository::{start_of_day, LoadError, NewsRepository, FALLBACK_LIMIT};
