//! Read-only access to the `news` document collection.
//!
//! The store is an opaque query service. Two query shapes are all the rest of
//! the crate ever needs:
//!
//! - **Since**: every document with `date >= threshold`, newest first
//! - **Recent**: the newest `limit` documents, regardless of date
//!
//! # Implementations
//!
//! - [`FirestoreStore`] - Firestore REST `runQuery` client
//! - [`MemoryStore`] - in-process documents for fixtures and `--demo`

mod firestore;
mod memory;
mod types;

pub use firestore::FirestoreStore;
pub use memory::MemoryStore;
pub use types::{Category, NewsItem};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

/// Failures while talking to the document store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Request timed out after {0}s")]
    Timeout(u64),
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("HTTP error: status {0}")]
    HttpStatus(u16),
    #[error("Response too large (exceeds {0} bytes)")]
    ResponseTooLarge(usize),
    #[error("Invalid UTF-8 in response")]
    InvalidUtf8,
    #[error("Malformed query response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Insecure base URL: HTTPS required (except localhost for testing)")]
    InsecureBaseUrl,
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

// ============================================================================
// Store Trait
// ============================================================================

/// Query capability over the `news` collection.
///
/// Both queries return items ordered by `date` descending. Implementations
/// never mutate the collection.
#[async_trait]
pub trait NewsStore: Send + Sync {
    /// All items dated at or after `threshold`.
    async fn query_since(&self, threshold: DateTime<Utc>) -> Result<Vec<NewsItem>, StoreError>;

    /// The newest `limit` items.
    async fn query_recent(&self, limit: usize) -> Result<Vec<NewsItem>, StoreError>;
}
