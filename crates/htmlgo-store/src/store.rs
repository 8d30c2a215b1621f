//! Page storage contract.

use chrono::{DateTime, Utc};
use htmlgo_renderer::Dialect;

/// Default number of entries returned by [`PageStore::list_recent`].
pub const DEFAULT_RECENT_LIMIT: usize = 10;

/// A stored page.
///
/// `content` and `dialect` are returned exactly as they were submitted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageRecord {
    pub id: String,
    pub content: String,
    pub dialect: Dialect,
    /// Generated for every page; only enforced when `is_protected`.
    pub password: String,
    pub is_protected: bool,
    pub title: String,
    pub created_at: DateTime<Utc>,
}

/// Entry in the recent-pages listing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageSummary {
    pub id: String,
    pub created_at: DateTime<Utc>,
}

/// Identifier and password handed back after a page is created.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CreatedPage {
    pub id: String,
    pub password: String,
}

/// Storage error.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Every salted identifier candidate was already taken.
    #[error("no free page id after {attempts} attempts")]
    IdExhausted { attempts: u32 },
    /// A writer panicked while holding the store lock.
    #[error("page store lock poisoned")]
    Poisoned,
}

/// Backend that persists submitted pages.
pub trait PageStore: Send + Sync {
    /// Store `content` under a freshly generated id.
    fn create(
        &self,
        content: &str,
        is_protected: bool,
        dialect: Dialect,
    ) -> Result<CreatedPage, StoreError>;

    /// Look a page up by id.
    fn get(&self, id: &str) -> Result<Option<PageRecord>, StoreError>;

    /// Most recently created pages, newest first.
    fn list_recent(&self, limit: usize) -> Result<Vec<PageSummary>, StoreError>;
}
