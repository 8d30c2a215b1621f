//! In-process [`PageStore`].

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::Utc;
use htmlgo_renderer::Dialect;

use crate::id::{MAX_ID_ATTEMPTS, generate_password, page_id};
use crate::store::{CreatedPage, PageRecord, PageStore, PageSummary, StoreError};
use crate::title::extract_title;

/// Page store held in memory for the lifetime of the process.
///
/// # Example
///
/// ```
/// use htmlgo_renderer::Dialect;
/// use htmlgo_store::{MemoryStore, PageStore};
///
/// let store = MemoryStore::new();
/// let created = store.create("<title>Hi</title>", false, Dialect::Html).unwrap();
/// let page = store.get(&created.id).unwrap().unwrap();
/// assert_eq!(page.title, "Hi");
/// ```
#[derive(Debug, Default)]
pub struct MemoryStore {
    pages: RwLock<HashMap<String, PageRecord>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored pages.
    pub fn len(&self) -> Result<usize, StoreError> {
        Ok(self.pages.read().map_err(|_| StoreError::Poisoned)?.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }
}

impl PageStore for MemoryStore {
    fn create(
        &self,
        content: &str,
        is_protected: bool,
        dialect: Dialect,
    ) -> Result<CreatedPage, StoreError> {
        let created_at = Utc::now();
        let timestamp = created_at.timestamp_millis();

        let mut pages = self.pages.write().map_err(|_| StoreError::Poisoned)?;
        let id = (0..MAX_ID_ATTEMPTS)
            .map(|attempt| page_id(content, timestamp, attempt))
            .find(|id| !pages.contains_key(id))
            .ok_or(StoreError::IdExhausted {
                attempts: MAX_ID_ATTEMPTS,
            })?;

        let password = generate_password();
        let record = PageRecord {
            id: id.clone(),
            content: content.to_owned(),
            dialect,
            password: password.clone(),
            is_protected,
            title: extract_title(content, dialect),
            created_at,
        };
        tracing::debug!(%id, %dialect, is_protected, len = content.len(), "page created");
        pages.insert(id.clone(), record);

        Ok(CreatedPage { id, password })
    }

    fn get(&self, id: &str) -> Result<Option<PageRecord>, StoreError> {
        let pages = self.pages.read().map_err(|_| StoreError::Poisoned)?;
        Ok(pages.get(id).cloned())
    }

    fn list_recent(&self, limit: usize) -> Result<Vec<PageSummary>, StoreError> {
        let pages = self.pages.read().map_err(|_| StoreError::Poisoned)?;
        let mut summaries: Vec<PageSummary> = pages
            .values()
            .map(|page| PageSummary {
                id: page.id.clone(),
                created_at: page.created_at,
            })
            .collect();
        summaries.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
        summaries.truncate(limit);
        Ok(summaries)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::DEFAULT_RECENT_LIMIT;

    #[test]
    fn test_create_and_get() {
        let store = MemoryStore::new();
        let content = "# Notes\n\n```mermaid\ngraph TD\n```";
        let created = store.create(content, true, Dialect::Markdown).unwrap();

        assert_eq!(created.id.len(), 7);
        assert_eq!(created.password.len(), 5);

        let page = store.get(&created.id).unwrap().unwrap();
        assert_eq!(page.content, content);
        assert_eq!(page.dialect, Dialect::Markdown);
        assert_eq!(page.password, created.password);
        assert!(page.is_protected);
        assert_eq!(page.title, "Untitled");
    }

    #[test]
    fn test_password_generated_for_unprotected_pages() {
        let store = MemoryStore::new();
        let created = store.create("<p>x</p>", false, Dialect::Html).unwrap();
        let page = store.get(&created.id).unwrap().unwrap();
        assert!(!page.is_protected);
        assert_eq!(page.password.len(), 5);
    }

    #[test]
    fn test_get_missing() {
        let store = MemoryStore::new();
        assert_eq!(store.get("abcdef0").unwrap(), None);
    }

    #[test]
    fn test_identical_content_gets_distinct_ids() {
        let store = MemoryStore::new();
        let ids: Vec<String> = (0..5)
            .map(|_| store.create("same", false, Dialect::Markdown).unwrap().id)
            .collect();
        let mut unique = ids.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), ids.len());
        assert_eq!(store.len().unwrap(), 5);
    }

    #[test]
    fn test_list_recent_newest_first() {
        let store = MemoryStore::new();
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        {
            let mut pages = store.pages.write().unwrap();
            for (i, id) in ["aaaaaaa", "bbbbbbb", "ccccccc"].into_iter().enumerate() {
                let offset = i64::try_from(i).unwrap();
                pages.insert(
                    id.to_owned(),
                    PageRecord {
                        id: id.to_owned(),
                        content: String::new(),
                        dialect: Dialect::Html,
                        password: "00000".to_owned(),
                        is_protected: false,
                        title: "Untitled".to_owned(),
                        created_at: base + Duration::minutes(offset),
                    },
                );
            }
        }

        let recent = store.list_recent(2).unwrap();
        let ids: Vec<&str> = recent.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["ccccccc", "bbbbbbb"]);
        assert_eq!(store.list_recent(DEFAULT_RECENT_LIMIT).unwrap().len(), 3);
    }

    #[test]
    fn test_store_is_shareable_across_threads() {
        let store = std::sync::Arc::new(MemoryStore::new());
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let store = std::sync::Arc::clone(&store);
                std::thread::spawn(move || {
                    store
                        .create(&format!("page {i}"), false, Dialect::Markdown)
                        .unwrap()
                })
            })
            .collect();
        for handle in handles {
            let created = handle.join().unwrap();
            assert!(store.get(&created.id).unwrap().is_some());
        }
        assert_eq!(store.len().unwrap(), 4);
    }
}
