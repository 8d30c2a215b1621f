//! Page storage for HTML-GO.
//!
//! [`PageStore`] is the contract the rendering pipeline relies on: pages are
//! created with a short content-derived id and a numeric password, and read
//! back unchanged. [`MemoryStore`] keeps everything in process.
//!
//! Ids are the first 7 hex characters of MD5(content + creation time in
//! milliseconds). On collision the hash is salted and retried, up to
//! [`MAX_ID_ATTEMPTS`] times.

mod id;
mod memory;
mod store;
mod title;

pub use id::{ID_LEN, MAX_ID_ATTEMPTS, generate_password, page_id};
pub use memory::MemoryStore;
pub use store::{CreatedPage, DEFAULT_RECENT_LIMIT, PageRecord, PageStore, PageSummary, StoreError};
pub use title::{DEFAULT_TITLE, extract_title};
