//! Page identifier and password generation.

use md5::{Digest, Md5};
use rand::RngExt;

/// Length of a page identifier in hex characters.
pub const ID_LEN: usize = 7;

/// Attempts before [`StoreError::IdExhausted`](crate::StoreError::IdExhausted).
pub const MAX_ID_ATTEMPTS: u32 = 8;

/// Candidate identifier for `content` created at `timestamp_ms`.
///
/// The first attempt hashes `content + timestamp`; later attempts append
/// the attempt number as a salt.
#[must_use]
pub fn page_id(content: &str, timestamp_ms: i64, attempt: u32) -> String {
    let mut hasher = Md5::new();
    hasher.update(content.as_bytes());
    hasher.update(timestamp_ms.to_string().as_bytes());
    if attempt > 0 {
        hasher.update(format!(":{attempt}").as_bytes());
    }
    let mut id = hex::encode(hasher.finalize());
    id.truncate(ID_LEN);
    id
}

/// Five random decimal digits.
#[must_use]
pub fn generate_password() -> String {
    let n: u32 = rand::rng().random_range(0..100_000);
    format!("{n:05}")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_first_attempt_is_md5_prefix() {
        // md5("hello1700000000000")
        let expected = hex::encode(Md5::digest(b"hello1700000000000"));
        assert_eq!(page_id("hello", 1_700_000_000_000, 0), &expected[..ID_LEN]);
    }

    #[test]
    fn test_id_shape() {
        let id = page_id("<p>x</p>", 42, 0);
        assert_eq!(id.len(), ID_LEN);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_salt_changes_id() {
        let first = page_id("same", 1, 0);
        assert_eq!(first, page_id("same", 1, 0));
        assert_ne!(first, page_id("same", 1, 1));
        assert_ne!(page_id("same", 1, 1), page_id("same", 1, 2));
    }

    #[test]
    fn test_password_is_five_digits() {
        for _ in 0..100 {
            let password = generate_password();
            assert_eq!(password.len(), 5);
            assert!(password.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn test_passwords_vary() {
        let passwords: std::collections::HashSet<String> =
            (0..50).map(|_| generate_password()).collect();
        assert!(passwords.len() > 1);
    }
}
