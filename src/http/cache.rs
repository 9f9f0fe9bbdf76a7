//! HTTP cache control module
//!
//! `ETag` generation and conditional request handling for static assets.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Generate a quoted `ETag` from asset content, e.g. `"ab12cd"`
pub fn generate_etag(content: &[u8]) -> String {
    let mut hasher = DefaultHasher::new();
    content.hash(&mut hasher);
    let v = hasher.finish();
    format!("\"{v:x}\"")
}

/// Check the client's `If-None-Match` header against the computed `ETag`.
///
/// Handles a single tag, a comma-separated list, and the `*` wildcard.
/// Returns true when the client copy is current (respond 304).
pub fn check_etag_match(if_none_match: Option<&str>, etag: &str) -> bool {
    if_none_match.is_some_and(|client_etag| {
        client_etag
            .split(',')
            .any(|e| e.trim() == etag || e.trim() == "*")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_etag_is_stable() {
        let a = generate_etag(b"body { color: red }");
        let b = generate_etag(b"body { color: red }");
        assert_eq!(a, b);
        assert!(a.starts_with('"') && a.ends_with('"'));
    }

    #[test]
    fn test_etag_differs_per_content() {
        assert_ne!(generate_etag(b"one"), generate_etag(b"two"));
    }

    #[test]
    fn test_match_single() {
        let etag = generate_etag(b"content");
        assert!(check_etag_match(Some(&etag), &etag));
        assert!(!check_etag_match(Some("\"other\""), &etag));
    }

    #[test]
    fn test_match_list_and_wildcard() {
        let etag = generate_etag(b"content");
        let list = format!("\"stale\", {etag}");
        assert!(check_etag_match(Some(&list), &etag));
        assert!(check_etag_match(Some("*"), &etag));
    }

    #[test]
    fn test_no_header_no_match() {
        assert!(!check_etag_match(None, "\"abc\""));
    }
}
