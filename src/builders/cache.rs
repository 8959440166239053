//! Content-addressed cache for rendered fragments.
//!
//! Entries are keyed by the SHA-256 of the input's JSON serialization, so two
//! inputs that are equal by value share one entry. The cache never evicts;
//! it lives as long as the builder that owns it.

use std::collections::HashMap;

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::error::Result;

/// Stable hex key for a serializable input.
pub fn content_key<T: Serialize>(input: &T) -> Result<String> {
    let bytes = serde_json::to_vec(input)?;
    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    Ok(hex::encode(hasher.finalize()))
}

#[derive(Debug, Clone)]
pub struct FragmentCache<V> {
    entries: HashMap<String, V>,
}

impl<V> Default for FragmentCache<V> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<V: Clone> FragmentCache<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<V> {
        self.entries.get(key).cloned()
    }

    pub fn insert(&mut self, key: String, value: V) {
        self.entries.insert(key, value);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::QuoteInput;

    #[test]
    fn test_equal_values_share_a_key() {
        let a = QuoteInput {
            text: "To be".into(),
            author: Some("Shakespeare".into()),
            citation: None,
        };
        let b = a.clone();
        assert_eq!(content_key(&a).unwrap(), content_key(&b).unwrap());
    }

    #[test]
    fn test_different_values_differ() {
        let a = QuoteInput {
            text: "To be".into(),
            ..Default::default()
        };
        let b = QuoteInput {
            text: "Not to be".into(),
            ..Default::default()
        };
        assert_ne!(content_key(&a).unwrap(), content_key(&b).unwrap());
    }

    #[test]
    fn test_insert_and_get() {
        let mut cache = FragmentCache::new();
        assert!(cache.is_empty());
        cache.insert("k".to_string(), 7u32);
        assert_eq!(cache.get("k"), Some(7));
        assert_eq!(cache.get("missing"), None);
        assert_eq!(cache.len(), 1);
        cache.clear();
        assert!(cache.is_empty());
    }
}
