//! # Fingerprint Cache
//!
//! Deduplicates generation requests. Entries are keyed by a fingerprint of the
//! document type and the canonicalized field record, and expire after a fixed
//! time-to-live. Expired entries are evicted lazily, on lookup.

use crate::types::{DocumentType, FieldRecord};
use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::{PoisonError, RwLock};
use std::time::{Duration, Instant};
use tracing::debug;

/// Thirty minutes.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(30 * 60);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    pub key: String,
    pub text: String,
    pub expires_at: Instant,
}

impl CacheEntry {
    fn is_live(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

/// Derives the cache key for a request.
///
/// Field insertion order does not matter: the fields are serialized in key
/// order before hashing.
pub fn fingerprint(doc_type: DocumentType, fields: &FieldRecord) -> String {
    let material = format!("{}-{}", doc_type.label(), fields.canonical_json());
    format!("{:x}", md5::compute(material.as_bytes()))
}

/// A store of previously generated document text.
pub trait ContractCache: Send + Sync + Debug {
    fn get(&self, doc_type: DocumentType, fields: &FieldRecord) -> Option<String>;

    fn put(&self, doc_type: DocumentType, fields: &FieldRecord, text: String);
}

/// A process-wide, in-memory [`ContractCache`].
#[derive(Debug)]
pub struct InMemoryContractCache {
    ttl: Duration,
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl Default for InMemoryContractCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_TTL)
    }
}

impl InMemoryContractCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Looks up `key` as of `now`. An expired entry is removed and reported as a miss.
    pub fn get_at(&self, key: &str, now: Instant) -> Option<String> {
        {
            let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
            match entries.get(key) {
                Some(entry) if entry.is_live(now) => return Some(entry.text.clone()),
                Some(_) => {}
                None => return None,
            }
        }

        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        // Another writer may have refreshed the entry between the two locks.
        if let Some(entry) = entries.get(key) {
            if entry.is_live(now) {
                return Some(entry.text.clone());
            }
            entries.remove(key);
            debug!(key, "Evicted expired cache entry.");
        }
        None
    }

    /// Stores `text` under `key`, expiring one TTL after `now`.
    pub fn put_at(&self, key: &str, text: String, now: Instant) {
        let entry = CacheEntry {
            key: key.to_string(),
            text,
            expires_at: now + self.ttl,
        };
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), entry);
    }

    /// Number of entries still live right now.
    pub fn len(&self) -> usize {
        let now = Instant::now();
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .filter(|entry| entry.is_live(now))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ContractCache for InMemoryContractCache {
    fn get(&self, doc_type: DocumentType, fields: &FieldRecord) -> Option<String> {
        self.get_at(&fingerprint(doc_type, fields), Instant::now())
    }

    fn put(&self, doc_type: DocumentType, fields: &FieldRecord, text: String) {
        self.put_at(&fingerprint(doc_type, fields), text, Instant::now());
    }
}
