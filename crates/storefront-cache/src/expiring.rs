//! Cache entries with a per-entry time to live.
//!
//! Entries are stored as `{"data": .., "timestamp": .., "ttl": ..}` under
//! keys prefixed with [`KEY_PREFIX`], so one store can be shared with other
//! data and [`ExpiringCache::clear`] only touches cache entries.

use crate::clock::{Clock, SystemClock};
use crate::kv::Cache;
use crate::store::{KvStore, MemoryStore};
use crate::CacheError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Prefix of every key written by [`ExpiringCache`].
pub const KEY_PREFIX: &str = "__cache__";

/// Lifetime used by [`ExpiringCache::set_default`], in milliseconds.
pub const DEFAULT_TTL_MS: u64 = 300_000;

#[derive(Debug, Serialize, Deserialize)]
struct CacheEntry<T> {
    data: T,
    timestamp: u64,
    ttl: u64,
}

/// Typed cache whose entries expire.
///
/// An entry is valid while its age is at most its TTL. Reading an expired
/// entry removes it.
pub struct ExpiringCache<S: KvStore = MemoryStore, C: Clock = SystemClock> {
    cache: Cache<S>,
    clock: C,
}

impl ExpiringCache<MemoryStore, SystemClock> {
    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new())
    }
}

impl<S: KvStore> ExpiringCache<S, SystemClock> {
    pub fn new(store: S) -> Self {
        Self::with_clock(store, SystemClock)
    }
}

impl<S: KvStore, C: Clock> ExpiringCache<S, C> {
    pub fn with_clock(store: S, clock: C) -> Self {
        Self {
            cache: Cache::new(store),
            clock,
        }
    }

    fn full_key(key: &str) -> String {
        format!("{}{}", KEY_PREFIX, key)
    }

    /// Store `data` under `key` for `ttl_ms` milliseconds.
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, data: &T, ttl_ms: u64) -> Result<(), CacheError> {
        let entry = CacheEntry {
            data,
            timestamp: self.clock.now_ms(),
            ttl: ttl_ms,
        };
        self.cache.set(&Self::full_key(key), &entry)
    }

    /// Store `data` with the default five minute lifetime.
    pub fn set_default<T: Serialize + ?Sized>(&self, key: &str, data: &T) -> Result<(), CacheError> {
        self.set(key, data, DEFAULT_TTL_MS)
    }

    /// Get a live entry.
    ///
    /// Missing, expired and unreadable entries are all `None`; only store
    /// failures are errors.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        let Some(entry) = self.entry(key)? else {
            return Ok(None);
        };

        if self.age_of(&entry) > entry.ttl {
            debug!(key, "cache entry expired");
            self.remove(key)?;
            return Ok(None);
        }

        match serde_json::from_value(entry.data) {
            Ok(data) => {
                debug!(key, "cache hit");
                Ok(Some(data))
            }
            Err(e) => {
                warn!(key, error = %e, "cache entry has unexpected shape");
                Ok(None)
            }
        }
    }

    pub fn remove(&self, key: &str) -> Result<(), CacheError> {
        self.cache.delete(&Self::full_key(key))
    }

    /// Remove every cache entry, leaving other keys in the store alone.
    pub fn clear(&self) -> Result<(), CacheError> {
        for key in self.cache.keys()? {
            if key.starts_with(KEY_PREFIX) {
                self.cache.delete(&key)?;
            }
        }
        Ok(())
    }

    /// Whether `key` holds an entry that has not expired. Does not remove
    /// expired entries.
    pub fn is_valid(&self, key: &str) -> Result<bool, CacheError> {
        Ok(self
            .entry(key)?
            .map(|entry| self.age_of(&entry) <= entry.ttl)
            .unwrap_or(false))
    }

    /// Milliseconds since `key` was written, expired or not.
    pub fn age(&self, key: &str) -> Result<Option<u64>, CacheError> {
        Ok(self.entry(key)?.map(|entry| self.age_of(&entry)))
    }

    /// Cache keys currently stored, without the prefix.
    pub fn keys(&self) -> Result<Vec<String>, CacheError> {
        Ok(self
            .cache
            .keys()?
            .into_iter()
            .filter_map(|key| key.strip_prefix(KEY_PREFIX).map(str::to_string))
            .collect())
    }

    fn age_of<T>(&self, entry: &CacheEntry<T>) -> u64 {
        self.clock.now_ms().saturating_sub(entry.timestamp)
    }

    fn entry(&self, key: &str) -> Result<Option<CacheEntry<serde_json::Value>>, CacheError> {
        let Some(bytes) = self.cache.store().get_raw(&Self::full_key(key))? else {
            return Ok(None);
        };

        match serde_json::from_slice(&bytes) {
            Ok(entry) => Ok(Some(entry)),
            Err(e) => {
                warn!(key, error = %e, "ignoring corrupt cache entry");
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;

    fn cache() -> (ExpiringCache<MemoryStore, ManualClock>, ManualClock) {
        let clock = ManualClock::new(1_000_000);
        (ExpiringCache::with_clock(MemoryStore::new(), clock.clone()), clock)
    }

    #[test]
    fn test_set_and_get() {
        let (cache, _) = cache();
        cache.set("product_1", &vec!["a", "b"], 1_000).unwrap();
        let value: Option<Vec<String>> = cache.get("product_1").unwrap();
        assert_eq!(value, Some(vec!["a".to_string(), "b".to_string()]));
    }

    #[test]
    fn test_entry_valid_until_ttl_inclusive() {
        let (cache, clock) = cache();
        cache.set("k", &1, 1_000).unwrap();

        clock.advance(1_000);
        assert!(cache.is_valid("k").unwrap());
        assert_eq!(cache.get::<i32>("k").unwrap(), Some(1));

        clock.advance(1);
        assert!(!cache.is_valid("k").unwrap());
        assert_eq!(cache.age("k").unwrap(), Some(1_001));
        assert_eq!(cache.get::<i32>("k").unwrap(), None);
        // reading the expired entry removed it
        assert_eq!(cache.age("k").unwrap(), None);
    }

    #[test]
    fn test_default_ttl() {
        let (cache, clock) = cache();
        cache.set_default("k", "v").unwrap();
        clock.advance(DEFAULT_TTL_MS);
        assert_eq!(cache.get::<String>("k").unwrap().as_deref(), Some("v"));
        clock.advance(1);
        assert_eq!(cache.get::<String>("k").unwrap(), None);
    }

    #[test]
    fn test_clear_only_touches_prefixed_keys() {
        let store = std::sync::Arc::new(MemoryStore::new());
        let cache = ExpiringCache::with_clock(store.clone(), ManualClock::new(0));
        store.set_raw("theme", b"dark").unwrap();
        cache.set_default("a", &1).unwrap();
        cache.set_default("b", &2).unwrap();

        let mut keys = cache.keys().unwrap();
        keys.sort();
        assert_eq!(keys, vec!["a", "b"]);

        cache.clear().unwrap();
        assert!(cache.keys().unwrap().is_empty());
        assert_eq!(store.get_raw("theme").unwrap(), Some(b"dark".to_vec()));
    }

    #[test]
    fn test_corrupt_entry_reads_as_absent() {
        let store = std::sync::Arc::new(MemoryStore::new());
        let cache = ExpiringCache::with_clock(store.clone(), ManualClock::new(0));
        store.set_raw("__cache__broken", b"{not json").unwrap();
        store.set_raw("__cache__shape", br#"{"data": 1}"#).unwrap();

        assert_eq!(cache.get::<i32>("broken").unwrap(), None);
        assert_eq!(cache.get::<i32>("shape").unwrap(), None);
        assert!(!cache.is_valid("broken").unwrap());
        assert_eq!(cache.age("broken").unwrap(), None);
    }

    #[test]
    fn test_wrong_type_reads_as_absent() {
        let (cache, _) = cache();
        cache.set_default("k", "text").unwrap();
        assert_eq!(cache.get::<u32>("k").unwrap(), None);
    }

    #[test]
    fn test_clock_moving_backwards_keeps_entry() {
        let (cache, clock) = cache();
        cache.set("k", &1, 10).unwrap();
        clock.set(0);
        assert_eq!(cache.age("k").unwrap(), Some(0));
        assert_eq!(cache.get::<i32>("k").unwrap(), Some(1));
    }
}
