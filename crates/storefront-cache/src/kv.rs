//! Key-Value store wrapper with automatic serialization.

use crate::store::{KvStore, MemoryStore};
use crate::CacheError;
use serde::{de::DeserializeOwned, Serialize};

/// Type-safe cache over any [`KvStore`].
///
/// Provides automatic JSON serialization for any type that implements
/// `Serialize` and `DeserializeOwned`.
#[derive(Debug, Default)]
pub struct Cache<S: KvStore = MemoryStore> {
    store: S,
}

impl Cache<MemoryStore> {
    /// Open a fresh in-process cache.
    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new())
    }
}

impl<S: KvStore> Cache<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Get a value from the cache.
    ///
    /// Returns `None` if the key doesn't exist.
    ///
    /// # Example
    ///
    /// ```rust
    /// use storefront_cache::Cache;
    /// let cache = Cache::in_memory();
    /// cache.set("cart_user123", &vec![1, 2, 3]).unwrap();
    /// let cart: Option<Vec<i32>> = cache.get("cart_user123").unwrap();
    /// assert_eq!(cart, Some(vec![1, 2, 3]));
    /// ```
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        match self.store.get_raw(key)? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Set a value in the cache.
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        let bytes = serde_json::to_vec(value)?;
        self.store.set_raw(key, &bytes)
    }

    /// Delete a value from the cache.
    pub fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.store.delete(key)
    }

    /// Check if a key exists in the cache.
    pub fn exists(&self, key: &str) -> Result<bool, CacheError> {
        self.store.exists(key)
    }

    /// Get all keys in the cache.
    pub fn keys(&self) -> Result<Vec<String>, CacheError> {
        self.store.keys()
    }
}

/// Helper to build cache keys with namespacing.
///
/// # Example
///
/// ```rust
/// use storefront_cache::cache_key;
/// let key = cache_key!("product", 42);
/// assert_eq!(key, "product_42");
/// ```
#[macro_export]
macro_rules! cache_key {
    ($prefix:expr, $($part:expr),+) => {{
        let mut key = String::from($prefix);
        $(
            key.push('_');
            key.push_str(&$part.to_string());
        )+
        key
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Item {
        name: String,
        qty: u32,
    }

    #[test]
    fn test_typed_round_trip() {
        let cache = Cache::in_memory();
        let item = Item {
            name: "case".to_string(),
            qty: 2,
        };
        cache.set("item", &item).unwrap();
        assert_eq!(cache.get::<Item>("item").unwrap(), Some(item));
        assert!(cache.exists("item").unwrap());

        cache.delete("item").unwrap();
        assert_eq!(cache.get::<Item>("item").unwrap(), None);
    }

    #[test]
    fn test_type_mismatch_is_an_error() {
        let cache = Cache::in_memory();
        cache.set("item", "just a string").unwrap();
        assert!(matches!(
            cache.get::<Item>("item"),
            Err(CacheError::SerializeError(_))
        ));
    }

    #[test]
    fn test_cache_key() {
        assert_eq!(cache_key!("products_list", "all", 1), "products_list_all_1");
    }
}
