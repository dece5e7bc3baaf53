//! Expiring key-value cache for storefront catalog data.
//!
//! Layers, bottom up:
//!
//! - [`KvStore`]: a byte store ([`MemoryStore`] in process).
//! - [`Cache`]: typed JSON values over a store.
//! - [`ExpiringCache`]: typed values with a per-entry TTL.
//! - [`invalidate`]: clearing product responses after catalog writes.
//!
//! # Example
//!
//! ```rust
//! use storefront_cache::ExpiringCache;
//!
//! let cache = ExpiringCache::in_memory();
//! cache.set("product_42", &"Phone", 60_000).unwrap();
//!
//! let name: Option<String> = cache.get("product_42").unwrap();
//! assert_eq!(name.as_deref(), Some("Phone"));
//! ```

mod clock;
mod error;
mod expiring;
pub mod invalidate;
mod kv;
mod store;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::CacheError;
pub use expiring::{ExpiringCache, DEFAULT_TTL_MS, KEY_PREFIX};
pub use kv::Cache;
pub use store::{KvStore, MemoryStore};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, Clock, ExpiringCache, KvStore, MemoryStore};
}
