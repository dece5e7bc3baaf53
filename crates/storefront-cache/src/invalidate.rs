//! Invalidation of cached catalog responses after admin writes.

use crate::clock::Clock;
use crate::expiring::ExpiringCache;
use crate::store::KvStore;
use crate::{cache_key, CacheError};
use tracing::debug;

/// Key prefixes used by product list responses (per tab, category and page).
pub const PRODUCT_LIST_PREFIXES: [&str; 5] = ["products_list_", "all-", "basic-", "network-", "region-"];

/// Key of a cached product detail response.
pub fn product_detail_key(product_id: &str) -> String {
    cache_key!("product", product_id)
}

/// Drop every cached product list. Returns how many entries were removed.
pub fn invalidate_product_lists<S: KvStore, C: Clock>(
    cache: &ExpiringCache<S, C>,
) -> Result<usize, CacheError> {
    remove_matching(cache, |key| {
        PRODUCT_LIST_PREFIXES
            .iter()
            .any(|prefix| key.starts_with(prefix))
    })
}

/// Drop the cached detail response of one product.
pub fn invalidate_product_detail<S: KvStore, C: Clock>(
    cache: &ExpiringCache<S, C>,
    product_id: &str,
) -> Result<(), CacheError> {
    cache.remove(&product_detail_key(product_id))
}

/// Drop every cache entry that looks product related, lists and details.
pub fn invalidate_all_product_caches<S: KvStore, C: Clock>(
    cache: &ExpiringCache<S, C>,
) -> Result<usize, CacheError> {
    remove_matching(cache, |key| {
        key.contains("product")
            || PRODUCT_LIST_PREFIXES[1..]
                .iter()
                .any(|pattern| key.contains(pattern))
    })
}

fn remove_matching<S: KvStore, C: Clock>(
    cache: &ExpiringCache<S, C>,
    matches: impl Fn(&str) -> bool,
) -> Result<usize, CacheError> {
    let mut removed = 0;
    for key in cache.keys()? {
        if matches(&key) {
            cache.remove(&key)?;
            removed += 1;
        }
    }
    debug!(removed, "invalidated product cache entries");
    Ok(removed)
}
