//! Product and cart caching over the storefront cache.

use crate::cart::Cart;
use crate::catalog::Product;
use crate::config::StorefrontConfig;
use crate::error::CommerceError;
use crate::ids::ProductId;
use storefront_cache::invalidate::{
    invalidate_product_detail, invalidate_product_lists, product_detail_key,
};
use storefront_cache::{cache_key, Clock, ExpiringCache, KvStore};
use tracing::debug;

/// How long a saved cart survives, in milliseconds.
pub const CART_TTL_MS: u64 = 7 * 24 * 60 * 60 * 1000;

/// Caches product detail responses and persists carts.
pub struct CatalogCache<S: KvStore, C: Clock> {
    cache: ExpiringCache<S, C>,
    product_ttl_ms: u64,
}

impl<S: KvStore, C: Clock> CatalogCache<S, C> {
    pub fn new(cache: ExpiringCache<S, C>, config: &StorefrontConfig) -> Self {
        Self {
            cache,
            product_ttl_ms: config.cache_ttl_ms,
        }
    }

    pub fn product(&self, id: &ProductId) -> Result<Option<Product>, CommerceError> {
        Ok(self.cache.get(&product_detail_key(id.as_str()))?)
    }

    pub fn put_product(&self, product: &Product) -> Result<(), CommerceError> {
        self.cache.set(
            &product_detail_key(product.id.as_str()),
            product,
            self.product_ttl_ms,
        )?;
        Ok(())
    }

    /// Cached product, or `load` it and cache the result.
    pub fn product_or_load<F>(&self, id: &ProductId, load: F) -> Result<Product, CommerceError>
    where
        F: FnOnce() -> Result<Product, CommerceError>,
    {
        if let Some(product) = self.product(id)? {
            return Ok(product);
        }
        debug!(product = %id, "product cache miss");
        let product = load()?;
        self.put_product(&product)?;
        Ok(product)
    }

    /// Forget a product after it was edited, along with every list that
    /// may show it.
    pub fn invalidate_product(&self, id: &ProductId) -> Result<(), CommerceError> {
        invalidate_product_detail(&self.cache, id.as_str())?;
        invalidate_product_lists(&self.cache)?;
        Ok(())
    }

    pub fn save_cart(&self, session: &str, cart: &Cart) -> Result<(), CommerceError> {
        self.cache.set(&cache_key!("cart", session), cart, CART_TTL_MS)?;
        Ok(())
    }

    pub fn load_cart(&self, session: &str) -> Result<Option<Cart>, CommerceError> {
        Ok(self.cache.get(&cache_key!("cart", session))?)
    }

    pub fn clear_cart(&self, session: &str) -> Result<(), CommerceError> {
        self.cache.remove(&cache_key!("cart", session))?;
        Ok(())
    }
}
