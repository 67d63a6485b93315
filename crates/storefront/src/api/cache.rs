//! Cache for product listing responses.

use std::time::Duration;

use moka::future::Cache;

use super::types::{ProductFilter, ProductPage};

/// Upper bound on cached listings.
const MAX_CACHED_PAGES: u64 = 1000;

/// Cache key for product listings.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub enum CacheKey {
    Products(Vec<(&'static str, String)>),
    Condition(String),
}

impl CacheKey {
    pub fn products(filter: &ProductFilter) -> Self {
        Self::Products(filter.query_pairs())
    }

    pub fn condition(condition: &str) -> Self {
        Self::Condition(condition.to_string())
    }
}

/// Listing cache; a `None` TTL disables it entirely.
#[derive(Clone)]
pub struct ListingCache {
    inner: Option<Cache<CacheKey, ProductPage>>,
}

impl ListingCache {
    pub fn new(ttl: Option<Duration>) -> Self {
        let inner = ttl.map(|ttl| {
            Cache::builder()
                .max_capacity(MAX_CACHED_PAGES)
                .time_to_live(ttl)
                .build()
        });
        Self { inner }
    }

    pub async fn get(&self, key: &CacheKey) -> Option<ProductPage> {
        match &self.inner {
            Some(cache) => cache.get(key).await,
            None => None,
        }
    }

    pub async fn insert(&self, key: CacheKey, page: ProductPage) {
        if let Some(cache) = &self.inner {
            cache.insert(key, page).await;
        }
    }

    pub fn invalidate_all(&self) {
        if let Some(cache) = &self.inner {
            cache.invalidate_all();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_disabled_cache_never_hits() {
        let cache = ListingCache::new(None);
        let key = CacheKey::products(&ProductFilter::default());
        cache.insert(key.clone(), ProductPage::default()).await;
        assert!(cache.get(&key).await.is_none());
    }

    #[tokio::test]
    async fn test_enabled_cache_hits_by_filter() {
        let cache = ListingCache::new(Some(Duration::from_secs(60)));
        cache
            .insert(
                CacheKey::products(&ProductFilter::keyword("bag")),
                ProductPage::default(),
            )
            .await;

        assert!(
            cache
                .get(&CacheKey::products(&ProductFilter::keyword("bag")))
                .await
                .is_some()
        );
        assert!(
            cache
                .get(&CacheKey::products(&ProductFilter::keyword("shoes")))
                .await
                .is_none()
        );
        assert!(cache.get(&CacheKey::condition("bag")).await.is_none());
    }
}
