//! Cached access to the aggregated menus.

use std::sync::Arc;
use std::time::Duration;

use futures::future::BoxFuture;
use lunch_core::RestaurantMenus;
use lunch_scraper::Aggregator;
use serde::Serialize;
use tokio::sync::Mutex;

use crate::cache::MemoryCache;

pub const CACHE_KEY: &str = "restaurant_menus";

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("menu aggregation task failed: {0}")]
    Aggregation(#[from] tokio::task::JoinError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStatus {
    pub has_data: bool,
    pub size: usize,
}

/// Produces a fresh set of menus for every source.
pub trait MenuSource: Send + Sync {
    fn collect(&self) -> BoxFuture<'_, RestaurantMenus>;
}

impl MenuSource for Aggregator {
    fn collect(&self) -> BoxFuture<'_, RestaurantMenus> {
        Box::pin(Aggregator::collect(self))
    }
}

/// Serves menus from the cache and refreshes them through a
/// [`MenuSource`].
///
/// Refresh cycles are serialized: at most one aggregation runs at a time,
/// and a caller that waited on a running cycle reuses its result on a
/// cache read. The lock also keeps the last successful aggregation, which
/// is served when a later cycle fails, even after it left the cache.
pub struct MenuService {
    source: Arc<dyn MenuSource>,
    cache: MemoryCache<RestaurantMenus>,
    ttl: Duration,
    last_good: Mutex<Option<RestaurantMenus>>,
}

impl MenuService {
    #[must_use]
    pub fn new(source: impl MenuSource + 'static, ttl: Duration) -> Self {
        Self {
            source: Arc::new(source),
            cache: MemoryCache::new(),
            ttl,
            last_good: Mutex::new(None),
        }
    }

    /// Returns cached menus, aggregating on a miss.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError`] if aggregation fails and no earlier
    /// aggregation succeeded.
    pub async fn get_menus(&self) -> Result<RestaurantMenus, ServiceError> {
        if let Some(menus) = self.cache.get(CACHE_KEY).await {
            tracing::debug!("serving menus from cache");
            return Ok(menus);
        }

        let mut last_good = self.last_good.lock().await;
        if let Some(menus) = self.cache.get(CACHE_KEY).await {
            tracing::debug!("menus cached by concurrent refresh");
            return Ok(menus);
        }

        tracing::info!("cache miss, fetching fresh menus");
        self.fetch_and_cache(&mut last_good).await
    }

    /// Aggregates unconditionally and replaces the cached value.
    ///
    /// # Errors
    ///
    /// Same as [`Self::get_menus`].
    pub async fn refresh_menus(&self) -> Result<RestaurantMenus, ServiceError> {
        let mut last_good = self.last_good.lock().await;
        tracing::info!("refreshing menus");
        self.fetch_and_cache(&mut last_good).await
    }

    pub async fn cache_status(&self) -> CacheStatus {
        CacheStatus {
            has_data: self.cache.has(CACHE_KEY).await,
            size: self.cache.size().await,
        }
    }

    async fn fetch_and_cache(
        &self,
        last_good: &mut Option<RestaurantMenus>,
    ) -> Result<RestaurantMenus, ServiceError> {
        let source = Arc::clone(&self.source);
        let outcome = tokio::spawn(async move { source.collect().await }).await;

        match outcome {
            Ok(menus) => {
                self.cache.set(CACHE_KEY, menus.clone(), self.ttl).await;
                *last_good = Some(menus.clone());
                tracing::info!(
                    ttl_minutes = self.ttl.as_secs() / 60,
                    entries = menus.entry_count(),
                    "cached menus"
                );
                Ok(menus)
            }
            Err(e) => {
                tracing::error!(error = %e, "menu aggregation failed");
                if let Some(stale) = last_good.as_ref() {
                    tracing::warn!("serving stale menus after failed refresh");
                    return Ok(stale.clone());
                }
                Err(ServiceError::Aggregation(e))
            }
        }
    }
}

#[cfg(test)]
#[path = "service_test.rs"]
mod tests;
