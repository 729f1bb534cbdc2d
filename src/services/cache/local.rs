use async_trait::async_trait;
use moka::future::Cache;
use std::time::Duration;

use crate::services::cache::client::{CacheError, CacheResult, Loader, MemoCache};

/// Default cache TTL (5 minutes).
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

/// Default maximum number of entries.
pub const DEFAULT_CAPACITY: u64 = 10_000;

/// In-process memo cache backed by `moka`.
///
/// `try_get_with` gives us the single-flight guarantee: concurrent misses on
/// one key are coalesced into one loader run.
#[derive(Clone)]
pub struct MokaMemoCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    cache: Cache<String, Option<V>>,
}

impl<V> MokaMemoCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    pub fn new(ttl: Duration, capacity: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(capacity)
            .time_to_live(ttl)
            .build();

        Self { cache }
    }
}

impl<V> Default for MokaMemoCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new(DEFAULT_TTL, DEFAULT_CAPACITY)
    }
}

#[async_trait]
impl<V> MemoCache<V> for MokaMemoCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    fn backend_name(&self) -> &'static str {
        "moka"
    }

    async fn get_or_load<'a>(
        &'a self,
        key: String,
        loader: Loader<'a, V>,
    ) -> CacheResult<Option<V>> {
        self.cache
            .try_get_with(key, loader)
            .await
            .map_err(CacheError::Load)
    }
}
