//! Memoized-lookup interface used by the auth pipeline (secret / consumer lookups).
use async_trait::async_trait;
use std::{future::Future, pin::Pin, sync::Arc};
use thiserror::Error;

use crate::repos::error::RepoError;

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// What a loader yields: `Ok(None)` is a definitive "not found" and is cached too.
pub type LoadResult<V> = Result<Option<V>, RepoError>;

/// Backing-store lookup run on a cache miss.
pub type Loader<'a, V> = Pin<Box<dyn Future<Output = LoadResult<V>> + Send + 'a>>;

/// Cache-layer errors.
///
/// Note:
/// - Loader failures are shared between every caller coalesced on the same key,
///   hence the `Arc`. Failures are never cached.
#[derive(Debug, Error, Clone)]
pub enum CacheError {
    #[error("cache loader failed: {0}")]
    Load(Arc<RepoError>),
}

/// Get-or-compute cache with single-flight per key.
///
/// Contract:
/// - A hit never calls the loader.
/// - Concurrent misses on the same key run the loader at most once; the other
///   callers wait for (and share) its result.
/// - Entries expire on the implementation's TTL; the pipeline never manages lifetimes.
#[async_trait]
pub trait MemoCache<V>: Send + Sync
where
    V: Clone + Send + Sync + 'static,
{
    // Returns the cache backend name (for logging).
    fn backend_name(&self) -> &'static str;

    async fn get_or_load<'a>(&'a self, key: String, loader: Loader<'a, V>)
    -> CacheResult<Option<V>>;
}
