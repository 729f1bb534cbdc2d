use async_trait::async_trait;

use crate::repos::error::RepoError;
use crate::services::cache::CacheError;
use crate::services::auth::types::{ConsumerRecord, SecretRecord};

/// Lookup of signing secrets by identity key.
///
/// - `Ok(None)`: no record for this key (definitive, cacheable)
/// - `Err(_)`: backend failure (caller must fail closed)
#[async_trait]
pub trait SecretStore: Send + Sync {
    async fn find_by_key(&self, key: &str) -> Result<Option<SecretRecord>, RepoError>;
}

/// Lookup of consumers by primary key.
#[async_trait]
pub trait ConsumerStore: Send + Sync {
    async fn find_by_id(&self, consumer_id: &str) -> Result<Option<ConsumerRecord>, RepoError>;
}

/// Failure of a memoized lookup.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("no secret registered for identity key")]
    UnknownIdentityKey,
    #[error("backing store error: {0}")]
    BackingStore(#[from] CacheError),
}
