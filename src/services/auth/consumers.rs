use std::sync::Arc;

use crate::services::auth::store::{ConsumerStore, ResolveError};
use crate::services::auth::types::ConsumerRecord;
use crate::services::cache::{Loader, MemoCache};

/// Cache namespace for consumer records.
pub const CONSUMER_CACHE_PREFIX: &str = "consumers";

/// Secret owner → consumer, memoized.
#[derive(Clone)]
pub struct ConsumerResolver {
    store: Arc<dyn ConsumerStore>,
    cache: Arc<dyn MemoCache<ConsumerRecord>>,
}

impl ConsumerResolver {
    pub fn new(store: Arc<dyn ConsumerStore>, cache: Arc<dyn MemoCache<ConsumerRecord>>) -> Self {
        Self { store, cache }
    }

    // Keyed by the identity key, not the consumer id. Two keys owned by one
    // consumer get two entries; invalidation by identity key relies on this.
    pub fn cache_key(identity_key: &str) -> String {
        format!("{CONSUMER_CACHE_PREFIX}:{identity_key}")
    }

    /// `Ok(None)` means the secret points at a consumer that does not exist.
    pub async fn resolve(
        &self,
        identity_key: &str,
        consumer_id: &str,
    ) -> Result<Option<ConsumerRecord>, ResolveError> {
        let store = &self.store;
        let loader: Loader<'_, ConsumerRecord> = Box::pin(async move {
            tracing::debug!(cache = "consumers", "cache miss, querying store");
            store.find_by_id(consumer_id).await
        });

        let consumer = self
            .cache
            .get_or_load(Self::cache_key(identity_key), loader)
            .await?;

        Ok(consumer)
    }
}
