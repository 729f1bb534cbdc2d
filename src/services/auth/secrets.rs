use std::sync::Arc;

use crate::services::auth::store::{ResolveError, SecretStore};
use crate::services::auth::types::SecretRecord;
use crate::services::cache::{Loader, MemoCache};

/// Cache namespace for secret records.
pub const SECRET_CACHE_PREFIX: &str = "jwt_secrets";

/// Identity key → signing secret, memoized.
#[derive(Clone)]
pub struct SecretResolver {
    store: Arc<dyn SecretStore>,
    cache: Arc<dyn MemoCache<SecretRecord>>,
}

impl SecretResolver {
    pub fn new(store: Arc<dyn SecretStore>, cache: Arc<dyn MemoCache<SecretRecord>>) -> Self {
        Self { store, cache }
    }

    pub fn cache_key(identity_key: &str) -> String {
        format!("{SECRET_CACHE_PREFIX}:{identity_key}")
    }

    /// Returns the record whose key equals `identity_key` byte for byte.
    pub async fn resolve(&self, identity_key: &str) -> Result<SecretRecord, ResolveError> {
        let store = &self.store;
        let loader: Loader<'_, SecretRecord> = Box::pin(async move {
            tracing::debug!(cache = "secrets", "cache miss, querying store");
            store.find_by_key(identity_key).await
        });

        self.cache
            .get_or_load(Self::cache_key(identity_key), loader)
            .await?
            .ok_or(ResolveError::UnknownIdentityKey)
    }
}
