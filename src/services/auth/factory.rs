/// Factory: build the `Authenticator` from application `Config`.
use std::{sync::Arc, time::Duration};

use sqlx::PgPool;

use crate::config::Config;
use crate::repos::{PgConsumerStore, PgSecretStore};
use crate::services::auth::{
    consumers::ConsumerResolver,
    pipeline::Authenticator,
    secrets::SecretResolver,
    store::{ConsumerStore, SecretStore},
    types::{AuthPolicy, ConsumerRecord, SecretRecord},
};
use crate::services::cache::{MemoCache, MokaMemoCache};

pub fn build_authenticator(config: &Config, db: PgPool) -> Arc<Authenticator> {
    let auth = authenticator_with_stores(
        config.auth_policy.clone(),
        Arc::new(PgSecretStore::new(db.clone())),
        Arc::new(PgConsumerStore::new(db)),
        config.auth_cache_ttl,
        config.auth_cache_capacity,
    );

    Arc::new(auth)
}

/// Wire the pipeline over arbitrary stores, each lookup kind with its own moka cache.
pub fn authenticator_with_stores(
    policy: AuthPolicy,
    secret_store: Arc<dyn SecretStore>,
    consumer_store: Arc<dyn ConsumerStore>,
    cache_ttl: Duration,
    cache_capacity: u64,
) -> Authenticator {
    let secret_cache = Arc::new(MokaMemoCache::<SecretRecord>::new(cache_ttl, cache_capacity));
    let consumer_cache = Arc::new(MokaMemoCache::<ConsumerRecord>::new(
        cache_ttl,
        cache_capacity,
    ));

    tracing::debug!(
        backend = secret_cache.backend_name(),
        ttl_seconds = cache_ttl.as_secs(),
        capacity = cache_capacity,
        "auth lookup caches ready"
    );

    let secrets = SecretResolver::new(secret_store, secret_cache);
    let consumers = ConsumerResolver::new(consumer_store, consumer_cache);

    Authenticator::new(policy, secrets, consumers)
}
