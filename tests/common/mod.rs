//! Shared fixtures for the gateway integration tests: in-memory stores with
//! call counters, token minting and a router with an echo upstream.

#![allow(dead_code, clippy::unwrap_used, clippy::expect_used)]

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    Json, Router,
    body::Body,
    http::{HeaderMap, Request, Response},
    routing::get,
};
use http_body_util::BodyExt;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde_json::{Value, json};

use jwt_gateway::middleware::auth::jwt;
use jwt_gateway::repos::error::RepoError;
use jwt_gateway::services::auth::factory::authenticator_with_stores;
use jwt_gateway::services::auth::store::{ConsumerStore, SecretStore};
use jwt_gateway::services::auth::{AuthPolicy, Authenticator, ConsumerRecord, SecretRecord};
use jwt_gateway::state::AppState;

pub const KEY: &str = "key123";
pub const SECRET: &str = "s3cr3t";

#[derive(Default)]
pub struct MockSecretStore {
    records: HashMap<String, SecretRecord>,
    calls: AtomicUsize,
    fail: bool,
    delay: Duration,
}

impl MockSecretStore {
    pub fn with(records: Vec<SecretRecord>) -> Self {
        Self {
            records: records.into_iter().map(|r| (r.key.clone(), r)).collect(),
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SecretStore for MockSecretStore {
    async fn find_by_key(&self, key: &str) -> Result<Option<SecretRecord>, RepoError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        if self.fail {
            return Err(RepoError::Db(sqlx::Error::PoolTimedOut));
        }
        Ok(self.records.get(key).cloned())
    }
}

#[derive(Default)]
pub struct MockConsumerStore {
    records: HashMap<String, ConsumerRecord>,
    calls: AtomicUsize,
    fail: bool,
    delay: Duration,
}

impl MockConsumerStore {
    pub fn with(records: Vec<ConsumerRecord>) -> Self {
        Self {
            records: records.into_iter().map(|r| (r.id.clone(), r)).collect(),
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ConsumerStore for MockConsumerStore {
    async fn find_by_id(&self, consumer_id: &str) -> Result<Option<ConsumerRecord>, RepoError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        if self.fail {
            return Err(RepoError::Db(sqlx::Error::PoolTimedOut));
        }
        Ok(self.records.get(consumer_id).cloned())
    }
}

pub fn secret_record(key: &str, secret: &str, consumer_id: &str) -> SecretRecord {
    SecretRecord {
        id: format!("secret-{key}"),
        key: key.to_string(),
        secret: secret.to_string(),
        algorithm: "HS256".to_string(),
        rsa_public_key: None,
        consumer_id: consumer_id.to_string(),
    }
}

pub fn bob() -> ConsumerRecord {
    ConsumerRecord {
        id: "c1".to_string(),
        custom_id: Some("cc1".to_string()),
        username: Some("bob".to_string()),
    }
}

pub fn sign(claims: Value, secret: &str) -> String {
    jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .expect("sign token")
}

pub fn valid_token() -> String {
    sign(json!({ "iss": KEY }), SECRET)
}

pub struct Fixture {
    pub secrets: Arc<MockSecretStore>,
    pub consumers: Arc<MockConsumerStore>,
    pub auth: Arc<Authenticator>,
}

impl Fixture {
    /// key123 → s3cr3t → c1 (bob), default policy.
    pub fn standard() -> Self {
        Self::with_stores(
            AuthPolicy::default(),
            MockSecretStore::with(vec![secret_record(KEY, SECRET, "c1")]),
            MockConsumerStore::with(vec![bob()]),
        )
    }

    pub fn with_stores(
        policy: AuthPolicy,
        secrets: MockSecretStore,
        consumers: MockConsumerStore,
    ) -> Self {
        let secrets = Arc::new(secrets);
        let consumers = Arc::new(consumers);
        let auth = authenticator_with_stores(
            policy,
            secrets.clone(),
            consumers.clone(),
            Duration::from_secs(60),
            1_000,
        );

        Self {
            secrets,
            consumers,
            auth: Arc::new(auth),
        }
    }

    /// `/echo` behind the JWT middleware; it returns the identity headers it received.
    pub fn router(&self) -> Router {
        let state = AppState::new(self.auth.clone());
        let upstream = Router::new().route("/echo", get(echo_identity).options(echo_identity));

        jwt::apply(upstream, state.clone()).with_state(state)
    }
}

async fn echo_identity(headers: HeaderMap) -> Json<Value> {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };

    Json(json!({
        "consumer-id": header("consumer-id"),
        "consumer-custom-id": header("consumer-custom-id"),
        "consumer-username": header("consumer-username"),
    }))
}

pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request")
}

pub fn get_with_auth(uri: &str, authorization: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header("authorization", authorization)
        .body(Body::empty())
        .expect("request")
}

pub async fn read_text(response: Response<Body>) -> String {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}

pub async fn read_json(response: Response<Body>) -> Value {
    serde_json::from_str(&read_text(response).await).expect("json")
}
