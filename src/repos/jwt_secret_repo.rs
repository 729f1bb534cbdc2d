/*
 * Responsibility
 * - SQLx access to the jwt_secrets table
 * - Exactly one row per key; more than one is reported as RepoError::DuplicateKey
 */
use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use crate::repos::error::RepoError;
use crate::services::auth::{store::SecretStore, types::SecretRecord};

#[derive(Debug, FromRow)]
pub struct JwtSecretRow {
    pub id: String,
    pub key: String,
    pub secret: String,
    pub algorithm: String,
    pub rsa_public_key: Option<String>,
    pub consumer_id: String,
}

impl From<JwtSecretRow> for SecretRecord {
    fn from(row: JwtSecretRow) -> Self {
        Self {
            id: row.id,
            key: row.key,
            secret: row.secret,
            algorithm: row.algorithm,
            rsa_public_key: row.rsa_public_key,
            consumer_id: row.consumer_id,
        }
    }
}

pub async fn find_by_key(db: &PgPool, key: &str) -> Result<Option<JwtSecretRow>, RepoError> {
    // LIMIT 2 is enough to tell "one" from "more than one".
    let mut rows = sqlx::query_as::<_, JwtSecretRow>(
        r#"
        SELECT id, key, secret, algorithm, rsa_public_key, consumer_id
        FROM jwt_secrets
        WHERE key = $1
        LIMIT 2
        "#,
    )
    .bind(key)
    .fetch_all(db)
    .await?;

    if rows.len() > 1 {
        return Err(RepoError::DuplicateKey {
            key: key.to_string(),
        });
    }

    Ok(rows.pop())
}

/// Postgres-backed `SecretStore`.
#[derive(Clone, Debug)]
pub struct PgSecretStore {
    db: PgPool,
}

impl PgSecretStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SecretStore for PgSecretStore {
    async fn find_by_key(&self, key: &str) -> Result<Option<SecretRecord>, RepoError> {
        let row = find_by_key(&self.db, key).await?;
        Ok(row.map(SecretRecord::from))
    }
}
