/*
 * Responsibility
 * - SQLx access to the consumers table (lookup by primary key only)
 */
use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use crate::repos::error::RepoError;
use crate::services::auth::{store::ConsumerStore, types::ConsumerRecord};

#[derive(Debug, FromRow)]
pub struct ConsumerRow {
    pub id: String,
    pub custom_id: Option<String>,
    pub username: Option<String>,
}

impl From<ConsumerRow> for ConsumerRecord {
    fn from(row: ConsumerRow) -> Self {
        Self {
            id: row.id,
            custom_id: row.custom_id,
            username: row.username,
        }
    }
}

pub async fn get(db: &PgPool, consumer_id: &str) -> Result<Option<ConsumerRow>, RepoError> {
    let row = sqlx::query_as::<_, ConsumerRow>(
        r#"
        SELECT id, custom_id, username
        FROM consumers
        WHERE id = $1
        "#,
    )
    .bind(consumer_id)
    .fetch_optional(db)
    .await?;

    Ok(row)
}

/// Postgres-backed `ConsumerStore`.
#[derive(Clone, Debug)]
pub struct PgConsumerStore {
    db: PgPool,
}

impl PgConsumerStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ConsumerStore for PgConsumerStore {
    async fn find_by_id(&self, consumer_id: &str) -> Result<Option<ConsumerRecord>, RepoError> {
        let row = get(&self.db, consumer_id).await?;
        Ok(row.map(ConsumerRecord::from))
    }
}
