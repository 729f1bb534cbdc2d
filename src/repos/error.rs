/*
 * Responsibility
 * - Meaning the repo layer passes upward
 * - The auth pipeline maps every variant to an internal error (fail closed)
 */
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("db error")]
    Db(#[from] sqlx::Error),
    // More than one jwt_secrets row shares a key; the unique constraint is missing or was bypassed.
    #[error("duplicate jwt secret key: {key}")]
    DuplicateKey { key: String },
}
