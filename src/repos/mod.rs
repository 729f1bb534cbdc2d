pub mod consumer_repo;
pub mod error;
pub mod jwt_secret_repo;

pub use consumer_repo::PgConsumerStore;
pub use jwt_secret_repo::PgSecretStore;
