pub mod claims;
pub mod consumers;
pub mod extractor;
pub mod factory;
pub mod pipeline;
pub mod secrets;
pub mod store;
pub mod types;
pub mod verifier;

pub use factory::build_authenticator;
pub use pipeline::{AuthOutcome, Authenticator};
pub use types::{AuthPolicy, ConsumerRecord, SecretRecord};
