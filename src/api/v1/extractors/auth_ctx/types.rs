/*
 * Responsibility
 * - The "authenticated context" type handlers see
 * - The JWT middleware builds it after the pipeline succeeds and stores it in
 *   request extensions; handlers only receive this type
 */
use crate::services::auth::{ConsumerRecord, claims::IdentityKey};

/// Context attached to every authenticated request.
///
/// - `consumer` is the resolved principal
/// - `credential` is the identity key (and the claim it came from) that selected the secret
#[derive(Debug, Clone)]
pub struct AuthCtx {
    pub consumer: ConsumerRecord,
    pub credential: IdentityKey,
}

impl AuthCtx {
    pub fn new(consumer: ConsumerRecord, credential: IdentityKey) -> Self {
        Self {
            consumer,
            credential,
        }
    }
}
