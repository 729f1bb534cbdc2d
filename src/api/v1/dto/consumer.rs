/*
 * Responsibility
 * - Response DTO for the authenticated consumer
 */
use serde::Serialize;

use crate::api::v1::extractors::AuthCtx;

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub consumer_id: String,
    pub custom_id: Option<String>,
    pub username: Option<String>,
    pub credential_claim: String,
    pub credential_key: String,
}

impl From<AuthCtx> for MeResponse {
    fn from(ctx: AuthCtx) -> Self {
        Self {
            consumer_id: ctx.consumer.id,
            custom_id: ctx.consumer.custom_id,
            username: ctx.consumer.username,
            credential_claim: ctx.credential.claim,
            credential_key: ctx.credential.value,
        }
    }
}
