/*
 * Responsibility
 * - GET /api/v1/me: echo the consumer the JWT middleware attached
 */
use axum::Json;

use crate::api::v1::{dto::consumer::MeResponse, extractors::AuthCtxExtractor};

pub async fn me(AuthCtxExtractor(ctx): AuthCtxExtractor) -> Json<MeResponse> {
    Json(MeResponse::from(ctx))
}
