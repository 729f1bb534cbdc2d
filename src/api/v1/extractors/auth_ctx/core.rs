use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AppError;
use crate::state::AppState;

use super::AuthCtx;

/// Hands the consumer attached by the JWT middleware to a handler.
///
/// A route mounted outside the middleware has no `AuthCtx`; such requests are
/// refused with the same plain-text 401 the middleware would produce.
pub struct AuthCtxExtractor(pub AuthCtx);

impl FromRequestParts<AppState> for AuthCtxExtractor {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match parts.extensions.get::<AuthCtx>() {
            Some(ctx) => Ok(AuthCtxExtractor(ctx.clone())),
            None => {
                tracing::warn!(path = %parts.uri.path(), "handler reached without authenticated consumer");
                Err(AppError::Unauthorized("no authenticated consumer".to_string()))
            }
        }
    }
}
