//! JWT authentication middleware: run the pipeline, then either reject or
//! attach the consumer and let the request continue.
//!
//! On success:
//! - `AuthCtx` is inserted into request extensions (read by `AuthCtxExtractor`)
//! - `consumer-id` / `consumer-custom-id` / `consumer-username` are set on the request
//!
//! On rejection the inner service is never called and no identity header is set.

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{HeaderMap, HeaderName, HeaderValue, Method, Request},
    middleware::{self, Next},
    response::{IntoResponse, Response},
};

use crate::api::v1::extractors::AuthCtx;
use crate::error::AppError;
use crate::services::auth::{AuthOutcome, ConsumerRecord};
use crate::state::AppState;

pub const CONSUMER_ID_HEADER: HeaderName = HeaderName::from_static("consumer-id");
pub const CONSUMER_CUSTOM_ID_HEADER: HeaderName = HeaderName::from_static("consumer-custom-id");
pub const CONSUMER_USERNAME_HEADER: HeaderName = HeaderName::from_static("consumer-username");

/// Phase-skip flag. Present on a response when authentication reached a
/// definitive rejection and no further gateway phase may run for the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkipRemainingPhases;

/// Put the JWT middleware in front of `router`.
///
/// ```ignore
/// let v1 = Router::new().route("/me", get(me));
/// let v1 = middleware::auth::jwt::apply(v1, state.clone());
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    router.layer(middleware::from_fn_with_state(state, jwt_middleware))
}

async fn jwt_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    if req.method() == Method::OPTIONS && !state.auth.policy().run_on_preflight {
        return next.run(req).await;
    }

    let outcome = state
        .auth
        .authenticate(req.uri().query(), req.headers())
        .await;

    let (consumer, key) = match outcome {
        AuthOutcome::Authenticated { consumer, key } => (consumer, key),
        rejection => return reject(rejection),
    };

    if let Err(err) = set_identity_headers(req.headers_mut(), &consumer) {
        tracing::warn!(consumer_id = %consumer.id, error = %err, "consumer not representable as headers");
        return AppError::Internal("invalid consumer identity".to_string()).into_response();
    }

    tracing::debug!(consumer_id = %consumer.id, claim = %key.claim, "request authenticated");

    // middleware → extractor
    req.extensions_mut().insert(AuthCtx::new(consumer, key));

    next.run(req).await
}

fn reject(outcome: AuthOutcome) -> Response {
    let skip = outcome.skips_remaining_phases();

    let Some(err) = AppError::from_outcome(outcome) else {
        return AppError::Internal("unexpected authentication outcome".to_string()).into_response();
    };

    let mut response = err.into_response();
    if skip {
        response.extensions_mut().insert(SkipRemainingPhases);
    }
    response
}

/// Overwrite the identity headers. Absent optional attributes remove the
/// header so a client-supplied value never reaches the upstream.
pub fn set_identity_headers(
    headers: &mut HeaderMap,
    consumer: &ConsumerRecord,
) -> Result<(), axum::http::header::InvalidHeaderValue> {
    let entries = [
        (CONSUMER_ID_HEADER, Some(consumer.id.as_str())),
        (CONSUMER_CUSTOM_ID_HEADER, consumer.custom_id.as_deref()),
        (CONSUMER_USERNAME_HEADER, consumer.username.as_deref()),
    ];

    // Validate everything first so a failure leaves the headers untouched.
    let mut values = Vec::with_capacity(entries.len());
    for (name, value) in entries {
        let value = value.map(HeaderValue::from_str).transpose()?;
        values.push((name, value));
    }

    for (name, value) in values {
        match value {
            Some(value) => {
                headers.insert(name, value);
            }
            None => {
                headers.remove(name);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn consumer(custom_id: Option<&str>, username: Option<&str>) -> ConsumerRecord {
        ConsumerRecord {
            id: "c1".into(),
            custom_id: custom_id.map(str::to_string),
            username: username.map(str::to_string),
        }
    }

    #[test]
    fn test_identity_headers_are_overwritten() {
        let mut headers = HeaderMap::new();
        headers.insert(CONSUMER_ID_HEADER, HeaderValue::from_static("spoofed"));

        set_identity_headers(&mut headers, &consumer(Some("cc1"), Some("bob"))).unwrap();

        assert_eq!(headers.get(CONSUMER_ID_HEADER).unwrap(), "c1");
        assert_eq!(headers.get(CONSUMER_CUSTOM_ID_HEADER).unwrap(), "cc1");
        assert_eq!(headers.get(CONSUMER_USERNAME_HEADER).unwrap(), "bob");
    }

    #[test]
    fn test_absent_attributes_remove_client_headers() {
        let mut headers = HeaderMap::new();
        headers.insert(CONSUMER_USERNAME_HEADER, HeaderValue::from_static("mallory"));

        set_identity_headers(&mut headers, &consumer(None, None)).unwrap();

        assert_eq!(headers.get(CONSUMER_ID_HEADER).unwrap(), "c1");
        assert!(headers.get(CONSUMER_CUSTOM_ID_HEADER).is_none());
        assert!(headers.get(CONSUMER_USERNAME_HEADER).is_none());
    }

    #[test]
    fn test_invalid_value_leaves_headers_untouched() {
        let mut headers = HeaderMap::new();
        let result = set_identity_headers(&mut headers, &consumer(None, Some("bad\nname")));

        assert!(result.is_err());
        assert!(headers.is_empty());
    }

    #[test]
    fn test_reject_sets_skip_flag_only_for_rejections() {
        let response = reject(AuthOutcome::Forbidden("invalid signature".into()));
        assert_eq!(response.status(), axum::http::StatusCode::FORBIDDEN);
        assert!(response.extensions().get::<SkipRemainingPhases>().is_some());

        let response = reject(AuthOutcome::InternalError("secret lookup failed".into()));
        assert_eq!(
            response.status(),
            axum::http::StatusCode::INTERNAL_SERVER_ERROR
        );
        assert!(response.extensions().get::<SkipRemainingPhases>().is_none());
    }
}
