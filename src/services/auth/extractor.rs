//! Token extraction: query parameters first, then the `Authorization` header.

use axum::http::{HeaderMap, header};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("authorization header is not valid visible ASCII")]
    UnreadableHeader,
}

const BEARER: &str = "bearer";

/// Locate a candidate token.
///
/// - `query` is the raw (still percent-encoded) query string, if any.
/// - The first name in `param_names` present in the query wins, even with an empty value.
/// - Otherwise the `Authorization` header is matched as `[bearer] <token>`.
///
/// Returns `Ok(None)` when neither source carries a token.
pub fn extract_token(
    query: Option<&str>,
    headers: &HeaderMap,
    param_names: &[String],
) -> Result<Option<String>, ExtractionError> {
    if let Some(token) = query.and_then(|q| from_query(q, param_names)) {
        return Ok(Some(token));
    }

    let Some(value) = headers.get(header::AUTHORIZATION) else {
        return Ok(None);
    };
    let value = value
        .to_str()
        .map_err(|_| ExtractionError::UnreadableHeader)?;

    Ok(from_authorization(value).map(str::to_string))
}

fn from_query(query: &str, param_names: &[String]) -> Option<String> {
    if param_names.is_empty() {
        return None;
    }

    let pairs: Vec<(String, String)> = url::form_urlencoded::parse(query.as_bytes())
        .into_owned()
        .collect();

    // Priority is the configured order, not the order in the URI.
    param_names.iter().find_map(|name| {
        pairs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.clone())
    })
}

/// Match `\s*(bearer)?\s*(\S+)\s*` case-insensitively and return the token body.
fn from_authorization(value: &str) -> Option<&str> {
    let value = value.trim();

    let body = match value.get(..BEARER.len()) {
        Some(scheme) if scheme.eq_ignore_ascii_case(BEARER) => {
            value.get(BEARER.len()..).unwrap_or_default().trim_start()
        }
        _ => value,
    };

    if body.is_empty() || body.contains(char::is_whitespace) {
        return None;
    }

    Some(body)
}
