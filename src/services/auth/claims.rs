//! Unverified (structural) JWT decoding.
//!
//! This only discovers which identity key the token claims. Nothing decoded
//! here is trusted until `verifier::verify_signature` has run on the same token.

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use serde::Deserialize;
use serde_json::{Map, Value};

pub type Claims = Map<String, Value>;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ClaimsError {
    #[error("malformed token: {0}")]
    Malformed(&'static str),
    // Carries the highest-priority configured claim name for the rejection reason.
    #[error("no mandatory '{0}' in claims")]
    NoIdentityClaim(String),
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenHeader {
    #[serde(default)]
    pub alg: Option<String>,
}

/// Structurally decoded token (signature not checked).
#[derive(Debug, Clone)]
pub struct UnverifiedToken {
    pub header: TokenHeader,
    pub claims: Claims,
}

/// Identity key found in the claims, with the claim name it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityKey {
    pub claim: String,
    pub value: String,
}

pub fn decode_unverified(token: &str) -> Result<UnverifiedToken, ClaimsError> {
    let mut parts = token.split('.');
    let (Some(header), Some(claims), Some(_signature), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(ClaimsError::Malformed("expected three segments"));
    };

    let header_bytes = decode_segment(header)?;
    let claims_bytes = decode_segment(claims)?;

    let header: TokenHeader = serde_json::from_slice(&header_bytes)
        .map_err(|_| ClaimsError::Malformed("header is not a JSON object"))?;
    let claims: Claims = serde_json::from_slice(&claims_bytes)
        .map_err(|_| ClaimsError::Malformed("claims are not a JSON object"))?;

    Ok(UnverifiedToken { header, claims })
}

fn decode_segment(segment: &str) -> Result<Vec<u8>, ClaimsError> {
    // Some issuers keep base64 padding; accept it.
    URL_SAFE_NO_PAD
        .decode(segment.trim_end_matches('='))
        .map_err(|_| ClaimsError::Malformed("segment is not base64url"))
}

/// Ordered scan over `claim_names`; the first claim present as a string wins.
pub fn identity_key(claims: &Claims, claim_names: &[String]) -> Result<IdentityKey, ClaimsError> {
    claim_names
        .iter()
        .find_map(|name| match claims.get(name) {
            Some(Value::String(value)) => Some(IdentityKey {
                claim: name.clone(),
                value: value.clone(),
            }),
            _ => None,
        })
        .ok_or_else(|| {
            ClaimsError::NoIdentityClaim(claim_names.first().cloned().unwrap_or_default())
        })
}
