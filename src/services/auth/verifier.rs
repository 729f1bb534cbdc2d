//! Signature verification (second, trusted decode of the same token).
//!
//! - The key is built from the stored record as-is (no derivation, no normalisation).
//! - The token header `alg` must match the algorithm registered for the secret.
//! - `exp` / `nbf` are only enforced when listed in `AuthPolicy::claims_to_verify`.

use std::str::FromStr;

use jsonwebtoken::{Algorithm, DecodingKey, Validation, errors::ErrorKind};

use crate::services::auth::claims::Claims;
use crate::services::auth::types::{AuthPolicy, SecretRecord};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum VerifyError {
    #[error("invalid algorithm")]
    AlgorithmMismatch,
    #[error("invalid signature")]
    InvalidSignature,
    #[error("token expired")]
    Expired,
    #[error("token not valid yet")]
    NotYetValid,
    #[error("token missing {0} claim")]
    MissingClaim(String),
    #[error("signature verification failed: {0}")]
    Internal(String),
}

/// Verify `token` against `secret`.
///
/// `header_alg` is the `alg` read during the unverified decode of this same token.
pub fn verify_signature(
    token: &str,
    header_alg: Option<&str>,
    secret: &SecretRecord,
    policy: &AuthPolicy,
) -> Result<(), VerifyError> {
    let algorithm = Algorithm::from_str(&secret.algorithm).map_err(|_| {
        VerifyError::Internal(format!("unsupported algorithm '{}'", secret.algorithm))
    })?;

    if header_alg != Some(secret.algorithm.as_str()) {
        return Err(VerifyError::AlgorithmMismatch);
    }

    let key = decoding_key(algorithm, secret)?;
    let validation = validation_for(algorithm, policy);

    // Claims were already consumed by the unverified decode; only the verdict matters here.
    jsonwebtoken::decode::<Claims>(token, &key, &validation)
        .map(|_| ())
        .map_err(|e| match e.kind() {
            ErrorKind::InvalidSignature => VerifyError::InvalidSignature,
            ErrorKind::InvalidAlgorithm => VerifyError::AlgorithmMismatch,
            ErrorKind::ExpiredSignature => VerifyError::Expired,
            ErrorKind::ImmatureSignature => VerifyError::NotYetValid,
            ErrorKind::MissingRequiredClaim(claim) => VerifyError::MissingClaim(claim.clone()),
            _ => VerifyError::Internal(e.to_string()),
        })
}

fn decoding_key(algorithm: Algorithm, secret: &SecretRecord) -> Result<DecodingKey, VerifyError> {
    use Algorithm::*;

    match algorithm {
        HS256 | HS384 | HS512 => Ok(DecodingKey::from_secret(secret.secret.as_bytes())),
        _ => {
            let pem = secret
                .rsa_public_key
                .as_deref()
                .ok_or_else(|| VerifyError::Internal("missing public key".to_string()))?;
            let key = match algorithm {
                ES256 | ES384 => DecodingKey::from_ec_pem(pem.as_bytes()),
                EdDSA => DecodingKey::from_ed_pem(pem.as_bytes()),
                _ => DecodingKey::from_rsa_pem(pem.as_bytes()),
            };
            key.map_err(|e| VerifyError::Internal(format!("invalid public key pem: {e}")))
        }
    }
}

fn validation_for(algorithm: Algorithm, policy: &AuthPolicy) -> Validation {
    use crate::services::auth::types::RegisteredClaim;

    let mut validation = Validation::new(algorithm);
    validation.validate_aud = false;
    validation.validate_exp = policy.verifies(RegisteredClaim::Exp);
    validation.validate_nbf = policy.verifies(RegisteredClaim::Nbf);
    validation.required_spec_claims = policy
        .claims_to_verify
        .iter()
        .map(|c| c.as_str().to_string())
        .collect();
    validation.leeway = 0;
    validation
}
