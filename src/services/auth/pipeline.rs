//! Authentication pipeline.
//!
//! ```text
//! Start → TokenExtracted → ClaimsDecoded → SecretResolved → SignatureVerified → ConsumerResolved
//! ```
//!
//! Every stage may stop the pipeline with a terminal `AuthOutcome`; exactly one
//! outcome is produced per request.

use axum::http::HeaderMap;

use crate::services::auth::claims::{self, IdentityKey};
use crate::services::auth::consumers::ConsumerResolver;
use crate::services::auth::extractor::extract_token;
use crate::services::auth::secrets::SecretResolver;
use crate::services::auth::store::ResolveError;
use crate::services::auth::types::{AuthPolicy, ConsumerRecord};
use crate::services::auth::verifier::{self, VerifyError};

/// Terminal result of the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    Authenticated {
        consumer: ConsumerRecord,
        key: IdentityKey,
    },
    Unauthorized(String),
    Forbidden(String),
    InternalError(String),
}

impl AuthOutcome {
    /// Definitive rejections stop any further gateway phase for the request.
    /// Internal errors do not, so other phases may still run and report.
    pub fn skips_remaining_phases(&self) -> bool {
        matches!(self, Self::Unauthorized(_) | Self::Forbidden(_))
    }
}

/// Orchestrates extraction, claim inspection, secret lookup, signature check
/// and consumer lookup for one request.
#[derive(Clone)]
pub struct Authenticator {
    policy: AuthPolicy,
    secrets: SecretResolver,
    consumers: ConsumerResolver,
}

impl std::fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Authenticator")
            .field("policy", &self.policy)
            .finish()
    }
}

impl Authenticator {
    pub fn new(policy: AuthPolicy, secrets: SecretResolver, consumers: ConsumerResolver) -> Self {
        Self {
            policy,
            secrets,
            consumers,
        }
    }

    pub fn policy(&self) -> &AuthPolicy {
        &self.policy
    }

    pub async fn authenticate(&self, query: Option<&str>, headers: &HeaderMap) -> AuthOutcome {
        match self.run(query, headers).await {
            Ok((consumer, key)) => AuthOutcome::Authenticated { consumer, key },
            Err(rejection) => rejection,
        }
    }

    async fn run(
        &self,
        query: Option<&str>,
        headers: &HeaderMap,
    ) -> Result<(ConsumerRecord, IdentityKey), AuthOutcome> {
        // Start → TokenExtracted
        let token = extract_token(query, headers, &self.policy.uri_param_names)
            .map_err(|err| {
                tracing::warn!(error = %err, "token extraction failed");
                AuthOutcome::InternalError(err.to_string())
            })?
            .ok_or_else(|| AuthOutcome::Unauthorized("no token found".to_string()))?;

        // TokenExtracted → ClaimsDecoded
        let decoded = claims::decode_unverified(&token).map_err(|err| {
            tracing::debug!(error = %err, "token could not be decoded");
            AuthOutcome::InternalError("invalid token".to_string())
        })?;
        let key = claims::identity_key(&decoded.claims, &self.policy.key_claim_names)
            .map_err(|err| AuthOutcome::Unauthorized(err.to_string()))?;

        // ClaimsDecoded → SecretResolved
        let secret = self.secrets.resolve(&key.value).await.map_err(|err| match err {
            ResolveError::UnknownIdentityKey => {
                tracing::debug!(claim = %key.claim, key = %key.value, "no secret for identity key");
                AuthOutcome::Forbidden(format!("no credentials found for given '{}'", key.claim))
            }
            ResolveError::BackingStore(err) => {
                tracing::warn!(error = %err, "secret lookup failed");
                AuthOutcome::InternalError("secret lookup failed".to_string())
            }
        })?;

        // SecretResolved → SignatureVerified (same token string, signature check on)
        verifier::verify_signature(&token, decoded.header.alg.as_deref(), &secret, &self.policy)
            .map_err(|err| match err {
                VerifyError::AlgorithmMismatch | VerifyError::InvalidSignature => {
                    tracing::debug!(
                        key = %key.value,
                        secret_id = %secret.id,
                        error = %err,
                        "token rejected"
                    );
                    AuthOutcome::Forbidden(err.to_string())
                }
                VerifyError::Expired | VerifyError::NotYetValid | VerifyError::MissingClaim(_) => {
                    AuthOutcome::Unauthorized(err.to_string())
                }
                VerifyError::Internal(_) => {
                    tracing::warn!(
                        key = %key.value,
                        secret_id = %secret.id,
                        error = %err,
                        "signature verification error"
                    );
                    AuthOutcome::InternalError("signature verification failed".to_string())
                }
            })?;

        // SignatureVerified → ConsumerResolved
        let consumer = self
            .consumers
            .resolve(&key.value, &secret.consumer_id)
            .await
            .map_err(|err| {
                tracing::warn!(error = %err, "consumer lookup failed");
                AuthOutcome::InternalError("consumer lookup failed".to_string())
            })?
            .ok_or_else(|| {
                tracing::warn!(
                    secret_id = %secret.id,
                    consumer_id = %secret.consumer_id,
                    "secret references a missing consumer"
                );
                AuthOutcome::Forbidden(format!(
                    "could not find consumer for {}={}",
                    key.claim, key.value
                ))
            })?;

        Ok((consumer, key))
    }
}
