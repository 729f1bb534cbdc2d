/*
 * Responsibility
 * - Records the pipeline reads from the stores (SecretRecord / ConsumerRecord)
 * - AuthPolicy: the knobs the pipeline needs, kept apart from `Config`
 *   so the core stays testable without env vars
 */
use std::str::FromStr;

use serde::Serialize;

/// Signing secret registered for one identity key.
///
/// - Key material is intentionally not printable via Debug.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretRecord {
    pub id: String,
    /// Identity key (unique). Matched against the configured key claim.
    pub key: String,
    pub secret: String,
    /// JWS algorithm name as stored (`HS256`, `RS256`, ...).
    pub algorithm: String,
    pub rsa_public_key: Option<String>,
    pub consumer_id: String,
}

impl std::fmt::Debug for SecretRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print key material
        f.debug_struct("SecretRecord")
            .field("id", &self.id)
            .field("key", &self.key)
            .field("algorithm", &self.algorithm)
            .field("consumer_id", &self.consumer_id)
            .finish()
    }
}

/// The authenticated principal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConsumerRecord {
    pub id: String,
    pub custom_id: Option<String>,
    pub username: Option<String>,
}

/// Registered claims that can be enforced after the signature check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisteredClaim {
    Exp,
    Nbf,
}

impl RegisteredClaim {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Exp => "exp",
            Self::Nbf => "nbf",
        }
    }
}

impl FromStr for RegisteredClaim {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "exp" => Ok(Self::Exp),
            "nbf" => Ok(Self::Nbf),
            other => Err(format!("unsupported claim to verify: {other}")),
        }
    }
}

/// Pipeline policy.
///
/// Both name lists are ordered by priority; an empty list disables that source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthPolicy {
    pub uri_param_names: Vec<String>,
    pub key_claim_names: Vec<String>,
    pub claims_to_verify: Vec<RegisteredClaim>,
    // If false, CORS preflight (OPTIONS) requests skip authentication.
    pub run_on_preflight: bool,
}

impl Default for AuthPolicy {
    fn default() -> Self {
        Self {
            uri_param_names: vec!["jwt".to_string()],
            key_claim_names: vec!["iss".to_string()],
            claims_to_verify: Vec::new(),
            run_on_preflight: true,
        }
    }
}

impl AuthPolicy {
    pub fn verifies(&self, claim: RegisteredClaim) -> bool {
        self.claims_to_verify.contains(&claim)
    }
}
