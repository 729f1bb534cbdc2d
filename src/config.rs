/*
 * Responsibility
 * - Read env vars / .env (DATABASE_URL, JWT claim + param lists, cache sizing)
 * - Validate values (fail at startup when something is missing or malformed)
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use crate::services::auth::types::{AuthPolicy, RegisteredClaim};
use crate::services::cache::local as cache;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn from_env() -> Self {
        match std::env::var("APP_ENV")
            .unwrap_or_else(|_| "development".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Clone, Debug)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,

    pub database_url: String,
    pub database_max_connections: u32,

    pub auth_policy: AuthPolicy,

    pub auth_cache_ttl: Duration,
    pub auth_cache_capacity: u64,

    pub request_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let port: u16 = parse_or(env("PORT").as_deref(), "PORT", 3000)?;

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::from_env();

        let database_url =
            std::env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?;

        let database_max_connections = parse_or(
            env("DATABASE_MAX_CONNECTIONS").as_deref(),
            "DATABASE_MAX_CONNECTIONS",
            10,
        )?;

        let auth_policy = auth_policy_from(
            env("JWT_URI_PARAM_NAMES").as_deref(),
            env("JWT_KEY_CLAIM_NAMES").as_deref(),
            env("JWT_CLAIMS_TO_VERIFY").as_deref(),
            env("JWT_RUN_ON_PREFLIGHT").as_deref(),
        )?;

        let auth_cache_ttl = parse_or(
            env("AUTH_CACHE_TTL_SECONDS").as_deref(),
            "AUTH_CACHE_TTL_SECONDS",
            cache::DEFAULT_TTL.as_secs(),
        )
        .map(Duration::from_secs)?;

        let auth_cache_capacity = parse_or(
            env("AUTH_CACHE_CAPACITY").as_deref(),
            "AUTH_CACHE_CAPACITY",
            cache::DEFAULT_CAPACITY,
        )?;

        let request_timeout = parse_or(
            env("REQUEST_TIMEOUT_SECONDS").as_deref(),
            "REQUEST_TIMEOUT_SECONDS",
            30,
        )
        .map(Duration::from_secs)?;

        Ok(Self {
            addr,
            app_env,
            database_url,
            database_max_connections,
            auth_policy,
            auth_cache_ttl,
            auth_cache_capacity,
            request_timeout,
        })
    }
}

/// Build the pipeline policy from raw (possibly unset) env values.
///
/// An unset list falls back to the default; a set-but-empty list disables that source.
pub fn auth_policy_from(
    uri_param_names: Option<&str>,
    key_claim_names: Option<&str>,
    claims_to_verify: Option<&str>,
    run_on_preflight: Option<&str>,
) -> Result<AuthPolicy, ConfigError> {
    let defaults = AuthPolicy::default();

    let uri_param_names = uri_param_names
        .map(split_list)
        .unwrap_or(defaults.uri_param_names);

    let key_claim_names = key_claim_names
        .map(split_list)
        .unwrap_or(defaults.key_claim_names);

    let claims_to_verify = claims_to_verify
        .map(split_list)
        .unwrap_or_default()
        .iter()
        .map(|c| c.parse::<RegisteredClaim>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| ConfigError::Invalid("JWT_CLAIMS_TO_VERIFY"))?;

    let run_on_preflight = match run_on_preflight.map(|v| v.trim().to_ascii_lowercase()) {
        None => defaults.run_on_preflight,
        Some(v) => match v.as_str() {
            "true" | "1" | "yes" => true,
            "false" | "0" | "no" => false,
            _ => return Err(ConfigError::Invalid("JWT_RUN_ON_PREFLIGHT")),
        },
    };

    Ok(AuthPolicy {
        uri_param_names,
        key_claim_names,
        claims_to_verify,
        run_on_preflight,
    })
}

fn env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Parse a set value or fall back to `default`; a set but unparsable value is an error.
pub fn parse_or<T: FromStr>(
    raw: Option<&str>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match raw.map(str::trim) {
        None => Ok(default),
        Some(v) => v.parse().map_err(|_| ConfigError::Invalid(key)),
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
