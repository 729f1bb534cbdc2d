/*
 * Responsibility
 * - Load Config → build dependencies (PgPool, Authenticator) → assemble the Router
 * - Apply middleware (HTTP layers outside, JWT on /api/v1)
 * - Start with axum::serve()
 */
use std::{panic, process, time::Duration};

use anyhow::Result;
use axum::{Router, routing::get};
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api::{self, v1::handlers::health::health};
use crate::config::Config;
use crate::middleware;
use crate::services::auth::build_authenticator;
use crate::state::AppState;

fn init_tracing() {
    // Prefer RUST_LOG if set; otherwise use a sensible default.
    // Ex:
    // RUST_LOG=info,jwt_gateway=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    // Keep the default hook as a fallback (prints to stderr with location/payload).
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        // Always surface panics via tracing so they don't get lost.
        tracing::error!(?info, "panic");

        // In development, fail fast. In production, keep serving.
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env()?;

    let abort_on_panic = !config.app_env.is_production();
    init_panic_hook(abort_on_panic);

    tracing::info!(
        "starting gateway in {:?} mode on {}",
        config.app_env,
        config.addr
    );
    tracing::info!(
        uri_param_names = ?config.auth_policy.uri_param_names,
        key_claim_names = ?config.auth_policy.key_claim_names,
        claims_to_verify = ?config.auth_policy.claims_to_verify,
        cache_ttl_seconds = config.auth_cache_ttl.as_secs(),
        "jwt policy loaded"
    );

    let state = build_state(&config).await?;
    let app = build_router(state, config.request_timeout);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn build_state(config: &Config) -> Result<AppState> {
    // Lazy pool: the first lookup opens the connection, so the gateway starts
    // even while the database is still coming up.
    let db = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect_lazy(&config.database_url)?;

    let auth = build_authenticator(config, db);

    Ok(AppState::new(auth))
}

pub fn build_router(state: AppState, request_timeout: Duration) -> Router {
    let router = Router::new()
        .route("/health", get(health))
        .nest("/api/v1", api::v1::routes(state.clone()))
        .with_state(state);

    middleware::http::apply(router, request_timeout)
}
