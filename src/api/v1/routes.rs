/*
 * Responsibility
 * - v1 URL layout
 * - Every v1 route sits behind the JWT middleware
 */
use axum::{Router, routing::get};

use crate::api::v1::handlers::me::me;
use crate::middleware::auth::jwt;
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    let protected = Router::new().route("/me", get(me));

    jwt::apply(protected, state)
}
