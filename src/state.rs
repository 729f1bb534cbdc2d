/*
 * Responsibility
 * - Shared context bound to the Router (AppState)
 * - Cheap to clone (Arc inside)
 */
use std::sync::Arc;

use crate::services::auth::Authenticator;

#[derive(Clone, Debug)]
pub struct AppState {
    pub auth: Arc<Authenticator>,
}

impl AppState {
    pub fn new(auth: Arc<Authenticator>) -> Self {
        Self { auth }
    }
}
