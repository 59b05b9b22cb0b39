//! Route assembly for everything served under `/api`.

pub mod health;
pub mod products;

use axum::Router;

use crate::state::AppState;

/// All API routes; `axum_helpers::create_router` nests these under `/api`,
/// which puts the readiness probe at `/api/ready`.
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .nest("/products", products::router(state))
        .merge(health::router(state.clone()))
}
