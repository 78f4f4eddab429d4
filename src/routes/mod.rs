//! Router assembly.

mod common;
mod entity;

pub use common::{common_routes, ApiDoc};
pub use entity::entity_routes;

use crate::state::AppState;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};

/// Entity routes for every exposed type, to be nested under `/api`.
pub fn api_routes(state: &AppState) -> Router {
    Router::new()
        .merge(entity_routes(state.titles.clone()))
        .merge(entity_routes(state.companies.clone()))
}

/// Full application: operational routes at the root, entity routes under `/api`.
pub fn app_router(state: AppState, body_limit_bytes: usize) -> Router {
    Router::new()
        .nest("/api", api_routes(&state))
        .merge(common_routes(state))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(RequestBodyLimitLayer::new(body_limit_bytes)),
        )
}
