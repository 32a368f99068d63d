use std::time::Duration;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};

use crate::features;
use crate::state::AppState;

/// Full API router with every feature mounted under `/api`.
pub fn router(state: AppState) -> Router {
    let competitions = features::competitions::routes::routes(state.api_keys.clone())
        .merge(features::registrations::routes::routes())
        .merge(features::results::routes::routes(state.api_keys.clone()));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .max_age(Duration::from_secs(3600));

    Router::new()
        .nest(
            "/api/athletes",
            features::athletes::routes::routes(state.api_keys.clone()),
        )
        .nest("/api/categories", features::categories::routes::routes())
        .nest("/api/competitions", competitions)
        .nest("/api/results", features::results::routes::overview_routes())
        .layer(cors)
        .with_state(state)
}
