use axum::{
    Router, middleware,
    routing::{get, put},
};

use super::handlers::{get_rankings, record_result, record_results, results_overview};
use crate::middleware::auth::{ApiKeys, require_auth};
use crate::state::AppState;

pub fn routes(api_keys: ApiKeys) -> Router<AppState> {
    let protected = Router::new()
        .route("/:id/results", put(record_results))
        .route("/:id/results/:athlete_id", put(record_result))
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth));

    Router::new()
        .route("/:id/rankings", get(get_rankings))
        .merge(protected)
}

/// Cross-competition results, mounted at `/api/results`.
pub fn overview_routes() -> Router<AppState> {
    Router::new().route("/", get(results_overview))
}
