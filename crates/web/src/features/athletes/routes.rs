use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};

use super::handlers::{
    athlete_competitions, create_athlete, delete_athlete, get_athlete, list_athletes,
    update_athlete,
};
use crate::middleware::auth::{ApiKeys, require_auth};
use crate::state::AppState;

pub fn routes(api_keys: ApiKeys) -> Router<AppState> {
    let protected = Router::new()
        .route("/", get(list_athletes))
        .route("/", post(create_athlete))
        .route("/:id", put(update_athlete))
        .route("/:id", delete(delete_athlete))
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth));

    Router::new()
        .route("/:id", get(get_athlete))
        .route("/:id/competitions", get(athlete_competitions))
        .merge(protected)
}
