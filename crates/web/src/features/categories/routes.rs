use axum::{Router, routing::get};

use super::handlers::{list_categories, list_eligible_categories};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_categories))
        .route("/eligible", get(list_eligible_categories))
}
