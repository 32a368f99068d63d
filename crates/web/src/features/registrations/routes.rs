use axum::{
    Router,
    routing::{delete, get, post},
};

use super::handlers::{list_participants, register, unregister};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/:id/participants", get(list_participants))
        .route("/:id/registrations", post(register))
        .route("/:id/registrations/:athlete_id", delete(unregister))
}
