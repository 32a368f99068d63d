use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    dto::{
        competition::ParticipantGroup,
        registration::{RegisterRequest, RegistrationResponse},
    },
    services::roster,
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;
use crate::middleware::auth::Caller;
use crate::state::SharedStore;

#[utoipa::path(
    get,
    path = "/api/competitions/{id}/participants",
    params(
        ("id" = Uuid, Path, description = "Competition ID")
    ),
    responses(
        (status = 200, description = "Participants grouped by category", body = Vec<ParticipantGroup>),
        (status = 404, description = "Competition not found")
    ),
    tag = "registrations"
)]
pub async fn list_participants(
    State(store): State<SharedStore>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let groups = roster::list_participants(&*store, id).await?;

    Ok(Json(groups).into_response())
}

#[utoipa::path(
    post,
    path = "/api/competitions/{id}/registrations",
    params(
        ("id" = Uuid, Path, description = "Competition ID"),
        ("X-Athlete-Id" = Option<Uuid>, Header, description = "Acting athlete, when no admin key is given")
    ),
    request_body = RegisterRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Athlete registered", body = RegistrationResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "No caller identity"),
        (status = 403, description = "Caller may not act for this athlete"),
        (status = 404, description = "Competition or athlete not found"),
        (status = 409, description = "Athlete already registered"),
        (status = 422, description = "Registration rejected")
    ),
    tag = "registrations"
)]
pub async fn register(
    State(store): State<SharedStore>,
    Caller(principal): Caller,
    Path(id): Path<Uuid>,
    Json(req): Json<RegisterRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let now = chrono::Utc::now().naive_utc();
    roster::register_athlete(&*store, &principal, id, req.athlete_id, &req.category, now).await?;

    let response = RegistrationResponse {
        competition_id: id,
        athlete_id: req.athlete_id,
        category: req.category,
    };

    Ok((StatusCode::CREATED, Json(response)).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/competitions/{id}/registrations/{athlete_id}",
    params(
        ("id" = Uuid, Path, description = "Competition ID"),
        ("athlete_id" = Uuid, Path, description = "Athlete ID"),
        ("X-Athlete-Id" = Option<Uuid>, Header, description = "Acting athlete, when no admin key is given")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Athlete withdrawn"),
        (status = 401, description = "No caller identity"),
        (status = 403, description = "Caller may not act for this athlete"),
        (status = 404, description = "Competition not found"),
        (status = 422, description = "Withdrawal rejected")
    ),
    tag = "registrations"
)]
pub async fn unregister(
    State(store): State<SharedStore>,
    Caller(principal): Caller,
    Path((id, athlete_id)): Path<(Uuid, Uuid)>,
) -> Result<Response, WebError> {
    let now = chrono::Utc::now().naive_utc();
    roster::unregister_athlete(&*store, &principal, id, athlete_id, now).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
