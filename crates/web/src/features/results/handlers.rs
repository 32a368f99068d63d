use std::collections::BTreeMap;

use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use storage::{
    dto::{
        ranking::{CompetitionResults, RankingsResponse},
        registration::{RecordResultRequest, RecordResultsRequest, ResultResponse},
    },
    models::RaceTime,
    services::roster,
};
use uuid::Uuid;

use crate::error::WebError;
use crate::middleware::auth::Caller;
use crate::state::SharedStore;

fn parse_time(raw: Option<&str>) -> Result<Option<RaceTime>, WebError> {
    match raw {
        Some(raw) => RaceTime::parse_record(raw).map_err(|e| WebError::BadRequest(e.to_string())),
        None => Ok(None),
    }
}

#[utoipa::path(
    put,
    path = "/api/competitions/{id}/results/{athlete_id}",
    params(
        ("id" = Uuid, Path, description = "Competition ID"),
        ("athlete_id" = Uuid, Path, description = "Athlete ID")
    ),
    request_body = RecordResultRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Result recorded", body = ResultResponse),
        (status = 400, description = "Malformed time"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Competition not found"),
        (status = 422, description = "Athlete is not a participant")
    ),
    tag = "results"
)]
pub async fn record_result(
    State(store): State<SharedStore>,
    Caller(principal): Caller,
    Path((id, athlete_id)): Path<(Uuid, Uuid)>,
    Json(req): Json<RecordResultRequest>,
) -> Result<Response, WebError> {
    let time = parse_time(req.time.as_deref())?;

    let now = chrono::Utc::now().naive_utc();
    let record = roster::record_result(&*store, &principal, id, athlete_id, time, now).await?;

    Ok(Json(ResultResponse {
        competition_id: id,
        athlete_id,
        time: record.time.map(String::from),
        recorded_at: record.recorded_at,
    })
    .into_response())
}

#[utoipa::path(
    put,
    path = "/api/competitions/{id}/results",
    params(
        ("id" = Uuid, Path, description = "Competition ID")
    ),
    request_body = RecordResultsRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "All results recorded", body = Vec<ResultResponse>),
        (status = 400, description = "Malformed time"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Competition not found"),
        (status = 422, description = "An athlete in the batch is not a participant")
    ),
    tag = "results"
)]
pub async fn record_results(
    State(store): State<SharedStore>,
    Caller(principal): Caller,
    Path(id): Path<Uuid>,
    Json(req): Json<RecordResultsRequest>,
) -> Result<Response, WebError> {
    let mut batch = BTreeMap::new();
    for (athlete_id, raw) in &req.results {
        batch.insert(*athlete_id, parse_time(raw.as_deref())?);
    }

    let now = chrono::Utc::now().naive_utc();
    let saved = roster::record_results(&*store, &principal, id, batch, now).await?;

    let response: Vec<ResultResponse> = saved
        .into_iter()
        .map(|(athlete_id, record)| ResultResponse {
            competition_id: id,
            athlete_id,
            time: record.time.map(String::from),
            recorded_at: record.recorded_at,
        })
        .collect();

    Ok(Json(response).into_response())
}

#[utoipa::path(
    get,
    path = "/api/competitions/{id}/rankings",
    params(
        ("id" = Uuid, Path, description = "Competition ID")
    ),
    responses(
        (status = 200, description = "Top three finishers of each category", body = RankingsResponse),
        (status = 404, description = "Competition not found")
    ),
    tag = "results"
)]
pub async fn get_rankings(
    State(store): State<SharedStore>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let rankings = roster::compute_rankings(&*store, id).await?;

    Ok(Json(RankingsResponse {
        competition_id: id,
        rankings,
    })
    .into_response())
}

#[utoipa::path(
    get,
    path = "/api/results",
    responses(
        (status = 200, description = "Podiums of every competition with participants", body = Vec<CompetitionResults>)
    ),
    tag = "results"
)]
pub async fn results_overview(State(store): State<SharedStore>) -> Result<Response, WebError> {
    let overview = roster::results_overview(&*store).await?;

    Ok(Json(overview).into_response())
}
