use chrono::NaiveDateTime;
use sqlx::PgPool;
use storage::{
    dto::athlete::{AthleteCompetitionsResponse, CreateAthleteRequest, UpdateAthleteRequest},
    error::Result,
    models::Athlete,
    repository::{athlete::AthleteRepository, competition::CompetitionRepository},
    services::registration_window::window_state,
};
use uuid::Uuid;

/// List all athletes
pub async fn list_athletes(pool: &PgPool) -> Result<Vec<Athlete>> {
    let repo = AthleteRepository::new(pool);
    repo.list().await
}

/// Get athlete by ID
pub async fn get_athlete(pool: &PgPool, id: Uuid) -> Result<Athlete> {
    let repo = AthleteRepository::new(pool);
    repo.find_by_id(id).await
}

/// Create a new athlete
pub async fn create_athlete(pool: &PgPool, request: &CreateAthleteRequest) -> Result<Athlete> {
    let repo = AthleteRepository::new(pool);
    repo.create(request).await
}

/// Update an athlete
pub async fn update_athlete(
    pool: &PgPool,
    id: Uuid,
    request: &UpdateAthleteRequest,
) -> Result<Athlete> {
    let repo = AthleteRepository::new(pool);
    repo.update(id, request).await
}

/// Delete an athlete
pub async fn delete_athlete(pool: &PgPool, id: Uuid) -> Result<()> {
    let repo = AthleteRepository::new(pool);
    repo.delete(id).await
}

/// Competitions the athlete is registered for, split into upcoming and completed
pub async fn athlete_competitions(
    pool: &PgPool,
    id: Uuid,
    now: NaiveDateTime,
) -> Result<AthleteCompetitionsResponse> {
    let athlete = AthleteRepository::new(pool).find_by_id(id).await?;
    let summaries = CompetitionRepository::new(pool)
        .list_for_athlete(athlete.athlete_id)
        .await?;

    let (completed, upcoming): (Vec<_>, Vec<_>) = summaries
        .into_iter()
        .partition(|summary| window_state(summary.competition_date, now).is_past_event);

    Ok(AthleteCompetitionsResponse {
        athlete_id: athlete.athlete_id,
        upcoming,
        completed,
    })
}
