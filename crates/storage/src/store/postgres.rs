use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::PgPool;
use uuid::Uuid;

use super::CompetitionStore;
use crate::error::Result;
use crate::models::{Athlete, Competition, RaceTime};
use crate::repository::athlete::AthleteRepository;
use crate::repository::competition::CompetitionRepository;

/// PostgreSQL-backed store. Roster and result writes rely on primary-key conflicts
/// and guarded inserts rather than on values read earlier.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CompetitionStore for PgStore {
    async fn competition(&self, competition_id: Uuid) -> Result<Option<Competition>> {
        CompetitionRepository::new(&self.pool)
            .find_optional(competition_id)
            .await
    }

    async fn competitions(&self) -> Result<Vec<Competition>> {
        CompetitionRepository::new(&self.pool)
            .list_with_rosters()
            .await
    }

    async fn athlete(&self, athlete_id: Uuid) -> Result<Option<Athlete>> {
        AthleteRepository::new(&self.pool)
            .find_optional(athlete_id)
            .await
    }

    async fn athletes(&self, athlete_ids: &[Uuid]) -> Result<Vec<Athlete>> {
        AthleteRepository::new(&self.pool).find_many(athlete_ids).await
    }

    async fn add_participant_if_absent(
        &self,
        competition_id: Uuid,
        athlete_id: Uuid,
        category: &str,
    ) -> Result<bool> {
        CompetitionRepository::new(&self.pool)
            .add_participant_if_absent(competition_id, athlete_id, category)
            .await
    }

    async fn remove_participant_if_present(
        &self,
        competition_id: Uuid,
        athlete_id: Uuid,
    ) -> Result<bool> {
        CompetitionRepository::new(&self.pool)
            .remove_participant_if_present(competition_id, athlete_id)
            .await
    }

    async fn put_result_if_participant(
        &self,
        competition_id: Uuid,
        athlete_id: Uuid,
        time: Option<&RaceTime>,
        recorded_at: NaiveDateTime,
    ) -> Result<bool> {
        CompetitionRepository::new(&self.pool)
            .put_result_if_participant(competition_id, athlete_id, time, recorded_at)
            .await
    }

    async fn put_results_if_participants(
        &self,
        competition_id: Uuid,
        results: &[(Uuid, Option<RaceTime>)],
        recorded_at: NaiveDateTime,
    ) -> Result<bool> {
        CompetitionRepository::new(&self.pool)
            .put_results_if_participants(competition_id, results, recorded_at)
            .await
    }
}
