use chrono::NaiveDateTime;
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::athlete::AthleteCompetitionSummary;
use crate::dto::competition::{
    CompetitionResponse, CreateCompetitionRequest, UpdateCompetitionRequest,
};
use crate::error::{Result, StorageError};
use crate::models::{Competition, CompetitionListRow, CompetitionRow, RaceTime, ResultRow};

const COMPETITION_COLUMNS: &str = r#"
    competition_id, name, date, start_time, location, entry_fee,
    description, categories, created_at
"#;

/// Repository for Competition database operations
pub struct CompetitionRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CompetitionRepository<'a> {
    /// Create a new CompetitionRepository
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all competitions with their participant counts, most recent first
    pub async fn list(&self) -> Result<Vec<CompetitionResponse>> {
        let rows: Vec<CompetitionListRow> = sqlx::query_as(
            r#"
            SELECT
                c.competition_id, c.name, c.date, c.start_time, c.location, c.entry_fee,
                c.description, c.categories, c.created_at,
                COUNT(cp.athlete_id) AS participant_count
            FROM competitions c
            LEFT JOIN competition_participants cp ON cp.competition_id = c.competition_id
            GROUP BY c.competition_id
            ORDER BY c.date DESC, c.created_at DESC
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        rows.into_iter()
            .map(|row| {
                let participant_count = usize::try_from(row.participant_count).map_err(|_| {
                    StorageError::malformed(format!(
                        "competition {} has a negative participant count",
                        row.competition.competition_id
                    ))
                })?;
                let competition = row.competition.into_competition(Vec::new(), Vec::new())?;
                Ok(CompetitionResponse::with_participant_count(
                    competition,
                    participant_count,
                ))
            })
            .collect()
    }

    /// All competitions with rosters and results, most recent first
    pub async fn list_with_rosters(&self) -> Result<Vec<Competition>> {
        let rows: Vec<CompetitionRow> = sqlx::query_as(&format!(
            "SELECT {COMPETITION_COLUMNS} FROM competitions ORDER BY date DESC, created_at DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        let mut competitions = Vec::with_capacity(rows.len());
        for row in rows {
            competitions.push(self.hydrate(row).await?);
        }

        Ok(competitions)
    }

    /// Get a competition by ID with its roster and results
    pub async fn find_by_id(&self, id: Uuid) -> Result<Competition> {
        self.find_optional(id).await?.ok_or(StorageError::NotFound)
    }

    pub async fn find_optional(&self, id: Uuid) -> Result<Option<Competition>> {
        let row: Option<CompetitionRow> = sqlx::query_as(&format!(
            "SELECT {COMPETITION_COLUMNS} FROM competitions WHERE competition_id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        match row {
            Some(row) => Ok(Some(self.hydrate(row).await?)),
            None => Ok(None),
        }
    }

    async fn hydrate(&self, row: CompetitionRow) -> Result<Competition> {
        let participant_ids = self.participant_ids(row.competition_id).await?;
        let results = self.results(row.competition_id).await?;
        row.into_competition(participant_ids, results)
    }

    /// Registered athlete ids in registration order
    pub async fn participant_ids(&self, competition_id: Uuid) -> Result<Vec<Uuid>> {
        let ids = sqlx::query_scalar(
            r#"
            SELECT athlete_id
            FROM competition_participants
            WHERE competition_id = $1
            ORDER BY registered_at, athlete_id
            "#,
        )
        .bind(competition_id)
        .fetch_all(self.pool)
        .await?;

        Ok(ids)
    }

    async fn results(&self, competition_id: Uuid) -> Result<Vec<ResultRow>> {
        let rows = sqlx::query_as(
            r#"
            SELECT athlete_id, finish_time, recorded_at
            FROM competition_results
            WHERE competition_id = $1
            "#,
        )
        .bind(competition_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// Create a new competition
    pub async fn create(&self, req: &CreateCompetitionRequest) -> Result<Competition> {
        let row: CompetitionRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO competitions (
                name, date, start_time, location, entry_fee, description, categories
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {COMPETITION_COLUMNS}
            "#
        ))
        .bind(&req.name)
        .bind(req.date)
        .bind(req.start_time)
        .bind(&req.location)
        .bind(req.entry_fee)
        .bind(&req.description)
        .bind(&req.categories)
        .fetch_one(self.pool)
        .await?;

        row.into_competition(Vec::new(), Vec::new())
    }

    /// Update an existing competition, keeping fields the request leaves out
    pub async fn update(&self, id: Uuid, req: &UpdateCompetitionRequest) -> Result<Competition> {
        let row: CompetitionRow = sqlx::query_as(&format!(
            r#"
            UPDATE competitions
            SET
                name = COALESCE($2, name),
                date = COALESCE($3, date),
                start_time = COALESCE($4, start_time),
                location = COALESCE($5, location),
                entry_fee = COALESCE($6, entry_fee),
                description = COALESCE($7, description),
                categories = COALESCE($8, categories)
            WHERE competition_id = $1
            RETURNING {COMPETITION_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&req.name)
        .bind(req.date)
        .bind(req.start_time)
        .bind(&req.location)
        .bind(req.entry_fee)
        .bind(&req.description)
        .bind(&req.categories)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        self.hydrate(row).await
    }

    /// Delete a competition by ID
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query(
            r#"
            DELETE FROM competitions
            WHERE competition_id = $1
            "#,
        )
        .bind(id)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }

    /// Registers the athlete and records their chosen category in one transaction.
    /// The insert is a no-op when the registration already exists.
    pub async fn add_participant_if_absent(
        &self,
        competition_id: Uuid,
        athlete_id: Uuid,
        category: &str,
    ) -> Result<bool> {
        let mut tx = self.pool.begin().await?;

        let inserted = sqlx::query(
            r#"
            INSERT INTO competition_participants (competition_id, athlete_id)
            VALUES ($1, $2)
            ON CONFLICT (competition_id, athlete_id) DO NOTHING
            "#,
        )
        .bind(competition_id)
        .bind(athlete_id)
        .execute(&mut *tx)
        .await?
        .rows_affected()
            == 1;

        if !inserted {
            tx.rollback().await?;
            return Ok(false);
        }

        sqlx::query(
            r#"
            UPDATE athletes
            SET assigned_category = $2
            WHERE athlete_id = $1
            "#,
        )
        .bind(athlete_id)
        .bind(category)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(true)
    }

    pub async fn remove_participant_if_present(
        &self,
        competition_id: Uuid,
        athlete_id: Uuid,
    ) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM competition_participants
            WHERE competition_id = $1 AND athlete_id = $2
            "#,
        )
        .bind(competition_id)
        .bind(athlete_id)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    /// Upserts a result, guarded by the registration existing at write time
    pub async fn put_result_if_participant(
        &self,
        competition_id: Uuid,
        athlete_id: Uuid,
        time: Option<&RaceTime>,
        recorded_at: NaiveDateTime,
    ) -> Result<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO competition_results (competition_id, athlete_id, finish_time, recorded_at)
            SELECT $1, $2, $3, $4
            WHERE EXISTS (
                SELECT 1 FROM competition_participants
                WHERE competition_id = $1 AND athlete_id = $2
            )
            ON CONFLICT (competition_id, athlete_id)
            DO UPDATE SET finish_time = EXCLUDED.finish_time, recorded_at = EXCLUDED.recorded_at
            "#,
        )
        .bind(competition_id)
        .bind(athlete_id)
        .bind(time.map(RaceTime::as_str))
        .bind(recorded_at)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    /// Upserts a batch of results in one transaction. Nothing is written unless every
    /// athlete in the batch is registered; their registrations stay locked until commit.
    pub async fn put_results_if_participants(
        &self,
        competition_id: Uuid,
        results: &[(Uuid, Option<RaceTime>)],
        recorded_at: NaiveDateTime,
    ) -> Result<bool> {
        if results.is_empty() {
            return Ok(true);
        }

        let athlete_ids: Vec<Uuid> = results.iter().map(|(id, _)| *id).collect();
        let finish_times: Vec<Option<String>> = results
            .iter()
            .map(|(_, time)| time.as_ref().map(|t| t.as_str().to_string()))
            .collect();

        let mut tx = self.pool.begin().await?;

        let registered: Vec<Uuid> = sqlx::query_scalar(
            r#"
            SELECT athlete_id
            FROM competition_participants
            WHERE competition_id = $1 AND athlete_id = ANY($2)
            FOR SHARE
            "#,
        )
        .bind(competition_id)
        .bind(&athlete_ids)
        .fetch_all(&mut *tx)
        .await?;

        if registered.len() != athlete_ids.len() {
            tx.rollback().await?;
            return Ok(false);
        }

        sqlx::query(
            r#"
            INSERT INTO competition_results (competition_id, athlete_id, finish_time, recorded_at)
            SELECT $1, r.athlete_id, r.finish_time, $4
            FROM UNNEST($2::uuid[], $3::text[]) AS r(athlete_id, finish_time)
            ON CONFLICT (competition_id, athlete_id)
            DO UPDATE SET finish_time = EXCLUDED.finish_time, recorded_at = EXCLUDED.recorded_at
            "#,
        )
        .bind(competition_id)
        .bind(&athlete_ids)
        .bind(&finish_times)
        .bind(recorded_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(true)
    }

    /// Competitions the athlete is registered for, most recent first
    pub async fn list_for_athlete(&self, athlete_id: Uuid) -> Result<Vec<AthleteCompetitionSummary>> {
        #[derive(sqlx::FromRow)]
        struct SummaryRow {
            competition_id: Uuid,
            competition_name: String,
            competition_date: chrono::NaiveDate,
            location: String,
            finish_time: Option<String>,
        }

        let rows: Vec<SummaryRow> = sqlx::query_as(
            r#"
            SELECT
                c.competition_id,
                c.name AS competition_name,
                c.date AS competition_date,
                c.location,
                r.finish_time
            FROM competition_participants cp
            JOIN competitions c ON cp.competition_id = c.competition_id
            LEFT JOIN competition_results r
                ON r.competition_id = cp.competition_id AND r.athlete_id = cp.athlete_id
            WHERE cp.athlete_id = $1
            ORDER BY c.date DESC
            "#,
        )
        .bind(athlete_id)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter()
            .map(|row| {
                let time = match row.finish_time {
                    Some(ref raw) => RaceTime::parse_record(raw)?.map(String::from),
                    None => None,
                };
                Ok(AthleteCompetitionSummary {
                    competition_id: row.competition_id,
                    competition_name: row.competition_name,
                    competition_date: row.competition_date,
                    location: row.location,
                    time,
                })
            })
            .collect()
    }
}
