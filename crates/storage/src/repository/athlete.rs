use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::athlete::{CreateAthleteRequest, UpdateAthleteRequest};
use crate::error::{Result, StorageError};
use crate::models::{Athlete, AthleteRow};

const ATHLETE_COLUMNS: &str =
    "athlete_id, full_name, email, birth_date, gender, assigned_category, created_at";

pub struct AthleteRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AthleteRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all athletes
    pub async fn list(&self) -> Result<Vec<Athlete>> {
        let rows: Vec<AthleteRow> = sqlx::query_as(&format!(
            "SELECT {ATHLETE_COLUMNS} FROM athletes ORDER BY full_name, athlete_id"
        ))
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(Athlete::try_from).collect()
    }

    /// Find athlete by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Athlete> {
        self.find_optional(id).await?.ok_or(StorageError::NotFound)
    }

    pub async fn find_optional(&self, id: Uuid) -> Result<Option<Athlete>> {
        let row: Option<AthleteRow> = sqlx::query_as(&format!(
            "SELECT {ATHLETE_COLUMNS} FROM athletes WHERE athlete_id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        row.map(Athlete::try_from).transpose()
    }

    /// Find all athletes with the given IDs
    pub async fn find_many(&self, ids: &[Uuid]) -> Result<Vec<Athlete>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows: Vec<AthleteRow> = sqlx::query_as(&format!(
            "SELECT {ATHLETE_COLUMNS} FROM athletes WHERE athlete_id = ANY($1)"
        ))
        .bind(ids)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(Athlete::try_from).collect()
    }

    pub async fn create(&self, req: &CreateAthleteRequest) -> Result<Athlete> {
        let row: AthleteRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO athletes (full_name, email, birth_date, gender)
            VALUES ($1, $2, $3, $4)
            RETURNING {ATHLETE_COLUMNS}
            "#
        ))
        .bind(&req.full_name)
        .bind(&req.email)
        .bind(req.birth_date)
        .bind(req.gender.as_str())
        .fetch_one(self.pool)
        .await
        .map_err(email_conflict)?;

        Athlete::try_from(row)
    }

    pub async fn update(&self, id: Uuid, req: &UpdateAthleteRequest) -> Result<Athlete> {
        let row: AthleteRow = sqlx::query_as(&format!(
            r#"
            UPDATE athletes
            SET
                full_name = COALESCE($2, full_name),
                email = COALESCE($3, email),
                birth_date = COALESCE($4, birth_date),
                gender = COALESCE($5, gender)
            WHERE athlete_id = $1
            RETURNING {ATHLETE_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&req.full_name)
        .bind(&req.email)
        .bind(req.birth_date)
        .bind(req.gender.map(|g| g.as_str()))
        .fetch_optional(self.pool)
        .await
        .map_err(email_conflict)?
        .ok_or(StorageError::NotFound)?;

        Athlete::try_from(row)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM athletes WHERE athlete_id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}

fn email_conflict(e: sqlx::Error) -> StorageError {
    let error = StorageError::from(e);
    if error.is_unique_violation() {
        return StorageError::ConstraintViolation("Email already exists".to_string());
    }
    error
}
