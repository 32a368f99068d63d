use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use super::{Gender, find_category};
use crate::error::StorageError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Athlete {
    pub athlete_id: Uuid,
    pub full_name: String,
    pub email: String,
    pub birth_date: NaiveDate,
    pub gender: Gender,
    /// Category chosen at the athlete's most recent registration.
    pub assigned_category: Option<String>,
    pub created_at: NaiveDateTime,
}

/// Raw `athletes` row as returned by the database, before validation.
#[derive(Debug, Clone, FromRow)]
pub struct AthleteRow {
    pub athlete_id: Uuid,
    pub full_name: String,
    pub email: String,
    pub birth_date: NaiveDate,
    pub gender: String,
    pub assigned_category: Option<String>,
    pub created_at: NaiveDateTime,
}

impl TryFrom<AthleteRow> for Athlete {
    type Error = StorageError;

    fn try_from(row: AthleteRow) -> Result<Self, Self::Error> {
        let gender: Gender = row.gender.parse()?;

        if let Some(ref label) = row.assigned_category
            && find_category(label).is_none()
        {
            return Err(StorageError::malformed(format!(
                "athlete {} has unknown category '{label}'",
                row.athlete_id
            )));
        }

        Ok(Self {
            athlete_id: row.athlete_id,
            full_name: row.full_name,
            email: row.email,
            birth_date: row.birth_date,
            gender,
            assigned_category: row.assigned_category,
            created_at: row.created_at,
        })
    }
}
