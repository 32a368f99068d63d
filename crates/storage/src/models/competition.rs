use std::collections::{BTreeMap, HashSet};

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use super::{RaceTime, find_category};
use crate::error::StorageError;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Competition {
    pub competition_id: Uuid,
    pub name: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub location: String,
    pub entry_fee: Decimal,
    pub description: Option<String>,
    /// Category labels offered, in the order the organizer listed them.
    pub categories: Vec<String>,
    /// Registered athletes in registration order. Never contains duplicates.
    pub participant_ids: Vec<Uuid>,
    pub results: BTreeMap<Uuid, ResultRecord>,
    pub created_at: NaiveDateTime,
}

impl Competition {
    pub fn is_participant(&self, athlete_id: Uuid) -> bool {
        self.participant_ids.contains(&athlete_id)
    }

    pub fn offers_category(&self, label: &str) -> bool {
        self.categories.iter().any(|c| c == label)
    }
}

/// Outcome recorded for one athlete. `time` is `None` when no time was recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultRecord {
    pub time: Option<RaceTime>,
    pub recorded_at: NaiveDateTime,
}

/// Raw `competitions` row as returned by the database, before validation.
#[derive(Debug, Clone, FromRow)]
pub struct CompetitionRow {
    pub competition_id: Uuid,
    pub name: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub location: String,
    pub entry_fee: Decimal,
    pub description: Option<String>,
    pub categories: Vec<String>,
    pub created_at: NaiveDateTime,
}

/// Competition row joined with its roster size, as listed.
#[derive(Debug, Clone, FromRow)]
pub struct CompetitionListRow {
    #[sqlx(flatten)]
    pub competition: CompetitionRow,
    pub participant_count: i64,
}

/// Raw `competition_results` row.
#[derive(Debug, Clone, FromRow)]
pub struct ResultRow {
    pub athlete_id: Uuid,
    pub finish_time: Option<String>,
    pub recorded_at: NaiveDateTime,
}

impl CompetitionRow {
    /// Validates the row together with its roster and results and builds the typed record.
    pub fn into_competition(
        self,
        participant_ids: Vec<Uuid>,
        results: Vec<ResultRow>,
    ) -> Result<Competition, StorageError> {
        if let Some(unknown) = self.categories.iter().find(|c| find_category(c).is_none()) {
            return Err(StorageError::malformed(format!(
                "competition {} offers unknown category '{unknown}'",
                self.competition_id
            )));
        }

        if self.entry_fee < Decimal::ZERO {
            return Err(StorageError::malformed(format!(
                "competition {} has a negative entry fee",
                self.competition_id
            )));
        }

        let mut seen = HashSet::with_capacity(participant_ids.len());
        if let Some(duplicate) = participant_ids.iter().find(|id| !seen.insert(**id)) {
            return Err(StorageError::malformed(format!(
                "competition {} lists athlete {duplicate} twice",
                self.competition_id
            )));
        }

        let results = results
            .into_iter()
            .map(|row| {
                let time = match row.finish_time {
                    Some(ref raw) => RaceTime::parse_record(raw)?,
                    None => None,
                };
                Ok((
                    row.athlete_id,
                    ResultRecord {
                        time,
                        recorded_at: row.recorded_at,
                    },
                ))
            })
            .collect::<Result<BTreeMap<_, _>, StorageError>>()?;

        Ok(Competition {
            competition_id: self.competition_id,
            name: self.name,
            date: self.date,
            start_time: self.start_time,
            location: self.location,
            entry_fee: self.entry_fee,
            description: self.description,
            categories: self.categories,
            participant_ids,
            results,
            created_at: self.created_at,
        })
    }
}
