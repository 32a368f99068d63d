use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::RaceTime;

/// One podium position in a category leaderboard. Computed on request, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct RankedEntry {
    pub category: String,
    pub rank: u32,
    pub athlete_id: Uuid,
    #[schema(value_type = String, example = "00:14:50")]
    pub time: RaceTime,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RankingsResponse {
    pub competition_id: Uuid,
    /// Leaderboards keyed by category label.
    pub rankings: BTreeMap<String, Vec<RankedEntry>>,
}

/// Podiums of one competition in the cross-competition results overview.
#[derive(Debug, Serialize, ToSchema)]
pub struct CompetitionResults {
    pub competition_id: Uuid,
    pub name: String,
    pub date: NaiveDate,
    pub rankings: BTreeMap<String, Vec<RankedEntry>>,
}
