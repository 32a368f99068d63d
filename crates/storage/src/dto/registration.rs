use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Request payload for registering an athlete in a competition
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    pub athlete_id: Uuid,

    #[validate(length(min = 1, max = 16))]
    pub category: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RegistrationResponse {
    pub competition_id: Uuid,
    pub athlete_id: Uuid,
    pub category: String,
}

/// Request payload for recording one athlete's result.
///
/// `time` is `HH:MM:SS`; `null` or `"99:99:99"` records that no time was set.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RecordResultRequest {
    #[schema(example = "00:42:17")]
    pub time: Option<String>,
}

/// Results of several participants, saved together or not at all.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RecordResultsRequest {
    #[schema(value_type = Object)]
    pub results: BTreeMap<Uuid, Option<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ResultResponse {
    pub competition_id: Uuid,
    pub athlete_id: Uuid,
    #[schema(example = "00:42:17")]
    pub time: Option<String>,
    pub recorded_at: NaiveDateTime,
}
