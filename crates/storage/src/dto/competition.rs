use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::{Competition, find_category};
use crate::services::registration_window::RegistrationWindow;

/// Request payload for creating a new competition
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateCompetitionRequest {
    #[validate(length(
        min = 2,
        max = 255,
        message = "Name must be between 2 and 255 characters"
    ))]
    pub name: String,

    pub date: NaiveDate,

    #[schema(value_type = String, example = "10:00:00")]
    pub start_time: NaiveTime,

    #[validate(length(
        min = 2,
        max = 255,
        message = "Location must be between 2 and 255 characters"
    ))]
    pub location: String,

    #[validate(custom(function = "validate_entry_fee"))]
    #[serde(default)]
    pub entry_fee: Decimal,

    #[validate(length(max = 4000))]
    pub description: Option<String>,

    #[validate(custom(function = "validate_categories"))]
    pub categories: Vec<String>,
}

/// Request payload for updating an existing competition
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateCompetitionRequest {
    #[validate(length(min = 2, max = 255))]
    pub name: Option<String>,

    pub date: Option<NaiveDate>,

    #[schema(value_type = Option<String>, example = "10:00:00")]
    pub start_time: Option<NaiveTime>,

    #[validate(length(min = 2, max = 255))]
    pub location: Option<String>,

    #[validate(custom(function = "validate_entry_fee"))]
    pub entry_fee: Option<Decimal>,

    #[validate(length(max = 4000))]
    pub description: Option<String>,

    #[validate(custom(function = "validate_categories"))]
    pub categories: Option<Vec<String>>,
}

/// Response containing competition details
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CompetitionResponse {
    pub competition_id: Uuid,
    pub name: String,
    pub date: NaiveDate,
    #[schema(value_type = String, example = "10:00:00")]
    pub start_time: NaiveTime,
    pub location: String,
    pub entry_fee: Decimal,
    pub description: Option<String>,
    pub categories: Vec<String>,
    pub participant_count: usize,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct WindowStateResponse {
    pub competition_id: Uuid,
    pub date: NaiveDate,
    pub is_past_event: bool,
    pub can_modify: bool,
    pub registration_open: bool,
}

impl WindowStateResponse {
    pub fn new(competition: &Competition, window: RegistrationWindow) -> Self {
        Self {
            competition_id: competition.competition_id,
            date: competition.date,
            is_past_event: window.is_past_event,
            can_modify: window.can_modify,
            registration_open: window.registration_permitted(),
        }
    }
}

/// Participants of one category, in registration order
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ParticipantGroup {
    pub category: String,
    pub participants: Vec<ParticipantInfo>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ParticipantInfo {
    pub athlete_id: Uuid,
    pub full_name: String,
    #[schema(value_type = Option<String>, example = "00:42:17")]
    pub time: Option<String>,
    pub recorded_at: Option<NaiveDateTime>,
}

// Validation helpers
fn validate_entry_fee(fee: &Decimal) -> Result<(), validator::ValidationError> {
    if *fee < Decimal::ZERO {
        return Err(validator::ValidationError::new("negative_entry_fee"));
    }
    Ok(())
}

fn validate_categories(categories: &Vec<String>) -> Result<(), validator::ValidationError> {
    if categories.is_empty() {
        return Err(validator::ValidationError::new("no_categories"));
    }

    if categories.iter().any(|label| find_category(label).is_none()) {
        return Err(validator::ValidationError::new("unknown_category"));
    }

    let mut labels: Vec<&String> = categories.iter().collect();
    labels.sort();
    labels.dedup();
    if labels.len() != categories.len() {
        return Err(validator::ValidationError::new("duplicate_category"));
    }

    Ok(())
}

impl CompetitionResponse {
    /// Builds the response with a roster size counted by the caller.
    pub fn with_participant_count(comp: Competition, participant_count: usize) -> Self {
        Self {
            competition_id: comp.competition_id,
            name: comp.name,
            date: comp.date,
            start_time: comp.start_time,
            location: comp.location,
            entry_fee: comp.entry_fee,
            description: comp.description,
            categories: comp.categories,
            participant_count,
            created_at: comp.created_at,
        }
    }
}

impl From<Competition> for CompetitionResponse {
    fn from(comp: Competition) -> Self {
        let participant_count = comp.participant_ids.len();
        Self::with_participant_count(comp, participant_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> CreateCompetitionRequest {
        CreateCompetitionRequest {
            name: "Rila Night Sprint".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 9, 20).unwrap(),
            start_time: NaiveTime::from_hms_opt(19, 30, 0).unwrap(),
            location: "Borovets".to_string(),
            entry_fee: Decimal::new(20, 0),
            description: None,
            categories: vec!["м21".to_string(), "ж21".to_string()],
        }
    }

    #[test]
    fn test_valid_request() {
        assert!(request().validate().is_ok());
    }

    #[test]
    fn test_rejects_unknown_category() {
        let mut req = request();
        req.categories.push("M21".to_string());
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("categories"));
    }

    #[test]
    fn test_rejects_duplicate_category() {
        let mut req = request();
        req.categories.push("м21".to_string());
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_rejects_negative_fee() {
        let mut req = request();
        req.entry_fee = Decimal::new(-5, 0);
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("entry_fee"));
    }

    #[test]
    fn test_listing_uses_counted_participants() {
        let competition = Competition {
            competition_id: Uuid::new_v4(),
            name: "Rila Night Sprint".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 9, 20).unwrap(),
            start_time: NaiveTime::from_hms_opt(19, 30, 0).unwrap(),
            location: "Borovets".to_string(),
            entry_fee: Decimal::ZERO,
            description: None,
            categories: vec!["м21".to_string()],
            participant_ids: Vec::new(),
            results: Default::default(),
            created_at: NaiveDate::from_ymd_opt(2025, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
        };

        let mut hydrated = competition.clone();
        hydrated.participant_ids = vec![Uuid::new_v4(), Uuid::new_v4()];

        assert_eq!(
            CompetitionResponse::with_participant_count(competition, 7).participant_count,
            7
        );
        assert_eq!(CompetitionResponse::from(hydrated).participant_count, 2);
    }
}
