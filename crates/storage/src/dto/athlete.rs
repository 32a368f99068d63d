use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::{Athlete, Gender};

/// Response containing basic athlete information
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AthleteResponse {
    pub athlete_id: Uuid,
    pub full_name: String,
    pub email: String,
    pub birth_date: NaiveDate,
    pub gender: Gender,
    pub assigned_category: Option<String>,
    pub created_at: NaiveDateTime,
}

/// Competitions an athlete is registered for, split around the current date
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AthleteCompetitionsResponse {
    pub athlete_id: Uuid,
    pub upcoming: Vec<AthleteCompetitionSummary>,
    pub completed: Vec<AthleteCompetitionSummary>,
}

/// Summary of one competition from the athlete's point of view
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AthleteCompetitionSummary {
    pub competition_id: Uuid,
    pub competition_name: String,
    pub competition_date: NaiveDate,
    pub location: String,
    #[schema(value_type = Option<String>, example = "00:42:17")]
    pub time: Option<String>,
}

/// Request payload for creating an athlete profile
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateAthleteRequest {
    #[validate(length(
        min = 2,
        max = 255,
        message = "Full name must be between 2 and 255 characters"
    ))]
    pub full_name: String,

    #[validate(email(message = "Email must be a valid address"))]
    pub email: String,

    #[validate(custom(function = "validate_birth_date"))]
    pub birth_date: NaiveDate,

    pub gender: Gender,
}

/// Request payload for updating an athlete profile
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateAthleteRequest {
    #[validate(length(min = 2, max = 255))]
    pub full_name: Option<String>,

    #[validate(email)]
    pub email: Option<String>,

    #[validate(custom(function = "validate_birth_date"))]
    pub birth_date: Option<NaiveDate>,

    pub gender: Option<Gender>,
}

fn validate_birth_date(date: &NaiveDate) -> Result<(), validator::ValidationError> {
    let earliest = NaiveDate::from_ymd_opt(1900, 1, 1).unwrap_or(NaiveDate::MIN);
    if *date < earliest || *date > chrono::Utc::now().date_naive() {
        return Err(validator::ValidationError::new("invalid_birth_date"));
    }
    Ok(())
}

impl From<Athlete> for AthleteResponse {
    fn from(athlete: Athlete) -> Self {
        Self {
            athlete_id: athlete.athlete_id,
            full_name: athlete.full_name,
            email: athlete.email,
            birth_date: athlete.birth_date,
            gender: athlete.gender,
            assigned_category: athlete.assigned_category,
            created_at: athlete.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_bad_email_and_future_birth_date() {
        let req = CreateAthleteRequest {
            full_name: "Georgi Dimitrov".to_string(),
            email: "not-an-email".to_string(),
            birth_date: NaiveDate::from_ymd_opt(2999, 1, 1).unwrap(),
            gender: Gender::Male,
        };

        let errors = req.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("birth_date"));
    }

    #[test]
    fn test_partial_update_is_valid() {
        let req = UpdateAthleteRequest {
            full_name: None,
            email: None,
            birth_date: None,
            gender: Some(Gender::Female),
        };
        assert!(req.validate().is_ok());
    }
}
