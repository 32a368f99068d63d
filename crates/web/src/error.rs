use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;
use storage::error::{RosterError, StorageError};
use validator::ValidationErrors;

/// Web layer errors
#[derive(Debug)]
pub enum WebError {
    Storage(StorageError),
    Roster(RosterError),
    Validation(ValidationErrors),
    BadRequest(String),
    Unauthorized,
}

impl fmt::Display for WebError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Storage(e) => write!(f, "Storage error: {}", e),
            Self::Roster(e) => write!(f, "Roster error: {}", e),
            Self::Validation(e) => write!(f, "Validation error: {}", e),
            Self::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            Self::Unauthorized => write!(f, "Unauthorized"),
        }
    }
}

fn storage_status(error: &StorageError) -> StatusCode {
    match error {
        StorageError::NotFound => StatusCode::NOT_FOUND,
        StorageError::ConstraintViolation(_) => StatusCode::CONFLICT,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn storage_body(error: &StorageError) -> serde_json::Value {
    match error {
        StorageError::NotFound => json!({ "error": "Resource not found" }),
        StorageError::ConstraintViolation(msg) => json!({ "error": msg }),
        e => {
            tracing::error!("Storage error: {:?}", e);
            json!({ "error": "An internal error occurred" })
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status_code = match &self {
            Self::Storage(e) | Self::Roster(RosterError::Storage(e)) => storage_status(e),
            Self::Roster(e) => match e {
                RosterError::CompetitionNotFound | RosterError::AthleteNotFound => {
                    StatusCode::NOT_FOUND
                }
                RosterError::AlreadyRegistered => StatusCode::CONFLICT,
                RosterError::Forbidden => StatusCode::FORBIDDEN,
                _ => StatusCode::UNPROCESSABLE_ENTITY,
            },
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
        };

        let body = match &self {
            Self::Storage(e) | Self::Roster(RosterError::Storage(e)) => storage_body(e),
            Self::Roster(e) => {
                tracing::debug!(kind = e.kind(), "Roster request rejected: {}", e);
                json!({
                    "error": e.to_string(),
                    "kind": e.kind()
                })
            }
            Self::Validation(errors) => {
                let field_errors: Vec<String> = errors
                    .field_errors()
                    .iter()
                    .flat_map(|(field, errors)| {
                        errors.iter().map(move |e| {
                            format!(
                                "{}: {}",
                                field,
                                e.message
                                    .as_ref()
                                    .map(|m| m.to_string())
                                    .unwrap_or_else(|| e.code.to_string())
                            )
                        })
                    })
                    .collect();

                json!({
                    "error": "Validation failed",
                    "details": field_errors
                })
            }
            Self::BadRequest(msg) => {
                json!({
                    "error": msg
                })
            }
            Self::Unauthorized => {
                json!({
                    "error": "Unauthorized"
                })
            }
        };

        (status_code, Json(body)).into_response()
    }
}

impl From<StorageError> for WebError {
    fn from(error: StorageError) -> Self {
        Self::Storage(error)
    }
}

impl From<RosterError> for WebError {
    fn from(error: RosterError) -> Self {
        Self::Roster(error)
    }
}

impl From<ValidationErrors> for WebError {
    fn from(error: ValidationErrors) -> Self {
        Self::Validation(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(error: WebError) -> StatusCode {
        error.into_response().status()
    }

    #[test]
    fn test_roster_error_statuses() {
        assert_eq!(
            status(RosterError::CompetitionNotFound.into()),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status(RosterError::AlreadyRegistered.into()),
            StatusCode::CONFLICT
        );
        assert_eq!(status(RosterError::Forbidden.into()), StatusCode::FORBIDDEN);
        assert_eq!(
            status(RosterError::RegistrationWindowClosed.into()),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            status(RosterError::CategoryNotEligibleForAthlete("м14".into()).into()),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn test_storage_errors_inside_roster_errors() {
        assert_eq!(
            status(RosterError::Storage(StorageError::malformed("bad row")).into()),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(status(StorageError::NotFound.into()), StatusCode::NOT_FOUND);
    }
}
