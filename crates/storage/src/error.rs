use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Malformed record: {0}")]
    MalformedRecord(String),
}

pub type Result<T> = std::result::Result<T, StorageError>;

impl StorageError {
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedRecord(msg.into())
    }

    pub fn is_unique_violation(&self) -> bool {
        matches!(
            self,
            StorageError::Database(sqlx::Error::Database(e))
                if e.code().as_deref() == Some("23505")
        )
    }
}

/// Rejections produced by the roster and ranking services.
///
/// Every variant except `Storage` is a violated precondition detected before any
/// mutation is attempted; retrying the same request yields the same error.
#[derive(Debug, Error)]
pub enum RosterError {
    #[error("Competition not found")]
    CompetitionNotFound,

    #[error("Athlete not found")]
    AthleteNotFound,

    #[error("Athlete is already registered for this competition")]
    AlreadyRegistered,

    #[error("Athlete is not registered for this competition")]
    NotRegistered,

    #[error("Registration window is closed")]
    RegistrationWindowClosed,

    #[error("Competition has already taken place")]
    EventAlreadyOccurred,

    #[error("Category {0} is not eligible for this athlete")]
    CategoryNotEligibleForAthlete(String),

    #[error("Category {0} is not offered by this competition")]
    CategoryNotOfferedByCompetition(String),

    #[error("Caller may not perform this operation")]
    Forbidden,

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl RosterError {
    /// Stable machine-readable name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::CompetitionNotFound => "CompetitionNotFound",
            Self::AthleteNotFound => "AthleteNotFound",
            Self::AlreadyRegistered => "AlreadyRegistered",
            Self::NotRegistered => "NotRegistered",
            Self::RegistrationWindowClosed => "RegistrationWindowClosed",
            Self::EventAlreadyOccurred => "EventAlreadyOccurred",
            Self::CategoryNotEligibleForAthlete(_) => "CategoryNotEligibleForAthlete",
            Self::CategoryNotOfferedByCompetition(_) => "CategoryNotOfferedByCompetition",
            Self::Forbidden => "Forbidden",
            Self::Storage(StorageError::MalformedRecord(_)) => "MalformedRecord",
            Self::Storage(_) => "Storage",
        }
    }
}
