//! Domain errors

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Exit date is before entry date")]
    InvalidRange,

    #[error("Entry date is in the past")]
    PastDate,

    #[error("Place not found for this tenant")]
    PlaceNotFound,

    #[error("User not found for this tenant")]
    UserNotFound,

    #[error("No capacity left on at least one day of the requested range")]
    CapacityExceeded,

    #[error("Concurrent booking in progress, retry")]
    Contention,

    #[error("Reservation not found for this tenant")]
    NotFound,

    #[error("Caller is not allowed to {0}")]
    Forbidden(String),

    #[error("Unsupported business type: {0}")]
    UnsupportedBusinessType(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl DomainError {
    /// Stable machine-readable reason code for API callers.
    pub fn reason_code(&self) -> &'static str {
        match self {
            DomainError::InvalidInput(_) => "invalid_input",
            DomainError::InvalidRange => "invalid_range",
            DomainError::PastDate => "past_date",
            DomainError::PlaceNotFound => "place_not_found",
            DomainError::UserNotFound => "user_not_found",
            DomainError::CapacityExceeded => "capacity_exceeded",
            DomainError::Contention => "contention",
            DomainError::NotFound => "not_found",
            DomainError::Forbidden(_) => "forbidden",
            DomainError::UnsupportedBusinessType(_) => "unsupported_business_type",
            DomainError::ValidationError(_) => "validation_error",
            DomainError::DatabaseError(_) => "store_failure",
        }
    }

    /// Whether the caller may retry the same request unchanged.
    pub fn is_retryable(&self) -> bool {
        matches!(self, DomainError::Contention)
    }
}

impl From<validator::ValidationErrors> for DomainError {
    fn from(errors: validator::ValidationErrors) -> Self {
        DomainError::ValidationError(errors.to_string())
    }
}

impl From<moorage_shared::types::DateRangeError> for DomainError {
    fn from(_: moorage_shared::types::DateRangeError) -> Self {
        DomainError::InvalidRange
    }
}
