use thiserror::Error;

/// Business errors for booking workflows. All are terminal: every check is a
/// deterministic computation over already-fetched data, so nothing here is
/// retried.
#[derive(Debug, Error)]
pub enum BookingError {
    #[error("not authenticated")]
    Unauthenticated,
    #[error("forbidden: {0}")]
    Forbidden(String),
    #[error("validation failed on `{field}`: {message}")]
    Validation { field: &'static str, message: String },
    #[error("booking not found")]
    NotFound,
    #[error("repository error: {0}")]
    Repository(String),
}

impl BookingError {
    pub fn forbidden(reason: &str) -> Self {
        Self::Forbidden(reason.to_string())
    }

    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation { field, message: message.into() }
    }

    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            BookingError::Unauthenticated => 2001,
            BookingError::Forbidden(_) => 2002,
            BookingError::Validation { .. } => 2003,
            BookingError::NotFound => 2004,
            BookingError::Repository(_) => 2100,
        }
    }
}
