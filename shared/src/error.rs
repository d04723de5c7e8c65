use std::fmt;
use thiserror::Error;

use crate::validation::ValidationError;

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ErrorCode {
    #[error("Validation failed")]
    ValidationFailed,
    #[error("Resource conflict")]
    Conflict,
    #[error("Operation not authorized")]
    Unauthorized,
    #[error("Resource not found")]
    NotFound,
    #[error("Internal system error")]
    SystemError,
}

/// User-facing error. `message` is the text shown in the status field of the
/// screen that triggered the action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    pub code: ErrorCode,
    pub message: String,
    pub details: Option<String>,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(details) = &self.details {
            write!(f, "{}: {} ({})", self.code, self.message, details)
        } else {
            write!(f, "{}: {}", self.code, self.message)
        }
    }
}

impl std::error::Error for Error {}

impl Error {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(code: ErrorCode, message: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: Some(details.into()),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized, message)
    }

    pub fn system(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::SystemError, message)
    }
}

impl From<ValidationError> for Error {
    fn from(err: ValidationError) -> Self {
        Self::new(ErrorCode::ValidationFailed, err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
