use shared::error::{Error, ErrorCode};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Candidate already exists")]
    DuplicateCandidate,
    #[error("Voter ID already exists")]
    DuplicateVoter,
    #[error("Candidate no longer available, choose again")]
    CandidateMissing(i64),
    #[error("Voter not found")]
    VoterMissing,
    #[error("You have already voted")]
    AlreadyVoted,
    #[error("Database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        StoreError::Database(e.to_string())
    }
}

impl StoreError {
    /// Maps a unique/primary-key violation to `conflict`, anything else to `Database`.
    pub fn on_unique_violation(e: sqlx::Error, conflict: StoreError) -> Self {
        let unique = e.as_database_error().is_some_and(|db| db.is_unique_violation());
        if unique { conflict } else { e.into() }
    }
}

impl From<StoreError> for Error {
    fn from(e: StoreError) -> Self {
        let code = match e {
            StoreError::DuplicateCandidate | StoreError::DuplicateVoter => ErrorCode::Conflict,
            StoreError::CandidateMissing(_) | StoreError::VoterMissing => ErrorCode::NotFound,
            StoreError::AlreadyVoted => ErrorCode::Unauthorized,
            StoreError::Database(ref details) => {
                return Error::with_details(ErrorCode::SystemError, "Database error", details.clone());
            }
        };
        Error::new(code, e.to_string())
    }
}
