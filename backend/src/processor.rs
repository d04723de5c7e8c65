use sqlx::SqlitePool;
use tracing::{debug, info, warn};
use shared::error::{Error, Result};
use shared::models::*;
use shared::validation::{validate_candidate_name, validate_credentials, validate_registration};
use crate::error::StoreError;
use crate::queries::Queries;
use crate::session::VoterSession;

/// Validation plus store access for every action the screens expose.
pub struct ElectionProcessor;

impl ElectionProcessor {
    /// Exact string equality against the configured password, no hashing.
    pub fn check_admin_password(expected: &str, given: &str) -> Result<()> {
        if given == expected {
            Ok(())
        } else {
            warn!("Rejected admin login attempt");
            Err(Error::unauthorized("Incorrect password"))
        }
    }

    pub async fn add_candidate(pool: &SqlitePool, input: &str) -> Result<Candidate> {
        let name = validate_candidate_name(input)?;
        let candidate = Queries::insert_candidate(pool, name).await?;
        info!(candidate_id = candidate.id, "✓ Added candidate {}", candidate.name);
        Ok(candidate)
    }

    /// Returns the trimmed name that was removed, whether or not a row matched.
    pub async fn remove_candidate(pool: &SqlitePool, input: &str) -> Result<String> {
        let name = validate_candidate_name(input)?;
        let removed = Queries::delete_candidate(pool, name).await?;
        if removed == 0 {
            debug!("No candidate named {} to remove", name);
        } else {
            info!("🗑️ Removed candidate {}", name);
        }
        Ok(name.to_string())
    }

    pub async fn voters_report(pool: &SqlitePool) -> Result<String> {
        let voters = Queries::list_voters(pool).await?;
        Ok(format_voter_listing(&voters))
    }

    pub async fn results_report(pool: &SqlitePool) -> Result<String> {
        let candidates = Queries::list_candidates(pool).await?;
        Ok(format_results(&candidates))
    }

    pub async fn candidates(pool: &SqlitePool) -> Result<Vec<Candidate>> {
        Ok(Queries::list_candidates(pool).await?)
    }

    /// Returns the registered voter's display name.
    pub async fn register_voter(pool: &SqlitePool, form: &RegistrationForm) -> Result<String> {
        let voter = validate_registration(form)?;
        Queries::insert_voter(pool, &voter).await?;
        info!("✓ Registered voter {}", voter.id);
        Ok(voter.name)
    }

    /// Both checks are required: matching credentials and not having voted.
    pub async fn authenticate_voter(pool: &SqlitePool, credentials: &Credentials) -> Result<VoterSession> {
        let (id, password) = validate_credentials(credentials)?;

        let Some(voter) = Queries::find_voter(pool, id, password).await? else {
            warn!("Invalid credentials for voter {}", id);
            return Err(Error::unauthorized("Invalid credentials"));
        };

        if voter.voted {
            warn!("Voter {} tried to log in after voting", voter.id);
            return Err(StoreError::AlreadyVoted.into());
        }

        Ok(VoterSession::start(voter.id))
    }

    pub async fn cast_vote(pool: &SqlitePool, session: &VoterSession, candidate_id: i64) -> std::result::Result<Candidate, StoreError> {
        let candidate = Queries::cast_vote(pool, session.voter_id(), candidate_id).await?;
        info!(session = %session.id(), candidate_id, "✓ Vote recorded");
        Ok(candidate)
    }
}
