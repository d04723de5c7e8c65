use time::OffsetDateTime;
use tracing::info;
use uuid::Uuid;

/// Proof that a voter authenticated and has not voted yet.
///
/// Created only by [`crate::processor::ElectionProcessor::authenticate_voter`]
/// and consumed by [`VoterSession::finish`] once the vote is stored. Dropping
/// it without finishing ends the session without a vote.
#[derive(Debug, PartialEq, Eq)]
pub struct VoterSession {
    id: Uuid,
    voter_id: String,
    started_at: OffsetDateTime,
}

impl VoterSession {
    pub(crate) fn start(voter_id: impl Into<String>) -> Self {
        let session = Self {
            id: Uuid::new_v4(),
            voter_id: voter_id.into(),
            started_at: OffsetDateTime::now_utc(),
        };
        info!(session = %session.id, voter = %session.voter_id, "Voter session started");
        session
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn voter_id(&self) -> &str {
        &self.voter_id
    }

    pub fn started_at(&self) -> OffsetDateTime {
        self.started_at
    }

    pub(crate) fn finish(self) {
        let elapsed = OffsetDateTime::now_utc() - self.started_at;
        info!(
            session = %self.id,
            voter = %self.voter_id,
            seconds = elapsed.whole_seconds(),
            "Voter session completed"
        );
    }
}
