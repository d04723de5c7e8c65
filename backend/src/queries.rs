use futures::TryStreamExt;
use sqlx::{Sqlite, SqlitePool, Transaction};
use tracing::error;
use shared::models::*;
use crate::error::StoreError;

type CandidateRow = (i64, String, i64);
type VoterRow = (String, String, String, i64);

fn candidate((id, name, votes): CandidateRow) -> Candidate {
    Candidate { id, name, votes }
}

pub struct Queries;

impl Queries {
    pub async fn insert_candidate(pool: &SqlitePool, name: &str) -> Result<Candidate, StoreError> {
        sqlx::query_as::<_, CandidateRow>(
            "INSERT INTO candidates (name) VALUES (?) RETURNING id, name, votes"
        )
        .bind(name)
        .fetch_one(pool)
        .await
        .map(candidate)
        .map_err(|e| StoreError::on_unique_violation(e, StoreError::DuplicateCandidate))
    }

    /// Returns the number of rows removed; removing an unknown name is not an error.
    pub async fn delete_candidate(pool: &SqlitePool, name: &str) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM candidates WHERE name = ?")
            .bind(name)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn list_candidates(pool: &SqlitePool) -> Result<Vec<Candidate>, StoreError> {
        sqlx::query_as::<_, CandidateRow>("SELECT id, name, votes FROM candidates")
            .fetch(pool)
            .map_ok(candidate)
            .try_collect()
            .await
            .map_err(StoreError::from)
    }

    pub async fn list_voters(pool: &SqlitePool) -> Result<Vec<VoterSummary>, StoreError> {
        sqlx::query_as::<_, (String, String, i64)>("SELECT id, name, voted FROM voters")
            .fetch(pool)
            .map_ok(|(id, name, voted)| VoterSummary { id, name, voted: voted != 0 })
            .try_collect()
            .await
            .map_err(StoreError::from)
    }

    pub async fn insert_voter(pool: &SqlitePool, voter: &NewVoter) -> Result<(), StoreError> {
        sqlx::query("INSERT INTO voters (id, name, password) VALUES (?, ?, ?)")
            .bind(&voter.id)
            .bind(&voter.name)
            .bind(&voter.password)
            .execute(pool)
            .await
            .map_err(|e| StoreError::on_unique_violation(e, StoreError::DuplicateVoter))?;
        Ok(())
    }

    /// Exact id and password match. The password column is plaintext.
    pub async fn find_voter(pool: &SqlitePool, id: &str, password: &str) -> Result<Option<Voter>, StoreError> {
        let row = sqlx::query_as::<_, VoterRow>(
            "SELECT id, name, password, voted FROM voters WHERE id = ? AND password = ?"
        )
        .bind(id)
        .bind(password)
        .fetch_optional(pool)
        .await?;

        Ok(row.map(|(id, name, password, voted)| Voter { id, name, password, voted: voted != 0 }))
    }

    /// Counts one vote for `candidate_id` and marks the voter as voted, both in
    /// one transaction. Any failure rolls back whatever was already written.
    pub async fn cast_vote(pool: &SqlitePool, voter_id: &str, candidate_id: i64) -> Result<Candidate, StoreError> {
        let mut tx = pool.begin().await?;

        match Self::apply_vote(&mut tx, voter_id, candidate_id).await {
            Ok(counted) => {
                tx.commit().await?;
                Ok(counted)
            }
            Err(e) => {
                if let Err(rollback) = tx.rollback().await {
                    error!("Failed to roll back vote for candidate {}: {}", candidate_id, rollback);
                }
                Err(e)
            }
        }
    }

    async fn apply_vote(tx: &mut Transaction<'_, Sqlite>, voter_id: &str, candidate_id: i64) -> Result<Candidate, StoreError> {
        let voted = sqlx::query_scalar::<_, i64>("SELECT voted FROM voters WHERE id = ?")
            .bind(voter_id)
            .fetch_optional(&mut **tx)
            .await?;

        match voted {
            None => return Err(StoreError::VoterMissing),
            Some(v) if v != 0 => return Err(StoreError::AlreadyVoted),
            Some(_) => {}
        }

        let counted = sqlx::query_as::<_, CandidateRow>(
            "UPDATE candidates SET votes = votes + 1 WHERE id = ? RETURNING id, name, votes"
        )
        .bind(candidate_id)
        .fetch_optional(&mut **tx)
        .await?
        .ok_or(StoreError::CandidateMissing(candidate_id))?;

        let marked = sqlx::query("UPDATE voters SET voted = 1 WHERE id = ? AND voted = 0")
            .bind(voter_id)
            .execute(&mut **tx)
            .await?;

        if marked.rows_affected() != 1 {
            return Err(StoreError::AlreadyVoted);
        }

        Ok(candidate(counted))
    }
}
