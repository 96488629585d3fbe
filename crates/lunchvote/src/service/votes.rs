//! Vote writes with post-commit cache invalidation.
//!
//! Wraps the vote repository so that every successful ledger write is
//! followed by an explicit invalidation of the cached result. Invalidation
//! runs after the transactional write commits and its failure never fails
//! the write.

use std::sync::Arc;

use uuid::Uuid;

use lunchvote_core::lunch::Vote;
use lunchvote_core::storage::{Result, VoteRepository};

use super::results::ResultCache;

/// The write side of the vote ledger.
pub struct VoteService {
    votes: Arc<dyn VoteRepository>,
    results: Arc<ResultCache>,
}

impl VoteService {
    /// Creates a new vote service over the given repository and result
    /// cache.
    pub fn new(votes: Arc<dyn VoteRepository>, results: Arc<ResultCache>) -> Self {
        Self { votes, results }
    }

    /// Casts a vote, then invalidates the cached result.
    pub async fn cast_vote(&self, vote: &Vote) -> Result<()> {
        self.votes.cast_vote(vote).await?;

        tracing::debug!(
            vote_id = %vote.id,
            menu_id = %vote.menu_id,
            day = %vote.day,
            "Vote cast"
        );

        self.results.invalidate().await;
        Ok(())
    }

    /// Moves an existing vote to another menu, then invalidates the cached
    /// result.
    pub async fn move_vote(&self, vote_id: Uuid, new_menu_id: Uuid) -> Result<Vote> {
        let vote = self.votes.move_vote(vote_id, new_menu_id).await?;

        tracing::debug!(
            vote_id = %vote.id,
            menu_id = %vote.menu_id,
            "Vote moved"
        );

        self.results.invalidate().await;
        Ok(vote)
    }
}
