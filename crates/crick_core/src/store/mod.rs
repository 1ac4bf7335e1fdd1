//! Persistence boundary.
//!
//! The engine never talks to a database; it produces a [`BallTransaction`]
//! and a `ScoreStore` implementation applies it atomically. The version
//! echoed through the transaction is how lost updates are detected: a commit
//! against a stale version fails with `TransactionConflict` and nothing is
//! written.

pub mod memory;

use uuid::Uuid;

use crate::engine::BallApplication;
use crate::error::Result;
use crate::models::{Innings, InningsNumber, Match, PlayerStatus};

pub use memory::MemoryStore;

/// Every write a single applied delivery produced, persisted all-or-nothing.
#[derive(Debug, Clone)]
pub struct BallTransaction {
    /// Innings version the computation was based on.
    pub base_version: u64,
    pub innings: Innings,
    /// Present when the ball changed match-level state.
    pub match_doc: Option<Match>,
    pub player_statuses: Vec<PlayerStatus>,
}

impl BallTransaction {
    pub fn from_application(applied: &BallApplication) -> Self {
        Self {
            base_version: applied.base_version,
            innings: applied.innings.clone(),
            match_doc: applied.match_mutated.then(|| applied.match_doc.clone()),
            player_statuses: applied.player_statuses.clone(),
        }
    }
}

/// Storage contract for the scoring engine.
///
/// Implementations must make `commit` and `create_innings` atomic and must
/// serialize commits per innings; everything else is plain reads.
pub trait ScoreStore: Send + Sync {
    fn load_match(&self, id: Uuid) -> Result<Match>;

    /// The innings document plus its current store version.
    fn load_innings(&self, id: Uuid) -> Result<(Innings, u64)>;

    fn find_innings(&self, match_id: Uuid, number: InningsNumber)
        -> Result<Option<(Innings, u64)>>;

    /// All PlayerStatus records of one (match, innings) pairing.
    fn load_player_statuses(
        &self,
        match_id: Uuid,
        innings: InningsNumber,
    ) -> Result<Vec<PlayerStatus>>;

    fn insert_match(&self, match_doc: Match) -> Result<()>;

    /// Persist a freshly opened innings together with the match update that
    /// accompanies it. Enforces at most one innings per (match, number).
    fn create_innings(&self, innings: Innings, match_doc: Match) -> Result<()>;

    fn commit(&self, txn: BallTransaction) -> Result<()>;
}
