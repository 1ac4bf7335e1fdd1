//! In-memory reference implementation of [`ScoreStore`].
//!
//! One mutex guards the whole document map, which makes every commit atomic
//! and serialized. Conflict detection still goes through the innings version
//! so callers exercise the same retry path a real database would force.

use std::collections::HashMap;
use std::sync::Mutex;

use tracing::debug;
use uuid::Uuid;

use crate::error::{EngineError, Result};
use crate::models::{Innings, InningsNumber, Match, PlayerStatus};

use super::{BallTransaction, ScoreStore};

#[derive(Debug)]
struct VersionedInnings {
    doc: Innings,
    version: u64,
}

#[derive(Debug, Default)]
struct Documents {
    matches: HashMap<Uuid, Match>,
    innings: HashMap<Uuid, VersionedInnings>,
    innings_by_match: HashMap<(Uuid, InningsNumber), Uuid>,
    statuses: HashMap<(Uuid, Uuid, InningsNumber), PlayerStatus>,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: Mutex<Documents>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScoreStore for MemoryStore {
    fn load_match(&self, id: Uuid) -> Result<Match> {
        let docs = self.documents.lock().unwrap();
        docs.matches.get(&id).cloned().ok_or_else(|| EngineError::not_found("match", id))
    }

    fn load_innings(&self, id: Uuid) -> Result<(Innings, u64)> {
        let docs = self.documents.lock().unwrap();
        docs.innings
            .get(&id)
            .map(|entry| (entry.doc.clone(), entry.version))
            .ok_or_else(|| EngineError::not_found("innings", id))
    }

    fn find_innings(
        &self,
        match_id: Uuid,
        number: InningsNumber,
    ) -> Result<Option<(Innings, u64)>> {
        let docs = self.documents.lock().unwrap();
        Ok(docs.innings_by_match.get(&(match_id, number)).and_then(|id| {
            docs.innings.get(id).map(|entry| (entry.doc.clone(), entry.version))
        }))
    }

    fn load_player_statuses(
        &self,
        match_id: Uuid,
        innings: InningsNumber,
    ) -> Result<Vec<PlayerStatus>> {
        let docs = self.documents.lock().unwrap();
        Ok(docs
            .statuses
            .iter()
            .filter(|((_, m, n), _)| *m == match_id && *n == innings)
            .map(|(_, status)| status.clone())
            .collect())
    }

    fn insert_match(&self, match_doc: Match) -> Result<()> {
        let mut docs = self.documents.lock().unwrap();
        docs.matches.insert(match_doc.id, match_doc);
        Ok(())
    }

    fn create_innings(&self, innings: Innings, match_doc: Match) -> Result<()> {
        let mut docs = self.documents.lock().unwrap();

        let key = (innings.match_id, innings.number);
        if docs.innings_by_match.contains_key(&key) {
            return Err(EngineError::validation(format!(
                "innings {} already exists for match {}",
                innings.number.as_u8(),
                innings.match_id
            )));
        }
        if !docs.matches.contains_key(&match_doc.id) {
            return Err(EngineError::not_found("match", match_doc.id));
        }

        docs.innings_by_match.insert(key, innings.id);
        docs.innings.insert(innings.id, VersionedInnings { doc: innings, version: 1 });
        docs.matches.insert(match_doc.id, match_doc);
        Ok(())
    }

    fn commit(&self, txn: BallTransaction) -> Result<()> {
        let mut docs = self.documents.lock().unwrap();

        let innings_id = txn.innings.id;
        let entry = docs
            .innings
            .get(&innings_id)
            .ok_or_else(|| EngineError::not_found("innings", innings_id))?;
        if entry.version != txn.base_version {
            return Err(EngineError::TransactionConflict { innings: innings_id });
        }

        // Conflict check passed: apply every write, none can fail past here.
        let next_version = txn.base_version + 1;
        docs.innings
            .insert(innings_id, VersionedInnings { doc: txn.innings, version: next_version });
        if let Some(match_doc) = txn.match_doc {
            docs.matches.insert(match_doc.id, match_doc);
        }
        for status in txn.player_statuses {
            let key = (status.player_id, status.match_id, status.innings);
            docs.statuses.insert(key, status);
        }

        debug!(innings = %innings_id, version = next_version, "ball transaction committed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MatchStatus;

    fn seeded() -> (MemoryStore, Match, Innings) {
        let store = MemoryStore::new();
        let mut match_doc = Match::new(Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4(), 20);
        match_doc.status = MatchStatus::InProgress;
        store.insert_match(match_doc.clone()).unwrap();

        let lineup: Vec<Uuid> = (0..11).map(|_| Uuid::new_v4()).collect();
        let innings = Innings::open(
            match_doc.id,
            InningsNumber::One,
            match_doc.team_a,
            match_doc.team_b,
            lineup,
        );
        store.create_innings(innings.clone(), match_doc.clone()).unwrap();
        (store, match_doc, innings)
    }

    #[test]
    fn test_load_round_trip() {
        let (store, match_doc, innings) = seeded();

        let (loaded, version) = store.load_innings(innings.id).unwrap();
        assert_eq!(loaded, innings);
        assert_eq!(version, 1);
        assert_eq!(store.load_match(match_doc.id).unwrap().id, match_doc.id);
        assert!(store.load_player_statuses(match_doc.id, InningsNumber::One).unwrap().is_empty());
    }

    #[test]
    fn test_missing_documents_are_not_found() {
        let store = MemoryStore::new();
        assert!(matches!(
            store.load_innings(Uuid::new_v4()).unwrap_err(),
            EngineError::NotFound { entity: "innings", .. }
        ));
        assert!(matches!(
            store.load_match(Uuid::new_v4()).unwrap_err(),
            EngineError::NotFound { entity: "match", .. }
        ));
    }

    #[test]
    fn test_one_innings_per_match_and_number() {
        let (store, match_doc, innings) = seeded();

        let duplicate = Innings::open(
            match_doc.id,
            InningsNumber::One,
            innings.batting_team,
            innings.bowling_team,
            innings.lineup.clone(),
        );
        let err = store.create_innings(duplicate, match_doc).unwrap_err();
        assert!(matches!(err, EngineError::Validation(_)));
    }

    #[test]
    fn test_commit_bumps_version() {
        let (store, _, innings) = seeded();
        let (mut doc, version) = store.load_innings(innings.id).unwrap();
        doc.score.runs = 4;

        store
            .commit(BallTransaction {
                base_version: version,
                innings: doc,
                match_doc: None,
                player_statuses: Vec::new(),
            })
            .unwrap();

        let (reloaded, version) = store.load_innings(innings.id).unwrap();
        assert_eq!(reloaded.score.runs, 4);
        assert_eq!(version, 2);
    }

    #[test]
    fn test_stale_commit_conflicts_and_writes_nothing() {
        let (store, match_doc, innings) = seeded();
        let (mut doc, version) = store.load_innings(innings.id).unwrap();
        doc.score.runs = 1;

        store
            .commit(BallTransaction {
                base_version: version,
                innings: doc.clone(),
                match_doc: None,
                player_statuses: Vec::new(),
            })
            .unwrap();

        // Second writer computed from the same snapshot.
        doc.score.runs = 99;
        let mut stale_match = match_doc.clone();
        stale_match.status = MatchStatus::Completed;
        let status =
            PlayerStatus::new(Uuid::new_v4(), match_doc.id, InningsNumber::One);
        let err = store
            .commit(BallTransaction {
                base_version: version,
                innings: doc,
                match_doc: Some(stale_match),
                player_statuses: vec![status],
            })
            .unwrap_err();
        assert!(matches!(err, EngineError::TransactionConflict { .. }));

        // None of the stale writes landed.
        let (reloaded, _) = store.load_innings(innings.id).unwrap();
        assert_eq!(reloaded.score.runs, 1);
        assert_eq!(store.load_match(match_doc.id).unwrap().status, MatchStatus::InProgress);
        assert!(store.load_player_statuses(match_doc.id, InningsNumber::One).unwrap().is_empty());
    }
}
