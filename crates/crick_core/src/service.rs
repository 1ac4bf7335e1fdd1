//! Scoring service: the transactional wrapper around the pure engine.
//!
//! `apply_ball` is load -> fold -> commit -> broadcast. The fold is pure and
//! the commit is atomic, so a failure at any step leaves every document
//! exactly as it was. Broadcast runs strictly after the commit and its
//! failure is logged, never surfaced.

use std::collections::{HashMap, HashSet};

use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::api::{ApplyBallRequest, ApplyBallResponse, StartInningsRequest};
use crate::broadcast::{Broadcaster, ScoreEvent};
use crate::engine::{BallContext, BowlerCreditTable, ScoringEngine};
use crate::error::{EngineError, Result};
use crate::models::{Innings, InningsNumber, MatchStatus, PlayerStatus, TossDecision};
use crate::store::{BallTransaction, ScoreStore};

/// Team/player registry collaborator: answers roster membership questions at
/// innings start. The registry itself lives outside this crate.
pub trait TeamDirectory: Send + Sync {
    fn is_member(&self, team: Uuid, player: Uuid) -> bool;
}

/// In-memory directory for embedded use and tests.
#[derive(Debug, Default)]
pub struct RosterDirectory {
    rosters: HashMap<Uuid, HashSet<Uuid>>,
}

impl RosterDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_team(mut self, team: Uuid, players: impl IntoIterator<Item = Uuid>) -> Self {
        self.rosters.entry(team).or_default().extend(players);
        self
    }
}

impl TeamDirectory for RosterDirectory {
    fn is_member(&self, team: Uuid, player: Uuid) -> bool {
        self.rosters.get(&team).is_some_and(|roster| roster.contains(&player))
    }
}

pub struct ScoringService<S: ScoreStore, B: Broadcaster> {
    store: S,
    broadcaster: B,
    engine: ScoringEngine,
}

impl<S: ScoreStore, B: Broadcaster> ScoringService<S, B> {
    pub fn new(store: S, broadcaster: B) -> Self {
        Self { store, broadcaster, engine: ScoringEngine::default() }
    }

    /// Override the bowler wicket-credit policy.
    pub fn with_credit_table(mut self, table: BowlerCreditTable) -> Self {
        self.engine = ScoringEngine::new(table);
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Apply one ball outcome to an innings.
    ///
    /// Serialization per innings comes from the store's version check: a
    /// concurrent writer makes the later commit fail with
    /// `TransactionConflict`, which is retryable by the caller.
    pub fn apply_ball(&self, request: &ApplyBallRequest) -> Result<ApplyBallResponse> {
        request.validate()?;

        let (innings, innings_version) = self.store.load_innings(request.innings_id)?;
        let match_doc = self.store.load_match(innings.match_id)?;
        let ledgers = self.store.load_player_statuses(innings.match_id, innings.number)?;

        let ctx = BallContext { match_doc, innings, innings_version, ledgers };
        let applied = self.engine.apply(ctx, request, Utc::now())?;

        self.store.commit(BallTransaction::from_application(&applied))?;
        debug!(
            innings = %applied.innings.id,
            runs = applied.innings.score.runs,
            wickets = applied.innings.score.wickets,
            "ball applied"
        );
        if applied.match_mutated {
            info!(
                match_id = %applied.match_doc.id,
                status = ?applied.match_doc.status,
                target = ?applied.match_doc.target_runs,
                winner = ?applied.match_doc.winner,
                "match state advanced"
            );
        }

        let event = ScoreEvent {
            match_id: applied.match_doc.id,
            innings_id: applied.innings.id,
            innings: applied.innings.clone(),
        };
        if let Err(err) = self.broadcaster.publish(&event) {
            warn!(error = %err, innings = %applied.innings.id, "score broadcast failed; state is committed");
        }

        let snapshot = |player: Uuid| -> Result<PlayerStatus> {
            applied
                .player_statuses
                .iter()
                .find(|status| status.player_id == player)
                .cloned()
                .ok_or_else(|| EngineError::Store(format!("missing ledger snapshot for {}", player)))
        };

        Ok(ApplyBallResponse {
            bowler: snapshot(applied.bowler)?,
            striker: snapshot(applied.striker)?,
            non_striker: snapshot(applied.non_striker)?,
            fielder: match applied.fielder {
                Some(fielder) => Some(snapshot(fielder)?),
                None => None,
            },
            match_update: applied.match_mutated.then(|| applied.match_doc.clone()),
            commentary: applied.commentary.clone(),
            innings: applied.innings,
        })
    }

    /// Open the next innings of a match.
    ///
    /// Innings 1 needs a recorded toss; innings 2 needs innings 1 decided.
    /// Lineup membership is checked against the registry collaborator.
    pub fn start_innings(
        &self,
        request: &StartInningsRequest,
        directory: &dyn TeamDirectory,
    ) -> Result<Innings> {
        request.validate()?;

        let mut match_doc = self.store.load_match(request.match_id)?;
        if match_doc.is_decided() {
            return Err(EngineError::validation("match is already decided"));
        }
        let toss = match_doc
            .toss
            .ok_or_else(|| EngineError::validation("toss has not been recorded"))?;

        let first = self.store.find_innings(match_doc.id, InningsNumber::One)?;
        let second = self.store.find_innings(match_doc.id, InningsNumber::Two)?;

        let (number, batting_team) = match (first, second) {
            (None, None) => {
                let batting = match toss.decision {
                    TossDecision::Bat => toss.winner,
                    TossDecision::Bowl => match_doc.opponent_of(toss.winner).ok_or_else(|| {
                        EngineError::validation("toss winner does not play in this match")
                    })?,
                };
                (InningsNumber::One, batting)
            }
            (Some((prior, _)), None) => {
                if !prior.is_completed() {
                    return Err(EngineError::validation(
                        "previous innings has not been decided",
                    ));
                }
                (InningsNumber::Two, prior.bowling_team)
            }
            (_, Some(_)) => {
                return Err(EngineError::validation("both innings of this match already exist"))
            }
        };

        let bowling_team = match_doc
            .opponent_of(batting_team)
            .ok_or_else(|| EngineError::validation("batting team does not play in this match"))?;

        for player in &request.lineup {
            if !directory.is_member(batting_team, *player) {
                return Err(EngineError::validation(format!(
                    "player {} is not on the batting team's roster",
                    player
                )));
            }
        }

        let innings = Innings::open(
            match_doc.id,
            number,
            batting_team,
            bowling_team,
            request.lineup.clone(),
        );
        match_doc.status = MatchStatus::InProgress;
        self.store.create_innings(innings.clone(), match_doc)?;

        info!(innings = %innings.id, number = innings.number.as_u8(), "innings started");
        Ok(innings)
    }
}
