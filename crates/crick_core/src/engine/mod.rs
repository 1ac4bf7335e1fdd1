//! The scoring engine: one pure fold per delivery.
//!
//! `ScoringEngine::apply` takes the loaded documents, the wire request and a
//! timestamp, and returns everything the storage layer must persist in one
//! transaction. No I/O happens here; on error the caller drops the
//! application and nothing was mutated anywhere.

pub mod accumulator;
pub mod bowling;
pub mod completion;
pub mod dismissal;
pub mod outcome;
pub mod strike;


use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::api::ApplyBallRequest;
use crate::error::{EngineError, Result};
use crate::models::{
    BattingRole, CommentaryEntry, Innings, InningsNumber, Match, PlayerStatus,
};

pub use dismissal::BowlerCreditTable;
pub use outcome::{OutcomeCode, OutcomeEffect, ResolvedOutcome};

/// Working set of PlayerStatus records for one innings.
///
/// Records are created lazily on first participation; only records actually
/// touched by a delivery are handed back for persistence.
pub struct LedgerSet {
    match_id: Uuid,
    innings: InningsNumber,
    records: HashMap<Uuid, PlayerStatus>,
    touched: HashSet<Uuid>,
}

impl LedgerSet {
    pub fn new(match_id: Uuid, innings: InningsNumber, existing: Vec<PlayerStatus>) -> Self {
        let records = existing.into_iter().map(|status| (status.player_id, status)).collect();
        Self { match_id, innings, records, touched: HashSet::new() }
    }

    pub fn get(&self, player: Uuid) -> Option<&PlayerStatus> {
        self.records.get(&player)
    }

    /// Mutable access, creating a blank record on first use.
    pub fn get_or_create(&mut self, player: Uuid) -> &mut PlayerStatus {
        self.touched.insert(player);
        self.records
            .entry(player)
            .or_insert_with(|| PlayerStatus::new(player, self.match_id, self.innings))
    }

    /// The records a delivery actually modified.
    pub fn into_touched(mut self) -> Vec<PlayerStatus> {
        let mut out: Vec<PlayerStatus> = self
            .touched
            .iter()
            .filter_map(|player| self.records.remove(player))
            .collect();
        // Deterministic order keeps transaction payloads stable.
        out.sort_by_key(|status| status.player_id);
        out
    }
}

/// Documents a delivery computation starts from.
pub struct BallContext {
    pub match_doc: Match,
    pub innings: Innings,
    /// Store version of the innings at load time; echoed into the
    /// transaction for conflict detection.
    pub innings_version: u64,
    pub ledgers: Vec<PlayerStatus>,
}

/// Everything one applied delivery produced. Persisted atomically.
pub struct BallApplication {
    pub innings: Innings,
    pub match_doc: Match,
    /// Whether the match document changed and must be written back.
    pub match_mutated: bool,
    pub player_statuses: Vec<PlayerStatus>,
    pub commentary: CommentaryEntry,
    pub base_version: u64,
    pub bowler: Uuid,
    pub striker: Uuid,
    pub non_striker: Uuid,
    pub fielder: Option<Uuid>,
    pub dismissed: Option<Uuid>,
}

/// Pure per-delivery state machine.
#[derive(Debug, Default)]
pub struct ScoringEngine {
    credit: BowlerCreditTable,
}

impl ScoringEngine {
    pub fn new(credit: BowlerCreditTable) -> Self {
        Self { credit }
    }

    pub fn credit_table(&self) -> &BowlerCreditTable {
        &self.credit
    }

    /// Fold one ball outcome into the innings.
    pub fn apply(
        &self,
        ctx: BallContext,
        request: &ApplyBallRequest,
        now: DateTime<Utc>,
    ) -> Result<BallApplication> {
        let BallContext { mut match_doc, mut innings, innings_version, ledgers } = ctx;

        if innings.is_completed() {
            return Err(EngineError::InningsAlreadyCompleted(innings.id));
        }
        if match_doc.is_decided() {
            return Err(EngineError::validation("match is already decided"));
        }

        request.validate()?;
        let resolved = outcome::resolve(
            request.effective_code(),
            request.runs,
            request.custom_outcome.as_ref(),
        )?;

        let bowler = request
            .bowler_id
            .or(innings.current_bowler)
            .ok_or_else(|| EngineError::validation("no bowler on record; supply bowler_id"))?;

        // Wicket parameters are validated in full before any mutation.
        let dismissal = if resolved.effect.is_wicket {
            Some(dismissal::parse(
                request.dismissal_type.as_deref(),
                request.next_batsman_id,
                request.next_batsman_role.as_deref(),
                request.fielder_id,
            )?)
        } else {
            if request.dismissal_type.is_some() || request.next_batsman_id.is_some() {
                return Err(EngineError::validation(
                    "dismissal parameters supplied for a non-wicket outcome",
                ));
            }
            None
        };

        let mut ledgers = LedgerSet::new(match_doc.id, innings.number, ledgers);
        let striker_at_delivery = innings.batsmen.striker();

        accumulator::accumulate(&mut innings.score, resolved.code, &resolved.effect);

        {
            let batting = &mut ledgers.get_or_create(striker_at_delivery).batting;
            batting.runs += resolved.effect.runs;
            if resolved.effect.counts_as_ball {
                batting.balls_faced += 1;
            }
            match resolved.code {
                OutcomeCode::Four => batting.fours += 1,
                OutcomeCode::Six => batting.sixes += 1,
                _ => {}
            }
        }

        let dismissed = match &dismissal {
            Some(parsed) => {
                Some(dismissal::apply(&mut innings, &mut ledgers, parsed, bowler, request.fielder_id)?)
            }
            None => {
                strike::rotate(
                    &mut innings.batsmen,
                    resolved.effect.runs,
                    resolved.effect.counts_as_ball,
                    innings.score.balls,
                );
                None
            }
        };

        let wicket_credited =
            dismissal.as_ref().is_some_and(|parsed| self.credit.credits(parsed.kind));
        bowling::update(
            &mut innings,
            &mut ledgers,
            bowler,
            resolved.code,
            &resolved.effect,
            wicket_credited,
        );

        // Persisted role snapshots follow the arena.
        let striker = innings.batsmen.striker();
        let non_striker = innings.batsmen.non_striker();
        ledgers.get_or_create(striker).batting.role = Some(BattingRole::Striker);
        ledgers.get_or_create(non_striker).batting.role = Some(BattingRole::NonStriker);

        let completion_note = if resolved.effect.counts_as_ball {
            completion::evaluate(&mut match_doc, &mut innings, now)
        } else {
            None
        };
        let match_mutated = completion_note.is_some();

        let description = describe_delivery(&resolved, dismissal.as_ref());
        let entry = CommentaryEntry::at_ball(innings.score.balls, description, now);
        innings.commentary.push(entry.clone());
        if let Some(note) = completion_note {
            innings.commentary.push(CommentaryEntry::at_ball(innings.score.balls, note, now));
        }

        Ok(BallApplication {
            innings,
            match_doc,
            match_mutated,
            player_statuses: ledgers.into_touched(),
            commentary: entry,
            base_version: innings_version,
            bowler,
            striker,
            non_striker,
            fielder: request.fielder_id,
            dismissed,
        })
    }
}

fn describe_delivery(
    resolved: &ResolvedOutcome,
    dismissal: Option<&dismissal::ParsedDismissal>,
) -> String {
    if let Some(parsed) = dismissal {
        return format!("WICKET! {}", dismissal::describe(parsed.kind));
    }
    match resolved.code {
        OutcomeCode::Run => {
            if resolved.effect.runs == 1 {
                "1 run".to_string()
            } else {
                format!("{} runs", resolved.effect.runs)
            }
        }
        OutcomeCode::Bye => format!("{} byes", resolved.effect.extras),
        OutcomeCode::LegBye => format!("{} leg byes", resolved.effect.extras),
        _ => resolved
            .effect
            .description
            .clone()
            .unwrap_or_else(|| resolved.code.as_str().to_string()),
    }
}
