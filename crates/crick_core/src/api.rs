//! Wire payloads for the scoring interface.
//!
//! Requests carry loosely-typed fields (string codes, optional ids) the way
//! they arrive from the routing layer; everything is checked here and in the
//! engine before any document is touched.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::engine::outcome::OutcomeEffect;
use crate::error::{EngineError, Result};
use crate::models::{CommentaryEntry, Innings, Match, PlayerStatus};

/// One ball outcome submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplyBallRequest {
    pub innings_id: Uuid,
    /// Catalog code: run, four, six, wide, no_ball, bye, leg_bye, penalty,
    /// wicket, custom.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome_code: Option<String>,
    /// Batting runs for `run`; extra count for `bye`/`leg_bye`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runs: Option<u32>,
    /// Required when the outcome is `custom`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_outcome: Option<OutcomeEffect>,
    /// Acting bowler; may be omitted once the innings has one on record.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bowler_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fielder_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dismissal_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_batsman_id: Option<Uuid>,
    /// "striker" or "non_striker".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_batsman_role: Option<String>,
}

impl ApplyBallRequest {
    pub fn outcome(innings_id: Uuid, code: &str) -> Self {
        Self {
            innings_id,
            outcome_code: Some(code.to_string()),
            runs: None,
            custom_outcome: None,
            bowler_id: None,
            fielder_id: None,
            dismissal_type: None,
            next_batsman_id: None,
            next_batsman_role: None,
        }
    }

    pub fn custom(innings_id: Uuid, effect: OutcomeEffect) -> Self {
        let mut request = Self::outcome(innings_id, "custom");
        request.custom_outcome = Some(effect);
        request
    }

    pub fn with_runs(mut self, runs: u32) -> Self {
        self.runs = Some(runs);
        self
    }

    pub fn with_bowler(mut self, bowler: Uuid) -> Self {
        self.bowler_id = Some(bowler);
        self
    }

    pub fn with_fielder(mut self, fielder: Uuid) -> Self {
        self.fielder_id = Some(fielder);
        self
    }

    pub fn with_dismissal(mut self, kind: &str, next_batsman: Uuid, role: &str) -> Self {
        self.dismissal_type = Some(kind.to_string());
        self.next_batsman_id = Some(next_batsman);
        self.next_batsman_role = Some(role.to_string());
        self
    }

    /// Shape checks that need no loaded documents.
    pub fn validate(&self) -> Result<()> {
        match (&self.outcome_code, &self.custom_outcome) {
            (None, None) => Err(EngineError::validation(
                "either outcome_code or custom_outcome is required",
            )),
            (Some(code), Some(_)) if code != "custom" => Err(EngineError::validation(
                "custom_outcome is only valid with outcome_code 'custom'",
            )),
            (Some(code), None) if code == "custom" => Err(EngineError::InvalidOutcome(
                "custom outcome requires a supplied effect".into(),
            )),
            _ => Ok(()),
        }
    }

    /// The catalog code this request resolves through.
    pub fn effective_code(&self) -> &str {
        self.outcome_code.as_deref().unwrap_or("custom")
    }
}

/// Successful apply-ball result: the updated documents plus the snapshots
/// the admin UI renders.
#[derive(Debug, Clone, Serialize)]
pub struct ApplyBallResponse {
    pub innings: Innings,
    /// Present only when the ball changed match-level state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_update: Option<Match>,
    pub bowler: PlayerStatus,
    pub striker: PlayerStatus,
    pub non_striker: PlayerStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fielder: Option<PlayerStatus>,
    pub commentary: CommentaryEntry,
}

/// Start the next innings of a match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartInningsRequest {
    pub match_id: Uuid,
    /// Ordered batting lineup; the first two entries open.
    pub lineup: Vec<Uuid>,
}

impl StartInningsRequest {
    pub fn validate(&self) -> Result<()> {
        if self.lineup.len() < 2 {
            return Err(EngineError::validation("a batting lineup needs at least two players"));
        }
        let mut seen = std::collections::HashSet::new();
        for player in &self.lineup {
            if !seen.insert(player) {
                return Err(EngineError::validation(format!(
                    "duplicate player {} in batting lineup",
                    player
                )));
            }
        }
        Ok(())
    }
}
