//! Match document: teams, toss, status and final result.
//!
//! The scoring engine mutates a match only through `status`, `target_runs`,
//! `winner` and `end_time`; everything else is owned by the tournament
//! registry.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    Upcoming,
    InProgress,
    Completed,
    Cancelled,
    Abandoned,
}

/// What the toss winner elected to do first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TossDecision {
    Bat,
    Bowl,
}

/// Toss result. The winner is always a team identity, never a flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toss {
    pub winner: Uuid,
    pub decision: TossDecision,
}

/// Outcome of a decided match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchWinner {
    Team(Uuid),
    Tie,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Match {
    pub id: Uuid,
    pub tournament_id: Uuid,
    pub team_a: Uuid,
    pub team_b: Uuid,
    /// Overs available to each innings.
    pub overs_limit: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub toss: Option<Toss>,
    pub status: MatchStatus,
    /// Runs the second innings chases; set when innings 1 completes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_runs: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner: Option<MatchWinner>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
}

impl Match {
    pub fn new(tournament_id: Uuid, team_a: Uuid, team_b: Uuid, overs_limit: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            tournament_id,
            team_a,
            team_b,
            overs_limit,
            toss: None,
            status: MatchStatus::Upcoming,
            target_runs: None,
            winner: None,
            end_time: None,
        }
    }

    pub fn has_team(&self, team: Uuid) -> bool {
        self.team_a == team || self.team_b == team
    }

    /// The other side of a pairing, if `team` plays in this match at all.
    pub fn opponent_of(&self, team: Uuid) -> Option<Uuid> {
        if team == self.team_a {
            Some(self.team_b)
        } else if team == self.team_b {
            Some(self.team_a)
        } else {
            None
        }
    }

    pub fn is_decided(&self) -> bool {
        matches!(
            self.status,
            MatchStatus::Completed | MatchStatus::Cancelled | MatchStatus::Abandoned
        )
    }
}
