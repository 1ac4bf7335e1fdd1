//! Per-(player, match, innings) statistics document.
//!
//! Created lazily the first time a player bats, bowls or fields in an
//! innings. The identity triple is immutable once created; the stat blocks
//! accrue monotonically for the rest of the innings.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::innings::{BattingRole, InningsNumber};

/// Enumerated ways a batsman can be dismissed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
#[serde(rename_all = "snake_case")]
pub enum DismissalKind {
    Caught,
    Bowled,
    RunOut,
    Stumped,
    Lbw,
    HitWicket,
    Other,
}

impl DismissalKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DismissalKind::Caught => "caught",
            DismissalKind::Bowled => "bowled",
            DismissalKind::RunOut => "run_out",
            DismissalKind::Stumped => "stumped",
            DismissalKind::Lbw => "lbw",
            DismissalKind::HitWicket => "hit_wicket",
            DismissalKind::Other => "other",
        }
    }

    /// Dismissals that carry a fielder credit (catch / stumping).
    pub fn takes_fielder(&self) -> bool {
        matches!(self, DismissalKind::Caught | DismissalKind::Stumped)
    }
}

impl FromStr for DismissalKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "caught" => Ok(DismissalKind::Caught),
            "bowled" => Ok(DismissalKind::Bowled),
            "run_out" => Ok(DismissalKind::RunOut),
            "stumped" => Ok(DismissalKind::Stumped),
            "lbw" => Ok(DismissalKind::Lbw),
            "hit_wicket" => Ok(DismissalKind::HitWicket),
            "other" => Ok(DismissalKind::Other),
            _ => Err(()),
        }
    }
}

/// How a batsman went out, and who was involved.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DismissalRecord {
    pub kind: DismissalKind,
    /// Bowler at the crease when the wicket fell. Recorded for every
    /// dismissal; whether it counts toward the bowler's wickets is a
    /// separate credit decision.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bowler: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fielder: Option<Uuid>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BattingStats {
    pub runs: u32,
    pub balls_faced: u32,
    pub fours: u32,
    pub sixes: u32,
    /// Snapshot of the role held in the innings' active pair, written in the
    /// same transaction as the innings. The innings document is the source
    /// of truth while a ball is being applied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<BattingRole>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub out: Option<DismissalRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BowlingStats {
    pub runs_conceded: u32,
    pub balls_bowled: u32,
    /// Cumulative overs, one sixth per legal delivery.
    pub overs: f64,
    pub maidens: u32,
    pub wickets: u32,
    pub wides: u32,
    pub no_balls: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldingStats {
    pub catches: u32,
    pub stumpings: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerStatus {
    pub player_id: Uuid,
    pub match_id: Uuid,
    pub innings: InningsNumber,
    pub batting: BattingStats,
    pub bowling: BowlingStats,
    pub fielding: FieldingStats,
}

impl PlayerStatus {
    pub fn new(player_id: Uuid, match_id: Uuid, innings: InningsNumber) -> Self {
        Self {
            player_id,
            match_id,
            innings,
            batting: BattingStats::default(),
            bowling: BowlingStats::default(),
            fielding: FieldingStats::default(),
        }
    }

    pub fn is_out(&self) -> bool {
        self.batting.out.is_some()
    }
}
