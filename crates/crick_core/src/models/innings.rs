//! Innings document: the authoritative state of one side's batting turn.
//!
//! The two active batsmen live in a fixed two-slot arena with a tagged role
//! on each slot. There are no separate striker/non-striker pointer fields;
//! the arena is the single source of truth for who is on strike.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::commentary::CommentaryLog;

/// Legal deliveries per over.
pub const BALLS_PER_OVER: u32 = 6;

/// Wickets that end an innings.
pub const WICKETS_PER_INNINGS: u8 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InningsNumber {
    One,
    Two,
}

impl InningsNumber {
    pub fn as_u8(&self) -> u8 {
        match self {
            InningsNumber::One => 1,
            InningsNumber::Two => 2,
        }
    }

    pub fn is_second(&self) -> bool {
        matches!(self, InningsNumber::Two)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InningsStatus {
    Ongoing,
    Completed,
}

/// Role held by a batsman at the crease.
///
/// `Out` is transient: it marks a retiring striker inside dismissal
/// processing and is never a persisted role of the active pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BattingRole {
    Striker,
    NonStriker,
    Out,
}

impl BattingRole {
    fn opposite(&self) -> BattingRole {
        match self {
            BattingRole::Striker => BattingRole::NonStriker,
            BattingRole::NonStriker => BattingRole::Striker,
            BattingRole::Out => BattingRole::Out,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveBatsman {
    pub player: Uuid,
    pub role: BattingRole,
}

/// Two-slot arena of the batsmen currently at the crease.
///
/// Invariant outside of dismissal processing: exactly one slot holds
/// `Striker` and the other `NonStriker`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatsmenState {
    slots: [ActiveBatsman; 2],
}

impl BatsmenState {
    /// Seat the opening pair: first in the order takes strike.
    pub fn opening(first: Uuid, second: Uuid) -> Self {
        Self {
            slots: [
                ActiveBatsman { player: first, role: BattingRole::Striker },
                ActiveBatsman { player: second, role: BattingRole::NonStriker },
            ],
        }
    }

    fn slot_of(&self, role: BattingRole) -> usize {
        if self.slots[0].role == role {
            0
        } else {
            1
        }
    }

    pub fn striker(&self) -> Uuid {
        self.slots[self.slot_of(BattingRole::Striker)].player
    }

    pub fn non_striker(&self) -> Uuid {
        self.slots[self.slot_of(BattingRole::NonStriker)].player
    }

    pub fn contains(&self, player: Uuid) -> bool {
        self.slots.iter().any(|b| b.player == player)
    }

    /// Swap which end holds the strike.
    pub fn swap_strike(&mut self) {
        for slot in &mut self.slots {
            slot.role = slot.role.opposite();
        }
    }

    /// Retire the striker and seat `incoming` with the requested role.
    ///
    /// The surviving batsman's role is adjusted so the pair is exactly one
    /// striker and one non-striker again. Returns the dismissed player.
    pub fn admit_replacement(&mut self, incoming: Uuid, role: BattingRole) -> Uuid {
        debug_assert!(role != BattingRole::Out);

        let out_idx = self.slot_of(BattingRole::Striker);
        let dismissed = self.slots[out_idx].player;
        self.slots[out_idx].role = BattingRole::Out;

        self.slots[out_idx] = ActiveBatsman { player: incoming, role };
        let survivor = 1 - out_idx;
        self.slots[survivor].role = role.opposite();
        dismissed
    }

    pub fn roles_consistent(&self) -> bool {
        let strikers = self.slots.iter().filter(|b| b.role == BattingRole::Striker).count();
        let non_strikers =
            self.slots.iter().filter(|b| b.role == BattingRole::NonStriker).count();
        strikers == 1 && non_strikers == 1
    }
}

/// Extras breakdown. `total` always equals the sum of the named buckets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extras {
    pub wides: u32,
    pub no_balls: u32,
    pub byes: u32,
    pub leg_byes: u32,
    pub penalty: u32,
    pub total: u32,
}

impl Extras {
    pub fn bucket_sum(&self) -> u32 {
        self.wides + self.no_balls + self.byes + self.leg_byes + self.penalty
    }
}

/// Running innings total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreAggregate {
    pub runs: u32,
    pub wickets: u8,
    /// Legal deliveries bowled. Wides and no-balls never count here.
    pub balls: u32,
    /// Display encoding of `balls`: whole overs plus balls-in-over tenths
    /// (12 balls -> 2.0, 13 balls -> 2.1). Not fractional-over arithmetic.
    pub overs: f64,
    pub extras: Extras,
}

impl ScoreAggregate {
    pub fn overs_display(balls: u32) -> f64 {
        (balls / BALLS_PER_OVER) as f64 + (balls % BALLS_PER_OVER) as f64 / 10.0
    }
}

/// Per-over bookkeeping for maiden detection.
///
/// Reset at every over boundary. `split` is raised when more than one bowler
/// delivers in the same over, which forfeits the maiden.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct OverSpell {
    pub balls: u8,
    pub runs_conceded: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bowler: Option<Uuid>,
    pub split: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Innings {
    pub id: Uuid,
    pub match_id: Uuid,
    pub number: InningsNumber,
    pub batting_team: Uuid,
    pub bowling_team: Uuid,
    /// Ordered batting lineup as registered at innings start.
    pub lineup: Vec<Uuid>,
    pub batsmen: BatsmenState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_bowler: Option<Uuid>,
    pub score: ScoreAggregate,
    pub over_spell: OverSpell,
    pub commentary: CommentaryLog,
    pub status: InningsStatus,
}

impl Innings {
    /// Open a fresh innings with the first two lineup entries at the crease.
    ///
    /// Callers validate lineup membership and ordering before this point;
    /// the constructor only requires the opening pair to exist.
    pub fn open(
        match_id: Uuid,
        number: InningsNumber,
        batting_team: Uuid,
        bowling_team: Uuid,
        lineup: Vec<Uuid>,
    ) -> Self {
        debug_assert!(lineup.len() >= 2);
        let batsmen = BatsmenState::opening(lineup[0], lineup[1]);
        Self {
            id: Uuid::new_v4(),
            match_id,
            number,
            batting_team,
            bowling_team,
            lineup,
            batsmen,
            current_bowler: None,
            score: ScoreAggregate::default(),
            over_spell: OverSpell::default(),
            commentary: CommentaryLog::new(),
            status: InningsStatus::Ongoing,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == InningsStatus::Completed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair() -> (Uuid, Uuid) {
        (Uuid::new_v4(), Uuid::new_v4())
    }

    #[test]
    fn test_opening_pair_roles() {
        let (a, b) = pair();
        let batsmen = BatsmenState::opening(a, b);
        assert_eq!(batsmen.striker(), a);
        assert_eq!(batsmen.non_striker(), b);
        assert!(batsmen.roles_consistent());
    }

    #[test]
    fn test_swap_strike_toggles_and_is_involutive() {
        let (a, b) = pair();
        let mut batsmen = BatsmenState::opening(a, b);
        batsmen.swap_strike();
        assert_eq!(batsmen.striker(), b);
        batsmen.swap_strike();
        assert_eq!(batsmen.striker(), a);
        assert!(batsmen.roles_consistent());
    }

    #[test]
    fn test_replacement_as_striker_keeps_survivor_off_strike() {
        let (a, b) = pair();
        let incoming = Uuid::new_v4();
        let mut batsmen = BatsmenState::opening(a, b);

        let dismissed = batsmen.admit_replacement(incoming, BattingRole::Striker);
        assert_eq!(dismissed, a);
        assert_eq!(batsmen.striker(), incoming);
        assert_eq!(batsmen.non_striker(), b);
        assert!(batsmen.roles_consistent());
    }

    #[test]
    fn test_replacement_as_non_striker_promotes_survivor() {
        let (a, b) = pair();
        let incoming = Uuid::new_v4();
        let mut batsmen = BatsmenState::opening(a, b);

        let dismissed = batsmen.admit_replacement(incoming, BattingRole::NonStriker);
        assert_eq!(dismissed, a);
        assert_eq!(batsmen.striker(), b);
        assert_eq!(batsmen.non_striker(), incoming);
        assert!(batsmen.roles_consistent());
    }

    #[test]
    fn test_overs_display_encoding() {
        assert_eq!(ScoreAggregate::overs_display(0), 0.0);
        assert_eq!(ScoreAggregate::overs_display(5), 0.5);
        assert_eq!(ScoreAggregate::overs_display(6), 1.0);
        assert_eq!(ScoreAggregate::overs_display(12), 2.0);
        assert_eq!(ScoreAggregate::overs_display(13), 2.1);
        assert_eq!(ScoreAggregate::overs_display(59), 9.5);
    }

    #[test]
    fn test_open_innings_defaults() {
        let (a, b) = pair();
        let innings = Innings::open(
            Uuid::new_v4(),
            InningsNumber::One,
            Uuid::new_v4(),
            Uuid::new_v4(),
            vec![a, b, Uuid::new_v4()],
        );
        assert_eq!(innings.status, InningsStatus::Ongoing);
        assert_eq!(innings.score, ScoreAggregate::default());
        assert!(innings.current_bowler.is_none());
        assert_eq!(innings.batsmen.striker(), a);
        assert!(innings.commentary.is_empty());
    }
}
