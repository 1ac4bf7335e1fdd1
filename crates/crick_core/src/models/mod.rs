pub mod commentary;
pub mod innings;
pub mod match_record;
pub mod player_status;

pub use commentary::{CommentaryEntry, CommentaryLog, COMMENTARY_CAPACITY};
pub use innings::{
    ActiveBatsman, BatsmenState, BattingRole, Extras, Innings, InningsNumber, InningsStatus,
    OverSpell, ScoreAggregate, BALLS_PER_OVER, WICKETS_PER_INNINGS,
};
pub use match_record::{Match, MatchStatus, MatchWinner, Toss, TossDecision};
pub use player_status::{
    BattingStats, BowlingStats, DismissalKind, DismissalRecord, FieldingStats, PlayerStatus,
};
