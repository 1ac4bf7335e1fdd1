//! # crick_core - Live Cricket Innings Scoring Engine
//!
//! Authoritative state machine for in-progress cricket innings: ball-by-ball
//! score accumulation, strike rotation, dismissal handling, bowler figures,
//! completion detection and bounded commentary.
//!
//! ## Shape
//! - The engine itself is pure: one call folds one ball outcome into the
//!   loaded documents and returns everything to persist.
//! - Persistence is a trait (`ScoreStore`); a version-checked in-memory
//!   implementation ships for embedded use and tests.
//! - Broadcast is fire-and-forget and runs only after the commit.

pub mod api;
pub mod broadcast;
pub mod engine;
pub mod error;
pub mod models;
pub mod service;
pub mod store;

// Re-export the public surface
pub use api::{ApplyBallRequest, ApplyBallResponse, StartInningsRequest};
pub use broadcast::{
    BroadcastError, Broadcaster, NoopBroadcaster, RecordingBroadcaster, ScoreEvent,
};
pub use engine::{
    BallApplication, BallContext, BowlerCreditTable, OutcomeCode, OutcomeEffect, ScoringEngine,
};
pub use error::{EngineError, Result};
pub use models::{
    BattingRole, CommentaryEntry, CommentaryLog, DismissalKind, Extras, Innings, InningsNumber,
    InningsStatus, Match, MatchStatus, MatchWinner, PlayerStatus, ScoreAggregate, Toss,
    TossDecision,
};
pub use service::{RosterDirectory, ScoringService, TeamDirectory};
pub use store::{BallTransaction, MemoryStore, ScoreStore};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
