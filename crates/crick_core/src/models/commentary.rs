//! Bounded ball-by-ball commentary.
//!
//! The log is a fixed-capacity ring buffer: the newest entry always lands,
//! the oldest entry is evicted once the cap is hit. Eviction, not rejection.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum entries retained per innings.
pub const COMMENTARY_CAPACITY: usize = 20;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentaryEntry {
    pub over: u32,
    /// Ball within the over, 1..=6. A delivery that does not count toward
    /// the over (wide, no-ball) reports the upcoming ball slot.
    pub ball: u32,
    pub description: String,
    pub timestamp: DateTime<Utc>,
}

impl CommentaryEntry {
    /// Build an entry from the post-update legal ball count.
    ///
    /// 12 balls -> over 2, ball 6 (last ball of the over); 13 balls ->
    /// over 3, ball 1; 0 balls -> over 1, ball 0 (nothing legal bowled yet).
    pub fn at_ball(balls: u32, description: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        let (over, ball) = Self::position_for(balls);
        Self { over, ball, description: description.into(), timestamp }
    }

    fn position_for(balls: u32) -> (u32, u32) {
        if balls == 0 {
            return (1, 0);
        }
        let rem = balls % 6;
        if rem == 0 {
            (balls / 6, 6)
        } else {
            (balls / 6 + 1, rem)
        }
    }
}

/// Append-only ring buffer of commentary entries, capped at
/// [`COMMENTARY_CAPACITY`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommentaryLog {
    entries: VecDeque<CommentaryEntry>,
}

impl CommentaryLog {
    pub fn new() -> Self {
        Self { entries: VecDeque::with_capacity(COMMENTARY_CAPACITY) }
    }

    pub fn push(&mut self, entry: CommentaryEntry) {
        if self.entries.len() == COMMENTARY_CAPACITY {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn latest(&self) -> Option<&CommentaryEntry> {
        self.entries.back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CommentaryEntry> {
        self.entries.iter()
    }
}
