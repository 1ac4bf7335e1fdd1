//! Completion evaluator: runs after every legal delivery and decides whether
//! the innings (and with it, possibly the match) is over.
//!
//! Overs exhausted and all-out can coincide on the same ball; completion is
//! latched once so a tie of triggers produces a single transition and a
//! single commentary line.

use chrono::{DateTime, Utc};

use crate::models::{
    Innings, InningsNumber, InningsStatus, Match, MatchStatus, MatchWinner, BALLS_PER_OVER,
    WICKETS_PER_INNINGS,
};

/// Evaluate the innings against its limits. On completion the innings is
/// marked, match-level fields are written, and a commentary line describing
/// the transition is returned. The caller persists both documents in one
/// transaction.
pub fn evaluate(
    match_doc: &mut Match,
    innings: &mut Innings,
    now: DateTime<Utc>,
) -> Option<String> {
    if innings.is_completed() {
        return None;
    }

    let overs_exhausted = innings.score.balls >= match_doc.overs_limit * BALLS_PER_OVER;
    let all_out = innings.score.wickets >= WICKETS_PER_INNINGS;
    let target_reached = innings.number.is_second()
        && match_doc.target_runs.is_some_and(|target| innings.score.runs >= target);

    if !(overs_exhausted || all_out || target_reached) {
        return None;
    }

    innings.status = InningsStatus::Completed;

    match innings.number {
        InningsNumber::One => {
            let target = innings.score.runs + 1;
            match_doc.target_runs = Some(target);
            Some(format!(
                "End of innings: {}/{} in {} overs. Target is {}.",
                innings.score.runs, innings.score.wickets, innings.score.overs, target
            ))
        }
        InningsNumber::Two => {
            let target = match_doc
                .target_runs
                .expect("second innings cannot complete without a target");
            let winner = if innings.score.runs > target {
                MatchWinner::Team(innings.batting_team)
            } else if innings.score.runs < target {
                MatchWinner::Team(innings.bowling_team)
            } else {
                MatchWinner::Tie
            };
            match_doc.winner = Some(winner);
            match_doc.status = MatchStatus::Completed;
            match_doc.end_time = Some(now);

            Some(match winner {
                MatchWinner::Tie => "Match tied.".to_string(),
                MatchWinner::Team(team) if team == innings.batting_team => format!(
                    "Match over: chasing side wins with {}/{} on the board.",
                    innings.score.runs, innings.score.wickets
                ),
                MatchWinner::Team(_) => format!(
                    "Match over: defending side holds the chase to {}/{}.",
                    innings.score.runs, innings.score.wickets
                ),
            })
        }
    }
}
