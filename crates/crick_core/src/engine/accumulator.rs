//! Score accumulator: folds one resolved outcome into the innings total.
//!
//! Infallible given a resolved outcome. Wicket counting is the dismissal
//! handler's job; this module only moves runs, extras and balls.

use crate::models::ScoreAggregate;

use super::outcome::{OutcomeCode, OutcomeEffect};

pub fn accumulate(score: &mut ScoreAggregate, code: OutcomeCode, effect: &OutcomeEffect) {
    score.runs += effect.runs + effect.extras;
    score.extras.total += effect.extras;

    // Named buckets only for cataloged extra producers. A custom outcome's
    // extras raise the total without touching a bucket.
    match code {
        OutcomeCode::Wide => score.extras.wides += effect.extras,
        OutcomeCode::NoBall => score.extras.no_balls += effect.extras,
        OutcomeCode::Bye => score.extras.byes += effect.extras,
        OutcomeCode::LegBye => score.extras.leg_byes += effect.extras,
        OutcomeCode::Penalty => score.extras.penalty += effect.extras,
        _ => {}
    }

    if effect.counts_as_ball {
        score.balls += 1;
        score.overs = ScoreAggregate::overs_display(score.balls);
    }
}
