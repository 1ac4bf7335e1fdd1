//! Strike rotation for non-wicket deliveries.
//!
//! Two triggers, both evaluated only on legal deliveries:
//! odd batting runs, and the over boundary. When both fire on the same ball
//! they cancel; the net effect is the XOR of the two.

use crate::models::{BatsmenState, BALLS_PER_OVER};

/// Rotate strike after a legal, non-wicket delivery has been accumulated.
///
/// `balls_after` is the innings ball count including this delivery.
pub fn rotate(
    batsmen: &mut BatsmenState,
    batting_runs: u32,
    counted_ball: bool,
    balls_after: u32,
) {
    if !counted_ball {
        return;
    }

    let odd_runs = batting_runs % 2 == 1;
    let over_end = balls_after % BALLS_PER_OVER == 0;

    if odd_runs != over_end {
        batsmen.swap_strike();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn opening() -> (BatsmenState, Uuid, Uuid) {
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        (BatsmenState::opening(a, b), a, b)
    }

    #[test]
    fn test_even_runs_mid_over_keeps_strike() {
        let (mut batsmen, a, _) = opening();
        rotate(&mut batsmen, 2, true, 3);
        assert_eq!(batsmen.striker(), a);
    }

    #[test]
    fn test_odd_runs_mid_over_swaps() {
        let (mut batsmen, _, b) = opening();
        rotate(&mut batsmen, 1, true, 3);
        assert_eq!(batsmen.striker(), b);
    }

    #[test]
    fn test_even_runs_at_over_end_swaps() {
        let (mut batsmen, _, b) = opening();
        rotate(&mut batsmen, 0, true, 6);
        assert_eq!(batsmen.striker(), b);
    }

    #[test]
    fn test_odd_runs_at_over_end_cancels() {
        let (mut batsmen, a, _) = opening();
        rotate(&mut batsmen, 1, true, 6);
        assert_eq!(batsmen.striker(), a);
    }

    #[test]
    fn test_illegal_delivery_never_rotates() {
        let (mut batsmen, a, _) = opening();
        // Odd extras on a wide do not move the batsmen.
        rotate(&mut batsmen, 1, false, 6);
        assert_eq!(batsmen.striker(), a);
    }
}
