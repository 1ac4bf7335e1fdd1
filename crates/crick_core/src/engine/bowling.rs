//! Bowler ledger: per-delivery accumulation of a bowler's figures.
//!
//! Byes and leg byes are not charged to the bowler; wides and no-balls are.
//! Maiden detection rides on the innings' `OverSpell` so it survives a
//! mid-over bowler change (which forfeits the maiden).

use uuid::Uuid;

use crate::models::{Innings, OverSpell, BALLS_PER_OVER};

use super::outcome::{OutcomeCode, OutcomeEffect};
use super::LedgerSet;

/// Runs charged against the bowler for this delivery.
pub fn runs_conceded(code: OutcomeCode, effect: &OutcomeEffect) -> u32 {
    let charged_extras = match code {
        OutcomeCode::Wide | OutcomeCode::NoBall => effect.extras,
        _ => 0,
    };
    effect.runs + charged_extras
}

/// Fold one delivery into the acting bowler's figures and the innings'
/// over bookkeeping. The bowler may differ from the previous delivery's.
pub fn update(
    innings: &mut Innings,
    ledgers: &mut LedgerSet,
    bowler: Uuid,
    code: OutcomeCode,
    effect: &OutcomeEffect,
    wicket_credited: bool,
) {
    innings.current_bowler = Some(bowler);

    let conceded = runs_conceded(code, effect);

    let spell = &mut innings.over_spell;
    if spell.balls == 0 && spell.bowler.is_none() {
        spell.bowler = Some(bowler);
    } else if spell.bowler != Some(bowler) {
        spell.split = true;
    }
    spell.runs_conceded += conceded;

    let stats = &mut ledgers.get_or_create(bowler).bowling;
    stats.runs_conceded += conceded;
    match code {
        OutcomeCode::Wide => stats.wides += effect.extras,
        OutcomeCode::NoBall => stats.no_balls += effect.extras,
        _ => {}
    }
    if wicket_credited {
        stats.wickets += 1;
    }

    if effect.counts_as_ball {
        stats.balls_bowled += 1;
        stats.overs = f64::from(stats.balls_bowled) / f64::from(BALLS_PER_OVER);

        let spell = &mut innings.over_spell;
        spell.balls += 1;
        if u32::from(spell.balls) == BALLS_PER_OVER {
            if spell.runs_conceded == 0 && !spell.split {
                if let Some(credited) = spell.bowler {
                    ledgers.get_or_create(credited).bowling.maidens += 1;
                }
            }
            innings.over_spell = OverSpell::default();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::outcome::resolve;
    use crate::models::InningsNumber;

    fn innings() -> Innings {
        let lineup: Vec<Uuid> = (0..4).map(|_| Uuid::new_v4()).collect();
        Innings::open(Uuid::new_v4(), InningsNumber::One, Uuid::new_v4(), Uuid::new_v4(), lineup)
    }

    fn ledgers_for(innings: &Innings) -> LedgerSet {
        LedgerSet::new(innings.match_id, innings.number, Vec::new())
    }

    fn bowl(
        innings: &mut Innings,
        ledgers: &mut LedgerSet,
        bowler: Uuid,
        code: &str,
        runs: Option<u32>,
    ) {
        let resolved = resolve(code, runs, None).unwrap();
        update(innings, ledgers, bowler, resolved.code, &resolved.effect, false);
    }

    #[test]
    fn test_byes_are_not_charged_to_the_bowler() {
        let resolved = resolve("bye", Some(4), None).unwrap();
        assert_eq!(runs_conceded(resolved.code, &resolved.effect), 0);

        let resolved = resolve("leg_bye", Some(2), None).unwrap();
        assert_eq!(runs_conceded(resolved.code, &resolved.effect), 0);
    }

    #[test]
    fn test_wides_and_noballs_are_charged() {
        let resolved = resolve("wide", None, None).unwrap();
        assert_eq!(runs_conceded(resolved.code, &resolved.effect), 1);

        let resolved = resolve("no_ball", None, None).unwrap();
        assert_eq!(runs_conceded(resolved.code, &resolved.effect), 1);
    }

    #[test]
    fn test_figures_accumulate() {
        let mut innings = innings();
        let mut ledgers = ledgers_for(&innings);
        let bowler = Uuid::new_v4();

        bowl(&mut innings, &mut ledgers, bowler, "run", Some(2));
        bowl(&mut innings, &mut ledgers, bowler, "wide", None);
        bowl(&mut innings, &mut ledgers, bowler, "four", None);

        let stats = &ledgers.get(bowler).unwrap().bowling;
        assert_eq!(stats.runs_conceded, 7);
        assert_eq!(stats.balls_bowled, 2);
        assert_eq!(stats.wides, 1);
        assert_eq!(innings.current_bowler, Some(bowler));
    }

    #[test]
    fn test_bowler_overs_advance_by_sixths() {
        let mut innings = innings();
        let mut ledgers = ledgers_for(&innings);
        let bowler = Uuid::new_v4();

        for _ in 0..9 {
            bowl(&mut innings, &mut ledgers, bowler, "run", Some(2));
        }

        let stats = &ledgers.get(bowler).unwrap().bowling;
        assert_eq!(stats.balls_bowled, 9);
        assert!((stats.overs - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_maiden_credited_after_six_scoreless_balls() {
        let mut innings = innings();
        let mut ledgers = ledgers_for(&innings);
        let bowler = Uuid::new_v4();

        for _ in 0..6 {
            bowl_dot(&mut innings, &mut ledgers, bowler);
        }

        assert_eq!(ledgers.get(bowler).unwrap().bowling.maidens, 1);
        assert_eq!(innings.over_spell, OverSpell::default());
    }

    fn bowl_dot(innings: &mut Innings, ledgers: &mut LedgerSet, bowler: Uuid) {
        // A dot ball: legal delivery, nothing scored.
        let effect = OutcomeEffect {
            runs: 0,
            extras: 0,
            counts_as_ball: true,
            is_wicket: false,
            description: None,
        };
        update(innings, ledgers, bowler, OutcomeCode::Custom, &effect, false);
    }

    #[test]
    fn test_wide_runs_spoil_the_maiden() {
        let mut innings = innings();
        let mut ledgers = ledgers_for(&innings);
        let bowler = Uuid::new_v4();

        bowl(&mut innings, &mut ledgers, bowler, "wide", None);
        for _ in 0..6 {
            bowl_dot(&mut innings, &mut ledgers, bowler);
        }

        assert_eq!(ledgers.get(bowler).unwrap().bowling.maidens, 0);
    }

    #[test]
    fn test_byes_do_not_spoil_the_maiden() {
        let mut innings = innings();
        let mut ledgers = ledgers_for(&innings);
        let bowler = Uuid::new_v4();

        bowl(&mut innings, &mut ledgers, bowler, "bye", Some(2));
        for _ in 0..5 {
            bowl_dot(&mut innings, &mut ledgers, bowler);
        }

        assert_eq!(ledgers.get(bowler).unwrap().bowling.maidens, 1);
    }

    #[test]
    fn test_split_over_forfeits_the_maiden() {
        let mut innings = innings();
        let mut ledgers = ledgers_for(&innings);
        let first = Uuid::new_v4();
        let relief = Uuid::new_v4();

        for _ in 0..3 {
            bowl_dot(&mut innings, &mut ledgers, first);
        }
        for _ in 0..3 {
            bowl_dot(&mut innings, &mut ledgers, relief);
        }

        assert_eq!(ledgers.get(first).unwrap().bowling.maidens, 0);
        assert_eq!(ledgers.get(relief).unwrap().bowling.maidens, 0);
        assert_eq!(innings.current_bowler, Some(relief));
        // Spell reset for the next over.
        assert_eq!(innings.over_spell, OverSpell::default());
    }

    #[test]
    fn test_credited_wicket_increments_bowler_wickets() {
        let mut innings = innings();
        let mut ledgers = ledgers_for(&innings);
        let bowler = Uuid::new_v4();

        let resolved = resolve("wicket", None, None).unwrap();
        update(&mut innings, &mut ledgers, bowler, resolved.code, &resolved.effect, true);
        assert_eq!(ledgers.get(bowler).unwrap().bowling.wickets, 1);

        let resolved = resolve("wicket", None, None).unwrap();
        update(&mut innings, &mut ledgers, bowler, resolved.code, &resolved.effect, false);
        assert_eq!(ledgers.get(bowler).unwrap().bowling.wickets, 1);
    }
}
