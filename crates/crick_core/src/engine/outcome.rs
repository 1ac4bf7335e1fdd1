//! Outcome catalog: maps a wire outcome code to its canonical effect.
//!
//! The catalog is a static table; `custom` outcomes bypass it with a
//! caller-supplied effect. Resolution is a pure lookup with no side effects.

use std::collections::HashMap;
use std::str::FromStr;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// Canonical effect of one delivery outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutcomeEffect {
    /// Runs credited to the striker's bat.
    pub runs: u32,
    /// Extra runs credited to the batting team.
    pub extras: u32,
    /// Whether the delivery counts toward the over.
    pub counts_as_ball: bool,
    pub is_wicket: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
#[serde(rename_all = "snake_case")]
pub enum OutcomeCode {
    Run,
    Four,
    Six,
    Wide,
    NoBall,
    Bye,
    LegBye,
    Penalty,
    Wicket,
    Custom,
}

impl OutcomeCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutcomeCode::Run => "run",
            OutcomeCode::Four => "four",
            OutcomeCode::Six => "six",
            OutcomeCode::Wide => "wide",
            OutcomeCode::NoBall => "no_ball",
            OutcomeCode::Bye => "bye",
            OutcomeCode::LegBye => "leg_bye",
            OutcomeCode::Penalty => "penalty",
            OutcomeCode::Wicket => "wicket",
            OutcomeCode::Custom => "custom",
        }
    }
}

impl FromStr for OutcomeCode {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "run" => Ok(OutcomeCode::Run),
            "four" => Ok(OutcomeCode::Four),
            "six" => Ok(OutcomeCode::Six),
            "wide" => Ok(OutcomeCode::Wide),
            "no_ball" | "noball" => Ok(OutcomeCode::NoBall),
            "bye" => Ok(OutcomeCode::Bye),
            "leg_bye" => Ok(OutcomeCode::LegBye),
            "penalty" => Ok(OutcomeCode::Penalty),
            "wicket" => Ok(OutcomeCode::Wicket),
            "custom" => Ok(OutcomeCode::Custom),
            _ => Err(()),
        }
    }
}

/// Awarded when the fielding side concedes a standard penalty.
const PENALTY_RUNS: u32 = 5;

fn effect(
    runs: u32,
    extras: u32,
    counts_as_ball: bool,
    is_wicket: bool,
    description: &str,
) -> OutcomeEffect {
    OutcomeEffect {
        runs,
        extras,
        counts_as_ball,
        is_wicket,
        description: Some(description.to_string()),
    }
}

static CATALOG: Lazy<HashMap<OutcomeCode, OutcomeEffect>> = Lazy::new(|| {
    let mut table = HashMap::new();
    table.insert(OutcomeCode::Run, effect(1, 0, true, false, "run taken"));
    table.insert(OutcomeCode::Four, effect(4, 0, true, false, "FOUR!"));
    table.insert(OutcomeCode::Six, effect(6, 0, true, false, "SIX!"));
    table.insert(OutcomeCode::Wide, effect(0, 1, false, false, "wide ball"));
    table.insert(OutcomeCode::NoBall, effect(0, 1, false, false, "no ball"));
    table.insert(OutcomeCode::Bye, effect(0, 1, true, false, "byes"));
    table.insert(OutcomeCode::LegBye, effect(0, 1, true, false, "leg byes"));
    table.insert(OutcomeCode::Penalty, effect(0, PENALTY_RUNS, false, false, "penalty runs"));
    table.insert(OutcomeCode::Wicket, effect(0, 0, true, true, "WICKET!"));
    table
});

/// An outcome code paired with its resolved effect.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedOutcome {
    pub code: OutcomeCode,
    pub effect: OutcomeEffect,
}

/// Resolve a wire outcome to its effect.
///
/// `runs` scales the variable-count codes: batting runs for `run`, extra
/// runs for `bye`/`leg_bye`. `custom` requires `custom_effect`; every other
/// code must resolve through the catalog.
pub fn resolve(
    code: &str,
    runs: Option<u32>,
    custom_effect: Option<&OutcomeEffect>,
) -> Result<ResolvedOutcome> {
    let code = OutcomeCode::from_str(code)
        .map_err(|_| EngineError::InvalidOutcome(format!("unknown outcome code '{}'", code)))?;

    if code == OutcomeCode::Custom {
        let effect = custom_effect.ok_or_else(|| {
            EngineError::InvalidOutcome("custom outcome requires a supplied effect".into())
        })?;
        return Ok(ResolvedOutcome { code, effect: effect.clone() });
    }

    let mut effect = CATALOG
        .get(&code)
        .cloned()
        .ok_or_else(|| EngineError::InvalidOutcome(format!("uncataloged code '{:?}'", code)))?;

    match code {
        OutcomeCode::Run => {
            if let Some(n) = runs {
                if n == 0 {
                    return Err(EngineError::InvalidOutcome(
                        "a 'run' outcome needs at least one run".into(),
                    ));
                }
                effect.runs = n;
            }
        }
        OutcomeCode::Bye | OutcomeCode::LegBye => {
            if let Some(n) = runs {
                if n == 0 {
                    return Err(EngineError::InvalidOutcome(
                        "bye outcomes need at least one extra run".into(),
                    ));
                }
                effect.extras = n;
            }
        }
        _ => {}
    }

    Ok(ResolvedOutcome { code, effect })
}
