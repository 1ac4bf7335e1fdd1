//! Dismissal handling: validate a wicket event, retire the striker, credit
//! the fielder, seat the incoming batsman.
//!
//! Whether a dismissal also counts toward the bowler's wickets is decided by
//! an explicit credit table, not hard-coded per call site.

use std::collections::HashMap;
use std::str::FromStr;

use uuid::Uuid;

use crate::error::{EngineError, Result};
use crate::models::{
    BattingRole, DismissalKind, DismissalRecord, Innings, WICKETS_PER_INNINGS,
};

use super::LedgerSet;

/// Which dismissal kinds count as a bowler's wicket.
///
/// Defaults follow the laws: run-outs and the catch-all `other` are not
/// bowler wickets. The table is plain data so a deployment can override any
/// entry.
#[derive(Debug, Clone)]
pub struct BowlerCreditTable {
    credited: HashMap<DismissalKind, bool>,
}

impl Default for BowlerCreditTable {
    fn default() -> Self {
        let mut credited = HashMap::new();
        credited.insert(DismissalKind::Bowled, true);
        credited.insert(DismissalKind::Caught, true);
        credited.insert(DismissalKind::Lbw, true);
        credited.insert(DismissalKind::Stumped, true);
        credited.insert(DismissalKind::HitWicket, true);
        credited.insert(DismissalKind::RunOut, false);
        credited.insert(DismissalKind::Other, false);
        Self { credited }
    }
}

impl BowlerCreditTable {
    pub fn credits(&self, kind: DismissalKind) -> bool {
        self.credited.get(&kind).copied().unwrap_or(false)
    }

    /// Override one entry, builder style.
    pub fn with_credit(mut self, kind: DismissalKind, credited: bool) -> Self {
        self.credited.insert(kind, credited);
        self
    }
}

/// A wicket event after wire-level validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedDismissal {
    pub kind: DismissalKind,
    pub next_batsman: Uuid,
    pub next_role: BattingRole,
}

/// Validate the dismissal parameters of an apply-ball request.
///
/// Runs before any mutation: a failure here must leave every document
/// untouched.
pub fn parse(
    kind: Option<&str>,
    next_batsman: Option<Uuid>,
    next_role: Option<&str>,
    fielder: Option<Uuid>,
) -> Result<ParsedDismissal> {
    let kind_str = kind
        .ok_or_else(|| EngineError::validation("a wicket outcome requires dismissal_type"))?;
    let kind = DismissalKind::from_str(kind_str)
        .map_err(|_| EngineError::InvalidDismissalType(kind_str.to_string()))?;

    let next_batsman = next_batsman.ok_or(EngineError::NextBatsmanRequired)?;

    let next_role = match next_role {
        Some("striker") => BattingRole::Striker,
        Some("non_striker") => BattingRole::NonStriker,
        Some(other) => {
            return Err(EngineError::validation(format!(
                "next_batsman_role must be striker or non_striker, got '{}'",
                other
            )))
        }
        None => {
            return Err(EngineError::validation(
                "a wicket outcome requires next_batsman_role",
            ))
        }
    };

    if kind.takes_fielder() && fielder.is_none() {
        return Err(EngineError::FielderCreditMismatch { kind: kind.as_str().to_string() });
    }
    if !kind.takes_fielder() && fielder.is_some() {
        return Err(EngineError::FielderCreditMismatch { kind: kind.as_str().to_string() });
    }

    Ok(ParsedDismissal { kind, next_batsman, next_role })
}

/// Apply a validated dismissal: wicket count, retiring striker's record,
/// fielder credit, replacement seating. Returns the dismissed player.
pub fn apply(
    innings: &mut Innings,
    ledgers: &mut LedgerSet,
    dismissal: &ParsedDismissal,
    bowler: Uuid,
    fielder: Option<Uuid>,
) -> Result<Uuid> {
    if innings.score.wickets >= WICKETS_PER_INNINGS {
        return Err(EngineError::InningsAlreadyCompleted(innings.id));
    }

    let incoming = dismissal.next_batsman;
    if !innings.lineup.contains(&incoming) {
        return Err(EngineError::validation(format!(
            "next batsman {} is not in the batting lineup",
            incoming
        )));
    }
    if innings.batsmen.contains(incoming) {
        return Err(EngineError::validation(format!(
            "next batsman {} is already at the crease",
            incoming
        )));
    }
    if ledgers.get(incoming).is_some_and(|status| status.is_out()) {
        return Err(EngineError::validation(format!(
            "next batsman {} was already dismissed",
            incoming
        )));
    }

    innings.score.wickets += 1;

    let dismissed = innings.batsmen.admit_replacement(incoming, dismissal.next_role);

    let record = ledgers.get_or_create(dismissed);
    record.batting.role = Some(BattingRole::Out);
    record.batting.out =
        Some(DismissalRecord { kind: dismissal.kind, bowler: Some(bowler), fielder });

    if let Some(fielder_id) = fielder {
        let fielder_record = ledgers.get_or_create(fielder_id);
        match dismissal.kind {
            DismissalKind::Caught => fielder_record.fielding.catches += 1,
            DismissalKind::Stumped => fielder_record.fielding.stumpings += 1,
            _ => {}
        }
    }

    Ok(dismissed)
}

/// Commentary fragment for a dismissal kind.
pub fn describe(kind: DismissalKind) -> &'static str {
    match kind {
        DismissalKind::Caught => "caught",
        DismissalKind::Bowled => "bowled",
        DismissalKind::RunOut => "run out",
        DismissalKind::Stumped => "stumped",
        DismissalKind::Lbw => "lbw",
        DismissalKind::HitWicket => "hit wicket",
        DismissalKind::Other => "out",
    }
}
