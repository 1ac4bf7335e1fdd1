use thiserror::Error;
use uuid::Uuid;

/// Failure taxonomy for the scoring engine.
///
/// Every variant except `TransactionConflict` is terminal for the request:
/// the call is rejected and no state is mutated. A conflict is surfaced to
/// the caller as retryable.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("invalid outcome: {0}")]
    InvalidOutcome(String),

    #[error("a dismissal requires a next batsman")]
    NextBatsmanRequired,

    #[error("invalid dismissal type: {0}")]
    InvalidDismissalType(String),

    #[error("fielder credit mismatch for dismissal type {kind}")]
    FielderCreditMismatch { kind: String },

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: Uuid },

    #[error("innings {0} is already completed")]
    InningsAlreadyCompleted(Uuid),

    #[error("concurrent write detected on innings {innings}")]
    TransactionConflict { innings: Uuid },

    #[error("store error: {0}")]
    Store(String),
}

impl EngineError {
    /// Whether the caller may retry the identical request.
    pub fn is_retryable(&self) -> bool {
        matches!(self, EngineError::TransactionConflict { .. })
    }

    pub(crate) fn not_found(entity: &'static str, id: Uuid) -> Self {
        EngineError::NotFound { entity, id }
    }

    pub(crate) fn validation(msg: impl Into<String>) -> Self {
        EngineError::Validation(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
