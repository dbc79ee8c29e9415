//! Interfaces to the collaborators the morale core relies on, plus the
//! offline implementations used when no network adapter is plugged in.

use crate::error::ServiceError;

/// Scores the emotional tone of commander text.
pub trait SentimentScorer {
    /// Polarity in [-1, 1]; negative is hostile, positive is encouraging.
    fn polarity(&self, text: &str) -> f64;
}

/// Position evaluation keyed by FEN. Scores are in centipawns, White-relative.
pub trait EvaluationService {
    fn evaluate(&self, fen: &str) -> Result<i32, ServiceError>;

    /// Best continuation for the side to move, in UCI notation.
    fn best_move(&self, fen: &str) -> Result<String, ServiceError>;

    fn name(&self) -> &str;
}

/// Produces a short in-character line for a piece.
pub trait DialogueService {
    fn say(&self, system: &str, user: &str) -> Result<String, ServiceError>;

    fn name(&self) -> &str;
}

/// Evaluation service that is never reachable.
#[derive(Debug, Clone, Copy, Default)]
pub struct Offline;

impl EvaluationService for Offline {
    fn evaluate(&self, _fen: &str) -> Result<i32, ServiceError> {
        Err(ServiceError::Offline)
    }

    fn best_move(&self, _fen: &str) -> Result<String, ServiceError> {
        Err(ServiceError::Offline)
    }

    fn name(&self) -> &str {
        "offline"
    }
}

/// Dialogue service that never answers, so canned lines are used.
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl DialogueService for Silent {
    fn say(&self, _system: &str, _user: &str) -> Result<String, ServiceError> {
        Err(ServiceError::Offline)
    }

    fn name(&self) -> &str {
        "silent"
    }
}
