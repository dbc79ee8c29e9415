//! Cached access to the evaluation service.

use std::collections::HashMap;

use chess_core::Position;
use tracing::{debug, warn};

use crate::error::ServiceError;
use crate::ports::EvaluationService;

/// Per-session evaluation cache in front of an [`EvaluationService`].
/// Any failure is cached as 0 so a position is only ever asked about once.
pub struct Evaluator {
    service: Box<dyn EvaluationService>,
    cache: HashMap<String, i32>,
}

impl Evaluator {
    pub fn new(service: Box<dyn EvaluationService>) -> Self {
        Self {
            service,
            cache: HashMap::new(),
        }
    }

    pub fn service_name(&self) -> &str {
        self.service.name()
    }

    /// White-relative centipawn score of `pos`.
    pub fn evaluate(&mut self, pos: &Position) -> i32 {
        let fen = pos.to_fen();
        if let Some(&score) = self.cache.get(&fen) {
            return score;
        }
        let score = match self.service.evaluate(&fen) {
            Ok(cp) => cp,
            Err(ServiceError::Offline) => 0,
            Err(err) => {
                warn!(service = self.service.name(), %err, "evaluation unavailable, scoring 0");
                0
            }
        };
        debug!(%fen, score, "evaluated");
        self.cache.insert(fen, score);
        score
    }

    /// Suggested continuation in UCI, if the service has one.
    pub fn best_move(&self, pos: &Position) -> Option<String> {
        match self.service.best_move(&pos.to_fen()) {
            Ok(uci) => Some(uci),
            Err(ServiceError::Offline) => None,
            Err(err) => {
                warn!(service = self.service.name(), %err, "no suggested move");
                None
            }
        }
    }

    pub fn cached(&self) -> usize {
        self.cache.len()
    }
}
