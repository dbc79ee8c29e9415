//! Stub ports and session builders shared by the unit tests.

use chess_core::{Color, Position};
use rand::rngs::mock::StepRng;

use crate::*;

pub struct FixedPolarity(pub f64);

impl SentimentScorer for FixedPolarity {
    fn polarity(&self, _text: &str) -> f64 {
        self.0
    }
}

pub struct FixedEval {
    pub score: i32,
    pub best: Option<&'static str>,
}

impl EvaluationService for FixedEval {
    fn evaluate(&self, _fen: &str) -> Result<i32, ServiceError> {
        Ok(self.score)
    }

    fn best_move(&self, _fen: &str) -> Result<String, ServiceError> {
        self.best.map(str::to_string).ok_or(ServiceError::Empty)
    }

    fn name(&self) -> &str {
        "fixed"
    }
}

pub struct Scripted(pub &'static str);

impl DialogueService for Scripted {
    fn say(&self, _system: &str, _user: &str) -> Result<String, ServiceError> {
        Ok(self.0.to_string())
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

/// Every roll is 0, so seeded profiles sit at the bottom of their ranges:
/// loyalty, motivation and morale 60, trust 50, empathy 40.
pub fn zero_rng_session() -> Session {
    Session::with_rng(&Config::default(), Box::new(StepRng::new(0, 0))).unwrap()
}

pub fn session_at(fen: &str) -> Session {
    let mut session = zero_rng_session();
    session.start_from(Position::from_fen(fen).unwrap());
    session
}

pub fn set_side(session: &mut Session, side: Color, attr: Attribute, value: f64) {
    for p in session.profiles_mut().side_mut(side) {
        p.set(attr, value);
    }
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
