use std::cell::Cell;

use super::*;
use crate::test_support::{FixedEval, Scripted};
use chess_core::Position;
use rand::rngs::mock::StepRng;

struct Counting {
    calls: Cell<usize>,
}

impl EvaluationService for Counting {
    fn evaluate(&self, _fen: &str) -> Result<i32, ServiceError> {
        self.calls.set(self.calls.get() + 1);
        Err(ServiceError::Status(404))
    }

    fn best_move(&self, _fen: &str) -> Result<String, ServiceError> {
        Err(ServiceError::Transport("connection refused".into()))
    }

    fn name(&self) -> &str {
        "counting"
    }
}

#[test]
fn test_failed_evaluations_are_cached_as_level() {
    let mut evaluator = Evaluator::new(Box::new(Counting { calls: Cell::new(0) }));
    let pos = Position::startpos();
    assert_eq!(evaluator.evaluate(&pos), 0);
    assert_eq!(evaluator.evaluate(&pos), 0);
    assert_eq!(evaluator.cached(), 1);
    assert_eq!(evaluator.best_move(&pos), None);
}

#[test]
fn test_scores_and_suggestions_pass_through() {
    let mut evaluator = Evaluator::new(Box::new(FixedEval {
        score: -35,
        best: Some("e2e4"),
    }));
    assert_eq!(evaluator.evaluate(&Position::startpos()), -35);
    assert_eq!(evaluator.best_move(&Position::startpos()).as_deref(), Some("e2e4"));
    assert_eq!(evaluator.service_name(), "fixed");
}

fn speaker(value: f64) -> Speaker {
    let stats = Snapshot {
        loyalty: value,
        motivation: value,
        morale: value,
        trust: value,
        empathy: value,
    };
    Speaker::new("knight", "f3", stats)
}

#[test]
fn test_prompt_describes_the_speaker() {
    let (system, user) = piece_prompt(&speaker(90.0), "Charge!");
    assert!(system.contains("the knight stationed on F3"));
    assert!(system.contains("morale burning, trust devoted"));
    assert_eq!(user, "Commander says: \"Charge!\"");

    let (system, _) = piece_prompt(&speaker(10.0), "Charge!");
    assert!(system.contains("morale crushed"));
    assert!(system.contains("empathy cold"));
}

#[test]
fn test_voice_falls_back_to_canned_lines() {
    let mut rng = StepRng::new(0, 0);
    let silent = Voice::new(Box::new(Silent));
    assert_eq!(
        silent.line(&speaker(50.0), "Hold.", &mut rng),
        "They nod silently, unsure but willing."
    );

    let blank = Voice::new(Box::new(Scripted("   ")));
    assert_eq!(
        blank.line(&speaker(50.0), "Hold.", &mut rng),
        "They nod silently, unsure but willing."
    );

    let scripted = Voice::new(Box::new(Scripted(" Onward! ")));
    assert_eq!(scripted.line(&speaker(50.0), "Hold.", &mut rng), "Onward!");
}
