//! Network-backed implementations of the `charisma` service ports.
//!
//! [`LichessCloud`] answers evaluation and best-move queries from the
//! Lichess cloud-eval endpoint, and [`Ollama`] asks a local Ollama server
//! for piece dialogue. Both use a blocking client with a bounded timeout
//! and report every failure as a [`charisma::ServiceError`]; the session
//! decides what to fall back to.

pub mod lichess;
pub mod ollama;

pub use lichess::LichessCloud;
pub use ollama::Ollama;

use std::time::Duration;

use charisma::{DialogueService, EvaluationService, ServiceError, Services};

/// Evaluation and dialogue adapters for `services`, or `None` when the
/// network is disabled or a client could not be built.
pub fn connect(
    services: &Services,
) -> Option<(Box<dyn EvaluationService>, Box<dyn DialogueService>)> {
    if !services.enabled {
        return None;
    }
    let evaluation = LichessCloud::new(
        &services.evaluation_url,
        Duration::from_millis(services.evaluation_timeout_ms),
    );
    let dialogue = Ollama::new(
        &services.dialogue_url,
        &services.dialogue_model,
        services.dialogue_max_tokens,
        Duration::from_millis(services.dialogue_timeout_ms),
    );
    match (evaluation, dialogue) {
        (Ok(evaluation), Ok(dialogue)) => Some((Box::new(evaluation), Box::new(dialogue))),
        (Err(err), _) | (_, Err(err)) => {
            tracing::warn!(%err, "could not build HTTP clients, staying offline");
            None
        }
    }
}

pub(crate) fn transport(err: reqwest::Error) -> ServiceError {
    match err.status() {
        Some(status) => ServiceError::Status(status.as_u16()),
        None => ServiceError::Transport(err.to_string()),
    }
}

#[cfg(test)]
mod lichess_tests;
#[cfg(test)]
mod ollama_tests;
