//! In-character lines for pieces and the army, via the dialogue port.

use rand::seq::SliceRandom;
use rand::RngCore;
use tracing::{debug, warn};

use crate::error::ServiceError;
use crate::ports::DialogueService;
use crate::profile::Snapshot;

const CANNED_LINES: &[&str] = &[
    "They nod silently, unsure but willing.",
    "A faint spark glimmers in their eyes.",
    "Your words stir something deep within.",
    "No response, only quiet determination.",
    "The piece stands still, reflecting on your command.",
];

/// Who is speaking: a piece on a square, or the whole army ("ranks").
#[derive(Debug, Clone)]
pub struct Speaker {
    pub name: String,
    pub place: String,
    pub stats: Snapshot,
}

impl Speaker {
    pub fn new(name: impl Into<String>, place: impl Into<String>, stats: Snapshot) -> Self {
        Self {
            name: name.into(),
            place: place.into(),
            stats,
        }
    }
}

fn describe(value: f64, words: [&'static str; 4]) -> &'static str {
    if value < 35.0 {
        words[0]
    } else if value < 55.0 {
        words[1]
    } else if value < 80.0 {
        words[2]
    } else {
        words[3]
    }
}

/// System and user prompt for `speaker` reacting to `line`.
pub fn piece_prompt(speaker: &Speaker, line: &str) -> (String, String) {
    let s = &speaker.stats;
    let system = format!(
        "You are the {} stationed on {}, a sentient chess piece on a battlefield where \
         leadership and emotion matter. Your current state: morale {}, trust {}, loyalty {}, \
         motivation {}, empathy {}. Speak briefly and with emotion (under 20 words). \
         No emojis, no repetition.",
        speaker.name,
        speaker.place.to_uppercase(),
        describe(s.morale, ["crushed", "wavering", "steady", "burning"]),
        describe(s.trust, ["doubtful", "cautious", "confident", "devoted"]),
        describe(s.loyalty, ["disloyal", "self-interested", "faithful", "unwavering"]),
        describe(s.motivation, ["drained", "weary", "focused", "driven"]),
        describe(s.empathy, ["cold", "reserved", "understanding", "deeply compassionate"]),
    );
    let user = format!("Commander says: \"{line}\"");
    (system, user)
}

/// Wraps a dialogue service and falls back to canned lines on any failure.
pub struct Voice {
    service: Box<dyn DialogueService>,
}

impl Voice {
    pub fn new(service: Box<dyn DialogueService>) -> Self {
        Self { service }
    }

    pub fn service_name(&self) -> &str {
        self.service.name()
    }

    pub fn line(&self, speaker: &Speaker, prompt: &str, rng: &mut dyn RngCore) -> String {
        let (system, user) = piece_prompt(speaker, prompt);
        match self.service.say(&system, &user) {
            Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
            Ok(_) => {
                debug!(service = self.service.name(), "empty dialogue reply");
                canned(rng)
            }
            Err(ServiceError::Offline) => canned(rng),
            Err(err) => {
                warn!(service = self.service.name(), %err, "dialogue unavailable, using canned line");
                canned(rng)
            }
        }
    }
}

fn canned(rng: &mut dyn RngCore) -> String {
    CANNED_LINES
        .choose(rng)
        .copied()
        .unwrap_or(CANNED_LINES[0])
        .to_string()
}
