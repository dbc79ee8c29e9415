//! Results of a commander turn.

use serde::Serialize;

use crate::ledger::ArmyStatus;
use crate::profile::Snapshot;

/// How a successful ordinary move was carried out.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Execution {
    Legal,
    /// Obeyed piece movement but left the king exposed.
    Defiant,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Heroics {
    LoneHero,
    Miracle,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MoveOutcome {
    Success {
        narrative: String,
        eval: i32,
        style: Execution,
    },
    HeroicSuccess {
        narrative: String,
        eval: i32,
        feat: Heroics,
    },
    Refused {
        narrative: String,
    },
    Hesitated {
        narrative: String,
    },
    MoraleBroken {
        narrative: String,
    },
    InvalidFormat {
        narrative: String,
    },
    Illegal {
        narrative: String,
    },
    Recovered {
        narrative: String,
    },
}

impl MoveOutcome {
    pub fn narrative(&self) -> &str {
        match self {
            MoveOutcome::Success { narrative, .. }
            | MoveOutcome::HeroicSuccess { narrative, .. }
            | MoveOutcome::Refused { narrative }
            | MoveOutcome::Hesitated { narrative }
            | MoveOutcome::MoraleBroken { narrative }
            | MoveOutcome::InvalidFormat { narrative }
            | MoveOutcome::Illegal { narrative }
            | MoveOutcome::Recovered { narrative } => narrative,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            MoveOutcome::Success { .. } => "success",
            MoveOutcome::HeroicSuccess { .. } => "heroic_success",
            MoveOutcome::Refused { .. } => "refused",
            MoveOutcome::Hesitated { .. } => "hesitated",
            MoveOutcome::MoraleBroken { .. } => "morale_broken",
            MoveOutcome::InvalidFormat { .. } => "invalid_format",
            MoveOutcome::Illegal { .. } => "illegal",
            MoveOutcome::Recovered { .. } => "recovered",
        }
    }

    /// True when the board changed on the commander's behalf.
    pub fn is_success(&self) -> bool {
        matches!(
            self,
            MoveOutcome::Success { .. } | MoveOutcome::HeroicSuccess { .. }
        )
    }

    pub fn eval(&self) -> Option<i32> {
        match self {
            MoveOutcome::Success { eval, .. } | MoveOutcome::HeroicSuccess { eval, .. } => {
                Some(*eval)
            }
            _ => None,
        }
    }
}

/// Answer to a `@tag stats` query.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProfileReport {
    pub name: String,
    pub square: String,
    pub belief: f64,
    pub stats: Snapshot,
}

impl std::fmt::Display for ProfileReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} on {}: {} (belief {:.0})",
            self.name, self.square, self.stats, self.belief
        )
    }
}

/// Everything that happened during one commander turn.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TurnReport {
    pub outcome: Option<MoveOutcome>,
    pub speech: Option<String>,
    pub reply: Option<String>,
    pub inspection: Option<ProfileReport>,
    pub notice: Option<String>,
    /// Terminal verdict once the game has ended.
    pub verdict: Option<String>,
    pub status: ArmyStatus,
}

impl TurnReport {
    pub(crate) fn new(status: ArmyStatus) -> Self {
        Self {
            outcome: None,
            speech: None,
            reply: None,
            inspection: None,
            notice: None,
            verdict: None,
            status,
        }
    }

    /// Narrative lines in the order they happened.
    pub fn lines(&self) -> Vec<String> {
        let mut out = Vec::new();
        if let Some(report) = &self.inspection {
            out.push(report.to_string());
        }
        if let Some(notice) = &self.notice {
            out.push(notice.clone());
        }
        if let Some(outcome) = &self.outcome {
            if !matches!(outcome, MoveOutcome::InvalidFormat { .. }) || self.speech.is_none() {
                out.push(outcome.narrative().to_string());
            }
        }
        out.extend(self.speech.iter().cloned());
        out.extend(self.reply.iter().cloned());
        out.extend(self.verdict.iter().cloned());
        out
    }
}
