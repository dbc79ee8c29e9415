//! Side-wide aggregates over the profile table and the score-driven update.

use std::fmt;

use chess_core::Color;
use serde::Serialize;

use crate::profile::{Attribute, ProfileTable, Snapshot};

/// Coarse mood label for one side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum ArmyStatus {
    Inspired,
    Steady,
    Doubtful,
    Fearful,
    Broken,
}

impl ArmyStatus {
    pub fn label(self) -> &'static str {
        match self {
            ArmyStatus::Inspired => "Inspired",
            ArmyStatus::Steady => "Steady",
            ArmyStatus::Doubtful => "Doubtful",
            ArmyStatus::Fearful => "Fearful",
            ArmyStatus::Broken => "Broken",
        }
    }
}

impl fmt::Display for ArmyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl ProfileTable {
    /// Mean of `attr` over the living profiles of `side`, or 0 when none remain.
    pub fn team_average(&self, side: Color, attr: Attribute) -> f64 {
        let (sum, count) = self
            .side(side)
            .fold((0.0, 0usize), |(sum, n), p| (sum + p.get(attr), n + 1));
        if count == 0 {
            0.0
        } else {
            sum / count as f64
        }
    }

    pub fn team_belief(&self, side: Color) -> f64 {
        0.6 * self.team_average(side, Attribute::Trust)
            + 0.4 * self.team_average(side, Attribute::Morale)
    }

    pub fn team_snapshot(&self, side: Color) -> Snapshot {
        Snapshot {
            loyalty: self.team_average(side, Attribute::Loyalty),
            motivation: self.team_average(side, Attribute::Motivation),
            morale: self.team_average(side, Attribute::Morale),
            trust: self.team_average(side, Attribute::Trust),
            empathy: self.team_average(side, Attribute::Empathy),
        }
    }

    /// Shifts trust, morale and motivation of `side` by `score / divisor`,
    /// where `score` is in centipawns from that side's point of view.
    pub fn adjust_from_score(&mut self, score: i32, side: Color, divisor: f64) {
        let delta = f64::from(score) / divisor;
        for p in self.side_mut(side) {
            p.adjust(Attribute::Trust, delta * 3.5);
            p.adjust(Attribute::Morale, delta * 2.5);
            p.adjust(Attribute::Motivation, delta * 1.8);
        }
    }

    /// Same clamped increment for every living profile of `side`.
    pub fn rally(&mut self, side: Color, morale: f64, trust: f64, motivation: f64) {
        for p in self.side_mut(side) {
            p.adjust(Attribute::Morale, morale);
            p.adjust(Attribute::Trust, trust);
            p.adjust(Attribute::Motivation, motivation);
        }
    }

    pub fn army_status(&self, side: Color) -> ArmyStatus {
        let morale = self.team_average(side, Attribute::Morale);
        let trust = self.team_average(side, Attribute::Trust);
        if morale < 35.0 {
            ArmyStatus::Broken
        } else if morale > 85.0 && trust > 75.0 {
            ArmyStatus::Inspired
        } else if morale > 65.0 {
            ArmyStatus::Steady
        } else if morale > 45.0 {
            ArmyStatus::Doubtful
        } else {
            ArmyStatus::Fearful
        }
    }
}
