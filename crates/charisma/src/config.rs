//! TOML configuration: tuning constants, service endpoints and game setup.

use std::path::Path;

use chess_core::Position;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Every threshold, probability and multiplier the morale rules use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Tuning {
    /// Team morale below this breaks the army before any parsing.
    pub morale_gate: f64,
    pub refusal_trust_below: f64,
    pub refusal_morale_below: f64,
    pub refusal_chance: f64,
    /// Trust and morale lost by a piece that refuses.
    pub refusal_penalty: [f64; 2],
    pub unsafe_hesitation_chance: f64,
    pub hesitation_morale_penalty: f64,
    pub hesitation_trust_penalty: f64,
    pub hesitation_motivation_penalty: f64,
    /// Team belief needed to play moves that expose the king.
    pub pseudo_belief: f64,
    /// Team belief needed for an army-wide miracle.
    pub heroic_belief: f64,
    pub hero_belief: f64,
    pub hero_chance: f64,
    /// Centipawns per unit of ledger delta.
    pub score_divisor: f64,
    pub bravery_motivation_bonus: f64,
    pub speech_cooldown_secs: f64,
    pub speech_decay: f64,
    pub speech_recovery: f64,
    pub polarity_scale: f64,
    pub desperation_floor: f64,
    pub intensity_floor: f64,
    pub army_multiplier: [f64; 2],
    pub directed_multiplier: [f64; 2],
    /// Every n-th speech costs trust.
    pub army_fatigue_period: u32,
    pub army_fatigue_trust: f64,
    pub directed_fatigue_period: u32,
    pub directed_fatigue_trust: [f64; 2],
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            morale_gate: 35.0,
            refusal_trust_below: 35.0,
            refusal_morale_below: 30.0,
            refusal_chance: 0.65,
            refusal_penalty: [2.0, 6.0],
            unsafe_hesitation_chance: 0.70,
            hesitation_morale_penalty: 4.0,
            hesitation_trust_penalty: 2.0,
            hesitation_motivation_penalty: 2.0,
            pseudo_belief: 85.0,
            heroic_belief: 95.0,
            hero_belief: 90.0,
            hero_chance: 0.6,
            score_divisor: 400.0,
            bravery_motivation_bonus: 2.0,
            speech_cooldown_secs: 8.0,
            speech_decay: 0.8,
            speech_recovery: 0.1,
            polarity_scale: 10.0,
            desperation_floor: 0.3,
            intensity_floor: 1.0,
            army_multiplier: [4.0, 8.0],
            directed_multiplier: [6.0, 12.0],
            army_fatigue_period: 4,
            army_fatigue_trust: 2.0,
            directed_fatigue_period: 5,
            directed_fatigue_trust: [1.0, 4.0],
        }
    }
}

impl Tuning {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.heroic_belief <= self.pseudo_belief {
            return Err(ConfigError::ThresholdOrder {
                pseudo: self.pseudo_belief,
                heroic: self.heroic_belief,
            });
        }
        for (name, value) in [
            ("refusal_chance", self.refusal_chance),
            ("unsafe_hesitation_chance", self.unsafe_hesitation_chance),
            ("hero_chance", self.hero_chance),
            ("speech_decay", self.speech_decay),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Probability { name, value });
            }
        }
        for (name, [low, high]) in [
            ("refusal_penalty", self.refusal_penalty),
            ("army_multiplier", self.army_multiplier),
            ("directed_multiplier", self.directed_multiplier),
            ("directed_fatigue_trust", self.directed_fatigue_trust),
        ] {
            if !(low >= 0.0 && low <= high && high.is_finite()) {
                return Err(ConfigError::Range { name, low, high });
            }
        }
        for (name, value) in [
            ("score_divisor", self.score_divisor),
            ("army_fatigue_period", f64::from(self.army_fatigue_period)),
            ("directed_fatigue_period", f64::from(self.directed_fatigue_period)),
        ] {
            if !(value > 0.0) {
                return Err(ConfigError::NonPositive { name, value });
            }
        }
        Ok(())
    }
}

/// External service endpoints. Timeouts are in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Services {
    pub enabled: bool,
    pub evaluation_url: String,
    pub evaluation_timeout_ms: u64,
    pub dialogue_url: String,
    pub dialogue_model: String,
    pub dialogue_timeout_ms: u64,
    pub dialogue_max_tokens: u32,
}

impl Default for Services {
    fn default() -> Self {
        Self {
            enabled: true,
            evaluation_url: "https://lichess.org/api/cloud-eval".to_string(),
            evaluation_timeout_ms: 3_000,
            dialogue_url: "http://localhost:11434/api/generate".to_string(),
            dialogue_model: "llama3".to_string(),
            dialogue_timeout_ms: 4_000,
            dialogue_max_tokens: 60,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameSetup {
    /// Fixed seed for the session's random source. `None` draws from entropy.
    pub seed: Option<u64>,
    pub start_fen: Option<String>,
}

impl GameSetup {
    pub fn start_position(&self) -> Result<Position, ConfigError> {
        match &self.start_fen {
            Some(fen) => Ok(Position::from_fen(fen)?),
            None => Ok(Position::startpos()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub tuning: Tuning,
    pub services: Services,
    pub game: GameSetup,
}

impl Config {
    /// Reads and validates a TOML config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.tuning.validate()?;
        self.game.start_position()?;
        Ok(())
    }
}
