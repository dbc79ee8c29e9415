//! Error types for configuration, external services and move execution.

use std::path::PathBuf;

use chess_core::{FenError, MoveError, Square};
use thiserror::Error;

/// Problems found while loading or validating a [`crate::Config`].
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("heroic belief threshold ({heroic}) must be above the pseudo-legal threshold ({pseudo})")]
    ThresholdOrder { pseudo: f64, heroic: f64 },

    #[error("{name} must be a probability in [0, 1], got {value}")]
    Probability { name: &'static str, value: f64 },

    #[error("{name} range [{low}, {high}] is empty or negative")]
    Range {
        name: &'static str,
        low: f64,
        high: f64,
    },

    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: f64 },

    #[error("invalid starting position: {0}")]
    StartFen(#[from] FenError),
}

/// Failure of an external collaborator. Callers degrade to local fallbacks.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error("service is offline")]
    Offline,

    #[error("transport failure: {0}")]
    Transport(String),

    #[error("service answered with HTTP status {0}")]
    Status(u16),

    #[error("unexpected response body: {0}")]
    Malformed(String),

    #[error("service returned no result")]
    Empty,
}

/// Internal faults while executing an accepted move.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExecutionError {
    #[error("rule engine refused the move: {0}")]
    Move(#[from] MoveError),

    #[error("no profile for the piece on square {0}")]
    MissingProfile(Square),

    #[error("profile table out of sync: {profiles} profiles for {pieces} pieces")]
    Desync { profiles: usize, pieces: usize },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown attribute '{0}'")]
pub struct UnknownAttribute(pub String);
