//! Morale-driven move adjudication.
//!
//! Every piece carries an emotional profile. Orders from the commander are
//! parsed into moves and then judged against those profiles: shaken pieces
//! refuse, frightened ones hesitate, and an army with enough belief may
//! bend the rules of chess outright. Speeches move the numbers the other
//! way. External evaluation, dialogue and sentiment sit behind the traits
//! in [`ports`].

pub mod adjudicator;
pub mod config;
pub mod error;
pub mod evaluator;
pub mod ledger;
pub mod opponent;
pub mod outcome;
pub mod parse;
pub mod ports;
pub mod profile;
pub mod remap;
pub mod sentiment;
pub mod session;
pub mod speech;
pub mod voice;

pub use config::{Config, GameSetup, Services, Tuning};
pub use error::{ConfigError, ExecutionError, ServiceError, UnknownAttribute};
pub use evaluator::Evaluator;
pub use ledger::ArmyStatus;
pub use outcome::{Execution, Heroics, MoveOutcome, ProfileReport, TurnReport};
pub use parse::{parse_command, Illegality, Origin, ParsedMove, Resolver};
pub use ports::{DialogueService, EvaluationService, Offline, SentimentScorer, Silent};
pub use profile::{Attribute, PieceProfile, ProfileTable, Snapshot};
pub use sentiment::LexiconSentiment;
pub use session::Session;
pub use speech::{SpeechState, ARMY_TAGS};
pub use voice::{piece_prompt, Speaker, Voice};

#[cfg(test)]
mod parse_tests;
#[cfg(test)]
mod profile_tests;
#[cfg(test)]
mod sentiment_tests;
#[cfg(test)]
mod services_tests;
#[cfg(test)]
mod test_support;
