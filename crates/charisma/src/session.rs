//! The per-game object and the commander turn router.

use chess_core::{game_status, sq_to_coord, Color, Position, Square};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use tracing::info;

use crate::config::{Config, Tuning};
use crate::error::ConfigError;
use crate::evaluator::Evaluator;
use crate::outcome::{MoveOutcome, ProfileReport, TurnReport};
use crate::parse::{parse_command, ParsedMove};
use crate::ports::{DialogueService, EvaluationService, Offline, SentimentScorer, Silent};
use crate::profile::{Attribute, ProfileTable};
use crate::sentiment::LexiconSentiment;
use crate::speech::{SpeechState, ARMY_TAGS};
use crate::voice::Voice;

/// One game: board, profiles, caches, speech state, randomness and ports.
pub struct Session {
    pub(crate) position: Position,
    pub(crate) profiles: ProfileTable,
    pub(crate) evaluator: Evaluator,
    pub(crate) voice: Voice,
    pub(crate) sentiment: Box<dyn SentimentScorer>,
    pub(crate) speech: SpeechState,
    pub(crate) tuning: Tuning,
    pub(crate) rng: Box<dyn RngCore>,
    pub(crate) commander: Color,
}

impl Session {
    /// Offline session seeded from `config.game.seed`, or from entropy.
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        let rng: Box<dyn RngCore> = match config.game.seed {
            Some(seed) => Box::new(StdRng::seed_from_u64(seed)),
            None => Box::new(StdRng::from_entropy()),
        };
        Self::with_rng(config, rng)
    }

    /// Offline session drawing every roll from `rng`, including profile seeding.
    pub fn with_rng(config: &Config, mut rng: Box<dyn RngCore>) -> Result<Self, ConfigError> {
        config.tuning.validate()?;
        let position = config.game.start_position()?;
        let profiles = ProfileTable::seed(&position, &mut *rng);
        Ok(Self {
            position,
            profiles,
            evaluator: Evaluator::new(Box::new(Offline)),
            voice: Voice::new(Box::new(Silent)),
            sentiment: Box::new(LexiconSentiment),
            speech: SpeechState::default(),
            tuning: config.tuning.clone(),
            rng,
            commander: Color::White,
        })
    }

    pub fn with_evaluation(mut self, service: Box<dyn EvaluationService>) -> Self {
        self.evaluator = Evaluator::new(service);
        self
    }

    pub fn with_dialogue(mut self, service: Box<dyn DialogueService>) -> Self {
        self.voice = Voice::new(service);
        self
    }

    pub fn with_sentiment(mut self, scorer: Box<dyn SentimentScorer>) -> Self {
        self.sentiment = scorer;
        self
    }

    /// Restarts from `position` with freshly seeded profiles.
    pub fn start_from(&mut self, position: Position) {
        self.profiles = ProfileTable::seed(&position, &mut *self.rng);
        self.position = position;
        self.speech = SpeechState::default();
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn profiles(&self) -> &ProfileTable {
        &self.profiles
    }

    pub fn profiles_mut(&mut self) -> &mut ProfileTable {
        &mut self.profiles
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// The side the human commands.
    pub fn commander(&self) -> Color {
        self.commander
    }

    pub fn speech_state(&self) -> &SpeechState {
        &self.speech
    }

    pub fn service_names(&self) -> (&str, &str) {
        (self.evaluator.service_name(), self.voice.service_name())
    }

    /// Routes one line of commander input. Text addressed with `@` that does
    /// not read as a move is a speech and skips the morale gate.
    pub fn command(&mut self, text: &str) -> TurnReport {
        let side = self.commander;
        let mut report = TurnReport::new(self.profiles.army_status(side));

        if let Some(tag) = stats_query(text) {
            match self.inspect(tag, side) {
                Some(found) => report.inspection = Some(found),
                None => report.notice = Some(format!("No {tag} answers the roll call.")),
            }
            return report;
        }

        if text.contains('@') && !self.reads_as_move(text, side) {
            info!(text, "commander speech");
            report.speech = Some(self.analyze_speech(text, side));
        } else {
            let outcome = self.make_move(text, side);
            info!(kind = outcome.kind(), text, "commander turn");
            match &outcome {
                MoveOutcome::InvalidFormat { .. } => {
                    report.speech = Some(self.analyze_speech(text, side));
                }
                MoveOutcome::Success { .. } | MoveOutcome::HeroicSuccess { .. } => {
                    report.reply = Some(self.enemy_move(false));
                }
                MoveOutcome::Hesitated { .. } => {
                    report.reply = Some(self.enemy_move(true));
                }
                _ => {}
            }
            report.outcome = Some(outcome);
        }

        let status = game_status(&self.position);
        if status.is_over() {
            report.verdict = Some(status.describe());
        }
        report.status = self.profiles.army_status(side);
        report
    }

    /// Square of the first living piece of `side` (in table order) that
    /// answers to `tag`.
    pub fn resolve_tag(&self, tag: &str, side: Color) -> Option<Square> {
        self.tag_squares(tag, side).into_iter().next()
    }

    /// Every living piece of `side` answering to `tag`, in table order.
    /// Accepted forms: `e2`, `pe2`, `e2p`, `p`, `pawn`, `pawne2` and
    /// `e2pawn`, case-insensitive, with or without `@`.
    pub fn tag_squares(&self, tag: &str, side: Color) -> Vec<Square> {
        let wanted = tag.trim_start_matches('@').to_ascii_lowercase();
        self.profiles
            .side(side)
            .filter_map(|profile| {
                let piece = self.position.piece_at(profile.square)?;
                if piece.color != side {
                    return None;
                }
                let square = sq_to_coord(profile.square);
                let symbol = piece.kind.letter();
                let name = piece.kind.name();
                let forms = [
                    square.clone(),
                    format!("{symbol}{square}"),
                    format!("{square}{symbol}"),
                    symbol.to_string(),
                    name.to_string(),
                    format!("{name}{square}"),
                    format!("{square}{name}"),
                ];
                forms.contains(&wanted).then_some(profile.square)
            })
            .collect()
    }

    /// Status of one piece, or of the whole army for an army-wide tag.
    pub fn inspect(&self, tag: &str, side: Color) -> Option<ProfileReport> {
        if is_army_tag(tag) {
            return Some(ProfileReport {
                name: format!("{side} army"),
                square: "ranks".to_string(),
                belief: self.profiles.team_belief(side),
                stats: self.profiles.team_snapshot(side),
            });
        }
        let square = self.resolve_tag(tag, side)?;
        let profile = self.profiles.get(square)?;
        Some(ProfileReport {
            name: piece_name(&self.position, square).to_string(),
            square: sq_to_coord(square),
            belief: profile.belief(),
            stats: profile.snapshot(),
        })
    }

    fn reads_as_move(&self, text: &str, side: Color) -> bool {
        let resolve = |tag: &str| self.tag_squares(tag, side);
        parse_command(&self.position, text, &resolve) != ParsedMove::Malformed
    }

    /// Sets `attr` to `value` (clamped) on the piece answering to `tag`, or
    /// on every piece of `side` for an army tag. Returns who was changed.
    pub fn override_attribute(
        &mut self,
        tag: &str,
        side: Color,
        attr: Attribute,
        value: f64,
    ) -> Option<String> {
        if is_army_tag(tag) {
            for profile in self.profiles.side_mut(side) {
                profile.set(attr, value);
            }
            info!(%attr, value, "army attribute overridden");
            return Some(format!("{side} army"));
        }
        let square = self.resolve_tag(tag, side)?;
        let name = piece_name(&self.position, square);
        self.profiles.get_mut(square)?.set(attr, value);
        info!(%attr, value, square = %sq_to_coord(square), "piece attribute overridden");
        Some(format!("{name} on {}", sq_to_coord(square)))
    }
}

/// `army`, `@army`, `@all` or `@troops`, any case.
fn is_army_tag(tag: &str) -> bool {
    let lowered = format!("@{}", tag.trim_start_matches('@').to_ascii_lowercase());
    ARMY_TAGS.contains(&lowered.as_str())
}

/// Occupant's kind name, or "soldier" for an empty square.
pub(crate) fn piece_name(pos: &Position, square: Square) -> &'static str {
    pos.piece_at(square).map_or("soldier", |pc| pc.kind.name())
}

/// `@tag stats` or the run-together `@tagstats`.
fn stats_query(text: &str) -> Option<&str> {
    let text = text.trim();
    if !text.starts_with('@') || !text.to_ascii_lowercase().ends_with("stats") {
        return None;
    }
    // The suffix is ASCII, so the cut lands on a char boundary.
    let tag = text[..text.len() - "stats".len()].trim_end();
    (tag.len() > 1 && !tag.contains(char::is_whitespace)).then_some(tag)
}
