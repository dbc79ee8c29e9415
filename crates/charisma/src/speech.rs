//! Commander speeches: sentiment in, emotional deltas out.

use std::time::{Duration, Instant};

use chess_core::{sq_to_coord, Color};
use rand::Rng;
use tracing::{debug, info};

use crate::config::Tuning;
use crate::profile::Attribute;
use crate::session::{piece_name, Session};
use crate::voice::Speaker;

/// Tags that address every piece of the side.
pub const ARMY_TAGS: [&str; 3] = ["@army", "@all", "@troops"];

/// Cooldown and fatigue bookkeeping across speeches.
#[derive(Debug, Clone)]
pub struct SpeechState {
    last: Option<Instant>,
    decay: f64,
    counter: u32,
}

impl Default for SpeechState {
    fn default() -> Self {
        Self {
            last: None,
            decay: 1.0,
            counter: 0,
        }
    }
}

impl SpeechState {
    pub fn decay(&self) -> f64 {
        self.decay
    }

    /// Speeches given so far.
    pub fn counter(&self) -> u32 {
        self.counter
    }

    /// Records a speech at `now` and returns the decay factor it gets.
    pub fn register(&mut self, now: Instant, tuning: &Tuning) -> f64 {
        let cooldown = Duration::from_secs_f64(tuning.speech_cooldown_secs.max(0.0));
        let rushed = self
            .last
            .is_some_and(|last| now.saturating_duration_since(last) < cooldown);
        self.decay = if rushed {
            self.decay * tuning.speech_decay
        } else {
            (self.decay + tuning.speech_recovery).min(1.0)
        };
        self.last = Some(now);
        self.counter += 1;
        self.decay
    }
}

impl Session {
    /// Applies a speech by `side` and returns its narrative.
    pub fn analyze_speech(&mut self, text: &str, side: Color) -> String {
        let polarity = self.sentiment.polarity(text).clamp(-1.0, 1.0);
        let decay = self.speech.register(Instant::now(), &self.tuning);
        let t = &self.tuning;

        let target = text
            .split_whitespace()
            .find(|w| w.starts_with('@'))
            .map(|w| {
                w.trim_end_matches(|c: char| !c.is_ascii_alphanumeric())
                    .to_ascii_lowercase()
            });

        let morale = self.profiles.team_average(side, Attribute::Morale);
        let desperation = t.desperation_floor.max((100.0 - morale) / 100.0);
        let intensity = t
            .intensity_floor
            .max((polarity * t.polarity_scale).abs() * desperation * decay);
        info!(polarity, intensity, decay, counter = self.speech.counter(), "speech");

        match target {
            Some(tag) if !ARMY_TAGS.contains(&tag.as_str()) => {
                self.directed_speech(&tag, text, polarity, intensity, side)
            }
            _ => self.rally_army(text, polarity, intensity, side),
        }
    }

    fn rally_army(&mut self, text: &str, polarity: f64, intensity: f64, side: Color) -> String {
        let [low, high] = self.tuning.army_multiplier;
        let fatigued = self.speech.counter() % self.tuning.army_fatigue_period == 0;
        for p in self.profiles.side_mut(side) {
            let change = polarity * intensity * self.rng.gen_range(low..=high);
            p.adjust(Attribute::Morale, change);
            p.adjust(Attribute::Trust, change / 2.0);
            p.adjust(Attribute::Motivation, change / 3.0);
            p.adjust(Attribute::Loyalty, change / 2.5);
            if fatigued {
                p.adjust(Attribute::Trust, -self.tuning.army_fatigue_trust);
            }
        }
        if fatigued {
            debug!("speech fatigue drains trust");
        }

        let mood = if polarity > 0.2 {
            "Your words boom like thunder. Hope rekindles across your army!"
        } else if polarity < -0.2 {
            "Your harshness cuts deep; weary eyes lower their gaze."
        } else {
            "Your calm tone steadies their hearts for a moment longer."
        };
        let speaker = Speaker::new("army", "ranks", self.profiles.team_snapshot(side));
        let quote = self.voice.line(&speaker, text, &mut *self.rng);
        format!("{mood} {quote}")
    }

    fn directed_speech(
        &mut self,
        tag: &str,
        text: &str,
        polarity: f64,
        intensity: f64,
        side: Color,
    ) -> String {
        let Some(square) = self.resolve_tag(tag, side) else {
            return format!("Your voice echoes in vain. No {tag} stands ready to listen.");
        };
        let name = piece_name(&self.position, square);
        let coord = sq_to_coord(square);

        let [low, high] = self.tuning.directed_multiplier;
        let change = polarity * intensity * self.rng.gen_range(low..=high);
        let fatigue = if self.speech.counter() % self.tuning.directed_fatigue_period == 0 {
            let [f_low, f_high] = self.tuning.directed_fatigue_trust;
            self.rng.gen_range(f_low..=f_high)
        } else {
            0.0
        };

        let Some(profile) = self.profiles.get_mut(square) else {
            return format!("Your voice echoes in vain. No {tag} stands ready to listen.");
        };
        profile.adjust(Attribute::Morale, change);
        profile.adjust(Attribute::Trust, change * 0.8);
        profile.adjust(Attribute::Motivation, change * 0.6);
        profile.adjust(Attribute::Loyalty, change * 0.7);
        profile.adjust(Attribute::Trust, -fatigue);

        let reaction = if polarity > 0.4 {
            if profile.trust() > 85.0 {
                format!("The {name} on {coord} shines with devotion: 'For you, commander!'")
            } else {
                format!("The {name} on {coord} nods with growing resolve.")
            }
        } else if polarity < -0.3 {
            profile.adjust(Attribute::Trust, -change.abs() * 0.5);
            format!("The {name} on {coord} recoils from your words.")
        } else {
            format!("The {name} on {coord} listens quietly, unsure of your tone.")
        };
        debug!(square = %coord, change, fatigue, "directed speech");

        let speaker = Speaker::new(name, coord, profile.snapshot());
        let quote = self.voice.line(&speaker, text, &mut *self.rng);
        format!("{reaction} {quote}")
    }
}
