//! Decides what happens to a move order: refusal, hesitation, execution,
//! defiance of the rules, or outright heroics.

use chess_core::{move_to_san, move_to_uci, sq_to_coord, Color, Move};
use rand::Rng;
use tracing::{debug, error, info};

use crate::error::ExecutionError;
use crate::outcome::{Execution, Heroics, MoveOutcome};
use crate::parse::{ends_with_coordinates, parse_command, Illegality, ParsedMove};
use crate::profile::Attribute;
use crate::session::{piece_name, Session};
use crate::voice::Speaker;

const LONE_HERO_RALLY: (f64, f64, f64) = (2.0, 1.0, 0.0);
const MIRACLE_RALLY: (f64, f64, f64) = (6.0, 4.0, 3.0);

/// Score from `side`'s point of view given a White-relative one.
fn from_view_of(score: i32, side: Color) -> i32 {
    match side {
        Color::White => score,
        Color::Black => -score,
    }
}

impl Session {
    /// Adjudicates one move order for `side`.
    pub fn make_move(&mut self, text: &str, side: Color) -> MoveOutcome {
        let morale = self.profiles.team_average(side, Attribute::Morale);
        if morale < self.tuning.morale_gate {
            debug!(morale, "army broken, order ignored");
            return MoveOutcome::MoraleBroken {
                narrative: "Your army is broken. No one follows your command.".to_string(),
            };
        }
        if self.position.side_to_move != side {
            return MoveOutcome::Illegal {
                narrative: format!("It is not {side}'s turn to move."),
            };
        }

        let parsed = {
            let resolve = |tag: &str| self.tag_squares(tag, side);
            parse_command(&self.position, text, &resolve)
        };
        let (candidate, flaw) = match parsed {
            ParsedMove::Malformed => {
                return MoveOutcome::InvalidFormat {
                    narrative: "Invalid move format.".to_string(),
                }
            }
            ParsedMove::Legal(mv, origin) => {
                debug!(?origin, mv = %move_to_uci(mv), "legal order");
                (mv, None)
            }
            ParsedMove::Illegal(mv, why, origin) => {
                debug!(?origin, ?why, mv = %move_to_uci(mv), "illegal order");
                (mv, Some(why))
            }
        };

        if let Some(refusal) = self.resist(candidate, side) {
            return refusal;
        }

        let belief = self.profiles.team_belief(side);
        let allow_pseudo = belief >= self.tuning.pseudo_belief;
        let allow_heroic = belief >= self.tuning.heroic_belief;
        debug!(belief, allow_pseudo, allow_heroic, "team belief");

        let saved = (self.position.clone(), self.profiles.clone());
        let result = match flaw {
            None => self.play_legal(candidate, side),
            Some(Illegality::ExposesKing) if allow_pseudo => self.play_defiant(candidate, side),
            Some(why) if ends_with_coordinates(text) => {
                self.attempt_heroics(candidate, side, allow_heroic, why)
            }
            Some(why) => Ok(illegal(why)),
        };

        result.unwrap_or_else(|err| {
            error!(%err, text, "move execution failed, board restored");
            self.position = saved.0;
            self.profiles = saved.1;
            self.position.side_to_move = side;
            MoveOutcome::Recovered {
                narrative: "System recovered from move error.".to_string(),
            }
        })
    }

    /// A shaken piece may refuse outright. No board change either way.
    fn resist(&mut self, mv: Move, side: Color) -> Option<MoveOutcome> {
        let t = &self.tuning;
        let profile = self.profiles.get(mv.from).filter(|p| p.side == side)?;
        if profile.trust() >= t.refusal_trust_below && profile.morale() >= t.refusal_morale_below {
            return None;
        }
        let roll: f64 = self.rng.gen();
        if roll >= t.refusal_chance {
            debug!(roll, "shaken piece obeys anyway");
            return None;
        }

        let [low, high] = t.refusal_penalty;
        let trust_loss = self.rng.gen_range(low..=high);
        let morale_loss = self.rng.gen_range(low..=high);
        let profile = self.profiles.get_mut(mv.from)?;
        profile.adjust(Attribute::Trust, -trust_loss);
        profile.adjust(Attribute::Morale, -morale_loss);

        let name = piece_name(&self.position, mv.from);
        let square = sq_to_coord(mv.from);
        let speaker = Speaker::new(name, square.clone(), profile.snapshot());
        let quote = self
            .voice
            .line(&speaker, "I hesitate to obey such an order...", &mut *self.rng);
        info!(square = %square, "order refused");
        Some(MoveOutcome::Refused {
            narrative: format!("{quote}  (The {name} on {square} refused your command.)"),
        })
    }

    fn play_legal(&mut self, mv: Move, side: Color) -> Result<MoveOutcome, ExecutionError> {
        let mut probe = self.position.clone();
        probe.make_move(mv)?;
        let unsafe_square = probe.is_square_attacked(mv.to, side.other());
        if unsafe_square {
            let roll: f64 = self.rng.gen();
            if roll < self.tuning.unsafe_hesitation_chance {
                let t = &self.tuning;
                self.profiles.rally(
                    side,
                    -t.hesitation_morale_penalty,
                    -t.hesitation_trust_penalty,
                    -t.hesitation_motivation_penalty,
                );
                let name = piece_name(&self.position, mv.from);
                return Ok(MoveOutcome::Hesitated {
                    narrative: format!("The {name} hesitated: 'This feels like death, my lord...'"),
                });
            }
        }

        let san = move_to_san(&self.position, mv).unwrap_or_else(|| move_to_uci(mv));
        let name = self.position.piece_at(mv.from).map(|pc| pc.kind.name());
        self.execute(mv, side)?;
        let eval = self.score_for(side);
        info!(%san, eval, "move played");

        let narrative = match name {
            Some(name) => {
                let quote = self.piece_line(name, mv, "I have moved as commanded, my lord.")?;
                format!("{quote}  (Played {san}, eval {eval} cp)")
            }
            None => format!("{side} played {san} (eval {eval} cp)"),
        };
        Ok(MoveOutcome::Success {
            narrative,
            eval,
            style: Execution::Legal,
        })
    }

    fn play_defiant(&mut self, mv: Move, side: Color) -> Result<MoveOutcome, ExecutionError> {
        let name = piece_name(&self.position, mv.from);
        let uci = move_to_uci(mv);
        self.execute(mv, side)?;
        self.profiles
            .rally(side, 0.0, 0.0, self.tuning.bravery_motivation_bonus);
        let eval = self.score_for(side);
        info!(%uci, eval, "defiant move played");

        let quote = self.piece_line(name, mv, "I risked everything to obey.")?;
        Ok(MoveOutcome::Success {
            narrative: format!("{quote}  (Defied the odds with {uci})"),
            eval,
            style: Execution::Defiant,
        })
    }

    fn attempt_heroics(
        &mut self,
        candidate: Move,
        side: Color,
        allow_heroic: bool,
        why: Illegality,
    ) -> Result<MoveOutcome, ExecutionError> {
        // Relocation ignores every special-move flag.
        let mv = Move::new(candidate.from, candidate.to);
        match self.position.piece_at(mv.from) {
            None => {
                return Ok(MoveOutcome::Illegal {
                    narrative: format!("No piece stands on {} to answer.", sq_to_coord(mv.from)),
                })
            }
            Some(pc) if pc.color != side => {
                return Ok(MoveOutcome::Illegal {
                    narrative: "You can only command your own pieces.".to_string(),
                })
            }
            Some(_) if mv.from == mv.to => {
                return Ok(MoveOutcome::Illegal {
                    narrative: "A piece cannot march onto its own square.".to_string(),
                })
            }
            Some(_) => {}
        }

        let name = piece_name(&self.position, mv.from);
        let belief = self.profiles.get(mv.from).map_or(0.0, |p| p.belief());
        let roll: f64 = self.rng.gen();
        let feat = if belief >= self.tuning.hero_belief && roll < self.tuning.hero_chance {
            Heroics::LoneHero
        } else if allow_heroic {
            Heroics::Miracle
        } else {
            debug!(belief, roll, "no heroics");
            return Ok(illegal(why));
        };

        self.profiles.remap(&self.position, mv, side)?;
        self.position.relocate(mv.from, mv.to)?;
        self.check_sync()?;
        let (morale, trust, motivation) = match feat {
            Heroics::LoneHero => LONE_HERO_RALLY,
            Heroics::Miracle => MIRACLE_RALLY,
        };
        self.profiles.rally(side, morale, trust, motivation);
        let eval = self.evaluator.evaluate(&self.position);
        let uci = move_to_uci(mv);
        info!(%uci, ?feat, eval, "heroic relocation");

        let narrative = match feat {
            Heroics::LoneHero => {
                let quote = self.piece_line(name, mv, "I defied fate itself for you, commander!")?;
                format!("{quote}  (A lone hero defied fate with {uci})")
            }
            Heroics::Miracle => {
                let speaker =
                    Speaker::new("army", "ranks", self.profiles.team_snapshot(side));
                let quote = self.voice.line(
                    &speaker,
                    "Together we transcended reality itself!",
                    &mut *self.rng,
                );
                format!("{quote}  ({side} bent reality with {uci})")
            }
        };
        Ok(MoveOutcome::HeroicSuccess {
            narrative,
            eval,
            feat,
        })
    }

    /// Remaps profiles, then plays the generated move.
    pub(crate) fn execute(&mut self, mv: Move, side: Color) -> Result<(), ExecutionError> {
        self.profiles.remap(&self.position, mv, side)?;
        self.position.make_move(mv)?;
        self.check_sync()
    }

    pub(crate) fn check_sync(&self) -> Result<(), ExecutionError> {
        if self.profiles.is_consistent_with(&self.position) {
            Ok(())
        } else {
            Err(ExecutionError::Desync {
                profiles: self.profiles.len(),
                pieces: self.position.occupied_count(),
            })
        }
    }

    /// Evaluates the current position and feeds the ledger from `side`'s view.
    /// Returns the White-relative score.
    fn score_for(&mut self, side: Color) -> i32 {
        let eval = self.evaluator.evaluate(&self.position);
        self.profiles
            .adjust_from_score(from_view_of(eval, side), side, self.tuning.score_divisor);
        eval
    }

    /// Line spoken by the piece that just arrived on `mv.to`.
    fn piece_line(&mut self, name: &str, mv: Move, prompt: &str) -> Result<String, ExecutionError> {
        let profile = self
            .profiles
            .get(mv.to)
            .ok_or(ExecutionError::MissingProfile(mv.to))?;
        let speaker = Speaker::new(name, sq_to_coord(mv.to), profile.snapshot());
        Ok(self.voice.line(&speaker, prompt, &mut *self.rng))
    }
}

fn illegal(why: Illegality) -> MoveOutcome {
    let narrative = match why {
        Illegality::ExposesKing => "Illegal move: your king would be left exposed.",
        Illegality::BreaksMovement => "Illegal move.",
    };
    MoveOutcome::Illegal {
        narrative: narrative.to_string(),
    }
}
