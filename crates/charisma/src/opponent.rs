//! The opposing army's reply. It always plays a legal move.

use chess_core::{game_status, legal_moves, move_to_san, move_to_uci, parse_uci_move};
use rand::seq::SliceRandom;
use tracing::{debug, error, info};

use crate::session::Session;

impl Session {
    /// Plays one move for the opposing side. With `force_side` the turn is
    /// handed to the opponent first (a free tempo) and handed back after.
    pub fn enemy_move(&mut self, force_side: bool) -> String {
        let status = game_status(&self.position);
        if status.is_over() {
            return status.describe();
        }

        let opponent = self.commander.other();
        let original = self.position.side_to_move;
        let forced = force_side && original != opponent;
        if forced {
            self.position.side_to_move = opponent;
            self.position.en_passant = None;
        }
        let mover = self.position.side_to_move;

        let legal = legal_moves(&self.position);
        if legal.is_empty() {
            self.position.side_to_move = original;
            return format!("{mover} has no legal moves.");
        }

        let suggested = self
            .evaluator
            .best_move(&self.position)
            .and_then(|uci| parse_uci_move(&self.position, &uci));
        let (mv, tag) = match suggested {
            Some(mv) => (mv, "(AI)"),
            None => match legal.choose(&mut *self.rng) {
                Some(&mv) => (mv, "(fallback)"),
                None => {
                    self.position.side_to_move = original;
                    return format!("{mover} has no legal moves.");
                }
            },
        };
        debug!(mv = %move_to_uci(mv), tag, "opponent choice");

        let san = move_to_san(&self.position, mv).unwrap_or_else(|| move_to_uci(mv));
        let saved = (self.position.clone(), self.profiles.clone());
        if let Err(err) = self.execute(mv, mover) {
            error!(%err, "opponent move failed, board restored");
            self.position = saved.0;
            self.profiles = saved.1;
            self.position.side_to_move = original;
            return format!("{mover} falters in confusion.");
        }
        if forced {
            self.position.side_to_move = original;
        }
        info!(%san, tag, "opponent played");
        format!("{mover} played {san} {tag}")
    }
}
