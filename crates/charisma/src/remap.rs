//! Keeps profiles attached to their pieces across a move.

use chess_core::{castling_rook, file_of, rank_of, sq, Color, Move, Position, Square};
use tracing::debug;

use crate::error::ExecutionError;
use crate::profile::ProfileTable;

impl ProfileTable {
    /// Re-keys profiles for `mv`, which `mover` is about to play from `pos`.
    /// Must run before the move is applied to the position. A mover without
    /// a profile is an error and leaves the table untouched.
    pub fn remap(&mut self, pos: &Position, mv: Move, mover: Color) -> Result<(), ExecutionError> {
        if self.get(mv.from).is_none() {
            return Err(ExecutionError::MissingProfile(mv.from));
        }

        let enemy_on_target = pos.piece_at(mv.to).is_some_and(|pc| pc.color != mover);
        if enemy_on_target && self.remove(mv.to).is_some() {
            debug!(square = mv.to, "captured profile removed");
        }

        if mv.is_en_passant {
            if let Some(victim) = sq(file_of(mv.to), rank_of(mv.to) - mover.forward()) {
                self.remove(victim);
            }
        }

        self.relocate(mv.from, mv.to);

        if mv.is_castle {
            if let Some((rook_from, rook_to)) = castling_rook(mv.from, mv.to) {
                self.relocate(rook_from, rook_to);
            }
        }
        Ok(())
    }

    /// Pops the profile at `from` and reinserts it at `to`, overwriting
    /// whatever entry was there.
    pub(crate) fn relocate(&mut self, from: Square, to: Square) {
        if let Some(mut profile) = self.remove(from) {
            profile.square = to;
            self.insert(profile);
        }
    }
}
