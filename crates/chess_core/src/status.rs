//! Terminal-state detection.

use crate::{board::Position, movegen::legal_moves, types::Color};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    /// The side to move is mated; the other side wins.
    Checkmate { loser: Color },
    Stalemate,
    FiftyMoveRule,
    InsufficientMaterial,
    /// A king has left the board (only reachable through forced relocations).
    KingCaptured { loser: Color },
}

impl GameStatus {
    pub fn is_over(self) -> bool {
        self != GameStatus::Ongoing
    }

    pub fn describe(self) -> String {
        match self {
            GameStatus::Ongoing => "The battle rages on.".to_string(),
            GameStatus::Checkmate { loser } => {
                format!("Checkmate. {} has fallen.", loser)
            }
            GameStatus::Stalemate => "Stalemate. Neither army can move.".to_string(),
            GameStatus::FiftyMoveRule => "Draw by the fifty-move rule.".to_string(),
            GameStatus::InsufficientMaterial => {
                "Draw. Neither army has the strength to finish.".to_string()
            }
            GameStatus::KingCaptured { loser } => {
                format!("The {} king has been taken from the field.", loser)
            }
        }
    }
}

pub fn game_status(pos: &Position) -> GameStatus {
    for side in [Color::White, Color::Black] {
        if pos.king_sq(side).is_none() {
            return GameStatus::KingCaptured { loser: side };
        }
    }
    if legal_moves(pos).is_empty() {
        return if pos.in_check(pos.side_to_move) {
            GameStatus::Checkmate {
                loser: pos.side_to_move,
            }
        } else {
            GameStatus::Stalemate
        };
    }
    if pos.is_fifty_move_draw() {
        return GameStatus::FiftyMoveRule;
    }
    if pos.is_insufficient_material() {
        return GameStatus::InsufficientMaterial;
    }
    GameStatus::Ongoing
}
