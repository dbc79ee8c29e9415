//! Error types for position setup and move application.

use thiserror::Error;

use crate::types::Square;

/// Reasons a FEN string could not be turned into a position.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    #[error("FEN needs at least 4 fields, got {0}")]
    MissingFields(usize),

    #[error("FEN board section must have 8 ranks, got {0}")]
    RankCount(usize),

    #[error("invalid piece character '{0}' in FEN")]
    PieceChar(char),

    #[error("rank {rank} of FEN board does not describe exactly 8 files")]
    FileCount { rank: usize },

    #[error("invalid side to move '{0}'")]
    SideToMove(String),

    #[error("invalid castling character '{0}'")]
    CastlingChar(char),

    #[error("invalid en-passant square '{0}'")]
    EnPassant(String),

    #[error("invalid move counter '{0}'")]
    Counter(String),
}

/// Errors raised when a move cannot be applied to the board.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    #[error("no piece on source square {0}")]
    EmptySource(Square),

    #[error("castling rook missing from square {0}")]
    MissingRook(Square),
}
