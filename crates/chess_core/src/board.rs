use crate::error::{FenError, MoveError};
use crate::types::*;

pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CastlingRights {
    pub wk: bool,
    pub wq: bool,
    pub bk: bool,
    pub bq: bool,
}

impl CastlingRights {
    pub fn all() -> Self {
        Self {
            wk: true,
            wq: true,
            bk: true,
            bq: true,
        }
    }

    /// Drops every right that depends on a king or rook standing on `sq`.
    pub fn revoke_touching(&mut self, sq: Square) {
        match sq {
            0 => self.wq = false,
            7 => self.wk = false,
            4 => {
                self.wk = false;
                self.wq = false;
            }
            56 => self.bq = false,
            63 => self.bk = false,
            60 => {
                self.bk = false;
                self.bq = false;
            }
            _ => {}
        }
    }

    fn fen_field(&self) -> String {
        let mut s = String::new();
        for (flag, ch) in [(self.wk, 'K'), (self.wq, 'Q'), (self.bk, 'k'), (self.bq, 'q')] {
            if flag {
                s.push(ch);
            }
        }
        if s.is_empty() {
            s.push('-');
        }
        s
    }
}

/// Rook relocation for each castling king move: (king_from, king_to, rook_from, rook_to).
pub const CASTLING_ROOKS: [(Square, Square, Square, Square); 4] = [
    (4, 6, 7, 5),
    (4, 2, 0, 3),
    (60, 62, 63, 61),
    (60, 58, 56, 59),
];

/// Rook squares for a king travelling `from` -> `to`, if that pair is a castle.
pub fn castling_rook(from: Square, to: Square) -> Option<(Square, Square)> {
    CASTLING_ROOKS
        .iter()
        .find(|(kf, kt, _, _)| *kf == from && *kt == to)
        .map(|(_, _, rf, rt)| (*rf, *rt))
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Position {
    pub board: [Option<Piece>; 64],
    pub side_to_move: Color,
    pub castling: CastlingRights,
    pub en_passant: Option<Square>, // square behind a pawn that just advanced 2
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
}

#[derive(Clone, Debug)]
pub struct Undo {
    pub captured: Option<Piece>,
    pub castling: CastlingRights,
    pub en_passant: Option<Square>,
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
    pub moved_piece: Piece,
    pub rook_move: Option<(Square, Square)>,
    pub ep_captured_sq: Option<Square>, // square actually captured in en-passant
}

impl Default for Position {
    fn default() -> Self {
        Self::startpos()
    }
}

impl Position {
    pub fn startpos() -> Self {
        const BACK: [PieceKind; 8] = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        let mut board = [None; 64];
        for (f, &kind) in BACK.iter().enumerate() {
            board[f] = Some(Piece::new(Color::White, kind));
            board[8 + f] = Some(Piece::new(Color::White, PieceKind::Pawn));
            board[48 + f] = Some(Piece::new(Color::Black, PieceKind::Pawn));
            board[56 + f] = Some(Piece::new(Color::Black, kind));
        }
        Position {
            board,
            side_to_move: Color::White,
            castling: CastlingRights::all(),
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    /// Parses Forsyth-Edwards Notation. Move counters are optional.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.len() < 4 {
            return Err(FenError::MissingFields(parts.len()));
        }

        let ranks: Vec<&str> = parts[0].split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::RankCount(ranks.len()));
        }

        let mut board = [None; 64];
        for (rank_idx, rank_str) in ranks.iter().enumerate() {
            let rank = 7 - rank_idx as i8; // FEN lists rank 8 .. 1
            let mut file: i8 = 0;
            for ch in rank_str.chars() {
                if let Some(d) = ch.to_digit(10) {
                    file += d as i8;
                } else {
                    let piece = Piece::from_symbol(ch).ok_or(FenError::PieceChar(ch))?;
                    let s = sq(file, rank).ok_or(FenError::FileCount { rank: rank_idx })?;
                    board[s as usize] = Some(piece);
                    file += 1;
                }
                if file > 8 {
                    return Err(FenError::FileCount { rank: rank_idx });
                }
            }
            if file != 8 {
                return Err(FenError::FileCount { rank: rank_idx });
            }
        }

        let side_to_move = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(FenError::SideToMove(other.to_string())),
        };

        let mut castling = CastlingRights::default();
        if parts[2] != "-" {
            for c in parts[2].chars() {
                match c {
                    'K' => castling.wk = true,
                    'Q' => castling.wq = true,
                    'k' => castling.bk = true,
                    'q' => castling.bq = true,
                    _ => return Err(FenError::CastlingChar(c)),
                }
            }
        }

        let en_passant = match parts[3] {
            "-" => None,
            ep => Some(coord_to_sq(ep).ok_or_else(|| FenError::EnPassant(ep.to_string()))?),
        };

        let counter = |field: Option<&&str>, default: u32| -> Result<u32, FenError> {
            match field {
                Some(s) => s.parse().map_err(|_| FenError::Counter(s.to_string())),
                None => Ok(default),
            }
        };

        Ok(Position {
            board,
            side_to_move,
            castling,
            en_passant,
            halfmove_clock: counter(parts.get(4), 0)?,
            fullmove_number: counter(parts.get(5), 1)?,
        })
    }

    /// Renders the position as a full six-field FEN string.
    pub fn to_fen(&self) -> String {
        let mut placement = String::with_capacity(72);
        for rank in (0..8).rev() {
            let mut empty = 0;
            for file in 0..8 {
                match self.board[rank * 8 + file] {
                    Some(pc) => {
                        if empty > 0 {
                            placement.push_str(&empty.to_string());
                            empty = 0;
                        }
                        placement.push(pc.symbol());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                placement.push_str(&empty.to_string());
            }
            if rank > 0 {
                placement.push('/');
            }
        }
        let side = match self.side_to_move {
            Color::White => "w",
            Color::Black => "b",
        };
        let ep = self.en_passant.map(sq_to_coord).unwrap_or_else(|| "-".into());
        format!(
            "{placement} {side} {} {ep} {} {}",
            self.castling.fen_field(),
            self.halfmove_clock,
            self.fullmove_number
        )
    }

    pub fn king_sq(&self, c: Color) -> Option<Square> {
        (0..64u8).find(|&s| self.board[s as usize] == Some(Piece::new(c, PieceKind::King)))
    }

    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.board[sq as usize]
    }
    pub fn set_piece(&mut self, sq: Square, pc: Option<Piece>) {
        self.board[sq as usize] = pc;
    }

    /// Occupied squares in ascending order with their pieces.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.board
            .iter()
            .enumerate()
            .filter_map(|(i, pc)| pc.map(|p| (i as Square, p)))
    }

    pub fn occupied_count(&self) -> usize {
        self.board.iter().filter(|pc| pc.is_some()).count()
    }

    pub fn in_check(&self, c: Color) -> bool {
        match self.king_sq(c) {
            Some(ksq) => self.is_square_attacked(ksq, c.other()),
            None => false,
        }
    }

    pub fn is_square_attacked(&self, target: Square, by: Color) -> bool {
        let tf = file_of(target);
        let tr = rank_of(target);
        let holds = |s: Square, kinds: &[PieceKind]| {
            matches!(self.piece_at(s), Some(pc) if pc.color == by && kinds.contains(&pc.kind))
        };

        // A pawn attacks diagonally forward, so look one rank behind the target.
        let behind = -by.forward();
        for df in [-1, 1] {
            if let Some(s) = sq(tf + df, tr + behind)
                && holds(s, &[PieceKind::Pawn])
            {
                return true;
            }
        }

        let steppers = [
            (&KNIGHT_DELTAS, PieceKind::Knight),
            (&KING_DELTAS, PieceKind::King),
        ];
        for (deltas, kind) in steppers {
            for (df, dr) in deltas {
                if let Some(s) = sq(tf + df, tr + dr)
                    && holds(s, &[kind])
                {
                    return true;
                }
            }
        }

        let sliders: [(&[(i8, i8)], [PieceKind; 2]); 2] = [
            (&DIAGONALS, [PieceKind::Bishop, PieceKind::Queen]),
            (&ORTHOGONALS, [PieceKind::Rook, PieceKind::Queen]),
        ];
        for (dirs, kinds) in sliders {
            for (df, dr) in dirs {
                let (mut f, mut r) = (tf + df, tr + dr);
                while let Some(s) = sq(f, r) {
                    if self.piece_at(s).is_some() {
                        if holds(s, &kinds) {
                            return true;
                        }
                        break;
                    }
                    f += df;
                    r += dr;
                }
            }
        }

        false
    }

    /// Plays `mv` without checking legality. Generator flags (castle,
    /// en passant) decide the special-move handling.
    pub fn make_move(&mut self, mv: Move) -> Result<Undo, MoveError> {
        let (from, to) = (mv.from, mv.to);
        let moved = self.piece_at(from).ok_or(MoveError::EmptySource(from))?;

        let rook_move = if mv.is_castle && moved.kind == PieceKind::King {
            let (rf, rt) = castling_rook(from, to).ok_or(MoveError::MissingRook(to))?;
            let rook = self.piece_at(rf).ok_or(MoveError::MissingRook(rf))?;
            self.set_piece(rf, None);
            self.set_piece(rt, Some(rook));
            Some((rf, rt))
        } else {
            None
        };

        let undo_base = (
            self.castling.clone(),
            self.en_passant,
            self.halfmove_clock,
            self.fullmove_number,
        );

        let mut captured = self.piece_at(to);
        let mut ep_captured_sq = None;
        if mv.is_en_passant {
            // The captured pawn sits beside the mover, one rank behind `to`.
            if let Some(cs) = sq(file_of(to), rank_of(to) - moved.color.forward()) {
                captured = self.piece_at(cs);
                self.set_piece(cs, None);
                ep_captured_sq = Some(cs);
            }
        }

        self.set_piece(from, None);
        let promo_rank = match moved.color {
            Color::White => 7,
            Color::Black => 0,
        };
        let landed = if moved.kind == PieceKind::Pawn && rank_of(to) == promo_rank {
            Piece::new(moved.color, mv.promo.unwrap_or(PieceKind::Queen))
        } else {
            moved
        };
        self.set_piece(to, Some(landed));

        self.castling.revoke_touching(from);
        self.castling.revoke_touching(to);

        self.en_passant = None;
        if moved.kind == PieceKind::Pawn && (rank_of(to) - rank_of(from)).abs() == 2 {
            self.en_passant = sq(file_of(from), (rank_of(from) + rank_of(to)) / 2);
        }

        if moved.kind == PieceKind::Pawn || captured.is_some() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock += 1;
        }
        if self.side_to_move == Color::Black {
            self.fullmove_number += 1;
        }
        self.side_to_move = self.side_to_move.other();

        let (castling, en_passant, halfmove_clock, fullmove_number) = undo_base;
        Ok(Undo {
            captured,
            castling,
            en_passant,
            halfmove_clock,
            fullmove_number,
            moved_piece: moved,
            rook_move,
            ep_captured_sq,
        })
    }

    pub fn unmake_move(&mut self, mv: Move, undo: Undo) {
        self.side_to_move = self.side_to_move.other();
        self.castling = undo.castling;
        self.en_passant = undo.en_passant;
        self.halfmove_clock = undo.halfmove_clock;
        self.fullmove_number = undo.fullmove_number;

        if let Some((rf, rt)) = undo.rook_move {
            let rook = self.piece_at(rt);
            self.set_piece(rt, None);
            self.set_piece(rf, rook);
        }

        // The moved piece goes back as it was, undoing any promotion.
        self.set_piece(mv.to, None);
        self.set_piece(mv.from, Some(undo.moved_piece));

        match undo.ep_captured_sq {
            Some(cs) => self.set_piece(cs, undo.captured),
            None => self.set_piece(mv.to, undo.captured),
        }
    }

    /// Moves whatever stands on `from` to `to` at the board level, ignoring
    /// every movement rule, and hands the turn to the other side.
    /// Returns the piece that was standing on `to`, if any.
    pub fn relocate(&mut self, from: Square, to: Square) -> Result<Option<Piece>, MoveError> {
        let mover = self.piece_at(from).ok_or(MoveError::EmptySource(from))?;
        let displaced = self.piece_at(to);
        self.set_piece(to, Some(mover));
        self.set_piece(from, None);
        self.castling.revoke_touching(from);
        self.castling.revoke_touching(to);
        self.en_passant = None;
        self.halfmove_clock = 0;
        if self.side_to_move == Color::Black {
            self.fullmove_number += 1;
        }
        self.side_to_move = self.side_to_move.other();
        Ok(displaced)
    }

    pub fn is_fifty_move_draw(&self) -> bool {
        self.halfmove_clock >= 100
    }

    /// Neither side can possibly deliver mate: bare kings, a single minor
    /// piece, or bishops that all share one square color.
    pub fn is_insufficient_material(&self) -> bool {
        let mut minors = Vec::new();
        for (s, pc) in self.pieces() {
            match pc.kind {
                PieceKind::King => {}
                PieceKind::Knight | PieceKind::Bishop => minors.push((s, pc.kind)),
                _ => return false,
            }
        }
        match minors.as_slice() {
            [] | [_] => true,
            many => {
                let shade = |s: Square| (file_of(s) + rank_of(s)) % 2;
                many.iter().all(|(_, k)| *k == PieceKind::Bishop)
                    && many.iter().all(|(s, _)| shade(*s) == shade(many[0].0))
            }
        }
    }
}
