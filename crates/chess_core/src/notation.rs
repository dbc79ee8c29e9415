//! Move notation: UCI coordinates, strict coordinate tokens and SAN.

use crate::{
    board::Position,
    movegen::{legal_moves, pseudo_legal_moves},
    types::*,
};

pub fn move_to_uci(mv: Move) -> String {
    let mut s = sq_to_coord(mv.from);
    s.push_str(&sq_to_coord(mv.to));
    if let Some(p) = mv.promo {
        s.push(p.letter());
    }
    s
}

/// Reads a coordinate token of the form `[NBRQK]?[a-h][1-8][a-h][1-8][qrbn]?`
/// (case-insensitive). The optional leading piece letter is informational
/// and dropped. No position is consulted, so the move may be impossible.
pub fn coordinate_move(token: &str) -> Option<Move> {
    if !token.is_ascii() {
        return None;
    }
    let t = token.to_ascii_lowercase();
    bare_coordinates(&t).or_else(|| {
        let lead = t.chars().next()?;
        if matches!(lead, 'n' | 'b' | 'r' | 'q' | 'k') {
            bare_coordinates(&t[1..])
        } else {
            None
        }
    })
}

fn bare_coordinates(t: &str) -> Option<Move> {
    let from = coord_to_sq(t.get(0..2)?)?;
    let to = coord_to_sq(t.get(2..4)?)?;
    let promo = match t.len() {
        4 => None,
        5 => match t.as_bytes()[4] {
            b'q' => Some(PieceKind::Queen),
            b'r' => Some(PieceKind::Rook),
            b'b' => Some(PieceKind::Bishop),
            b'n' => Some(PieceKind::Knight),
            _ => return None,
        },
        _ => return None,
    };
    Some(Move::new(from, to).with_promo(promo))
}

pub fn is_coordinate_token(token: &str) -> bool {
    coordinate_move(token).is_some()
}

/// Parses UCI text and matches it against the legal moves so the castle and
/// en-passant flags are correct.
pub fn parse_uci_move(pos: &Position, txt: &str) -> Option<Move> {
    let wanted = bare_coordinates(&txt.trim().to_ascii_lowercase())?;
    legal_moves(pos).into_iter().find(|m| {
        m.from == wanted.from
            && m.to == wanted.to
            && (m.promo == wanted.promo || (wanted.promo.is_none() && m.promo == Some(PieceKind::Queen)))
    })
}

/// Parses Standard Algebraic Notation against the position. Legal moves are
/// tried first; a move that only fails by exposing the mover's king is
/// still recognised through the pseudo-legal list.
pub fn parse_san(pos: &Position, text: &str) -> Option<Move> {
    let parsed = SanParts::read(text)?;
    parsed
        .select(pos, &legal_moves(pos))
        .or_else(|| parsed.select(pos, &pseudo_legal_moves(pos)))
}

#[derive(Debug, PartialEq, Eq)]
enum SanParts {
    Castle { king_side: bool },
    Normal {
        kind: PieceKind,
        from_file: Option<i8>,
        from_rank: Option<i8>,
        to: Square,
        promo: Option<PieceKind>,
    },
}

impl SanParts {
    fn read(text: &str) -> Option<SanParts> {
        let t = text
            .trim()
            .trim_end_matches(|c| matches!(c, '+' | '#' | '!' | '?'));
        if !t.is_ascii() || t.is_empty() {
            return None;
        }
        match t {
            "O-O" | "0-0" => return Some(SanParts::Castle { king_side: true }),
            "O-O-O" | "0-0-0" => return Some(SanParts::Castle { king_side: false }),
            _ => {}
        }

        let (body, promo) = match t.split_once('=') {
            Some((body, p)) if p.len() == 1 => (body, Some(promotion_letter(p.chars().next()?)?)),
            Some(_) => return None,
            None => {
                let bytes = t.as_bytes();
                let n = bytes.len();
                if n >= 3 && bytes[n - 2].is_ascii_digit() && !bytes[n - 1].is_ascii_digit() {
                    (&t[..n - 1], Some(promotion_letter(bytes[n - 1] as char)?))
                } else {
                    (t, None)
                }
            }
        };

        let (kind, rest) = match body.chars().next()? {
            c @ ('N' | 'B' | 'R' | 'Q' | 'K') => (PieceKind::from_letter(c)?, &body[1..]),
            _ => (PieceKind::Pawn, body),
        };
        if promo.is_some() && kind != PieceKind::Pawn {
            return None;
        }

        let squares: String = rest.chars().filter(|&c| c != 'x' && c != ':').collect();
        if squares.len() < 2 || squares.len() > 4 {
            return None;
        }
        let (hint, dest) = squares.split_at(squares.len() - 2);
        let to = coord_to_sq(dest)?;

        let mut from_file = None;
        let mut from_rank = None;
        for c in hint.chars() {
            match c {
                'a'..='h' if from_file.is_none() => from_file = Some((c as u8 - b'a') as i8),
                '1'..='8' if from_rank.is_none() => from_rank = Some((c as u8 - b'1') as i8),
                _ => return None,
            }
        }

        Some(SanParts::Normal {
            kind,
            from_file,
            from_rank,
            to,
            promo,
        })
    }

    fn select(&self, pos: &Position, moves: &[Move]) -> Option<Move> {
        let mut hits = moves.iter().filter(|m| match *self {
            SanParts::Castle { king_side } => m.is_castle && (file_of(m.to) == 6) == king_side,
            SanParts::Normal {
                kind,
                from_file,
                from_rank,
                to,
                promo,
            } => {
                m.to == to
                    && !m.is_castle
                    && pos.piece_at(m.from).map(|pc| pc.kind) == Some(kind)
                    && from_file.is_none_or(|f| file_of(m.from) == f)
                    && from_rank.is_none_or(|r| rank_of(m.from) == r)
                    && (m.promo == promo || (promo.is_none() && m.promo == Some(PieceKind::Queen)))
            }
        });
        let first = *hits.next()?;
        // Ambiguous text names nothing.
        match hits.next() {
            Some(_) => None,
            None => Some(first),
        }
    }
}

fn promotion_letter(c: char) -> Option<PieceKind> {
    match PieceKind::from_letter(c)? {
        k @ (PieceKind::Queen | PieceKind::Rook | PieceKind::Bishop | PieceKind::Knight) => Some(k),
        _ => None,
    }
}

/// Renders `mv` (to be played from `pos`) in Standard Algebraic Notation,
/// including check and mate suffixes. Returns `None` when the source
/// square is empty or the move cannot be applied.
pub fn move_to_san(pos: &Position, mv: Move) -> Option<String> {
    let piece = pos.piece_at(mv.from)?;
    let mut san = if mv.is_castle {
        let castle = if file_of(mv.to) == 6 { "O-O" } else { "O-O-O" };
        castle.to_string()
    } else {
        let capture = pos.piece_at(mv.to).is_some() || mv.is_en_passant;
        let mut s = String::new();
        if piece.kind == PieceKind::Pawn {
            if capture {
                s.push(sq_to_coord(mv.from).chars().next()?);
                s.push('x');
            }
            s.push_str(&sq_to_coord(mv.to));
            if let Some(p) = mv.promo {
                s.push('=');
                s.push(p.letter().to_ascii_uppercase());
            }
        } else {
            s.push(piece.kind.letter().to_ascii_uppercase());
            s.push_str(&disambiguation(pos, mv, piece));
            if capture {
                s.push('x');
            }
            s.push_str(&sq_to_coord(mv.to));
        }
        s
    };

    let mut after = pos.clone();
    after.make_move(mv).ok()?;
    if after.in_check(after.side_to_move) {
        san.push(if legal_moves(&after).is_empty() { '#' } else { '+' });
    }
    Some(san)
}

fn disambiguation(pos: &Position, mv: Move, piece: Piece) -> String {
    let rivals: Vec<Square> = legal_moves(pos)
        .into_iter()
        .filter(|m| m.to == mv.to && m.from != mv.from && pos.piece_at(m.from) == Some(piece))
        .map(|m| m.from)
        .collect();
    if rivals.is_empty() {
        return String::new();
    }
    let coord = sq_to_coord(mv.from);
    if rivals.iter().all(|&s| file_of(s) != file_of(mv.from)) {
        coord[..1].to_string()
    } else if rivals.iter().all(|&s| rank_of(s) != rank_of(mv.from)) {
        coord[1..].to_string()
    } else {
        coord
    }
}
