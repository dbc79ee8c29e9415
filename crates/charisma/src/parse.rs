//! Turns commander text into a candidate move.

use chess_core::{
    coord_to_sq, coordinate_move, is_coordinate_token, legal_moves, parse_san, pseudo_legal_moves,
    Move, PieceKind, Position, Square,
};

/// Which reader recognised the move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Origin {
    San,
    Coordinate,
    Tagged,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Illegality {
    /// Follows piece movement but leaves the mover's king attacked.
    ExposesKing,
    /// No piece of the side to move can travel this way.
    BreaksMovement,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParsedMove {
    Legal(Move, Origin),
    Illegal(Move, Illegality, Origin),
    Malformed,
}

/// Maps a piece tag to every square, in table order, whose occupant answers to it.
pub type Resolver<'a> = dyn Fn(&str) -> Vec<Square> + 'a;

type Reader = fn(&Position, &str, &Resolver) -> Option<Move>;

const READERS: [(Origin, Reader); 3] = [
    (Origin::San, read_san),
    (Origin::Coordinate, read_coordinates),
    (Origin::Tagged, read_tagged),
];

/// Tries SAN, then a coordinate token, then `@tag <square>`; the first
/// reader that recognises the text wins. `resolve` maps a piece tag to the
/// squares of the pieces answering to it.
pub fn parse_command(pos: &Position, text: &str, resolve: &Resolver) -> ParsedMove {
    READERS
        .iter()
        .find_map(|(origin, read)| read(pos, text, resolve).map(|mv| classify(pos, mv, *origin)))
        .unwrap_or(ParsedMove::Malformed)
}

/// True when the final word is a strict coordinate token such as `e2e4`.
pub fn ends_with_coordinates(text: &str) -> bool {
    text.split_whitespace().last().is_some_and(is_coordinate_token)
}

fn read_san(pos: &Position, text: &str, _: &Resolver) -> Option<Move> {
    parse_san(pos, text.trim())
}

fn read_coordinates(_: &Position, text: &str, _: &Resolver) -> Option<Move> {
    text.split_whitespace().rev().find_map(coordinate_move)
}

/// `@tag <square>` or `@tag to <square>`. When several pieces answer to the
/// tag, one that can legally reach the square wins, then one that only
/// breaks king safety, then the first in table order.
fn read_tagged(pos: &Position, text: &str, resolve: &Resolver) -> Option<Move> {
    let words: Vec<&str> = text.split_whitespace().collect();
    let (tag, dest) = match words.as_slice() {
        [tag, dest] => (*tag, *dest),
        [tag, to, dest] if to.eq_ignore_ascii_case("to") => (*tag, *dest),
        _ => return None,
    };
    let tag = tag.strip_prefix('@')?;
    let to = coord_to_sq(dest)?;
    let candidates: Vec<Move> = resolve(tag)
        .into_iter()
        .map(|from| Move::new(from, to))
        .collect();
    let legal = legal_moves(pos);
    let pseudo = pseudo_legal_moves(pos);
    candidates
        .iter()
        .copied()
        .find(|&mv| matching(&legal, mv).is_some())
        .or_else(|| {
            candidates
                .iter()
                .copied()
                .find(|&mv| matching(&pseudo, mv).is_some())
        })
        .or_else(|| candidates.first().copied())
}

fn classify(pos: &Position, candidate: Move, origin: Origin) -> ParsedMove {
    if let Some(mv) = matching(&legal_moves(pos), candidate) {
        ParsedMove::Legal(mv, origin)
    } else if let Some(mv) = matching(&pseudo_legal_moves(pos), candidate) {
        ParsedMove::Illegal(mv, Illegality::ExposesKing, origin)
    } else {
        ParsedMove::Illegal(candidate, Illegality::BreaksMovement, origin)
    }
}

/// The generated move along the candidate's path. A missing promotion
/// piece defaults to a queen.
fn matching(moves: &[Move], candidate: Move) -> Option<Move> {
    moves.iter().copied().find(|m| {
        m.from == candidate.from
            && m.to == candidate.to
            && (m.promo == candidate.promo
                || (candidate.promo.is_none() && m.promo == Some(PieceKind::Queen)))
    })
}
