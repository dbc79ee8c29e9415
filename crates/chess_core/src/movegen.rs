use crate::{board::Position, types::*};

/// Generate all legal moves, returning a freshly allocated vector.
/// Internally delegates to `legal_moves_into`, cloning the position only once.
pub fn legal_moves(pos: &Position) -> Vec<Move> {
    let mut tmp = pos.clone();
    let mut out = Vec::with_capacity(64);
    legal_moves_into(&mut tmp, &mut out);
    out
}

/// Generate all legal moves into the provided buffer, reusing it across calls.
pub fn legal_moves_into(pos: &mut Position, out: &mut Vec<Move>) {
    out.clear();
    pseudo_moves(pos, out);

    let mover = pos.side_to_move;
    out.retain(|&mv| match pos.make_move(mv) {
        Ok(undo) => {
            let illegal = pos.in_check(mover);
            pos.unmake_move(mv, undo);
            !illegal
        }
        Err(_) => false,
    });
}

/// Moves that follow piece-movement rules for the side to move but may
/// leave that side's own king attacked.
pub fn pseudo_legal_moves(pos: &Position) -> Vec<Move> {
    let mut out = Vec::with_capacity(64);
    pseudo_moves(pos, &mut out);
    out
}

/// The legal move travelling `from` -> `to` (with matching promotion), carrying
/// the generator's castle and en-passant flags.
pub fn find_legal(pos: &Position, candidate: Move) -> Option<Move> {
    legal_moves(pos).into_iter().find(|m| m.same_path(&candidate))
}

/// Like [`find_legal`] but over pseudo-legal moves.
pub fn find_pseudo_legal(pos: &Position, candidate: Move) -> Option<Move> {
    pseudo_legal_moves(pos)
        .into_iter()
        .find(|m| m.same_path(&candidate))
}

fn pseudo_moves(pos: &Position, out: &mut Vec<Move>) {
    let side = pos.side_to_move;
    for (from, pc) in pos.pieces() {
        if pc.color != side {
            continue;
        }
        match pc.kind {
            PieceKind::Pawn => gen_pawn(pos, from, side, out),
            PieceKind::Knight => gen_steps(pos, from, side, &KNIGHT_DELTAS, out),
            PieceKind::Bishop => gen_slider(pos, from, side, &DIAGONALS, out),
            PieceKind::Rook => gen_slider(pos, from, side, &ORTHOGONALS, out),
            PieceKind::Queen => {
                gen_slider(pos, from, side, &DIAGONALS, out);
                gen_slider(pos, from, side, &ORTHOGONALS, out);
            }
            PieceKind::King => {
                gen_steps(pos, from, side, &KING_DELTAS, out);
                gen_castle(pos, from, side, out);
            }
        }
    }
}

fn push_pawn_move(from: Square, to: Square, promo_rank: i8, out: &mut Vec<Move>) {
    if rank_of(to) == promo_rank {
        for pk in [
            PieceKind::Queen,
            PieceKind::Rook,
            PieceKind::Bishop,
            PieceKind::Knight,
        ] {
            out.push(Move::new(from, to).with_promo(Some(pk)));
        }
    } else {
        out.push(Move::new(from, to));
    }
}

fn gen_pawn(pos: &Position, from: Square, c: Color, out: &mut Vec<Move>) {
    let f = file_of(from);
    let r = rank_of(from);
    let dir = c.forward();
    let (start_rank, promo_rank) = match c {
        Color::White => (1, 7),
        Color::Black => (6, 0),
    };

    if let Some(to) = sq(f, r + dir)
        && pos.piece_at(to).is_none()
    {
        push_pawn_move(from, to, promo_rank, out);
        if r == start_rank
            && let Some(to2) = sq(f, r + 2 * dir)
            && pos.piece_at(to2).is_none()
        {
            out.push(Move::new(from, to2));
        }
    }

    for df in [-1, 1] {
        let Some(to) = sq(f + df, r + dir) else {
            continue;
        };
        match pos.piece_at(to) {
            Some(target) if target.color != c => push_pawn_move(from, to, promo_rank, out),
            None if pos.en_passant == Some(to) => {
                let mut mv = Move::new(from, to);
                mv.is_en_passant = true;
                out.push(mv);
            }
            _ => {}
        }
    }
}

fn gen_steps(pos: &Position, from: Square, c: Color, deltas: &[(i8, i8)], out: &mut Vec<Move>) {
    let (f, r) = (file_of(from), rank_of(from));
    for (df, dr) in deltas {
        if let Some(to) = sq(f + df, r + dr) {
            match pos.piece_at(to) {
                Some(pc) if pc.color == c => {}
                _ => out.push(Move::new(from, to)),
            }
        }
    }
}

fn gen_slider(pos: &Position, from: Square, c: Color, dirs: &[(i8, i8)], out: &mut Vec<Move>) {
    let f0 = file_of(from);
    let r0 = rank_of(from);
    for (df, dr) in dirs {
        let mut f = f0 + df;
        let mut r = r0 + dr;
        while let Some(to) = sq(f, r) {
            match pos.piece_at(to) {
                None => out.push(Move::new(from, to)),
                Some(pc) if pc.color != c => {
                    out.push(Move::new(from, to));
                    break;
                }
                _ => break,
            }
            f += df;
            r += dr;
        }
    }
}

fn gen_castle(pos: &Position, from: Square, c: Color, out: &mut Vec<Move>) {
    // (allowed, king_to, rook_from, squares that must be empty, squares that must be safe)
    let options: [(bool, Square, Square, &[Square], [Square; 2]); 2] = match c {
        Color::White => [
            (pos.castling.wk, 6, 7, &[5, 6][..], [5, 6]),
            (pos.castling.wq, 2, 0, &[3, 2, 1][..], [3, 2]),
        ],
        Color::Black => [
            (pos.castling.bk, 62, 63, &[61, 62][..], [61, 62]),
            (pos.castling.bq, 58, 56, &[59, 58, 57][..], [59, 58]),
        ],
    };
    let king_from = match c {
        Color::White => 4,
        Color::Black => 60,
    };
    if from != king_from || pos.in_check(c) {
        return;
    }

    let enemy = c.other();
    for (allowed, king_to, rook_from, empty, safe) in options {
        let rook_home = pos.piece_at(rook_from) == Some(Piece::new(c, PieceKind::Rook));
        if allowed
            && rook_home
            && empty.iter().all(|&s| pos.piece_at(s).is_none())
            && safe.iter().all(|&s| !pos.is_square_attacked(s, enemy))
        {
            let mut mv = Move::new(from, king_to);
            mv.is_castle = true;
            out.push(mv);
        }
    }
}
