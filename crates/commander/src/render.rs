//! Plain-text views for the terminal.

use charisma::{Attribute, Session};
use chess_core::{sq, Color, Position};

pub fn banner(session: &Session) -> String {
    let (evaluation, dialogue) = session.service_names();
    format!(
        "Charisma Chess. You command {}. Evaluation: {evaluation}, dialogue: {dialogue}.\n\
         Give an order (e4, Nf3, @knight f3, g1f3), make a speech (@army hold the line!), \
         or type board, status [attribute], @<piece> stats, \
         set <@piece|army> <attribute> <value> or quit.",
        session.commander()
    )
}

/// ASCII diagram from White's side with the FEN underneath.
pub fn board(pos: &Position) -> String {
    let mut out = String::new();
    for rank in (0..8).rev() {
        out.push_str(&format!("{} ", rank + 1));
        for file in 0..8 {
            let glyph = sq(file, rank)
                .and_then(|s| pos.piece_at(s))
                .map_or('.', |pc| match pc.color {
                    Color::White => pc.kind.letter().to_ascii_uppercase(),
                    Color::Black => pc.kind.letter(),
                });
            out.push(' ');
            out.push(glyph);
        }
        out.push('\n');
    }
    out.push_str("   a b c d e f g h\n");
    out.push_str(&pos.to_fen());
    out
}

/// Side averages, either every attribute or just `attr`.
pub fn status(session: &Session, attr: Option<Attribute>) -> String {
    let profiles = session.profiles();
    [Color::White, Color::Black]
        .into_iter()
        .map(|side| match attr {
            Some(attr) => format!("{side} {attr}: {:.1}", profiles.team_average(side, attr)),
            None => format!(
                "{side} ({}): {}",
                profiles.army_status(side),
                profiles.team_snapshot(side)
            ),
        })
        .collect::<Vec<_>>()
        .join("\n")
}
