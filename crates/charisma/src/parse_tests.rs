use super::*;
use crate::parse::ends_with_coordinates;
use chess_core::{coord_to_sq, Position, Square};

fn at(c: &str) -> Square {
    coord_to_sq(c).unwrap()
}

fn no_tags(_: &str) -> Vec<Square> {
    Vec::new()
}

fn path(parsed: ParsedMove) -> (Square, Square) {
    match parsed {
        ParsedMove::Legal(mv, _) | ParsedMove::Illegal(mv, _, _) => (mv.from, mv.to),
        ParsedMove::Malformed => panic!("expected a move"),
    }
}

#[test]
fn test_san_is_tried_first() {
    let pos = Position::startpos();
    let parsed = parse_command(&pos, "e4", &no_tags);
    assert!(matches!(parsed, ParsedMove::Legal(_, Origin::San)));
    assert_eq!(path(parsed), (at("e2"), at("e4")));

    let parsed = parse_command(&pos, "Ng1f3", &no_tags);
    assert!(matches!(parsed, ParsedMove::Legal(_, Origin::San)));
}

#[test]
fn test_coordinate_token_is_found_from_the_last_word() {
    let pos = Position::startpos();
    let parsed = parse_command(&pos, "advance e2e3 then e2e4", &no_tags);
    assert!(matches!(parsed, ParsedMove::Legal(_, Origin::Coordinate)));
    assert_eq!(path(parsed), (at("e2"), at("e4")));
}

#[test]
fn test_impossible_coordinates_still_yield_a_move() {
    let pos = Position::startpos();
    let parsed = parse_command(&pos, "a1a7", &no_tags);
    assert_eq!(
        parsed,
        ParsedMove::Illegal(
            chess_core::Move::new(at("a1"), at("a7")),
            Illegality::BreaksMovement,
            Origin::Coordinate
        )
    );
}

#[test]
fn test_pinned_piece_is_flagged_as_exposing_the_king() {
    let pos = Position::from_fen("4r1k1/8/8/8/8/8/4N3/4K3 w - - 0 1").unwrap();
    let parsed = parse_command(&pos, "Nc3", &no_tags);
    assert!(matches!(
        parsed,
        ParsedMove::Illegal(_, Illegality::ExposesKing, Origin::San)
    ));
}

#[test]
fn test_tagged_form_takes_its_source_from_the_resolver() {
    let pos = Position::startpos();
    let resolve = |tag: &str| match tag {
        "g1" => vec![at("g1")],
        "knight" => vec![at("b1"), at("g1")],
        "queen" => vec![at("d1")],
        _ => Vec::new(),
    };
    let parsed = parse_command(&pos, "@knight f3", &resolve);
    assert!(matches!(parsed, ParsedMove::Legal(_, Origin::Tagged)));
    assert_eq!(path(parsed), (at("g1"), at("f3")));

    let parsed = parse_command(&pos, "@queen to h5", &resolve);
    assert!(matches!(
        parsed,
        ParsedMove::Illegal(_, Illegality::BreaksMovement, Origin::Tagged)
    ));

    assert_eq!(parse_command(&pos, "@bishop f4", &resolve), ParsedMove::Malformed);
}

#[test]
fn test_tag_prefers_the_piece_that_can_reach_the_square() {
    let pos = Position::startpos();
    let pawns = |tag: &str| -> Vec<Square> {
        match tag {
            "pawn" => ["a2", "b2", "c2", "d2", "e2", "f2", "g2", "h2"]
                .into_iter()
                .map(at)
                .collect(),
            _ => Vec::new(),
        }
    };
    let parsed = parse_command(&pos, "@pawn e4", &pawns);
    assert!(matches!(parsed, ParsedMove::Legal(_, Origin::Tagged)));
    assert_eq!(path(parsed), (at("e2"), at("e4")));

    let parsed = parse_command(&pos, "@pawn e5", &pawns);
    assert!(matches!(
        parsed,
        ParsedMove::Illegal(_, Illegality::BreaksMovement, Origin::Tagged)
    ));
    assert_eq!(path(parsed), (at("a2"), at("e5")));
}

#[test]
fn test_prose_is_malformed() {
    let pos = Position::startpos();
    for text in ["hello there", "", "@army hold the line", "e9", "Qx"] {
        assert_eq!(parse_command(&pos, text, &no_tags), ParsedMove::Malformed, "{text}");
    }
}

#[test]
fn test_promotion_defaults_to_queen() {
    let pos = Position::from_fen("4k3/1P6/8/8/8/8/8/4K3 w - - 0 1").unwrap();
    match parse_command(&pos, "b7b8", &no_tags) {
        ParsedMove::Legal(mv, _) => assert_eq!(mv.promo, Some(chess_core::PieceKind::Queen)),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn test_heroic_token_must_be_the_last_word() {
    assert!(ends_with_coordinates("charge a1a7"));
    assert!(ends_with_coordinates("Ra1a7"));
    assert!(!ends_with_coordinates("a1a7 now"));
    assert!(!ends_with_coordinates("Ra7"));
    assert!(!ends_with_coordinates(""));
}
