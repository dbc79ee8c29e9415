use super::*;

#[test]
fn test_startpos_moves() {
    let pos = Position::startpos();
    let moves = legal_moves(&pos);
    // Starting position has 20 legal moves
    assert_eq!(moves.len(), 20);
}

#[test]
fn test_kiwipete_moves() {
    // Kiwipete position - complex with many move types
    let pos = Position::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq -")
        .unwrap();
    let moves = legal_moves(&pos);
    assert_eq!(moves.len(), 48);
    assert_eq!(moves.iter().filter(|m| m.is_castle).count(), 2);
}

#[test]
fn test_pinned_piece_move_is_only_pseudo_legal() {
    // White knight on e2 is pinned against the king by the rook on e8.
    let pos = Position::from_fen("4r1k1/8/8/8/8/8/4N3/4K3 w - - 0 1").unwrap();
    let knight_out = Move::new(coord_to_sq("e2").unwrap(), coord_to_sq("c3").unwrap());

    assert!(find_legal(&pos, knight_out).is_none());
    assert!(find_pseudo_legal(&pos, knight_out).is_some());
}

#[test]
fn test_find_legal_restores_generator_flags() {
    let pos = Position::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1").unwrap();
    let bare = Move::new(coord_to_sq("e5").unwrap(), coord_to_sq("d6").unwrap());

    let found = find_legal(&pos, bare).expect("en passant should be legal");
    assert!(found.is_en_passant);

    let pos = Position::from_fen("4k3/8/8/8/8/8/8/4K2R w K - 0 1").unwrap();
    let castle = find_legal(&pos, Move::new(4, 6)).expect("castling should be legal");
    assert!(castle.is_castle);
}

#[test]
fn test_no_castling_without_rook_on_home_square() {
    // Rights claim king side, but the rook is gone.
    let pos = Position::from_fen("4k3/8/8/8/8/8/8/4K3 w K - 0 1").unwrap();
    assert!(legal_moves(&pos).iter().all(|m| !m.is_castle));
}

#[test]
fn test_game_status() {
    let mate = Position::from_fen("r1bqkbnr/pppp1Qpp/2n5/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 0 1")
        .unwrap();
    assert_eq!(
        game_status(&mate),
        GameStatus::Checkmate {
            loser: Color::Black
        }
    );

    let stalemate = Position::from_fen("k7/8/1Q6/8/8/8/8/1K6 b - - 0 1").unwrap();
    assert_eq!(game_status(&stalemate), GameStatus::Stalemate);

    let kingless = Position::from_fen("8/8/8/8/8/8/8/4K3 w - - 0 1").unwrap();
    assert_eq!(
        game_status(&kingless),
        GameStatus::KingCaptured {
            loser: Color::Black
        }
    );

    assert_eq!(game_status(&Position::startpos()), GameStatus::Ongoing);
}
