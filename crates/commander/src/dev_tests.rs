use charisma::{Attribute, Config, Session};
use chess_core::{coord_to_sq, Color};

use crate::dev::apply_setting;

fn seeded() -> Session {
    let mut config = Config::default();
    config.game.seed = Some(11);
    Session::new(&config).unwrap()
}

#[test]
fn test_sets_one_piece() {
    let mut session = seeded();
    let message = apply_setting(&mut session, "@e2p", "Morale", "20");
    assert_eq!(message, "morale of pawn on e2 set to 20.0");
    let e2 = coord_to_sq("e2").unwrap();
    assert_eq!(session.profiles().get(e2).unwrap().morale(), 20.0);
}

#[test]
fn test_sets_the_whole_army_clamped() {
    let mut session = seeded();
    let message = apply_setting(&mut session, "army", "trust", "250");
    assert_eq!(message, "trust of White army set to 100.0");
    assert!(session
        .profiles()
        .side(Color::White)
        .all(|p| p.get(Attribute::Trust) == 100.0));
}

#[test]
fn test_rejects_bad_input() {
    let mut session = seeded();
    let before = session.profiles().clone();
    assert!(apply_setting(&mut session, "@e2", "courage", "10").contains("courage"));
    assert_eq!(apply_setting(&mut session, "@e2", "trust", "lots"), "Invalid value 'lots'.");
    assert_eq!(apply_setting(&mut session, "@e2", "trust", "NaN"), "Invalid value 'NaN'.");
    assert_eq!(
        apply_setting(&mut session, "@e7", "trust", "10"),
        "No @e7 answers the roll call."
    );
    assert_eq!(session.profiles(), &before);
}
