//! End-to-end commander scenarios through the public session API.

use charisma::{
    ArmyStatus, Attribute, Config, Heroics, MoveOutcome, ProfileTable, Session, SentimentScorer,
};
use chess_core::{coord_to_sq, game_status, Color, Position};
use rand::rngs::mock::StepRng;
use rand::rngs::StdRng;
use rand::SeedableRng;

struct Cheerful;

impl SentimentScorer for Cheerful {
    fn polarity(&self, _text: &str) -> f64 {
        0.7
    }
}

fn zero_session() -> Session {
    Session::with_rng(&Config::default(), Box::new(StepRng::new(0, 0))).unwrap()
}

fn seeded_session(seed: u64) -> Session {
    Session::with_rng(&Config::default(), Box::new(StdRng::seed_from_u64(seed))).unwrap()
}

fn embolden(session: &mut Session, side: Color) {
    for profile in session.profiles_mut().side_mut(side) {
        for attr in [Attribute::Loyalty, Attribute::Trust, Attribute::Morale] {
            profile.set(attr, 100.0);
        }
    }
}

fn assert_bounded(profiles: &ProfileTable) {
    for profile in profiles.iter() {
        for attr in Attribute::ALL {
            let value = profile.get(attr);
            assert!(
                (0.0..=100.0).contains(&value),
                "{attr} = {value} on square {}",
                profile.square
            );
        }
    }
}

#[test]
fn opening_move_rekeys_the_pawn() {
    let mut session = zero_session();
    let report = session.command("e4");

    assert!(report.outcome.as_ref().is_some_and(MoveOutcome::is_success));
    assert!(report.reply.is_some());
    assert!(session.profiles().get(coord_to_sq("e4").unwrap()).is_some());
    assert!(session.profiles().get(coord_to_sq("e2").unwrap()).is_none());
    assert_eq!(session.profiles().len(), session.position().occupied_count());
}

#[test]
fn broken_army_leaves_everything_untouched() {
    let mut session = zero_session();
    for profile in session.profiles_mut().side_mut(Color::White) {
        profile.set(Attribute::Morale, 20.0);
    }
    let board = session.position().clone();
    let profiles = session.profiles().clone();

    let report = session.command("e4");
    assert!(matches!(report.outcome, Some(MoveOutcome::MoraleBroken { .. })));
    assert_eq!(report.status, ArmyStatus::Broken);
    assert!(report.reply.is_none());
    assert_eq!(session.position(), &board);
    assert_eq!(session.profiles(), &profiles);
}

#[test]
fn rallying_speech_lifts_the_army() {
    let mut session = zero_session().with_sentiment(Box::new(Cheerful));
    let before = session.profiles().team_average(Color::White, Attribute::Morale);

    let report = session.command("@army hold the line");
    assert!(report.outcome.is_none());
    assert!(report.speech.is_some());
    assert!(session.profiles().team_average(Color::White, Attribute::Morale) > before);
    assert_eq!(report.lines().len(), 1);
}

#[test]
fn heroic_relocation_captures_through_the_ranks() {
    let mut session = zero_session();
    embolden(&mut session, Color::White);

    let report = session.command("h1h7");
    match &report.outcome {
        Some(MoveOutcome::HeroicSuccess { feat, .. }) => assert_eq!(*feat, Heroics::LoneHero),
        other => panic!("unexpected outcome {other:?}"),
    }
    let h7 = coord_to_sq("h7").unwrap();
    assert_eq!(session.profiles().get(h7).map(|p| p.side), Some(Color::White));
    assert!(session.profiles().get(coord_to_sq("h1").unwrap()).is_none());
    assert_eq!(session.profiles().side(Color::Black).count(), 15);
    assert!(session.profiles().is_consistent_with(session.position()));
}

#[test]
fn short_castle_carries_both_profiles() {
    let mut session = zero_session();
    session.start_from(
        Position::from_fen("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq - 0 1").unwrap(),
    );
    let king = session.profiles().get(coord_to_sq("e1").unwrap()).unwrap().snapshot();

    let report = session.command("O-O");
    assert!(report.outcome.as_ref().is_some_and(MoveOutcome::is_success));
    let g1 = session.profiles().get(coord_to_sq("g1").unwrap()).unwrap();
    assert_eq!(g1.snapshot(), king);
    assert!(session.profiles().get(coord_to_sq("f1").unwrap()).is_some());
    assert!(session.profiles().get(coord_to_sq("h1").unwrap()).is_none());
}

#[test]
fn a_short_game_reaches_a_verdict() {
    let mut session = zero_session();
    session.start_from(
        Position::from_fen("6k1/5ppp/8/8/8/8/5PPP/R5K1 w - - 0 1").unwrap(),
    );
    let report = session.command("Ra8#");
    assert!(report.outcome.as_ref().is_some_and(MoveOutcome::is_success));
    assert!(report.verdict.unwrap().contains("Black has fallen"));
    assert!(game_status(session.position()).is_over());
}

#[test]
fn seeded_games_keep_profiles_bounded_and_in_sync() {
    const ORDERS: [&str; 14] = [
        "e4",
        "@army hold the line, brave ones!",
        "Nf3",
        "d4",
        "you useless cowards",
        "@knight you are magnificent",
        "Bc4",
        "a1a7",
        "Qd1h5",
        "O-O",
        "@e2 e4",
        "@queen to f7",
        "@troops stats",
        "exd5",
    ];

    for seed in 0..12 {
        let mut session = seeded_session(seed);
        for (turn, order) in ORDERS.iter().cycle().take(42).enumerate() {
            if game_status(session.position()).is_over() {
                break;
            }
            if turn % 7 == 6 {
                embolden(&mut session, Color::White);
            }
            session.command(order);
            assert_bounded(session.profiles());
            assert!(
                session.profiles().is_consistent_with(session.position()),
                "seed {seed}, order {order:?}: profiles out of sync"
            );
        }
    }
}
