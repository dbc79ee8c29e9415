use super::*;
use chess_core::{coord_to_sq, Color, Position};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn profile(values: Snapshot) -> PieceProfile {
    PieceProfile::new(coord_to_sq("e2").unwrap(), Color::White, values)
}

#[test]
fn test_mutations_clamp_to_bounds() {
    let mut p = profile(Snapshot {
        loyalty: 50.0,
        motivation: 50.0,
        morale: 50.0,
        trust: 50.0,
        empathy: 50.0,
    });
    p.adjust(Attribute::Morale, 500.0);
    p.adjust(Attribute::Trust, -500.0);
    p.set(Attribute::Loyalty, f64::NAN);
    assert_eq!(p.morale(), 100.0);
    assert_eq!(p.trust(), 0.0);
    assert_eq!(p.loyalty(), 0.0);

    let clamped = profile(Snapshot {
        loyalty: 140.0,
        motivation: -3.0,
        morale: 20.0,
        trust: 30.0,
        empathy: 40.0,
    });
    assert_eq!(clamped.loyalty(), 100.0);
    assert_eq!(clamped.motivation(), 0.0);
}

#[test]
fn test_average_and_belief() {
    let p = profile(Snapshot {
        loyalty: 90.0,
        motivation: 10.0,
        morale: 60.0,
        trust: 30.0,
        empathy: 60.0,
    });
    assert_eq!(p.average(), 50.0);
    assert_eq!(p.belief(), 60.0);
    assert_eq!(p.snapshot().get(Attribute::Motivation), 10.0);
}

#[test]
fn test_seeded_profiles_start_in_their_ranges() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..200 {
        let p = PieceProfile::seeded(0, Color::Black, &mut rng);
        assert!((60.0..=80.0).contains(&p.loyalty()));
        assert!((60.0..=80.0).contains(&p.motivation()));
        assert!((60.0..=80.0).contains(&p.morale()));
        assert!((50.0..=70.0).contains(&p.trust()));
        assert!((40.0..=60.0).contains(&p.empathy()));
    }
}

#[test]
fn test_attribute_names_parse_case_insensitively() {
    assert_eq!("Morale".parse::<Attribute>(), Ok(Attribute::Morale));
    assert_eq!(" TRUST ".parse::<Attribute>(), Ok(Attribute::Trust));
    assert_eq!(
        "courage".parse::<Attribute>(),
        Err(UnknownAttribute("courage".to_string()))
    );
    assert_eq!(Attribute::Empathy.to_string(), "empathy");
}

#[test]
fn test_table_seeds_one_profile_per_piece_in_square_order() {
    let pos = Position::startpos();
    let table = ProfileTable::seed(&pos, &mut StdRng::seed_from_u64(3));
    assert_eq!(table.len(), 32);
    assert!(table.is_consistent_with(&pos));
    assert_eq!(table.side(Color::White).count(), 16);

    let squares: Vec<_> = table.iter().map(|p| p.square).collect();
    let mut sorted = squares.clone();
    sorted.sort_unstable();
    assert_eq!(squares, sorted);
    assert_eq!(table.get(coord_to_sq("e8").unwrap()).map(|p| p.side), Some(Color::Black));
}

#[test]
fn test_consistency_detects_drift() {
    let pos = Position::startpos();
    let mut table = ProfileTable::seed(&pos, &mut StdRng::seed_from_u64(3));
    let e2 = coord_to_sq("e2").unwrap();

    let mut moved = table.remove(e2).unwrap();
    assert!(!table.is_consistent_with(&pos));

    moved.square = coord_to_sq("e4").unwrap();
    table.insert(moved);
    assert_eq!(table.len(), 32);
    assert!(!table.is_consistent_with(&pos));
}
