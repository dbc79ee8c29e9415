use super::*;

#[test]
fn test_encouragement_is_positive() {
    let s = LexiconSentiment;
    assert!(s.polarity("You are brave and glorious!") > 0.5);
    assert!(s.polarity("@army great work, heroes") > 0.0);
}

#[test]
fn test_insults_are_negative() {
    let s = LexiconSentiment;
    assert!(s.polarity("You pathetic cowards") < -0.5);
}

#[test]
fn test_negation_flips_and_softens() {
    let s = LexiconSentiment;
    let plain = s.polarity("good");
    let negated = s.polarity("not good");
    assert!(negated < 0.0);
    assert!(negated.abs() < plain.abs());
}

#[test]
fn test_intensifiers_and_bounds() {
    let s = LexiconSentiment;
    assert!(s.polarity("very good") > s.polarity("good"));
    assert_eq!(s.polarity("hold the line"), 0.0);
    let loud = s.polarity("EXTREMELY MAGNIFICENT!!!");
    assert!((-1.0..=1.0).contains(&loud));
    assert_eq!(loud, 1.0);
}
