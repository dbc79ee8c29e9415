//! Lexicon-based polarity scoring.

use crate::ports::SentimentScorer;

const LEXICON: &[(&str, f64)] = &[
    ("amazing", 0.6),
    ("believe", 0.3),
    ("best", 1.0),
    ("brave", 0.8),
    ("bravery", 0.7),
    ("courage", 0.6),
    ("courageous", 0.7),
    ("fight", 0.2),
    ("glorious", 0.8),
    ("glory", 0.6),
    ("good", 0.7),
    ("great", 0.8),
    ("hero", 0.6),
    ("heroes", 0.6),
    ("honor", 0.5),
    ("hope", 0.4),
    ("love", 0.5),
    ("magnificent", 1.0),
    ("mighty", 0.5),
    ("noble", 0.6),
    ("onward", 0.4),
    ("proud", 0.8),
    ("strong", 0.4),
    ("thank", 0.5),
    ("together", 0.3),
    ("trust", 0.4),
    ("victory", 0.6),
    ("well", 0.4),
    ("win", 0.5),
    ("wonderful", 1.0),
    ("awful", -1.0),
    ("bad", -0.7),
    ("coward", -0.8),
    ("cowards", -0.8),
    ("die", -0.5),
    ("disgrace", -0.8),
    ("fail", -0.5),
    ("failure", -0.6),
    ("fool", -0.6),
    ("fools", -0.6),
    ("hate", -0.8),
    ("lazy", -0.5),
    ("miserable", -0.8),
    ("pathetic", -1.0),
    ("shame", -0.6),
    ("stupid", -0.8),
    ("terrible", -1.0),
    ("traitor", -0.8),
    ("useless", -0.5),
    ("weak", -0.4),
    ("worthless", -0.8),
    ("worst", -1.0),
];

const NEGATIONS: &[&str] = &["not", "no", "never", "don't", "dont", "cannot", "can't", "isn't", "aren't"];

const INTENSIFIERS: &[(&str, f64)] = &[
    ("very", 1.3),
    ("really", 1.3),
    ("so", 1.3),
    ("truly", 1.4),
    ("extremely", 1.5),
    ("incredibly", 1.5),
];

/// Averages lexicon scores of the words in the text. A preceding negation
/// flips and halves a word's score; intensifiers scale it.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexiconSentiment;

impl SentimentScorer for LexiconSentiment {
    fn polarity(&self, text: &str) -> f64 {
        let lower = text.to_lowercase();
        let words: Vec<&str> = lower
            .split(|c: char| !(c.is_alphanumeric() || c == '\'' || c == '@'))
            .filter(|w| !w.is_empty() && !w.starts_with('@'))
            .collect();

        let mut total = 0.0;
        let mut hits = 0usize;
        let mut negate = false;
        let mut boost = 1.0;
        for word in words {
            if NEGATIONS.contains(&word) {
                negate = true;
                continue;
            }
            if let Some(&(_, factor)) = INTENSIFIERS.iter().find(|(w, _)| *w == word) {
                boost *= factor;
                continue;
            }
            if let Some(&(_, score)) = LEXICON.iter().find(|(w, _)| *w == word) {
                let mut s = score * boost;
                if negate {
                    s *= -0.5;
                }
                total += s;
                hits += 1;
            }
            negate = false;
            boost = 1.0;
        }

        let exclaim = 1.0 + 0.1 * text.matches('!').count().min(3) as f64;
        if hits == 0 {
            0.0
        } else {
            (total / hits as f64 * exclaim).clamp(-1.0, 1.0)
        }
    }
}
