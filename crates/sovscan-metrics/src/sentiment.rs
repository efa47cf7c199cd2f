//! Domain-specific lexicon scorer for consumer-appliance sentiment.

/// Scores above this are classified positive.
pub const POSITIVE_THRESHOLD: f64 = 0.1;
/// Scores below this are classified negative.
pub const NEGATIVE_THRESHOLD: f64 = -0.1;

/// Domain-specific word weights.
///
/// Keys are lowercase single words. Values in `(0.0, 1.0]` are positive,
/// in `[-1.0, 0.0)` are negative. The final score is clamped to `[-1.0, 1.0]`.
pub(crate) const LEXICON: &[(&str, f64)] = &[
    // Positive signals
    ("great", 0.4),
    ("good", 0.3),
    ("excellent", 0.5),
    ("best", 0.5),
    ("love", 0.5),
    ("loved", 0.5),
    ("awesome", 0.5),
    ("amazing", 0.5),
    ("recommend", 0.4),
    ("recommended", 0.4),
    ("quality", 0.3),
    ("premium", 0.3),
    ("silent", 0.4),
    ("quiet", 0.4),
    ("smooth", 0.3),
    ("efficient", 0.4),
    ("saving", 0.3),
    ("savings", 0.3),
    ("reliable", 0.4),
    ("durable", 0.4),
    ("worth", 0.3),
    ("happy", 0.4),
    ("perfect", 0.5),
    ("value", 0.3),
    // Negative signals
    ("bad", -0.4),
    ("terrible", -0.6),
    ("worst", -0.6),
    ("noisy", -0.5),
    ("broken", -0.6),
    ("broke", -0.5),
    ("failed", -0.4),
    ("failure", -0.4),
    ("problem", -0.3),
    ("problems", -0.3),
    ("issue", -0.3),
    ("issues", -0.3),
    ("complaint", -0.4),
    ("poor", -0.5),
    ("waste", -0.5),
    ("defective", -0.6),
    ("disappointed", -0.5),
    ("disappointing", -0.5),
    ("refund", -0.4),
    ("wobble", -0.3),
    ("slow", -0.3),
    ("overpriced", -0.4),
];

/// Pluggable polarity-scoring seam for enrichment and metrics.
///
/// Contract: returns `0.0` for empty input; otherwise a value typically in
/// `[-1.0, 1.0]` where `> 0.1` means positive and `< -0.1` means negative.
pub trait SentimentScorer: Send + Sync {
    fn score(&self, text: &str) -> f64;
}

/// Default scorer backed by the domain lexicon.
#[derive(Debug, Default, Clone, Copy)]
pub struct LexiconScorer;

impl SentimentScorer for LexiconScorer {
    fn score(&self, text: &str) -> f64 {
        lexicon_score(text)
    }
}

/// Score a text string using the domain lexicon.
///
/// Splits text into lowercase words, sums matching weights, and clamps
/// the result to `[-1.0, 1.0]`. Returns `0.0` for empty or unknown text.
#[must_use]
pub fn lexicon_score(text: &str) -> f64 {
    let mut score = 0.0_f64;
    for word in text.split_whitespace() {
        let w = word
            .trim_matches(|c: char| !c.is_alphabetic())
            .to_lowercase();
        for &(lex_word, weight) in LEXICON {
            if w == lex_word {
                score += weight;
                break;
            }
        }
    }
    score.clamp(-1.0, 1.0)
}
