//! Text normalization for enrichment.
//!
//! The tokenizer/lemmatizer internals are swappable via [`TextPreprocessor`];
//! the filtering policy (stop-word removal, minimum token length 3) is part
//! of the engine's contract and lives here.

use std::sync::LazyLock;

use regex::Regex;

static URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(?:https?://|www\.)\S+").expect("static URL regex"));

/// Common English stop words removed during preprocessing.
const STOP_WORDS: &[&str] = &[
    "about", "after", "again", "all", "also", "and", "any", "are", "because", "been", "before",
    "being", "but", "can", "could", "did", "does", "doing", "down", "during", "each", "few",
    "for", "from", "further", "had", "has", "have", "having", "her", "here", "him", "his", "how",
    "into", "its", "just", "more", "most", "not", "now", "off", "once", "only", "other", "our",
    "out", "over", "own", "same", "she", "should", "some", "such", "than", "that", "the", "their",
    "them", "then", "there", "these", "they", "this", "those", "through", "too", "under", "until",
    "very", "was", "were", "what", "when", "where", "which", "while", "who", "whom", "why", "will",
    "with", "would", "you", "your",
];

/// Pluggable text-normalization seam for enrichment.
pub trait TextPreprocessor: Send + Sync {
    /// Normalize free text for scoring. Empty/non-text input yields an
    /// empty string.
    fn preprocess(&self, text: &str) -> String;
}

/// Default preprocessor: lowercase, strip URLs and punctuation, collapse
/// whitespace, drop stop words and tokens of length ≤ 2, lemmatize.
#[derive(Debug, Default, Clone, Copy)]
pub struct SimplePreprocessor;

impl TextPreprocessor for SimplePreprocessor {
    fn preprocess(&self, text: &str) -> String {
        normalize_text(text)
    }
}

/// Normalize free text into a space-joined token string.
#[must_use]
pub fn normalize_text(text: &str) -> String {
    let lowered = text.to_lowercase();
    let without_urls = URL_RE.replace_all(&lowered, " ");

    let stripped: String = without_urls
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();

    stripped
        .split_whitespace()
        .filter(|token| token.len() > 2 && !STOP_WORDS.contains(token))
        .map(lemmatize)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Lightweight noun lemmatizer: strips common plural suffixes.
fn lemmatize(token: &str) -> String {
    if let Some(stem) = token.strip_suffix("ies") {
        if stem.len() >= 2 {
            return format!("{stem}y");
        }
    }
    if let Some(stem) = token.strip_suffix("sses") {
        return format!("{stem}ss");
    }
    if let Some(stem) = token.strip_suffix('s') {
        if stem.len() > 2 && !stem.ends_with('s') && !stem.ends_with('u') && !stem.ends_with('i') {
            return stem.to_string();
        }
    }
    token.to_string()
}
