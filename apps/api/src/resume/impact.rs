//! Quantified-impact detection for experience prose.

use once_cell::sync::Lazy;
use regex::Regex;

const VAGUE_VERBS: &[&str] = &[
    "improved",
    "enhanced",
    "helped",
    "worked on",
    "assisted",
    "supported",
    "participated",
    "involved",
];

const VAGUE_SCALE_WORDS: &[&str] = &[
    "significant",
    "major",
    "large",
    "huge",
    "massive",
    "substantial",
    "considerable",
    "many",
    "numerous",
    "various",
    "several",
];

const CURRENCY_SYMBOLS: &[char] = &['$', '€', '£', '¥', '₹'];

static IMPACT_WORDS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(users|years|yrs|rps|qps|tps|million|billion)\b").unwrap()
});

/// True when the text carries a measurable outcome.
///
/// Any digit counts, as do `%`, currency symbols and a few scale words
/// (users, years, request rates, million/billion).
pub fn is_quantified(text: &str) -> bool {
    text.chars().any(|c| c.is_ascii_digit())
        || text.contains('%')
        || text.contains(CURRENCY_SYMBOLS)
        || IMPACT_WORDS.is_match(text)
}

/// Advice for unquantified text, naming the first vague wording found.
pub fn quantify_advice(text: &str) -> String {
    let text_lower = text.to_lowercase();

    if let Some(verb) = VAGUE_VERBS.iter().find(|v| text_lower.contains(*v)) {
        return format!(
            "Quantify '{verb}' in your experience: how much, how many, how fast? Add a number, percentage, or amount."
        );
    }
    if let Some(word) = VAGUE_SCALE_WORDS.iter().find(|w| text_lower.contains(*w)) {
        return format!(
            "Replace '{word}' in your experience with a specific number or percentage."
        );
    }
    "Add measurable results to your experience (numbers, %, $, users served).".to_string()
}
