//! English plausibility scoring for candidate plaintexts

use std::collections::HashSet;

/// English letter frequencies for A–Z, in percent.
pub const ENGLISH_FREQUENCIES: [f64; 26] = [
    8.167, 1.492, 2.782, 4.253, 12.702, 2.228, 2.015, 6.094, 6.966, 0.153, 0.772, 4.025, 2.406,
    6.749, 7.507, 1.929, 0.095, 5.987, 6.327, 9.056, 2.758, 0.978, 2.360, 0.150, 1.974, 0.074,
];

/// Common English words rewarded by [`Scorer::score`].
pub const STOP_WORDS: &[&str] = &[
    "the", "be", "to", "of", "and", "in", "that", "have", "it", "for", "not", "on", "with", "he",
    "as", "you", "do", "at", "this", "but", "his", "by", "from", "they", "we", "say", "her",
    "she", "or", "an", "will", "my", "one", "all", "would", "there", "their", "what", "so",
    "up", "out", "if", "about", "who", "get", "which", "go", "me", "is", "are", "was", "were",
    "has", "had", "been", "can", "no", "when", "him", "them", "its", "than", "then", "into",
];

/// Punctuation that splits tokens in addition to whitespace.
const TOKEN_DELIMITERS: &[char] = &[
    '.', ',', ';', ':', '!', '?', '"', '\'', '(', ')', '[', ']', '{', '}', '-', '/',
];

const STOP_WORD_BONUS: f64 = 20.0;
const SPACE_DIVISOR: f64 = 5.0;
const MIN_TOKEN_LEN: usize = 2;
/// Sample size at which partial scores are no longer discounted.
const FULL_WEIGHT_LENGTH: f64 = 20.0;

/// Stateless scorer owning its reference tables.
#[derive(Debug, Clone)]
pub struct Scorer {
    frequencies: [f64; 26],
    stop_words: HashSet<&'static str>,
}

impl Default for Scorer {
    fn default() -> Self {
        Self::english()
    }
}

impl Scorer {
    pub fn english() -> Self {
        Scorer {
            frequencies: ENGLISH_FREQUENCIES,
            stop_words: STOP_WORDS.iter().copied().collect(),
        }
    }

    /// Chi-square distance between the A–Z histogram of `text` and the reference table.
    ///
    /// Lower is more English-like. Text without any A–Z letter scores
    /// `f64::INFINITY`.
    pub fn chi_square(&self, text: &str) -> f64 {
        let counts = count_letters(text);
        let total: u32 = counts.iter().sum();
        if total == 0 {
            return f64::INFINITY;
        }

        let total = total as f64;
        counts
            .iter()
            .zip(self.frequencies.iter())
            .map(|(&observed, &percent)| {
                let expected = percent / 100.0 * total;
                (observed as f64 - expected).powi(2) / expected
            })
            .sum()
    }

    /// Number of whitespace/punctuation separated tokens that are stop words.
    pub fn stop_word_hits(&self, text: &str) -> usize {
        text.split(|c: char| c.is_whitespace() || TOKEN_DELIMITERS.contains(&c))
            .filter(|token| token.chars().count() >= MIN_TOKEN_LEN)
            .filter(|token| self.stop_words.contains(token.to_lowercase().as_str()))
            .count()
    }

    /// Whole-candidate score, higher is better.
    ///
    /// `-chi_square + 20 * stop_word_hits + spaces / 5`, or
    /// `f64::NEG_INFINITY` when `text` has no letters.
    pub fn score(&self, text: &str) -> f64 {
        let chi = self.chi_square(text);
        if chi.is_infinite() {
            return f64::NEG_INFINITY;
        }

        let spaces = text.chars().filter(|&c| c == ' ').count() as f64;
        -chi + STOP_WORD_BONUS * self.stop_word_hits(text) as f64 + spaces / SPACE_DIVISOR
    }

    /// Subchannel score: `-chi_square` scaled by `min(1, len / 20)`.
    ///
    /// Short samples are compressed toward zero so they do not dominate.
    pub fn score_partial(&self, text: &str) -> f64 {
        let chi = self.chi_square(text);
        if chi.is_infinite() {
            return f64::NEG_INFINITY;
        }

        -chi * length_weight(text.chars().count())
    }
}

/// Confidence weight of a sample of `len` symbols.
pub fn length_weight(len: usize) -> f64 {
    (len as f64 / FULL_WEIGHT_LENGTH).min(1.0)
}

/// Counts A–Z letters case-insensitively.
fn count_letters(text: &str) -> [u32; 26] {
    let mut counts = [0u32; 26];
    for c in text.chars() {
        if c.is_ascii_alphabetic() {
            counts[(c.to_ascii_uppercase() as u8 - b'A') as usize] += 1;
        }
    }
    counts
}
