//! Alphabet-only projection and repeated substring index

use std::collections::HashMap;

use log::trace;

use crate::alphabet::Alphabet;
use crate::utils::fold_case;

/// The alphabet-only subsequence of a ciphertext.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Projection {
    /// Case-folded alphabet symbols, in ciphertext order.
    pub symbols: Vec<char>,
    /// Character offset of each retained symbol within the original text.
    pub positions: Vec<usize>,
}

impl Projection {
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn as_string(&self) -> String {
        self.symbols.iter().collect()
    }
}

/// Filters `ciphertext` down to alphabet members, recording where each came from.
pub fn extract_alphabet_only(ciphertext: &str, alphabet: &Alphabet) -> Projection {
    let mut projection = Projection::default();
    for (offset, c) in ciphertext.chars().enumerate() {
        if alphabet.contains(c) {
            projection.symbols.push(fold_case(c));
            projection.positions.push(offset);
        }
    }
    projection
}

/// A substring seen at least twice in the projected sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepeatedPattern {
    pub text: String,
    /// Ascending start offsets within the projected sequence.
    pub positions: Vec<usize>,
}

impl RepeatedPattern {
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Distances between every unordered pair of occurrences.
    pub fn pair_distances(&self) -> impl Iterator<Item = usize> + '_ {
        self.positions.iter().enumerate().flat_map(move |(i, &a)| {
            self.positions[i + 1..].iter().map(move |&b| b - a)
        })
    }
}

/// Repeated substrings, longest first; equal lengths ordered by first occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatternTable {
    patterns: Vec<RepeatedPattern>,
}

impl PatternTable {
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RepeatedPattern> {
        self.patterns.iter()
    }

    /// Occurrence positions of `text`, if it repeats.
    pub fn get(&self, text: &str) -> Option<&[usize]> {
        self.patterns
            .iter()
            .find(|p| p.text == text)
            .map(|p| p.positions.as_slice())
    }
}

impl<'a> IntoIterator for &'a PatternTable {
    type Item = &'a RepeatedPattern;
    type IntoIter = std::slice::Iter<'a, RepeatedPattern>;

    fn into_iter(self) -> Self::IntoIter {
        self.patterns.iter()
    }
}

/// Finds every substring of length `min_len..=max_len` occurring at least twice.
///
/// `max_len` is capped at half the sequence length.
pub fn find_repeats(sequence: &[char], min_len: usize, max_len: usize) -> PatternTable {
    let min_len = min_len.max(1);
    let max_len = max_len.min(sequence.len() / 2);
    let mut table = PatternTable::default();

    if min_len > max_len {
        return table;
    }

    for len in (min_len..=max_len).rev() {
        let mut occurrences: HashMap<&[char], Vec<usize>> = HashMap::new();
        for (start, window) in sequence.windows(len).enumerate() {
            occurrences.entry(window).or_default().push(start);
        }

        let mut repeated: Vec<RepeatedPattern> = occurrences
            .into_iter()
            .filter(|(_, positions)| positions.len() >= 2)
            .map(|(window, positions)| RepeatedPattern {
                text: window.iter().collect(),
                positions,
            })
            .collect();
        repeated.sort_by_key(|p| p.positions[0]);

        trace!("{} repeated patterns of length {}", repeated.len(), len);
        table.patterns.extend(repeated);
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_extract_alphabet_only() {
        let projection = extract_alphabet_only("Ab, c!d", &Alphabet::standard());
        assert_eq!(projection.as_string(), "ABCD");
        assert_eq!(projection.positions, vec![0, 1, 4, 6]);
    }

    #[test]
    fn test_projection_is_idempotent() {
        let alphabet = Alphabet::standard();
        let once = extract_alphabet_only("The quick, brown fox -- 42 jumps!", &alphabet);
        let twice = extract_alphabet_only(&once.as_string(), &alphabet);
        assert_eq!(once.symbols, twice.symbols);
    }

    #[test]
    fn test_single_repeat_at_known_offsets() {
        let sequence = chars("ABCDEFGHIJABCKLMNOPQABCRSTUVWXYZ");
        let table = find_repeats(&sequence, 3, 3);
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("ABC"), Some(&[0, 10, 20][..]));
    }

    #[test]
    fn test_longest_patterns_first() {
        let sequence = chars("XYZWQXYZWQ");
        let table = find_repeats(&sequence, 2, 5);
        let lengths: Vec<usize> = table.iter().map(|p| p.len()).collect();
        let mut sorted = lengths.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(lengths, sorted);
        assert_eq!(table.iter().next().map(|p| p.text.as_str()), Some("XYZWQ"));
    }

    #[test]
    fn test_max_len_capped_at_half_sequence() {
        let sequence = chars("ABAB");
        let table = find_repeats(&sequence, 1, 10);
        assert!(table.iter().all(|p| p.len() <= 2));
        assert_eq!(table.get("AB"), Some(&[0, 2][..]));
    }

    #[test]
    fn test_no_repeats() {
        assert!(find_repeats(&chars("ABCDEFG"), 3, 3).is_empty());
        assert!(find_repeats(&[], 3, 5).is_empty());
    }

    #[test]
    fn test_pair_distances() {
        let pattern = RepeatedPattern {
            text: "ABC".to_string(),
            positions: vec![0, 10, 20],
        };
        let distances: Vec<usize> = pattern.pair_distances().collect();
        assert_eq!(distances, vec![10, 20, 10]);
    }
}
