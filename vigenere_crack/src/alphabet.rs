//! Keyed alphabets used as the substitution domain

use std::collections::HashMap;
use std::fmt;

use crate::utils::fold_case;

/// The standard 26-letter Latin alphabet.
pub const STANDARD_ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// An ordered set of unique, case-folded symbols.
///
/// Defines the bijection symbol ↔ index `[0, len)` that both encryption and
/// decryption arithmetic run on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    symbols: Vec<char>,
    positions: HashMap<char, usize>,
}

impl Alphabet {
    /// Build an alphabet from `base`, moving the symbols of `key_phrase` to the front.
    ///
    /// Key phrase symbols are taken in first-occurrence order and only when
    /// they belong to `base`; the remaining base symbols follow in their
    /// original order. An empty key phrase yields the case-folded base.
    ///
    /// # Example
    ///
    /// ```rust
    /// use vigenere_crack::Alphabet;
    ///
    /// let alphabet = Alphabet::build("ABCDEFGHIJKLMNOPQRSTUVWXYZ", "kryptos");
    /// assert_eq!(alphabet.to_string(), "KRYPTOSABCDEFGHIJLMNQUVWXZ");
    /// ```
    pub fn build(base: &str, key_phrase: &str) -> Self {
        let base_symbols: Vec<char> = base.chars().map(fold_case).collect();
        let mut alphabet = Alphabet {
            symbols: Vec::with_capacity(base_symbols.len()),
            positions: HashMap::with_capacity(base_symbols.len()),
        };

        for c in key_phrase.chars().map(fold_case) {
            if base_symbols.contains(&c) {
                alphabet.push(c);
            }
        }
        for &c in &base_symbols {
            alphabet.push(c);
        }

        alphabet
    }

    /// The plain A–Z alphabet.
    pub fn standard() -> Self {
        Self::build(STANDARD_ALPHABET, "")
    }

    fn push(&mut self, c: char) {
        if !self.positions.contains_key(&c) {
            self.positions.insert(c, self.symbols.len());
            self.symbols.push(c);
        }
    }

    /// Number of symbols.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Index of a symbol, case-insensitively. `None` for symbols outside the alphabet.
    pub fn index_of(&self, c: char) -> Option<usize> {
        self.positions.get(&fold_case(c)).copied()
    }

    /// Symbol stored at `index`, wrapping around the alphabet length.
    pub fn symbol(&self, index: usize) -> char {
        self.symbols[index % self.symbols.len()]
    }

    pub fn contains(&self, c: char) -> bool {
        self.index_of(c).is_some()
    }

    pub fn symbols(&self) -> &[char] {
        &self.symbols
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in &self.symbols {
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_empty_key_phrase_keeps_base_order() {
        let alphabet = Alphabet::build("abcdefghijklmnopqrstuvwxyz", "");
        assert_eq!(alphabet.to_string(), STANDARD_ALPHABET);
    }

    #[test]
    fn test_key_phrase_moves_to_front() {
        let alphabet = Alphabet::build(STANDARD_ALPHABET, "Hello World");
        assert_eq!(alphabet.to_string(), "HELOWRDABCFGIJKMNPQSTUVXYZ");
    }

    #[test]
    fn test_symbols_outside_base_are_ignored() {
        let alphabet = Alphabet::build("ABC", "c-3a!");
        assert_eq!(alphabet.to_string(), "CAB");
    }

    #[test]
    fn test_custom_length_alphabet() {
        let alphabet = Alphabet::build("0123456789", "31");
        assert_eq!(alphabet.len(), 10);
        assert_eq!(alphabet.to_string(), "3102456789");
        assert_eq!(alphabet.index_of('2'), Some(3));
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let alphabet = Alphabet::standard();
        assert_eq!(alphabet.index_of('c'), Some(2));
        assert_eq!(alphabet.index_of('C'), Some(2));
        assert_eq!(alphabet.index_of('?'), None);
        assert_eq!(alphabet.symbol(27), 'B');
    }

    #[test]
    fn test_result_is_permutation_of_base() {
        let phrases = ["", "zebra", "THE QUICK BROWN FOX", "aaaaaaa", "12345", "Mississippi"];
        let base: HashSet<char> = STANDARD_ALPHABET.chars().collect();

        for phrase in phrases {
            let alphabet = Alphabet::build(STANDARD_ALPHABET, phrase);
            let symbols: HashSet<char> = alphabet.symbols().iter().copied().collect();
            assert_eq!(alphabet.len(), 26, "phrase {:?}", phrase);
            assert_eq!(symbols, base, "phrase {:?}", phrase);
        }
    }
}
