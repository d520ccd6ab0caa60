//! Keyed Caesar-shift (Vigenère) cipher over an arbitrary alphabet

use crate::alphabet::Alphabet;
use crate::utils::{match_case, shift_index};

/// Plain index for one symbol: `(cipher_index - key_index) mod alphabet_size`.
pub fn decrypt_index(cipher_index: usize, key_index: usize, alphabet_size: usize) -> usize {
    shift_index(cipher_index, -(key_index as i64), alphabet_size)
}

/// Cipher index for one symbol: `(plain_index + key_index) mod alphabet_size`.
pub fn encrypt_index(plain_index: usize, key_index: usize, alphabet_size: usize) -> usize {
    shift_index(plain_index, key_index as i64, alphabet_size)
}

/// Resolve a key to alphabet indices. Key symbols outside the alphabet are dropped.
pub fn key_indices(key: &str, alphabet: &Alphabet) -> Vec<usize> {
    key.chars().filter_map(|c| alphabet.index_of(c)).collect()
}

/// Decrypts `ciphertext` with a repeating `key`.
///
/// Symbols outside the alphabet pass through unchanged and do not advance
/// the key cursor. The case of every symbol is preserved.
///
/// # Example
///
/// ```rust
/// use vigenere_crack::{Alphabet, cipher};
///
/// let plain = cipher::decrypt("Lxfopv ef rnhr!", "LEMON", &Alphabet::standard());
/// assert_eq!(plain, "Attack at dawn!");
/// ```
pub fn decrypt(ciphertext: &str, key: &str, alphabet: &Alphabet) -> String {
    apply(ciphertext, key, alphabet, decrypt_index)
}

/// Encrypts `plaintext` with a repeating `key`; the inverse of [`decrypt`].
pub fn encrypt(plaintext: &str, key: &str, alphabet: &Alphabet) -> String {
    apply(plaintext, key, alphabet, encrypt_index)
}

fn apply(
    content: &str,
    key: &str,
    alphabet: &Alphabet,
    step: fn(usize, usize, usize) -> usize,
) -> String {
    let key = key_indices(key, alphabet);
    if key.is_empty() || alphabet.is_empty() {
        return content.to_string();
    }

    let mut result = String::with_capacity(content.len());
    let mut cursor: usize = 0;

    for c in content.chars() {
        match alphabet.index_of(c) {
            Some(index) => {
                let shifted = step(index, key[cursor % key.len()], alphabet.len());
                result.push(match_case(alphabet.symbol(shifted), c));
                cursor += 1;
            }
            None => result.push(c),
        }
    }

    result
}
