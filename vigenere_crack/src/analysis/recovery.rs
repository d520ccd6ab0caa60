//! Per-subchannel key recovery for a fixed key length

use log::debug;

use super::scoring::Scorer;
use crate::alphabet::Alphabet;
use crate::cipher::decrypt_index;

/// Splits a sequence into `key_length` interleaved subchannels.
///
/// Subchannel `p` holds every symbol whose index is `p mod key_length`.
pub fn split_subchannels(sequence: &[char], key_length: usize) -> Vec<Vec<char>> {
    if key_length == 0 {
        return Vec::new();
    }

    let mut channels = vec![Vec::with_capacity(sequence.len() / key_length + 1); key_length];
    for (i, &c) in sequence.iter().enumerate() {
        channels[i % key_length].push(c);
    }
    channels
}

/// Decrypts a subchannel as a pure Caesar shift over `alphabet`.
pub fn caesar_decrypt(channel: &[char], shift: usize, alphabet: &Alphabet) -> String {
    channel
        .iter()
        .map(|&c| match alphabet.index_of(c) {
            Some(index) => alphabet.symbol(decrypt_index(index, shift, alphabet.len())),
            None => c,
        })
        .collect()
}

/// The shift whose decryption of `channel` scores best; lowest shift wins ties.
pub fn best_shift(channel: &[char], alphabet: &Alphabet, scorer: &Scorer) -> usize {
    let mut best = 0;
    let mut best_score = f64::NEG_INFINITY;

    for shift in 0..alphabet.len() {
        let score = scorer.score_partial(&caesar_decrypt(channel, shift, alphabet));
        if score > best_score {
            best_score = score;
            best = shift;
        }
    }

    best
}

/// Recovers the most likely key of `key_length` symbols.
///
/// Each key position is solved independently as a monoalphabetic shift.
/// Positions with an empty subchannel fall back to shift 0.
pub fn recover_key(projected: &[char], key_length: usize, alphabet: &Alphabet, scorer: &Scorer) -> String {
    if alphabet.is_empty() {
        return String::new();
    }

    let key: String = split_subchannels(projected, key_length)
        .iter()
        .map(|channel| alphabet.symbol(best_shift(channel, alphabet, scorer)))
        .collect();

    debug!("recovered key {:?} for length {}", key, key_length);
    key
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::patterns::extract_alphabet_only;
    use crate::cipher::encrypt;

    const TEXT: &str = "Whenever I find myself growing grim about the mouth and whenever it \
        is a damp drizzly November in my soul then I account it high time to get to sea as \
        soon as I can. This is my substitute for pistol and ball. There is nothing surprising \
        in this. If they but knew it almost all men in their degree some time or other \
        cherish very nearly the same feelings towards the ocean with me. There now is your \
        insular city of the Manhattoes, belted round by wharves as Indian isles by coral reefs; \
        commerce surrounds it with her surf. Right and left, the streets take you waterward. \
        Its extreme downtown is the battery, where that noble mole is washed by waves, and \
        cooled by breezes, which a few hours previous were out of sight of land.";

    #[test]
    fn test_split_text() {
        let sequence: Vec<char> = "ABCDEFGH".chars().collect();
        let channels = split_subchannels(&sequence, 3);
        assert_eq!(channels[0], vec!['A', 'D', 'G']);
        assert_eq!(channels[1], vec!['B', 'E', 'H']);
        assert_eq!(channels[2], vec!['C', 'F']);
        assert!(split_subchannels(&sequence, 0).is_empty());
    }

    #[test]
    fn test_caesar_decrypt() {
        let channel: Vec<char> = "DEF".chars().collect();
        assert_eq!(caesar_decrypt(&channel, 3, &Alphabet::standard()), "ABC");
    }

    #[test]
    fn test_empty_channel_takes_lowest_shift() {
        assert_eq!(best_shift(&[], &Alphabet::standard(), &Scorer::english()), 0);
    }

    #[test]
    fn test_key_longer_than_text() {
        let sequence: Vec<char> = "AB".chars().collect();
        let key = recover_key(&sequence, 5, &Alphabet::standard(), &Scorer::english());
        assert_eq!(key.chars().count(), 5);
        assert!(key.ends_with("AAA"));
    }

    #[test]
    fn test_recovers_key_from_prose() {
        let alphabet = Alphabet::standard();
        let ciphertext = encrypt(TEXT, "LEMON", &alphabet);
        let projection = extract_alphabet_only(&ciphertext, &alphabet);

        let key = recover_key(&projection.symbols, 5, &alphabet, &Scorer::english());
        assert_eq!(key, "LEMON");
    }

    #[test]
    fn test_recovers_key_over_keyed_alphabet() {
        let alphabet = Alphabet::build("ABCDEFGHIJKLMNOPQRSTUVWXYZ", "KRYPTOS");
        let ciphertext = encrypt(TEXT, "ABC", &alphabet);
        let projection = extract_alphabet_only(&ciphertext, &alphabet);

        let key = recover_key(&projection.symbols, 3, &alphabet, &Scorer::english());
        assert_eq!(key, "ABC");
    }
}
