//! # Vigenère Crack Library
//!
//! Automated cryptanalysis of Vigenère-family ciphers without knowledge of the key.
//!
//! ## Pipeline
//!
//! - **Pattern index** - repeated substrings of the alphabet-only ciphertext
//! - **Key length estimation** - Kasiski factor voting over repeat distances
//! - **Key recovery** - per-subchannel Caesar solving by chi-square scoring
//! - **Local search** - single-position ±1 refinement of each recovered key
//! - **Ranking** - English plausibility score over whole plaintexts
//!
//! ## Usage
//!
//! ```rust
//! use vigenere_crack::{Alphabet, AttackConfig, CancellationToken, KasiskiAttack};
//!
//! let alphabet = Alphabet::build("ABCDEFGHIJKLMNOPQRSTUVWXYZ", "");
//! let attack = KasiskiAttack::new("LXFOPVEFRNHR", alphabet);
//!
//! let patterns = attack.find_repeated_patterns(3, 10);
//! let lengths = vigenere_crack::estimate_key_lengths(&patterns, 20, 5);
//! let lengths = if lengths.is_empty() { vec![5] } else { lengths };
//!
//! let token = CancellationToken::new();
//! let outcome = attack.attack_using_kasiski(&lengths, 10, &token);
//! assert!(!outcome.is_cancelled());
//!
//! let outcome = attack.run(&AttackConfig::default(), &token)?;
//! assert!(!outcome.results().is_empty());
//! # Ok::<(), vigenere_crack::CrackError>(())
//! ```

pub mod alphabet;
pub mod analysis;
pub mod attack;
pub mod cancel;
pub mod cipher;
pub mod config;
pub mod error;
pub mod segment;
pub mod utils;

pub use alphabet::{Alphabet, STANDARD_ALPHABET};
pub use analysis::{estimate_key_lengths, PatternTable, Projection, RepeatedPattern, Scorer};
pub use attack::{AttackOutcome, AttackResult, KasiskiAttack};
pub use cancel::{CancellationSignal, CancellationToken, NeverCancel};
pub use config::AttackConfig;
pub use error::{CrackError, Result};
pub use segment::{Segmentation, Segmenter};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Builds a keyed alphabet. See [`Alphabet::build`].
pub fn build_alphabet(base: &str, key_phrase: &str) -> Alphabet {
    Alphabet::build(base, key_phrase)
}
