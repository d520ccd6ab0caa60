//! Cryptanalysis passes: pattern index, key length estimation, key recovery and scoring

pub mod key_length;
pub mod patterns;
pub mod recovery;
pub mod scoring;

pub use key_length::{
    count_votes, estimate_key_lengths, index_of_coincidence, rank_by_coincidence, VoteTable,
    MAX_KEY_LENGTH_CEILING,
};
pub use patterns::{extract_alphabet_only, find_repeats, PatternTable, Projection, RepeatedPattern};
pub use recovery::{recover_key, split_subchannels};
pub use scoring::Scorer;
