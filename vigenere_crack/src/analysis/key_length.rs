//! Key length estimation from Kasiski distances and index of coincidence

use std::collections::{BTreeMap, HashMap};
use std::ops::RangeInclusive;

use log::{debug, trace};

use super::patterns::PatternTable;
use super::recovery::split_subchannels;

/// Highest key length the estimator will ever vote for.
pub const MAX_KEY_LENGTH_CEILING: usize = 50;

/// Accumulated factor votes per candidate key length.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VoteTable {
    votes: BTreeMap<usize, usize>,
}

impl VoteTable {
    pub fn get(&self, length: usize) -> usize {
        self.votes.get(&length).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.votes.is_empty()
    }

    /// Candidate lengths by vote count, ties broken by the shorter length.
    pub fn ranked(&self) -> Vec<(usize, usize)> {
        let mut ranked: Vec<(usize, usize)> = self.votes.iter().map(|(&l, &v)| (l, v)).collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        ranked
    }
}

/// Counts one vote per factor `2..=max_key_len` of every pairwise repeat distance.
pub fn count_votes(patterns: &PatternTable, max_key_len: usize) -> VoteTable {
    let max_key_len = max_key_len.min(MAX_KEY_LENGTH_CEILING);
    let mut table = VoteTable::default();

    for pattern in patterns {
        for distance in pattern.pair_distances() {
            for factor in 2..=distance.min(max_key_len) {
                if distance % factor == 0 {
                    *table.votes.entry(factor).or_insert(0) += 1;
                }
            }
        }
    }

    trace!("factor votes: {:?}", table.votes);
    table
}

/// Returns the `top_n` most voted key lengths. Empty when nothing repeats.
pub fn estimate_key_lengths(patterns: &PatternTable, max_key_len: usize, top_n: usize) -> Vec<usize> {
    let candidates: Vec<usize> = count_votes(patterns, max_key_len)
        .ranked()
        .into_iter()
        .take(top_n)
        .map(|(length, _)| length)
        .collect();

    debug!("Kasiski candidate key lengths: {:?}", candidates);
    candidates
}

/// Calculates the Index of Coincidence of a symbol sequence.
///
/// Returns 0.0 for fewer than two symbols.
pub fn index_of_coincidence(symbols: &[char]) -> f64 {
    let total = symbols.len();
    if total < 2 {
        return 0.0;
    }

    let mut counts: HashMap<char, usize> = HashMap::new();
    for &c in symbols {
        *counts.entry(c).or_insert(0) += 1;
    }

    let numerator: f64 = counts
        .values()
        .map(|&n| (n * n.saturating_sub(1)) as f64)
        .sum();
    numerator / (total * (total - 1)) as f64
}

/// Orders a fallback range of key lengths by average subchannel IC, highest first.
///
/// Used when no repeated patterns are available to vote with. Lengths whose
/// subchannels are all shorter than two symbols are dropped.
pub fn rank_by_coincidence(sequence: &[char], lengths: RangeInclusive<usize>) -> Vec<usize> {
    let mut scored: Vec<(usize, f64)> = Vec::new();

    for key_length in lengths.filter(|&l| l > 0) {
        let channels = split_subchannels(sequence, key_length);
        let valid: Vec<f64> = channels
            .iter()
            .filter(|channel| channel.len() >= 2)
            .map(|channel| index_of_coincidence(channel))
            .collect();

        if valid.is_empty() {
            continue;
        }
        let average = valid.iter().sum::<f64>() / valid.len() as f64;
        scored.push((key_length, average));
    }

    scored.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
    scored.into_iter().map(|(length, _)| length).collect()
}
