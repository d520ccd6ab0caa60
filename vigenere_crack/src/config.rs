//! Tunables for a full Kasiski attack

use std::ops::RangeInclusive;

use crate::analysis::MAX_KEY_LENGTH_CEILING;
use crate::error::{CrackError, Result};

/// Parameters of [`KasiskiAttack::run`](crate::KasiskiAttack::run).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttackConfig {
    /// Shortest repeated substring used as period evidence.
    pub min_pattern_len: usize,
    /// Longest repeated substring searched for.
    pub max_pattern_len: usize,
    /// Largest key length that receives votes (at most 50).
    pub max_key_len: usize,
    /// Number of voted key lengths to attack.
    pub top_lengths: usize,
    /// Number of ranked results returned.
    pub top_results: usize,
    /// Best local-search variants kept per key length.
    pub local_variants: usize,
    /// Key lengths to try when no pattern repeats.
    pub fallback_lengths: RangeInclusive<usize>,
}

impl Default for AttackConfig {
    fn default() -> Self {
        AttackConfig {
            min_pattern_len: 3,
            max_pattern_len: 10,
            max_key_len: 20,
            top_lengths: 5,
            top_results: 10,
            local_variants: 3,
            fallback_lengths: 2..=12,
        }
    }
}

impl AttackConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.min_pattern_len < 2 {
            return Err(invalid("minimum pattern length must be at least 2"));
        }
        if self.min_pattern_len > self.max_pattern_len {
            return Err(invalid(format!(
                "minimum pattern length {} exceeds maximum {}",
                self.min_pattern_len, self.max_pattern_len
            )));
        }
        if !(2..=MAX_KEY_LENGTH_CEILING).contains(&self.max_key_len) {
            return Err(invalid(format!(
                "maximum key length must be within 2..={}",
                MAX_KEY_LENGTH_CEILING
            )));
        }
        if self.top_lengths == 0 || self.top_results == 0 {
            return Err(invalid("top lengths and top results must be positive"));
        }
        if self.fallback_lengths.is_empty() || *self.fallback_lengths.start() == 0 {
            return Err(invalid("fallback key length range must be non-empty and start above 0"));
        }
        Ok(())
    }
}

fn invalid(message: impl Into<String>) -> CrackError {
    CrackError::InvalidConfig(message.into())
}
