//! Kasiski attack orchestration over candidate key lengths

use std::collections::HashSet;

use log::{debug, info};

use crate::alphabet::Alphabet;
use crate::analysis::{
    estimate_key_lengths, extract_alphabet_only, find_repeats, rank_by_coincidence, recover_key,
    PatternTable, Projection, Scorer,
};
use crate::cancel::CancellationSignal;
use crate::cipher;
use crate::config::AttackConfig;
use crate::error::Result;
use crate::segment::{Segmentation, Segmenter};
use crate::utils::{fold_case, shift_index};

/// One evaluated key.
#[derive(Debug, Clone, PartialEq)]
pub struct AttackResult {
    pub key: String,
    pub plaintext: String,
    /// Segmented plaintext, when a segmenter is configured and honoured its contract.
    pub segmented: Option<String>,
    pub score: f64,
}

impl AttackResult {
    /// The segmented text if present, otherwise the raw decryption.
    pub fn text(&self) -> &str {
        self.segmented.as_deref().unwrap_or(&self.plaintext)
    }

    pub fn key_length(&self) -> usize {
        self.key.chars().count()
    }
}

/// How an attack ended.
#[derive(Debug, Clone, PartialEq)]
pub enum AttackOutcome {
    /// Every candidate length was processed.
    Completed(Vec<AttackResult>),
    /// Cancellation was observed before a candidate length started.
    ///
    /// `partial` holds the ranked results of the `lengths_processed` lengths
    /// that finished before the request.
    Cancelled {
        partial: Vec<AttackResult>,
        lengths_processed: usize,
    },
}

impl AttackOutcome {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, AttackOutcome::Cancelled { .. })
    }

    pub fn results(&self) -> &[AttackResult] {
        match self {
            AttackOutcome::Completed(results) => results,
            AttackOutcome::Cancelled { partial, .. } => partial,
        }
    }

    pub fn into_results(self) -> Vec<AttackResult> {
        match self {
            AttackOutcome::Completed(results) => results,
            AttackOutcome::Cancelled { partial, .. } => partial,
        }
    }

    pub fn best(&self) -> Option<&AttackResult> {
        self.results().first()
    }
}

/// A ciphertext bound to its alphabet, scorer and optional segmenter.
///
/// # Example
///
/// ```rust
/// use vigenere_crack::{Alphabet, KasiskiAttack, NeverCancel};
///
/// let attack = KasiskiAttack::new("LXFOPVEFRNHR", Alphabet::standard());
/// assert_eq!(attack.decrypt_with_key("LEMON"), "ATTACKATDAWN");
///
/// let outcome = attack.attack_using_kasiski(&[5], 3, &NeverCancel);
/// assert!(outcome.results().iter().all(|r| r.key.len() == 5));
/// ```
#[derive(Debug)]
pub struct KasiskiAttack {
    ciphertext: String,
    alphabet: Alphabet,
    projection: Projection,
    scorer: Scorer,
    segmentation: Segmentation,
    local_variants: usize,
}

impl KasiskiAttack {
    pub fn new(ciphertext: impl Into<String>, alphabet: Alphabet) -> Self {
        let ciphertext = ciphertext.into();
        let projection = extract_alphabet_only(&ciphertext, &alphabet);
        KasiskiAttack {
            ciphertext,
            alphabet,
            projection,
            scorer: Scorer::english(),
            segmentation: Segmentation::Disabled,
            local_variants: AttackConfig::default().local_variants,
        }
    }

    pub fn with_segmenter<S: Segmenter + 'static>(mut self, segmenter: S) -> Self {
        self.segmentation = Segmentation::enabled(segmenter);
        self
    }

    pub fn with_segmentation(mut self, segmentation: Segmentation) -> Self {
        self.segmentation = segmentation;
        self
    }

    pub fn with_scorer(mut self, scorer: Scorer) -> Self {
        self.scorer = scorer;
        self
    }

    /// Number of local-search variants kept per candidate length.
    pub fn with_local_variants(mut self, local_variants: usize) -> Self {
        self.local_variants = local_variants;
        self
    }

    pub fn ciphertext(&self) -> &str {
        &self.ciphertext
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    /// Repeated substrings of the alphabet-only ciphertext.
    pub fn find_repeated_patterns(&self, min_len: usize, max_len: usize) -> PatternTable {
        find_repeats(&self.projection.symbols, min_len, max_len)
    }

    /// Decrypts the bound ciphertext with `key`.
    pub fn decrypt_with_key(&self, key: &str) -> String {
        cipher::decrypt(&self.ciphertext, key, &self.alphabet)
    }

    /// Decrypts, segments and scores one key.
    pub fn evaluate(&self, key: &str) -> AttackResult {
        let plaintext = self.decrypt_with_key(key);
        let segmented = self.segmentation.apply(&plaintext);
        let score = self.scorer.score(segmented.as_deref().unwrap_or(&plaintext));

        AttackResult {
            key: key.to_string(),
            plaintext,
            segmented,
            score,
        }
    }

    /// Attacks each candidate length in order and returns the `top_results` best keys.
    ///
    /// For every length the independently recovered key is evaluated, then
    /// every single-position ±1 shift of it; the best `local_variants` of
    /// those are kept. Keys are never evaluated twice. `cancel` is polled
    /// before each length starts.
    pub fn attack_using_kasiski<S>(&self, candidate_lengths: &[usize], top_results: usize, cancel: &S) -> AttackOutcome
    where
        S: CancellationSignal + ?Sized,
    {
        let mut tried: HashSet<String> = HashSet::new();
        let mut attempted_lengths: HashSet<usize> = HashSet::new();
        let mut results: Vec<AttackResult> = Vec::new();
        let mut lengths_processed = 0;

        for &key_length in candidate_lengths {
            if cancel.is_cancelled() {
                info!("attack cancelled after {} key lengths", lengths_processed);
                return AttackOutcome::Cancelled {
                    partial: rank(results, top_results),
                    lengths_processed,
                };
            }
            if self.projection.is_empty() {
                break;
            }
            if key_length == 0 || !attempted_lengths.insert(key_length) {
                continue;
            }

            debug!("attacking key length {}", key_length);
            let baseline = recover_key(&self.projection.symbols, key_length, &self.alphabet, &self.scorer);
            if tried.insert(normalize(&baseline)) {
                results.push(self.evaluate(&baseline));
            }

            let mut local: Vec<AttackResult> = neighbours(&baseline, &self.alphabet)
                .into_iter()
                .filter(|variant| tried.insert(normalize(variant)))
                .map(|variant| self.evaluate(&variant))
                .collect();
            sort_by_score(&mut local);
            local.truncate(self.local_variants);
            results.extend(local);

            lengths_processed += 1;
        }

        let results = rank(results, top_results);
        info!(
            "attack finished: {} key lengths, best key {:?}",
            lengths_processed,
            results.first().map(|r| r.key.as_str())
        );
        AttackOutcome::Completed(results)
    }

    /// Candidate key lengths by Kasiski voting, falling back to an IC ranking
    /// of `config.fallback_lengths` when nothing repeats.
    pub fn candidate_lengths(&self, config: &AttackConfig) -> Vec<usize> {
        let patterns = self.find_repeated_patterns(config.min_pattern_len, config.max_pattern_len);
        let candidates = estimate_key_lengths(&patterns, config.max_key_len, config.top_lengths);
        if !candidates.is_empty() {
            return candidates;
        }

        debug!("no repeated patterns, ranking fallback lengths {:?}", config.fallback_lengths);
        let mut ranked = rank_by_coincidence(&self.projection.symbols, config.fallback_lengths.clone());
        if ranked.is_empty() {
            ranked = config.fallback_lengths.clone().collect();
        }
        ranked.truncate(config.top_lengths);
        ranked
    }

    /// Full pipeline: pattern index, length estimation and attack.
    pub fn run<S>(&self, config: &AttackConfig, cancel: &S) -> Result<AttackOutcome>
    where
        S: CancellationSignal + ?Sized,
    {
        config.validate()?;
        let lengths = self.candidate_lengths(config);
        Ok(self.attack_using_kasiski(&lengths, config.top_results, cancel))
    }
}

/// Every key differing from `key` by ±1 shift at exactly one position.
pub fn neighbours(key: &str, alphabet: &Alphabet) -> Vec<String> {
    let indices = cipher::key_indices(key, alphabet);
    let mut variants = Vec::with_capacity(indices.len() * 2);

    for position in 0..indices.len() {
        for delta in [1i64, -1] {
            let variant: String = indices
                .iter()
                .enumerate()
                .map(|(i, &index)| {
                    if i == position {
                        alphabet.symbol(shift_index(index, delta, alphabet.len()))
                    } else {
                        alphabet.symbol(index)
                    }
                })
                .collect();
            variants.push(variant);
        }
    }

    variants
}

fn normalize(key: &str) -> String {
    key.chars().map(fold_case).collect()
}

fn sort_by_score(results: &mut [AttackResult]) {
    results.sort_by(|a, b| b.score.total_cmp(&a.score));
}

fn rank(mut results: Vec<AttackResult>, top_results: usize) -> Vec<AttackResult> {
    sort_by_score(&mut results);
    results.truncate(top_results);
    results
}
