//! Dictionary-driven word segmentation of run-on plaintext

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use log::debug;
use thiserror::Error;
use vigenere_crack::Segmenter;

/// Longest dictionary word considered during segmentation.
const MAX_WORD_LEN: usize = 24;

#[derive(Error, Debug)]
pub enum DictionaryError {
    #[error("Failed to read dictionary: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid count {value:?} on dictionary line {line}")]
    InvalidCount { line: usize, value: String },

    #[error("Dictionary contains no words")]
    Empty,
}

/// Unigram word model used to split letter runs into words.
#[derive(Debug, Clone)]
pub struct DictionarySegmenter {
    counts: HashMap<String, u64>,
    total: f64,
    max_word_len: usize,
}

impl DictionarySegmenter {
    /// Loads a dictionary file with one `word [count]` entry per line.
    ///
    /// Blank lines and lines starting with `#` are skipped. A missing count
    /// counts as 1.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, DictionaryError> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, DictionaryError> {
        let mut counts: HashMap<String, u64> = HashMap::new();

        for (number, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let mut fields = line.split_whitespace();
            let Some(word) = fields.next() else {
                continue;
            };
            let count = match fields.next() {
                Some(value) => value.parse::<u64>().map_err(|_| DictionaryError::InvalidCount {
                    line: number + 1,
                    value: value.to_string(),
                })?,
                None => 1,
            };

            *counts.entry(word.to_lowercase()).or_insert(0) += count;
        }

        if counts.is_empty() {
            return Err(DictionaryError::Empty);
        }

        let total = counts.values().sum::<u64>() as f64;
        let max_word_len = counts
            .keys()
            .map(|w| w.chars().count())
            .max()
            .unwrap_or(1)
            .min(MAX_WORD_LEN);
        debug!("loaded {} dictionary words", counts.len());

        Ok(DictionarySegmenter {
            counts,
            total,
            max_word_len,
        })
    }

    /// Log probability of a lowercase word; unknown words are penalised by length.
    fn log_probability(&self, word: &str, len: usize) -> f64 {
        match self.counts.get(word) {
            Some(&count) => (count as f64 / self.total).ln(),
            None => (10.0 / self.total).ln() - len as f64 * 10f64.ln(),
        }
    }

    /// Splits one run of letters into words, keeping the original case.
    fn segment_run(&self, run: &[char]) -> Vec<String> {
        let lower: Vec<char> = run.iter().flat_map(|c| c.to_lowercase()).collect();
        if lower.len() != run.len() {
            return vec![run.iter().collect()];
        }

        let n = run.len();
        let mut best = vec![f64::NEG_INFINITY; n + 1];
        let mut split = vec![0usize; n + 1];
        best[0] = 0.0;

        for end in 1..=n {
            for start in end.saturating_sub(self.max_word_len)..end {
                let word: String = lower[start..end].iter().collect();
                let score = best[start] + self.log_probability(&word, end - start);
                if score > best[end] {
                    best[end] = score;
                    split[end] = start;
                }
            }
        }

        let mut words: Vec<String> = Vec::new();
        let mut end = n;
        while end > 0 {
            let start = split[end];
            words.push(run[start..end].iter().collect());
            end = start;
        }
        words.reverse();
        words
    }
}

impl Segmenter for DictionarySegmenter {
    fn segment(&self, text: &str) -> String {
        let mut result = String::with_capacity(text.len() + text.len() / 4);
        let mut run: Vec<char> = Vec::new();

        for c in text.chars() {
            if c.is_alphabetic() {
                run.push(c);
                continue;
            }
            if !run.is_empty() {
                result.push_str(&self.segment_run(&run).join(" "));
                run.clear();
            }
            result.push(c);
        }
        if !run.is_empty() {
            result.push_str(&self.segment_run(&run).join(" "));
        }

        result
    }
}
