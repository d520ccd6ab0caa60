mod segment;

use std::process::ExitCode;
use std::thread;
use std::time::Duration;

use clap::Parser;
use log::{info, warn};
use thiserror::Error;
use vigenere_crack::{
    Alphabet, AttackConfig, AttackOutcome, AttackResult, CancellationToken, CrackError,
    KasiskiAttack, Segmentation, STANDARD_ALPHABET,
};

use segment::{DictionaryError, DictionarySegmenter};

/// Command-line arguments for the Vigenère decryptor program.
#[derive(Parser, Debug)]
struct Cli {
    /// Path to the input file containing encrypted text
    #[arg(short, long, help = "Path to the input file containing encrypted text")]
    file: String,

    /// Path to the output file where decrypted text will be saved
    #[arg(short, long, help = "Path to the output file for decrypted text")]
    output: String,

    /// Word-frequency dictionary used to insert spaces into run-on plaintext
    #[arg(short, long, help = "Dictionary file with one `word [count]` per line")]
    dictionary: Option<String>,

    /// Base alphabet the cipher operates on
    #[arg(long, default_value = STANDARD_ALPHABET)]
    alphabet: String,

    /// Keyword moved to the front of the base alphabet
    #[arg(long, default_value = "")]
    alphabet_key: String,

    /// Key lengths to attack, skipping Kasiski estimation
    #[arg(short, long = "length", help = "Candidate key length (repeatable)")]
    lengths: Vec<usize>,

    #[arg(long, default_value_t = 3)]
    min_pattern_len: usize,

    #[arg(long, default_value_t = 10)]
    max_pattern_len: usize,

    /// Largest key length considered (at most 50)
    #[arg(long, default_value_t = 20)]
    max_key_len: usize,

    /// Number of estimated key lengths to attack
    #[arg(long, default_value_t = 5)]
    top_lengths: usize,

    /// Number of ranked candidates to print
    #[arg(short, long, default_value_t = 10)]
    top: usize,

    #[arg(long, default_value_t = 2)]
    fallback_min: usize,

    #[arg(long, default_value_t = 12)]
    fallback_max: usize,

    /// Stop attacking new key lengths after this many milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,
}

impl Cli {
    fn attack_config(&self) -> AttackConfig {
        AttackConfig {
            min_pattern_len: self.min_pattern_len,
            max_pattern_len: self.max_pattern_len,
            max_key_len: self.max_key_len,
            top_lengths: self.top_lengths,
            top_results: self.top,
            fallback_lengths: self.fallback_min..=self.fallback_max,
            ..AttackConfig::default()
        }
    }
}

#[derive(Error, Debug)]
enum AppError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Dictionary(#[from] DictionaryError),

    #[error(transparent)]
    Crack(#[from] CrackError),

    #[error("Attack cancelled after {0} key lengths")]
    Cancelled(usize),
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(AppError::Cancelled(processed)) => {
            eprintln!("Attack cancelled after {} key lengths; partial results written", processed);
            ExitCode::from(2)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), AppError> {
    let config = cli.attack_config();
    config.validate()?;

    let input = std::fs::read_to_string(&cli.file).map_err(|source| AppError::Io {
        path: cli.file.clone(),
        source,
    })?;

    let segmentation = match &cli.dictionary {
        Some(path) => Segmentation::enabled(DictionarySegmenter::from_file(path)?),
        None => Segmentation::Disabled,
    };

    let alphabet = Alphabet::build(&cli.alphabet, &cli.alphabet_key);
    let attack = KasiskiAttack::new(input, alphabet)
        .with_segmentation(segmentation)
        .with_local_variants(config.local_variants);

    if attack.projection().len() < 50 {
        warn!("Text may be too short for reliable analysis");
    }

    let lengths = if cli.lengths.is_empty() {
        attack.candidate_lengths(&config)
    } else {
        cli.lengths.clone()
    };
    println!("Candidate key lengths: {:?}", lengths);

    let token = CancellationToken::new();
    if let Some(ms) = cli.timeout_ms {
        let timer = token.clone();
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(ms));
            info!("timeout of {} ms reached, cancelling", ms);
            timer.cancel();
        });
    }

    let outcome = attack.attack_using_kasiski(&lengths, config.top_results, &token);
    report(outcome.results());

    if let Some(best) = outcome.best() {
        // Output key to stdout
        println!("{}", best.key);
        std::fs::write(&cli.output, best.text()).map_err(|source| AppError::Io {
            path: cli.output.clone(),
            source,
        })?;
    } else {
        warn!("no candidate keys produced");
    }

    match outcome {
        AttackOutcome::Completed(_) => Ok(()),
        AttackOutcome::Cancelled { lengths_processed, .. } => Err(AppError::Cancelled(lengths_processed)),
    }
}

/// Prints the ranking, one candidate per line.
fn report(results: &[AttackResult]) {
    for (rank, result) in results.iter().enumerate() {
        println!(
            "{:>2}. key={:<12} score={:>10.2}  {}",
            rank + 1,
            result.key,
            result.score,
            preview(result.text(), 60)
        );
    }
}

fn preview(text: &str, limit: usize) -> String {
    let flat: String = text
        .chars()
        .map(|c| if c.is_whitespace() { ' ' } else { c })
        .take(limit)
        .collect();
    if text.chars().count() > limit {
        format!("{}...", flat)
    } else {
        flat
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vigenere_crack::cipher::encrypt;

    #[test]
    fn test_cli_maps_to_config() {
        let cli = Cli::try_parse_from([
            "vigenere_decrypter", "-f", "in.txt", "-o", "out.txt", "--max-key-len", "30",
            "--fallback-min", "3", "--fallback-max", "9", "-t", "4",
        ])
        .unwrap();
        let config = cli.attack_config();

        assert_eq!(config.max_key_len, 30);
        assert_eq!(config.top_results, 4);
        assert_eq!(config.fallback_lengths, 3..=9);
        assert!(cli.lengths.is_empty());
    }

    #[test]
    fn test_repeatable_lengths() {
        let cli = Cli::try_parse_from([
            "vigenere_decrypter", "-f", "in.txt", "-o", "out.txt", "-l", "5", "-l", "7",
        ])
        .unwrap();
        assert_eq!(cli.lengths, vec![5, 7]);
    }

    #[test]
    fn test_invalid_config_rejected_before_io() {
        let cli = Cli::try_parse_from([
            "vigenere_decrypter", "-f", "/nonexistent", "-o", "out.txt", "--max-key-len", "80",
        ])
        .unwrap();
        assert!(matches!(run(cli), Err(AppError::Crack(CrackError::InvalidConfig(_)))));
    }

    #[test]
    fn test_end_to_end_with_dictionary() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("cipher.txt");
        let output = dir.path().join("plain.txt");
        let dictionary = dir.path().join("words.txt");

        let plaintext = "ATTACKATDAWN";
        let ciphertext = encrypt(plaintext, "LEMON", &Alphabet::standard());
        std::fs::write(&input, ciphertext).unwrap();
        std::fs::write(&dictionary, "attack 40\nat 300\ndawn 20\n").unwrap();

        let cli = Cli::try_parse_from([
            "vigenere_decrypter",
            "-f", input.to_str().unwrap(),
            "-o", output.to_str().unwrap(),
            "-d", dictionary.to_str().unwrap(),
            "-l", "5",
        ])
        .unwrap();
        run(cli).unwrap();

        let written = std::fs::read_to_string(&output).unwrap();
        assert_eq!(written.chars().filter(|c| !c.is_whitespace()).count(), plaintext.len());
    }

    #[test]
    fn test_preview_truncates() {
        assert_eq!(preview("abc\ndef", 10), "abc def");
        assert_eq!(preview("abcdef", 3), "abc...");
    }
}
