use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use log::info;
use thiserror::Error;
use vigenere_crack::{cipher, Alphabet, STANDARD_ALPHABET};

/// Command-line arguments for the Vigenère cipher program.
#[derive(Parser, Debug)]
struct Cli {
    /// Path to the input file containing text to encrypt/decrypt
    #[arg(short, long, help = "Path to the input file")]
    file: String,

    /// Key string for the Vigenère cipher
    #[arg(short, long, help = "Key string for the cipher")]
    key: String,

    /// Path to the output file where result will be saved
    #[arg(short, long, help = "Path to the output file")]
    output: String,

    /// Mode of operation (encrypt or decrypt)
    #[arg(short, long, help = "Mode of operation (encrypt/decrypt)")]
    mode: OperationMode,

    /// Base alphabet the cipher operates on
    #[arg(long, default_value = STANDARD_ALPHABET, help = "Base alphabet")]
    alphabet: String,

    /// Keyword moved to the front of the base alphabet
    #[arg(long, default_value = "", help = "Keyword for a keyed alphabet")]
    alphabet_key: String,
}

/// Enum representing the mode of operation for the cipher.
#[derive(Clone, Debug, ValueEnum)]
enum OperationMode {
    /// Encrypt mode
    Encrypt,
    /// Decrypt mode
    Decrypt,
}

#[derive(Error, Debug)]
enum AppError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Key contains no symbol of the alphabet {0}")]
    UnusableKey(String),
}

/// Main entry point for the Vigenère cipher program.
fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), AppError> {
    let alphabet = Alphabet::build(&cli.alphabet, &cli.alphabet_key);
    info!("using alphabet {}", alphabet);

    if cipher::key_indices(&cli.key, &alphabet).is_empty() {
        return Err(AppError::UnusableKey(alphabet.to_string()));
    }

    // Read input file content
    let content = std::fs::read_to_string(&cli.file).map_err(|source| AppError::Io {
        path: cli.file.clone(),
        source,
    })?;

    // Process based on selected mode
    let result = match cli.mode {
        OperationMode::Encrypt => {
            println!("Encrypting with key: {}", cli.key);
            cipher::encrypt(&content, &cli.key, &alphabet)
        }
        OperationMode::Decrypt => {
            println!("Decrypting with key: {}", cli.key);
            cipher::decrypt(&content, &cli.key, &alphabet)
        }
    };

    // Write result to output file
    std::fs::write(&cli.output, result).map_err(|source| AppError::Io {
        path: cli.output.clone(),
        source,
    })?;

    println!("Operation completed successfully! Output saved to: {}", cli.output);
    Ok(())
}
