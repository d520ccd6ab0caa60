//! Error types for the cryptanalysis core

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CrackError {
    #[error("Invalid attack configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, CrackError>;
