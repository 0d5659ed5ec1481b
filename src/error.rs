//! Error types for the predictor

use thiserror::Error;

/// Crate-wide error
#[derive(Error, Debug)]
pub enum Error {
    #[error("Unknown genre: {0}")]
    UnknownGenre(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Dataset error: {0}")]
    Dataset(String),

    #[error("Model error: {0}")]
    Model(String),

    #[error("Invalid variation distribution: {0}")]
    Distribution(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Prompt error: {0}")]
    Prompt(#[from] rustyline::error::ReadlineError),
}

impl Error {
    /// Whether the error was caused by the caller's input rather than the environment
    pub fn is_user_error(&self) -> bool {
        matches!(self, Error::UnknownGenre(_) | Error::InvalidInput(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
