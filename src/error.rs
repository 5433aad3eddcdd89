use std::path::PathBuf;

use thiserror::Error;

/// Main error type for latexchanges operations
#[derive(Error, Debug)]
pub enum ChangesError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cannot read modification time of {}: {source}", path.display())]
    TargetMetadata {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, ChangesError>;
