//! Error types for `restybench`

use thiserror::Error;

/// Main error type for `restybench` operations
#[derive(Error, Debug)]
pub enum BenchError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Server lifecycle error (start/stop)
    #[error("Server error: {0}")]
    Server(String),

    /// Building or installing the server distribution failed
    #[error("Install failed: {0}")]
    Install(String),

    /// Fetching the source archive failed
    #[error("Download failed: {0}")]
    Download(String),

    /// The load generator could not be run
    #[error("Load generator error: {0}")]
    LoadGenerator(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, BenchError>;

impl From<toml::de::Error> for BenchError {
    fn from(err: toml::de::Error) -> Self {
        BenchError::Config(err.to_string())
    }
}
