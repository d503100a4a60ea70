//! Error types for verve_app

use thiserror::Error;

/// Errors that can occur assembling or driving the site
#[derive(Error, Debug)]
pub enum VerveError {
    /// Site configuration failed to parse or validate
    #[error("config error: {0}")]
    Config(String),

    /// A navigation anchor that matches no mounted section
    #[error("unknown anchor: {0}")]
    UnknownAnchor(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl From<toml::de::Error> for VerveError {
    fn from(err: toml::de::Error) -> Self {
        VerveError::Config(err.to_string())
    }
}

impl From<anyhow::Error> for VerveError {
    fn from(err: anyhow::Error) -> Self {
        VerveError::Other(err.to_string())
    }
}

/// Result type for verve_app operations
pub type Result<T> = std::result::Result<T, VerveError>;
