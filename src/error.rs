use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SummarizeError {
    #[error("input file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("model endpoint returned {status}: {body}")]
    Model { status: u16, body: String },

    #[error("unexpected model response: {0}")]
    ModelResponse(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl From<config::ConfigError> for SummarizeError {
    fn from(e: config::ConfigError) -> Self {
        SummarizeError::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SummarizeError>;
