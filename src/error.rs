//! Error types shared by every I/O boundary of the pipeline.

use thiserror::Error;

/// Errors raised while searching, scraping, tokenizing or summarizing.
#[derive(Debug, Error)]
pub enum NewsError {
    /// HTTP transport failure or non-success status
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The news API answered with an error document
    #[error("API error ({code}): {message}")]
    Api {
        /// Machine readable code reported by the service
        code: String,
        /// Human readable explanation
        message: String,
    },

    /// Response body could not be understood
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid URL {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// Tokenizer failed to load, encode or decode
    #[error("Tokenizer error: {0}")]
    Tokenizer(String),

    /// Summarization backend failure
    #[error("Model error: {0}")]
    Model(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Config(String),
}

pub type Result<T, E = NewsError> = std::result::Result<T, E>;
