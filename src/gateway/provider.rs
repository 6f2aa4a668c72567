use std::fmt;

use async_trait::async_trait;

use super::types::{Book, Translation, VerseContent};

/// Errors that can occur while talking to the content source.
#[derive(Debug, Clone, PartialEq)]
pub enum GatewayError {
    /// Gateway misconfigured (bad base URL, client build failure).
    Config(String),
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// The source answered with a non-success status.
    Api { status: u16, message: String },
    /// The body could not be decoded into the expected shape.
    Parse(String),
}

impl fmt::Display for GatewayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GatewayError::Config(msg) => write!(f, "config error: {msg}"),
            GatewayError::Network(msg) => write!(f, "network error: {msg}"),
            GatewayError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            GatewayError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for GatewayError {}

/// Read-only access to translations, books, chapters and verses.
///
/// Every call is single-shot. Retries, if any, belong to the implementation.
#[async_trait]
pub trait ContentGateway: Send + Sync {
    /// Returns the name of the gateway.
    fn name(&self) -> &str;

    async fn list_translations(&self) -> Result<Vec<Translation>, GatewayError>;

    async fn list_books(&self, translation: &str) -> Result<Vec<Book>, GatewayError>;

    /// Number of chapters in `book`, always at least 1 on success.
    async fn chapter_count(&self, translation: &str, book: &str) -> Result<u32, GatewayError>;

    async fn get_verses(
        &self,
        translation: &str,
        book: &str,
        chapter: u32,
    ) -> Result<VerseContent, GatewayError>;
}
