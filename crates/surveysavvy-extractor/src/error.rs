//! Error types for the Extractor

use thiserror::Error;

/// Errors that can occur while reading a document
///
/// A section that cannot be found is not an error; it is left unset on the record.
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// PDF parsing error
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    /// Page text could not be read
    #[error("Failed to read page {page}: {message}")]
    PageText {
        /// 1-based page number
        page: u32,
        /// Underlying error text
        message: String,
    },

    /// A configured label produced an invalid pattern
    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
