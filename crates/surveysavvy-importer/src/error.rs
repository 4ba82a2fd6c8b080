//! Error types for Importer setup

use thiserror::Error;

/// Errors that can occur while setting up an import
///
/// Per-document problems are never errors; they become
/// [`surveysavvy_domain::ImportOutcome::Failed`] in the batch summary.
#[derive(Error, Debug)]
pub enum ImportError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Extractor could not be built
    #[error("Extractor error: {0}")]
    Extractor(#[from] surveysavvy_extractor::ExtractorError),

    /// Database could not be opened
    #[error("Storage error: {0}")]
    Store(#[from] surveysavvy_store::StoreError),
}
