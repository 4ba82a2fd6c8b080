//! Trait definitions for external interactions
//!
//! Page text comes from a document backend and survey rows go to a
//! relational store; both live in other crates.

use std::path::Path;

use crate::unit::OfferingKey;
use crate::write::SurveyWrite;

/// Text content of a loaded document, one page at a time
///
/// Implemented by the extraction layer (surveysavvy-extractor)
pub trait PageTextSource {
    /// Error type for page reads
    type Error;

    /// Number of pages in the document
    fn page_count(&self) -> u32;

    /// Text of a 1-based page; pages beyond the document yield an empty string
    fn page_text(&self, page: u32) -> Result<String, Self::Error>;
}

/// Opens documents from paths
pub trait DocumentLoader {
    /// Loaded document type
    type Document: PageTextSource;

    /// Error type for loading
    type Error;

    /// Load the document at `path`
    fn load(&self, path: &Path) -> Result<Self::Document, Self::Error>;
}

/// Duplicate lookup and atomic writes over the survey schema
///
/// Implemented by the infrastructure layer (surveysavvy-store)
pub trait SurveyStore {
    /// Error type for store operations
    type Error;

    /// Whether a survey already exists for the offering
    fn duplicate_exists(&self, key: &OfferingKey) -> Result<bool, Self::Error>;

    /// Apply all writes in one transaction; on error nothing is committed
    fn run_in_transaction(&mut self, writes: &[SurveyWrite]) -> Result<(), Self::Error>;
}
