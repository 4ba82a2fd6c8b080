//! SurveySavvy Extractor
//!
//! Recovers structured survey data from the page text of unit survey reports.
//!
//! # Overview
//!
//! Report text loses most of its layout, so every field is recovered by an
//! ordered list of pattern strategies. A field that cannot be found is left
//! unset; only the record builder decides whether the result is importable.
//!
//! # Architecture
//!
//! ```text
//! PDF → PageTextSource → FieldExtractor + CommentSegmenter → SurveyRecordBuilder → SurveyRecord
//! ```
//!
//! # Report sections
//!
//! - **Identity** (page 1): unit code and title, campus and mode, term and year
//! - **Statistics** (page 3): enrolments, responses, response rate, percentage agreement
//! - **Benchmarks** (page 4): unit, school, faculty and institution comparison rows
//! - **Distributions** (pages 5-7): Likert tier counts per question
//! - **Comments** (pages 8-10): free-text comments, tagged with sentiment
//!
//! # Example Usage
//!
//! ```
//! use surveysavvy_extractor::{ExtractorConfig, PageTexts, SurveyExtractor};
//!
//! let extractor = SurveyExtractor::new(ExtractorConfig::default()).unwrap();
//! let pages = PageTexts::from_pages([
//!     "ABCD1234 Introduction to Testing - Semester 1 2024 - North Campus - Internal",
//!     "",
//!     "# Enrolments (N) # Responses Response Rate 100 25 25.0",
//! ]);
//!
//! let record = extractor.extract_pages(&pages);
//! assert!(record.is_importable());
//! assert_eq!(record.statistics().responses, Some(25));
//! ```

#![warn(missing_docs)]

mod benchmarks;
mod comments;
mod config;
mod distributions;
mod error;
mod extractor;
mod identity;
mod pages;
mod patterns;
mod pdf;
mod statistics;

#[cfg(test)]
mod tests;

pub use benchmarks::BenchmarkLabels;
pub use comments::CommentSegmenter;
pub use config::{ExtractorConfig, PageRange};
pub use distributions::DistributionCollector;
pub use error::ExtractorError;
pub use extractor::{ExtractedFields, FieldExtractor, SurveyExtractor};
pub use identity::extract_identity;
pub use pages::PageTexts;
pub use pdf::{PdfDocument, PdfLoader};
pub use statistics::{extract_agreement, extract_statistics};
