//! SurveySavvy Domain Layer
//!
//! Core model for unit-survey report ingestion. Holds no I/O: it defines the
//! values recovered from a report, the record builder, comment sentiment
//! tagging, and the trait seams for page text and survey storage.
//!
//! ## Key Concepts
//!
//! - **Survey record**: everything recovered from one report document
//! - **Metric key**: one of six fixed survey dimensions
//! - **Benchmark row**: one comparison group's per-metric agreement
//! - **Tier**: a Likert response category
//! - **Duplicate**: an existing survey for the same unit, year, term, campus and mode

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod benchmark;
pub mod builder;
pub mod distribution;
pub mod metric;
pub mod outcome;
pub mod record;
pub mod sentiment;
pub mod traits;
pub mod unit;
pub mod write;

// Re-exports for convenience
pub use benchmark::{BenchmarkCell, BenchmarkGroup, BenchmarkRow};
pub use builder::SurveyRecordBuilder;
pub use distribution::{LikertTier, QuestionDistribution, TierCount};
pub use metric::{MetricKey, PercentageAgreement};
pub use outcome::{FileReport, ImportBatchSummary, ImportOutcome};
pub use record::{Comment, ResponseStatistics, SurveyRecord};
pub use sentiment::{Sentiment, SentimentLabel, SentimentTagger};
pub use traits::{DocumentLoader, PageTextSource, SurveyStore};
pub use unit::{DeliveryMode, OfferingKey, RequiredField, Term, UnitCode, UnitIdentity};
pub use write::SurveyWrite;
