//! Record module - the immutable aggregate for one survey report

use std::collections::BTreeMap;

use crate::benchmark::BenchmarkRow;
use crate::distribution::QuestionDistribution;
use crate::metric::{MetricKey, PercentageAgreement};
use crate::sentiment::{Sentiment, SentimentTagger};
use crate::unit::{OfferingKey, RequiredField, UnitIdentity};

/// Enrolment and response figures from the statistics block
///
/// Unknown values stay `None` here and only become zero when persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ResponseStatistics {
    /// Enrolled students
    pub enrollments: Option<u32>,
    /// Survey responses
    pub responses: Option<u32>,
    /// Response rate percentage (0-100)
    pub response_rate: Option<f64>,
}

/// A free-text comment with its sentiment
#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    /// Comment text as segmented
    pub text: String,
    /// Derived sentiment
    pub sentiment: Sentiment,
}

impl Comment {
    /// Tag a comment's text
    pub fn tagged(text: impl Into<String>, tagger: &SentimentTagger) -> Self {
        let text = text.into();
        let sentiment = tagger.tag(&text);
        Self { text, sentiment }
    }
}

/// Everything recovered from one report document
///
/// Built once by [`crate::SurveyRecordBuilder`]; exposes read-only accessors.
#[derive(Debug, Clone, PartialEq)]
pub struct SurveyRecord {
    pub(crate) identity: UnitIdentity,
    pub(crate) statistics: ResponseStatistics,
    pub(crate) agreement: PercentageAgreement,
    pub(crate) benchmarks: Vec<BenchmarkRow>,
    pub(crate) distributions: BTreeMap<MetricKey, QuestionDistribution>,
    pub(crate) comments: Vec<Comment>,
    pub(crate) missing: Vec<RequiredField>,
}

impl SurveyRecord {
    /// Unit identity
    pub fn identity(&self) -> &UnitIdentity {
        &self.identity
    }

    /// Response statistics
    pub fn statistics(&self) -> &ResponseStatistics {
        &self.statistics
    }

    /// Percentage agreement per metric
    pub fn agreement(&self) -> &PercentageAgreement {
        &self.agreement
    }

    /// Benchmark rows in group order
    pub fn benchmarks(&self) -> &[BenchmarkRow] {
        &self.benchmarks
    }

    /// Per-question distributions
    pub fn distributions(&self) -> &BTreeMap<MetricKey, QuestionDistribution> {
        &self.distributions
    }

    /// Tagged comments
    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    /// Required identity fields that could not be recovered
    pub fn missing_fields(&self) -> &[RequiredField] {
        &self.missing
    }

    /// Whether every required field is present
    pub fn is_importable(&self) -> bool {
        self.missing.is_empty()
    }

    /// Duplicate-detection key for an importable record
    pub fn offering_key(&self) -> Option<OfferingKey> {
        if !self.is_importable() {
            return None;
        }
        self.identity.offering_key()
    }

    /// Missing fields joined for display, e.g. `unit code, campus`
    pub fn missing_summary(&self) -> String {
        self.missing
            .iter()
            .map(|f| f.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}
