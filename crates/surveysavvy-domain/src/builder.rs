//! Builder module - assembles extraction outputs into a [`SurveyRecord`]

use std::collections::BTreeMap;

use crate::benchmark::BenchmarkRow;
use crate::distribution::QuestionDistribution;
use crate::metric::{MetricKey, PercentageAgreement};
use crate::record::{Comment, ResponseStatistics, SurveyRecord};
use crate::sentiment::SentimentTagger;
use crate::unit::UnitIdentity;

/// Combines per-section extraction results into one record
///
/// Missing required fields never fail the build; they are listed on the
/// record so the caller can report them.
///
/// # Examples
///
/// ```
/// use surveysavvy_domain::{SurveyRecordBuilder, UnitIdentity};
///
/// let record = SurveyRecordBuilder::new()
///     .identity(UnitIdentity::default())
///     .comments(vec!["Great unit".to_string()])
///     .build();
///
/// assert!(!record.is_importable());
/// assert_eq!(record.missing_fields().len(), 6);
/// assert_eq!(record.comments().len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SurveyRecordBuilder {
    tagger: SentimentTagger,
    identity: UnitIdentity,
    statistics: ResponseStatistics,
    agreement: PercentageAgreement,
    benchmarks: Vec<BenchmarkRow>,
    distributions: BTreeMap<MetricKey, QuestionDistribution>,
    comments: Vec<String>,
}

impl SurveyRecordBuilder {
    /// Start an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a specific sentiment tagger
    pub fn with_tagger(mut self, tagger: SentimentTagger) -> Self {
        self.tagger = tagger;
        self
    }

    /// Set the unit identity
    pub fn identity(mut self, identity: UnitIdentity) -> Self {
        self.identity = identity;
        self
    }

    /// Set the response statistics
    pub fn statistics(mut self, statistics: ResponseStatistics) -> Self {
        self.statistics = statistics;
        self
    }

    /// Set the percentage agreement
    pub fn agreement(mut self, agreement: PercentageAgreement) -> Self {
        self.agreement = agreement;
        self
    }

    /// Set the benchmark rows
    pub fn benchmarks(mut self, benchmarks: Vec<BenchmarkRow>) -> Self {
        self.benchmarks = benchmarks;
        self
    }

    /// Set the per-question distributions
    pub fn distributions(mut self, distributions: BTreeMap<MetricKey, QuestionDistribution>) -> Self {
        self.distributions = distributions;
        self
    }

    /// Set the segmented comment strings
    pub fn comments(mut self, comments: Vec<String>) -> Self {
        self.comments = comments;
        self
    }

    /// Tag comments and freeze the record
    pub fn build(self) -> SurveyRecord {
        let missing = self.identity.missing_fields();
        let comments = self
            .comments
            .into_iter()
            .map(|text| Comment::tagged(text, &self.tagger))
            .collect();

        SurveyRecord {
            identity: self.identity,
            statistics: self.statistics,
            agreement: self.agreement,
            benchmarks: self.benchmarks,
            distributions: self.distributions,
            comments,
            missing,
        }
    }
}
