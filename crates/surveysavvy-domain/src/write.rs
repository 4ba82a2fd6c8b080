//! Write module - ordered insert operations for one survey document

use crate::benchmark::BenchmarkGroup;
use crate::metric::MetricKey;
use crate::sentiment::Sentiment;
use crate::unit::{OfferingKey, Term, UnitCode};

/// One parameterized write against the survey schema
///
/// Writes are applied in order inside a single transaction. `Unit`,
/// `Discipline`, `Offering` and `SurveyEvent` reuse an existing row when
/// one matches. `Survey` attaches to the offering and event most recently
/// written in the same batch; results, benchmarks and comments attach to
/// the survey most recently written.
#[derive(Debug, Clone, PartialEq)]
pub enum SurveyWrite {
    /// Discipline row
    Discipline {
        /// Discipline code
        code: String,
        /// Display name
        name: String,
    },
    /// Unit row
    Unit {
        /// Unit code
        code: UnitCode,
        /// Unit title
        title: String,
        /// Owning discipline code
        discipline_code: String,
    },
    /// Unit offering row
    Offering(OfferingKey),
    /// Survey event row
    SurveyEvent {
        /// Academic year
        year: i32,
        /// Academic term
        term: Term,
        /// Month the survey ran
        month: u8,
        /// Event description
        description: String,
    },
    /// Unit survey row
    Survey {
        /// Enrolled students
        enrollments: u32,
        /// Responses received
        responses: u32,
        /// Response rate percentage
        response_rate: f64,
        /// Overall experience agreement percentage
        overall_experience: f64,
    },
    /// Per-question result row
    QuestionResult {
        /// Question
        metric: MetricKey,
        /// Tier counts, strongly-disagree first
        counts: [u32; 5],
        /// Agreement percentage
        percent_agree: f64,
    },
    /// Benchmark row for one group and question
    Benchmark {
        /// Question
        metric: MetricKey,
        /// Group kind
        group: BenchmarkGroup,
        /// Group label as printed
        group_name: String,
        /// Agreement percentage
        percent_agree: f64,
        /// Respondents, when printed
        total_n: Option<u32>,
    },
    /// Comment row
    Comment {
        /// Comment text
        text: String,
        /// Derived sentiment
        sentiment: Sentiment,
    },
}

impl SurveyWrite {
    /// Target table name
    pub fn table(&self) -> &'static str {
        match self {
            SurveyWrite::Discipline { .. } => "discipline",
            SurveyWrite::Unit { .. } => "unit",
            SurveyWrite::Offering(_) => "unit_offering",
            SurveyWrite::SurveyEvent { .. } => "survey_event",
            SurveyWrite::Survey { .. } => "unit_survey",
            SurveyWrite::QuestionResult { .. } => "unit_survey_result",
            SurveyWrite::Benchmark { .. } => "benchmark",
            SurveyWrite::Comment { .. } => "comment",
        }
    }
}
