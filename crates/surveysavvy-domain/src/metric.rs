//! Metric module - the six fixed survey dimensions

use std::collections::BTreeMap;
use std::fmt;

/// One of the six survey dimensions every report scores
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MetricKey {
    /// Engagement with learning activities
    Engagement,
    /// Usefulness of provided resources
    Resources,
    /// Learning support
    Support,
    /// Assessments as a demonstration of learning
    Assessments,
    /// Clarity of expectations
    Expectations,
    /// Overall worth of the unit
    Overall,
}

impl MetricKey {
    /// All keys in report order
    pub const ALL: [MetricKey; 6] = [
        MetricKey::Engagement,
        MetricKey::Resources,
        MetricKey::Support,
        MetricKey::Assessments,
        MetricKey::Expectations,
        MetricKey::Overall,
    ];

    /// Stable key name used in storage and JSON
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricKey::Engagement => "engagement",
            MetricKey::Resources => "resources",
            MetricKey::Support => "support",
            MetricKey::Assessments => "assessments",
            MetricKey::Expectations => "expectations",
            MetricKey::Overall => "overall",
        }
    }

    /// Parse a key name (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase();
        MetricKey::ALL.into_iter().find(|key| key.as_str() == s)
    }

    /// Question phrases printed in reports, canonical wording first
    pub fn phrases(&self) -> &'static [&'static str] {
        match self {
            MetricKey::Engagement => &[
                "I was engaged by the learning activities",
                "I was engaged by the learning activities in this unit",
            ],
            MetricKey::Resources => &[
                "The resources provided helped me to learn",
                "The resources provided helped me learn",
            ],
            MetricKey::Support => &["My learning was supported"],
            MetricKey::Assessments => &[
                "Assessments helped me to demonstrate my learning",
                "Assessments helped me demonstrate my learning",
            ],
            MetricKey::Expectations => &["I knew what was expected of me"],
            MetricKey::Overall => &[
                "Overall, this unit was a worthwhile experience",
                "Overall this unit was a worthwhile experience",
            ],
        }
    }

    /// Canonical question phrase
    pub fn phrase(&self) -> &'static str {
        self.phrases()[0]
    }

    /// Question text as stored in the question catalogue
    pub fn question_text(&self) -> String {
        format!("{}.", self.phrase())
    }

    /// Column heading used for this metric in benchmark tables
    pub fn benchmark_label(&self) -> &'static str {
        match self {
            MetricKey::Engagement => "Engaged",
            MetricKey::Resources => "Resources",
            MetricKey::Support => "Support",
            MetricKey::Assessments => "Assessments",
            MetricKey::Expectations => "Expectations",
            MetricKey::Overall => "Overall",
        }
    }
}

impl fmt::Display for MetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for MetricKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid metric key: {}", s))
    }
}

/// Percentage agreement per metric; only the six known keys can be held
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PercentageAgreement {
    values: BTreeMap<MetricKey, f64>,
}

impl PercentageAgreement {
    /// Create an empty mapping
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the percentage for a metric
    pub fn insert(&mut self, key: MetricKey, percent: f64) {
        self.values.insert(key, percent);
    }

    /// Set the percentage for a metric given by name; unknown names are ignored
    pub fn insert_named(&mut self, name: &str, percent: f64) -> bool {
        match MetricKey::parse(name) {
            Some(key) => {
                self.insert(key, percent);
                true
            }
            None => false,
        }
    }

    /// Percentage for a metric, if it was recovered
    pub fn get(&self, key: MetricKey) -> Option<f64> {
        self.values.get(&key).copied()
    }

    /// Iterate recovered metrics in key order
    pub fn iter(&self) -> impl Iterator<Item = (MetricKey, f64)> + '_ {
        self.values.iter().map(|(k, v)| (*k, *v))
    }

    /// Number of recovered metrics
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether nothing was recovered
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FromIterator<(MetricKey, f64)> for PercentageAgreement {
    fn from_iter<I: IntoIterator<Item = (MetricKey, f64)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}
