//! Benchmark module - comparison groups for a survey's agreement figures

use std::collections::BTreeMap;
use std::fmt;

use crate::metric::MetricKey;

/// Comparison group a benchmark row belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BenchmarkGroup {
    /// The overall respondent pool for the unit
    Overall,
    /// The specific unit
    Unit,
    /// The owning school
    School,
    /// The owning faculty
    Faculty,
    /// The whole institution
    Institution,
}

impl BenchmarkGroup {
    /// All groups in the order they appear in reports
    pub const ALL: [BenchmarkGroup; 5] = [
        BenchmarkGroup::Overall,
        BenchmarkGroup::Unit,
        BenchmarkGroup::School,
        BenchmarkGroup::Faculty,
        BenchmarkGroup::Institution,
    ];

    /// Group type as stored
    pub fn as_str(&self) -> &'static str {
        match self {
            BenchmarkGroup::Overall => "overall",
            BenchmarkGroup::Unit => "unit",
            BenchmarkGroup::School => "school",
            BenchmarkGroup::Faculty => "faculty",
            BenchmarkGroup::Institution => "institution",
        }
    }

    /// Parse a stored group type
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase();
        BenchmarkGroup::ALL.into_iter().find(|g| g.as_str() == s)
    }
}

impl fmt::Display for BenchmarkGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One metric's figures within a benchmark row
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BenchmarkCell {
    /// Percentage agreeing
    pub percent_agree: f64,
    /// Respondents behind the percentage, when printed
    pub respondents: Option<u32>,
}

/// A comparison group's per-metric agreement figures
#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkRow {
    /// Group kind
    pub group: BenchmarkGroup,
    /// Group label as printed (e.g. `Faculty - Faculty of Business`)
    pub group_name: String,
    cells: BTreeMap<MetricKey, BenchmarkCell>,
}

impl BenchmarkRow {
    /// Build a row by zipping percentages and counts positionally against [`MetricKey::ALL`]
    ///
    /// Returns `None` when fewer than six percentages are supplied. Extra values are ignored.
    pub fn from_positional(
        group: BenchmarkGroup,
        group_name: impl Into<String>,
        percentages: &[f64],
        counts: &[u32],
    ) -> Option<Self> {
        if percentages.len() < MetricKey::ALL.len() {
            return None;
        }

        let cells = MetricKey::ALL
            .iter()
            .enumerate()
            .map(|(i, key)| {
                (
                    *key,
                    BenchmarkCell {
                        percent_agree: percentages[i],
                        respondents: counts.get(i).copied(),
                    },
                )
            })
            .collect();

        Some(Self {
            group,
            group_name: group_name.into(),
            cells,
        })
    }

    /// Figures for one metric
    pub fn cell(&self, key: MetricKey) -> Option<&BenchmarkCell> {
        self.cells.get(&key)
    }

    /// All cells in metric order
    pub fn cells(&self) -> impl Iterator<Item = (MetricKey, &BenchmarkCell)> {
        self.cells.iter().map(|(k, v)| (*k, v))
    }
}
