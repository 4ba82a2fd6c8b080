//! Benchmark table recovery
//!
//! Each comparison group's block starts at its label and runs to the next
//! "Overall" (or the end of the page). Percentages and respondent counts in
//! the block are zipped positionally against the six metrics.

use once_cell::sync::Lazy;
use regex::Regex;
use surveysavvy_domain::{BenchmarkGroup, BenchmarkRow, UnitCode};
use tracing::debug;

use crate::patterns::{collapse_whitespace, parse_percentage};

static OVERALL_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bOverall\b").expect("valid overall label"));

static ANY_UNIT_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bUnit\s*[-–]\s*[A-Z]{4}\d+").expect("valid unit label"));

static SCHOOL_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bSchool\s*[-–]\s*School of\b").expect("valid school label"));

static FACULTY_LABEL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bFaculty\s*[-–]\s*Faculty of\b").expect("valid faculty label")
});

static BLOCK_END: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)overall").expect("valid block terminator"));

/// Label patterns for the benchmark groups
#[derive(Debug, Clone)]
pub struct BenchmarkLabels {
    institution: Regex,
}

impl BenchmarkLabels {
    /// Compile labels using the given institution-wide row label
    pub fn new(institution_label: &str) -> Result<Self, regex::Error> {
        let label = institution_label.trim();
        let edge = |c: Option<char>| match c {
            Some(c) if c.is_alphanumeric() => r"\b",
            _ => "",
        };
        let institution = Regex::new(&format!(
            "(?i){}{}{}",
            edge(label.chars().next()),
            regex::escape(label),
            edge(label.chars().last())
        ))?;
        Ok(Self { institution })
    }

    /// Recover one row per group whose block holds at least six percentages
    pub fn extract(&self, text: &str, unit_code: Option<&UnitCode>) -> Vec<BenchmarkRow> {
        // The code-specific label wins; any unit label stands in when it is absent
        let unit_label = unit_code
            .and_then(|code| {
                Regex::new(&format!(r"(?i)\bUnit\s*[-–]\s*{}", regex::escape(code.as_str()))).ok()
            })
            .filter(|label| label.is_match(text));

        BenchmarkGroup::ALL
            .iter()
            .filter_map(|group| {
                let label = match group {
                    BenchmarkGroup::Overall => &*OVERALL_LABEL,
                    BenchmarkGroup::Unit => unit_label.as_ref().unwrap_or(&*ANY_UNIT_LABEL),
                    BenchmarkGroup::School => &*SCHOOL_LABEL,
                    BenchmarkGroup::Faculty => &*FACULTY_LABEL,
                    BenchmarkGroup::Institution => &self.institution,
                };
                extract_row(text, *group, label)
            })
            .collect()
    }
}

fn extract_row(text: &str, group: BenchmarkGroup, label: &Regex) -> Option<BenchmarkRow> {
    let found = label.find(text)?;
    let rest = &text[found.end()..];
    let block_len = BLOCK_END.find(rest).map_or(rest.len(), |m| m.start());
    let block = &rest[..block_len];

    let (percentages, counts) = scan_block(block);
    let name = group_name(found.as_str(), rest);

    let row = BenchmarkRow::from_positional(group, name, &percentages, &counts);
    if row.is_none() {
        debug!(
            group = group.as_str(),
            percentages = percentages.len(),
            "Benchmark block too short, row skipped"
        );
    }
    row
}

/// Percentage tokens and standalone integers of two or more digits, in order
pub(crate) fn scan_block(block: &str) -> (Vec<f64>, Vec<u32>) {
    let mut percentages = Vec::new();
    let mut counts = Vec::new();

    for token in block.split_whitespace() {
        let token = token.trim_matches(|c: char| matches!(c, ',' | ';' | '(' | ')' | '[' | ']'));
        if token.ends_with('%') {
            if let Some(percent) = parse_percentage(token) {
                percentages.push(percent);
            }
        } else if token.len() >= 2 && token.chars().all(|c| c.is_ascii_digit()) {
            if let Ok(count) = token.parse() {
                counts.push(count);
            }
        }
    }

    (percentages, counts)
}

/// The label plus any non-numeric words that follow it on the same line
fn group_name(label: &str, rest: &str) -> String {
    let line = rest.lines().next().unwrap_or("");
    let words: Vec<&str> = line
        .split_whitespace()
        .take_while(|word| !word.starts_with(|c: char| c.is_ascii_digit()))
        .collect();

    let name = collapse_whitespace(&format!("{} {}", label, words.join(" ")));
    name.trim_end_matches(|c: char| c == '-' || c == '–' || c.is_whitespace())
        .to_string()
}
