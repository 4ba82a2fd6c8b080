//! Response statistics and percentage agreement from the statistics page

use once_cell::sync::Lazy;
use regex::Regex;
use surveysavvy_domain::{MetricKey, PercentageAgreement, ResponseStatistics};
use tracing::debug;

use crate::patterns::{first_match, Strategy};

static STATISTICS_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?s)# Enrol+ments.*?\(N\).*?# Responses.*?Response Rate\s*(\d+)\s+(\d+)\s+(\d+\.\d+)",
    )
    .expect("valid statistics pattern")
});

/// One compiled agreement pattern per metric phrase variant
static AGREEMENT_PATTERNS: Lazy<Vec<(MetricKey, Vec<Regex>)>> = Lazy::new(|| {
    MetricKey::ALL
        .iter()
        .map(|key| {
            let patterns = key
                .phrases()
                .iter()
                .map(|phrase| {
                    Regex::new(&format!(r"{}\s+(\d+\.\d+)%", regex::escape(phrase)))
                        .expect("escaped phrase is a valid pattern")
                })
                .collect();
            (*key, patterns)
        })
        .collect()
});

const STATISTICS_STRATEGIES: [Strategy<ResponseStatistics>; 1] =
    [Strategy::new("labelled-block", labelled_block)];

/// Enrolments, responses and response rate
///
/// The three numbers are only taken from the labelled block; any other
/// layout leaves all three unset.
pub fn extract_statistics(text: &str) -> ResponseStatistics {
    first_match("statistics", text, &STATISTICS_STRATEGIES).unwrap_or_default()
}

fn labelled_block(text: &str) -> Option<ResponseStatistics> {
    let caps = STATISTICS_BLOCK.captures(text)?;
    Some(ResponseStatistics {
        enrollments: Some(caps[1].parse().ok()?),
        responses: Some(caps[2].parse().ok()?),
        response_rate: Some(caps[3].parse().ok()?),
    })
}

/// Percentage agreement for each metric phrase found on the page
pub fn extract_agreement(text: &str) -> PercentageAgreement {
    let mut agreement = PercentageAgreement::new();

    for (key, patterns) in AGREEMENT_PATTERNS.iter() {
        let found = patterns
            .iter()
            .find_map(|pattern| pattern.captures(text))
            .and_then(|caps| caps[1].parse::<f64>().ok());

        match found {
            Some(percent) => agreement.insert(*key, percent),
            None => debug!(metric = key.as_str(), "No agreement figure found"),
        }
    }

    agreement
}
