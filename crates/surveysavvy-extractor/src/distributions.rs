//! Per-question response distributions

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;
use surveysavvy_domain::{LikertTier, MetricKey, QuestionDistribution, TierCount};
use tracing::debug;

const RUN_TERMINATOR: &str = "Base (above)";

static TIER_PATTERNS: Lazy<Vec<(LikertTier, Regex)>> = Lazy::new(|| {
    LikertTier::ALL
        .iter()
        .map(|tier| {
            let label = tier
                .label()
                .split(' ')
                .map(regex::escape)
                .collect::<Vec<_>>()
                .join(r"\s+");
            let pattern = format!(r"\b{}\s+{}\s+(\d+)\s+(\d+\.\d+)%", tier.ordinal(), label);
            (*tier, Regex::new(&pattern).expect("valid tier pattern"))
        })
        .collect()
});

static AGREEMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bAgreement\s+(\d+\.\d+)%").expect("valid agreement pattern"));

/// Accumulates distributions across pages; the first page a question appears on wins
#[derive(Debug, Default)]
pub struct DistributionCollector {
    found: BTreeMap<MetricKey, QuestionDistribution>,
}

impl DistributionCollector {
    /// Start with no questions found
    pub fn new() -> Self {
        Self::default()
    }

    /// Scan one page for questions not yet found
    pub fn scan_page(&mut self, page: u32, text: &str) {
        for key in MetricKey::ALL {
            if self.found.contains_key(&key) {
                continue;
            }
            if let Some(run) = question_run(text, key) {
                debug!(metric = key.as_str(), page, "Question distribution found");
                self.found.insert(key, parse_run(key, run));
            }
        }
    }

    /// Distributions found so far
    pub fn finish(self) -> BTreeMap<MetricKey, QuestionDistribution> {
        self.found
    }
}

/// Text from the end of the question phrase up to the terminator (or end of page)
fn question_run(text: &str, key: MetricKey) -> Option<&str> {
    key.phrases().iter().find_map(|phrase| {
        let start = text.find(phrase)? + phrase.len();
        let rest = &text[start..];
        let end = rest.find(RUN_TERMINATOR).unwrap_or(rest.len());
        Some(&rest[..end])
    })
}

/// Tiers that are not printed stay at zero
fn parse_run(key: MetricKey, run: &str) -> QuestionDistribution {
    let mut distribution = QuestionDistribution::new(key);

    for (tier, pattern) in TIER_PATTERNS.iter() {
        let Some(caps) = pattern.captures(run) else {
            continue;
        };
        if let (Ok(count), Ok(percentage)) = (caps[1].parse(), caps[2].parse()) {
            distribution.set_tier(*tier, TierCount { count, percentage });
        }
    }

    distribution.agreement = AGREEMENT
        .captures(run)
        .and_then(|caps| caps[1].parse().ok());

    distribution
}
