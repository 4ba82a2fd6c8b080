//! Distribution module - per-question Likert response breakdowns

use std::fmt;

use crate::metric::MetricKey;

/// A Likert response tier, strongly-disagree first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LikertTier {
    /// 1 Strongly Disagree
    StronglyDisagree,
    /// 2 Disagree
    Disagree,
    /// 3 Neither Agree nor Disagree
    Neutral,
    /// 4 Agree
    Agree,
    /// 5 Strongly Agree
    StronglyAgree,
}

impl LikertTier {
    /// All tiers in scale order
    pub const ALL: [LikertTier; 5] = [
        LikertTier::StronglyDisagree,
        LikertTier::Disagree,
        LikertTier::Neutral,
        LikertTier::Agree,
        LikertTier::StronglyAgree,
    ];

    /// Position on the scale (1-5)
    pub fn ordinal(&self) -> u8 {
        *self as u8 + 1
    }

    /// Label as printed in reports
    pub fn label(&self) -> &'static str {
        match self {
            LikertTier::StronglyDisagree => "Strongly Disagree",
            LikertTier::Disagree => "Disagree",
            LikertTier::Neutral => "Neither Agree nor Disagree",
            LikertTier::Agree => "Agree",
            LikertTier::StronglyAgree => "Strongly Agree",
        }
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for LikertTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.ordinal(), self.label())
    }
}

/// Count and share of respondents in one tier
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TierCount {
    /// Respondents choosing the tier
    pub count: u32,
    /// Percentage of respondents choosing the tier
    pub percentage: f64,
}

/// Response distribution for one question
///
/// Tiers that were not printed are held as zero.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionDistribution {
    /// Question the distribution belongs to
    pub metric: MetricKey,
    tiers: [TierCount; 5],
    /// Printed agreement percentage, if any
    pub agreement: Option<f64>,
}

impl QuestionDistribution {
    /// An all-zero distribution for a question
    pub fn new(metric: MetricKey) -> Self {
        Self {
            metric,
            tiers: [TierCount::default(); 5],
            agreement: None,
        }
    }

    /// Set one tier's figures
    pub fn set_tier(&mut self, tier: LikertTier, count: TierCount) {
        self.tiers[tier.index()] = count;
    }

    /// Figures for one tier
    pub fn tier(&self, tier: LikertTier) -> TierCount {
        self.tiers[tier.index()]
    }

    /// Counts in scale order
    pub fn counts(&self) -> [u32; 5] {
        self.tiers.map(|t| t.count)
    }

    /// Total respondents across tiers
    pub fn total(&self) -> u32 {
        self.tiers.iter().map(|t| t.count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_tiers_are_zero() {
        let mut dist = QuestionDistribution::new(MetricKey::Support);
        dist.set_tier(
            LikertTier::Agree,
            TierCount {
                count: 12,
                percentage: 48.0,
            },
        );

        assert_eq!(dist.tier(LikertTier::Disagree), TierCount::default());
        assert_eq!(dist.counts(), [0, 0, 0, 12, 0]);
        assert_eq!(dist.total(), 12);
        assert_eq!(dist.agreement, None);
    }

    #[test]
    fn test_tier_display() {
        assert_eq!(LikertTier::Neutral.to_string(), "3 Neither Agree nor Disagree");
        assert_eq!(LikertTier::StronglyAgree.ordinal(), 5);
    }
}
