//! Sentiment module - keyword-based tagging of free-text comments
//!
//! A bag-of-words model over fixed lexicons. There is no negation handling
//! and no phrase matching.

use std::fmt;

const POSITIVE_WORDS: &[&str] = &[
    "good",
    "great",
    "excellent",
    "helpful",
    "enjoy",
    "enjoyed",
    "clear",
    "useful",
    "valuable",
    "effective",
    "well",
    "love",
    "best",
    "perfect",
    "interesting",
    "engaging",
    "engaged",
    "recommend",
    "supportive",
];

const NEGATIVE_WORDS: &[&str] = &[
    "bad",
    "poor",
    "difficult",
    "hard",
    "confusing",
    "unclear",
    "boring",
    "useless",
    "waste",
    "ineffective",
    "terrible",
    "worst",
    "dislike",
    "hate",
    "awful",
    "frustrating",
    "disappointed",
    "struggle",
];

/// Raw keyword difference that maps to a full-scale score
const SCORE_SCALE: f64 = 5.0;

/// Three-way sentiment label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SentimentLabel {
    /// More positive than negative keywords
    Positive,
    /// Balanced or no keywords
    Neutral,
    /// More negative than positive keywords
    Negative,
}

impl SentimentLabel {
    /// Label as stored
    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "positive",
            SentimentLabel::Neutral => "neutral",
            SentimentLabel::Negative => "negative",
        }
    }

    /// Parse a stored label
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "positive" => Some(SentimentLabel::Positive),
            "neutral" => Some(SentimentLabel::Neutral),
            "negative" => Some(SentimentLabel::Negative),
            _ => None,
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Score in [-1, 1] plus its label
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sentiment {
    /// Bounded signed score
    pub score: f64,
    /// Sign of the raw keyword difference
    pub label: SentimentLabel,
}

impl Sentiment {
    /// A zero-score neutral sentiment
    pub fn neutral() -> Self {
        Self {
            score: 0.0,
            label: SentimentLabel::Neutral,
        }
    }
}

/// Tags comments using the fixed positive and negative lexicons
#[derive(Debug, Clone, Copy, Default)]
pub struct SentimentTagger;

impl SentimentTagger {
    /// Create a tagger
    pub fn new() -> Self {
        Self
    }

    /// Score a comment
    ///
    /// # Examples
    ///
    /// ```
    /// use surveysavvy_domain::{SentimentLabel, SentimentTagger};
    ///
    /// let sentiment = SentimentTagger::new().tag("this was a great and helpful unit");
    /// assert_eq!(sentiment.label, SentimentLabel::Positive);
    /// assert!(sentiment.score > 0.0);
    /// ```
    pub fn tag(&self, text: &str) -> Sentiment {
        let raw = self.raw_score(text);

        let label = match raw {
            r if r > 0 => SentimentLabel::Positive,
            r if r < 0 => SentimentLabel::Negative,
            _ => SentimentLabel::Neutral,
        };

        Sentiment {
            score: (raw as f64 / SCORE_SCALE).clamp(-1.0, 1.0),
            label,
        }
    }

    /// Positive keyword count minus negative keyword count
    pub fn raw_score(&self, text: &str) -> i64 {
        let lowered = text.to_lowercase();
        lowered
            .split_whitespace()
            .map(|token| token.trim_matches(|c: char| !c.is_alphanumeric()))
            .map(|token| {
                if POSITIVE_WORDS.contains(&token) {
                    1
                } else if NEGATIVE_WORDS.contains(&token) {
                    -1
                } else {
                    0
                }
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_comment() {
        let sentiment = SentimentTagger::new().tag("this was a great and helpful unit");
        assert_eq!(sentiment.label, SentimentLabel::Positive);
        assert!(sentiment.score > 0.0);
        assert_eq!(sentiment.score, 0.4);
    }

    #[test]
    fn test_negative_comment() {
        let sentiment = SentimentTagger::new().tag("this was boring and confusing");
        assert_eq!(sentiment.label, SentimentLabel::Negative);
        assert!(sentiment.score < 0.0);
    }

    #[test]
    fn test_neutral_comment() {
        let sentiment = SentimentTagger::new().tag("the unit ran for twelve weeks");
        assert_eq!(sentiment, Sentiment::neutral());
    }

    #[test]
    fn test_punctuation_is_stripped() {
        let tagger = SentimentTagger::new();
        assert_eq!(tagger.raw_score("Great! Really helpful, clear."), 3);
        assert_eq!(tagger.raw_score("\"Boring\"..."), -1);
    }

    #[test]
    fn test_score_is_clamped() {
        let sentiment =
            SentimentTagger::new().tag("good great excellent helpful enjoy enjoyed clear");
        assert_eq!(sentiment.score, 1.0);
        assert_eq!(sentiment.label, SentimentLabel::Positive);
    }

    #[test]
    fn test_balanced_comment_is_neutral() {
        let sentiment = SentimentTagger::new().tag("good content but poor delivery");
        assert_eq!(sentiment.label, SentimentLabel::Neutral);
        assert_eq!(sentiment.score, 0.0);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: scores stay within [-1, 1] for any input
        #[test]
        fn test_score_bounds_invariant(text in ".{0,200}") {
            let sentiment = SentimentTagger::new().tag(&text);
            prop_assert!((-1.0..=1.0).contains(&sentiment.score));
        }

        /// Property: the label agrees with the sign of the score
        #[test]
        fn test_label_matches_score_sign(words in prop::collection::vec("[a-z]{2,10}|good|bad|hard|clear", 0..30)) {
            let text = words.join(" ");
            let sentiment = SentimentTagger::new().tag(&text);
            match sentiment.label {
                SentimentLabel::Positive => prop_assert!(sentiment.score > 0.0),
                SentimentLabel::Negative => prop_assert!(sentiment.score < 0.0),
                SentimentLabel::Neutral => prop_assert_eq!(sentiment.score, 0.0),
            }
        }
    }
}
