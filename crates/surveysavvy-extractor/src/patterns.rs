//! Ordered extraction strategies
//!
//! Each field is recovered by trying a list of named strategies in order.
//! The first strategy that yields a value wins; fields never share state.

use tracing::debug;

/// A named way of recovering one field from page text
pub(crate) struct Strategy<T> {
    pub name: &'static str,
    pub apply: fn(&str) -> Option<T>,
}

impl<T> Strategy<T> {
    pub const fn new(name: &'static str, apply: fn(&str) -> Option<T>) -> Self {
        Self { name, apply }
    }
}

/// Apply strategies in order and return the first value found
pub(crate) fn first_match<T>(field: &str, text: &str, strategies: &[Strategy<T>]) -> Option<T> {
    for strategy in strategies {
        if let Some(value) = (strategy.apply)(text) {
            debug!(field, strategy = strategy.name, "Field recovered");
            return Some(value);
        }
    }
    debug!(field, "No strategy matched");
    None
}

/// Collapse all whitespace runs to single spaces and trim
pub(crate) fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Parse a `NN.N%` token into its number
pub(crate) fn parse_percentage(token: &str) -> Option<f64> {
    let number = token.strip_suffix('%')?;
    if !number.contains('.') {
        return None;
    }
    parse_decimal(number)
}

/// Parse a `NN.N` decimal (digits, one point, digits)
pub(crate) fn parse_decimal(token: &str) -> Option<f64> {
    let (whole, fraction) = token.split_once('.')?;
    let is_digits = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit());
    if !is_digits(whole) || !is_digits(fraction) {
        return None;
    }
    token.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn never(_: &str) -> Option<u32> {
        None
    }

    fn length(text: &str) -> Option<u32> {
        Some(text.len() as u32)
    }

    fn always_one(_: &str) -> Option<u32> {
        Some(1)
    }

    #[test]
    fn test_first_success_wins() {
        let strategies = [
            Strategy::new("never", never),
            Strategy::new("length", length),
            Strategy::new("one", always_one),
        ];
        assert_eq!(first_match("test", "abcd", &strategies), Some(4));
    }

    #[test]
    fn test_no_match_is_none() {
        let strategies = [Strategy::new("never", never)];
        assert_eq!(first_match("test", "abcd", &strategies), None);
    }

    #[test]
    fn test_percentage_tokens() {
        assert_eq!(parse_percentage("81.5%"), Some(81.5));
        assert_eq!(parse_percentage("81%"), None);
        assert_eq!(parse_percentage("81.5"), None);
        assert_eq!(parse_decimal("1.2.3"), None);
        assert_eq!(parse_decimal(".5"), None);
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("  a\n b\t\tc "), "a b c");
    }
}
