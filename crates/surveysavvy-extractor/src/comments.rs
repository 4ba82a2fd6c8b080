//! Comment segmentation
//!
//! Page text loses paragraph boundaries unpredictably, so comments are split
//! with a cascade of increasingly aggressive heuristics. The sentence pass
//! runs only when newline splitting finds too few comments. The opener pass
//! runs only when the sentence pass finds fewer fragments than the newline
//! pass, and is kept only when it beats the sentence pass.
//!
//! The final pass (splitting before common sentence-opening words) is lossy
//! and of uncertain precision.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::patterns::collapse_whitespace;

/// Newline splitting below this size falls through to the sentence pass
const MIN_COMMENTS: usize = 3;

/// Sentence-boundary fragments shorter than this are discarded
const MIN_SENTENCE_LEN: usize = 11;

const DISCLAIMER: &str = "This report may contain";

/// Words that commonly open a new comment
const COMMENT_OPENERS: [&str; 9] = [
    "I ", "The ", "Overall", "It ", "Was ", "Good ", "Fun ", "My ", "This ",
];

static COMMENTS_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)What are the main reasons for your rating.*?Comments\s*(.*?)(?:This report may contain|\z)")
        .expect("valid comments block pattern")
});

static NEWLINE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:\r?\n)+").expect("valid newline pattern"));

static SENTENCE_BOUNDARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\.\s+[A-Z]").expect("valid sentence boundary pattern"));

static OPENER_BOUNDARY: Lazy<Regex> = Lazy::new(|| {
    let openers = COMMENT_OPENERS
        .iter()
        .map(|w| regex::escape(w))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"\.\s+({})", openers)).expect("valid opener pattern")
});

/// Splits a comments page into individual comments
#[derive(Debug, Clone, Copy, Default)]
pub struct CommentSegmenter;

impl CommentSegmenter {
    /// Create a segmenter
    pub fn new() -> Self {
        Self
    }

    /// The comments block on a page, if the page has one
    pub fn find_block<'a>(&self, page_text: &'a str) -> Option<&'a str> {
        COMMENTS_BLOCK
            .captures(page_text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }

    /// Distinct comments on a page; empty when the page has no comments block
    ///
    /// # Examples
    ///
    /// ```
    /// use surveysavvy_extractor::CommentSegmenter;
    ///
    /// let page = "What are the main reasons for your rating? Comments\n\
    ///             Great lectures\nToo many quizzes\nLoved the labs\n";
    /// let comments = CommentSegmenter::new().segment(page);
    /// assert_eq!(comments, vec!["Great lectures", "Too many quizzes", "Loved the labs"]);
    /// ```
    pub fn segment(&self, page_text: &str) -> Vec<String> {
        match self.find_block(page_text) {
            Some(block) => self.segment_block(block),
            None => Vec::new(),
        }
    }

    /// Split an already isolated comments block
    pub fn segment_block(&self, block: &str) -> Vec<String> {
        let by_line = split_lines(block);
        debug!(fragments = by_line.len(), "Comments split on newlines");
        if by_line.len() >= MIN_COMMENTS {
            return dedupe(by_line);
        }

        let by_sentence = split_sentences(block);
        debug!(fragments = by_sentence.len(), "Comments split on sentence boundaries");
        if by_sentence.len() >= by_line.len() {
            let best = if by_sentence.len() > by_line.len() {
                by_sentence
            } else {
                by_line
            };
            return dedupe(best);
        }

        let by_opener = split_openers(block);
        debug!(fragments = by_opener.len(), "Comments split before opening words");
        if by_opener.len() > by_sentence.len() {
            return dedupe(by_opener);
        }

        dedupe(by_line)
    }
}

fn is_boilerplate(fragment: &str) -> bool {
    fragment.eq_ignore_ascii_case("comments") || fragment.contains(DISCLAIMER)
}

fn clean(fragment: &str) -> Option<String> {
    let fragment = collapse_whitespace(fragment);
    if fragment.is_empty() || is_boilerplate(&fragment) {
        return None;
    }
    Some(fragment)
}

/// Pass 1: one comment per line
fn split_lines(block: &str) -> Vec<String> {
    NEWLINE_RUN.split(block).filter_map(clean).collect()
}

/// Split `text` at the byte offsets given, keeping every piece
fn split_at_offsets(text: &str, offsets: impl Iterator<Item = usize>) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut start = 0;
    for offset in offsets {
        pieces.push(&text[start..offset]);
        start = offset;
    }
    pieces.push(&text[start..]);
    pieces
}

/// Pass 2: period, whitespace, upper-case letter
fn split_sentences(block: &str) -> Vec<String> {
    let text = collapse_whitespace(block);
    let offsets = SENTENCE_BOUNDARY
        .find_iter(&text)
        .map(|m| m.end() - 1)
        .collect::<Vec<_>>();

    split_at_offsets(&text, offsets.into_iter())
        .into_iter()
        .filter_map(clean)
        .map(|fragment| {
            if fragment.ends_with(['.', '!', '?']) {
                fragment
            } else {
                format!("{}.", fragment)
            }
        })
        .filter(|fragment| fragment.chars().count() >= MIN_SENTENCE_LEN)
        .collect()
}

/// Pass 3: before a known opening word that follows a period
fn split_openers(block: &str) -> Vec<String> {
    let text = collapse_whitespace(block);
    let offsets = OPENER_BOUNDARY
        .captures_iter(&text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.start())
        .collect::<Vec<_>>();

    split_at_offsets(&text, offsets.into_iter())
        .into_iter()
        .filter_map(clean)
        .collect()
}

fn dedupe(fragments: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    fragments
        .into_iter()
        .filter(|fragment| seen.insert(fragment.clone()))
        .collect()
}
