//! Unit identity recovery from the report's first page

use once_cell::sync::Lazy;
use regex::Regex;
use surveysavvy_domain::{DeliveryMode, Term, UnitCode, UnitIdentity};

use crate::patterns::{collapse_whitespace, first_match, Strategy};

static CODE_TITLE_TERM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b([A-Z]{4}\d{4})\s+(.+?)\s+[-–]\s+(?:Semester|Trimester)\b")
        .expect("valid unit heading pattern")
});

static REPORT_HEADING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"Unit Survey Report\s*[-–]\s*([A-Z]{4}\d{4})\s+([^\n]+)")
        .expect("valid report heading pattern")
});

static CODE_TITLE_DASH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b([A-Z]{4}\d{4})\s+(.+?)(?:\s+[-–]\s+|\s+Semester\b)")
        .expect("valid unit dash pattern")
});

static CAMPUS_KEYWORD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)[-–]\s*([^-–\n]+?)\s+Campus\s*[-–]\s*(Internal|Online)\b")
        .expect("valid campus pattern")
});

static CAMPUS_BARE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)[-–]\s*([^-–\n]+?)\s*[-–]\s*(Internal|Online)\b")
        .expect("valid bare campus pattern")
});

static TERM_YEAR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(Semester\s+[12]|Trimester\s+[123])\s+(\d{4})\b")
        .expect("valid term pattern")
});

static SEMESTER_ONLY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\bSemester\s+(\d+)\s+(\d{4})\b").expect("valid semester pattern")
});

const UNIT_STRATEGIES: [Strategy<(UnitCode, String)>; 3] = [
    Strategy::new("code-title-term", code_title_term),
    Strategy::new("report-heading", report_heading),
    Strategy::new("code-title-dash", code_title_dash),
];

const CAMPUS_STRATEGIES: [Strategy<(String, DeliveryMode)>; 2] = [
    Strategy::new("campus-keyword", campus_keyword),
    Strategy::new("campus-bare", campus_bare),
];

const TERM_STRATEGIES: [Strategy<(Term, i32)>; 2] = [
    Strategy::new("term-year", term_year),
    Strategy::new("semester-only", semester_only),
];

/// Recover whatever identity fields the page text holds
pub fn extract_identity(text: &str) -> UnitIdentity {
    let mut identity = UnitIdentity::default();

    if let Some((code, title)) = first_match("unit", text, &UNIT_STRATEGIES) {
        identity.code = Some(code);
        identity.title = Some(title);
    }
    if let Some((campus, mode)) = first_match("campus", text, &CAMPUS_STRATEGIES) {
        identity.campus = Some(campus);
        identity.mode = Some(mode);
    }
    if let Some((term, year)) = first_match("term", text, &TERM_STRATEGIES) {
        identity.term = Some(term);
        identity.year = Some(year);
    }

    identity
}

fn unit_from(code: &str, title: &str) -> Option<(UnitCode, String)> {
    let code = UnitCode::parse(code)?;
    let title = collapse_whitespace(title);
    let title = title.trim_end_matches(|c: char| c == '-' || c == '–' || c.is_whitespace());
    if title.is_empty() {
        return None;
    }
    Some((code, title.to_string()))
}

fn code_title_term(text: &str) -> Option<(UnitCode, String)> {
    let caps = CODE_TITLE_TERM.captures(text)?;
    unit_from(&caps[1], &caps[2])
}

fn report_heading(text: &str) -> Option<(UnitCode, String)> {
    let caps = REPORT_HEADING.captures(text)?;
    unit_from(&caps[1], &caps[2])
}

fn code_title_dash(text: &str) -> Option<(UnitCode, String)> {
    let caps = CODE_TITLE_DASH.captures(text)?;
    unit_from(&caps[1], &caps[2])
}

fn campus_from(name: &str, mode: &str) -> Option<(String, DeliveryMode)> {
    let name = collapse_whitespace(name);
    if name.is_empty() {
        return None;
    }
    Some((name, DeliveryMode::parse(mode)?))
}

fn campus_keyword(text: &str) -> Option<(String, DeliveryMode)> {
    let caps = CAMPUS_KEYWORD.captures(text)?;
    campus_from(&caps[1], &caps[2])
}

/// Campus names printed without the word "Campus", e.g. `- Institution City - Online`
fn campus_bare(text: &str) -> Option<(String, DeliveryMode)> {
    CAMPUS_BARE
        .captures_iter(text)
        .filter(|caps| !looks_like_term(&caps[1]))
        .find_map(|caps| campus_from(&caps[1], &caps[2]))
}

fn looks_like_term(candidate: &str) -> bool {
    let lowered = candidate.trim().to_lowercase();
    lowered.starts_with("semester") || lowered.starts_with("trimester")
}

fn term_year(text: &str) -> Option<(Term, i32)> {
    let caps = TERM_YEAR.captures(text)?;
    Some((Term::parse(&caps[1])?, caps[2].parse().ok()?))
}

fn semester_only(text: &str) -> Option<(Term, i32)> {
    let caps = SEMESTER_ONLY.captures(text)?;
    let number: u8 = caps[1].parse().ok()?;
    if number == 0 {
        return None;
    }
    Some((Term::Semester(number), caps[2].parse().ok()?))
}
