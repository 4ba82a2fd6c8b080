//! Unit module - identity of a surveyed unit offering

use std::fmt;

/// A unit code: upper-case letters followed by digits (e.g. `ISYS2001`)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UnitCode(String);

impl UnitCode {
    /// Parse a unit code, rejecting anything that is not letters-then-digits
    ///
    /// # Examples
    ///
    /// ```
    /// use surveysavvy_domain::UnitCode;
    ///
    /// let code = UnitCode::parse("ISYS2001").unwrap();
    /// assert_eq!(code.prefix(), "ISYS");
    /// assert!(UnitCode::parse("2001ISYS").is_none());
    /// ```
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        let split = value.find(|c: char| c.is_ascii_digit())?;
        let (letters, digits) = value.split_at(split);

        if letters.is_empty() || !letters.chars().all(|c| c.is_ascii_uppercase()) {
            return None;
        }
        if !digits.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }

        Some(Self(value.to_string()))
    }

    /// Get the code as a string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Letter prefix of the code, used to resolve the discipline
    pub fn prefix(&self) -> &str {
        let end = self.0.find(|c: char| c.is_ascii_digit()).unwrap_or(self.0.len());
        &self.0[..end]
    }
}

impl fmt::Display for UnitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How a unit offering is delivered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeliveryMode {
    /// On-campus delivery
    Internal,
    /// Fully online delivery
    Online,
}

impl DeliveryMode {
    /// Get the mode name as printed in reports
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryMode::Internal => "Internal",
            DeliveryMode::Online => "Online",
        }
    }

    /// Parse a delivery mode (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "internal" => Some(DeliveryMode::Internal),
            "online" => Some(DeliveryMode::Online),
            _ => None,
        }
    }
}

impl fmt::Display for DeliveryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DeliveryMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid delivery mode: {}", s))
    }
}

/// Academic term of an offering
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Term {
    /// Semester N
    Semester(u8),
    /// Trimester N
    Trimester(u8),
}

impl Term {
    /// Parse a term label such as `Semester 1` or `trimester  2`
    pub fn parse(s: &str) -> Option<Self> {
        let mut parts = s.split_whitespace();
        let kind = parts.next()?.to_lowercase();
        let number: u8 = parts.next()?.parse().ok()?;
        if parts.next().is_some() || number == 0 {
            return None;
        }

        match kind.as_str() {
            "semester" => Some(Term::Semester(number)),
            "trimester" => Some(Term::Trimester(number)),
            _ => None,
        }
    }

    /// Canonical label, e.g. `Semester 1`
    pub fn label(&self) -> String {
        self.to_string()
    }

    /// Month in which the survey for this term is run
    pub fn survey_month(&self) -> u8 {
        match self {
            Term::Semester(1) => 5,
            Term::Semester(_) => 10,
            Term::Trimester(1) => 3,
            Term::Trimester(2) => 7,
            Term::Trimester(_) => 11,
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Semester(n) => write!(f, "Semester {}", n),
            Term::Trimester(n) => write!(f, "Trimester {}", n),
        }
    }
}

impl std::str::FromStr for Term {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid term: {}", s))
    }
}

/// Identity fields that must all be present before a record is importable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequiredField {
    /// Unit code
    UnitCode,
    /// Unit title
    UnitTitle,
    /// Academic year
    Year,
    /// Academic term
    Term,
    /// Campus name
    Campus,
    /// Delivery mode
    Mode,
}

impl RequiredField {
    /// Human-readable field name
    pub fn as_str(&self) -> &'static str {
        match self {
            RequiredField::UnitCode => "unit code",
            RequiredField::UnitTitle => "unit title",
            RequiredField::Year => "year",
            RequiredField::Term => "term",
            RequiredField::Campus => "campus",
            RequiredField::Mode => "mode",
        }
    }
}

impl fmt::Display for RequiredField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unit identity as recovered from a report; every field is independently optional
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UnitIdentity {
    /// Unit code
    pub code: Option<UnitCode>,

    /// Unit title
    pub title: Option<String>,

    /// Campus name as printed
    pub campus: Option<String>,

    /// Delivery mode
    pub mode: Option<DeliveryMode>,

    /// Academic term
    pub term: Option<Term>,

    /// Academic year
    pub year: Option<i32>,
}

impl UnitIdentity {
    /// Required fields that are absent, in a fixed order
    pub fn missing_fields(&self) -> Vec<RequiredField> {
        let mut missing = Vec::new();
        if self.code.is_none() {
            missing.push(RequiredField::UnitCode);
        }
        if self.title.as_deref().map_or(true, |t| t.trim().is_empty()) {
            missing.push(RequiredField::UnitTitle);
        }
        if self.year.is_none() {
            missing.push(RequiredField::Year);
        }
        if self.term.is_none() {
            missing.push(RequiredField::Term);
        }
        if self.campus.as_deref().map_or(true, |c| c.trim().is_empty()) {
            missing.push(RequiredField::Campus);
        }
        if self.mode.is_none() {
            missing.push(RequiredField::Mode);
        }
        missing
    }

    /// The duplicate-detection key, if every component is present
    pub fn offering_key(&self) -> Option<OfferingKey> {
        Some(OfferingKey {
            unit_code: self.code.clone()?,
            year: self.year?,
            term: self.term?,
            campus: self.campus.clone().filter(|c| !c.trim().is_empty())?,
            mode: self.mode?,
        })
    }
}

/// Natural key of a unit offering: unit + year + term + campus + mode
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OfferingKey {
    /// Unit code
    pub unit_code: UnitCode,
    /// Academic year
    pub year: i32,
    /// Academic term
    pub term: Term,
    /// Campus name
    pub campus: String,
    /// Delivery mode
    pub mode: DeliveryMode,
}

impl OfferingKey {
    /// Same key with a replaced campus name
    pub fn with_campus(mut self, campus: impl Into<String>) -> Self {
        self.campus = campus.into();
        self
    }

    /// Period label, e.g. `Semester 1 2024`
    pub fn period(&self) -> String {
        format!("{} {}", self.term, self.year)
    }
}

impl fmt::Display for OfferingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} ({}, {})",
            self.unit_code,
            self.period(),
            self.campus,
            self.mode
        )
    }
}
