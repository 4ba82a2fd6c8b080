//! Configuration for the Extractor

use serde::{Deserialize, Serialize};

/// Inclusive range of 1-based page numbers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRange {
    /// First page searched
    pub first: u32,
    /// Last page searched
    pub last: u32,
}

impl PageRange {
    /// Create a range
    pub fn new(first: u32, last: u32) -> Self {
        Self { first, last }
    }

    /// Page numbers in ascending order
    pub fn pages(&self) -> impl Iterator<Item = u32> {
        self.first..=self.last
    }
}

/// Where each report section lives and how the layout is labelled
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Page holding the unit identity heading
    pub identity_page: u32,

    /// Page holding response statistics and percentage agreement
    pub statistics_page: u32,

    /// Page holding the benchmark table
    pub benchmark_page: u32,

    /// Pages holding per-question distributions
    pub distribution_pages: PageRange,

    /// Pages searched for the comments block; the first page containing it wins
    pub comment_pages: PageRange,

    /// Documents with fewer pages yield an empty record
    pub min_page_count: u32,

    /// Label introducing the institution-wide benchmark row
    pub institution_label: String,
}

impl ExtractorConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        let single_pages = [
            ("identity_page", self.identity_page),
            ("statistics_page", self.statistics_page),
            ("benchmark_page", self.benchmark_page),
        ];
        for (name, page) in single_pages {
            if page == 0 {
                return Err(format!("{} must be 1 or greater (pages are 1-based)", name));
            }
        }

        for (name, range) in [
            ("distribution_pages", self.distribution_pages),
            ("comment_pages", self.comment_pages),
        ] {
            if range.first == 0 {
                return Err(format!("{} must start at page 1 or later", name));
            }
            if range.first > range.last {
                return Err(format!(
                    "{} is empty: first page {} is after last page {}",
                    name, range.first, range.last
                ));
            }
        }

        if self.institution_label.trim().is_empty() {
            return Err("institution_label cannot be empty".to_string());
        }
        Ok(())
    }
}

impl Default for ExtractorConfig {
    /// Layout of the standard unit survey report
    fn default() -> Self {
        Self {
            identity_page: 1,
            statistics_page: 3,
            benchmark_page: 4,
            distribution_pages: PageRange::new(5, 7),
            comment_pages: PageRange::new(8, 10),
            min_page_count: 3,
            institution_label: "Curtin".to_string(),
        }
    }
}

impl ExtractorConfig {
    /// Extended preset: searches wider page ranges for reports with extra pages
    pub fn extended() -> Self {
        Self {
            distribution_pages: PageRange::new(5, 8),
            comment_pages: PageRange::new(7, 12),
            ..Self::default()
        }
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}
