//! Configuration for import runs
//!
//! Controls discipline resolution and campus normalization.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use surveysavvy_domain::UnitCode;

/// A discipline row: code plus display name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discipline {
    /// Discipline code
    pub code: String,
    /// Discipline name
    pub name: String,
}

impl Discipline {
    /// Create a discipline
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }
}

/// Configuration for the ImportCoordinator
///
/// # Examples
///
/// ```
/// use surveysavvy_importer::ImportConfig;
///
/// let config = ImportConfig::default();
/// assert_eq!(config.default_discipline.code, "GENERAL");
/// assert_eq!(config.disciplines["ISYS"], "Information Systems");
///
/// // No prefix map: every unit lands in the default discipline
/// let config = ImportConfig::minimal();
/// assert!(config.disciplines.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    /// Discipline used when a unit's prefix is not in `disciplines`
    pub default_discipline: Discipline,

    /// Unit-code letter prefix to discipline name
    pub disciplines: BTreeMap<String, String>,

    /// Campus spelling variant (matched case-insensitively) to canonical name
    pub campus_aliases: BTreeMap<String, String>,
}

impl Default for ImportConfig {
    fn default() -> Self {
        let disciplines = [
            ("ACCT", "Accounting"),
            ("BUSN", "Business"),
            ("COMP", "Computer Science"),
            ("ISYS", "Information Systems"),
            ("MGMT", "Management"),
            ("MKTG", "Marketing"),
        ]
        .into_iter()
        .map(|(prefix, name)| (prefix.to_string(), name.to_string()))
        .collect();

        let campus_aliases = [
            ("Bentley", "Bentley Perth"),
            ("Perth", "Bentley Perth"),
            ("Bentley-Perth", "Bentley Perth"),
        ]
        .into_iter()
        .map(|(alias, canonical)| (alias.to_string(), canonical.to_string()))
        .collect();

        Self {
            default_discipline: Discipline::new("GENERAL", "General"),
            disciplines,
            campus_aliases,
        }
    }
}

impl ImportConfig {
    /// No discipline prefixes or campus aliases
    pub fn minimal() -> Self {
        Self {
            disciplines: BTreeMap::new(),
            campus_aliases: BTreeMap::new(),
            ..Self::default()
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.default_discipline.code.trim().is_empty() {
            return Err("default_discipline.code cannot be empty".to_string());
        }
        if self.default_discipline.name.trim().is_empty() {
            return Err("default_discipline.name cannot be empty".to_string());
        }

        for (prefix, name) in &self.disciplines {
            if prefix.is_empty() || !prefix.chars().all(|c| c.is_ascii_uppercase()) {
                return Err(format!(
                    "discipline prefix '{}' must be upper-case letters",
                    prefix
                ));
            }
            if name.trim().is_empty() {
                return Err(format!("discipline name for '{}' cannot be empty", prefix));
            }
        }

        for (alias, canonical) in &self.campus_aliases {
            if alias.trim().is_empty() || canonical.trim().is_empty() {
                return Err(format!(
                    "campus alias '{}' -> '{}' must not be blank",
                    alias, canonical
                ));
            }
        }
        Ok(())
    }

    /// Discipline for a unit: mapped by letter prefix, else the default
    pub fn discipline_for(&self, code: &UnitCode) -> Discipline {
        let prefix = code.prefix();
        match self.disciplines.get(prefix) {
            Some(name) => Discipline::new(prefix, name.clone()),
            None => self.default_discipline.clone(),
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
