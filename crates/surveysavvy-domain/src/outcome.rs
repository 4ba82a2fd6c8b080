//! Outcome module - per-document import results and batch totals

use std::fmt;

/// Result of importing a single document
#[derive(Debug, Clone, PartialEq)]
pub enum ImportOutcome {
    /// All rows for the document were committed
    Imported {
        /// Unit code of the survey
        unit_code: String,
        /// Period label, e.g. `Semester 1 2024`
        period: String,
    },
    /// A survey for the same offering already exists; nothing was written
    Duplicate {
        /// Unit code of the survey
        unit_code: String,
        /// Period label
        period: String,
    },
    /// Extraction, validation or persistence failed; nothing was written
    Failed {
        /// Human-readable reason
        reason: String,
    },
}

impl ImportOutcome {
    /// Failure outcome from any displayable reason
    pub fn failed(reason: impl fmt::Display) -> Self {
        ImportOutcome::Failed {
            reason: reason.to_string(),
        }
    }

    /// Status name
    pub fn status(&self) -> &'static str {
        match self {
            ImportOutcome::Imported { .. } => "imported",
            ImportOutcome::Duplicate { .. } => "duplicate",
            ImportOutcome::Failed { .. } => "failed",
        }
    }

    /// Unit and period for successful or duplicate outcomes, error text otherwise
    pub fn detail(&self) -> String {
        match self {
            ImportOutcome::Imported { unit_code, period }
            | ImportOutcome::Duplicate { unit_code, period } => {
                format!("{} {}", unit_code, period)
            }
            ImportOutcome::Failed { reason } => reason.clone(),
        }
    }
}

/// Outcome for one file in a batch
#[derive(Debug, Clone, PartialEq)]
pub struct FileReport {
    /// File name (without directories)
    pub file_name: String,
    /// What happened
    pub outcome: ImportOutcome,
}

/// Counts and per-file detail for an import batch
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportBatchSummary {
    /// Documents imported
    pub imported: usize,
    /// Documents skipped as duplicates
    pub duplicates: usize,
    /// Documents that failed
    pub failed: usize,
    /// Per-file outcomes in input order
    pub files: Vec<FileReport>,
}

impl ImportBatchSummary {
    /// Create an empty summary
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one file's outcome
    pub fn record(&mut self, file_name: impl Into<String>, outcome: ImportOutcome) {
        match outcome {
            ImportOutcome::Imported { .. } => self.imported += 1,
            ImportOutcome::Duplicate { .. } => self.duplicates += 1,
            ImportOutcome::Failed { .. } => self.failed += 1,
        }
        self.files.push(FileReport {
            file_name: file_name.into(),
            outcome,
        });
    }

    /// Number of documents processed
    pub fn total(&self) -> usize {
        self.files.len()
    }

    /// One-line summary
    pub fn summary(&self) -> String {
        format!(
            "Processed {} document(s): {} imported, {} duplicate(s), {} failed",
            self.total(),
            self.imported,
            self.duplicates,
            self.failed
        )
    }
}
