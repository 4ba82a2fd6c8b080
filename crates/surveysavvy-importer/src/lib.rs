//! SurveySavvy Importer
//!
//! Batch ingestion of unit-survey report documents.
//!
//! # Overview
//!
//! For each document path the [`ImportCoordinator`]:
//! - **Extracts** a survey record through the extractor
//! - **Validates** that the unit code, title, year, term, campus and mode are present
//! - **Normalizes** the campus name through the configured aliases
//! - **De-duplicates** against surveys already stored for the same offering
//! - **Persists** every row for the document in a single transaction
//!
//! Failures are local to one document and reported in the
//! [`ImportBatchSummary`](surveysavvy_domain::ImportBatchSummary).
//!
//! # Usage
//!
//! ```no_run
//! use surveysavvy_extractor::ExtractorConfig;
//! use surveysavvy_importer::{open_sqlite_importer, ImportConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut importer = open_sqlite_importer(
//!     "surveys.db",
//!     ExtractorConfig::default(),
//!     ImportConfig::default(),
//! )?;
//!
//! let summary = importer.import_batch(&["ISYS2001.pdf", "COMP1002.pdf"]);
//! println!("{}", summary.summary());
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration
//!
//! ```toml
//! [default_discipline]
//! code = "GENERAL"
//! name = "General"
//!
//! [disciplines]
//! ISYS = "Information Systems"
//! COMP = "Computer Science"
//!
//! [campus_aliases]
//! Bentley = "Bentley Perth"
//! ```

#![warn(missing_docs)]

mod campus;
mod config;
mod coordinator;
mod error;
mod plan;

use std::path::Path;

use surveysavvy_extractor::{ExtractorConfig, PdfLoader, SurveyExtractor};
use surveysavvy_store::SqliteSurveyStore;

pub use campus::CampusNormalizer;
pub use config::{Discipline, ImportConfig};
pub use coordinator::ImportCoordinator;
pub use error::ImportError;
pub use plan::plan_writes;

/// Coordinator reading PDFs into a SQLite database
pub type SqliteImporter = ImportCoordinator<PdfLoader, SqliteSurveyStore>;

/// Open (or create) the database at `database` and build a PDF importer for it
pub fn open_sqlite_importer<P: AsRef<Path>>(
    database: P,
    extractor_config: ExtractorConfig,
    import_config: ImportConfig,
) -> Result<SqliteImporter, ImportError> {
    let store = SqliteSurveyStore::new(database)?;
    let extractor = SurveyExtractor::new(extractor_config)?;
    ImportCoordinator::new(PdfLoader::new(), store, extractor, import_config)
}
