//! Batch import: extract, validate, de-duplicate and persist each document

use std::fmt::Display;
use std::path::Path;

use surveysavvy_domain::{
    DocumentLoader, ImportBatchSummary, ImportOutcome, PageTextSource, SurveyRecord, SurveyStore,
};
use surveysavvy_extractor::SurveyExtractor;
use tracing::{debug, info, warn};

use crate::campus::CampusNormalizer;
use crate::config::ImportConfig;
use crate::error::ImportError;
use crate::plan::plan_writes;

/// Imports batches of survey report documents into a [`SurveyStore`]
///
/// Documents are processed one at a time, in input order. Each document is
/// written in its own transaction, so a failure leaves earlier and later
/// documents untouched.
///
/// # Examples
///
/// ```no_run
/// use surveysavvy_extractor::{ExtractorConfig, PdfLoader, SurveyExtractor};
/// use surveysavvy_importer::{ImportConfig, ImportCoordinator};
/// use surveysavvy_store::SqliteSurveyStore;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let store = SqliteSurveyStore::new("surveys.db")?;
/// let extractor = SurveyExtractor::new(ExtractorConfig::default())?;
/// let mut importer = ImportCoordinator::new(PdfLoader::new(), store, extractor, ImportConfig::default())?;
///
/// let summary = importer.import_batch(&["reports/ISYS2001.pdf"]);
/// println!("{}", summary.summary());
/// # Ok(())
/// # }
/// ```
pub struct ImportCoordinator<L, S> {
    loader: L,
    store: S,
    extractor: SurveyExtractor,
    config: ImportConfig,
    campus: CampusNormalizer,
}

impl<L, S> ImportCoordinator<L, S>
where
    L: DocumentLoader,
    L::Error: Display,
    <L::Document as PageTextSource>::Error: Display,
    S: SurveyStore,
    S::Error: Display,
{
    /// Create a coordinator; fails if the configuration is invalid
    pub fn new(
        loader: L,
        store: S,
        extractor: SurveyExtractor,
        config: ImportConfig,
    ) -> Result<Self, ImportError> {
        config.validate().map_err(ImportError::Config)?;
        let campus = CampusNormalizer::new(&config.campus_aliases);
        Ok(Self {
            loader,
            store,
            extractor,
            config,
            campus,
        })
    }

    /// The import configuration
    pub fn config(&self) -> &ImportConfig {
        &self.config
    }

    /// The underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Consume the coordinator, returning the store
    pub fn into_store(self) -> S {
        self.store
    }

    /// Import every path in order and summarize the outcomes
    ///
    /// Never aborts early: each document's failure is reported in the summary.
    pub fn import_batch<P: AsRef<Path>>(&mut self, paths: &[P]) -> ImportBatchSummary {
        let mut summary = ImportBatchSummary::new();

        for path in paths {
            let path = path.as_ref();
            let file_name = file_name(path);
            let outcome = self.import_file(path);

            match &outcome {
                ImportOutcome::Imported { unit_code, period } => {
                    info!(file = %file_name, unit = %unit_code, period = %period, "Imported survey");
                }
                ImportOutcome::Duplicate { unit_code, period } => {
                    info!(file = %file_name, unit = %unit_code, period = %period, "Skipped duplicate survey");
                }
                ImportOutcome::Failed { reason } => {
                    warn!(file = %file_name, reason = %reason, "Import failed");
                }
            }

            summary.record(file_name, outcome);
        }

        info!(
            imported = summary.imported,
            duplicates = summary.duplicates,
            failed = summary.failed,
            "{}",
            summary.summary()
        );
        summary
    }

    /// Load, extract and import one document
    pub fn import_file(&mut self, path: &Path) -> ImportOutcome {
        let document = match self.loader.load(path) {
            Ok(document) => document,
            Err(e) => return ImportOutcome::failed(format!("Failed to open document: {}", e)),
        };

        let record = match self.extractor.extract_document(&document) {
            Ok(record) => record,
            Err(e) => return ImportOutcome::failed(e),
        };

        self.import_record(&record)
    }

    /// Validate, de-duplicate and persist an extracted record
    pub fn import_record(&mut self, record: &SurveyRecord) -> ImportOutcome {
        let key = match record.offering_key() {
            Some(key) => key,
            None => {
                return ImportOutcome::failed(format!(
                    "missing required fields: {}",
                    record.missing_summary()
                ))
            }
        };

        let campus = self.campus.normalize(&key.campus);
        if campus != key.campus {
            debug!(from = %key.campus, to = %campus, "Campus normalized");
        }
        let key = key.with_campus(campus);

        let unit_code = key.unit_code.to_string();
        let period = key.period();

        match self.store.duplicate_exists(&key) {
            Ok(true) => return ImportOutcome::Duplicate { unit_code, period },
            Ok(false) => {}
            Err(e) => return ImportOutcome::failed(format!("Duplicate check failed: {}", e)),
        }

        let writes = plan_writes(record, &key, &self.config);
        debug!(unit = %unit_code, writes = writes.len(), "Writing survey");

        match self.store.run_in_transaction(&writes) {
            Ok(()) => ImportOutcome::Imported { unit_code, period },
            Err(e) => ImportOutcome::failed(e),
        }
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
