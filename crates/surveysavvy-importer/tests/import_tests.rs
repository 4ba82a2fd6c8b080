//! Integration tests for surveysavvy-importer
//!
//! Documents come from an in-memory loader; surveys go to a real SQLite store.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use surveysavvy_domain::{
    DeliveryMode, DocumentLoader, ImportOutcome, OfferingKey, Sentiment, SurveyStore, SurveyWrite,
    Term, UnitCode,
};
use surveysavvy_extractor::{ExtractorConfig, PageTexts, SurveyExtractor};
use surveysavvy_importer::{ImportConfig, ImportCoordinator};
use surveysavvy_store::{SqliteSurveyStore, StoreError};

/// Loader serving page text registered per path
#[derive(Default)]
struct MemoryLoader {
    documents: HashMap<PathBuf, PageTexts>,
}

impl MemoryLoader {
    fn with(mut self, path: &str, pages: PageTexts) -> Self {
        self.documents.insert(PathBuf::from(path), pages);
        self
    }
}

impl DocumentLoader for MemoryLoader {
    type Document = PageTexts;
    type Error = String;

    fn load(&self, path: &Path) -> Result<PageTexts, String> {
        self.documents
            .get(path)
            .cloned()
            .ok_or_else(|| format!("no such document: {}", path.display()))
    }
}

/// Store whose n-th transaction fails part-way through
struct FlakyStore {
    inner: SqliteSurveyStore,
    fail_on: usize,
    calls: usize,
}

impl SurveyStore for FlakyStore {
    type Error = StoreError;

    fn duplicate_exists(&self, key: &OfferingKey) -> Result<bool, StoreError> {
        self.inner.duplicate_exists(key)
    }

    fn run_in_transaction(&mut self, writes: &[SurveyWrite]) -> Result<(), StoreError> {
        self.calls += 1;
        if self.calls != self.fail_on {
            return self.inner.run_in_transaction(writes);
        }

        // a comment ahead of its survey makes the store reject the batch after
        // the parent rows are already inserted
        let mut broken = writes.to_vec();
        let survey_at = broken
            .iter()
            .position(|w| w.table() == "unit_survey")
            .unwrap_or(broken.len());
        broken.insert(
            survey_at,
            SurveyWrite::Comment {
                text: "orphan".to_string(),
                sentiment: Sentiment::neutral(),
            },
        );
        self.inner.run_in_transaction(&broken)
    }
}

fn report(code: &str, campus: &str, enrolments: u32, responses: u32, rate: &str) -> PageTexts {
    let identity = format!(
        "Unit Survey Report\n{} Introduction to Testing - Semester 1 2024 - {} Campus - Internal",
        code, campus
    );
    let statistics = format!(
        "Response Statistics\n# Enrolments\n(N)\n# Responses\nResponse Rate\n{} {} {}\n\
         Percentage Agreement\n\
         I was engaged by the learning activities 80.0%\n\
         The resources provided helped me to learn 76.0%\n\
         My learning was supported 72.0%\n\
         Assessments helped me to demonstrate my learning 68.0%\n\
         I knew what was expected of me 88.0%\n\
         Overall, this unit was a worthwhile experience 84.0%",
        enrolments, responses, rate
    );
    let benchmarks = format!(
        "Benchmarks\n\
         Unit - {} 80.0% 25 76.0% 25 72.0% 25 68.0% 25 88.0% 25 84.0% 25\n\
         School - School of Computing 78.5% 410 74.1% 409 70.2% 411 66.0% 405 85.3% 410 80.9% 408",
        code
    );
    let distribution = "My learning was supported\n\
         1 Strongly Disagree 1 4.0%\n\
         2 Disagree 2 8.0%\n\
         3 Neither Agree nor Disagree 4 16.0%\n\
         4 Agree 10 40.0%\n\
         5 Strongly Agree 8 32.0%\n\
         Agreement 72.0%\n\
         Base (above) 25";
    let comments = "What are the main reasons for your rating?\n\
         Comments\n\
         The lectures were great and really helpful\n\
         Assessments were confusing and the feedback was poor\n\
         Weekly labs ran on Tuesdays";

    PageTexts::from_pages([
        identity.as_str(),
        "Contents",
        statistics.as_str(),
        benchmarks.as_str(),
        "Question results",
        distribution,
        "",
        "Open-ended responses",
        comments,
        "End of report",
    ])
}

fn extractor() -> SurveyExtractor {
    SurveyExtractor::new(ExtractorConfig::default()).unwrap()
}

fn importer<S>(loader: MemoryLoader, store: S) -> ImportCoordinator<MemoryLoader, S>
where
    S: SurveyStore,
    S::Error: std::fmt::Display,
{
    ImportCoordinator::new(loader, store, extractor(), ImportConfig::default()).unwrap()
}

fn offering(code: &str, campus: &str) -> OfferingKey {
    OfferingKey {
        unit_code: UnitCode::parse(code).unwrap(),
        year: 2024,
        term: Term::Semester(1),
        campus: campus.to_string(),
        mode: DeliveryMode::Internal,
    }
}

#[test]
fn test_end_to_end_import() {
    let loader = MemoryLoader::default().with("abcd.pdf", report("ABCD1234", "North", 100, 25, "25.0"));
    let store = SqliteSurveyStore::in_memory().unwrap();

    let mut importer = importer(loader, store);
    let summary = importer.import_batch(&["abcd.pdf"]);

    assert_eq!(summary.imported, 1);
    assert_eq!(summary.duplicates, 0);
    assert_eq!(summary.failed, 0);
    assert_eq!(
        summary.files[0].outcome,
        ImportOutcome::Imported {
            unit_code: "ABCD1234".to_string(),
            period: "Semester 1 2024".to_string(),
        }
    );

    let store = importer.into_store();
    let survey = store
        .find_survey(&offering("ABCD1234", "North"))
        .unwrap()
        .expect("survey persisted");
    assert_eq!(survey.enrollments, 100);
    assert_eq!(survey.responses, 25);
    assert_eq!(survey.response_rate, 25.0);
    assert_eq!(survey.overall_experience, 84.0);
    assert_eq!(survey.result_count, 1);
    assert_eq!(survey.benchmark_count, 12);
    assert_eq!(survey.comment_count, 3);
    assert_eq!(store.table_count("discipline").unwrap(), 1);
}

#[test]
fn test_same_document_twice_is_duplicate() {
    let loader = MemoryLoader::default().with("abcd.pdf", report("ABCD1234", "North", 100, 25, "25.0"));
    let mut importer = importer(loader, SqliteSurveyStore::in_memory().unwrap());

    let summary = importer.import_batch(&["abcd.pdf", "abcd.pdf"]);

    assert_eq!(summary.imported, 1);
    assert_eq!(summary.duplicates, 1);
    assert_eq!(summary.files[1].outcome.status(), "duplicate");

    let store = importer.store();
    assert_eq!(store.table_count("unit_survey").unwrap(), 1);
    assert_eq!(store.table_count("comment").unwrap(), 3);
    assert_eq!(store.table_count("benchmark").unwrap(), 12);
}

#[test]
fn test_campus_alias_makes_duplicate() {
    let loader = MemoryLoader::default()
        .with("bentley.pdf", report("ISYS2001", "Bentley", 100, 25, "25.0"))
        .with("perth.pdf", report("ISYS2001", "Perth", 100, 25, "25.0"));
    let mut importer = importer(loader, SqliteSurveyStore::in_memory().unwrap());

    let summary = importer.import_batch(&["bentley.pdf", "perth.pdf"]);

    assert_eq!(summary.imported, 1);
    assert_eq!(summary.duplicates, 1);
    assert!(importer
        .store()
        .duplicate_exists(&offering("ISYS2001", "Bentley Perth"))
        .unwrap());
}

#[test]
fn test_missing_fields_write_nothing() {
    let mut pages = report("ABCD1234", "North", 100, 25, "25.0");
    pages.insert(1, "Unit Survey Report\nABCD1234 Introduction to Testing - Semester 1 2024");
    let loader = MemoryLoader::default().with("partial.pdf", pages);
    let mut importer = importer(loader, SqliteSurveyStore::in_memory().unwrap());

    let summary = importer.import_batch(&["partial.pdf"]);

    assert_eq!(summary.failed, 1);
    assert_eq!(
        summary.files[0].outcome.detail(),
        "missing required fields: campus, mode"
    );
    for table in ["discipline", "unit", "unit_offering", "survey_event", "unit_survey"] {
        assert_eq!(importer.store().table_count(table).unwrap(), 0, "{} should be empty", table);
    }
}

#[test]
fn test_short_document_fails() {
    let loader = MemoryLoader::default().with("short.pdf", PageTexts::from_pages(["Cover", "Blank"]));
    let mut importer = importer(loader, SqliteSurveyStore::in_memory().unwrap());

    let summary = importer.import_batch(&["short.pdf"]);

    assert_eq!(summary.failed, 1);
    assert!(summary.files[0]
        .outcome
        .detail()
        .starts_with("missing required fields: unit code"));
}

#[test]
fn test_persistence_failure_is_isolated() {
    let loader = MemoryLoader::default()
        .with("one.pdf", report("ABCD1234", "North", 100, 25, "25.0"))
        .with("two.pdf", report("EFGH5678", "North", 80, 20, "25.0"))
        .with("three.pdf", report("WXYZ9012", "North", 60, 30, "50.0"));
    let store = FlakyStore {
        inner: SqliteSurveyStore::in_memory().unwrap(),
        fail_on: 2,
        calls: 0,
    };
    let mut importer = importer(loader, store);

    let summary = importer.import_batch(&["one.pdf", "two.pdf", "three.pdf"]);

    assert_eq!(summary.imported, 2);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.files[0].outcome.status(), "imported");
    assert_eq!(summary.files[1].outcome.status(), "failed");
    assert!(summary.files[1].outcome.detail().contains("written before its survey"));
    assert_eq!(summary.files[2].outcome.status(), "imported");

    let store = importer.into_store().inner;
    assert_eq!(store.table_count("unit_survey").unwrap(), 2);
    assert_eq!(store.table_count("unit_offering").unwrap(), 2);
    assert_eq!(store.table_count("unit").unwrap(), 2);
    assert!(store.find_survey(&offering("EFGH5678", "North")).unwrap().is_none());
    assert_eq!(
        store
            .find_survey(&offering("WXYZ9012", "North"))
            .unwrap()
            .unwrap()
            .response_rate,
        50.0
    );
}

#[test]
fn test_unknown_path_fails_and_batch_continues() {
    let loader = MemoryLoader::default().with("abcd.pdf", report("ABCD1234", "North", 100, 25, "25.0"));
    let mut importer = importer(loader, SqliteSurveyStore::in_memory().unwrap());

    let summary = importer.import_batch(&["missing.pdf", "abcd.pdf"]);

    assert_eq!(summary.failed, 1);
    assert_eq!(summary.imported, 1);
    assert!(summary.files[0].outcome.detail().contains("no such document"));
    assert_eq!(
        summary.summary(),
        "Processed 2 document(s): 1 imported, 0 duplicate(s), 1 failed"
    );
}

#[test]
fn test_import_into_database_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("surveys.db");

    {
        let loader = MemoryLoader::default().with("abcd.pdf", report("ABCD1234", "North", 100, 25, "25.0"));
        let mut importer = importer(loader, SqliteSurveyStore::new(&path).unwrap());
        assert_eq!(importer.import_batch(&["abcd.pdf"]).imported, 1);
    }

    let loader = MemoryLoader::default().with("again.pdf", report("ABCD1234", "North", 100, 25, "25.0"));
    let mut importer = importer(loader, SqliteSurveyStore::new(&path).unwrap());
    let summary = importer.import_batch(&["again.pdf"]);

    assert_eq!(summary.duplicates, 1);
}
