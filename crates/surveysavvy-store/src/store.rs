//! SQLite implementation of [`SurveyStore`]

use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension, Transaction};
use surveysavvy_domain::{MetricKey, OfferingKey, SurveyStore, SurveyWrite};
use tracing::debug;

use crate::error::StoreError;

/// Survey store backed by SQLite
///
/// SQLite connections are not thread-safe. Each thread should open its own store.
pub struct SqliteSurveyStore {
    pub(crate) conn: Connection,
}

impl SqliteSurveyStore {
    /// Open (or create) a database and apply the schema
    ///
    /// Use `:memory:` for an in-memory database (useful for testing).
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use surveysavvy_store::SqliteSurveyStore;
    ///
    /// let store = SqliteSurveyStore::new("surveys.db").unwrap();
    /// ```
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        let mut store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Open a fresh in-memory database
    pub fn in_memory() -> Result<Self, StoreError> {
        Self::new(":memory:")
    }

    /// Create tables and seed the question catalogue
    fn initialize_schema(&mut self) -> Result<(), StoreError> {
        self.conn.execute_batch(include_str!("schema.sql"))?;

        for key in MetricKey::ALL {
            self.conn.execute(
                "INSERT OR IGNORE INTO question (metric_key, question_text) VALUES (?1, ?2)",
                params![key.as_str(), key.question_text()],
            )?;
        }
        Ok(())
    }
}

/// Row ids produced earlier in the same transaction
#[derive(Debug, Default)]
struct WriteContext {
    offering_id: Option<i64>,
    event_id: Option<i64>,
    survey_id: Option<i64>,
}

impl WriteContext {
    fn survey_id(&self, table: &str) -> Result<i64, StoreError> {
        self.survey_id.ok_or_else(|| {
            StoreError::InvalidData(format!("{} row written before its survey", table))
        })
    }
}

fn question_id(tx: &Transaction<'_>, metric: MetricKey) -> Result<i64, StoreError> {
    tx.query_row(
        "SELECT question_id FROM question WHERE metric_key = ?1",
        params![metric.as_str()],
        |row| row.get(0),
    )
    .optional()?
    .ok_or_else(|| StoreError::NotFound(format!("question for metric {}", metric)))
}

fn apply(tx: &Transaction<'_>, ctx: &mut WriteContext, write: &SurveyWrite) -> Result<(), StoreError> {
    match write {
        SurveyWrite::Discipline { code, name } => {
            tx.execute(
                "INSERT OR IGNORE INTO discipline (discipline_code, discipline_name) VALUES (?1, ?2)",
                params![code, name],
            )?;
        }
        SurveyWrite::Unit {
            code,
            title,
            discipline_code,
        } => {
            tx.execute(
                "INSERT OR IGNORE INTO unit (unit_code, unit_name, discipline_code) VALUES (?1, ?2, ?3)",
                params![code.as_str(), title, discipline_code],
            )?;
        }
        SurveyWrite::Offering(key) => {
            let term = key.term.to_string();
            tx.execute(
                "INSERT OR IGNORE INTO unit_offering (unit_code, year, term, location, availability)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![key.unit_code.as_str(), key.year, term, key.campus, key.mode.as_str()],
            )?;
            let id = tx.query_row(
                "SELECT unit_offering_id FROM unit_offering
                 WHERE unit_code = ?1 AND year = ?2 AND term = ?3 AND location = ?4 AND availability = ?5",
                params![key.unit_code.as_str(), key.year, term, key.campus, key.mode.as_str()],
                |row| row.get(0),
            )?;
            ctx.offering_id = Some(id);
        }
        SurveyWrite::SurveyEvent {
            year,
            term,
            month,
            description,
        } => {
            let term = term.to_string();
            tx.execute(
                "INSERT OR IGNORE INTO survey_event (year, term, month, description) VALUES (?1, ?2, ?3, ?4)",
                params![year, term, month, description],
            )?;
            let id = tx.query_row(
                "SELECT event_id FROM survey_event WHERE year = ?1 AND term = ?2",
                params![year, term],
                |row| row.get(0),
            )?;
            ctx.event_id = Some(id);
        }
        SurveyWrite::Survey {
            enrollments,
            responses,
            response_rate,
            overall_experience,
        } => {
            let (offering_id, event_id) = match (ctx.offering_id, ctx.event_id) {
                (Some(offering), Some(event)) => (offering, event),
                _ => {
                    return Err(StoreError::InvalidData(
                        "survey written before its offering and event".to_string(),
                    ))
                }
            };
            tx.execute(
                "INSERT INTO unit_survey (unit_offering_id, event_id, enrolments, responses, response_rate, overall_experience)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![offering_id, event_id, enrollments, responses, response_rate, overall_experience],
            )?;
            ctx.survey_id = Some(tx.last_insert_rowid());
        }
        SurveyWrite::QuestionResult {
            metric,
            counts,
            percent_agree,
        } => {
            let survey_id = ctx.survey_id("unit_survey_result")?;
            let question_id = question_id(tx, *metric)?;
            tx.execute(
                "INSERT INTO unit_survey_result
                 (survey_id, question_id, strongly_disagree, disagree, neutral, agree, strongly_agree, percent_agree)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    survey_id,
                    question_id,
                    counts[0],
                    counts[1],
                    counts[2],
                    counts[3],
                    counts[4],
                    percent_agree
                ],
            )?;
        }
        SurveyWrite::Benchmark {
            metric,
            group,
            group_name,
            percent_agree,
            total_n,
        } => {
            let survey_id = ctx.survey_id("benchmark")?;
            let question_id = question_id(tx, *metric)?;
            tx.execute(
                "INSERT INTO benchmark (survey_id, question_id, group_type, group_name, percent_agree, total_n)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![survey_id, question_id, group.as_str(), group_name, percent_agree, total_n],
            )?;
        }
        SurveyWrite::Comment { text, sentiment } => {
            let survey_id = ctx.survey_id("comment")?;
            tx.execute(
                "INSERT INTO comment (survey_id, comment_text, sentiment_score, sentiment_label)
                 VALUES (?1, ?2, ?3, ?4)",
                params![survey_id, text, sentiment.score, sentiment.label.as_str()],
            )?;
        }
    }
    Ok(())
}

impl SurveyStore for SqliteSurveyStore {
    type Error = StoreError;

    fn duplicate_exists(&self, key: &OfferingKey) -> Result<bool, Self::Error> {
        let exists = self.conn.query_row(
            "SELECT EXISTS(
                 SELECT 1 FROM unit_survey s
                 JOIN unit_offering o ON o.unit_offering_id = s.unit_offering_id
                 WHERE o.unit_code = ?1 AND o.year = ?2 AND o.term = ?3
                   AND o.location = ?4 AND o.availability = ?5
             )",
            params![
                key.unit_code.as_str(),
                key.year,
                key.term.to_string(),
                key.campus,
                key.mode.as_str()
            ],
            |row| row.get(0),
        )?;
        Ok(exists)
    }

    fn run_in_transaction(&mut self, writes: &[SurveyWrite]) -> Result<(), Self::Error> {
        let tx = self.conn.transaction()?;
        let mut ctx = WriteContext::default();

        for write in writes {
            apply(&tx, &mut ctx, write)?;
        }

        tx.commit()?;
        debug!(writes = writes.len(), "Transaction committed");
        Ok(())
    }
}
