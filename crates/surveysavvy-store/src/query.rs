//! Read-back queries over stored surveys

use rusqlite::{params, OptionalExtension, Row};
use surveysavvy_domain::{DeliveryMode, OfferingKey, Term};

use crate::error::StoreError;
use crate::store::SqliteSurveyStore;

/// Tables that [`SqliteSurveyStore::table_count`] accepts
pub const TABLES: [&str; 9] = [
    "discipline",
    "unit",
    "unit_offering",
    "survey_event",
    "question",
    "unit_survey",
    "unit_survey_result",
    "benchmark",
    "comment",
];

/// A persisted survey with counts of its child rows
#[derive(Debug, Clone, PartialEq)]
pub struct StoredSurvey {
    /// Survey row id
    pub survey_id: i64,
    /// Unit code
    pub unit_code: String,
    /// Unit title
    pub unit_name: String,
    /// Academic year
    pub year: i32,
    /// Academic term
    pub term: Term,
    /// Campus
    pub campus: String,
    /// Delivery mode
    pub mode: DeliveryMode,
    /// Enrolled students
    pub enrollments: u32,
    /// Responses
    pub responses: u32,
    /// Response rate percentage
    pub response_rate: f64,
    /// Overall experience agreement
    pub overall_experience: f64,
    /// Per-question result rows
    pub result_count: u32,
    /// Benchmark rows
    pub benchmark_count: u32,
    /// Comment rows
    pub comment_count: u32,
}

/// Criteria for listing surveys
#[derive(Debug, Clone, Default)]
pub struct SurveyFilter {
    /// Filter by unit code prefix (e.g. `ISYS` or `ISYS2001`)
    pub unit_code: Option<String>,

    /// Filter by year
    pub year: Option<i32>,

    /// Maximum results to return
    pub limit: Option<usize>,
}

const SURVEY_SELECT: &str = "
    SELECT s.survey_id, o.unit_code, u.unit_name, o.year, o.term, o.location, o.availability,
           s.enrolments, s.responses, s.response_rate, s.overall_experience,
           (SELECT COUNT(*) FROM unit_survey_result r WHERE r.survey_id = s.survey_id),
           (SELECT COUNT(*) FROM benchmark b WHERE b.survey_id = s.survey_id),
           (SELECT COUNT(*) FROM comment c WHERE c.survey_id = s.survey_id)
    FROM unit_survey s
    JOIN unit_offering o ON o.unit_offering_id = s.unit_offering_id
    JOIN unit u ON u.unit_code = o.unit_code
    JOIN survey_event e ON e.event_id = s.event_id";

fn conversion_error(column: usize, message: String) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(
        column,
        rusqlite::types::Type::Text,
        Box::new(StoreError::InvalidData(message)),
    )
}

fn survey_from_row(row: &Row<'_>) -> rusqlite::Result<StoredSurvey> {
    let term: String = row.get(4)?;
    let term = Term::parse(&term).ok_or_else(|| conversion_error(4, format!("Unknown term: {}", term)))?;

    let mode: String = row.get(6)?;
    let mode = DeliveryMode::parse(&mode)
        .ok_or_else(|| conversion_error(6, format!("Unknown delivery mode: {}", mode)))?;

    Ok(StoredSurvey {
        survey_id: row.get(0)?,
        unit_code: row.get(1)?,
        unit_name: row.get(2)?,
        year: row.get(3)?,
        term,
        campus: row.get(5)?,
        mode,
        enrollments: row.get(7)?,
        responses: row.get(8)?,
        response_rate: row.get(9)?,
        overall_experience: row.get(10)?,
        result_count: row.get(11)?,
        benchmark_count: row.get(12)?,
        comment_count: row.get(13)?,
    })
}

impl SqliteSurveyStore {
    /// The stored survey for an offering, if any
    pub fn find_survey(&self, key: &OfferingKey) -> Result<Option<StoredSurvey>, StoreError> {
        let sql = format!(
            "{} WHERE o.unit_code = ?1 AND o.year = ?2 AND o.term = ?3
                AND o.location = ?4 AND o.availability = ?5",
            SURVEY_SELECT
        );
        let survey = self
            .conn
            .query_row(
                &sql,
                params![
                    key.unit_code.as_str(),
                    key.year,
                    key.term.to_string(),
                    key.campus,
                    key.mode.as_str()
                ],
                survey_from_row,
            )
            .optional()?;
        Ok(survey)
    }

    /// Stored surveys matching the filter, newest period first
    pub fn list_surveys(&self, filter: &SurveyFilter) -> Result<Vec<StoredSurvey>, StoreError> {
        let mut sql = format!("{} WHERE 1=1", SURVEY_SELECT);
        let mut params: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(unit_code) = &filter.unit_code {
            sql.push_str(" AND o.unit_code LIKE ?");
            params.push(Box::new(format!("{}%", unit_code.to_uppercase())));
        }

        if let Some(year) = filter.year {
            sql.push_str(" AND o.year = ?");
            params.push(Box::new(year));
        }

        sql.push_str(" ORDER BY o.year DESC, e.month DESC, o.unit_code, o.location");

        if let Some(limit) = filter.limit {
            sql.push_str(" LIMIT ?");
            params.push(Box::new(limit as i64));
        }

        let mut stmt = self.conn.prepare(&sql)?;
        let param_refs: Vec<&dyn rusqlite::ToSql> = params.iter().map(|p| p.as_ref()).collect();

        let surveys = stmt
            .query_map(&param_refs[..], survey_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(surveys)
    }

    /// Number of rows in one of the schema's tables
    pub fn table_count(&self, table: &str) -> Result<u64, StoreError> {
        if !TABLES.contains(&table) {
            return Err(StoreError::InvalidData(format!("Unknown table: {}", table)));
        }
        let count: i64 = self
            .conn
            .query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| row.get(0))?;
        Ok(count as u64)
    }
}
