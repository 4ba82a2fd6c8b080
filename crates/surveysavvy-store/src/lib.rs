//! SurveySavvy Storage Layer
//!
//! Implements the SurveyStore trait over SQLite.
//!
//! # Architecture
//!
//! - One normalized schema: discipline, unit, offering, survey event,
//!   question catalogue, survey, per-question results, benchmarks, comments
//! - Every document is written inside a single transaction
//! - Duplicate lookup by unit, year, term, campus and mode
//!
//! # Examples
//!
//! ```
//! use surveysavvy_store::SqliteSurveyStore;
//!
//! let store = SqliteSurveyStore::in_memory().unwrap();
//! assert_eq!(store.table_count("question").unwrap(), 6);
//! ```

#![warn(missing_docs)]

mod error;
mod query;
mod store;

pub use error::StoreError;
pub use query::{StoredSurvey, SurveyFilter, TABLES};
pub use store::SqliteSurveyStore;
