//! List command implementation.

use crate::cli::ListArgs;
use crate::error::Result;
use crate::output::Formatter;
use std::path::Path;
use surveysavvy_store::{SqliteSurveyStore, SurveyFilter};

/// Execute the list command.
pub fn execute_list(args: ListArgs, database: &Path, formatter: &Formatter) -> Result<()> {
    let store = SqliteSurveyStore::new(database)?;

    let filter = SurveyFilter {
        unit_code: args.unit,
        year: args.year,
        limit: args.limit,
    };
    let surveys = store.list_surveys(&filter)?;

    println!("{}", formatter.format_surveys(&surveys)?);
    Ok(())
}
