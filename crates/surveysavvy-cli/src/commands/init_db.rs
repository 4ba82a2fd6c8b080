//! Init-db command implementation.

use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use std::path::Path;
use surveysavvy_store::SqliteSurveyStore;

/// Execute the init-db command.
///
/// Also writes `config` to `config_path` when no config file exists there yet.
pub fn execute_init_db(
    database: &Path,
    config: &Config,
    config_path: &Path,
    formatter: &Formatter,
) -> Result<()> {
    super::ensure_parent_dir(database)?;
    let store = SqliteSurveyStore::new(database)?;
    let questions = store.table_count("question")?;

    println!(
        "{}",
        formatter.success(&format!(
            "Database ready at {} ({} questions)",
            database.display(),
            questions
        ))
    );

    if !config_path.exists() {
        config.save_to(config_path)?;
        println!(
            "{}",
            formatter.success(&format!("Wrote default config to {}", config_path.display()))
        );
    }
    Ok(())
}
