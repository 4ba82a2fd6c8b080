//! Import command implementation.

use crate::cli::ImportArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use std::fs;
use std::path::{Path, PathBuf};
use surveysavvy_importer::open_sqlite_importer;

/// Execute the import command.
pub fn execute_import(
    args: ImportArgs,
    config: &Config,
    database: &Path,
    formatter: &Formatter,
) -> Result<()> {
    let mut paths = args.paths;
    if let Some(dir) = &args.dir {
        paths.extend(collect_pdfs(dir)?);
    }

    if paths.is_empty() {
        return Err(CliError::InvalidInput(
            "No PDF files to import; pass paths or --dir".to_string(),
        ));
    }

    super::ensure_parent_dir(database)?;
    let mut importer =
        open_sqlite_importer(database, config.extractor.clone(), config.import.clone())?;
    let summary = importer.import_batch(&paths[..]);

    println!("{}", formatter.format_summary(&summary)?);
    Ok(())
}

/// PDF files directly inside `dir`, sorted by path.
pub fn collect_pdfs(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(CliError::InvalidInput(format!(
            "{} is not a directory",
            dir.display()
        )));
    }

    let mut pdfs = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_pdf = path
            .extension()
            .map_or(false, |ext| ext.to_string_lossy().eq_ignore_ascii_case("pdf"));
        if path.is_file() && is_pdf {
            pdfs.push(path);
        }
    }
    pdfs.sort();
    Ok(pdfs)
}
