//! Inspect command implementation.

use crate::cli::InspectArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::{record_to_json, Formatter};
use std::fs;
use std::path::{Path, PathBuf};
use surveysavvy_extractor::{PdfDocument, SurveyExtractor};

/// Execute the inspect command.
pub fn execute_inspect(args: InspectArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let extractor = SurveyExtractor::new(config.extractor.clone())?;
    let document = PdfDocument::open(&args.pdf)?;
    let record = extractor.extract_document(&document)?;

    println!("{}", formatter.format_record(&record)?);

    if let Some(target) = &args.save_json {
        let path = json_target(&args.pdf, target);
        let json = serde_json::to_string_pretty(&record_to_json(&record))?;
        fs::write(&path, json)?;
        println!(
            "{}",
            formatter.success(&format!("Saved JSON to {}", path.display()))
        );
    }

    Ok(())
}

/// Where `--save-json` writes: inside `target` (named after the PDF) when it is a directory.
pub fn json_target(pdf: &Path, target: &Path) -> PathBuf {
    if target.is_dir() {
        let stem = pdf
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "survey".to_string());
        target.join(format!("{}.json", stem))
    } else {
        target.to_path_buf()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_target_in_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = json_target(Path::new("reports/ISYS2001.pdf"), dir.path());
        assert_eq!(path, dir.path().join("ISYS2001.json"));
    }

    #[test]
    fn test_json_target_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out.json");
        assert_eq!(json_target(Path::new("a.pdf"), &target), target);
    }
}
