//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use serde_json::{json, Value};
use surveysavvy_domain::{ImportBatchSummary, ImportOutcome, LikertTier, SurveyRecord};
use surveysavvy_store::StoredSurvey;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format an import batch summary.
    pub fn format_summary(&self, summary: &ImportBatchSummary) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&summary_to_json(summary))?),
            OutputFormat::Table => Ok(self.format_summary_table(summary)),
            OutputFormat::Quiet => Ok(summary.summary()),
        }
    }

    fn format_summary_table(&self, summary: &ImportBatchSummary) -> String {
        if summary.files.is_empty() {
            return self.colorize("No documents processed.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["", "File", "Status", "Detail"]);

        for file in &summary.files {
            builder.push_record(vec![
                self.outcome_marker(&file.outcome),
                file.file_name.clone(),
                file.outcome.status().to_string(),
                file.outcome.detail(),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        format!("{}\n{}", table, summary.summary())
    }

    /// Format an extracted record.
    pub fn format_record(&self, record: &SurveyRecord) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&record_to_json(record))?),
            OutputFormat::Table => Ok(self.format_record_table(record)),
            OutputFormat::Quiet => Ok(match record.offering_key() {
                Some(key) => format!("{} {}", key.unit_code, key.period()),
                None => format!("missing: {}", record.missing_summary()),
            }),
        }
    }

    fn format_record_table(&self, record: &SurveyRecord) -> String {
        let identity = record.identity();
        let stats = record.statistics();
        let unknown = || "-".to_string();

        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        let rows = [
            ("Unit code", identity.code.as_ref().map(|c| c.to_string())),
            ("Unit title", identity.title.clone()),
            ("Year", identity.year.map(|y| y.to_string())),
            ("Term", identity.term.map(|t| t.to_string())),
            ("Campus", identity.campus.clone()),
            ("Mode", identity.mode.map(|m| m.as_str().to_string())),
            ("Enrolments", stats.enrollments.map(|n| n.to_string())),
            ("Responses", stats.responses.map(|n| n.to_string())),
            ("Response rate", stats.response_rate.map(|r| format!("{:.1}%", r))),
            ("Benchmark rows", Some(record.benchmarks().len().to_string())),
            ("Question results", Some(record.distributions().len().to_string())),
            ("Comments", Some(record.comments().len().to_string())),
        ];
        for (field, value) in rows {
            builder.push_record(vec![field.to_string(), value.unwrap_or_else(unknown)]);
        }
        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        let mut sections = vec![table.to_string()];

        if !record.agreement().is_empty() {
            let mut builder = Builder::default();
            builder.push_record(["Metric", "Agree"]);
            for (metric, percent) in record.agreement().iter() {
                builder.push_record(vec![metric.benchmark_label().to_string(), format!("{:.1}%", percent)]);
            }
            let mut table = builder.build();
            table.with(Style::rounded());
            sections.push(table.to_string());
        }

        if record.is_importable() {
            sections.push(self.success("All required fields present"));
        } else {
            sections.push(self.warning(&format!(
                "Missing required fields: {}",
                record.missing_summary()
            )));
        }

        sections.join("\n")
    }

    /// Format stored surveys.
    pub fn format_surveys(&self, surveys: &[StoredSurvey]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let rows: Vec<Value> = surveys.iter().map(survey_to_json).collect();
                Ok(serde_json::to_string_pretty(&rows)?)
            }
            OutputFormat::Table => Ok(self.format_surveys_table(surveys)),
            OutputFormat::Quiet => Ok(surveys
                .iter()
                .map(|s| format!("{} {} {} {} {}", s.unit_code, s.term, s.year, s.campus, s.mode.as_str()))
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    fn format_surveys_table(&self, surveys: &[StoredSurvey]) -> String {
        if surveys.is_empty() {
            return self.colorize("No surveys found.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record([
            "Unit", "Title", "Period", "Campus", "Mode", "Enrolled", "Responses", "Rate", "Overall",
            "Comments",
        ]);

        for survey in surveys {
            builder.push_record(vec![
                survey.unit_code.clone(),
                survey.unit_name.clone(),
                format!("{} {}", survey.term, survey.year),
                survey.campus.clone(),
                survey.mode.as_str().to_string(),
                survey.enrollments.to_string(),
                survey.responses.to_string(),
                format!("{:.1}%", survey.response_rate),
                format!("{:.1}%", survey.overall_experience),
                survey.comment_count.to_string(),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        table.to_string()
    }

    /// Marker for a per-file outcome.
    pub fn outcome_marker(&self, outcome: &ImportOutcome) -> String {
        match outcome {
            ImportOutcome::Imported { .. } => self.colorize("✓", "green"),
            ImportOutcome::Duplicate { .. } => self.colorize("↺", "yellow"),
            ImportOutcome::Failed { .. } => self.colorize("✗", "red"),
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

/// JSON form of a batch summary.
pub fn summary_to_json(summary: &ImportBatchSummary) -> Value {
    let files: Vec<Value> = summary
        .files
        .iter()
        .map(|f| {
            json!({
                "file": f.file_name,
                "status": f.outcome.status(),
                "detail": f.outcome.detail(),
            })
        })
        .collect();

    json!({
        "imported": summary.imported,
        "duplicates": summary.duplicates,
        "failed": summary.failed,
        "files": files,
    })
}

/// JSON form of an extracted record.
pub fn record_to_json(record: &SurveyRecord) -> Value {
    let identity = record.identity();
    let stats = record.statistics();

    let agreement: serde_json::Map<String, Value> = record
        .agreement()
        .iter()
        .map(|(metric, percent)| (metric.as_str().to_string(), json!(percent)))
        .collect();

    let benchmarks: Vec<Value> = record
        .benchmarks()
        .iter()
        .map(|row| {
            let cells: serde_json::Map<String, Value> = row
                .cells()
                .map(|(metric, cell)| {
                    (
                        metric.as_str().to_string(),
                        json!({ "percent_agree": cell.percent_agree, "n": cell.respondents }),
                    )
                })
                .collect();
            json!({
                "group": row.group.as_str(),
                "group_name": row.group_name,
                "metrics": cells,
            })
        })
        .collect();

    let distributions: serde_json::Map<String, Value> = record
        .distributions()
        .iter()
        .map(|(metric, dist)| {
            let tiers: Vec<Value> = LikertTier::ALL
                .iter()
                .map(|tier| {
                    let count = dist.tier(*tier);
                    json!({
                        "tier": tier.label(),
                        "count": count.count,
                        "percentage": count.percentage,
                    })
                })
                .collect();
            (
                metric.as_str().to_string(),
                json!({ "tiers": tiers, "agreement": dist.agreement }),
            )
        })
        .collect();

    let comments: Vec<Value> = record
        .comments()
        .iter()
        .map(|c| {
            json!({
                "text": c.text,
                "sentiment_score": c.sentiment.score,
                "sentiment_label": c.sentiment.label.as_str(),
            })
        })
        .collect();

    let missing: Vec<&str> = record.missing_fields().iter().map(|f| f.as_str()).collect();

    json!({
        "unit_info": {
            "unit_code": identity.code.as_ref().map(|c| c.as_str()),
            "unit_name": identity.title,
            "campus_name": identity.campus,
            "mode": identity.mode.map(|m| m.as_str()),
            "term": identity.term.map(|t| t.to_string()),
            "year": identity.year,
        },
        "response_stats": {
            "enrollments": stats.enrollments,
            "responses": stats.responses,
            "response_rate": stats.response_rate,
        },
        "percentage_agreement": agreement,
        "benchmarks": benchmarks,
        "detailed_results": distributions,
        "comments": comments,
        "missing_fields": missing,
    })
}

fn survey_to_json(survey: &StoredSurvey) -> Value {
    json!({
        "survey_id": survey.survey_id,
        "unit_code": survey.unit_code,
        "unit_name": survey.unit_name,
        "year": survey.year,
        "term": survey.term.to_string(),
        "campus": survey.campus,
        "mode": survey.mode.as_str(),
        "enrollments": survey.enrollments,
        "responses": survey.responses,
        "response_rate": survey.response_rate,
        "overall_experience": survey.overall_experience,
        "results": survey.result_count,
        "benchmarks": survey.benchmark_count,
        "comments": survey.comment_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use surveysavvy_domain::{
        DeliveryMode, PercentageAgreement, MetricKey, SurveyRecordBuilder, Term, UnitCode,
        UnitIdentity,
    };

    fn summary() -> ImportBatchSummary {
        let mut summary = ImportBatchSummary::new();
        summary.record(
            "a.pdf",
            ImportOutcome::Imported {
                unit_code: "ABCD1234".to_string(),
                period: "Semester 1 2024".to_string(),
            },
        );
        summary.record("b.pdf", ImportOutcome::failed("missing required fields: campus"));
        summary
    }

    fn record() -> SurveyRecord {
        let mut agreement = PercentageAgreement::new();
        agreement.insert(MetricKey::Overall, 84.0);
        SurveyRecordBuilder::new()
            .identity(UnitIdentity {
                code: UnitCode::parse("ABCD1234"),
                title: Some("Introduction to Testing".to_string()),
                campus: None,
                mode: Some(DeliveryMode::Internal),
                term: Some(Term::Semester(1)),
                year: Some(2024),
            })
            .agreement(agreement)
            .comments(vec!["Great unit".to_string()])
            .build()
    }

    #[test]
    fn test_summary_table() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_summary(&summary()).unwrap();
        assert!(output.contains("✓"));
        assert!(output.contains("✗"));
        assert!(output.contains("ABCD1234 Semester 1 2024"));
        assert!(output.ends_with("Processed 2 document(s): 1 imported, 0 duplicate(s), 1 failed"));
    }

    #[test]
    fn test_summary_json() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter.format_summary(&summary()).unwrap();
        let value: Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["imported"], 1);
        assert_eq!(value["failed"], 1);
        assert_eq!(value["files"][1]["status"], "failed");
    }

    #[test]
    fn test_summary_quiet() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let output = formatter.format_summary(&summary()).unwrap();
        assert!(output.starts_with("Processed 2 document(s)"));
    }

    #[test]
    fn test_record_table_lists_missing_fields() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_record(&record()).unwrap();
        assert!(output.contains("Introduction to Testing"));
        assert!(output.contains("Overall"));
        assert!(output.contains("⚠ Missing required fields: campus"));
    }

    #[test]
    fn test_record_json() {
        let value = record_to_json(&record());
        assert_eq!(value["unit_info"]["unit_code"], "ABCD1234");
        assert_eq!(value["unit_info"]["campus_name"], Value::Null);
        assert_eq!(value["percentage_agreement"]["overall"], 84.0);
        assert_eq!(value["comments"][0]["sentiment_label"], "positive");
        assert_eq!(value["missing_fields"][0], "campus");
    }

    #[test]
    fn test_record_quiet() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        assert_eq!(formatter.format_record(&record()).unwrap(), "missing: campus");
    }

    #[test]
    fn test_empty_surveys() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_surveys(&[]).unwrap();
        assert!(output.contains("No surveys found"));
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        assert_eq!(formatter.success("test"), "✓ test");
        assert_eq!(formatter.error("test"), "✗ test");
    }
}
