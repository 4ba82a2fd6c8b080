//! Turns a survey record into the ordered writes for one transaction

use surveysavvy_domain::{MetricKey, OfferingKey, SurveyRecord, SurveyWrite};

use crate::config::ImportConfig;

/// Writes for one importable record, parents before children
///
/// `key` carries the normalized campus. Unknown statistics persist as zero.
pub fn plan_writes(record: &SurveyRecord, key: &OfferingKey, config: &ImportConfig) -> Vec<SurveyWrite> {
    let discipline = config.discipline_for(&key.unit_code);
    let stats = record.statistics();
    let agreement = record.agreement();

    let mut writes = vec![
        SurveyWrite::Discipline {
            code: discipline.code.clone(),
            name: discipline.name,
        },
        SurveyWrite::Unit {
            code: key.unit_code.clone(),
            title: record.identity().title.clone().unwrap_or_default(),
            discipline_code: discipline.code,
        },
        SurveyWrite::Offering(key.clone()),
        SurveyWrite::SurveyEvent {
            year: key.year,
            term: key.term,
            month: key.term.survey_month(),
            description: format!("{} Survey", key.period()),
        },
        SurveyWrite::Survey {
            enrollments: stats.enrollments.unwrap_or(0),
            responses: stats.responses.unwrap_or(0),
            response_rate: stats.response_rate.unwrap_or(0.0),
            overall_experience: agreement.get(MetricKey::Overall).unwrap_or(0.0),
        },
    ];

    for (metric, distribution) in record.distributions() {
        writes.push(SurveyWrite::QuestionResult {
            metric: *metric,
            counts: distribution.counts(),
            percent_agree: distribution
                .agreement
                .or_else(|| agreement.get(*metric))
                .unwrap_or(0.0),
        });
    }

    for row in record.benchmarks() {
        for (metric, cell) in row.cells() {
            writes.push(SurveyWrite::Benchmark {
                metric,
                group: row.group,
                group_name: row.group_name.clone(),
                percent_agree: cell.percent_agree,
                total_n: cell.respondents,
            });
        }
    }

    for comment in record.comments() {
        writes.push(SurveyWrite::Comment {
            text: comment.text.clone(),
            sentiment: comment.sentiment,
        });
    }

    writes
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use surveysavvy_domain::{
        BenchmarkGroup, BenchmarkRow, DeliveryMode, LikertTier, PercentageAgreement,
        QuestionDistribution, ResponseStatistics, SurveyRecordBuilder, Term, TierCount, UnitCode,
        UnitIdentity,
    };

    use super::*;

    fn identity() -> UnitIdentity {
        UnitIdentity {
            code: UnitCode::parse("ISYS2001"),
            title: Some("Business Programming".to_string()),
            campus: Some("Bentley".to_string()),
            mode: Some(DeliveryMode::Online),
            term: Some(Term::Semester(2)),
            year: Some(2023),
        }
    }

    fn key() -> OfferingKey {
        identity().offering_key().unwrap().with_campus("Bentley Perth")
    }

    fn tables(writes: &[SurveyWrite]) -> Vec<&'static str> {
        writes.iter().map(|w| w.table()).collect()
    }

    #[test]
    fn test_minimal_record_plans_parent_rows() {
        let record = SurveyRecordBuilder::new().identity(identity()).build();
        let writes = plan_writes(&record, &key(), &ImportConfig::default());

        assert_eq!(
            tables(&writes),
            vec!["discipline", "unit", "unit_offering", "survey_event", "unit_survey"]
        );
        assert_eq!(
            writes[0],
            SurveyWrite::Discipline {
                code: "ISYS".to_string(),
                name: "Information Systems".to_string(),
            }
        );
        assert_eq!(
            writes[3],
            SurveyWrite::SurveyEvent {
                year: 2023,
                term: Term::Semester(2),
                month: 10,
                description: "Semester 2 2023 Survey".to_string(),
            }
        );
        assert_eq!(
            writes[4],
            SurveyWrite::Survey {
                enrollments: 0,
                responses: 0,
                response_rate: 0.0,
                overall_experience: 0.0,
            }
        );
    }

    #[test]
    fn test_offering_uses_normalized_campus() {
        let record = SurveyRecordBuilder::new().identity(identity()).build();
        let writes = plan_writes(&record, &key(), &ImportConfig::default());

        match &writes[2] {
            SurveyWrite::Offering(offering) => assert_eq!(offering.campus, "Bentley Perth"),
            other => panic!("expected offering, got {:?}", other),
        }
    }

    #[test]
    fn test_child_rows_follow_survey() {
        let mut agreement = PercentageAgreement::new();
        agreement.insert(MetricKey::Overall, 84.0);
        agreement.insert(MetricKey::Support, 71.5);

        let mut support = QuestionDistribution::new(MetricKey::Support);
        support.set_tier(LikertTier::Agree, TierCount { count: 10, percentage: 40.0 });
        let mut distributions = BTreeMap::new();
        distributions.insert(MetricKey::Support, support);

        let school = BenchmarkRow::from_positional(
            BenchmarkGroup::School,
            "School - School of Computing",
            &[78.5, 74.1, 70.2, 66.0, 85.3, 80.9],
            &[410, 409],
        )
        .unwrap();

        let record = SurveyRecordBuilder::new()
            .identity(identity())
            .statistics(ResponseStatistics {
                enrollments: Some(100),
                responses: Some(25),
                response_rate: Some(25.0),
            })
            .agreement(agreement)
            .distributions(distributions)
            .benchmarks(vec![school])
            .comments(vec!["Great unit".to_string(), "Too much reading".to_string()])
            .build();

        let writes = plan_writes(&record, &key(), &ImportConfig::default());
        let tables = tables(&writes);

        assert_eq!(tables.len(), 5 + 1 + 6 + 2);
        assert_eq!(tables[5], "unit_survey_result");
        assert!(tables[6..12].iter().all(|t| *t == "benchmark"));
        assert!(tables[12..].iter().all(|t| *t == "comment"));

        match &writes[4] {
            SurveyWrite::Survey {
                overall_experience, ..
            } => assert_eq!(*overall_experience, 84.0),
            other => panic!("expected survey, got {:?}", other),
        }

        // distribution without a printed agreement falls back to the headline figure
        match &writes[5] {
            SurveyWrite::QuestionResult {
                metric,
                counts,
                percent_agree,
            } => {
                assert_eq!(*metric, MetricKey::Support);
                assert_eq!(counts[3], 10);
                assert_eq!(*percent_agree, 71.5);
            }
            other => panic!("expected question result, got {:?}", other),
        }

        let missing_counts = writes
            .iter()
            .filter(|w| matches!(w, SurveyWrite::Benchmark { total_n: None, .. }))
            .count();
        assert_eq!(missing_counts, 4);
    }

    #[test]
    fn test_unknown_prefix_uses_default_discipline() {
        let mut identity = identity();
        identity.code = UnitCode::parse("ABCD1234");
        let record = SurveyRecordBuilder::new().identity(identity.clone()).build();
        let key = identity.offering_key().unwrap();

        let writes = plan_writes(&record, &key, &ImportConfig::default());
        assert_eq!(
            writes[1],
            SurveyWrite::Unit {
                code: UnitCode::parse("ABCD1234").unwrap(),
                title: "Business Programming".to_string(),
                discipline_code: "GENERAL".to_string(),
            }
        );
    }
}
