//! Scenario tests for the Extractor

#[cfg(test)]
mod tests {
    use std::convert::Infallible;

    use surveysavvy_domain::{
        BenchmarkGroup, DeliveryMode, LikertTier, MetricKey, PageTextSource, RequiredField,
        SentimentLabel, Term,
    };

    use crate::{ExtractorConfig, ExtractorError, PageTexts, SurveyExtractor};

    const IDENTITY: &str = "\
Unit Survey Report
ABCD1234 Introduction to Testing - Semester 1 2024 - North Campus - Internal
Prepared for the unit coordinator";

    const STATISTICS: &str = "\
Response Statistics
# Enrolments
(N)
# Responses
Response Rate
100 25 25.0
Percentage Agreement
I was engaged by the learning activities 80.0%
The resources provided helped me to learn 76.0%
My learning was supported 72.0%
Assessments helped me to demonstrate my learning 68.0%
I knew what was expected of me 88.0%
Overall, this unit was a worthwhile experience 84.0%";

    const BENCHMARKS: &str = "\
Benchmarks
Unit - ABCD1234 80.0% 25 76.0% 25 72.0% 25 68.0% 25 88.0% 25 84.0% 25
School - School of Computing 78.5% 410 74.1% 409 70.2% 411 66.0% 405 85.3% 410 80.9% 408
Curtin 75.0% 15000 71.0% 14900 68.0% 15010 64.0% 14800 83.0% 14950 78.0% 14990
Faculty - Faculty of Science 77.0% 2200 73.0% 2190 69.0% 2210";

    const DISTRIBUTION: &str = "\
My learning was supported
1 Strongly Disagree 1 4.0%
2 Disagree 2 8.0%
3 Neither Agree nor Disagree 4 16.0%
4 Agree 10 40.0%
5 Strongly Agree 8 32.0%
Agreement 72.0%
Base (above) 25";

    const COMMENTS: &str = "\
What are the main reasons for your rating?
Comments
The lectures were great and really helpful
Assessments were confusing and the feedback was poor
Weekly labs ran on Tuesdays
This report may contain language some readers find offensive";

    fn report() -> PageTexts {
        PageTexts::from_pages([
            IDENTITY,
            "Contents",
            STATISTICS,
            BENCHMARKS,
            "Question results",
            DISTRIBUTION,
            "",
            "Open-ended responses",
            COMMENTS,
            "End of report",
        ])
    }

    fn extractor() -> SurveyExtractor {
        SurveyExtractor::new(ExtractorConfig::default()).unwrap()
    }

    #[test]
    fn test_full_report() {
        let record = extractor().extract_pages(&report());

        assert!(record.is_importable());
        let identity = record.identity();
        assert_eq!(identity.code.as_ref().unwrap().as_str(), "ABCD1234");
        assert_eq!(identity.title.as_deref(), Some("Introduction to Testing"));
        assert_eq!(identity.term, Some(Term::Semester(1)));
        assert_eq!(identity.year, Some(2024));
        assert_eq!(identity.campus.as_deref(), Some("North"));
        assert_eq!(identity.mode, Some(DeliveryMode::Internal));

        assert_eq!(record.statistics().enrollments, Some(100));
        assert_eq!(record.statistics().response_rate, Some(25.0));
        assert_eq!(record.agreement().len(), 6);
        assert_eq!(record.agreement().get(MetricKey::Overall), Some(84.0));
    }

    #[test]
    fn test_benchmarks_skip_short_rows() {
        let record = extractor().extract_pages(&report());

        let groups: Vec<_> = record.benchmarks().iter().map(|row| row.group).collect();
        assert_eq!(
            groups,
            vec![
                BenchmarkGroup::Unit,
                BenchmarkGroup::School,
                BenchmarkGroup::Institution
            ]
        );
    }

    #[test]
    fn test_distributions_and_comments() {
        let record = extractor().extract_pages(&report());

        let support = &record.distributions()[&MetricKey::Support];
        assert_eq!(support.tier(LikertTier::Agree).count, 10);
        assert_eq!(support.agreement, Some(72.0));
        assert_eq!(record.distributions().len(), 1);

        let comments = record.comments();
        assert_eq!(comments.len(), 3);
        assert_eq!(comments[0].sentiment.label, SentimentLabel::Positive);
        assert_eq!(comments[1].sentiment.label, SentimentLabel::Negative);
        assert_eq!(comments[2].sentiment.label, SentimentLabel::Neutral);
    }

    #[test]
    fn test_short_document_gives_empty_record() {
        let pages = PageTexts::from_pages([IDENTITY, "Contents"]);
        let record = extractor().extract_pages(&pages);

        assert!(!record.is_importable());
        assert_eq!(record.missing_fields().len(), 6);
        assert!(record.benchmarks().is_empty());
    }

    #[test]
    fn test_unrelated_layout_is_not_importable() {
        let pages = PageTexts::from_pages(["Annual report", "Finance", "Revenue 10.0%", "Notes"]);
        let record = extractor().extract_pages(&pages);

        assert!(!record.is_importable());
        assert!(record.missing_fields().contains(&RequiredField::UnitCode));
        assert!(record.comments().is_empty());
    }

    #[test]
    fn test_missing_campus_only() {
        let mut pages = report();
        pages.insert(1, "ABCD1234 Introduction to Testing - Semester 1 2024");
        let record = extractor().extract_pages(&pages);

        assert_eq!(
            record.missing_fields(),
            &[RequiredField::Campus, RequiredField::Mode]
        );
    }

    #[test]
    fn test_comments_found_on_later_page() {
        let mut pages = report();
        pages.insert(9, "End of report");
        pages.insert(10, COMMENTS);

        let comments = extractor().comments(&pages);
        assert_eq!(comments.len(), 3);
    }

    #[test]
    fn test_extract_document_reads_source() {
        let record = extractor().extract_document(&report()).unwrap();
        assert!(record.is_importable());
    }

    /// Serves the fixture report but fails to read one page
    struct BrokenPage {
        pages: PageTexts,
        broken: u32,
    }

    impl BrokenPage {
        fn new(broken: u32) -> Self {
            Self {
                pages: report(),
                broken,
            }
        }
    }

    impl PageTextSource for BrokenPage {
        type Error = String;

        fn page_count(&self) -> u32 {
            self.pages.len()
        }

        fn page_text(&self, page: u32) -> Result<String, Self::Error> {
            if page == self.broken {
                Err("corrupt content stream".to_string())
            } else {
                Ok(self.pages.page(page).to_string())
            }
        }
    }

    #[test]
    fn test_unreadable_benchmark_page_leaves_benchmarks_empty() {
        let record = extractor().extract_document(&BrokenPage::new(4)).unwrap();

        assert!(record.is_importable());
        assert!(record.benchmarks().is_empty());
        assert_eq!(record.statistics().enrollments, Some(100));
        assert_eq!(record.comments().len(), 3);
    }

    #[test]
    fn test_unreadable_comment_page_leaves_comments_empty() {
        let record = extractor().extract_document(&BrokenPage::new(9)).unwrap();

        assert!(record.is_importable());
        assert!(record.comments().is_empty());
        assert_eq!(record.benchmarks().len(), 3);
    }

    #[test]
    fn test_unreadable_identity_page_is_reported() {
        let err = extractor().extract_document(&BrokenPage::new(1)).unwrap_err();
        match err {
            ExtractorError::PageText { page, message } => {
                assert_eq!(page, 1);
                assert_eq!(message, "corrupt content stream");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_reads_only_existing_pages() {
        struct ThreePages;

        impl PageTextSource for ThreePages {
            type Error = Infallible;

            fn page_count(&self) -> u32 {
                3
            }

            fn page_text(&self, page: u32) -> Result<String, Self::Error> {
                assert!(page <= 3, "page {page} read beyond the document");
                Ok(if page == 1 { IDENTITY.to_string() } else { String::new() })
            }
        }

        let pages = extractor().read_pages(&ThreePages).unwrap();
        assert_eq!(pages.len(), 3);
        assert_eq!(pages.page(1), IDENTITY);
    }
}
