//! Core extraction implementation

use std::collections::BTreeMap;
use std::fmt::Display;

use surveysavvy_domain::{
    BenchmarkRow, MetricKey, PageTextSource, PercentageAgreement, QuestionDistribution,
    ResponseStatistics, SentimentTagger, SurveyRecord, SurveyRecordBuilder, UnitCode,
    UnitIdentity,
};
use tracing::{debug, warn};

use crate::benchmarks::BenchmarkLabels;
use crate::comments::CommentSegmenter;
use crate::config::ExtractorConfig;
use crate::distributions::DistributionCollector;
use crate::error::ExtractorError;
use crate::identity::extract_identity;
use crate::pages::PageTexts;
use crate::statistics::{extract_agreement, extract_statistics};

/// Structured sections recovered from a report, each independently optional
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractedFields {
    /// Unit identity
    pub identity: UnitIdentity,
    /// Response statistics
    pub statistics: ResponseStatistics,
    /// Percentage agreement per metric
    pub agreement: PercentageAgreement,
    /// Benchmark rows
    pub benchmarks: Vec<BenchmarkRow>,
    /// Per-question distributions
    pub distributions: BTreeMap<MetricKey, QuestionDistribution>,
}

/// Applies the ordered pattern rules to page text
///
/// Never fails for a missing field: anything not found is left unset.
#[derive(Debug, Clone)]
pub struct FieldExtractor {
    config: ExtractorConfig,
    labels: BenchmarkLabels,
}

impl FieldExtractor {
    /// Create an extractor for the configured layout
    pub fn new(config: ExtractorConfig) -> Result<Self, ExtractorError> {
        config.validate().map_err(ExtractorError::Config)?;
        let labels = BenchmarkLabels::new(&config.institution_label)?;
        Ok(Self { config, labels })
    }

    /// The layout configuration
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Unit identity from the identity page
    pub fn identity(&self, pages: &PageTexts) -> UnitIdentity {
        extract_identity(pages.page(self.config.identity_page))
    }

    /// Response statistics from the statistics page
    pub fn statistics(&self, pages: &PageTexts) -> ResponseStatistics {
        extract_statistics(pages.page(self.config.statistics_page))
    }

    /// Percentage agreement from the statistics page
    pub fn agreement(&self, pages: &PageTexts) -> PercentageAgreement {
        extract_agreement(pages.page(self.config.statistics_page))
    }

    /// Benchmark rows from the benchmark page
    pub fn benchmarks(&self, pages: &PageTexts, unit_code: Option<&UnitCode>) -> Vec<BenchmarkRow> {
        self.labels
            .extract(pages.page(self.config.benchmark_page), unit_code)
    }

    /// Question distributions across the distribution pages
    pub fn distributions(&self, pages: &PageTexts) -> BTreeMap<MetricKey, QuestionDistribution> {
        let mut collector = DistributionCollector::new();
        for page in self.config.distribution_pages.pages() {
            collector.scan_page(page, pages.page(page));
        }
        collector.finish()
    }

    /// All sections; identity first since benchmarks depend on the unit code
    pub fn extract(&self, pages: &PageTexts) -> ExtractedFields {
        let identity = self.identity(pages);
        let benchmarks = self.benchmarks(pages, identity.code.as_ref());

        ExtractedFields {
            statistics: self.statistics(pages),
            agreement: self.agreement(pages),
            distributions: self.distributions(pages),
            identity,
            benchmarks,
        }
    }
}

/// Reads a whole document into a [`SurveyRecord`]
#[derive(Debug, Clone)]
pub struct SurveyExtractor {
    fields: FieldExtractor,
    segmenter: CommentSegmenter,
    tagger: SentimentTagger,
}

impl SurveyExtractor {
    /// Create an extractor for the configured layout
    pub fn new(config: ExtractorConfig) -> Result<Self, ExtractorError> {
        Ok(Self {
            fields: FieldExtractor::new(config)?,
            segmenter: CommentSegmenter::new(),
            tagger: SentimentTagger::new(),
        })
    }

    /// The field extractor
    pub fn fields(&self) -> &FieldExtractor {
        &self.fields
    }

    /// Read every page any section needs, in ascending page order
    ///
    /// Only an unreadable identity page is an error. Any other page that
    /// fails to read is logged and left empty, so its section stays unset.
    pub fn read_pages<D>(&self, document: &D) -> Result<PageTexts, ExtractorError>
    where
        D: PageTextSource,
        D::Error: Display,
    {
        let config = self.fields.config();
        let page_count = document.page_count();

        let mut wanted: Vec<u32> = [config.identity_page, config.statistics_page, config.benchmark_page]
            .into_iter()
            .chain(config.distribution_pages.pages())
            .chain(config.comment_pages.pages())
            .filter(|page| *page <= page_count)
            .collect();
        wanted.sort_unstable();
        wanted.dedup();

        let mut pages = PageTexts::new().with_page_count(page_count);
        for page in wanted {
            match document.page_text(page) {
                Ok(text) => pages.insert(page, text),
                Err(e) if page == config.identity_page => {
                    return Err(ExtractorError::PageText {
                        page,
                        message: e.to_string(),
                    });
                }
                Err(e) => warn!(page, error = %e, "Failed to read page, section left empty"),
            }
        }
        Ok(pages)
    }

    /// Extract a record from a loaded document
    ///
    /// Documents shorter than the minimum page count give an empty record.
    pub fn extract_document<D>(&self, document: &D) -> Result<SurveyRecord, ExtractorError>
    where
        D: PageTextSource,
        D::Error: Display,
    {
        let pages = self.read_pages(document)?;
        Ok(self.extract_pages(&pages))
    }

    /// Extract a record from page text already in memory
    pub fn extract_pages(&self, pages: &PageTexts) -> SurveyRecord {
        let min_pages = self.fields.config().min_page_count;
        if pages.len() < min_pages {
            warn!(
                pages = pages.len(),
                min_pages, "Document has too few pages, nothing extracted"
            );
            return SurveyRecordBuilder::new().with_tagger(self.tagger).build();
        }

        let fields = self.fields.extract(pages);
        let comments = self.comments(pages);

        SurveyRecordBuilder::new()
            .with_tagger(self.tagger)
            .identity(fields.identity)
            .statistics(fields.statistics)
            .agreement(fields.agreement)
            .benchmarks(fields.benchmarks)
            .distributions(fields.distributions)
            .comments(comments)
            .build()
    }

    /// Comments from the first comment page that holds a comments block
    pub fn comments(&self, pages: &PageTexts) -> Vec<String> {
        for page in self.fields.config().comment_pages.pages() {
            if let Some(block) = self.segmenter.find_block(pages.page(page)) {
                let comments = self.segmenter.segment_block(block);
                debug!(page, count = comments.len(), "Comments extracted");
                return comments;
            }
        }
        debug!("No comments block found");
        Vec::new()
    }
}
