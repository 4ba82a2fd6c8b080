//! In-memory page text, indexed by 1-based page number

use std::collections::BTreeMap;
use std::convert::Infallible;

use surveysavvy_domain::PageTextSource;

/// Page texts held in memory
///
/// Missing pages read as empty text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageTexts {
    pages: BTreeMap<u32, String>,
    page_count: u32,
}

impl PageTexts {
    /// Create an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from page texts in order, starting at page 1
    pub fn from_pages<I, S>(pages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut texts = Self::new();
        for (index, text) in pages.into_iter().enumerate() {
            texts.insert(index as u32 + 1, text);
        }
        texts
    }

    /// Set a page's text, growing the page count to include it
    pub fn insert(&mut self, page: u32, text: impl Into<String>) {
        self.page_count = self.page_count.max(page);
        self.pages.insert(page, text.into());
    }

    /// Declare the document length without supplying text for every page
    pub fn with_page_count(mut self, page_count: u32) -> Self {
        self.page_count = self.page_count.max(page_count);
        self
    }

    /// Text of a page, empty if it was never supplied
    pub fn page(&self, page: u32) -> &str {
        self.pages.get(&page).map(String::as_str).unwrap_or("")
    }

    /// Number of pages
    pub fn len(&self) -> u32 {
        self.page_count
    }

    /// Whether the document has no pages
    pub fn is_empty(&self) -> bool {
        self.page_count == 0
    }
}

impl PageTextSource for PageTexts {
    type Error = Infallible;

    fn page_count(&self) -> u32 {
        self.page_count
    }

    fn page_text(&self, page: u32) -> Result<String, Self::Error> {
        Ok(self.page(page).to_string())
    }
}
