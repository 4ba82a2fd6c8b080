//! PDF-backed page text

use std::path::{Path, PathBuf};

use lopdf::Document;
use surveysavvy_domain::{DocumentLoader, PageTextSource};
use tracing::debug;

use crate::error::ExtractorError;

/// A loaded PDF report
pub struct PdfDocument {
    path: PathBuf,
    document: Document,
    page_count: u32,
}

impl PdfDocument {
    /// Load a PDF from disk
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ExtractorError> {
        let path = path.as_ref();
        let document = Document::load(path)?;
        let page_count = document.get_pages().len() as u32;
        debug!(path = %path.display(), page_count, "PDF loaded");

        Ok(Self {
            path: path.to_path_buf(),
            document,
            page_count,
        })
    }

    /// Path the document was loaded from
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl std::fmt::Debug for PdfDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PdfDocument")
            .field("path", &self.path)
            .field("page_count", &self.page_count)
            .finish()
    }
}

impl PageTextSource for PdfDocument {
    type Error = ExtractorError;

    fn page_count(&self) -> u32 {
        self.page_count
    }

    fn page_text(&self, page: u32) -> Result<String, Self::Error> {
        if page == 0 || page > self.page_count {
            return Ok(String::new());
        }
        Ok(self.document.extract_text(&[page])?)
    }
}

/// Opens PDF reports from paths
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfLoader;

impl PdfLoader {
    /// Create a loader
    pub fn new() -> Self {
        Self
    }
}

impl DocumentLoader for PdfLoader {
    type Document = PdfDocument;
    type Error = ExtractorError;

    fn load(&self, path: &Path) -> Result<Self::Document, Self::Error> {
        PdfDocument::open(path)
    }
}
