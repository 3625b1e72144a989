//! Rendering options and configuration.

use std::ops::RangeInclusive;

use crate::error::{Error, Result};

use super::JsonFormat;

/// Options for the text projection.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Page selection
    pub page_selection: PageSelection,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set page selection.
    pub fn with_pages(mut self, selection: PageSelection) -> Self {
        self.page_selection = selection;
        self
    }

    /// Set specific page range.
    pub fn with_page_range(mut self, range: RangeInclusive<u32>) -> Self {
        self.page_selection = PageSelection::Range(range);
        self
    }
}

/// Options for the artifact set handed to storage.
#[derive(Debug, Clone)]
pub struct OutputOptions {
    /// Path prefix for every artifact
    pub prefix: String,

    /// Emit `forms.csv` per page
    pub include_forms: bool,

    /// Emit `tables.csv` per page
    pub include_tables: bool,

    /// Tags attached to the raw response artifacts (e.g. `documentId=...`)
    pub tags: Option<String>,

    /// Layout of the raw JSON artifacts
    pub json_format: JsonFormat,
}

impl OutputOptions {
    /// Create new output options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the artifact path prefix.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Enable or disable the forms projection.
    pub fn with_forms(mut self, include: bool) -> Self {
        self.include_forms = include;
        self
    }

    /// Enable or disable the tables projection.
    pub fn with_tables(mut self, include: bool) -> Self {
        self.include_tables = include;
        self
    }

    /// Set the tags for raw response artifacts.
    pub fn with_tags(mut self, tags: impl Into<String>) -> Self {
        self.tags = Some(tags.into());
        self
    }

    /// Tag raw response artifacts with `documentId=<id>`.
    pub fn with_document_id(self, document_id: &str) -> Self {
        self.with_tags(format!("documentId={}", document_id))
    }

    /// Set the JSON layout.
    pub fn with_json_format(mut self, format: JsonFormat) -> Self {
        self.json_format = format;
        self
    }
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            prefix: "ocr-analysis".to_string(),
            include_forms: true,
            include_tables: true,
            tags: None,
            json_format: JsonFormat::Compact,
        }
    }
}

/// Page selection (1-indexed).
#[derive(Debug, Clone, Default)]
pub enum PageSelection {
    /// Select all pages
    #[default]
    All,
    /// Select a range of pages (inclusive, 1-indexed)
    Range(RangeInclusive<u32>),
    /// Select specific pages (1-indexed)
    Pages(Vec<u32>),
}

impl PageSelection {
    /// Check if a page number should be included.
    pub fn includes(&self, page: u32) -> bool {
        match self {
            PageSelection::All => true,
            PageSelection::Range(range) => range.contains(&page),
            PageSelection::Pages(pages) => pages.contains(&page),
        }
    }

    /// Parse a page selection string (e.g., "1-10", "1,3,5,7-10").
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();

        if s.is_empty() || s == "all" {
            return Ok(PageSelection::All);
        }

        let invalid = |what: &str| Error::InvalidPageRange(format!("{} in {:?}", what, s));

        // Simple range (e.g., "1-10")
        if let Some((start, end)) = s.split_once('-') {
            if !start.contains(',') && !end.contains(',') {
                let start: u32 = start.trim().parse().map_err(|_| invalid("invalid start page"))?;
                let end: u32 = end.trim().parse().map_err(|_| invalid("invalid end page"))?;
                if start > end {
                    return Err(invalid("start page after end page"));
                }
                return Ok(PageSelection::Range(start..=end));
            }
        }

        let mut pages = Vec::new();
        for part in s.split(',') {
            let part = part.trim();
            if let Some((start, end)) = part.split_once('-') {
                let start: u32 = start.trim().parse().map_err(|_| invalid("invalid page number"))?;
                let end: u32 = end.trim().parse().map_err(|_| invalid("invalid page number"))?;
                for p in start..=end {
                    if !pages.contains(&p) {
                        pages.push(p);
                    }
                }
            } else {
                let p: u32 = part.parse().map_err(|_| invalid("invalid page number"))?;
                if !pages.contains(&p) {
                    pages.push(p);
                }
            }
        }

        pages.sort();
        Ok(PageSelection::Pages(pages))
    }
}
