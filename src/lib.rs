//! # untextract
//!
//! Rebuilds structured documents from Amazon Textract analysis responses.
//!
//! A response is a flat list of blocks linked by identifier. This library
//! indexes those blocks, walks their relationships and assembles a document
//! model of pages, lines, words, form fields, tables and selection marks. The
//! model can be projected to plain text, JSON and CSV, or rendered into the
//! per-page artifact set used by document pipelines.
//!
//! ## Quick Start
//!
//! ```no_run
//! use untextract::{parse_file, render};
//!
//! fn main() -> untextract::Result<()> {
//!     let doc = parse_file("analysis.json")?;
//!
//!     for page in &doc.pages {
//!         for field in page.form.fields() {
//!             println!("{}: {}", field.key_text(), field.value_text());
//!         }
//!     }
//!
//!     let text = render::to_text(&doc, &render::RenderOptions::default())?;
//!     println!("{}", text);
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Forms**: key/value pairs with lookup by key text
//! - **Tables**: cells grouped into rows, with spans and selection marks
//! - **Multi-response documents**: paginated analysis results in one model
//! - **Lossless raw blocks**: unknown keys and block types round-trip
//! - **Artifact output**: per-page JSON, text and CSV to any storage sink

pub mod error;
pub mod model;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use error::{Error, Result};
pub use model::{
    Cell, Content, ContentItem, ContentRef, Document, DocumentStats, Field, FieldKey, FieldValue,
    Form, Geometry, Line, Page, Row, SelectionElement, SelectionStatus, Table, Word,
};
pub use parser::{Block, BlockType, ErrorMode, ParseOptions, Response, ResponseParser};
pub use render::{
    Artifact, ArtifactSink, DirectorySink, JsonFormat, MemorySink, OutputGenerator, OutputOptions,
    PageSelection, RenderOptions,
};

use std::io::Read;
use std::path::Path;

/// Parse a response JSON file and return a structured document.
///
/// The file may hold a single response object or an array of responses
/// (one per result page of an asynchronous analysis).
///
/// # Example
///
/// ```no_run
/// use untextract::parse_file;
///
/// let doc = parse_file("analysis.json").unwrap();
/// println!("Pages: {}", doc.page_count());
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    ResponseParser::open(path)?.into_document()
}

/// Parse a response JSON file with custom options.
///
/// # Example
///
/// ```no_run
/// use untextract::{parse_file_with_options, ParseOptions};
///
/// let options = ParseOptions::new().lenient();
/// let doc = parse_file_with_options("analysis.json", options).unwrap();
/// ```
pub fn parse_file_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Document> {
    ResponseParser::open_with_options(path, options)?.into_document()
}

/// Parse response JSON from a string.
pub fn parse_str(json: &str) -> Result<Document> {
    ResponseParser::from_json(json)?.into_document()
}

/// Parse response JSON from a string with custom options.
pub fn parse_str_with_options(json: &str, options: ParseOptions) -> Result<Document> {
    ResponseParser::from_json_with_options(json, options)?.into_document()
}

/// Parse response JSON from bytes.
pub fn parse_bytes(data: &[u8]) -> Result<Document> {
    ResponseParser::from_bytes(data)?.into_document()
}

/// Parse response JSON from a reader.
///
/// # Example
///
/// ```no_run
/// use untextract::parse_reader;
/// use std::fs::File;
///
/// let file = File::open("analysis.json").unwrap();
/// let doc = parse_reader(file).unwrap();
/// ```
pub fn parse_reader<R: Read>(reader: R) -> Result<Document> {
    ResponseParser::from_reader(reader)?.into_document()
}

/// Assemble a document from responses that are already decoded.
pub fn parse_responses(responses: Vec<Response>) -> Result<Document> {
    ResponseParser::from_responses(responses).into_document()
}

/// Extract the full text of a response JSON file.
///
/// # Example
///
/// ```no_run
/// use untextract::extract_text;
///
/// let text = extract_text("analysis.json").unwrap();
/// println!("{}", text);
/// ```
pub fn extract_text<P: AsRef<Path>>(path: P) -> Result<String> {
    let doc = parse_file(path)?;
    Ok(doc.plain_text())
}

/// Convert a response JSON file to the document model as JSON.
pub fn to_json<P: AsRef<Path>>(path: P, format: JsonFormat) -> Result<String> {
    let doc = parse_file(path)?;
    render::to_json(&doc, format)
}

/// Builder for parsing responses and producing output.
///
/// # Example
///
/// ```no_run
/// use untextract::{DirectorySink, Untextract};
///
/// let mut sink = DirectorySink::new("./out");
/// Untextract::new()
///     .lenient()
///     .with_prefix("scans/invoice.png/ocr-analysis")
///     .with_document_id("invoice-42")
///     .parse("analysis.json")?
///     .write_to(&mut sink)?;
/// # Ok::<(), untextract::Error>(())
/// ```
pub struct Untextract {
    parse_options: ParseOptions,
    render_options: RenderOptions,
    output_options: OutputOptions,
}

impl Untextract {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            parse_options: ParseOptions::default(),
            render_options: RenderOptions::default(),
            output_options: OutputOptions::default(),
        }
    }

    /// Keep going on malformed table layouts.
    pub fn lenient(mut self) -> Self {
        self.parse_options = self.parse_options.lenient();
        self
    }

    /// Set page selection.
    pub fn with_pages(mut self, pages: PageSelection) -> Self {
        self.parse_options = self.parse_options.with_pages(pages);
        self
    }

    /// Set the artifact path prefix.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.output_options = self.output_options.with_prefix(prefix);
        self
    }

    /// Tag raw response artifacts with a document identifier.
    pub fn with_document_id(mut self, document_id: &str) -> Self {
        self.output_options = self.output_options.with_document_id(document_id);
        self
    }

    /// Replace the output options.
    pub fn with_output_options(mut self, options: OutputOptions) -> Self {
        self.output_options = options;
        self
    }

    /// Parse a response JSON file and return a result wrapper.
    pub fn parse<P: AsRef<Path>>(self, path: P) -> Result<UntextractResult> {
        let parser = ResponseParser::open_with_options(path, self.parse_options.clone())?;
        self.finish(parser)
    }

    /// Parse response JSON from a string.
    pub fn parse_str(self, json: &str) -> Result<UntextractResult> {
        let parser = ResponseParser::from_json_with_options(json, self.parse_options.clone())?;
        self.finish(parser)
    }

    /// Parse response JSON from bytes.
    pub fn parse_bytes(self, data: &[u8]) -> Result<UntextractResult> {
        let parser = ResponseParser::from_bytes_with_options(data, self.parse_options.clone())?;
        self.finish(parser)
    }

    fn finish(self, parser: ResponseParser) -> Result<UntextractResult> {
        let document = parser.into_document()?;
        Ok(UntextractResult {
            document,
            render_options: self.render_options,
            output_options: self.output_options,
        })
    }
}

impl Default for Untextract {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of parsing a set of responses.
pub struct UntextractResult {
    /// The assembled document
    pub document: Document,
    render_options: RenderOptions,
    output_options: OutputOptions,
}

impl UntextractResult {
    /// Convert to plain text.
    pub fn to_text(&self) -> Result<String> {
        render::to_text(&self.document, &self.render_options)
    }

    /// Convert the document model to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.document, format)
    }

    /// Render the artifact set.
    pub fn artifacts(&self) -> Result<Vec<Artifact>> {
        self.generator().artifacts()
    }

    /// Render the artifact set and write it to a sink.
    pub fn write_to<S: ArtifactSink + ?Sized>(&self, sink: &mut S) -> Result<usize> {
        self.generator().write_to(sink)
    }

    /// Get the document.
    pub fn document(&self) -> &Document {
        &self.document
    }

    fn generator(&self) -> OutputGenerator<'_> {
        OutputGenerator::new(&self.document, self.output_options.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "DocumentMetadata": {"Pages": 1},
        "Blocks": [
            {"Id": "p", "BlockType": "PAGE", "Geometry": {},
             "Relationships": [{"Type": "CHILD", "Ids": ["l"]}]},
            {"Id": "l", "BlockType": "LINE", "Text": "Hello", "Geometry": {},
             "Relationships": [{"Type": "CHILD", "Ids": ["w"]}]},
            {"Id": "w", "BlockType": "WORD", "Text": "Hello", "Geometry": {}}
        ]
    }"#;

    #[test]
    fn test_builder_options() {
        let builder = Untextract::new()
            .lenient()
            .with_prefix("x/ocr")
            .with_document_id("d1");

        assert_eq!(builder.parse_options.error_mode, ErrorMode::Lenient);
        assert_eq!(builder.output_options.prefix, "x/ocr");
        assert_eq!(builder.output_options.tags.as_deref(), Some("documentId=d1"));
    }

    #[test]
    fn test_parse_str() {
        let doc = parse_str(SAMPLE).unwrap();
        assert_eq!(doc.page_count(), 1);
        assert_eq!(doc.plain_text(), "Hello\n");
        assert_eq!(doc.responses.len(), 1);
    }

    #[test]
    fn test_builder_artifacts() {
        let result = Untextract::new()
            .with_prefix("out")
            .parse_str(SAMPLE)
            .unwrap();

        assert_eq!(result.to_text().unwrap(), "Hello\n");
        let artifacts = result.artifacts().unwrap();
        assert_eq!(artifacts.last().unwrap().path, "out/fullresponse.json");
    }

    #[test]
    fn test_parse_bytes_invalid() {
        assert!(matches!(parse_bytes(b"not json"), Err(Error::Json(_))));
        assert!(parse_bytes(b"").is_err());
    }

    #[test]
    fn test_parse_file_missing() {
        assert!(matches!(
            parse_file("/nonexistent/analysis.json"),
            Err(Error::Io(_))
        ));
    }
}
