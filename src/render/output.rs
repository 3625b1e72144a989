//! Artifact generation and storage.
//!
//! [`OutputGenerator`] renders the complete artifact set for a document in
//! memory, then hands each artifact to an [`ArtifactSink`] in a fixed order.
//! The full-response artifact comes last and acts as the completion marker
//! for the set.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::{Error, Result};
use crate::model::{Document, Page};

use super::json::{blocks_to_json, responses_to_json};
use super::records::{forms_to_csv, tables_to_csv};
use super::OutputOptions;

/// Content type of JSON artifacts.
pub const CONTENT_TYPE_JSON: &str = "application/json";
/// Content type of text artifacts.
pub const CONTENT_TYPE_TEXT: &str = "text/plain";
/// Content type of CSV artifacts.
pub const CONTENT_TYPE_CSV: &str = "text/csv";

/// A rendered output file, ready for storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// Storage path, relative to the sink root
    pub path: String,
    /// File contents
    pub bytes: Vec<u8>,
    /// MIME type
    pub content_type: &'static str,
    /// Storage tags (e.g. `documentId=...`)
    pub tags: Option<String>,
}

impl Artifact {
    /// Create an untagged artifact.
    pub fn new(path: impl Into<String>, bytes: impl Into<Vec<u8>>, content_type: &'static str) -> Self {
        Self {
            path: path.into(),
            bytes: bytes.into(),
            content_type,
            tags: None,
        }
    }

    /// Set tags and return self.
    pub fn tagged(mut self, tags: Option<String>) -> Self {
        self.tags = tags;
        self
    }

    /// Contents as UTF-8 text, if valid.
    pub fn as_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.bytes).ok()
    }

    /// File name component of the path.
    pub fn file_name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }
}

/// Destination for rendered artifacts.
pub trait ArtifactSink {
    /// Store one artifact.
    fn write(&mut self, artifact: &Artifact) -> Result<()>;
}

impl<S: ArtifactSink + ?Sized> ArtifactSink for &mut S {
    fn write(&mut self, artifact: &Artifact) -> Result<()> {
        (**self).write(artifact)
    }
}

/// Writes artifacts below a directory on the local filesystem.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    root: PathBuf,
}

impl DirectorySink {
    /// Create a sink rooted at the given directory.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Filesystem path an artifact is written to.
    pub fn path_for(&self, artifact: &Artifact) -> PathBuf {
        artifact
            .path
            .split('/')
            .filter(|part| !part.is_empty())
            .fold(self.root.clone(), |path, part| path.join(part))
    }
}

impl ArtifactSink for DirectorySink {
    fn write(&mut self, artifact: &Artifact) -> Result<()> {
        let path = self.path_for(artifact);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                Error::Storage(format!("cannot create {}: {}", parent.display(), e))
            })?;
        }

        fs::write(&path, &artifact.bytes)
            .map_err(|e| Error::Storage(format!("cannot write {}: {}", path.display(), e)))?;
        debug!("wrote {} ({} bytes)", path.display(), artifact.bytes.len());
        Ok(())
    }
}

/// Collects artifacts in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    artifacts: Vec<Artifact>,
}

impl MemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Artifacts in write order.
    pub fn artifacts(&self) -> &[Artifact] {
        &self.artifacts
    }

    /// Find an artifact by path.
    pub fn get(&self, path: &str) -> Option<&Artifact> {
        self.artifacts.iter().find(|a| a.path == path)
    }

    /// Consume the sink.
    pub fn into_artifacts(self) -> Vec<Artifact> {
        self.artifacts
    }
}

impl ArtifactSink for MemorySink {
    fn write(&mut self, artifact: &Artifact) -> Result<()> {
        self.artifacts.push(artifact.clone());
        Ok(())
    }
}

/// Renders a document into its artifact set.
#[derive(Debug, Clone)]
pub struct OutputGenerator<'a> {
    doc: &'a Document,
    options: OutputOptions,
}

impl<'a> OutputGenerator<'a> {
    /// Create a generator for the given document.
    pub fn new(doc: &'a Document, options: OutputOptions) -> Self {
        Self { doc, options }
    }

    /// Output options in use.
    pub fn options(&self) -> &OutputOptions {
        &self.options
    }

    /// Render every artifact, page by page, with the full response last.
    pub fn artifacts(&self) -> Result<Vec<Artifact>> {
        if self.doc.is_empty() {
            return Err(Error::EmptyDocument);
        }

        let mut artifacts = Vec::new();
        for (i, page) in self.doc.pages.iter().enumerate() {
            self.page_artifacts(i as u32 + 1, page, &mut artifacts)?;
        }

        let full = responses_to_json(self.doc, self.options.json_format)?;
        artifacts.push(
            Artifact::new(self.path("fullresponse.json"), full, CONTENT_TYPE_JSON)
                .tagged(self.options.tags.clone()),
        );

        debug!("rendered {} artifacts", artifacts.len());
        Ok(artifacts)
    }

    /// Render all artifacts, then write them in order.
    ///
    /// Stops at the first sink error. Returns the number of artifacts written.
    pub fn write_to<S: ArtifactSink + ?Sized>(&self, sink: &mut S) -> Result<usize> {
        let artifacts = self.artifacts()?;
        for artifact in &artifacts {
            sink.write(artifact)?;
        }
        Ok(artifacts.len())
    }

    fn page_artifacts(&self, page_num: u32, page: &Page, out: &mut Vec<Artifact>) -> Result<()> {
        let dir = format!("page-{}", page_num);

        let blocks = blocks_to_json(page, self.options.json_format)?;
        out.push(
            Artifact::new(self.page_path(&dir, "response.json"), blocks, CONTENT_TYPE_JSON)
                .tagged(self.options.tags.clone()),
        );

        out.push(Artifact::new(
            self.page_path(&dir, "text.txt"),
            page.plain_text(),
            CONTENT_TYPE_TEXT,
        ));

        if self.options.include_forms {
            let csv = forms_to_csv(page)?;
            out.push(Artifact::new(self.page_path(&dir, "forms.csv"), csv, CONTENT_TYPE_CSV));
        }

        if self.options.include_tables {
            let csv = tables_to_csv(page)?;
            out.push(Artifact::new(self.page_path(&dir, "tables.csv"), csv, CONTENT_TYPE_CSV));
        }

        Ok(())
    }

    fn page_path(&self, dir: &str, name: &str) -> String {
        self.path(&format!("{}/{}", dir, name))
    }

    fn path(&self, name: &str) -> String {
        let prefix = self.options.prefix.trim_end_matches('/');
        if prefix.is_empty() {
            name.to_string()
        } else {
            format!("{}/{}", prefix, name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Line;

    fn doc(pages: usize) -> Document {
        let mut doc = Document::new();
        for i in 0..pages {
            let mut page = Page::new();
            page.add_line(Line::new(format!("l{}", i), format!("Page {}", i + 1), Vec::new()));
            doc.add_page(page);
        }
        doc
    }

    fn paths(artifacts: &[Artifact]) -> Vec<&str> {
        artifacts.iter().map(|a| a.path.as_str()).collect()
    }

    #[test]
    fn test_artifact_order() {
        let doc = doc(2);
        let artifacts = OutputGenerator::new(&doc, OutputOptions::default())
            .artifacts()
            .unwrap();

        assert_eq!(
            paths(&artifacts),
            vec![
                "ocr-analysis/page-1/response.json",
                "ocr-analysis/page-1/text.txt",
                "ocr-analysis/page-1/forms.csv",
                "ocr-analysis/page-1/tables.csv",
                "ocr-analysis/page-2/response.json",
                "ocr-analysis/page-2/text.txt",
                "ocr-analysis/page-2/forms.csv",
                "ocr-analysis/page-2/tables.csv",
                "ocr-analysis/fullresponse.json",
            ]
        );
        assert_eq!(artifacts[1].as_str(), Some("Page 1\n"));
        assert_eq!(artifacts[1].content_type, CONTENT_TYPE_TEXT);
    }

    #[test]
    fn test_optional_projections() {
        let doc = doc(1);
        let options = OutputOptions::new()
            .with_prefix("out/")
            .with_forms(false)
            .with_tables(false);
        let artifacts = OutputGenerator::new(&doc, options).artifacts().unwrap();

        assert_eq!(
            paths(&artifacts),
            vec!["out/page-1/response.json", "out/page-1/text.txt", "out/fullresponse.json"]
        );
    }

    #[test]
    fn test_tags_on_json_only() {
        let doc = doc(1);
        let options = OutputOptions::new().with_document_id("abc");
        let artifacts = OutputGenerator::new(&doc, options).artifacts().unwrap();

        for artifact in &artifacts {
            let tagged = artifact.file_name().ends_with(".json");
            assert_eq!(artifact.tags.is_some(), tagged, "{}", artifact.path);
        }
        assert_eq!(artifacts[0].tags.as_deref(), Some("documentId=abc"));
    }

    #[test]
    fn test_empty_document() {
        let doc = Document::new();
        let generator = OutputGenerator::new(&doc, OutputOptions::default());
        assert!(matches!(generator.artifacts(), Err(Error::EmptyDocument)));

        let mut sink = MemorySink::new();
        assert!(generator.write_to(&mut sink).is_err());
        assert!(sink.artifacts().is_empty());
    }

    #[test]
    fn test_memory_sink() {
        let doc = doc(1);
        let mut sink = MemorySink::new();
        let written = OutputGenerator::new(&doc, OutputOptions::default())
            .write_to(&mut sink)
            .unwrap();

        assert_eq!(written, 5);
        assert!(sink.get("ocr-analysis/page-1/text.txt").is_some());
        assert!(sink.get("missing").is_none());
    }

    #[test]
    fn test_directory_sink_path() {
        let sink = DirectorySink::new("/tmp/out");
        let artifact = Artifact::new("a/b/c.txt", "x", CONTENT_TYPE_TEXT);
        assert_eq!(sink.path_for(&artifact), PathBuf::from("/tmp/out/a/b/c.txt"));
        assert_eq!(artifact.file_name(), "c.txt");
    }
}
