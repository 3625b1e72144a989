//! Integration tests for artifact generation and storage.

use std::fs;

use untextract::render::CONTENT_TYPE_JSON;
use untextract::{
    parse_str, Artifact, ArtifactSink, DirectorySink, Document, Error, MemorySink,
    OutputGenerator, OutputOptions, Result, Untextract,
};

const TWO_PAGES: &str = r#"[
    {
        "DocumentMetadata": {"Pages": 1},
        "Blocks": [
            {"Id": "p1", "BlockType": "PAGE", "Geometry": {}, "Relationships": [{"Type": "CHILD", "Ids": ["l1"]}]},
            {"Id": "l1", "BlockType": "LINE", "Text": "Invoice", "Geometry": {}},
            {"Id": "w1", "BlockType": "WORD", "Text": "Total", "Geometry": {}},
            {"Id": "w2", "BlockType": "WORD", "Text": "42", "Geometry": {}},
            {"Id": "k", "BlockType": "KEY_VALUE_SET", "EntityTypes": ["KEY"], "Geometry": {},
             "Relationships": [{"Type": "CHILD", "Ids": ["w1"]}, {"Type": "VALUE", "Ids": ["v"]}]},
            {"Id": "v", "BlockType": "KEY_VALUE_SET", "EntityTypes": ["VALUE"], "Geometry": {},
             "Relationships": [{"Type": "CHILD", "Ids": ["w2"]}]}
        ]
    },
    {
        "DocumentMetadata": {"Pages": 1},
        "Blocks": [
            {"Id": "p2", "BlockType": "PAGE", "Geometry": {}},
            {"Id": "l2", "BlockType": "LINE", "Text": "Thank you", "Geometry": {}}
        ]
    }
]"#;

/// Sink that fails on the n-th write.
struct FailingSink {
    inner: MemorySink,
    fail_at: usize,
}

impl ArtifactSink for FailingSink {
    fn write(&mut self, artifact: &Artifact) -> Result<()> {
        if self.inner.artifacts().len() == self.fail_at {
            return Err(Error::Storage(format!("refused {}", artifact.path)));
        }
        self.inner.write(artifact)
    }
}

#[test]
fn test_empty_document_produces_nothing() {
    let doc = Document::new();
    let mut sink = MemorySink::new();

    let result = OutputGenerator::new(&doc, OutputOptions::default()).write_to(&mut sink);

    assert!(matches!(result, Err(Error::EmptyDocument)));
    assert!(sink.artifacts().is_empty());
}

#[test]
fn test_full_response_written_last() {
    let doc = parse_str(TWO_PAGES).unwrap();
    let mut sink = MemorySink::new();

    let written = OutputGenerator::new(&doc, OutputOptions::new().with_document_id("inv-1"))
        .write_to(&mut sink)
        .unwrap();
    assert_eq!(written, 9);

    let last = sink.artifacts().last().unwrap();
    assert_eq!(last.path, "ocr-analysis/fullresponse.json");
    assert_eq!(last.content_type, CONTENT_TYPE_JSON);
    assert_eq!(last.tags.as_deref(), Some("documentId=inv-1"));

    // Two responses serialize as an array
    let full: serde_json::Value = serde_json::from_slice(&last.bytes).unwrap();
    assert_eq!(full.as_array().map(|a| a.len()), Some(2));

    let forms = sink.get("ocr-analysis/page-1/forms.csv").unwrap();
    assert_eq!(forms.as_str(), Some("Key,Value\nTotal,42\n"));

    let text = sink.get("ocr-analysis/page-2/text.txt").unwrap();
    assert_eq!(text.as_str(), Some("Thank you\n"));
}

#[test]
fn test_page_response_holds_page_blocks() {
    let doc = parse_str(TWO_PAGES).unwrap();
    let artifacts = OutputGenerator::new(&doc, OutputOptions::default())
        .artifacts()
        .unwrap();

    let page2 = artifacts
        .iter()
        .find(|a| a.path == "ocr-analysis/page-2/response.json")
        .unwrap();
    let blocks: serde_json::Value = serde_json::from_slice(&page2.bytes).unwrap();
    let ids: Vec<&str> = blocks
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|b| b["Id"].as_str())
        .collect();
    assert_eq!(ids, vec!["p2", "l2"]);
}

#[test]
fn test_failed_write_stops_before_full_response() {
    let doc = parse_str(TWO_PAGES).unwrap();
    let mut sink = FailingSink {
        inner: MemorySink::new(),
        fail_at: 5,
    };

    let result = OutputGenerator::new(&doc, OutputOptions::default()).write_to(&mut sink);

    assert!(matches!(result, Err(Error::Storage(_))));
    assert_eq!(sink.inner.artifacts().len(), 5);
    assert!(sink.inner.get("ocr-analysis/fullresponse.json").is_none());
}

#[test]
fn test_directory_sink() {
    let dir = tempfile::tempdir().unwrap();
    let mut sink = DirectorySink::new(dir.path());

    Untextract::new()
        .with_prefix("scans/invoice.png/ocr-analysis")
        .parse_str(TWO_PAGES)
        .unwrap()
        .write_to(&mut sink)
        .unwrap();

    let root = dir.path().join("scans/invoice.png/ocr-analysis");
    assert!(root.join("fullresponse.json").is_file());
    assert_eq!(
        fs::read_to_string(root.join("page-1").join("text.txt")).unwrap(),
        "Invoice\n"
    );
    assert!(root.join("page-2").join("tables.csv").is_file());
}
