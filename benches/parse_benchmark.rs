//! Benchmarks for untextract parsing and rendering performance.
//!
//! Run with: cargo bench
//!
//! These benchmarks use synthetic responses with lines, form fields and a
//! table on every page.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use serde_json::{json, Value};

/// Creates a synthetic response JSON with the given number of pages.
fn create_test_response(page_count: usize) -> String {
    let geometry = json!({
        "BoundingBox": {"Width": 0.5, "Height": 0.1, "Left": 0.25, "Top": 0.25},
        "Polygon": [{"X": 0.25, "Y": 0.25}, {"X": 0.75, "Y": 0.25}]
    });
    let block = |id: String, kind: &str, extra: Value| -> Value {
        let mut b = json!({"Id": id, "BlockType": kind, "Confidence": 99.0, "Geometry": geometry});
        if let (Some(b), Some(extra)) = (b.as_object_mut(), extra.as_object()) {
            b.extend(extra.clone());
        }
        b
    };

    let mut blocks = Vec::new();
    for p in 0..page_count {
        let start = blocks.len();
        let mut page_children = Vec::new();

        // Lines of text
        for l in 0..20 {
            let words: Vec<String> = (0..8).map(|w| format!("p{}l{}w{}", p, l, w)).collect();
            for id in &words {
                blocks.push(block(id.clone(), "WORD", json!({"Text": "lorem"})));
            }
            let line = format!("p{}l{}", p, l);
            blocks.push(block(
                line.clone(),
                "LINE",
                json!({"Text": "lorem lorem lorem lorem lorem lorem lorem lorem",
                       "Relationships": [{"Type": "CHILD", "Ids": words}]}),
            ));
            page_children.push(line);
        }

        // Form fields
        for f in 0..10 {
            let key = format!("p{}k{}", p, f);
            let value = format!("p{}v{}", p, f);
            let key_word = format!("{}w", key);
            let value_word = format!("{}w", value);
            blocks.push(block(key_word.clone(), "WORD", json!({"Text": format!("Key{}", f)})));
            blocks.push(block(value_word.clone(), "WORD", json!({"Text": "value"})));
            blocks.push(block(
                key.clone(),
                "KEY_VALUE_SET",
                json!({"EntityTypes": ["KEY"], "Relationships": [
                    {"Type": "VALUE", "Ids": [value.clone()]},
                    {"Type": "CHILD", "Ids": [key_word]}
                ]}),
            ));
            blocks.push(block(
                value.clone(),
                "KEY_VALUE_SET",
                json!({"EntityTypes": ["VALUE"], "Relationships": [{"Type": "CHILD", "Ids": [value_word]}]}),
            ));
            page_children.push(key);
            page_children.push(value);
        }

        // One 5x4 table
        let mut cells = Vec::new();
        for r in 1..=5 {
            for c in 1..=4 {
                let cell = format!("p{}c{}_{}", p, r, c);
                let word = format!("{}w", cell);
                blocks.push(block(word.clone(), "WORD", json!({"Text": format!("{}x{}", r, c)})));
                blocks.push(block(
                    cell.clone(),
                    "CELL",
                    json!({"RowIndex": r, "ColumnIndex": c, "RowSpan": 1, "ColumnSpan": 1,
                           "Relationships": [{"Type": "CHILD", "Ids": [word]}]}),
                ));
                cells.push(cell);
            }
        }
        let table = format!("p{}t", p);
        blocks.push(block(
            table.clone(),
            "TABLE",
            json!({"Relationships": [{"Type": "CHILD", "Ids": cells}]}),
        ));
        page_children.push(table);

        // Page blocks come first within their group
        let page = block(
            format!("p{}", p),
            "PAGE",
            json!({"Relationships": [{"Type": "CHILD", "Ids": page_children}]}),
        );
        blocks.insert(start, page);
    }

    json!({"DocumentMetadata": {"Pages": page_count}, "Blocks": blocks}).to_string()
}

/// Benchmark response parsing at various sizes.
fn bench_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("response_parsing");

    for page_count in [1, 10, 50].iter() {
        let data = create_test_response(*page_count);

        group.bench_function(format!("{}_pages", page_count), |b| {
            b.iter(|| untextract::parse_str(black_box(&data)).unwrap());
        });
    }

    group.finish();
}

/// Benchmark artifact rendering.
fn bench_artifacts(c: &mut Criterion) {
    let doc = untextract::parse_str(&create_test_response(10)).unwrap();

    c.bench_function("artifacts_10_pages", |b| {
        b.iter(|| {
            untextract::OutputGenerator::new(black_box(&doc), untextract::OutputOptions::default())
                .artifacts()
                .unwrap()
        });
    });
}

/// Benchmark builder pattern overhead.
fn bench_builder_creation(c: &mut Criterion) {
    c.bench_function("builder_creation", |b| {
        b.iter(|| {
            let _builder = untextract::Untextract::new()
                .lenient()
                .with_prefix("bench/ocr-analysis")
                .with_document_id("bench");
        });
    });
}

criterion_group!(benches, bench_parsing, bench_artifacts, bench_builder_creation);
criterion_main!(benches);
