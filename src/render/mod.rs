//! Rendering module: text, JSON and CSV projections of a document, and the
//! artifact set handed to storage.

mod json;
mod options;
mod output;
mod records;
mod text;

pub use json::{blocks_to_json, responses_to_json, to_json, JsonFormat};
pub use options::{OutputOptions, PageSelection, RenderOptions};
pub use output::{
    Artifact, ArtifactSink, DirectorySink, MemorySink, OutputGenerator, CONTENT_TYPE_CSV,
    CONTENT_TYPE_JSON, CONTENT_TYPE_TEXT,
};
pub use records::{form_rows, forms_to_csv, table_rows, tables_to_csv, TABLE_MARKER};
pub use text::to_text;
