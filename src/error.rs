//! Error types for untextract library.

use std::io;
use thiserror::Error;

/// Result type alias for untextract operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while rebuilding or projecting a document.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The response JSON could not be decoded or encoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A CSV projection could not be written.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The document has no pages, so there is nothing to project.
    #[error("Empty document: no pages were assembled")]
    EmptyDocument,

    /// Table cells arrived in an order that cannot be grouped into rows.
    #[error("Table layout error: {0}")]
    TableLayout(String),

    /// Error during rendering (text, CSV, JSON).
    #[error("Rendering error: {0}")]
    Render(String),

    /// Invalid page range specification.
    #[error("Invalid page range: {0}")]
    InvalidPageRange(String),

    /// An artifact sink refused a write.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}
