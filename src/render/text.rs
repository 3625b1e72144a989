//! Plain text rendering.

use crate::error::Result;
use crate::model::Document;

use super::RenderOptions;

/// Convert a document to plain text.
///
/// Each selected page contributes its full text (one line of output per
/// detected line); pages are separated by an empty line.
pub fn to_text(doc: &Document, options: &RenderOptions) -> Result<String> {
    let pages: Vec<&str> = doc
        .pages
        .iter()
        .enumerate()
        .filter(|(i, _)| options.page_selection.includes(*i as u32 + 1))
        .map(|(_, page)| page.plain_text())
        .collect();

    Ok(pages.join("\n"))
}
