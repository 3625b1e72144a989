//! Record-shaped projections of a page: form pairs and table matrices, and
//! their CSV encodings.

use csv::{Terminator, WriterBuilder};

use crate::error::{Error, Result};
use crate::model::Page;

/// Marker row written before each table.
pub const TABLE_MARKER: &str = "Table";

/// `(key text, value text)` for each form field, in form order.
pub fn form_rows(page: &Page) -> Vec<(String, String)> {
    page.form
        .fields()
        .iter()
        .map(|f| (f.key_text().to_string(), f.value_text().to_string()))
        .collect()
}

/// Rows of every table on the page.
///
/// Each table starts with a `["Table"]` marker row, continues with one row
/// per table row holding the cell texts, and ends with two empty rows.
pub fn table_rows(page: &Page) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    for table in &page.tables {
        rows.push(vec![TABLE_MARKER.to_string()]);
        rows.extend(table.to_matrix());
        rows.push(Vec::new());
        rows.push(Vec::new());
    }
    rows
}

/// Form projection as CSV with a `Key,Value` header.
pub fn forms_to_csv(page: &Page) -> Result<String> {
    let header = vec!["Key".to_string(), "Value".to_string()];
    let rows = form_rows(page).into_iter().map(|(k, v)| vec![k, v]);
    write_records(std::iter::once(header).chain(rows))
}

/// Table projection as CSV. Rows may differ in width.
pub fn tables_to_csv(page: &Page) -> Result<String> {
    write_records(table_rows(page))
}

/// An empty record is written as a bare line terminator.
fn write_records<I>(records: I) -> Result<String>
where
    I: IntoIterator<Item = Vec<String>>,
{
    let builder = {
        let mut builder = WriterBuilder::new();
        builder.flexible(true).terminator(Terminator::Any(b'\n'));
        builder
    };

    let mut out = Vec::new();
    for record in records {
        if record.is_empty() {
            out.push(b'\n');
            continue;
        }
        let mut writer = builder.from_writer(&mut out);
        writer.write_record(&record)?;
        writer.flush()?;
    }

    String::from_utf8(out).map_err(|e| Error::Render(format!("CSV encoding error: {}", e)))
}
