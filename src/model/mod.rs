//! Document model types.
//!
//! This module defines the structured representation rebuilt from the flat
//! block list of an analysis response: pages holding lines, tables and form
//! fields, each resolved down to words and selection marks. Every type is
//! serializable so projections can hand it to storage unchanged.

mod document;
mod form;
mod geometry;
mod page;
mod table;
mod text;

pub use document::{Document, DocumentStats};
pub use form::{Field, FieldKey, FieldValue, Form};
pub use geometry::{BoundingBox, Geometry, Point};
pub use page::{Content, ContentRef, Page};
pub use table::{Cell, Row, Table};
pub use text::{ContentItem, Line, SelectionElement, SelectionStatus, Word};
