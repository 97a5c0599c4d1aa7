// src/catalog/detector.rs
use roxmltree::Document;

use super::schema::{CatalogLine, LINE_SCHEMAS};
use crate::extractors::values::ValueExtractor;

/// Catalog lines whose grouping marker literally appears in the document,
/// in table order. Empty when neither marker is present.
pub fn detect_lines(document: &Document) -> Vec<CatalogLine> {
    let values = ValueExtractor::new(document);
    let lines: Vec<CatalogLine> = LINE_SCHEMAS
        .iter()
        .filter(|schema| values.has_grouping(schema.marker))
        .map(|schema| schema.line)
        .collect();

    tracing::debug!("Detected catalog lines: {:?}", lines);
    lines
}
