// src/extractors/context.rs
use roxmltree::Document;

use super::values::ValueExtractor;
use crate::catalog::{detect_lines, CatalogLine};

/// Scratch state of one extraction call: the parsed document, the lines
/// detected in it and the warnings collected so far.
pub struct ExtractionContext<'a, 'input> {
    values: ValueExtractor<'a, 'input>,
    lines: Vec<CatalogLine>,
    warnings: Vec<String>,
}

impl<'a, 'input> ExtractionContext<'a, 'input> {
    /// Runs line detection once for the document.
    pub fn new(document: &'a Document<'input>) -> Self {
        Self::with_lines(document, detect_lines(document))
    }

    pub fn with_lines(document: &'a Document<'input>, lines: Vec<CatalogLine>) -> Self {
        Self {
            values: ValueExtractor::new(document),
            lines,
            warnings: Vec::new(),
        }
    }

    pub fn document(&self) -> &'a Document<'input> {
        self.values.document()
    }

    pub fn values(&self) -> ValueExtractor<'a, 'input> {
        self.values
    }

    pub fn lines(&self) -> &[CatalogLine] {
        &self.lines
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!("{}", message);
        self.warnings.push(message);
    }

    pub fn into_parts(self) -> (Vec<CatalogLine>, Vec<String>) {
        (self.lines, self.warnings)
    }
}
