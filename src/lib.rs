//! Extracts a normalized furniture specification from the XML project export
//! of a furniture design tool, one environment (room) per document.
//!
//! ```no_run
//! use catalog_extractor::{Extractor, Section};
//!
//! let xml = std::fs::read_to_string("kitchen.xml").unwrap();
//! let spec = Extractor::new().extract(&xml, &[Section::Panels, Section::TotalValue]);
//! if spec.success {
//!     println!("{:?}", spec.total_value);
//! }
//! ```

pub mod catalog;
pub mod extractors;
pub mod models;
pub mod storage;
pub mod utils;

pub use catalog::CatalogLine;
pub use extractors::Extractor;
pub use models::{Category, EnvironmentSpec, Section, ValidationReport};
pub use utils::{AppError, ExtractError, StorageError};

/// Extracts `sections` from one export document.
pub fn extract(content: &str, sections: &[Section]) -> EnvironmentSpec {
    Extractor::new().extract(content, sections)
}

/// Per-category report of what `content` would import.
pub fn validate(content: &str) -> ValidationReport {
    Extractor::new().validate(content)
}
