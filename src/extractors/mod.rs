pub mod context;
pub mod fields;
pub mod normalize;
pub mod orchestrator;
pub mod totals;
pub mod values;

#[cfg(test)]
pub(crate) mod fixtures;

// Re-export key extraction types for convenience
pub use context::ExtractionContext;
pub use orchestrator::Extractor;
pub use totals::{PriceField, PriceResolver, PRICE_RESOLVERS};
pub use values::ValueExtractor;
