pub mod detector;
pub mod schema;

// Re-export key catalog types for convenience
pub use detector::detect_lines;
pub use schema::{
    CatalogLine,
    FeatureSchema,
    FieldMap,
    LineSchema,
    Source,
    DOOR_PROFILE,
    LINE_SCHEMAS,
    SPECIAL_FINISH,
};
