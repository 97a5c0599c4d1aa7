// src/utils/error.rs
use thiserror::Error;

// Errors raised while turning an export document into an environment specification
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExtractError {
    #[error("Document is not well-formed XML: {0}")]
    Parse(String),

    #[error("No catalog line marker found in document")]
    NoCatalogLine,

    #[error("Invalid number '{value}' at {location}")]
    InvalidNumber { location: String, value: String },

    #[error("Unknown section: {0}")]
    UnknownSection(String),
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("File already exists: {0}")]
    FileExists(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error), // Automatically convert IO errors

    #[error("Extraction failed: {0}")]
    Extraction(#[from] ExtractError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}
