// src/storage/mod.rs
use std::fs;
use std::path::{Path, PathBuf};

use crate::extractors::normalize::parse_decimal;
use crate::models::EnvironmentSpec;
use crate::utils::error::StorageError;

/// Stores extraction results as JSON blobs keyed by the document's content hash.
pub struct StorageManager {
    base_dir: PathBuf,
}

impl StorageManager {
    /// Creates a new StorageManager with the specified base directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self, StorageError> {
        let base_path = base_dir.as_ref().to_path_buf();

        // Create the base directory if it doesn't exist
        if !base_path.exists() {
            fs::create_dir_all(&base_path)
                .map_err(StorageError::IoError)?;
        }

        Ok(Self { base_dir: base_path })
    }

    fn spec_path(&self, content_hash: &str) -> PathBuf {
        self.base_dir.join(format!("{}.json", content_hash))
    }

    fn metadata_path(&self, content_hash: &str) -> PathBuf {
        self.base_dir.join(format!("{}_meta.json", content_hash))
    }

    /// Whether a document with this hash was already imported.
    pub fn contains(&self, content_hash: &str) -> bool {
        self.spec_path(content_hash).exists()
    }

    /// Saves the extraction and its flattened metadata.
    /// A second save of the same document is rejected.
    pub fn save_extraction(&self, content_hash: &str, spec: &EnvironmentSpec) -> Result<PathBuf, StorageError> {
        let file_path = self.spec_path(content_hash);
        if file_path.exists() {
            return Err(StorageError::FileExists(file_path.display().to_string()));
        }

        let blob = serde_json::to_string_pretty(spec)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;
        fs::write(&file_path, blob)
            .map_err(StorageError::IoError)?;
        tracing::info!("Saved extraction to {}", file_path.display());

        let metadata_path = self.save_metadata(content_hash, spec)?;
        tracing::info!("Saved metadata to {}", metadata_path.display());

        Ok(file_path)
    }

    /// Flattened record with the prices as numbers.
    fn save_metadata(&self, content_hash: &str, spec: &EnvironmentSpec) -> Result<PathBuf, StorageError> {
        let file_path = self.metadata_path(content_hash);
        let totals = spec.total_value.as_ref();

        let metadata = serde_json::json!({
            "content_hash": content_hash,
            "environment_name": spec.environment_name,
            "detected_lines": spec.detected_lines_label(),
            "sections_extracted": spec.metadata.sections_extracted,
            "warning_count": spec.metadata.warnings.len(),
            "factory_cost": totals.and_then(|t| t.factory_cost.as_deref()).and_then(parse_decimal),
            "sale_value": totals.and_then(|t| t.sale_value.as_deref()).and_then(parse_decimal),
            "extraction_timestamp": chrono::Utc::now().to_rfc3339(),
        });

        let metadata_str = serde_json::to_string_pretty(&metadata)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;

        fs::write(&file_path, metadata_str)
            .map_err(StorageError::IoError)?;

        Ok(file_path)
    }

    /// Loads a previously stored extraction.
    pub fn load_extraction(&self, content_hash: &str) -> Result<EnvironmentSpec, StorageError> {
        let raw = fs::read_to_string(self.spec_path(content_hash))?;
        serde_json::from_str(&raw).map_err(|e| StorageError::SerializationError(e.to_string()))
    }
}
