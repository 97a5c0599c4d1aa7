// src/main.rs
use std::path::PathBuf;

use clap::Parser;

use catalog_extractor::storage::StorageManager;
use catalog_extractor::utils::{self, encoding, AppError};
use catalog_extractor::{Extractor, Section};

/// Command Line Interface for the furniture catalog export extractor
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// XML project export of one environment
    input: PathBuf,

    /// Sections to extract, comma separated (default: all).
    /// One of: carcass, panels, doors, door_profile, special_finish, total_value
    #[arg(short, long, value_delimiter = ',')]
    sections: Vec<String>,

    /// Print the per-category validation report instead of the extraction
    #[arg(long)]
    validate: bool,

    /// Store the extraction keyed by the document's content hash
    #[arg(long)]
    save: bool,

    /// Output directory for stored extractions
    #[arg(short, long, default_value = "./output")]
    output_dir: PathBuf,

    /// Pretty-print JSON output
    #[arg(short, long)]
    pretty: bool,
}

fn main() -> Result<(), AppError> {
    // 1. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging();

    // 2. Parse CLI Arguments
    let args = Args::parse();
    tracing::info!("Starting processing for args: {:?}", args);

    let sections = if args.sections.is_empty() {
        Section::ALL.to_vec()
    } else {
        args.sections
            .iter()
            .map(|s| s.parse::<Section>())
            .collect::<Result<Vec<_>, _>>()?
    };

    // 3. Read and decode the export
    let bytes = std::fs::read(&args.input)?;
    let content = encoding::decode_document(&bytes);
    tracing::info!("Read {} ({} bytes)", args.input.display(), bytes.len());

    let extractor = Extractor::new();

    // 4. Validation only: report and stop
    if args.validate {
        let report = extractor.validate(&content);
        print_json(&report, args.pretty)?;
        return Ok(());
    }

    // 5. Extract
    let spec = extractor.extract(&content, &sections);
    for warning in &spec.metadata.warnings {
        tracing::warn!("{}", warning);
    }

    // 6. Optionally store, rejecting documents imported before
    if args.save {
        if !spec.success {
            return Err(AppError::Config(format!(
                "Refusing to store a failed extraction: {}",
                spec.error.as_deref().unwrap_or("unknown error")
            )));
        }

        let storage = StorageManager::new(&args.output_dir)?;
        let hash = encoding::content_hash(&content);
        if storage.contains(&hash) {
            return Err(AppError::Config(format!("Document already imported ({})", hash)));
        }
        let path = storage.save_extraction(&hash, &spec)?;
        tracing::info!("Stored extraction at {}", path.display());
    }

    print_json(&spec, args.pretty)?;

    if !spec.success {
        tracing::error!("Extraction failed: {}", spec.error.as_deref().unwrap_or("unknown error"));
    }
    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T, pretty: bool) -> Result<(), AppError> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", json);
    Ok(())
}
