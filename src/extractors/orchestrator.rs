// src/extractors/orchestrator.rs
use roxmltree::Document;

use super::context::ExtractionContext;
use super::fields::{extract_feature, extract_line_category};
use super::totals::{extract_total_value, AMBIENT_TAG};
use super::values::MARKER_ATTR;
use crate::catalog::{DOOR_PROFILE, SPECIAL_FINISH};
use crate::models::{EnvironmentSpec, Section, ValidationReport};
use crate::utils::error::ExtractError;

// Prefixes the design tool puts in front of environment names
const ENVIRONMENT_NAME_PREFIXES: [&str; 2] = ["Project - ", "Projeto - "];

/// Turns one export document into an [`EnvironmentSpec`].
///
/// Stateless: every call parses its own document and owns its own
/// [`ExtractionContext`], so one extractor can serve any number of threads.
#[derive(Debug, Default, Clone, Copy)]
pub struct Extractor;

impl Extractor {
    pub fn new() -> Self {
        Self
    }

    /// Extracts the requested sections. Never fails: parse errors and
    /// documents without a catalog line come back with `success == false`.
    pub fn extract(&self, content: &str, sections: &[Section]) -> EnvironmentSpec {
        tracing::info!("Extracting {} section(s) from {} byte document", sections.len(), content.len());

        let document = match Document::parse(content) {
            Ok(document) => document,
            Err(e) => {
                let error = ExtractError::Parse(e.to_string());
                tracing::warn!("{}", error);
                return EnvironmentSpec::failed(error.to_string());
            }
        };

        let mut ctx = ExtractionContext::new(&document);
        let environment_name = environment_name(&mut ctx);

        if ctx.lines().is_empty() {
            tracing::warn!("{}", ExtractError::NoCatalogLine);
            let (_, warnings) = ctx.into_parts();
            let mut spec = EnvironmentSpec {
                environment_name,
                ..EnvironmentSpec::failed(ExtractError::NoCatalogLine.to_string())
            };
            spec.metadata.warnings = warnings;
            return spec;
        }

        let mut spec = EnvironmentSpec {
            success: true,
            environment_name,
            ..EnvironmentSpec::default()
        };

        let mut requested: Vec<Section> = Vec::with_capacity(sections.len());
        for section in sections {
            if !requested.contains(section) {
                requested.push(*section);
            }
        }

        for section in requested {
            if let Err(e) = run_section(&ctx, section, &mut spec) {
                ctx.warn(format!("{}: {}", section, e));
            }
        }

        let (lines, warnings) = ctx.into_parts();
        spec.detected_lines = lines;
        spec.metadata.sections_extracted = spec.populated_categories();
        spec.metadata.warnings = warnings;

        tracing::info!(
            "Extraction finished for {:?} ({}): {:?}, {} warning(s)",
            spec.environment_name,
            spec.detected_lines_label(),
            spec.metadata.sections_extracted,
            spec.metadata.warnings.len()
        );
        spec
    }

    pub fn extract_all(&self, content: &str) -> EnvironmentSpec {
        self.extract(content, &Section::ALL)
    }

    /// Reports what an import of `content` would contain, per category.
    pub fn validate(&self, content: &str) -> ValidationReport {
        ValidationReport::from(&self.extract_all(content))
    }
}

fn run_section(ctx: &ExtractionContext, section: Section, spec: &mut EnvironmentSpec) -> Result<(), ExtractError> {
    match section {
        Section::Carcass => spec.carcass = extract_line_category(ctx),
        Section::Panels => spec.panels = extract_line_category(ctx),
        Section::DoorsHardware => {
            spec.doors = extract_line_category(ctx);
            spec.hardware = extract_line_category(ctx);
        }
        Section::DoorProfile => spec.door_profile = extract_feature(ctx, &DOOR_PROFILE),
        Section::SpecialFinish => spec.special_finish = extract_feature(ctx, &SPECIAL_FINISH),
        Section::TotalValue => spec.total_value = extract_total_value(ctx.document())?,
    }
    Ok(())
}

/// Name of the first environment, without the tool's project prefix.
fn environment_name(ctx: &mut ExtractionContext) -> Option<String> {
    let mut ambients = ctx
        .document()
        .descendants()
        .filter(|node| node.has_tag_name(AMBIENT_TAG));

    let first = ambients.next()?;
    let extra = ambients.count();
    if extra > 0 {
        ctx.warn(format!("Document holds {} environments; using the first", extra + 1));
    }

    let raw = first.attribute(MARKER_ATTR)?.trim();
    let name = ENVIRONMENT_NAME_PREFIXES
        .iter()
        .find_map(|prefix| raw.strip_prefix(prefix))
        .unwrap_or(raw)
        .trim();

    (!name.is_empty()).then(|| name.to_string())
}
