// src/extractors/fields.rs
//! Table-driven extraction of the per-line categories (carcass, panels,
//! doors, hardware) and the cross-line features (door profile, special finish).

use std::collections::BTreeMap;

use super::context::ExtractionContext;
use super::normalize::{
    assemble_slide, canonical_hinge, join_values, slide_model, split_material_color,
    strip_redundancy, thickness, Damping,
};
use super::values::ValueExtractor;
use crate::catalog::{FeatureSchema, FieldMap, Source};
use crate::models::CategoryRecord;

/// Per-field value lists accumulated across lines before merging.
#[derive(Debug, Default)]
pub struct FieldAccumulator {
    fields: BTreeMap<&'static str, Vec<String>>,
}

impl FieldAccumulator {
    pub fn extend(&mut self, field: &'static str, values: Vec<String>) {
        if values.is_empty() {
            return;
        }
        self.fields.entry(field).or_default().extend(values);
    }

    pub fn collect(&mut self, values: ValueExtractor<'_, '_>, locator: &'static str, fields: &[FieldMap]) {
        for map in fields {
            for source in map.sources {
                self.extend(map.field, resolve_source(values, locator, source));
            }
        }
    }

    /// Dedups and joins every field; `None` when nothing was accumulated.
    pub fn finish<R: CategoryRecord>(mut self) -> Option<R> {
        R::build(|field| join_values(self.fields.remove(field).unwrap_or_default()))
    }
}

/// Values of one field source under the grouping marked `locator`.
pub fn resolve_source(values: ValueExtractor<'_, '_>, locator: &'static str, source: &Source) -> Vec<String> {
    match *source {
        Source::Values(property) => values.values_for(locator, property),
        Source::Thickness(property) => values
            .values_for(locator, property)
            .iter()
            .filter_map(|v| thickness(v))
            .collect(),
        Source::Material(property) => split_material_color(&values.values_for(locator, property)).0,
        Source::Color(property) => split_material_color(&values.values_for(locator, property)).1,
        Source::Descriptor(property) => values
            .values_for(locator, property)
            .iter()
            .filter_map(|v| strip_redundancy(v))
            .collect(),
        Source::Hinge(property) => values
            .values_for(locator, property)
            .iter()
            .filter_map(|v| canonical_hinge(v))
            .collect(),
        Source::FirstOf(alternatives) => alternatives
            .iter()
            .map(|alt| resolve_source(values, locator, alt))
            .find(|resolved| !resolved.is_empty())
            .unwrap_or_default(),
        Source::Slide { brand, model, damping } => {
            // Parts are paired by position, so repeats and unresolved
            // entries keep their slot; the merged field dedups later
            let brands = values.positional_values_for(locator, brand);
            let models: Vec<Option<String>> = values
                .positional_values_for(locator, model)
                .iter()
                .map(|v| slide_model(v))
                .collect();
            let dampings: Vec<Option<&'static str>> = values
                .positional_values_for(locator, damping)
                .iter()
                .map(|v| Damping::from_description(v).map(|d| d.label()))
                .collect();

            let count = brands.len().max(models.len()).max(dampings.len());
            (0..count)
                .filter_map(|i| {
                    assemble_slide(
                        brands.get(i).map(String::as_str),
                        models.get(i).and_then(Option::as_deref),
                        dampings.get(i).copied().flatten(),
                    )
                })
                .collect()
        }
    }
}

/// Extracts a per-line category, merging the detected lines in detection order.
pub fn extract_line_category<R: CategoryRecord>(ctx: &ExtractionContext) -> Option<R> {
    let mut accumulator = FieldAccumulator::default();

    for line in ctx.lines() {
        let schema = line.schema();
        let Some(fields) = schema.fields(R::CATEGORY) else {
            tracing::trace!("{} has no {} mapping", line, R::CATEGORY);
            continue;
        };

        let locator = schema.locator(R::CATEGORY);
        if !ctx.values().has_grouping(locator) {
            tracing::debug!("{}: no '{}' grouping, skipping {}", line, locator, R::CATEGORY);
            continue;
        }

        accumulator.collect(ctx.values(), locator, fields);
    }

    let record = accumulator.finish::<R>();
    tracing::debug!("{}: {}", R::CATEGORY, if record.is_some() { "populated" } else { "empty" });
    record
}

/// Extracts a cross-line feature gated only on its own marker.
pub fn extract_feature<R: CategoryRecord>(ctx: &ExtractionContext, schema: &FeatureSchema) -> Option<R> {
    if !ctx.values().has_grouping(schema.marker) {
        tracing::debug!("No '{}' grouping, skipping {}", schema.marker, schema.category);
        return None;
    }

    let mut accumulator = FieldAccumulator::default();
    accumulator.collect(ctx.values(), schema.marker, schema.fields);
    accumulator.finish::<R>()
}
