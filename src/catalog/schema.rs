// src/catalog/schema.rs
//! Static property-name tables for every catalog line and cross-line feature.
//!
//! Extractors never branch on a concrete line: they look the line up here and
//! walk its field maps. Supporting another catalog means adding a variant to
//! [`CatalogLine`] and a row to [`LINE_SCHEMAS`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::Category;

/// Product catalog families that can appear in an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CatalogLine {
    LineA,
    LineB,
}

impl CatalogLine {
    pub fn name(&self) -> &'static str {
        match self {
            CatalogLine::LineA => "LineA",
            CatalogLine::LineB => "LineB",
        }
    }

    pub fn schema(&self) -> &'static LineSchema {
        match self {
            CatalogLine::LineA => &LINE_SCHEMAS[0],
            CatalogLine::LineB => &LINE_SCHEMAS[1],
        }
    }
}

impl fmt::Display for CatalogLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CatalogLine {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LINE_SCHEMAS
            .iter()
            .map(|schema| schema.line)
            .find(|line| line.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown catalog line '{}'", s))
    }
}

/// How the values of one output field are obtained from a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// Values used as they appear.
    Values(&'static str),
    /// `<digits>mm` pattern pulled out of each value.
    Thickness(&'static str),
    /// Left side of `Material\Color` tokens.
    Material(&'static str),
    /// Right side of `Material\Color` tokens, or the whole token without separator.
    Color(&'static str),
    /// Handle/profile descriptors with boilerplate stripped.
    Descriptor(&'static str),
    /// Hinge labels canonicalized on their with/without clause.
    Hinge(&'static str),
    /// First alternative that yields any value wins.
    FirstOf(&'static [Source]),
    /// "brand model type" slide descriptor assembled from three properties.
    Slide {
        brand: &'static str,
        model: &'static str,
        damping: &'static str,
    },
}

/// Sources feeding one field of a category record. Values from every source
/// are accumulated in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldMap {
    pub field: &'static str,
    pub sources: &'static [Source],
}

const fn field(field: &'static str, sources: &'static [Source]) -> FieldMap {
    FieldMap { field, sources }
}

/// Property layout of one catalog line.
#[derive(Debug)]
pub struct LineSchema {
    pub line: CatalogLine,
    /// `DESCRIPTION` of the grouping holding the line's modules.
    pub marker: &'static str,
    /// `DESCRIPTION` of the grouping holding the line's body/frame.
    pub body_marker: &'static str,
    pub categories: &'static [(Category, &'static [FieldMap])],
}

impl LineSchema {
    pub fn fields(&self, category: Category) -> Option<&'static [FieldMap]> {
        self.categories
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, fields)| *fields)
    }

    /// Grouping marker the category is read from.
    pub fn locator(&self, category: Category) -> &'static str {
        match category {
            Category::Carcass => self.body_marker,
            _ => self.marker,
        }
    }
}

/// Optional feature present in either catalog, gated on its own marker.
#[derive(Debug)]
pub struct FeatureSchema {
    pub category: Category,
    pub marker: &'static str,
    pub fields: &'static [FieldMap],
}

pub static LINE_SCHEMAS: [LineSchema; 2] = [
    LineSchema {
        line: CatalogLine::LineA,
        marker: "LINE_A",
        body_marker: "LINE_A_BODY",
        categories: &[
            (
                Category::Carcass,
                &[
                    field("line", &[Source::Values("Collection")]),
                    field("thickness", &[Source::Thickness("Body Thickness")]),
                    field("shelf_thickness", &[Source::Thickness("Shelf Thickness")]),
                    field("material", &[Source::Material("Body Finish")]),
                    field("color", &[Source::Color("Body Finish")]),
                ],
            ),
            (
                Category::Panels,
                &[
                    field("material", &[Source::Material("Panel Finish")]),
                    field("thickness", &[Source::Thickness("Panel")]),
                    field("color", &[Source::Color("Panel Finish")]),
                ],
            ),
            (
                Category::Doors,
                &[
                    field("thickness", &[Source::Thickness("Door Thickness")]),
                    field("material", &[Source::Material("Door Finish")]),
                    field("model", &[Source::Descriptor("Door Model")]),
                    field("color", &[Source::Color("Door Finish")]),
                ],
            ),
            (
                Category::Hardware,
                &[
                    field(
                        "handles",
                        &[Source::FirstOf(&[
                            Source::Descriptor("Handle"),
                            Source::Descriptor("Handle Model"),
                        ])],
                    ),
                    field("hinges", &[Source::Hinge("Hinge")]),
                    field(
                        "slides",
                        &[Source::Slide {
                            brand: "Slide Brand",
                            model: "Drawer Model",
                            damping: "Slide Type",
                        }],
                    ),
                ],
            ),
        ],
    },
    LineSchema {
        line: CatalogLine::LineB,
        marker: "LINE_B",
        body_marker: "LINE_B_BODY",
        categories: &[
            (
                Category::Carcass,
                &[
                    field("line", &[Source::Values("Line")]),
                    field("thickness", &[Source::Thickness("Carcass Thickness")]),
                    field("shelf_thickness", &[Source::Thickness("Shelf")]),
                    field("material", &[Source::Values("Carcass Material")]),
                    field("color", &[Source::Values("Carcass Color")]),
                ],
            ),
            (
                Category::Panels,
                &[
                    field("material", &[Source::Values("Panel Material")]),
                    field("thickness", &[Source::Thickness("Panel Thickness")]),
                    field("color", &[Source::Values("Panel Color")]),
                ],
            ),
            (
                Category::Doors,
                &[
                    field("thickness", &[Source::Thickness("Front Thickness")]),
                    field("material", &[Source::Values("Front Material")]),
                    field("model", &[Source::Descriptor("Front Model")]),
                    field("color", &[Source::Values("Front Color")]),
                ],
            ),
            (
                Category::Hardware,
                &[
                    field(
                        "handles",
                        &[Source::FirstOf(&[
                            Source::Descriptor("Pull"),
                            Source::Descriptor("Handle"),
                        ])],
                    ),
                    field("hinges", &[Source::Hinge("Hinges")]),
                    field(
                        "slides",
                        &[Source::Slide {
                            brand: "Runner Brand",
                            model: "Runner",
                            damping: "Damping",
                        }],
                    ),
                ],
            ),
        ],
    },
];

pub static DOOR_PROFILE: FeatureSchema = FeatureSchema {
    category: Category::DoorProfile,
    marker: "PROFILE_DOOR",
    fields: &[
        field("profile", &[Source::Descriptor("Profile")]),
        field("glass", &[Source::Values("Glass")]),
        field(
            "handle",
            &[Source::FirstOf(&[
                Source::Descriptor("Profile Handle"),
                Source::Descriptor("Handle"),
            ])],
        ),
        field("hinges", &[Source::Hinge("Profile Hinge")]),
    ],
};

pub static SPECIAL_FINISH: FeatureSchema = FeatureSchema {
    category: Category::SpecialFinish,
    marker: "SPECIAL_FINISH",
    fields: &[
        field(
            "thickness",
            &[Source::Thickness("Finish Thickness"), Source::Thickness("Finish")],
        ),
        field("color", &[Source::Color("Finish"), Source::Values("Finish Color")]),
        field("profile", &[Source::Descriptor("Finish Profile")]),
    ],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_line_resolves_to_its_own_schema() {
        for schema in LINE_SCHEMAS.iter() {
            assert_eq!(schema.line.schema().marker, schema.marker);
        }
    }

    #[test]
    fn field_maps_name_real_record_fields() {
        let tables = LINE_SCHEMAS
            .iter()
            .flat_map(|s| s.categories.iter().copied())
            .chain([
                (DOOR_PROFILE.category, DOOR_PROFILE.fields),
                (SPECIAL_FINISH.category, SPECIAL_FINISH.fields),
            ]);

        for (category, fields) in tables {
            for map in fields {
                assert!(
                    category.field_names().contains(&map.field),
                    "{} has no field '{}'",
                    category,
                    map.field
                );
            }
        }
    }

    #[test]
    fn markers_are_distinct() {
        let mut markers: Vec<&str> = LINE_SCHEMAS
            .iter()
            .flat_map(|s| [s.marker, s.body_marker])
            .chain([DOOR_PROFILE.marker, SPECIAL_FINISH.marker])
            .collect();
        let total = markers.len();
        markers.sort_unstable();
        markers.dedup();
        assert_eq!(markers.len(), total);
    }

    #[test]
    fn carcass_reads_from_body_grouping() {
        let schema = CatalogLine::LineB.schema();
        assert_eq!(schema.locator(Category::Carcass), "LINE_B_BODY");
        assert_eq!(schema.locator(Category::Doors), "LINE_B");
    }

    #[test]
    fn line_names_parse() {
        assert_eq!("linea".parse::<CatalogLine>(), Ok(CatalogLine::LineA));
        assert!("LineC".parse::<CatalogLine>().is_err());
    }
}
