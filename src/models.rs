// src/models.rs
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::catalog::CatalogLine;
use crate::utils::error::ExtractError;

/// One logical group of specification data in the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Carcass,
    Panels,
    Doors,
    Hardware,
    DoorProfile,
    SpecialFinish,
    TotalValue,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Carcass,
        Category::Panels,
        Category::Doors,
        Category::Hardware,
        Category::DoorProfile,
        Category::SpecialFinish,
        Category::TotalValue,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Carcass => "carcass",
            Category::Panels => "panels",
            Category::Doors => "doors",
            Category::Hardware => "hardware",
            Category::DoorProfile => "door_profile",
            Category::SpecialFinish => "special_finish",
            Category::TotalValue => "total_value",
        }
    }

    /// Field names of the record this category produces.
    pub fn field_names(&self) -> &'static [&'static str] {
        match self {
            Category::Carcass => CarcassSpec::FIELDS,
            Category::Panels => PanelSpec::FIELDS,
            Category::Doors => DoorSpec::FIELDS,
            Category::Hardware => HardwareSpec::FIELDS,
            Category::DoorProfile => DoorProfileSpec::FIELDS,
            Category::SpecialFinish => FinishSpec::FIELDS,
            Category::TotalValue => TotalValueSpec::FIELDS,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A unit of work the caller can request. Doors and hardware come out of
/// the same section because they share the same property groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Carcass,
    Panels,
    DoorsHardware,
    DoorProfile,
    SpecialFinish,
    TotalValue,
}

impl Section {
    pub const ALL: [Section; 6] = [
        Section::Carcass,
        Section::Panels,
        Section::DoorsHardware,
        Section::DoorProfile,
        Section::SpecialFinish,
        Section::TotalValue,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Carcass => "carcass",
            Section::Panels => "panels",
            Section::DoorsHardware => "doors_hardware",
            Section::DoorProfile => "door_profile",
            Section::SpecialFinish => "special_finish",
            Section::TotalValue => "total_value",
        }
    }

    pub fn categories(&self) -> &'static [Category] {
        match self {
            Section::Carcass => &[Category::Carcass],
            Section::Panels => &[Category::Panels],
            Section::DoorsHardware => &[Category::Doors, Category::Hardware],
            Section::DoorProfile => &[Category::DoorProfile],
            Section::SpecialFinish => &[Category::SpecialFinish],
            Section::TotalValue => &[Category::TotalValue],
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Section {
    type Err = ExtractError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "carcass" => Ok(Section::Carcass),
            "panels" => Ok(Section::Panels),
            "doors" | "hardware" | "doors_hardware" => Ok(Section::DoorsHardware),
            "door_profile" | "profile" => Ok(Section::DoorProfile),
            "special_finish" | "finish" => Ok(Section::SpecialFinish),
            "total_value" | "totals" => Ok(Section::TotalValue),
            _ => Err(ExtractError::UnknownSection(s.to_string())),
        }
    }
}

/// Shared behavior of the per-category records.
///
/// Every field is an optional, already merged string. A record with no
/// populated field is never emitted, so construction goes through [`build`].
///
/// [`build`]: CategoryRecord::build
pub trait CategoryRecord: Sized {
    const CATEGORY: Category;
    const FIELDS: &'static [&'static str];

    fn from_lookup(lookup: impl FnMut(&'static str) -> Option<String>) -> Self;

    fn field_values(&self) -> Vec<(&'static str, Option<&str>)>;

    /// Builds the record, or `None` when every field is unset.
    fn build(lookup: impl FnMut(&'static str) -> Option<String>) -> Option<Self> {
        let record = Self::from_lookup(lookup);
        record.has_data().then_some(record)
    }

    fn has_data(&self) -> bool {
        self.field_values().iter().any(|(_, v)| v.is_some())
    }

    fn populated_fields(&self) -> Vec<&'static str> {
        self.field_values()
            .into_iter()
            .filter_map(|(name, v)| v.map(|_| name))
            .collect()
    }
}

macro_rules! category_record {
    ($(#[$meta:meta])* $name:ident => $category:expr, { $($field:ident),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
        pub struct $name {
            $(
                #[serde(default, skip_serializing_if = "Option::is_none")]
                pub $field: Option<String>,
            )+
        }

        impl CategoryRecord for $name {
            const CATEGORY: Category = $category;
            const FIELDS: &'static [&'static str] = &[$(stringify!($field)),+];

            fn from_lookup(mut lookup: impl FnMut(&'static str) -> Option<String>) -> Self {
                Self { $($field: lookup(stringify!($field)),)+ }
            }

            fn field_values(&self) -> Vec<(&'static str, Option<&str>)> {
                vec![$((stringify!($field), self.$field.as_deref())),+]
            }
        }
    };
}

category_record!(
    /// Body/frame of the modules.
    CarcassSpec => Category::Carcass, { line, thickness, shelf_thickness, material, color }
);
category_record!(PanelSpec => Category::Panels, { material, thickness, color });
category_record!(DoorSpec => Category::Doors, { thickness, material, model, color });
category_record!(HardwareSpec => Category::Hardware, { handles, hinges, slides });
category_record!(
    /// Aluminium-profile doors, independent of the catalog line.
    DoorProfileSpec => Category::DoorProfile, { profile, glass, handle, hinges }
);
category_record!(
    /// Lacquer and other special finishes, independent of the catalog line.
    FinishSpec => Category::SpecialFinish, { thickness, color, profile }
);
category_record!(
    /// Currency fields are already formatted (`R$ 1.234,50`); `source` names
    /// the price location(s) that satisfied the lookup.
    TotalValueSpec => Category::TotalValue, { factory_cost, sale_value, source }
);

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionMetadata {
    pub sections_extracted: Vec<Category>,
    pub warnings: Vec<String>,
}

/// Result of one extraction call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentSpec {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(with = "joined_lines", default)]
    pub detected_lines: Vec<CatalogLine>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carcass: Option<CarcassSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub panels: Option<PanelSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doors: Option<DoorSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hardware: Option<HardwareSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub door_profile: Option<DoorProfileSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_finish: Option<FinishSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_value: Option<TotalValueSpec>,
    #[serde(default)]
    pub metadata: ExtractionMetadata,
}

impl EnvironmentSpec {
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            ..Self::default()
        }
    }

    /// Detected lines in their joined textual form, e.g. `LineA / LineB`.
    pub fn detected_lines_label(&self) -> String {
        joined_lines::label(&self.detected_lines)
    }

    /// Field names populated for a category; `None` when the record is absent.
    pub fn populated_fields(&self, category: Category) -> Option<Vec<&'static str>> {
        match category {
            Category::Carcass => self.carcass.as_ref().map(CategoryRecord::populated_fields),
            Category::Panels => self.panels.as_ref().map(CategoryRecord::populated_fields),
            Category::Doors => self.doors.as_ref().map(CategoryRecord::populated_fields),
            Category::Hardware => self.hardware.as_ref().map(CategoryRecord::populated_fields),
            Category::DoorProfile => self.door_profile.as_ref().map(CategoryRecord::populated_fields),
            Category::SpecialFinish => self.special_finish.as_ref().map(CategoryRecord::populated_fields),
            Category::TotalValue => self.total_value.as_ref().map(CategoryRecord::populated_fields),
        }
    }

    /// Categories holding a record, in category order.
    pub fn populated_categories(&self) -> Vec<Category> {
        Category::ALL
            .into_iter()
            .filter(|c| self.populated_fields(*c).is_some())
            .collect()
    }
}

/// Per-category outcome reported by `validate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryReport {
    pub category: Category,
    pub has_data: bool,
    pub populated_fields: Vec<String>,
}

/// What an extraction actually found, shown before an import is committed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub detected_lines: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment_name: Option<String>,
    pub categories: Vec<CategoryReport>,
    pub warnings: Vec<String>,
}

impl From<&EnvironmentSpec> for ValidationReport {
    fn from(spec: &EnvironmentSpec) -> Self {
        let categories = Category::ALL
            .into_iter()
            .map(|category| {
                let fields = spec.populated_fields(category);
                CategoryReport {
                    category,
                    has_data: fields.is_some(),
                    populated_fields: fields
                        .unwrap_or_default()
                        .into_iter()
                        .map(str::to_string)
                        .collect(),
                }
            })
            .collect();

        Self {
            success: spec.success,
            error: spec.error.clone(),
            detected_lines: spec.detected_lines_label(),
            environment_name: spec.environment_name.clone(),
            categories,
            warnings: spec.metadata.warnings.clone(),
        }
    }
}

mod joined_lines {
    use serde::{de, Deserialize, Deserializer, Serializer};

    use crate::catalog::CatalogLine;

    const SEPARATOR: &str = " / ";

    pub fn label(lines: &[CatalogLine]) -> String {
        lines
            .iter()
            .map(|l| l.name())
            .collect::<Vec<_>>()
            .join(SEPARATOR)
    }

    pub fn serialize<S: Serializer>(lines: &[CatalogLine], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&label(lines))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<CatalogLine>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.split('/')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| s.parse().map_err(de::Error::custom))
            .collect()
    }
}
