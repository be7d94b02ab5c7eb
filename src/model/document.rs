//! BOM document structures.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Identifying header of an assembly: the document root or a sub-assembly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssemblyInfo {
    /// Identity code, unique among siblings (e.g. `S1`)
    pub code: String,
    /// Display name
    pub name: String,
}

/// Identifying header of a raw material.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MaterialInfo {
    /// Identity code, unique among siblings (e.g. `R3`)
    pub code: String,
    /// Display name
    pub name: String,
}

/// A dynamically named custom field.
///
/// The `id` is a per-version storage identifier and may change between the
/// two compared documents; the diff engine matches fields by `name` alone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomField {
    pub id: String,
    pub name: String,
    pub value: Value,
}

/// A named group of custom fields.
///
/// Sections are a storage grouping only. The diff engine flattens all
/// sections into one name-keyed space, so a field may move to a different
/// section (or be assigned a new identifier) without being reported as
/// changed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomSection {
    pub id: String,
    pub name: String,
    pub fields: Vec<CustomField>,
}

/// One entry in a BOM: either a sub-assembly nesting further items, or a
/// raw material.
///
/// Exactly one of `assembly` and `material` is expected. An item carrying
/// neither descriptor is malformed; the tree builder degrades it to a
/// sentinel leaf instead of failing the comparison.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BomItem {
    /// Per-version entry identifier
    pub id: String,
    /// Sub-assembly descriptor, present when this item nests further items
    pub assembly: Option<AssemblyInfo>,
    /// Raw-material descriptor, present when this item is a leaf
    pub material: Option<MaterialInfo>,
    pub quantity: f64,
    pub cost_per_unit: f64,
    /// Interchangeable substitutes for this item
    pub alternates: Vec<BomItem>,
    pub custom_sections: Vec<CustomSection>,
    /// Nested items of the sub-assembly; empty for materials
    pub items: Vec<BomItem>,
}

impl BomItem {
    /// Whether this item nests a sub-assembly.
    #[must_use]
    pub fn is_assembly(&self) -> bool {
        self.assembly.is_some()
    }

    /// Whether this item is a raw material.
    #[must_use]
    pub fn is_material(&self) -> bool {
        self.assembly.is_none() && self.material.is_some()
    }
}

/// Root entity for one version of a bill of materials.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BomDocument {
    /// Per-version entry identifier
    pub id: String,
    /// Root assembly header
    pub assembly: AssemblyInfo,
    pub quantity: f64,
    pub total_cost: f64,
    pub custom_sections: Vec<CustomSection>,
    /// Ordered direct children of the root assembly
    pub items: Vec<BomItem>,
    /// Bookkeeping timestamps; never compared
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<DateTime<Utc>>,
}

impl BomDocument {
    /// Identity code of the root assembly.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.assembly.code
    }

    /// Display name of the root assembly.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.assembly.name
    }
}
