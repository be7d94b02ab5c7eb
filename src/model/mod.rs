//! Canonical BOM data model.
//!
//! One [`BomDocument`] describes a single version of a bill of materials:
//! an assembly header, document-level quantities and costs, and an ordered
//! list of [`BomItem`]s that nest recursively down to raw materials.
//!
//! Custom field values are dynamically shaped and carried as
//! [`serde_json::Value`]: a closed tagged union (null / bool / number /
//! string / array / object) whose derived equality is deep and structural.

mod document;

pub use document::{
    AssemblyInfo, BomDocument, BomItem, CustomField, CustomSection, MaterialInfo,
};
