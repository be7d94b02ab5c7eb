//! **A library for comparing versions of hierarchical bills of materials.**
//!
//! `bom-diff` takes two versions of a BOM (an assembly composed of nested
//! sub-assemblies down to raw materials) and reports exactly what changed,
//! at any level of the hierarchy. It powers a command-line tool and can be
//! embedded as a library by presentation layers that render trees, summary
//! counts, or change listings.
//!
//! ## Core Concepts & Modules
//!
//! - **[`model`]**: The canonical document model, [`BomDocument`]: an
//!   assembly header, document-level quantity and cost, dynamically named
//!   custom fields, and an ordered list of nested items.
//! - **[`tree`]**: [`build_tree`] converts one document into a tree of
//!   [`BomNode`]s with stable dot-delimited hierarchy paths (`A.S1.R3`),
//!   the join key between two versions.
//! - **[`diff`]**: [`compare_documents`] pairs two trees by sibling code,
//!   classifies every path as added/removed/modified/unchanged, computes
//!   field-level changes for matched pairs, and
//!   [`aggregate_changes`] projects the result into scoped buckets.
//! - **[`compare`]**: a standalone, schema-agnostic deep comparator over
//!   arbitrary JSON values, with identity-based array reconciliation.
//! - **[`parsers`]**: JSON document loading.
//!
//! ## Getting Started: Diffing Two Versions
//!
//! ```no_run
//! use std::path::Path;
//! use bom_diff::{aggregate_changes, compare_documents, parse_document, ChangeScope};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let before = parse_document(Path::new("before.json"))?;
//!     let after = parse_document(Path::new("after.json"))?;
//!
//!     let comparison = compare_documents(&before, &after);
//!     let summary = comparison.changes.summary();
//!     println!(
//!         "{} added, {} removed, {} modified",
//!         summary.added, summary.removed, summary.modified
//!     );
//!
//!     let buckets = aggregate_changes(&comparison, ChangeScope::Materials);
//!     for change in &buckets.modified {
//!         println!("~ {} ({})", change.name, change.ancestor_path);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Schema-Agnostic Comparison
//!
//! When the two inputs are arbitrary structured exports rather than BOM
//! documents, use the generic comparator:
//!
//! ```
//! use bom_diff::{deep_compare, DeepCompareOptions};
//! use serde_json::json;
//!
//! let summary = deep_compare(
//!     &json!([{ "entry_id": "x", "v": 1 }]),
//!     &json!([{ "entry_id": "x", "v": 2 }]),
//!     DeepCompareOptions::default(),
//! );
//! assert_eq!(summary.modified, 1);
//! ```

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
#![allow(
    // Quantities and costs are f64 end to end; bounded in practice
    clippy::cast_precision_loss,
    // # Errors / # Panics sections are aspirational
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    // Variable names like `old`/`new` are clear in context
    clippy::similar_names
)]

pub mod cli;
pub mod compare;
pub mod diff;
pub mod error;
pub mod model;
pub mod parsers;
pub mod tree;

// Re-export main types for convenience
pub use compare::{
    deep_compare, ComparisonSummary, CompareError, DeepCompareOptions, DeepComparator,
    ValueChange, ValueShape,
};
pub use diff::{
    aggregate_changes, compare_documents, diff_trees, AggregatedChange, BomComparison,
    ChangeBuckets, ChangeKind, ChangeMap, ChangeRecord, ChangeScope, DiffSummary, FieldChange,
};
pub use error::{BomDiffError, Result};
pub use model::{AssemblyInfo, BomDocument, BomItem, CustomField, CustomSection, MaterialInfo};
pub use parsers::{parse_document, parse_document_reader, parse_document_str};
pub use tree::{build_tree, BomNode, NodeKind, NodeSource};
