//! BOM tree diffing: structural matching, field comparison, aggregation.
//!
//! The engine pairs two canonical trees by sibling code, classifies every
//! path present in either tree, and computes field-level changes for
//! matched pairs. The result is a [`ChangeMap`] that is total and mutually
//! exclusive over the union of both trees' paths, with one deliberate
//! exception: descendants of an added or removed node are swallowed by the
//! ancestor entry, which alone signals that the whole subtree changed.
//!
//! # Example
//!
//! ```
//! use bom_diff::diff::{aggregate_changes, compare_documents, ChangeScope};
//! use bom_diff::model::{AssemblyInfo, BomDocument};
//!
//! let before = BomDocument {
//!     assembly: AssemblyInfo { code: "A".into(), name: "Main".into() },
//!     quantity: 1.0,
//!     ..Default::default()
//! };
//! let after = BomDocument { quantity: 2.0, ..before.clone() };
//!
//! let comparison = compare_documents(&before, &after);
//! assert!(comparison.has_changes());
//!
//! let buckets = aggregate_changes(&comparison, ChangeScope::All);
//! assert_eq!(buckets.modified.len(), 1);
//! ```

mod aggregate;
mod engine;
mod fields;
mod result;

pub use aggregate::{aggregate_changes, AggregatedChange, ChangeBuckets, ChangeScope};
pub use engine::{compare_documents, diff_trees, BomComparison};
pub use result::{ChangeKind, ChangeMap, ChangeRecord, DiffSummary, FieldChange};
