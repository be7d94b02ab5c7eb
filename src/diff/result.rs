//! Change classification and result structures.

use crate::tree::BomNode;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Classification of a node or field across the two compared versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Added,
    Removed,
    Modified,
    Unchanged,
}

impl ChangeKind {
    /// Whether this classification represents an actual difference.
    #[must_use]
    pub fn is_change(self) -> bool {
        self != Self::Unchanged
    }
}

/// A single field-level difference between two matched nodes.
///
/// Only non-unchanged fields are ever materialized; `kind` is therefore
/// never [`ChangeKind::Unchanged`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldChange {
    /// Stable identifier, e.g. `quantity` or `custom_field.Color`
    pub field: String,
    /// Display label, e.g. `Quantity` or the custom field's name
    pub label: String,
    /// Value on the left ("before") side; `None` when the field is absent there
    pub old_value: Option<Value>,
    /// Value on the right ("after") side; `None` when the field is absent there
    pub new_value: Option<Value>,
    pub kind: ChangeKind,
}

impl FieldChange {
    /// Classify a pair of optional values by deep structural equality.
    ///
    /// Returns `None` when both sides are equal (or both absent): unchanged
    /// fields are dropped, never reported.
    pub(crate) fn classify(
        field: impl Into<String>,
        label: impl Into<String>,
        old_value: Option<Value>,
        new_value: Option<Value>,
    ) -> Option<Self> {
        let kind = match (&old_value, &new_value) {
            (None, None) => return None,
            (None, Some(_)) => ChangeKind::Added,
            (Some(_), None) => ChangeKind::Removed,
            (Some(old), Some(new)) if old == new => return None,
            _ => ChangeKind::Modified,
        };
        Some(Self {
            field: field.into(),
            label: label.into(),
            old_value,
            new_value,
            kind,
        })
    }
}

/// Outcome of comparing one hierarchy path across the two trees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeRecord {
    /// Per-version identifier of the underlying source entity
    pub id: String,
    /// Full hierarchy path, the map key
    pub path: String,
    /// Node identity code
    pub code: String,
    /// Node display name
    pub name: String,
    pub kind: ChangeKind,
    /// Field-level changes; always empty for added/removed nodes, whose
    /// whole-node classification subsumes them
    pub fields: Vec<FieldChange>,
}

impl ChangeRecord {
    /// Record covering a node present on one side only.
    pub(crate) fn whole(node: &BomNode<'_>, kind: ChangeKind) -> Self {
        Self {
            id: node.id.to_string(),
            path: node.path.clone(),
            code: node.code.to_string(),
            name: node.name.to_string(),
            kind,
            fields: Vec::new(),
        }
    }

    /// Record for a matched pair, classified by its field changes.
    pub(crate) fn matched(node: &BomNode<'_>, fields: Vec<FieldChange>) -> Self {
        let kind = if fields.is_empty() {
            ChangeKind::Unchanged
        } else {
            ChangeKind::Modified
        };
        Self {
            id: node.id.to_string(),
            path: node.path.clone(),
            code: node.code.to_string(),
            name: node.name.to_string(),
            kind,
            fields,
        }
    }
}

/// Rollup counts over a change map.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffSummary {
    pub added: usize,
    pub removed: usize,
    pub modified: usize,
    pub unchanged: usize,
    /// Total field-level changes across all modified records
    pub field_changes: usize,
}

impl DiffSummary {
    /// Count of records classified as an actual change.
    #[must_use]
    pub fn total_changes(&self) -> usize {
        self.added + self.removed + self.modified
    }
}

/// Path-keyed change records covering every path present in either tree.
///
/// Records are kept in insertion order, which is the pre-order of the
/// authoritative (left-biased) traversal. The map is total and mutually
/// exclusive over the union of both trees' paths, except that descendants
/// of an added or removed node are swallowed by the ancestor entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ChangeMap {
    records: IndexMap<String, ChangeRecord>,
}

impl ChangeMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, record: ChangeRecord) {
        self.records.insert(record.path.clone(), record);
    }

    /// Get the record at a path, if any.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&ChangeRecord> {
        self.records.get(path)
    }

    /// Whether a record exists for the path.
    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.records.contains_key(path)
    }

    /// Immediate change status of a path, `Unchanged` when absent.
    #[must_use]
    pub fn status(&self, path: &str) -> ChangeKind {
        self.records
            .get(path)
            .map_or(ChangeKind::Unchanged, |record| record.kind)
    }

    /// Whether any change exists at the path or anywhere below it.
    #[must_use]
    pub fn subtree_changed(&self, path: &str) -> bool {
        self.records.iter().any(|(key, record)| {
            record.kind.is_change()
                && (key == path
                    || (key.starts_with(path) && key[path.len()..].starts_with('.')))
        })
    }

    /// Iterate records in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &ChangeRecord> {
        self.records.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Compute rollup counts over all records.
    #[must_use]
    pub fn summary(&self) -> DiffSummary {
        let mut summary = DiffSummary::default();
        for record in self.records.values() {
            match record.kind {
                ChangeKind::Added => summary.added += 1,
                ChangeKind::Removed => summary.removed += 1,
                ChangeKind::Modified => summary.modified += 1,
                ChangeKind::Unchanged => summary.unchanged += 1,
            }
            summary.field_changes += record.fields.len();
        }
        summary
    }

    /// Whether any record is classified as a change.
    #[must_use]
    pub fn has_changes(&self) -> bool {
        self.records.values().any(|record| record.kind.is_change())
    }
}

impl<'a> IntoIterator for &'a ChangeMap {
    type Item = &'a ChangeRecord;
    type IntoIter = indexmap::map::Values<'a, String, ChangeRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.values()
    }
}
