//! Schema-agnostic deep comparison of arbitrary structured values.
//!
//! Independent of the BOM model: the comparator walks two
//! [`serde_json::Value`] trees and emits a flat, path-tagged list of
//! entries plus rollup counts. It shares only the [`ChangeKind`]
//! classification with the tree differ.
//!
//! Array elements are reconciled by identity when any element on either
//! side exposes one of the configured identity keys; otherwise comparison
//! falls back to positional indexes. Recursion past the configured depth
//! truncates that branch with a non-fatal error and continues with
//! siblings, so callers always receive a (possibly partial) result instead
//! of a failure.

use crate::diff::ChangeKind;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Default prioritized identity keys used to reconcile array elements.
///
/// Order matters: the first key an element exposes wins.
pub const DEFAULT_IDENTITY_KEYS: &[&str] = &[
    "entry_id",
    "costing_sheet_item_id",
    "bom_item_id",
    "custom_section_id",
    "custom_field_id",
    "attribute_linkage_id",
    "additional_cost_linkage_id",
    "delivery_schedule_item_id",
];

const DEFAULT_MAX_DEPTH: usize = 10;

/// Options for a deep comparison.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DeepCompareOptions {
    /// Field names or dotted paths skipped entirely and never recursed into.
    ///
    /// A name matches a path exactly, as a dotted suffix (`.name`), or as a
    /// mid-path segment (`.name.`).
    pub exclude_fields: Vec<String>,
    /// Maximum recursion depth; deeper branches are truncated with a
    /// non-fatal [`CompareError::DepthExceeded`].
    pub max_depth: usize,
    /// Ordered candidate key names for array identity reconciliation.
    pub identity_keys: Vec<String>,
}

impl Default for DeepCompareOptions {
    fn default() -> Self {
        Self {
            exclude_fields: Vec::new(),
            max_depth: DEFAULT_MAX_DEPTH,
            identity_keys: DEFAULT_IDENTITY_KEYS
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }
}

/// Broad shape of a compared value, reported with each entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ValueShape {
    Null,
    Boolean,
    Number,
    String,
    Array,
    Object,
    /// Primitive on one side, container on the other
    Mixed,
    /// Array on one side, object on the other
    TypeChange,
}

fn shape_of(value: &Value) -> ValueShape {
    match value {
        Value::Null => ValueShape::Null,
        Value::Bool(_) => ValueShape::Boolean,
        Value::Number(_) => ValueShape::Number,
        Value::String(_) => ValueShape::String,
        Value::Array(_) => ValueShape::Array,
        Value::Object(_) => ValueShape::Object,
    }
}

fn is_primitive(value: &Value) -> bool {
    !matches!(value, Value::Array(_) | Value::Object(_))
}

/// One path-tagged comparison entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueChange {
    /// Dot/bracket path, e.g. `items[ID42].qty` or `specs.finish`
    pub path: String,
    pub left: Option<Value>,
    pub right: Option<Value>,
    pub kind: ChangeKind,
    pub shape: ValueShape,
    /// True when the entry summarizes a whole container rather than a scalar
    pub nested: bool,
}

/// Non-fatal problems accumulated during comparison.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[non_exhaustive]
pub enum CompareError {
    /// Recursion hit the configured depth limit; the branch was truncated.
    #[error("maximum depth reached at path: {path}")]
    DepthExceeded { path: String },
}

/// Flat change list plus rollup counts and accumulated non-fatal errors.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComparisonSummary {
    /// Total entries, unchanged included
    pub total: usize,
    /// Entries classified added, removed, or modified
    pub changed: usize,
    pub added: usize,
    pub removed: usize,
    pub modified: usize,
    pub unchanged: usize,
    pub changes: Vec<ValueChange>,
    pub errors: Vec<CompareError>,
}

impl ComparisonSummary {
    fn from_parts(changes: Vec<ValueChange>, errors: Vec<CompareError>) -> Self {
        let mut summary = Self {
            total: changes.len(),
            changes,
            errors,
            ..Self::default()
        };
        for change in &summary.changes {
            match change.kind {
                ChangeKind::Added => summary.added += 1,
                ChangeKind::Removed => summary.removed += 1,
                ChangeKind::Modified => summary.modified += 1,
                ChangeKind::Unchanged => summary.unchanged += 1,
            }
        }
        summary.changed = summary.added + summary.removed + summary.modified;
        summary
    }

    /// Whether any entry is classified as a change.
    #[must_use]
    pub fn has_changes(&self) -> bool {
        self.changed > 0
    }
}

/// Schema-agnostic deep comparator.
#[derive(Debug, Clone, Default)]
pub struct DeepComparator {
    options: DeepCompareOptions,
}

#[derive(Default)]
struct Accumulator {
    changes: Vec<ValueChange>,
    errors: Vec<CompareError>,
}

impl Accumulator {
    fn push(
        &mut self,
        path: &str,
        left: Option<&Value>,
        right: Option<&Value>,
        kind: ChangeKind,
        shape: ValueShape,
    ) {
        self.changes.push(ValueChange {
            path: path.to_string(),
            left: left.cloned(),
            right: right.cloned(),
            kind,
            shape,
            nested: matches!(shape, ValueShape::Array | ValueShape::Object),
        });
    }
}

impl DeepComparator {
    #[must_use]
    pub fn new(options: DeepCompareOptions) -> Self {
        Self { options }
    }

    /// Compare two values, rooted at an empty path.
    #[must_use]
    pub fn compare(&self, left: &Value, right: &Value) -> ComparisonSummary {
        self.compare_at(left, right, "")
    }

    /// Compare two values, prefixing every reported path with `base_path`.
    #[must_use]
    pub fn compare_at(&self, left: &Value, right: &Value, base_path: &str) -> ComparisonSummary {
        let mut out = Accumulator::default();
        self.walk(Some(left), Some(right), base_path, 0, &mut out);
        ComparisonSummary::from_parts(out.changes, out.errors)
    }

    fn walk(
        &self,
        left: Option<&Value>,
        right: Option<&Value>,
        path: &str,
        depth: usize,
        out: &mut Accumulator,
    ) {
        if depth >= self.options.max_depth {
            out.errors.push(CompareError::DepthExceeded {
                path: path.to_string(),
            });
            return;
        }

        // Null and missing are equivalent: one-sided presence classifies the
        // entry, carrying the other side's value.
        let (left_value, right_value) = match (non_null(left), non_null(right)) {
            (None, None) => {
                out.push(path, left, right, ChangeKind::Unchanged, ValueShape::Null);
                return;
            }
            (None, Some(value)) => {
                out.push(path, left, right, ChangeKind::Added, shape_of(value));
                return;
            }
            (Some(value), None) => {
                out.push(path, left, right, ChangeKind::Removed, shape_of(value));
                return;
            }
            (Some(left_value), Some(right_value)) => (left_value, right_value),
        };

        match (left_value, right_value) {
            (Value::Array(left_items), Value::Array(right_items)) => {
                self.compare_arrays(left_items, right_items, path, depth, out);
            }
            (Value::Object(left_map), Value::Object(right_map)) => {
                self.compare_objects(left_map, right_map, path, depth, out);
            }
            _ if is_primitive(left_value) && is_primitive(right_value) => {
                let kind = if left_value == right_value {
                    ChangeKind::Unchanged
                } else {
                    ChangeKind::Modified
                };
                out.push(path, left, right, kind, shape_of(left_value));
            }
            // Mismatched shape: always modified, no partial reporting.
            _ => {
                let shape = if is_primitive(left_value) != is_primitive(right_value) {
                    ValueShape::Mixed
                } else {
                    ValueShape::TypeChange
                };
                out.push(path, left, right, ChangeKind::Modified, shape);
            }
        }
    }

    fn compare_objects(
        &self,
        left: &Map<String, Value>,
        right: &Map<String, Value>,
        path: &str,
        depth: usize,
        out: &mut Accumulator,
    ) {
        for (key, left_value) in left {
            let field_path = join_path(path, key);
            if self.is_excluded(&field_path) {
                continue;
            }
            match right.get(key) {
                Some(right_value) => {
                    self.walk(
                        Some(left_value),
                        Some(right_value),
                        &field_path,
                        depth + 1,
                        out,
                    );
                }
                None => out.push(
                    &field_path,
                    Some(left_value),
                    None,
                    ChangeKind::Removed,
                    shape_of(left_value),
                ),
            }
        }
        for (key, right_value) in right {
            if left.contains_key(key) {
                continue;
            }
            let field_path = join_path(path, key);
            if self.is_excluded(&field_path) {
                continue;
            }
            out.push(
                &field_path,
                None,
                Some(right_value),
                ChangeKind::Added,
                shape_of(right_value),
            );
        }
    }

    fn compare_arrays(
        &self,
        left: &[Value],
        right: &[Value],
        path: &str,
        depth: usize,
        out: &mut Accumulator,
    ) {
        let left_by_id = self.index_by_identity(left);
        let right_by_id = self.index_by_identity(right);

        // Any recognized identity on either side switches the whole array to
        // identity reconciliation; elements lacking one are skipped there.
        if !left_by_id.is_empty() || !right_by_id.is_empty() {
            for (id, &left_item) in &left_by_id {
                let item_path = format!("{path}[{id}]");
                match right_by_id.get(id) {
                    Some(&right_item) => {
                        self.walk(Some(left_item), Some(right_item), &item_path, depth + 1, out);
                    }
                    None => out.push(
                        &item_path,
                        Some(left_item),
                        None,
                        ChangeKind::Removed,
                        ValueShape::Object,
                    ),
                }
            }
            for (id, &right_item) in &right_by_id {
                if !left_by_id.contains_key(id) {
                    let item_path = format!("{path}[{id}]");
                    out.push(
                        &item_path,
                        None,
                        Some(right_item),
                        ChangeKind::Added,
                        ValueShape::Object,
                    );
                }
            }
            return;
        }

        for index in 0..left.len().max(right.len()) {
            let item_path = format!("{path}[{index}]");
            match (left.get(index), right.get(index)) {
                (Some(left_item), Some(right_item)) => {
                    self.walk(Some(left_item), Some(right_item), &item_path, depth + 1, out);
                }
                (Some(left_item), None) => out.push(
                    &item_path,
                    Some(left_item),
                    None,
                    ChangeKind::Removed,
                    shape_of(left_item),
                ),
                (None, Some(right_item)) => out.push(
                    &item_path,
                    None,
                    Some(right_item),
                    ChangeKind::Added,
                    shape_of(right_item),
                ),
                (None, None) => {}
            }
        }
    }

    /// Index array elements by the first identity key each exposes.
    fn index_by_identity<'v>(&self, items: &'v [Value]) -> IndexMap<String, &'v Value> {
        let mut by_id = IndexMap::new();
        for item in items {
            let Some(object) = item.as_object() else {
                continue;
            };
            let id = self
                .options
                .identity_keys
                .iter()
                .find_map(|key| object.get(key).and_then(identity_string));
            if let Some(id) = id {
                by_id.insert(id, item);
            }
        }
        by_id
    }

    fn is_excluded(&self, path: &str) -> bool {
        self.options.exclude_fields.iter().any(|field| {
            path == field
                || path.ends_with(&format!(".{field}"))
                || path.contains(&format!(".{field}."))
        })
    }
}

/// Compare two values with the given options.
#[must_use]
pub fn deep_compare(
    left: &Value,
    right: &Value,
    options: DeepCompareOptions,
) -> ComparisonSummary {
    DeepComparator::new(options).compare(left, right)
}

fn non_null(value: Option<&Value>) -> Option<&Value> {
    value.filter(|value| !value.is_null())
}

fn identity_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn join_path(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{path}.{key}")
    }
}
