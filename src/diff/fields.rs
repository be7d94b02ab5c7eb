//! Field-level comparison of two matched nodes.
//!
//! Deliberately narrower than the generic comparator in [`crate::compare`]:
//! it knows which fields matter for display. Per-version identifiers,
//! section membership, measurement units, selection flags, and delivery
//! schedules are bookkeeping and never compared.

use super::result::{ChangeKind, FieldChange};
use crate::model::{BomDocument, BomItem, CustomSection};
use crate::tree::{BomNode, NodeSource};
use indexmap::IndexMap;
use serde_json::{json, Value};

/// Compare the fixed and dynamic fields of two matched nodes.
///
/// Returns only non-unchanged entries: fixed fields first, then dynamic
/// custom fields in first-seen (left, then right) order.
pub(crate) fn field_changes(left: &BomNode<'_>, right: &BomNode<'_>) -> Vec<FieldChange> {
    match (left.source, right.source) {
        (NodeSource::Document(old), NodeSource::Document(new)) => document_changes(old, new),
        (NodeSource::Item(old), NodeSource::Item(new)) => item_changes(old, new),
        // Roots only ever pair with roots; a mixed pairing has no comparable fields.
        _ => Vec::new(),
    }
}

/// Root-level fixed fields: quantity and total cost.
fn document_changes(old: &BomDocument, new: &BomDocument) -> Vec<FieldChange> {
    let mut changes = Vec::new();

    push_scalar(&mut changes, "quantity", "Quantity", old.quantity, new.quantity);
    push_scalar(
        &mut changes,
        "total_cost",
        "Total Cost",
        old.total_cost,
        new.total_cost,
    );
    custom_field_changes(&old.custom_sections, &new.custom_sections, &mut changes);

    changes
}

/// Item-level fixed fields: quantity, cost-per-unit, and the derived
/// alternates count, which is emitted only when the counts differ.
fn item_changes(old: &BomItem, new: &BomItem) -> Vec<FieldChange> {
    let mut changes = Vec::new();

    push_scalar(&mut changes, "quantity", "Quantity", old.quantity, new.quantity);
    push_scalar(
        &mut changes,
        "cost_per_unit",
        "Cost Per Unit",
        old.cost_per_unit,
        new.cost_per_unit,
    );
    custom_field_changes(&old.custom_sections, &new.custom_sections, &mut changes);

    if old.alternates.len() != new.alternates.len() {
        changes.push(FieldChange {
            field: "alternates_count".into(),
            label: "Alternates Count".into(),
            old_value: Some(json!(old.alternates.len())),
            new_value: Some(json!(new.alternates.len())),
            kind: ChangeKind::Modified,
        });
    }

    changes
}

fn push_scalar(changes: &mut Vec<FieldChange>, field: &str, label: &str, old: f64, new: f64) {
    if let Some(change) = FieldChange::classify(field, label, Some(json!(old)), Some(json!(new))) {
        changes.push(change);
    }
}

/// Flatten all sections into one name-keyed map.
///
/// A field name appearing in more than one section resolves to the last
/// occurrence, mirroring the lookup used for sibling codes.
fn named_fields(sections: &[CustomSection]) -> IndexMap<&str, &Value> {
    let mut map = IndexMap::new();
    for section in sections {
        for field in &section.fields {
            map.insert(field.name.as_str(), &field.value);
        }
    }
    map
}

/// Compare dynamic custom fields by name, independent of section or
/// identifier, using deep structural equality on the values.
fn custom_field_changes(
    old_sections: &[CustomSection],
    new_sections: &[CustomSection],
    changes: &mut Vec<FieldChange>,
) {
    let old_fields = named_fields(old_sections);
    let new_fields = named_fields(new_sections);

    let names = old_fields
        .keys()
        .chain(new_fields.keys().filter(|name| !old_fields.contains_key(*name)));

    for name in names {
        let old_value = old_fields.get(name).map(|value| (*value).clone());
        let new_value = new_fields.get(name).map(|value| (*value).clone());
        if let Some(change) =
            FieldChange::classify(format!("custom_field.{name}"), *name, old_value, new_value)
        {
            changes.push(change);
        }
    }
}
