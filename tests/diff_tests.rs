//! Integration tests for the BOM comparison engine.

use bom_diff::{
    aggregate_changes, compare_documents, AssemblyInfo, BomDocument, BomItem, ChangeKind,
    ChangeScope, CustomField, CustomSection, MaterialInfo, NodeKind,
};
use serde_json::{json, Value};

/// Helper to create a raw-material item.
fn material(code: &str, quantity: f64, cost_per_unit: f64) -> BomItem {
    BomItem {
        id: format!("id-{code}"),
        material: Some(MaterialInfo {
            code: code.into(),
            name: format!("Material {code}"),
        }),
        quantity,
        cost_per_unit,
        ..Default::default()
    }
}

/// Helper to create a sub-assembly item with nested children.
fn assembly(code: &str, items: Vec<BomItem>) -> BomItem {
    BomItem {
        id: format!("id-{code}"),
        assembly: Some(AssemblyInfo {
            code: code.into(),
            name: format!("Assembly {code}"),
        }),
        quantity: 1.0,
        items,
        ..Default::default()
    }
}

/// Helper to create a document rooted at `code`.
fn document(code: &str, quantity: f64, total_cost: f64, items: Vec<BomItem>) -> BomDocument {
    BomDocument {
        id: format!("doc-{code}"),
        assembly: AssemblyInfo {
            code: code.into(),
            name: format!("Main {code}"),
        },
        quantity,
        total_cost,
        custom_sections: Vec::new(),
        items,
        ..Default::default()
    }
}

fn section(name: &str, fields: Vec<(&str, Value)>) -> CustomSection {
    CustomSection {
        id: format!("section-{name}"),
        name: name.into(),
        fields: fields
            .into_iter()
            .map(|(field_name, value)| CustomField {
                id: format!("field-{name}-{field_name}"),
                name: field_name.into(),
                value,
            })
            .collect(),
    }
}

#[test]
fn test_identical_single_leaf_trees_are_fully_unchanged() {
    // Example 1: left root A with leaf A.R1 qty 5; right identical.
    let left = document("A", 1.0, 10.0, vec![material("R1", 5.0, 2.0)]);
    let right = left.clone();

    let comparison = compare_documents(&left, &right);
    let map = &comparison.changes;

    assert_eq!(map.len(), 2);
    assert_eq!(map.status("A"), ChangeKind::Unchanged);
    assert_eq!(map.status("A.R1"), ChangeKind::Unchanged);
    assert!(!comparison.has_changes());
}

#[test]
fn test_added_leaf_carries_no_field_changes() {
    // Example 2: right adds leaf A.R2 absent from left.
    let left = document("A", 1.0, 10.0, vec![material("R1", 5.0, 2.0)]);
    let right = document(
        "A",
        1.0,
        10.0,
        vec![material("R1", 5.0, 2.0), material("R2", 3.0, 1.0)],
    );

    let comparison = compare_documents(&left, &right);
    let record = comparison.changes.get("A.R2").expect("A.R2 must be mapped");

    assert_eq!(record.kind, ChangeKind::Added);
    assert!(record.fields.is_empty());
}

#[test]
fn test_quantity_change_is_one_modified_field() {
    // Example 3: left A.R1 qty 5, right A.R1 qty 8.
    let left = document("A", 1.0, 10.0, vec![material("R1", 5.0, 2.0)]);
    let right = document("A", 1.0, 10.0, vec![material("R1", 8.0, 2.0)]);

    let comparison = compare_documents(&left, &right);
    let record = comparison.changes.get("A.R1").expect("A.R1 must be mapped");

    assert_eq!(record.kind, ChangeKind::Modified);
    assert_eq!(record.fields.len(), 1);
    assert_eq!(record.fields[0].field, "quantity");
    assert_eq!(record.fields[0].old_value, Some(json!(5.0)));
    assert_eq!(record.fields[0].new_value, Some(json!(8.0)));
    assert_eq!(record.fields[0].kind, ChangeKind::Modified);
}

#[test]
fn test_removed_subtree_is_swallowed_by_ancestor() {
    // Example 4: left has assembly A.S1 containing leaf A.S1.R3; right
    // removes S1 entirely.
    let left = document(
        "A",
        1.0,
        10.0,
        vec![assembly("S1", vec![material("R3", 2.0, 4.0)])],
    );
    let right = document("A", 1.0, 10.0, vec![]);

    let comparison = compare_documents(&left, &right);
    let map = &comparison.changes;

    assert_eq!(map.status("A.S1"), ChangeKind::Removed);
    assert!(
        !map.contains("A.S1.R3"),
        "descendants of a removed node must not be materialized"
    );
}

#[test]
fn test_monotonicity_of_added_and_removed() {
    let deep_assembly = assembly(
        "S1",
        vec![
            material("R1", 1.0, 1.0),
            assembly("S2", vec![material("R2", 1.0, 1.0)]),
        ],
    );
    let left = document("A", 1.0, 0.0, vec![deep_assembly.clone()]);
    let right = document("A", 1.0, 0.0, vec![assembly("S9", vec![deep_assembly])]);

    let comparison = compare_documents(&left, &right);
    for record in &comparison.changes {
        if record.kind == ChangeKind::Removed || record.kind == ChangeKind::Added {
            let prefix = format!("{}.", record.path);
            assert!(
                !comparison
                    .changes
                    .iter()
                    .any(|other| other.path.starts_with(&prefix)),
                "no descendant of {} may appear in the map",
                record.path
            );
        }
    }
    assert_eq!(comparison.changes.status("A.S1"), ChangeKind::Removed);
    assert_eq!(comparison.changes.status("A.S9"), ChangeKind::Added);
}

#[test]
fn test_self_diff_round_trip_has_no_changes() {
    let doc = document(
        "A",
        2.0,
        500.0,
        vec![
            assembly(
                "S1",
                vec![material("R1", 5.0, 2.0), material("R2", 1.0, 9.0)],
            ),
            assembly("S2", vec![assembly("S3", vec![material("R3", 4.0, 0.5)])]),
            material("R4", 10.0, 0.1),
        ],
    );

    let comparison = compare_documents(&doc, &doc);
    let summary = comparison.changes.summary();

    assert_eq!(summary.added, 0);
    assert_eq!(summary.removed, 0);
    assert_eq!(summary.modified, 0);
    assert_eq!(summary.field_changes, 0);
    assert_eq!(summary.unchanged, comparison.changes.len());
    // Totality: every path of the (identical) trees is mapped.
    assert_eq!(comparison.changes.len(), comparison.left.node_count());
}

#[test]
fn test_diffing_twice_is_idempotent() {
    let left = document(
        "A",
        1.0,
        10.0,
        vec![assembly("S1", vec![material("R1", 5.0, 2.0)])],
    );
    let right = document(
        "A",
        1.0,
        12.0,
        vec![assembly("S1", vec![material("R1", 6.0, 2.0)]), material("R9", 1.0, 1.0)],
    );

    let first = compare_documents(&left, &right);
    let second = compare_documents(&left, &right);

    assert_eq!(first.changes, second.changes);
}

#[test]
fn test_custom_field_moving_sections_is_unchanged() {
    let mut left = document("A", 1.0, 10.0, vec![material("R1", 5.0, 2.0)]);
    let mut right = left.clone();
    left.items[0].custom_sections = vec![
        section("General", vec![("Color", json!("red"))]),
        section("Procurement", vec![("Lead Time", json!(14))]),
    ];
    // Same names and values, different sections and identifiers.
    right.items[0].custom_sections = vec![section(
        "Everything",
        vec![("Lead Time", json!(14)), ("Color", json!("red"))],
    )];

    let comparison = compare_documents(&left, &right);
    assert_eq!(comparison.changes.status("A.R1"), ChangeKind::Unchanged);
}

#[test]
fn test_custom_field_added_and_value_modified() {
    let mut left = document("A", 1.0, 10.0, vec![material("R1", 5.0, 2.0)]);
    let mut right = left.clone();
    left.items[0].custom_sections = vec![section("General", vec![("Grade", json!("B"))])];
    right.items[0].custom_sections = vec![section(
        "General",
        vec![("Grade", json!("A")), ("Finish", json!("matte"))],
    )];

    let comparison = compare_documents(&left, &right);
    let record = comparison.changes.get("A.R1").expect("record");
    assert_eq!(record.kind, ChangeKind::Modified);

    let grade = record
        .fields
        .iter()
        .find(|field| field.field == "custom_field.Grade")
        .expect("Grade change");
    assert_eq!(grade.kind, ChangeKind::Modified);

    let finish = record
        .fields
        .iter()
        .find(|field| field.field == "custom_field.Finish")
        .expect("Finish change");
    assert_eq!(finish.kind, ChangeKind::Added);
    assert_eq!(finish.old_value, None);
    assert_eq!(finish.new_value, Some(json!("matte")));
}

#[test]
fn test_root_fixed_fields_are_compared() {
    let left = document("A", 1.0, 100.0, vec![]);
    let right = document("A", 2.0, 150.0, vec![]);

    let comparison = compare_documents(&left, &right);
    let record = comparison.changes.get("A").expect("root record");

    assert_eq!(record.kind, ChangeKind::Modified);
    let fields: Vec<&str> = record.fields.iter().map(|f| f.field.as_str()).collect();
    assert_eq!(fields, vec!["quantity", "total_cost"]);
}

#[test]
fn test_aggregation_scopes_and_ancestor_paths() {
    let left = document(
        "A",
        1.0,
        10.0,
        vec![assembly("S1", vec![material("R1", 5.0, 2.0)])],
    );
    let right = document(
        "A",
        1.0,
        10.0,
        vec![
            assembly("S1", vec![material("R1", 8.0, 2.0)]),
            assembly("S2", vec![material("R9", 1.0, 1.0)]),
        ],
    );

    let comparison = compare_documents(&left, &right);

    let materials = aggregate_changes(&comparison, ChangeScope::Materials);
    assert_eq!(materials.added.len(), 0, "R9 is inside the added S2 subtree");
    assert_eq!(materials.modified.len(), 1);
    let modified = &materials.modified[0];
    assert_eq!(modified.path, "A.S1.R1");
    assert_eq!(modified.ancestor_path, "A > S1");
    assert_eq!(modified.node_kind, NodeKind::Material);
    assert_eq!(modified.field_count, 1);

    let assemblies = aggregate_changes(&comparison, ChangeScope::Assemblies);
    assert_eq!(assemblies.added.len(), 1);
    assert_eq!(assemblies.added[0].code, "S2");
    // Kind of an added node resolves against the right tree.
    assert_eq!(assemblies.added[0].node_kind, NodeKind::Assembly);
    assert!(assemblies.modified.is_empty());

    let all = aggregate_changes(&comparison, ChangeScope::All);
    assert_eq!(all.total(), 2);
}

#[test]
fn test_aggregation_skips_unchanged_records() {
    let doc = document("A", 1.0, 10.0, vec![material("R1", 5.0, 2.0)]);
    let comparison = compare_documents(&doc, &doc);

    let all = aggregate_changes(&comparison, ChangeScope::All);
    assert!(all.is_empty());
}

#[test]
fn test_malformed_item_compares_as_sentinel_leaf() {
    let orphan = BomItem {
        id: "orphan".into(),
        quantity: 1.0,
        ..Default::default()
    };
    let mut changed_orphan = orphan.clone();
    changed_orphan.quantity = 3.0;

    let left = document("A", 1.0, 10.0, vec![orphan]);
    let right = document("A", 1.0, 10.0, vec![changed_orphan]);

    let comparison = compare_documents(&left, &right);
    let record = comparison.changes.get("A.UNKNOWN").expect("sentinel path");
    assert_eq!(record.kind, ChangeKind::Modified);
    assert_eq!(record.fields[0].field, "quantity");

    let buckets = aggregate_changes(&comparison, ChangeScope::Materials);
    assert_eq!(buckets.modified.len(), 1, "sentinel counts as a material");
}

#[test]
fn test_alternates_count_change_survives_to_record() {
    let mut left = document("A", 1.0, 10.0, vec![material("R1", 5.0, 2.0)]);
    let mut right = left.clone();
    right.items[0].alternates = vec![material("ALT1", 1.0, 1.0)];
    left.items[0].alternates = Vec::new();

    let comparison = compare_documents(&left, &right);
    let record = comparison.changes.get("A.R1").expect("record");
    assert_eq!(record.fields.len(), 1);
    assert_eq!(record.fields[0].field, "alternates_count");
}

#[test]
fn test_subtree_change_queries() {
    let left = document(
        "A",
        1.0,
        10.0,
        vec![assembly("S1", vec![material("R1", 5.0, 2.0)]), material("R2", 1.0, 1.0)],
    );
    let right = document(
        "A",
        1.0,
        10.0,
        vec![assembly("S1", vec![material("R1", 6.0, 2.0)]), material("R2", 1.0, 1.0)],
    );

    let comparison = compare_documents(&left, &right);
    assert!(comparison.changes.subtree_changed("A.S1"));
    assert!(comparison.changes.subtree_changed("A"));
    assert!(!comparison.changes.subtree_changed("A.R2"));
}
