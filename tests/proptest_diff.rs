//! Property-based tests for the structural differ.
//!
//! Trees are generated from an abstract shape with sibling codes assigned
//! by position, so sibling-code uniqueness holds by construction and the
//! same positions overlap across the two generated versions.

use bom_diff::{compare_documents, AssemblyInfo, BomDocument, BomItem, ChangeKind, MaterialInfo};
use proptest::prelude::*;
use std::collections::HashSet;

#[derive(Debug, Clone)]
enum Shape {
    Material { quantity: u32, cost: u32 },
    Assembly { children: Vec<Shape> },
}

fn arb_shape() -> impl Strategy<Value = Shape> {
    let leaf = (1u32..20, 1u32..100).prop_map(|(quantity, cost)| Shape::Material { quantity, cost });
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop::collection::vec(inner, 0..4).prop_map(|children| Shape::Assembly { children })
    })
}

fn arb_forest() -> impl Strategy<Value = Vec<Shape>> {
    prop::collection::vec(arb_shape(), 0..4)
}

fn shape_to_item(shape: &Shape, index: usize) -> BomItem {
    match shape {
        Shape::Material { quantity, cost } => BomItem {
            id: format!("m{index}"),
            material: Some(MaterialInfo {
                code: format!("M{index}"),
                name: format!("Material {index}"),
            }),
            quantity: f64::from(*quantity),
            cost_per_unit: f64::from(*cost),
            ..Default::default()
        },
        Shape::Assembly { children } => BomItem {
            id: format!("s{index}"),
            assembly: Some(AssemblyInfo {
                code: format!("S{index}"),
                name: format!("Assembly {index}"),
            }),
            quantity: 1.0,
            items: children
                .iter()
                .enumerate()
                .map(|(child_index, child)| shape_to_item(child, child_index))
                .collect(),
            ..Default::default()
        },
    }
}

fn forest_to_document(forest: &[Shape]) -> BomDocument {
    BomDocument {
        id: "doc".into(),
        assembly: AssemblyInfo {
            code: "ROOT".into(),
            name: "Root".into(),
        },
        quantity: 1.0,
        total_cost: 100.0,
        items: forest
            .iter()
            .enumerate()
            .map(|(index, shape)| shape_to_item(shape, index))
            .collect(),
        ..Default::default()
    }
}

/// All paths of both trees, for totality checks.
fn tree_paths(doc: &BomDocument) -> HashSet<String> {
    let tree = bom_diff::build_tree(doc);
    tree.flatten().iter().map(|node| node.path.clone()).collect()
}

fn has_marked_ancestor(path: &str, map: &bom_diff::ChangeMap) -> bool {
    let mut current = path;
    while let Some((ancestor, _)) = current.rsplit_once('.') {
        match map.status(ancestor) {
            ChangeKind::Added | ChangeKind::Removed => return true,
            _ => current = ancestor,
        }
    }
    false
}

proptest! {
    #[test]
    fn self_diff_is_fully_unchanged(forest in arb_forest()) {
        let doc = forest_to_document(&forest);
        let comparison = compare_documents(&doc, &doc);
        let summary = comparison.changes.summary();

        prop_assert_eq!(summary.total_changes(), 0);
        prop_assert_eq!(summary.field_changes, 0);
        prop_assert_eq!(comparison.changes.len(), comparison.left.node_count());
    }

    #[test]
    fn diff_is_idempotent(left in arb_forest(), right in arb_forest()) {
        let left_doc = forest_to_document(&left);
        let right_doc = forest_to_document(&right);

        let first = compare_documents(&left_doc, &right_doc);
        let second = compare_documents(&left_doc, &right_doc);
        prop_assert_eq!(first.changes, second.changes);
    }

    #[test]
    fn map_is_total_and_exclusive_over_path_union(left in arb_forest(), right in arb_forest()) {
        let left_doc = forest_to_document(&left);
        let right_doc = forest_to_document(&right);
        let comparison = compare_documents(&left_doc, &right_doc);
        let map = &comparison.changes;

        let mut union = tree_paths(&left_doc);
        union.extend(tree_paths(&right_doc));

        for path in &union {
            let covered_by_ancestor = has_marked_ancestor(path, map);
            prop_assert!(
                map.contains(path) != covered_by_ancestor,
                "path {} must appear exactly once: directly or via an added/removed ancestor",
                path
            );
        }

        // Every mapped path comes from one of the trees.
        for record in map {
            prop_assert!(union.contains(&record.path));
        }
    }

    #[test]
    fn added_and_removed_swallow_descendants(left in arb_forest(), right in arb_forest()) {
        let left_doc = forest_to_document(&left);
        let right_doc = forest_to_document(&right);
        let comparison = compare_documents(&left_doc, &right_doc);

        for record in &comparison.changes {
            if matches!(record.kind, ChangeKind::Added | ChangeKind::Removed) {
                let prefix = format!("{}.", record.path);
                prop_assert!(
                    !comparison.changes.iter().any(|other| other.path.starts_with(&prefix)),
                    "descendants of {} must be swallowed",
                    record.path
                );
            }
        }
    }
}
