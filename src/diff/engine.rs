//! Structural differ: recursive paired traversal of two BOM trees.

use super::fields::field_changes;
use super::result::{ChangeKind, ChangeMap, ChangeRecord};
use crate::model::BomDocument;
use crate::tree::{build_tree, BomNode};
use indexmap::IndexMap;

/// A completed comparison of two BOM documents: both canonical trees plus
/// the path-keyed change map.
///
/// The trees borrow the input documents; the map is built once and is
/// immutable thereafter. Aggregated views are derived from this without
/// mutating it.
#[derive(Debug)]
pub struct BomComparison<'a> {
    /// Canonical tree of the "before" document
    pub left: BomNode<'a>,
    /// Canonical tree of the "after" document
    pub right: BomNode<'a>,
    pub changes: ChangeMap,
}

impl BomComparison<'_> {
    /// Whether any node was added, removed, or modified.
    #[must_use]
    pub fn has_changes(&self) -> bool {
        self.changes.has_changes()
    }
}

/// Build both canonical trees and diff them in one step.
#[must_use]
pub fn compare_documents<'a>(
    left: &'a BomDocument,
    right: &'a BomDocument,
) -> BomComparison<'a> {
    let left = build_tree(left);
    let right = build_tree(right);
    let changes = diff_trees(&left, &right);
    BomComparison {
        left,
        right,
        changes,
    }
}

/// Compare two canonical trees into a change map covering every path
/// present in either tree.
#[must_use]
pub fn diff_trees(left: &BomNode<'_>, right: &BomNode<'_>) -> ChangeMap {
    let mut map = ChangeMap::new();
    pair_nodes(Some(left), Some(right), &mut map);
    map
}

/// Recursive matcher over one pair of (possibly absent) nodes.
///
/// A node present on one side only marks its whole subtree: the early
/// return guarantees no descendant of an added or removed node is ever
/// materialized separately.
fn pair_nodes(left: Option<&BomNode<'_>>, right: Option<&BomNode<'_>>, map: &mut ChangeMap) {
    let (left, right) = match (left, right) {
        (Some(left), None) => {
            map.insert(ChangeRecord::whole(left, ChangeKind::Removed));
            return;
        }
        (None, Some(right)) => {
            map.insert(ChangeRecord::whole(right, ChangeKind::Added));
            return;
        }
        (Some(left), Some(right)) => (left, right),
        (None, None) => return,
    };

    let fields = field_changes(left, right);
    map.insert(ChangeRecord::matched(left, fields));

    // Pair children by code; sibling order is irrelevant to matching.
    let left_children = children_by_code(left);
    let right_children = children_by_code(right);

    for (code, &left_child) in &left_children {
        pair_nodes(Some(left_child), right_children.get(code).copied(), map);
    }
    for (code, &right_child) in &right_children {
        if !left_children.contains_key(code) {
            pair_nodes(None, Some(right_child), map);
        }
    }
}

/// Sibling lookup by code. Duplicate codes violate the sibling-uniqueness
/// precondition; the last occurrence wins, with a warning.
fn children_by_code<'n, 'a>(node: &'n BomNode<'a>) -> IndexMap<&'a str, &'n BomNode<'a>> {
    let mut by_code = IndexMap::with_capacity(node.children.len());
    for child in &node.children {
        if by_code.insert(child.code, child).is_some() {
            tracing::warn!(
                parent = %node.path,
                code = child.code,
                "duplicate sibling code, keeping the last occurrence"
            );
        }
    }
    by_code
}
