//! Tree builder: one BOM document into a canonical node tree.

use super::{BomNode, NodeKind, NodeSource};
use crate::model::{BomDocument, BomItem};

/// Code assigned to items carrying neither descriptor.
const UNKNOWN_CODE: &str = "UNKNOWN";
/// Display name assigned to items carrying neither descriptor.
const UNKNOWN_NAME: &str = "Unknown Item";

/// Build the canonical tree for one document.
///
/// Pure over its input: the document is borrowed, never mutated. Traversal
/// is depth-first over nested item lists. An item with a sub-assembly
/// descriptor becomes an assembly node, one with a raw-material descriptor
/// becomes a material leaf, and one with neither becomes a sentinel
/// `UNKNOWN` leaf so a single malformed item never aborts the comparison.
#[must_use]
pub fn build_tree(doc: &BomDocument) -> BomNode<'_> {
    let path = doc.assembly.code.clone();
    let children = doc
        .items
        .iter()
        .map(|item| build_item(item, &path, 1))
        .collect();

    BomNode {
        id: &doc.id,
        code: &doc.assembly.code,
        name: &doc.assembly.name,
        kind: NodeKind::Root,
        depth: 0,
        path,
        source: NodeSource::Document(doc),
        children,
    }
}

fn build_item<'a>(item: &'a BomItem, parent_path: &str, depth: usize) -> BomNode<'a> {
    let (kind, code, name) = match (&item.assembly, &item.material) {
        (Some(assembly), _) => (
            NodeKind::Assembly,
            assembly.code.as_str(),
            assembly.name.as_str(),
        ),
        (None, Some(material)) => (
            NodeKind::Material,
            material.code.as_str(),
            material.name.as_str(),
        ),
        (None, None) => (NodeKind::Material, UNKNOWN_CODE, UNKNOWN_NAME),
    };

    let path = format!("{parent_path}.{code}");
    let children = item
        .items
        .iter()
        .map(|child| build_item(child, &path, depth + 1))
        .collect();

    BomNode {
        id: &item.id,
        code,
        name,
        kind,
        depth,
        path,
        source: NodeSource::Item(item),
        children,
    }
}
