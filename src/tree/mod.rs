//! Canonical BOM tree construction and queries.
//!
//! [`build_tree`] converts one [`BomDocument`](crate::model::BomDocument)
//! into a tree of [`BomNode`]s with stable dot-delimited hierarchy paths
//! (`A`, `A.S1`, `A.S1.R3`). The path is the unique key within one tree and
//! the join key when two trees are diffed.
//!
//! Nodes own their children exclusively (a tree, never a graph) and borrow
//! the document they were built from for field extraction; trees are rebuilt
//! fresh from the immutable inputs on every comparison.

mod builder;

pub use builder::build_tree;

use crate::model::{BomDocument, BomItem};
use serde::{Deserialize, Serialize};

/// Classification of a node within the BOM hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeKind {
    /// The document root assembly
    Root,
    /// A nested sub-assembly
    Assembly,
    /// A raw-material leaf
    Material,
}

impl NodeKind {
    /// Whether this node is an assembly-level node (root included).
    #[must_use]
    pub fn is_assembly(self) -> bool {
        matches!(self, Self::Root | Self::Assembly)
    }

    /// Whether this node is a raw-material leaf.
    #[must_use]
    pub fn is_material(self) -> bool {
        matches!(self, Self::Material)
    }
}

/// Borrowed view of the source entity a tree node was built from.
#[derive(Debug, Clone, Copy)]
pub enum NodeSource<'a> {
    /// The document root
    Document(&'a BomDocument),
    /// A nested item (assembly, material, or malformed sentinel)
    Item(&'a BomItem),
}

/// One node of a canonical BOM tree.
#[derive(Debug)]
pub struct BomNode<'a> {
    /// Per-version entry identifier of the underlying source
    pub id: &'a str,
    /// Identity code, unique among siblings
    pub code: &'a str,
    /// Display name
    pub name: &'a str,
    pub kind: NodeKind,
    /// Hierarchy depth; 0 for the root
    pub depth: usize,
    /// Dot-delimited concatenation of ancestor codes, e.g. `A.S1.R3`
    pub path: String,
    /// The underlying source entity, for field extraction
    pub source: NodeSource<'a>,
    /// Ordered, exclusively owned children
    pub children: Vec<BomNode<'a>>,
}

impl<'a> BomNode<'a> {
    /// Find a node by its full hierarchy path.
    #[must_use]
    pub fn find_path(&self, path: &str) -> Option<&BomNode<'a>> {
        if self.path == path {
            return Some(self);
        }
        // Paths are prefix-structured; skip subtrees that cannot contain the target.
        if !path.starts_with(&self.path) {
            return None;
        }
        self.children.iter().find_map(|child| child.find_path(path))
    }

    /// Find the first node carrying the given code, searching pre-order.
    #[must_use]
    pub fn find_code(&self, code: &str) -> Option<&BomNode<'a>> {
        if self.code == code {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find_code(code))
    }

    /// Flatten the subtree rooted here into a pre-order list.
    #[must_use]
    pub fn flatten(&self) -> Vec<&BomNode<'a>> {
        let mut out = Vec::new();
        self.collect(&mut out);
        out
    }

    fn collect<'n>(&'n self, out: &mut Vec<&'n BomNode<'a>>) {
        out.push(self);
        for child in &self.children {
            child.collect(out);
        }
    }

    /// Total number of nodes in the subtree rooted here.
    #[must_use]
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(BomNode::node_count).sum::<usize>()
    }
}
