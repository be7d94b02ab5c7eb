//! Scope-filtered aggregation of a change map for summaries and listings.

use super::engine::BomComparison;
use super::result::{ChangeKind, ChangeRecord, FieldChange};
use crate::tree::{BomNode, NodeKind};
use serde::{Deserialize, Serialize};

/// Separator used when rendering a record's ancestor path for display.
const ANCESTOR_SEPARATOR: &str = " > ";

/// Which node kinds an aggregation keeps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChangeScope {
    /// Raw-material leaves only
    Materials,
    /// Root and assembly nodes only
    Assemblies,
    /// Every node kind
    #[default]
    All,
}

impl ChangeScope {
    fn keeps(self, kind: NodeKind) -> bool {
        match self {
            Self::Materials => kind.is_material(),
            Self::Assemblies => kind.is_assembly(),
            Self::All => true,
        }
    }
}

/// A change record denormalized for listing: resolved node kind plus a
/// display-ready ancestor path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedChange {
    /// Per-version identifier of the underlying source entity
    pub id: String,
    /// Full hierarchy path, e.g. `A.S1.R3`
    pub path: String,
    pub code: String,
    pub name: String,
    /// All path segments but the last, joined for display (e.g. `A > S1`);
    /// empty for the root
    pub ancestor_path: String,
    pub kind: ChangeKind,
    /// Number of field-level changes
    pub field_count: usize,
    pub fields: Vec<FieldChange>,
    pub node_kind: NodeKind,
}

/// The three scoped buckets consumers list and count.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChangeBuckets {
    pub added: Vec<AggregatedChange>,
    pub removed: Vec<AggregatedChange>,
    pub modified: Vec<AggregatedChange>,
}

impl ChangeBuckets {
    /// Total records across all three buckets.
    #[must_use]
    pub fn total(&self) -> usize {
        self.added.len() + self.removed.len() + self.modified.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// Project the change map into scoped added/removed/modified buckets.
///
/// Unchanged records are skipped entirely. Output order within each bucket
/// is the change map's insertion order; this is a read-only projection that
/// mutates neither the map nor the trees.
#[must_use]
pub fn aggregate_changes(comparison: &BomComparison<'_>, scope: ChangeScope) -> ChangeBuckets {
    let mut buckets = ChangeBuckets::default();

    for record in &comparison.changes {
        if !record.kind.is_change() {
            continue;
        }

        let node_kind = resolve_kind(record, &comparison.left, &comparison.right);
        if !scope.keeps(node_kind) {
            continue;
        }

        let aggregated = AggregatedChange {
            id: record.id.clone(),
            path: record.path.clone(),
            code: record.code.clone(),
            name: record.name.clone(),
            ancestor_path: ancestor_path(&record.path),
            kind: record.kind,
            field_count: record.fields.len(),
            fields: record.fields.clone(),
            node_kind,
        };

        match record.kind {
            ChangeKind::Added => buckets.added.push(aggregated),
            ChangeKind::Removed => buckets.removed.push(aggregated),
            _ => buckets.modified.push(aggregated),
        }
    }

    buckets
}

/// Resolve a record's node kind from whichever tree contains its path:
/// the right tree for added nodes, the left for removed, either for
/// modified (the pairing makes them structurally identical there).
fn resolve_kind(record: &ChangeRecord, left: &BomNode<'_>, right: &BomNode<'_>) -> NodeKind {
    let node = match record.kind {
        ChangeKind::Added => right.find_path(&record.path),
        ChangeKind::Removed => left.find_path(&record.path),
        _ => left
            .find_path(&record.path)
            .or_else(|| right.find_path(&record.path)),
    };
    node.map_or(NodeKind::Material, |node| node.kind)
}

fn ancestor_path(path: &str) -> String {
    match path.rsplit_once('.') {
        Some((ancestors, _)) => ancestors.replace('.', ANCESTOR_SEPARATOR),
        None => String::new(),
    }
}
