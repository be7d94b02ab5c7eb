//! Command handlers for the bom-diff binary.
//!
//! The binary is a thin consumer of the engine: it loads two documents,
//! runs the comparison, and serializes the engine's outputs. No diff
//! semantics live here.

use crate::compare::{DeepCompareOptions, DeepComparator};
use crate::diff::{aggregate_changes, compare_documents, ChangeBuckets, ChangeScope, DiffSummary};
use crate::parsers::parse_document;
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Exit code when the compared inputs are identical.
pub const EXIT_UNCHANGED: i32 = 0;
/// Exit code when changes were detected.
pub const EXIT_CHANGED: i32 = 1;

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Machine-readable JSON on stdout
    Json,
    /// Human-readable counts and listings
    Summary,
}

/// Options for the `diff` command.
#[derive(Debug, Clone)]
pub struct DiffOptions {
    pub left: PathBuf,
    pub right: PathBuf,
    pub scope: ChangeScope,
    pub format: OutputFormat,
}

#[derive(Serialize)]
struct DiffReport<'a> {
    summary: DiffSummary,
    changes: &'a crate::diff::ChangeMap,
    buckets: &'a ChangeBuckets,
}

/// Run the diff command, returning the desired exit code.
pub fn run_diff(options: &DiffOptions) -> Result<i32> {
    let left = parse_document(&options.left)
        .with_context(|| format!("loading left document {}", options.left.display()))?;
    let right = parse_document(&options.right)
        .with_context(|| format!("loading right document {}", options.right.display()))?;

    tracing::debug!(
        left = %left.code(),
        right = %right.code(),
        "comparing documents"
    );

    let comparison = compare_documents(&left, &right);
    let buckets = aggregate_changes(&comparison, options.scope);
    let summary = comparison.changes.summary();

    match options.format {
        OutputFormat::Json => {
            let report = DiffReport {
                summary,
                changes: &comparison.changes,
                buckets: &buckets,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Summary => print_summary(&summary, &buckets),
    }

    Ok(if summary.total_changes() > 0 {
        EXIT_CHANGED
    } else {
        EXIT_UNCHANGED
    })
}

fn print_summary(summary: &DiffSummary, buckets: &ChangeBuckets) {
    println!(
        "{} added, {} removed, {} modified ({} field changes)",
        summary.added, summary.removed, summary.modified, summary.field_changes
    );
    for (heading, bucket) in [
        ("Added", &buckets.added),
        ("Removed", &buckets.removed),
        ("Modified", &buckets.modified),
    ] {
        if bucket.is_empty() {
            continue;
        }
        println!("\n{heading}:");
        for change in bucket {
            let location = if change.ancestor_path.is_empty() {
                String::new()
            } else {
                format!("  (in {})", change.ancestor_path)
            };
            println!("  {} {}{location}", change.code, change.name);
            for field in &change.fields {
                println!(
                    "    {}: {} -> {}",
                    field.label,
                    render_value(field.old_value.as_ref()),
                    render_value(field.new_value.as_ref()),
                );
            }
        }
    }
}

fn render_value(value: Option<&serde_json::Value>) -> String {
    match value {
        Some(value) => value.to_string(),
        None => "(absent)".to_string(),
    }
}

/// Options for the `deep` command.
#[derive(Debug, Clone)]
pub struct DeepOptions {
    pub left: PathBuf,
    pub right: PathBuf,
    pub exclude: Vec<String>,
    pub max_depth: usize,
    pub show_unchanged: bool,
}

/// Run the deep (schema-agnostic) comparison command.
pub fn run_deep(options: &DeepOptions) -> Result<i32> {
    let left = read_json(&options.left)?;
    let right = read_json(&options.right)?;

    let comparator = DeepComparator::new(DeepCompareOptions {
        exclude_fields: options.exclude.clone(),
        max_depth: options.max_depth,
        ..Default::default()
    });
    let mut summary = comparator.compare(&left, &right);

    if !options.show_unchanged {
        summary
            .changes
            .retain(|change| change.kind.is_change());
    }

    println!("{}", serde_json::to_string_pretty(&summary)?);

    for error in &summary.errors {
        tracing::warn!("{error}");
    }

    Ok(if summary.has_changes() {
        EXIT_CHANGED
    } else {
        EXIT_UNCHANGED
    })
}

fn read_json(path: &Path) -> Result<serde_json::Value> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("parsing {}", path.display()))
}
