//! BOM document loading.
//!
//! Deserializes the canonical JSON document model from a file, string, or
//! reader. Unknown fields are ignored and optional fields default, so
//! documents exported with extra bookkeeping survive loading; items missing
//! both descriptors are kept and degraded to sentinel leaves by the tree
//! builder rather than rejected here.

use crate::error::{BomDiffError, Result};
use crate::model::BomDocument;
use std::fs;
use std::path::Path;

/// Load and validate a BOM document from a JSON file.
pub fn parse_document(path: &Path) -> Result<BomDocument> {
    let content = fs::read_to_string(path).map_err(|err| BomDiffError::io(path, err))?;
    parse_document_str(&content)
}

/// Parse and validate a BOM document from a JSON string.
pub fn parse_document_str(content: &str) -> Result<BomDocument> {
    let document: BomDocument = serde_json::from_str(content)?;
    validate_document(&document)?;
    Ok(document)
}

/// Parse a BOM document from a reader without buffering the whole input.
pub fn parse_document_reader<R: std::io::Read>(reader: R) -> Result<BomDocument> {
    let document: BomDocument = serde_json::from_reader(reader)?;
    validate_document(&document)?;
    Ok(document)
}

/// The root code seeds every hierarchy path; an empty one would collapse
/// path uniqueness across the tree.
fn validate_document(document: &BomDocument) -> Result<()> {
    if document.assembly.code.is_empty() {
        return Err(BomDiffError::validation(
            "document assembly code must not be empty",
        ));
    }
    Ok(())
}
