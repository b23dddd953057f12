//! Document JSON.
//!
//! The wire form is a single object keyed by block id:
//!
//! ```json
//! {
//!   "root": { "kind": "Container", "data": { "style": {}, "props": {}, "childrenIds": ["block-1"] } },
//!   "block-1": { "kind": "Text", "data": { "style": {}, "props": { "text": "Hi" } } }
//! }
//! ```
//!
//! Key order is preserved in both directions.

use crate::document::{BlockRecord, Document};
use crate::EditorError;
use indexmap::IndexMap;
use missive_blocks::Registry;
use tracing::debug;

/// Pretty-printed document JSON
pub fn to_json(document: &Document) -> Result<String, EditorError> {
    Ok(serde_json::to_string_pretty(document)?)
}

pub fn to_value(document: &Document) -> Result<serde_json::Value, EditorError> {
    Ok(serde_json::to_value(document)?)
}

/// Parse document JSON, repairing a missing root.
pub fn from_json(json: &str, registry: &Registry, root_id: &str) -> Result<Document, EditorError> {
    let blocks: IndexMap<String, BlockRecord> = serde_json::from_str(json)?;
    into_document(blocks, registry, root_id)
}

pub fn from_value(
    value: serde_json::Value,
    registry: &Registry,
    root_id: &str,
) -> Result<Document, EditorError> {
    let blocks: IndexMap<String, BlockRecord> = serde_json::from_value(value)?;
    into_document(blocks, registry, root_id)
}

fn into_document(
    blocks: IndexMap<String, BlockRecord>,
    registry: &Registry,
    root_id: &str,
) -> Result<Document, EditorError> {
    let mut document = Document::from_blocks(root_id, blocks);
    document.repair_root(registry)?;
    debug!("Loaded document with {} blocks", document.len());
    Ok(document)
}
