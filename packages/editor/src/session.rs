//! # Edit Session
//!
//! One editor instance's view of a document: the shared kind registry, the
//! document itself, the selected block, and a version counter bumped by every
//! mutation that changed the document.

use crate::document::Document;
use crate::mutations::{Mutation, MutationResult, Placement};
use crate::pipeline::{render_document_editable, render_document_static};
use crate::serialization;
use crate::EditorError;
use missive_blocks::{DataOverrides, EditorField, Registry};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info};

/// Editor configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorOptions {
    /// Key of the root container in the document map
    pub root_id: String,

    pub project_title: String,

    pub email_subject: String,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            root_id: crate::document::DEFAULT_ROOT_ID.to_string(),
            project_title: "Email Template".to_string(),
            email_subject: String::new(),
        }
    }
}

/// Single-owner editing session
pub struct EditSession {
    registry: Arc<Registry>,
    options: EditorOptions,
    document: Document,
    selected: Option<String>,

    /// Incremented by each mutation that changed the document
    pub version: u64,
}

impl EditSession {
    /// Create a session with an empty document.
    ///
    /// Fails with [`EditorError::MissingContainer`] when the registry has no
    /// container kind to host the root.
    pub fn new(registry: Arc<Registry>, options: EditorOptions) -> Result<Self, EditorError> {
        let document = Document::new(&registry, &options.root_id)?;
        Ok(Self {
            registry,
            options,
            document,
            selected: None,
            version: 0,
        })
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn options(&self) -> &EditorOptions {
        &self.options
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Replace the document, rooting it at the configured root id. A root
    /// stored under another id is promoted like any other missing root.
    pub fn set_document(&mut self, mut document: Document) -> Result<(), EditorError> {
        document.set_root_id(&self.options.root_id);
        document.repair_root(&self.registry)?;
        if self.selected.as_deref().map_or(false, |id| !document.contains(id)) {
            self.selected = None;
        }
        self.document = document;
        self.version += 1;
        Ok(())
    }

    /// Load document JSON. The current document is kept if parsing fails.
    pub fn import_json(&mut self, json: &str) -> Result<(), EditorError> {
        let document = serialization::from_json(json, &self.registry, &self.options.root_id)?;
        info!("Imported document with {} blocks", document.len());
        self.set_document(document)
    }

    pub fn export_json(&self) -> Result<String, EditorError> {
        serialization::to_json(&self.document)
    }

    /// Select a block. Unknown ids are ignored.
    pub fn select(&mut self, block_id: &str) -> bool {
        if self.document.contains(block_id) {
            self.selected = Some(block_id.to_string());
            true
        } else {
            false
        }
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Editor fields of a block, for building a property panel
    pub fn editor_fields(&self, block_id: &str) -> Result<Vec<EditorField>, EditorError> {
        let record = self
            .document
            .get(block_id)
            .ok_or_else(|| crate::MutationError::BlockNotFound(block_id.to_string()))?;
        Ok(self.registry.editor_fields(&record.kind, &record.data)?)
    }

    /// Apply a mutation. New blocks become selected; removing the selected
    /// block clears the selection.
    pub fn apply(&mut self, mutation: Mutation) -> Result<MutationResult, EditorError> {
        let result = mutation.apply(&mut self.document, &self.registry)?;
        if result.changed {
            self.version += 1;
        }

        if let Some(created) = &result.created {
            self.selected = Some(created.clone());
        }
        if self.selected.as_ref().map_or(false, |id| result.removed.contains(id)) {
            self.selected = None;
        }

        debug!("Applied {:?} (version {})", mutation, self.version);
        Ok(result)
    }

    pub fn add_block(
        &mut self,
        kind: &str,
        overrides: Option<DataOverrides>,
        parent_id: Option<&str>,
    ) -> Result<String, EditorError> {
        let result = self.apply(Mutation::AddBlock {
            kind: kind.to_string(),
            overrides,
            parent_id: parent_id.map(String::from),
        })?;
        Ok(result.created.unwrap_or_default())
    }

    pub fn add_block_to_column(
        &mut self,
        kind: &str,
        columns_block_id: &str,
        column_index: usize,
    ) -> Result<String, EditorError> {
        let result = self.apply(Mutation::AddBlockToColumn {
            kind: kind.to_string(),
            columns_block_id: columns_block_id.to_string(),
            column_index,
        })?;
        Ok(result.created.unwrap_or_default())
    }

    /// Delete a block once `confirm` agrees. Returns the removed ids.
    pub fn delete_block<F>(&mut self, block_id: &str, confirm: F) -> Result<Vec<String>, EditorError>
    where
        F: FnOnce(&str) -> bool,
    {
        if !confirm(block_id) {
            debug!("Delete of {} declined", block_id);
            return Ok(Vec::new());
        }
        let result = self.apply(Mutation::DeleteBlock {
            block_id: block_id.to_string(),
        })?;
        Ok(result.removed)
    }

    pub fn move_up(&mut self, block_id: &str) -> Result<bool, EditorError> {
        let result = self.apply(Mutation::MoveUp {
            block_id: block_id.to_string(),
        })?;
        Ok(result.changed)
    }

    pub fn move_down(&mut self, block_id: &str) -> Result<bool, EditorError> {
        let result = self.apply(Mutation::MoveDown {
            block_id: block_id.to_string(),
        })?;
        Ok(result.changed)
    }

    pub fn move_after(&mut self, block_id: &str, after_id: &str) -> Result<bool, EditorError> {
        let result = self.apply(Mutation::MoveAfter {
            block_id: block_id.to_string(),
            after_id: after_id.to_string(),
        })?;
        Ok(result.changed)
    }

    pub fn resize_columns(&mut self, block_id: &str, columns: usize) -> Result<Vec<String>, EditorError> {
        let result = self.apply(Mutation::ResizeColumns {
            block_id: block_id.to_string(),
            columns,
        })?;
        Ok(result.removed)
    }

    pub fn reparent(&mut self, block_id: &str, placement: Placement) -> Result<(), EditorError> {
        self.apply(Mutation::Reparent {
            block_id: block_id.to_string(),
            placement,
        })?;
        Ok(())
    }

    pub fn set_field(&mut self, block_id: &str, path: &str, value: Value) -> Result<(), EditorError> {
        self.apply(Mutation::SetField {
            block_id: block_id.to_string(),
            path: path.to_string(),
            value,
        })?;
        Ok(())
    }

    /// Normalize column lists, then render the editable preview.
    pub fn render_preview(&mut self) -> Result<String, EditorError> {
        let removed = self.document.normalize_columns(&self.registry);
        if !removed.is_empty() {
            debug!("Normalizing columns removed {} blocks", removed.len());
        }
        render_document_editable(&self.document, &self.registry)
    }

    /// Static body markup (no HTML shell)
    pub fn render_static(&self) -> Result<String, EditorError> {
        render_document_static(&self.document, &self.registry)
    }
}
