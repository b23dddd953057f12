//! # Document Mutations
//!
//! Structural operations on a [`Document`]: add, delete, reorder, reparent,
//! resize columns, and field writes.
//!
//! ## Mutation Semantics
//!
//! ### Add
//! - Default data from the kind, caller overrides replace `style`/`props` wholesale
//! - A missing or non-container parent falls back to the root
//!
//! ### Delete
//! - Removes the block and all its descendants
//! - Strips every reference to the removed ids
//! - Root and unknown ids are no-ops
//!
//! ### Move
//! - `move_up`/`move_down` swap with the adjacent sibling, no-op at the edges
//! - `reparent` fails if it would create a cycle or move the root
//!
//! ### Missing blocks
//! - Resize, reparent and field writes on an unknown id warn and report no
//!   change

use crate::document::{BlockRecord, Document, ParentRef};
use missive_blocks::{
    value_as_f64, BlockData, BlockError, DataOverrides, FieldPath, FieldSection, Linkage, Registry,
    MAX_COLUMNS,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::HashSet;
use thiserror::Error;
use tracing::{debug, warn};

/// Serializable description of one document operation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Mutation {
    AddBlock {
        kind: String,
        #[serde(default)]
        overrides: Option<DataOverrides>,
        #[serde(default)]
        parent_id: Option<String>,
    },

    AddBlockToColumn {
        kind: String,
        columns_block_id: String,
        column_index: usize,
    },

    DeleteBlock {
        block_id: String,
    },

    MoveUp {
        block_id: String,
    },

    MoveDown {
        block_id: String,
    },

    /// Root-level reorder
    MoveAfter {
        block_id: String,
        after_id: String,
    },

    ResizeColumns {
        block_id: String,
        columns: usize,
    },

    Reparent {
        block_id: String,
        placement: Placement,
    },

    /// Two-segment path write (`style.<key>` / `props.<key>`)
    SetField {
        block_id: String,
        path: String,
        value: Value,
    },
}

/// Where a reparented block lands
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub parent_id: String,

    /// Column of a multi-column parent; `None` targets `childrenIds`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<usize>,

    /// Position in the target list, clamped; `None` appends
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
}

impl Placement {
    pub fn children(parent_id: impl Into<String>) -> Self {
        Self {
            parent_id: parent_id.into(),
            column: None,
            index: None,
        }
    }

    pub fn column(parent_id: impl Into<String>, column: usize) -> Self {
        Self {
            column: Some(column),
            ..Self::children(parent_id)
        }
    }

    pub fn at(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("Block kind \"{0}\" is not registered")]
    UnregisteredKind(String),

    #[error("Block not found: {0}")]
    BlockNotFound(String),

    #[error("Would create cycle")]
    CycleDetected,

    #[error("The root block cannot be moved")]
    RootImmovable,

    #[error("Invalid field write: {0}")]
    Field(BlockError),
}

impl From<BlockError> for MutationError {
    fn from(err: BlockError) -> Self {
        match err {
            BlockError::UnregisteredKind(kind) => MutationError::UnregisteredKind(kind),
            other => MutationError::Field(other),
        }
    }
}

/// What a mutation did to the document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MutationResult {
    /// Id of the block created, if any
    pub created: Option<String>,

    /// Ids removed, deleted block first
    pub removed: Vec<String>,

    /// False when the mutation was a no-op
    pub changed: bool,
}

impl MutationResult {
    fn created(id: String) -> Self {
        Self {
            created: Some(id),
            changed: true,
            ..Default::default()
        }
    }

    fn removed(removed: Vec<String>) -> Self {
        Self {
            changed: !removed.is_empty(),
            removed,
            ..Default::default()
        }
    }

    /// `None` marks a no-op
    fn applied(removed: Option<Vec<String>>) -> Self {
        Self {
            changed: removed.is_some(),
            removed: removed.unwrap_or_default(),
            ..Default::default()
        }
    }

    fn changed(changed: bool) -> Self {
        Self {
            changed,
            ..Default::default()
        }
    }
}

impl Mutation {
    /// Apply the mutation to a document
    pub fn apply(
        &self,
        doc: &mut Document,
        registry: &Registry,
    ) -> Result<MutationResult, MutationError> {
        match self {
            Mutation::AddBlock {
                kind,
                overrides,
                parent_id,
            } => doc
                .add_block(registry, kind, overrides.as_ref(), parent_id.as_deref())
                .map(MutationResult::created),

            Mutation::AddBlockToColumn {
                kind,
                columns_block_id,
                column_index,
            } => doc
                .add_block_to_column(registry, kind, columns_block_id, *column_index)
                .map(MutationResult::created),

            Mutation::DeleteBlock { block_id } => {
                Ok(MutationResult::removed(doc.delete_block(block_id)))
            }

            Mutation::MoveUp { block_id } => Ok(MutationResult::changed(doc.move_up(block_id))),

            Mutation::MoveDown { block_id } => {
                Ok(MutationResult::changed(doc.move_down(block_id)))
            }

            Mutation::MoveAfter { block_id, after_id } => {
                Ok(MutationResult::changed(doc.move_after(block_id, after_id)))
            }

            Mutation::ResizeColumns { block_id, columns } => {
                Ok(MutationResult::applied(doc.resize_columns(registry, block_id, *columns)))
            }

            Mutation::Reparent {
                block_id,
                placement,
            } => Ok(MutationResult::changed(doc.reparent(registry, block_id, placement)?)),

            Mutation::SetField {
                block_id,
                path,
                value,
            } => Ok(MutationResult::applied(doc.set_field(
                registry,
                block_id,
                path,
                value.clone(),
            )?)),
        }
    }
}

impl Document {
    /// Add a block of `kind` under `parent_id` (root when omitted) and return its id.
    pub fn add_block(
        &mut self,
        registry: &Registry,
        kind: &str,
        overrides: Option<&DataOverrides>,
        parent_id: Option<&str>,
    ) -> Result<String, MutationError> {
        let mut data = registry.default_data(kind)?;
        if let Some(overrides) = overrides {
            data.apply_overrides(overrides);
        }
        if registry.is_columns_kind(kind) {
            // Overridden props may carry a different column count
            let count = data.column_count();
            data.column_children_ids
                .get_or_insert_with(Vec::new)
                .resize_with(count, Vec::new);
        }

        let parent_id = self.resolve_container(registry, parent_id);
        let id = self.next_id();
        self.insert(BlockRecord::new(id.clone(), kind, data));

        if let Some(children) = self.slot_list_mut(&ParentRef::normal(parent_id.clone())) {
            children.push(id.clone());
        }

        debug!("Added {} block {} under {}", kind, id, parent_id);
        Ok(id)
    }

    /// Add a block of `kind` to one column of a multi-column block.
    ///
    /// Anything other than a multi-column block falls back to adding at the
    /// root. An index past the last column lands in the last column.
    pub fn add_block_to_column(
        &mut self,
        registry: &Registry,
        kind: &str,
        columns_block_id: &str,
        column_index: usize,
    ) -> Result<String, MutationError> {
        match self.get(columns_block_id) {
            Some(record) if registry.is_columns_kind(&record.kind) => {}
            Some(record) => {
                warn!(
                    "Block {} ({}) has no columns, adding to root",
                    columns_block_id, record.kind
                );
                return self.add_block(registry, kind, None, None);
            }
            None => {
                warn!("Columns block {} not found, adding to root", columns_block_id);
                return self.add_block(registry, kind, None, None);
            }
        }

        let data = registry.default_data(kind)?;
        let id = self.next_id();
        self.insert(BlockRecord::new(id.clone(), kind, data));

        if let Some(columns) = self.get_mut(columns_block_id) {
            let count = columns.data.column_count();
            let lists = columns.data.column_children_ids.get_or_insert_with(Vec::new);
            if lists.len() < count {
                lists.resize_with(count, Vec::new);
            }

            let index = if column_index < count {
                column_index
            } else {
                warn!(
                    "Column {} out of range for {}, using column {}",
                    column_index,
                    columns_block_id,
                    count - 1
                );
                count - 1
            };
            lists[index].push(id.clone());
        }

        debug!("Added {} block {} to {} column {}", kind, id, columns_block_id, column_index);
        Ok(id)
    }

    /// Delete a block and everything below it. Returns the removed ids.
    pub fn delete_block(&mut self, block_id: &str) -> Vec<String> {
        if block_id == self.root_id() {
            warn!("Refusing to delete the root block");
            return Vec::new();
        }
        if !self.contains(block_id) {
            warn!("Block {} not found, nothing to delete", block_id);
            return Vec::new();
        }

        let removed = self.remove_subtree(block_id);
        debug!("Deleted {} ({} blocks)", block_id, removed.len());
        removed
    }

    pub fn move_up(&mut self, block_id: &str) -> bool {
        self.swap_sibling(block_id, true)
    }

    pub fn move_down(&mut self, block_id: &str) -> bool {
        self.swap_sibling(block_id, false)
    }

    fn swap_sibling(&mut self, block_id: &str, up: bool) -> bool {
        let parent = self
            .find_parent(block_id)
            .unwrap_or_else(|| ParentRef::normal(self.root_id()));
        let Some(list) = self.slot_list_mut(&parent) else {
            return false;
        };
        let Some(index) = list.iter().position(|id| id == block_id) else {
            return false;
        };

        let neighbour = if up {
            index.checked_sub(1)
        } else {
            Some(index + 1).filter(|next| *next < list.len())
        };

        match neighbour {
            Some(other) => {
                list.swap(index, other);
                true
            }
            None => false,
        }
    }

    /// Move `block_id` to directly after `after_id`. Both must be top-level.
    pub fn move_after(&mut self, block_id: &str, after_id: &str) -> bool {
        if block_id == after_id {
            return false;
        }

        let root = ParentRef::normal(self.root_id());
        let Some(list) = self.slot_list_mut(&root) else {
            return false;
        };
        let (Some(from), true) = (
            list.iter().position(|id| id == block_id),
            list.iter().any(|id| id == after_id),
        ) else {
            return false;
        };

        let moved = list.remove(from);
        let target = list
            .iter()
            .position(|id| id == after_id)
            .map_or(list.len(), |index| index + 1);
        list.insert(target, moved);
        true
    }

    /// Set the column count of a multi-column block.
    ///
    /// Children of dropped columns are removed with their descendants. Widths
    /// are reset to equal shares. The count is kept within `1..=MAX_COLUMNS`.
    ///
    /// Returns the removed ids, or `None` when `block_id` is missing or not a
    /// multi-column block and nothing changed.
    pub fn resize_columns(
        &mut self,
        registry: &Registry,
        block_id: &str,
        columns: usize,
    ) -> Option<Vec<String>> {
        let Some(record) = self.get(block_id) else {
            warn!("Block {} not found, not resizing", block_id);
            return None;
        };
        if !registry.is_columns_kind(&record.kind) {
            warn!("Block {} is not a columns block, not resizing", block_id);
            return None;
        }

        let count = columns.clamp(1, MAX_COLUMNS);
        if let Some(record) = self.get_mut(block_id) {
            record.data.props.insert("columns".into(), json!(count));
            record.data.props.insert(
                "columnWidths".into(),
                Value::Array(BlockData::equal_column_widths(count)),
            );
        }

        Some(self.fit_columns(block_id, count))
    }

    /// Pad or truncate every multi-column block's lists to its column count.
    /// Returns the ids removed from truncated columns.
    pub fn normalize_columns(&mut self, registry: &Registry) -> Vec<String> {
        let targets: Vec<(String, usize)> = self
            .iter()
            .filter(|record| registry.is_columns_kind(&record.kind))
            .filter(|record| {
                record
                    .data
                    .column_children_ids
                    .as_ref()
                    .map_or(true, |lists| lists.len() != record.data.column_count())
            })
            .map(|record| (record.id.clone(), record.data.column_count()))
            .collect();

        let mut removed = Vec::new();
        for (block_id, count) in targets {
            removed.extend(self.fit_columns(&block_id, count));
        }
        removed
    }

    fn fit_columns(&mut self, block_id: &str, count: usize) -> Vec<String> {
        let dropped: Vec<String> = match self.get_mut(block_id) {
            Some(record) => {
                let lists = record.data.column_children_ids.get_or_insert_with(Vec::new);
                let dropped = if lists.len() > count {
                    lists.drain(count..).flatten().collect()
                } else {
                    Vec::new()
                };
                lists.resize_with(count, Vec::new);
                dropped
            }
            None => Vec::new(),
        };

        let mut removed = Vec::new();
        for id in dropped {
            if self.contains(&id) {
                removed.extend(self.remove_subtree(&id));
            }
        }
        removed
    }

    /// Move a block into another container's list or a column.
    ///
    /// Returns `false` when `block_id` is missing and nothing moved.
    pub fn reparent(
        &mut self,
        registry: &Registry,
        block_id: &str,
        placement: &Placement,
    ) -> Result<bool, MutationError> {
        if block_id == self.root_id() {
            return Err(MutationError::RootImmovable);
        }
        if !self.contains(block_id) {
            warn!("Block {} not found, nothing to move", block_id);
            return Ok(false);
        }

        let target = self.resolve_placement(registry, placement);
        if target.parent_id == block_id || self.descendants(block_id).contains(&target.parent_id) {
            return Err(MutationError::CycleDetected);
        }

        let detached: HashSet<&str> = [block_id].into_iter().collect();
        self.unlink(&detached);

        if let Some(list) = self.slot_list_mut(&target) {
            let index = placement.index.unwrap_or(list.len()).min(list.len());
            list.insert(index, block_id.to_string());
        }

        debug!("Moved {} to {}", block_id, target.parent_id);
        Ok(true)
    }

    /// Resolve a placement to an existing list, falling back to the root.
    /// Column lists are padded to the column count first.
    fn resolve_placement(&mut self, registry: &Registry, placement: &Placement) -> ParentRef {
        let root = ParentRef::normal(self.root_id());
        let Some(record) = self.get_mut(&placement.parent_id) else {
            warn!("Parent block {} not found, moving to root", placement.parent_id);
            return root;
        };

        match (registry.linkage(&record.kind), placement.column) {
            (Some(Linkage::Children), None) => ParentRef::normal(placement.parent_id.clone()),
            (Some(Linkage::Columns), Some(column)) => {
                let count = record.data.column_count();
                let lists = record.data.column_children_ids.get_or_insert_with(Vec::new);
                if lists.len() < count {
                    lists.resize_with(count, Vec::new);
                }
                ParentRef::column(placement.parent_id.clone(), column.min(count - 1))
            }
            _ => {
                warn!(
                    "Block {} cannot hold children there, moving to root",
                    placement.parent_id
                );
                root
            }
        }
    }

    /// Write one editor field.
    ///
    /// Number inputs coerce strings (`"3"` → 3, unparsable → 0). Setting the
    /// column count of a multi-column block resizes it.
    ///
    /// Returns the ids removed by a resize, or `None` when `block_id` is
    /// missing and nothing was written.
    pub fn set_field(
        &mut self,
        registry: &Registry,
        block_id: &str,
        path: &str,
        value: Value,
    ) -> Result<Option<Vec<String>>, MutationError> {
        let Some(record) = self.get(block_id) else {
            warn!("Block {} not found, ignoring write to {}", block_id, path);
            return Ok(None);
        };
        let field = registry.resolve_field(&record.kind, &record.data, path)?;

        if registry.is_columns_kind(&record.kind) && field.path == FieldPath::props("columns") {
            let count = BlockData::column_count_from(Some(&value));
            return Ok(self.resize_columns(registry, block_id, count));
        }

        let value = if field.is_numeric() {
            coerce_number(&value)
        } else {
            value
        };

        if let Some(record) = self.get_mut(block_id) {
            let target = match field.path.section {
                FieldSection::Style => &mut record.data.style,
                FieldSection::Props => &mut record.data.props,
            };
            target.insert(field.path.key, value);
        }
        Ok(Some(Vec::new()))
    }

    fn resolve_container(&self, registry: &Registry, parent_id: Option<&str>) -> String {
        let root = self.root_id().to_string();
        let Some(requested) = parent_id else {
            return root;
        };

        match self.get(requested) {
            Some(record) if registry.linkage(&record.kind) == Some(Linkage::Children) => {
                requested.to_string()
            }
            Some(record) => {
                warn!(
                    "Block {} ({}) cannot hold children, adding to root",
                    requested, record.kind
                );
                root
            }
            None => {
                warn!("Parent block {} not found, adding to root", requested);
                root
            }
        }
    }

    fn remove_subtree(&mut self, block_id: &str) -> Vec<String> {
        let mut removed = vec![block_id.to_string()];
        removed.extend(self.descendants(block_id));
        let root_id = self.root_id().to_string();
        removed.retain(|id| *id != root_id);

        for id in &removed {
            self.remove(id);
        }

        let gone: HashSet<&str> = removed.iter().map(String::as_str).collect();
        self.unlink(&gone);
        removed
    }

    /// Strip ids from every linkage list
    fn unlink(&mut self, ids: &HashSet<&str>) {
        for record in self.records_mut() {
            if let Some(children) = &mut record.data.children_ids {
                children.retain(|id| !ids.contains(id.as_str()));
            }
            if let Some(columns) = &mut record.data.column_children_ids {
                for column in columns.iter_mut() {
                    column.retain(|id| !ids.contains(id.as_str()));
                }
            }
        }
    }
}

fn coerce_number(value: &Value) -> Value {
    let n = value_as_f64(value).unwrap_or(0.0);
    if n.fract() == 0.0 && n.abs() < 1e15 {
        json!(n as i64)
    } else {
        json!(n)
    }
}
