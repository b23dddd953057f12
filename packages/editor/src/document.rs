//! # Document Tree
//!
//! A document is a flat, insertion-ordered map from block id to block record,
//! plus the id of the root container. The tree shape lives entirely in the
//! linkage fields of each record's data (`childrenIds` / `columnChildrenIds`).
//!
//! ```text
//! root ──childrenIds──▶ [block-1, block-2]
//!                                   │
//!                     columnChildrenIds
//!                                   ▼
//!                        [[block-3], [block-4]]
//! ```

use crate::ids::IdGenerator;
use crate::EditorError;
use indexmap::IndexMap;
use missive_blocks::{BlockData, Linkage, Registry};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::json;
use std::collections::HashSet;
use tracing::{debug, warn};

/// Root id used when none is configured
pub const DEFAULT_ROOT_ID: &str = "root";

/// One block: kind name plus data.
///
/// The id is the record's key in the document map and is not repeated in the
/// serialized form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockRecord {
    #[serde(skip)]
    pub id: String,

    /// Older documents call this field `type`
    #[serde(alias = "type")]
    pub kind: String,

    #[serde(default)]
    pub data: BlockData,
}

impl BlockRecord {
    pub fn new(id: impl Into<String>, kind: impl Into<String>, data: BlockData) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            data,
        }
    }
}

/// Which list of its parent a block sits in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParentSlot {
    Normal,
    Column(usize),
}

impl ParentSlot {
    pub fn column_index(&self) -> Option<usize> {
        match self {
            ParentSlot::Normal => None,
            ParentSlot::Column(index) => Some(*index),
        }
    }
}

/// Result of a parent lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParentRef {
    pub parent_id: String,
    pub slot: ParentSlot,
}

impl ParentRef {
    pub fn normal(parent_id: impl Into<String>) -> Self {
        Self {
            parent_id: parent_id.into(),
            slot: ParentSlot::Normal,
        }
    }

    pub fn column(parent_id: impl Into<String>, index: usize) -> Self {
        Self {
            parent_id: parent_id.into(),
            slot: ParentSlot::Column(index),
        }
    }
}

/// Editable email document
#[derive(Debug, Clone)]
pub struct Document {
    root_id: String,
    blocks: IndexMap<String, BlockRecord>,
    ids: IdGenerator,
}

impl Document {
    /// Fresh document holding only a root container.
    pub fn new(registry: &Registry, root_id: &str) -> Result<Self, EditorError> {
        let mut document = Self::from_blocks(root_id, IndexMap::new());
        document.insert_root(registry, Vec::new())?;
        Ok(document)
    }

    /// Wrap an existing block map without validating it.
    ///
    /// The id counter is advanced past every `block-<n>` key already present.
    pub fn from_blocks(root_id: impl Into<String>, mut blocks: IndexMap<String, BlockRecord>) -> Self {
        for (id, record) in blocks.iter_mut() {
            record.id = id.clone();
        }

        let mut ids = IdGenerator::new();
        ids.advance_past(blocks.keys().map(String::as_str));

        Self {
            root_id: root_id.into(),
            blocks,
            ids,
        }
    }

    /// Make sure the root id resolves.
    ///
    /// An unreferenced container is promoted to the root id when one exists.
    /// Otherwise a fresh root is created that adopts every unreferenced block.
    /// Returns whether anything changed.
    pub fn repair_root(&mut self, registry: &Registry) -> Result<bool, EditorError> {
        if self.blocks.contains_key(&self.root_id) {
            return Ok(false);
        }

        let referenced = self.referenced_ids();
        let unreferenced: Vec<String> = self
            .blocks
            .keys()
            .filter(|id| !referenced.contains(id.as_str()))
            .cloned()
            .collect();

        let promoted = unreferenced.iter().find(|id| {
            self.blocks
                .get(id.as_str())
                .map_or(false, |record| registry.linkage(&record.kind) == Some(Linkage::Children))
        });

        match promoted {
            Some(old_id) => {
                warn!("Root block {} missing, promoting {}", self.root_id, old_id);
                if let Some((index, _, mut record)) = self.blocks.shift_remove_full(old_id.as_str()) {
                    record.id = self.root_id.clone();
                    self.blocks.shift_insert(index, self.root_id.clone(), record);
                }
            }
            None => {
                warn!(
                    "Root block {} missing, creating one for {} top-level blocks",
                    self.root_id,
                    unreferenced.len()
                );
                self.insert_root(registry, unreferenced)?;
            }
        }

        Ok(true)
    }

    fn insert_root(&mut self, registry: &Registry, children: Vec<String>) -> Result<(), EditorError> {
        let kind = registry.container_kind().ok_or(EditorError::MissingContainer)?;
        let mut data = registry.default_data(kind)?;
        data.style.insert("fontFamily".into(), json!("Arial, sans-serif"));
        data.props.insert("backdropColor".into(), json!("#F8F8F8"));
        data.props.insert("textColor".into(), json!("#242424"));
        data.children_ids = Some(children);

        let record = BlockRecord::new(self.root_id.clone(), kind, data);
        self.blocks.shift_insert(0, self.root_id.clone(), record);
        Ok(())
    }

    /// Point the document at another root id. Nothing is moved; call
    /// [`Document::repair_root`] afterwards if the new id has no block yet.
    pub fn set_root_id(&mut self, root_id: &str) {
        if self.root_id != root_id {
            debug!("Retargeting root from {} to {}", self.root_id, root_id);
            self.root_id = root_id.to_string();
        }
    }

    pub fn root_id(&self) -> &str {
        &self.root_id
    }

    pub fn root(&self) -> Option<&BlockRecord> {
        self.blocks.get(&self.root_id)
    }

    pub fn get(&self, block_id: &str) -> Option<&BlockRecord> {
        self.blocks.get(block_id)
    }

    pub fn get_mut(&mut self, block_id: &str) -> Option<&mut BlockRecord> {
        self.blocks.get_mut(block_id)
    }

    pub fn contains(&self, block_id: &str) -> bool {
        self.blocks.contains_key(block_id)
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Records in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &BlockRecord> {
        self.blocks.values()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.blocks.keys().map(String::as_str)
    }

    pub(crate) fn records_mut(&mut self) -> impl Iterator<Item = &mut BlockRecord> {
        self.blocks.values_mut()
    }

    pub(crate) fn insert(&mut self, record: BlockRecord) {
        self.blocks.insert(record.id.clone(), record);
    }

    pub(crate) fn remove(&mut self, block_id: &str) -> Option<BlockRecord> {
        self.blocks.shift_remove(block_id)
    }

    pub(crate) fn next_id(&mut self) -> String {
        let blocks = &self.blocks;
        self.ids.next_id(|candidate| blocks.contains_key(candidate))
    }

    /// First block whose linkage lists contain `block_id`, scanning in insertion
    /// order. `None` for the root and for orphans.
    pub fn find_parent(&self, block_id: &str) -> Option<ParentRef> {
        for (parent_id, record) in &self.blocks {
            if let Some(children) = &record.data.children_ids {
                if children.iter().any(|id| id == block_id) {
                    return Some(ParentRef::normal(parent_id.clone()));
                }
            }
            if let Some(columns) = &record.data.column_children_ids {
                for (index, column) in columns.iter().enumerate() {
                    if column.iter().any(|id| id == block_id) {
                        return Some(ParentRef::column(parent_id.clone(), index));
                    }
                }
            }
        }
        None
    }

    /// The list a parent reference points at. A missing `childrenIds` is
    /// created; a missing column is not.
    pub(crate) fn slot_list_mut(&mut self, parent: &ParentRef) -> Option<&mut Vec<String>> {
        let data = &mut self.blocks.get_mut(&parent.parent_id)?.data;
        match parent.slot {
            ParentSlot::Normal => Some(data.children_ids.get_or_insert_with(Vec::new)),
            ParentSlot::Column(index) => data.column_children_ids.as_mut()?.get_mut(index),
        }
    }

    /// Every id that appears in some linkage list
    pub fn referenced_ids(&self) -> HashSet<&str> {
        self.blocks
            .values()
            .flat_map(|record| record.data.linked_ids())
            .map(String::as_str)
            .collect()
    }

    /// Non-root blocks no linkage list refers to
    pub fn orphans(&self) -> Vec<String> {
        let referenced = self.referenced_ids();
        self.blocks
            .keys()
            .filter(|id| **id != self.root_id && !referenced.contains(id.as_str()))
            .cloned()
            .collect()
    }

    /// All blocks below `block_id`, depth first, excluding `block_id` itself.
    /// Ids that do not resolve are skipped.
    pub fn descendants(&self, block_id: &str) -> Vec<String> {
        let mut found = Vec::new();
        let mut seen: HashSet<&str> = HashSet::new();
        let mut stack: Vec<&str> = vec![block_id];
        seen.insert(block_id);

        while let Some(current) = stack.pop() {
            let Some(record) = self.blocks.get(current) else {
                continue;
            };
            let children: Vec<&str> = record.data.linked_ids().map(String::as_str).collect();
            for child in children.into_iter().rev() {
                if seen.insert(child) && self.blocks.contains_key(child) {
                    found.push(child.to_string());
                    stack.push(child);
                }
            }
        }

        found
    }
}

impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        self.root_id == other.root_id && self.blocks == other.blocks
    }
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.blocks.serialize(serializer)
    }
}
