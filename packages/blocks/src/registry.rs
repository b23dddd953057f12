//! # Block Kind Registry
//!
//! Lookup table from kind name to descriptor. A registry is an explicit value:
//! create one per editor (or share it behind an `Arc`), there is no global table.

use crate::kinds;
use crate::{
    BlockData, BlockError, BlockKind, EditorField, FieldPath, Linkage, RenderContext, Template,
};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Kind name of the linear container (and of every document root)
pub const CONTAINER_KIND: &str = "Container";

/// Kind name of the multi-column block
pub const COLUMNS_KIND: &str = "Columns";

#[derive(Clone, Default)]
pub struct Registry {
    /// Descriptors in registration order
    kinds: Vec<(String, Arc<dyn BlockKind>)>,
    index: HashMap<String, usize>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in kind, in palette order.
    pub fn with_builtin_blocks() -> Self {
        let mut registry = Self::new();
        registry.register(CONTAINER_KIND, Arc::new(kinds::ContainerBlock));
        registry.register("Text", Arc::new(kinds::TextBlock));
        registry.register("Heading", Arc::new(kinds::HeadingBlock));
        registry.register("Image", Arc::new(kinds::ImageBlock));
        registry.register("Button", Arc::new(kinds::ButtonBlock));
        registry.register("Divider", Arc::new(kinds::DividerBlock));
        registry.register("Spacer", Arc::new(kinds::SpacerBlock));
        registry.register(COLUMNS_KIND, Arc::new(kinds::ColumnsBlock));
        registry
    }

    /// Register a descriptor. Re-registering a name replaces the descriptor and
    /// keeps the name's original position.
    pub fn register(&mut self, kind: impl Into<String>, descriptor: Arc<dyn BlockKind>) {
        let kind = kind.into();
        match self.index.get(&kind) {
            Some(&position) => {
                debug!("Replacing block kind {}", kind);
                self.kinds[position].1 = descriptor;
            }
            None => {
                self.index.insert(kind.clone(), self.kinds.len());
                self.kinds.push((kind, descriptor));
            }
        }
    }

    pub fn get(&self, kind: &str) -> Result<&Arc<dyn BlockKind>, BlockError> {
        self.index
            .get(kind)
            .map(|&position| &self.kinds[position].1)
            .ok_or_else(|| BlockError::UnregisteredKind(kind.to_string()))
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.index.contains_key(kind)
    }

    /// Kind names in registration order
    pub fn list_kinds(&self) -> Vec<&str> {
        self.kinds.iter().map(|(kind, _)| kind.as_str()).collect()
    }

    pub fn linkage(&self, kind: &str) -> Option<Linkage> {
        self.get(kind).ok().map(|descriptor| descriptor.linkage())
    }

    pub fn is_columns_kind(&self, kind: &str) -> bool {
        self.linkage(kind) == Some(Linkage::Columns)
    }

    /// Kind that hosts a document root: `Container` when registered as a linear
    /// container, otherwise the first registered linear container.
    pub fn container_kind(&self) -> Option<&str> {
        if self.linkage(CONTAINER_KIND) == Some(Linkage::Children) {
            return Some(CONTAINER_KIND);
        }
        self.kinds
            .iter()
            .find(|(_, descriptor)| descriptor.linkage() == Linkage::Children)
            .map(|(kind, _)| kind.as_str())
    }

    /// Kind that lays children out in columns, `Columns` preferred.
    pub fn columns_kind(&self) -> Option<&str> {
        if self.is_columns_kind(COLUMNS_KIND) {
            return Some(COLUMNS_KIND);
        }
        self.kinds
            .iter()
            .find(|(_, descriptor)| descriptor.linkage() == Linkage::Columns)
            .map(|(kind, _)| kind.as_str())
    }

    pub fn default_data(&self, kind: &str) -> Result<BlockData, BlockError> {
        Ok(self.get(kind)?.default_data())
    }

    /// Render one block without recursing into its children.
    pub fn render(
        &self,
        kind: &str,
        data: &BlockData,
        ctx: &RenderContext<'_>,
    ) -> Result<Template, BlockError> {
        Ok(self.get(kind)?.render(data, ctx))
    }

    pub fn editor_fields(&self, kind: &str, data: &BlockData) -> Result<Vec<EditorField>, BlockError> {
        Ok(self.get(kind)?.editor_fields(data))
    }

    /// Validate a dotted path against the kind's editor fields.
    pub fn resolve_field(
        &self,
        kind: &str,
        data: &BlockData,
        path: &str,
    ) -> Result<EditorField, BlockError> {
        let parsed = FieldPath::parse(path)?;
        self.editor_fields(kind, data)?
            .into_iter()
            .find(|field| field.path == parsed)
            .ok_or_else(|| BlockError::UnknownField {
                kind: kind.to_string(),
                path: path.to_string(),
            })
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("kinds", &self.list_kinds())
            .finish()
    }
}
