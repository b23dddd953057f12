//! # Render Pipeline
//!
//! Walks the document from a block downwards: each block renders to a slotted
//! template, and every slot is filled with the concatenated markup of the
//! children in the matching list.
//!
//! Two modes:
//! - **Editable**: each non-root block is wrapped with selection and
//!   move/delete controls, empty containers and columns show drop targets
//! - **Static**: clean export markup, empty lists render nothing
//!
//! The root is the canvas. It contributes only its children; canvas styling
//! comes from the preview frame or the HTML shell.

use crate::{Document, EditorError};
use missive_blocks::{Registry, RenderContext, RenderMode, Slot};
use std::collections::HashSet;
use tracing::{instrument, warn};

const ROOT_PLACEHOLDER: &str = "<div class=\"container-empty-placeholder\" style=\"padding: 20px; text-align: center; color: #999;\">No content blocks yet. Drag blocks from the sidebar to add content.</div>";
const CONTAINER_PLACEHOLDER: &str =
    "<div class=\"container-empty-placeholder\">Drag elements here</div>";
const COLUMN_PLACEHOLDER: &str = "<div class=\"column-empty-placeholder\">Drag elements here</div>";

/// Render `block_id` and its subtree with editing affordances.
pub fn render_editable(document: &Document, registry: &Registry, block_id: &str) -> String {
    Pipeline::new(document, registry, RenderMode::Editable).render(block_id)
}

/// Render `block_id` and its subtree as export markup.
pub fn render_static(document: &Document, registry: &Registry, block_id: &str) -> String {
    Pipeline::new(document, registry, RenderMode::Static).render(block_id)
}

pub fn render_document_editable(
    document: &Document,
    registry: &Registry,
) -> Result<String, EditorError> {
    render_document(document, registry, RenderMode::Editable)
}

pub fn render_document_static(
    document: &Document,
    registry: &Registry,
) -> Result<String, EditorError> {
    render_document(document, registry, RenderMode::Static)
}

/// Render from the document root, failing when the root does not resolve to a
/// registered kind.
#[instrument(skip(document, registry), fields(blocks = document.len()))]
pub fn render_document(
    document: &Document,
    registry: &Registry,
    mode: RenderMode,
) -> Result<String, EditorError> {
    let root_id = document.root_id();
    match document.root() {
        Some(root) if registry.contains(&root.kind) => {
            Ok(Pipeline::new(document, registry, mode).render(root_id))
        }
        _ => Err(EditorError::RootNotFound(root_id.to_string())),
    }
}

/// One render walk over a document
pub struct Pipeline<'a> {
    document: &'a Document,
    registry: &'a Registry,
    mode: RenderMode,

    /// Blocks already rendered in this walk
    visited: HashSet<String>,
}

impl<'a> Pipeline<'a> {
    pub fn new(document: &'a Document, registry: &'a Registry, mode: RenderMode) -> Self {
        Self {
            document,
            registry,
            mode,
            visited: HashSet::new(),
        }
    }

    /// Render a block and its subtree. Unknown ids and unregistered kinds
    /// render as empty markup.
    pub fn render(mut self, block_id: &str) -> String {
        self.render_block(block_id)
    }

    fn editable(&self) -> bool {
        self.mode == RenderMode::Editable
    }

    fn render_block(&mut self, block_id: &str) -> String {
        let document = self.document;
        let Some(record) = document.get(block_id) else {
            warn!("Block {} not found, skipping", block_id);
            return String::new();
        };
        if !self.visited.insert(block_id.to_string()) {
            warn!("Block {} reached twice in one render, skipping", block_id);
            return String::new();
        }

        let ctx = RenderContext::new(block_id, self.mode);
        let template = match self.registry.render(&record.kind, &record.data, &ctx) {
            Ok(template) => template,
            Err(err) => {
                warn!("Skipping block {}: {}", block_id, err);
                return String::new();
            }
        };

        let data = &record.data;
        if block_id == document.root_id() {
            let children = self.render_list(data.children_ids.as_deref());
            return if children.is_empty() && self.editable() {
                ROOT_PLACEHOLDER.to_string()
            } else {
                children
            };
        }

        let editable = self.editable();
        let markup = template.fill(|slot| {
            let (ids, placeholder) = match slot {
                Slot::Children => (data.children_ids.as_deref(), CONTAINER_PLACEHOLDER),
                Slot::Column(index) => (
                    data.column_children_ids
                        .as_ref()
                        .and_then(|columns| columns.get(index))
                        .map(Vec::as_slice),
                    COLUMN_PLACEHOLDER,
                ),
            };
            let children = self.render_list(ids);
            if children.is_empty() && editable {
                placeholder.to_string()
            } else {
                children
            }
        });

        if editable {
            wrap_editable(block_id, &markup)
        } else {
            markup
        }
    }

    fn render_list(&mut self, ids: Option<&[String]>) -> String {
        ids.unwrap_or_default()
            .iter()
            .map(|id| self.render_block(id))
            .collect()
    }
}

/// Selection target plus move/delete controls around a block
fn wrap_editable(block_id: &str, inner: &str) -> String {
    format!(
        "<div class=\"block-wrapper\" data-block-id=\"{}\"><div class=\"block-controls\"><button class=\"block-move-up\">↑</button><button class=\"block-move-down\">↓</button><button class=\"block-delete\">×</button></div>{}</div>",
        html_escape::encode_double_quoted_attribute(block_id),
        inner
    )
}
