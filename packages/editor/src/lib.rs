//! # Missive Editor
//!
//! Document editing engine for Missive email templates.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ blocks: kind registry + block renderer      │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: Document tree + mutations           │
//! │  - Add/delete/move/reparent blocks          │
//! │  - Column resize and normalization          │
//! │  - Recursive editable/static render         │
//! │  - JSON load/save with root repair          │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ compiler-html: static markup → HTML shell   │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Flat map, linked tree**: blocks live in one ordered map, the tree is
//!    expressed by id lists in block data
//! 2. **Single parent**: an id appears in at most one list document-wide
//! 3. **Pure render**: rendering never mutates the document
//!
//! ## Usage
//!
//! ```rust
//! use missive_blocks::Registry;
//! use missive_editor::{render_document_static, Document};
//!
//! let registry = Registry::with_builtin_blocks();
//! let mut doc = Document::new(&registry, "root")?;
//!
//! let heading = doc.add_block(&registry, "Heading", None, None)?;
//! doc.set_field(&registry, &heading, "props.text", "Welcome".into())?;
//!
//! let html = render_document_static(&doc, &registry)?;
//! assert!(html.contains("Welcome"));
//! # Ok::<(), missive_editor::EditorError>(())
//! ```

mod document;
mod errors;
mod ids;
mod mutations;
mod pipeline;
pub mod serialization;
mod session;

pub use document::{BlockRecord, Document, ParentRef, ParentSlot, DEFAULT_ROOT_ID};
pub use errors::EditorError;
pub use ids::IdGenerator;
pub use mutations::{Mutation, MutationError, MutationResult, Placement};
pub use pipeline::{
    render_document, render_document_editable, render_document_static, render_editable,
    render_static, Pipeline,
};
pub use session::{EditSession, EditorOptions};

// Re-export block types for convenience
pub use missive_blocks::{BlockData, DataOverrides, Registry, RenderMode};
