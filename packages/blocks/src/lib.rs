//! # Missive Blocks
//!
//! Block kinds for Missive email templates.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ blocks: kind registry + block renderer      │
//! │  - default data per kind                    │
//! │  - render one block to a slotted Template   │
//! │  - editor field schema per kind             │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: Document tree + mutations + render  │
//! │ pipeline (fills the slots recursively)      │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! A block renderer never recurses into children. Nested content is expressed as
//! slots in the returned [`Template`]; the render pipeline fills them.
//!
//! ## Usage
//!
//! ```rust
//! use missive_blocks::{BlockData, Registry, RenderContext, RenderMode};
//!
//! let registry = Registry::with_builtin_blocks();
//! let data = registry.default_data("Text").unwrap();
//! let ctx = RenderContext::new("block-1", RenderMode::Static);
//! let template = registry.render("Text", &data, &ctx).unwrap();
//!
//! assert!(template.to_string().starts_with("<p class=\"block-text\""));
//! ```

mod data;
mod errors;
mod kind;
pub mod kinds;
mod registry;
pub mod style;
mod template;


pub use data::{
    format_number, value_as_f64, value_text, BlockData, DataOverrides, MAX_COLUMNS,
};
pub use errors::BlockError;
pub use kind::{
    BlockKind, EditorField, FieldInput, FieldPath, FieldSection, Linkage, RenderContext,
    RenderMode,
};
pub use registry::{Registry, COLUMNS_KIND, CONTAINER_KIND};
pub use template::{Slot, Template};
