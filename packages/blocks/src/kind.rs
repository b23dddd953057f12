//! Block kind descriptor trait and the editor field schema.

use crate::{BlockData, BlockError, Template};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which child-linkage field a kind uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Linkage {
    /// Leaf block
    None,

    /// One ordered `childrenIds` list
    Children,

    /// N parallel ordered lists in `columnChildrenIds`
    Columns,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RenderMode {
    /// Live preview with selection/move/delete affordances and drop targets
    Editable,

    /// Clean export markup
    Static,
}

/// Per-call render context handed to a kind
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub block_id: &'a str,
    pub mode: RenderMode,
}

impl<'a> RenderContext<'a> {
    pub fn new(block_id: &'a str, mode: RenderMode) -> Self {
        Self { block_id, mode }
    }

    pub fn is_editable(&self) -> bool {
        self.mode == RenderMode::Editable
    }
}

/// Descriptor for one block kind
///
/// Each kind provides:
/// - Default data for freshly added blocks
/// - A pure render function producing a slotted template
/// - The fields an editor may write
pub trait BlockKind: Send + Sync {
    /// Get a debug name for this kind
    fn name(&self) -> &'static str;

    fn linkage(&self) -> Linkage {
        Linkage::None
    }

    fn default_data(&self) -> BlockData;

    /// Render this block without its children. Kinds with nested content emit
    /// exactly one slot per child list.
    fn render(&self, data: &BlockData, ctx: &RenderContext<'_>) -> Template;

    fn editor_fields(&self, data: &BlockData) -> Vec<EditorField>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldSection {
    Style,
    Props,
}

/// Two-segment field path: `style.<key>` or `props.<key>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath {
    pub section: FieldSection,
    pub key: String,
}

impl FieldPath {
    pub fn style(key: &str) -> Self {
        Self {
            section: FieldSection::Style,
            key: key.to_string(),
        }
    }

    pub fn props(key: &str) -> Self {
        Self {
            section: FieldSection::Props,
            key: key.to_string(),
        }
    }

    /// Parse a dotted path. Deeper nesting (`style.padding.top`) is rejected.
    pub fn parse(path: &str) -> Result<Self, BlockError> {
        let unsupported = || BlockError::UnsupportedPath(path.to_string());

        let mut parts = path.split('.');
        let (section, key) = match (parts.next(), parts.next(), parts.next()) {
            (Some(section), Some(key), None) if !key.is_empty() => (section, key),
            _ => return Err(unsupported()),
        };

        match section {
            "style" => Ok(Self::style(key)),
            "props" => Ok(Self::props(key)),
            _ => Err(unsupported()),
        }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let section = match self.section {
            FieldSection::Style => "style",
            FieldSection::Props => "props",
        };
        write!(f, "{}.{}", section, self.key)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldInput {
    Text,
    TextArea,
    Number,
    Color,
    /// `(value, label)` pairs
    Select(Vec<(String, String)>),
}

/// One editable field of a block kind
#[derive(Debug, Clone, PartialEq)]
pub struct EditorField {
    pub path: FieldPath,
    pub label: String,
    pub input: FieldInput,
}

impl EditorField {
    pub fn new(path: FieldPath, label: &str, input: FieldInput) -> Self {
        Self {
            path,
            label: label.to_string(),
            input,
        }
    }

    pub fn is_numeric(&self) -> bool {
        self.input == FieldInput::Number
    }
}
