//! Built-in block kinds.
//!
//! Markup is table-based where layout matters, since that is what email clients
//! render consistently.

mod button;
mod columns;
mod container;
mod divider;
mod heading;
mod image;
mod spacer;
mod text;

pub use button::ButtonBlock;
pub use columns::ColumnsBlock;
pub use container::ContainerBlock;
pub use divider::DividerBlock;
pub use heading::HeadingBlock;
pub use image::ImageBlock;
pub use spacer::SpacerBlock;
pub use text::TextBlock;

use crate::style::style_string;
use crate::{BlockData, EditorField, FieldInput, FieldPath};
use serde_json::{json, Map, Value};
use std::borrow::Cow;

/// Unwrap a `json!({...})` literal into a map.
pub(crate) fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

pub(crate) fn padding(top: u32, right: u32, bottom: u32, left: u32) -> Value {
    json!({ "top": top, "right": right, "bottom": bottom, "left": left })
}

pub(crate) fn escape_attr(value: &str) -> Cow<'_, str> {
    html_escape::encode_double_quoted_attribute(value)
}

pub(crate) fn escape_text(value: &str) -> Cow<'_, str> {
    html_escape::encode_text(value)
}

/// The block's style map as an escaped `style` attribute value.
pub(crate) fn style_attr(data: &BlockData) -> String {
    escape_attr(&style_string(&data.style)).into_owned()
}

pub(crate) fn alignment_field() -> EditorField {
    EditorField::new(
        FieldPath::style("textAlign"),
        "Text alignment",
        FieldInput::Select(vec![
            ("left".into(), "Left".into()),
            ("center".into(), "Center".into()),
            ("right".into(), "Right".into()),
        ]),
    )
}
