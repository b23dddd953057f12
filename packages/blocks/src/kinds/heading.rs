use super::{alignment_field, escape_text, object, padding, style_attr};
use crate::{BlockData, BlockKind, EditorField, FieldInput, FieldPath, RenderContext, Template};
use serde_json::json;

const LEVELS: [&str; 6] = ["h1", "h2", "h3", "h4", "h5", "h6"];

pub struct HeadingBlock;

impl HeadingBlock {
    /// Heading tag from `props.level`; anything but h1-h6 renders as h1.
    fn level(data: &BlockData) -> &'static str {
        data.prop_str("level")
            .and_then(|level| LEVELS.iter().find(|candidate| **candidate == level))
            .copied()
            .unwrap_or("h1")
    }
}

impl BlockKind for HeadingBlock {
    fn name(&self) -> &'static str {
        "Heading"
    }

    fn default_data(&self) -> BlockData {
        BlockData::new(
            object(json!({
                "padding": padding(16, 0, 16, 0),
                "fontSize": 24,
                "fontWeight": "bold",
                "color": "#242424",
                "textAlign": "left"
            })),
            object(json!({ "text": "Heading", "level": "h1" })),
        )
    }

    fn render(&self, data: &BlockData, _ctx: &RenderContext<'_>) -> Template {
        let level = Self::level(data);
        let text = data.prop_text("text").unwrap_or_default();
        Template::markup(format!(
            "<{level} class=\"block-heading\" style=\"{}\">{}</{level}>",
            style_attr(data),
            escape_text(&text)
        ))
    }

    fn editor_fields(&self, _data: &BlockData) -> Vec<EditorField> {
        let levels = LEVELS[..4]
            .iter()
            .map(|level| (level.to_string(), level.to_uppercase()))
            .collect();

        vec![
            EditorField::new(FieldPath::props("text"), "Text", FieldInput::Text),
            EditorField::new(FieldPath::props("level"), "Level", FieldInput::Select(levels)),
            EditorField::new(FieldPath::style("fontSize"), "Font size", FieldInput::Number),
            EditorField::new(FieldPath::style("color"), "Text color", FieldInput::Color),
            alignment_field(),
        ]
    }
}
