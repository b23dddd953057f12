use super::{alignment_field, escape_text, object, padding, style_attr};
use crate::{BlockData, BlockKind, EditorField, FieldInput, FieldPath, RenderContext, Template};
use serde_json::json;

pub struct TextBlock;

impl BlockKind for TextBlock {
    fn name(&self) -> &'static str {
        "Text"
    }

    fn default_data(&self) -> BlockData {
        BlockData::new(
            object(json!({
                "padding": padding(8, 0, 8, 0),
                "fontSize": 14,
                "color": "#242424",
                "textAlign": "left"
            })),
            object(json!({ "text": "Enter your text here..." })),
        )
    }

    fn render(&self, data: &BlockData, _ctx: &RenderContext<'_>) -> Template {
        let text = data.prop_text("text").unwrap_or_default();
        Template::markup(format!(
            "<p class=\"block-text\" style=\"{}\">{}</p>",
            style_attr(data),
            escape_text(&text)
        ))
    }

    fn editor_fields(&self, _data: &BlockData) -> Vec<EditorField> {
        vec![
            EditorField::new(FieldPath::props("text"), "Text", FieldInput::TextArea),
            EditorField::new(FieldPath::style("fontSize"), "Font size", FieldInput::Number),
            EditorField::new(FieldPath::style("color"), "Text color", FieldInput::Color),
            alignment_field(),
        ]
    }
}
