use super::{escape_attr, object, padding, style_attr};
use crate::{
    format_number, BlockData, BlockKind, EditorField, FieldInput, FieldPath, RenderContext,
    Template,
};
use serde_json::json;

pub struct DividerBlock;

impl BlockKind for DividerBlock {
    fn name(&self) -> &'static str {
        "Divider"
    }

    fn default_data(&self) -> BlockData {
        BlockData::new(
            object(json!({ "padding": padding(16, 0, 16, 0) })),
            object(json!({
                "color": "#E0E0E0",
                "height": 1,
                "width": "100%"
            })),
        )
    }

    fn render(&self, data: &BlockData, _ctx: &RenderContext<'_>) -> Template {
        let height = data.prop_f64("height").unwrap_or(1.0);
        let color = data
            .prop_text("color")
            .unwrap_or_else(|| "#E0E0E0".to_string());
        let width = data
            .prop_text("width")
            .filter(|w| !w.is_empty())
            .unwrap_or_else(|| "100%".to_string());

        let rule = format!(
            "border: none; border-top: {}px solid {}; width: {}; margin: 0;",
            format_number(height),
            color,
            width
        );

        Template::markup(format!(
            "<div class=\"block-divider\" style=\"{}\"><hr style=\"{}\"></div>",
            style_attr(data),
            escape_attr(&rule)
        ))
    }

    fn editor_fields(&self, _data: &BlockData) -> Vec<EditorField> {
        vec![
            EditorField::new(FieldPath::props("color"), "Color", FieldInput::Color),
            EditorField::new(FieldPath::props("height"), "Thickness", FieldInput::Number),
            EditorField::new(FieldPath::props("width"), "Width", FieldInput::Text),
        ]
    }
}
