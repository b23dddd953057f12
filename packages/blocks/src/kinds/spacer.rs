use super::object;
use crate::{
    format_number, BlockData, BlockKind, EditorField, FieldInput, FieldPath, RenderContext,
    Template,
};
use serde_json::json;

pub struct SpacerBlock;

impl BlockKind for SpacerBlock {
    fn name(&self) -> &'static str {
        "Spacer"
    }

    fn default_data(&self) -> BlockData {
        BlockData::new(object(json!({})), object(json!({ "height": 20 })))
    }

    fn render(&self, data: &BlockData, _ctx: &RenderContext<'_>) -> Template {
        let height = data.prop_f64("height").unwrap_or(20.0);
        Template::markup(format!(
            "<div class=\"block-spacer\" style=\"height: {}px; width: 100%;\"></div>",
            format_number(height)
        ))
    }

    fn editor_fields(&self, _data: &BlockData) -> Vec<EditorField> {
        vec![EditorField::new(
            FieldPath::props("height"),
            "Height (px)",
            FieldInput::Number,
        )]
    }
}
