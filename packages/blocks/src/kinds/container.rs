use super::{escape_attr, object, padding, style_attr};
use crate::{
    BlockData, BlockKind, EditorField, FieldInput, FieldPath, Linkage, RenderContext, Slot,
    Template,
};
use serde_json::json;

/// Linear container; every document root is one.
pub struct ContainerBlock;

impl BlockKind for ContainerBlock {
    fn name(&self) -> &'static str {
        "Container"
    }

    fn linkage(&self) -> Linkage {
        Linkage::Children
    }

    fn default_data(&self) -> BlockData {
        let mut data = BlockData::new(
            object(json!({
                "padding": padding(16, 24, 16, 24),
                "backgroundColor": "#FFFFFF"
            })),
            object(json!({})),
        );
        data.children_ids = Some(Vec::new());
        data
    }

    fn render(&self, data: &BlockData, ctx: &RenderContext<'_>) -> Template {
        let background = data
            .style_text("backgroundColor")
            .unwrap_or_else(|| "#FFFFFF".to_string());

        let mut template = Template::markup(format!(
            "<div class=\"block-container\"><table style=\"width: 100%; border-collapse: collapse; background-color: {};\"><tr><td style=\"{}\">",
            escape_attr(&background),
            style_attr(data)
        ));
        if ctx.is_editable() {
            template.push_str(&format!(
                "<div class=\"container-children\" data-container-id=\"{}\">",
                escape_attr(ctx.block_id)
            ));
        } else {
            template.push_str("<div class=\"container-children\">");
        }
        template.push_slot(Slot::Children);
        template.push_str("</div></td></tr></table></div>");
        template
    }

    fn editor_fields(&self, _data: &BlockData) -> Vec<EditorField> {
        vec![
            EditorField::new(
                FieldPath::style("backgroundColor"),
                "Background color",
                FieldInput::Color,
            ),
            EditorField::new(FieldPath::style("fontFamily"), "Font family", FieldInput::Text),
        ]
    }
}
