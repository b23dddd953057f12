use super::{alignment_field, escape_attr, object, padding, style_attr};
use crate::{BlockData, BlockKind, EditorField, FieldInput, FieldPath, RenderContext, Template};
use serde_json::json;

pub struct ImageBlock;

impl BlockKind for ImageBlock {
    fn name(&self) -> &'static str {
        "Image"
    }

    fn default_data(&self) -> BlockData {
        BlockData::new(
            object(json!({
                "padding": padding(8, 0, 8, 0),
                "textAlign": "left"
            })),
            object(json!({
                "src": "https://via.placeholder.com/600x300",
                "alt": "Image",
                "width": "100%",
                "link": ""
            })),
        )
    }

    fn render(&self, data: &BlockData, _ctx: &RenderContext<'_>) -> Template {
        let src = data.prop_text("src").unwrap_or_default();
        let alt = data.prop_text("alt").unwrap_or_default();
        let width = data
            .prop_text("width")
            .filter(|w| !w.is_empty())
            .unwrap_or_else(|| "100%".to_string());

        let mut image = format!(
            "<img src=\"{}\" alt=\"{}\" style=\"width: {}; max-width: 100%; height: auto; display: block;\" />",
            escape_attr(&src),
            escape_attr(&alt),
            escape_attr(&width)
        );
        if let Some(link) = data.prop_text("link").filter(|l| !l.is_empty()) {
            image = format!("<a href=\"{}\" target=\"_blank\">{}</a>", escape_attr(&link), image);
        }

        Template::markup(format!(
            "<div class=\"block-image\" style=\"{}\">{}</div>",
            style_attr(data),
            image
        ))
    }

    fn editor_fields(&self, _data: &BlockData) -> Vec<EditorField> {
        vec![
            EditorField::new(FieldPath::props("src"), "Image URL", FieldInput::Text),
            EditorField::new(FieldPath::props("alt"), "Alternative text", FieldInput::Text),
            EditorField::new(FieldPath::props("width"), "Width", FieldInput::Text),
            EditorField::new(FieldPath::props("link"), "Link (optional)", FieldInput::Text),
            alignment_field(),
        ]
    }
}
