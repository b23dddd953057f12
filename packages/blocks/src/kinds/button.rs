use super::{alignment_field, escape_attr, escape_text, object, padding, style_attr};
use crate::{
    format_number, BlockData, BlockKind, EditorField, FieldInput, FieldPath, RenderContext,
    Template,
};
use serde_json::json;

pub struct ButtonBlock;

impl BlockKind for ButtonBlock {
    fn name(&self) -> &'static str {
        "Button"
    }

    fn default_data(&self) -> BlockData {
        BlockData::new(
            object(json!({
                "padding": padding(16, 0, 16, 0),
                "textAlign": "center"
            })),
            object(json!({
                "text": "Click here",
                "link": "https://example.com",
                "backgroundColor": "#007bff",
                "textColor": "#FFFFFF",
                "borderRadius": 4,
                "padding": 12
            })),
        )
    }

    fn render(&self, data: &BlockData, _ctx: &RenderContext<'_>) -> Template {
        let pad = data.prop_f64("padding").unwrap_or(12.0);
        let radius = data.prop_f64("borderRadius").unwrap_or(4.0);
        let background = data
            .prop_text("backgroundColor")
            .unwrap_or_else(|| "#007bff".to_string());
        let color = data
            .prop_text("textColor")
            .unwrap_or_else(|| "#FFFFFF".to_string());
        let link = data
            .prop_text("link")
            .filter(|l| !l.is_empty())
            .unwrap_or_else(|| "#".to_string());
        let text = data.prop_text("text").unwrap_or_default();

        let button_style = format!(
            "display: inline-block; padding: {}px {}px; background-color: {}; color: {}; text-decoration: none; border-radius: {}px; font-weight: bold;",
            format_number(pad),
            format_number(pad * 2.0),
            background,
            color,
            format_number(radius)
        );

        Template::markup(format!(
            "<div class=\"block-button\" style=\"{}\"><a href=\"{}\" style=\"{}\" target=\"_blank\">{}</a></div>",
            style_attr(data),
            escape_attr(&link),
            escape_attr(&button_style),
            escape_text(&text)
        ))
    }

    fn editor_fields(&self, _data: &BlockData) -> Vec<EditorField> {
        vec![
            EditorField::new(FieldPath::props("text"), "Button text", FieldInput::Text),
            EditorField::new(FieldPath::props("link"), "Link URL", FieldInput::Text),
            EditorField::new(
                FieldPath::props("backgroundColor"),
                "Background color",
                FieldInput::Color,
            ),
            EditorField::new(FieldPath::props("textColor"), "Text color", FieldInput::Color),
            EditorField::new(FieldPath::props("padding"), "Padding (px)", FieldInput::Number),
            EditorField::new(
                FieldPath::props("borderRadius"),
                "Border radius (px)",
                FieldInput::Number,
            ),
            alignment_field(),
        ]
    }
}
