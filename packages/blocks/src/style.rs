//! Inline CSS for a block's `style` map.
//!
//! Email clients ignore stylesheets unevenly, so every block carries its styling
//! inline. Only the keys below are emitted, in this order.

use crate::data::{format_number, value_as_f64, value_text};
use serde_json::{Map, Value};

/// Build the inline declaration list for a style map.
pub fn style_string(style: &Map<String, Value>) -> String {
    let mut parts = Vec::new();

    if let Some(padding) = present(style, "padding") {
        parts.push(format!("padding: {};", box_sides(padding)));
    }
    if let Some(margin) = present(style, "margin") {
        parts.push(format!("margin: {};", box_sides(margin)));
    }
    if let Some(color) = text(style, "backgroundColor") {
        parts.push(format!("background-color: {};", color));
    }
    if let Some(align) = text(style, "textAlign") {
        parts.push(format!("text-align: {};", align));
    }
    if let Some(size) = text(style, "fontSize") {
        parts.push(format!("font-size: {}px;", size));
    }
    if let Some(weight) = text(style, "fontWeight") {
        parts.push(format!("font-weight: {};", weight));
    }
    if let Some(color) = text(style, "color") {
        parts.push(format!("color: {};", color));
    }
    if let Some(width) = text(style, "width") {
        parts.push(format!("width: {};", width));
    }
    if let Some(height) = text(style, "height") {
        parts.push(format!("height: {};", height));
    }

    parts.join(" ")
}

/// `{top, right, bottom, left}` in px; missing sides are 0.
fn box_sides(value: &Value) -> String {
    let side = |name: &str| {
        value
            .get(name)
            .and_then(value_as_f64)
            .map(format_number)
            .unwrap_or_else(|| "0".to_string())
    };
    format!(
        "{}px {}px {}px {}px",
        side("top"),
        side("right"),
        side("bottom"),
        side("left")
    )
}

fn present<'a>(style: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    style.get(key).filter(|v| !v.is_null())
}

fn text(style: &Map<String, Value>, key: &str) -> Option<String> {
    present(style, key)
        .and_then(value_text)
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_full_style_order() {
        let style = map(json!({
            "color": "#242424",
            "padding": { "top": 8, "right": 0, "bottom": 8, "left": 0 },
            "fontSize": 14,
            "textAlign": "left"
        }));

        assert_eq!(
            style_string(&style),
            "padding: 8px 0px 8px 0px; text-align: left; font-size: 14px; color: #242424;"
        );
    }

    #[test]
    fn test_missing_sides_are_zero() {
        let style = map(json!({ "margin": { "top": 4 } }));
        assert_eq!(style_string(&style), "margin: 4px 0px 0px 0px;");
    }

    #[test]
    fn test_empty_style() {
        assert_eq!(style_string(&Map::new()), "");
    }
}
