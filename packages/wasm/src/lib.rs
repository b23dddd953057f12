use missive_blocks::{EditorField, FieldInput};
use missive_compiler_html::compile_session;
use missive_editor::{DataOverrides, EditSession, EditorOptions, Placement, Registry};
use serde_json::{json, Value};
use std::sync::Arc;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

fn js_error(context: &str, err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&format!("{}: {}", context, err))
}

fn parse_json<T: serde::de::DeserializeOwned>(context: &str, source: &str) -> Result<T, JsValue> {
    serde_json::from_str(source).map_err(|e| js_error(context, e))
}

fn field_json(field: &EditorField) -> Value {
    let (input, options) = match &field.input {
        FieldInput::Text => ("text", Value::Null),
        FieldInput::TextArea => ("textarea", Value::Null),
        FieldInput::Number => ("number", Value::Null),
        FieldInput::Color => ("color", Value::Null),
        FieldInput::Select(options) => (
            "select",
            options
                .iter()
                .map(|(value, label)| json!({ "value": value, "label": label }))
                .collect(),
        ),
    };
    json!({
        "path": field.path.to_string(),
        "label": field.label,
        "input": input,
        "options": options,
    })
}

/// Browser-facing editor bound to one document.
///
/// Structured arguments (overrides, field values, options) cross the boundary
/// as JSON strings.
#[wasm_bindgen]
pub struct EmailEditor {
    session: EditSession,
}

#[wasm_bindgen]
impl EmailEditor {
    /// `options_json` follows `EditorOptions` (`rootId`, `projectTitle`,
    /// `emailSubject`); omitted keys take their defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(options_json: Option<String>) -> Result<EmailEditor, JsValue> {
        let options: EditorOptions = match options_json.as_deref() {
            Some(source) => parse_json("Invalid options", source)?,
            None => EditorOptions::default(),
        };
        let registry = Arc::new(Registry::with_builtin_blocks());
        let session = EditSession::new(registry, options).map_err(|e| js_error("Editor error", e))?;
        Ok(EmailEditor { session })
    }

    #[wasm_bindgen(getter)]
    pub fn version(&self) -> f64 {
        self.session.version as f64
    }

    #[wasm_bindgen(js_name = listKinds)]
    pub fn list_kinds(&self) -> Vec<String> {
        self.session
            .registry()
            .list_kinds()
            .into_iter()
            .map(String::from)
            .collect()
    }

    #[wasm_bindgen(js_name = addBlock)]
    pub fn add_block(
        &mut self,
        kind: &str,
        parent_id: Option<String>,
        overrides_json: Option<String>,
    ) -> Result<String, JsValue> {
        let overrides: Option<DataOverrides> = overrides_json
            .as_deref()
            .map(|source| parse_json("Invalid overrides", source))
            .transpose()?;
        self.session
            .add_block(kind, overrides, parent_id.as_deref())
            .map_err(|e| js_error("Add failed", e))
    }

    #[wasm_bindgen(js_name = addBlockToColumn)]
    pub fn add_block_to_column(
        &mut self,
        kind: &str,
        columns_block_id: &str,
        column_index: u32,
    ) -> Result<String, JsValue> {
        self.session
            .add_block_to_column(kind, columns_block_id, column_index as usize)
            .map_err(|e| js_error("Add failed", e))
    }

    /// Delete a block and its descendants. The host confirms with the user
    /// before calling. Returns the removed ids.
    #[wasm_bindgen(js_name = deleteBlock)]
    pub fn delete_block(&mut self, block_id: &str) -> Result<Vec<String>, JsValue> {
        self.session
            .delete_block(block_id, |_| true)
            .map_err(|e| js_error("Delete failed", e))
    }

    #[wasm_bindgen(js_name = moveUp)]
    pub fn move_up(&mut self, block_id: &str) -> Result<bool, JsValue> {
        self.session.move_up(block_id).map_err(|e| js_error("Move failed", e))
    }

    #[wasm_bindgen(js_name = moveDown)]
    pub fn move_down(&mut self, block_id: &str) -> Result<bool, JsValue> {
        self.session.move_down(block_id).map_err(|e| js_error("Move failed", e))
    }

    #[wasm_bindgen(js_name = moveAfter)]
    pub fn move_after(&mut self, block_id: &str, after_id: &str) -> Result<bool, JsValue> {
        self.session
            .move_after(block_id, after_id)
            .map_err(|e| js_error("Move failed", e))
    }

    /// Move a block under another container, or into a column when
    /// `column` is given. Omitting `index` appends.
    pub fn reparent(
        &mut self,
        block_id: &str,
        parent_id: &str,
        column: Option<u32>,
        index: Option<u32>,
    ) -> Result<(), JsValue> {
        let mut placement = match column {
            Some(column) => Placement::column(parent_id, column as usize),
            None => Placement::children(parent_id),
        };
        if let Some(index) = index {
            placement = placement.at(index as usize);
        }
        self.session
            .reparent(block_id, placement)
            .map_err(|e| js_error("Move failed", e))
    }

    #[wasm_bindgen(js_name = resizeColumns)]
    pub fn resize_columns(&mut self, block_id: &str, columns: u32) -> Result<Vec<String>, JsValue> {
        self.session
            .resize_columns(block_id, columns as usize)
            .map_err(|e| js_error("Resize failed", e))
    }

    /// `value_json` is any JSON value, e.g. `"\"Hello\""` or `"18"`.
    #[wasm_bindgen(js_name = setField)]
    pub fn set_field(&mut self, block_id: &str, path: &str, value_json: &str) -> Result<(), JsValue> {
        let value: Value = parse_json("Invalid value", value_json)?;
        self.session
            .set_field(block_id, path, value)
            .map_err(|e| js_error("Update failed", e))
    }

    pub fn select(&mut self, block_id: &str) -> bool {
        self.session.select(block_id)
    }

    #[wasm_bindgen(getter)]
    pub fn selected(&self) -> Option<String> {
        self.session.selected().map(String::from)
    }

    /// Editable fields of a block as a JSON array.
    #[wasm_bindgen(js_name = editorFields)]
    pub fn editor_fields(&self, block_id: &str) -> Result<String, JsValue> {
        let fields = self
            .session
            .editor_fields(block_id)
            .map_err(|e| js_error("Lookup failed", e))?;
        let fields: Vec<Value> = fields.iter().map(field_json).collect();
        Ok(Value::Array(fields).to_string())
    }

    #[wasm_bindgen(js_name = renderPreview)]
    pub fn render_preview(&mut self) -> Result<String, JsValue> {
        self.session
            .render_preview()
            .map_err(|e| js_error("Render error", e))
    }

    #[wasm_bindgen(js_name = exportJson)]
    pub fn export_json(&self) -> Result<String, JsValue> {
        self.session
            .export_json()
            .map_err(|e| js_error("Serialization error", e))
    }

    #[wasm_bindgen(js_name = exportHtml)]
    pub fn export_html(&self) -> Result<String, JsValue> {
        compile_session(&self.session).map_err(|e| js_error("Compile error", e))
    }

    #[wasm_bindgen(js_name = importJson)]
    pub fn import_json(&mut self, json: &str) -> Result<(), JsValue> {
        self.session
            .import_json(json)
            .map_err(|e| js_error("Import failed", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_editor_workflow() {
        let mut editor = EmailEditor::new(None).unwrap();
        assert_eq!(editor.list_kinds()[0], "Container");

        let id = editor
            .add_block("Text", None, Some(r#"{"props":{"text":"Hello"}}"#.into()))
            .unwrap();
        assert_eq!(editor.selected(), Some(id.clone()));

        editor.set_field(&id, "style.fontSize", "18").unwrap();
        let preview = editor.render_preview().unwrap();
        assert!(preview.contains("font-size: 18px;"));
        assert!(preview.contains("Hello"));

        let html = editor.export_html().unwrap();
        assert!(html.contains("<title>Email Template</title>"));
    }

    #[test]
    fn test_export_import_round_trip() {
        let mut editor = EmailEditor::new(Some(r#"{"emailSubject":"Weekly digest"}"#.into())).unwrap();
        let columns = editor.add_block("Columns", None, None).unwrap();
        editor.add_block_to_column("Button", &columns, 1).unwrap();
        let exported = editor.export_json().unwrap();

        let mut other = EmailEditor::new(None).unwrap();
        other.import_json(&exported).unwrap();
        assert_eq!(other.export_json().unwrap(), exported);
        assert!(editor.export_html().unwrap().contains("<title>Weekly digest</title>"));
    }

    #[test]
    fn test_editor_fields_json() {
        let mut editor = EmailEditor::new(None).unwrap();
        let id = editor.add_block("Columns", None, None).unwrap();
        let fields: Value = serde_json::from_str(&editor.editor_fields(&id).unwrap()).unwrap();
        assert_eq!(fields[0]["path"], "props.columns");
        assert_eq!(fields[0]["input"], "select");
        assert_eq!(fields[1]["input"], "number");
    }
}
