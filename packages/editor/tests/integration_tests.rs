//! Integration tests for editor crate

use missive_editor::serialization::{from_json, to_json};
use missive_editor::{
    render_document_static, DataOverrides, EditSession, EditorOptions, Placement, Registry,
};
use serde_json::json;
use std::sync::Arc;

fn session() -> EditSession {
    EditSession::new(
        Arc::new(Registry::with_builtin_blocks()),
        EditorOptions::default(),
    )
    .unwrap()
}

fn props(value: serde_json::Value) -> DataOverrides {
    DataOverrides::new().with_props(value.as_object().cloned().unwrap())
}

#[test]
fn test_edit_session_workflow() -> anyhow::Result<()> {
    let mut session = session();

    let heading = session.add_block("Heading", Some(props(json!({ "text": "Hello", "level": "h2" }))), None)?;
    let cols = session.add_block("Columns", None, None)?;
    let left = session.add_block_to_column("Text", &cols, 0)?;
    let right = session.add_block_to_column("Button", &cols, 1)?;
    session.set_field(&left, "props.text", json!("Left side"))?;
    session.set_field(&right, "props.link", json!("https://example.com/signup"))?;

    assert_eq!(session.selected(), Some(right.as_str()));
    assert_eq!(session.version, 6);

    let preview = session.render_preview()?;
    assert!(preview.contains(&format!("data-block-id=\"{}\"", heading)));
    assert!(preview.contains("Left side"));

    let html = session.render_static()?;
    assert!(html.starts_with("<h2 class=\"block-heading\""));
    assert!(html.contains("href=\"https://example.com/signup\""));
    assert!(!html.contains("block-controls"));
    Ok(())
}

#[test]
fn test_round_trip_renders_identically() -> anyhow::Result<()> {
    let mut session = session();
    let container = session.add_block("Container", None, None)?;
    session.add_block("Text", None, Some(&container))?;
    let cols = session.add_block("Columns", None, None)?;
    session.add_block_to_column("Image", &cols, 1)?;
    session.resize_columns(&cols, 3)?;
    session.add_block("Divider", None, None)?;

    let json = to_json(session.document())?;
    let restored = from_json(&json, session.registry(), "root")?;

    assert_eq!(&restored, session.document());
    assert_eq!(to_json(&restored)?, json);
    assert_eq!(
        render_document_static(&restored, session.registry())?,
        session.render_static()?
    );
    Ok(())
}

#[test]
fn test_import_preserves_legacy_root_keys() -> anyhow::Result<()> {
    let json = r##"{
  "root": {
    "type": "Container",
    "data": {
      "backdropColor": "#F8F8F8",
      "canvasColor": "#FFFFFF",
      "textColor": "#242424",
      "fontFamily": "Arial, sans-serif",
      "childrenIds": ["block-1"]
    }
  },
  "block-1": {
    "type": "Spacer",
    "data": { "style": {}, "props": { "height": 32 } }
  }
}"##;

    let mut session = session();
    session.import_json(json)?;

    let root = session.document().root().unwrap();
    assert_eq!(root.data.extra["canvasColor"], json!("#FFFFFF"));
    assert!(session.render_static()?.contains("height: 32px"));

    let exported: serde_json::Value = serde_json::from_str(&session.export_json()?)?;
    assert_eq!(exported["root"]["data"]["fontFamily"], json!("Arial, sans-serif"));
    assert_eq!(exported["root"]["kind"], json!("Container"));
    Ok(())
}

#[test]
fn test_reparent_through_session() -> anyhow::Result<()> {
    let mut session = session();
    let container = session.add_block("Container", None, None)?;
    let text = session.add_block("Text", None, None)?;

    session.reparent(&text, Placement::children(container.clone()))?;
    assert!(session.reparent(&container, Placement::children(container.clone())).is_err());

    let root = session.document().root().unwrap();
    assert_eq!(root.data.children_ids, Some(vec![container.clone()]));
    Ok(())
}

#[test]
fn test_render_preview_normalizes_columns() -> anyhow::Result<()> {
    let mut session = session();
    let json = r#"{
        "root": { "kind": "Container", "data": { "childrenIds": ["cols"] } },
        "cols": { "kind": "Columns", "data": { "props": { "columns": 3 } } }
    }"#;
    session.import_json(json)?;

    session.render_preview()?;
    let cols = session.document().get("cols").unwrap();
    assert_eq!(cols.data.column_children_ids, Some(vec![vec![], vec![], vec![]]));
    Ok(())
}
