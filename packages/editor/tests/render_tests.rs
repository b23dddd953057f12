//! Render pipeline tests

use missive_editor::{
    render_document_editable, render_document_static, render_editable, render_static,
    serialization, Document, Registry,
};
use serde_json::json;

fn setup() -> (Document, Registry) {
    let registry = Registry::with_builtin_blocks();
    let doc = Document::new(&registry, "root").unwrap();
    (doc, registry)
}

#[test]
fn test_empty_root() {
    let (doc, registry) = setup();

    assert_eq!(render_document_static(&doc, &registry).unwrap(), "");
    assert_eq!(
        render_document_editable(&doc, &registry).unwrap(),
        "<div class=\"container-empty-placeholder\" style=\"padding: 20px; text-align: center; color: #999;\">No content blocks yet. Drag blocks from the sidebar to add content.</div>"
    );
}

#[test]
fn test_static_blocks_in_order() {
    let (mut doc, registry) = setup();
    doc.add_block(&registry, "Text", None, None).unwrap();
    doc.add_block(&registry, "Heading", None, None).unwrap();

    let html = render_document_static(&doc, &registry).unwrap();
    let text = html.find("<p class=\"block-text\"").unwrap();
    let heading = html.find("<h1 class=\"block-heading\"").unwrap();
    assert!(text < heading);
    assert!(!html.contains("block-wrapper"));
    assert!(!html.contains("{{"));
}

#[test]
fn test_columns_with_one_child() {
    let (mut doc, registry) = setup();
    let cols = doc.add_block(&registry, "Columns", None, None).unwrap();
    let child = doc.add_block_to_column(&registry, "Text", &cols, 0).unwrap();

    let html = render_static(&doc, &registry, &cols);
    assert_eq!(html.matches("<p class=\"block-text\"").count(), 1);
    assert!(!html.contains("column-empty-placeholder"));
    let first_column = html.find("<div class=\"column-children\">").unwrap();
    let text = html.find("block-text").unwrap();
    let second_column = html.rfind("<div class=\"column-children\">").unwrap();
    assert!(first_column < text && text < second_column);

    let html = render_editable(&doc, &registry, &cols);
    assert_eq!(html.matches("column-empty-placeholder").count(), 1);
    assert!(html.contains(&format!("data-block-id=\"{}\"", child)));
    let placeholder = html.find("column-empty-placeholder").unwrap();
    let column_one = html.find("data-column-index=\"1\"").unwrap();
    assert!(column_one < placeholder);
}

#[test]
fn test_resized_columns_render_three_cells() {
    let (mut doc, registry) = setup();
    let cols = doc.add_block(&registry, "Columns", None, None).unwrap();
    doc.add_block_to_column(&registry, "Text", &cols, 0).unwrap();
    doc.resize_columns(&registry, &cols, 3).unwrap();

    let html = render_static(&doc, &registry, &cols);
    assert_eq!(html.matches("<td style=\"width: 33.333333333333336%;").count(), 3);
    assert_eq!(html.matches("block-text").count(), 1);
}

#[test]
fn test_unnormalized_columns_render_virtually() {
    let (mut doc, registry) = setup();
    let cols = doc.add_block(&registry, "Columns", None, None).unwrap();
    let hidden = doc.add_block_to_column(&registry, "Spacer", &cols, 1).unwrap();
    {
        let data = &mut doc.get_mut(&cols).unwrap().data;
        data.props.insert("columns".into(), json!(1));
        data.props.remove("columnWidths");
    }
    let before = doc.clone();

    let html = render_editable(&doc, &registry, &cols);
    assert_eq!(html.matches("<td ").count(), 1);
    assert!(!html.contains(&hidden));
    assert_eq!(doc, before);
}

#[test]
fn test_render_is_idempotent() {
    let (mut doc, registry) = setup();
    let cols = doc.add_block(&registry, "Columns", None, None).unwrap();
    doc.add_block_to_column(&registry, "Button", &cols, 1).unwrap();
    doc.add_block(&registry, "Image", None, None).unwrap();

    let first = render_document_editable(&doc, &registry).unwrap();
    let second = render_document_editable(&doc, &registry).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_user_text_with_placeholder_token_is_not_substituted() {
    let (mut doc, registry) = setup();
    let container = doc.add_block(&registry, "Container", None, None).unwrap();
    let text = doc.add_block(&registry, "Text", None, Some(&container)).unwrap();
    doc.set_field(&registry, &text, "props.text", json!("literal {{children}}"))
        .unwrap();

    let html = render_static(&doc, &registry, &container);
    assert!(html.contains("literal {{children}}"));
    assert_eq!(html.matches("block-text").count(), 1);
}

#[test]
fn test_imported_oversized_column_count_renders_capped() {
    let registry = Registry::with_builtin_blocks();
    let json = r#"{
        "root": { "kind": "Container", "data": { "childrenIds": ["c"] } },
        "c": { "kind": "Columns", "data": { "props": { "columns": 1e20 } } }
    }"#;
    let mut doc = serialization::from_json(json, &registry, "root").unwrap();

    let html = render_document_static(&doc, &registry).unwrap();
    assert_eq!(
        html.matches("class=\"column-children\"").count(),
        missive_blocks::MAX_COLUMNS
    );

    doc.normalize_columns(&registry);
    let lists = doc.get("c").unwrap().data.column_children_ids.as_ref().unwrap();
    assert_eq!(lists.len(), missive_blocks::MAX_COLUMNS);
}
