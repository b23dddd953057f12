//! Mutation tests against the built-in block kinds

use missive_blocks::MAX_COLUMNS;
use missive_editor::{
    render_document_static, DataOverrides, Document, Mutation, ParentRef, Placement, Registry,
};
use serde_json::json;

fn setup() -> (Document, Registry) {
    let registry = Registry::with_builtin_blocks();
    let doc = Document::new(&registry, "root").unwrap();
    (doc, registry)
}

fn root_children(doc: &Document) -> Vec<String> {
    doc.root().unwrap().data.children_ids.clone().unwrap_or_default()
}

#[test]
fn test_add_blocks_in_order() {
    let (mut doc, registry) = setup();
    let text = doc.add_block(&registry, "Text", None, None).unwrap();
    let heading = doc.add_block(&registry, "Heading", None, None).unwrap();

    assert_eq!(root_children(&doc), vec![text, heading]);
}

#[test]
fn test_missing_parent_falls_back_to_root() {
    let (mut doc, registry) = setup();
    let id = doc
        .add_block(&registry, "Text", None, Some("doesNotExist"))
        .unwrap();

    assert_eq!(root_children(&doc), vec![id.clone()]);
    assert_eq!(doc.find_parent(&id), Some(ParentRef::normal("root")));
}

#[test]
fn test_add_to_nested_container() {
    let (mut doc, registry) = setup();
    let container = doc.add_block(&registry, "Container", None, None).unwrap();
    let text = doc.add_block(&registry, "Text", None, Some(&container)).unwrap();

    assert_eq!(root_children(&doc), vec![container.clone()]);
    assert_eq!(
        doc.get(&container).unwrap().data.children_ids,
        Some(vec![text.clone()])
    );
    assert_eq!(doc.find_parent(&text), Some(ParentRef::normal(container)));
}

#[test]
fn test_add_to_column() {
    let (mut doc, registry) = setup();
    let cols = doc.add_block(&registry, "Columns", None, None).unwrap();
    let child = doc.add_block_to_column(&registry, "Text", &cols, 0).unwrap();

    assert_eq!(
        doc.get(&cols).unwrap().data.column_children_ids,
        Some(vec![vec![child.clone()], vec![]])
    );
    assert_eq!(doc.find_parent(&child), Some(ParentRef::column(cols, 0)));
}

#[test]
fn test_add_to_column_initializes_lists() {
    let (mut doc, registry) = setup();
    let cols = doc.add_block(&registry, "Columns", None, None).unwrap();
    {
        let data = &mut doc.get_mut(&cols).unwrap().data;
        data.column_children_ids = None;
        data.props.insert("columns".into(), json!(3));
    }

    let child = doc.add_block_to_column(&registry, "Spacer", &cols, 2).unwrap();
    assert_eq!(
        doc.get(&cols).unwrap().data.column_children_ids,
        Some(vec![vec![], vec![], vec![child]])
    );
}

#[test]
fn test_add_to_column_of_non_columns_block_goes_to_root() {
    let (mut doc, registry) = setup();
    let text = doc.add_block(&registry, "Text", None, None).unwrap();
    let id = doc.add_block_to_column(&registry, "Spacer", &text, 0).unwrap();

    assert_eq!(root_children(&doc), vec![text, id]);
}

#[test]
fn test_delete_block() {
    let (mut doc, registry) = setup();
    let text = doc.add_block(&registry, "Text", None, None).unwrap();
    let heading = doc.add_block(&registry, "Heading", None, None).unwrap();

    let removed = doc.delete_block(&text);

    assert_eq!(removed, vec![text.clone()]);
    assert_eq!(root_children(&doc), vec![heading]);
    assert!(doc.get(&text).is_none());
}

#[test]
fn test_delete_root_and_unknown_are_noops() {
    let (mut doc, registry) = setup();
    doc.add_block(&registry, "Text", None, None).unwrap();
    let before = doc.clone();

    assert!(doc.delete_block("root").is_empty());
    assert!(doc.delete_block("block-404").is_empty());
    assert_eq!(doc, before);
}

#[test]
fn test_ids_never_reused() {
    let (mut doc, registry) = setup();
    let first = doc.add_block(&registry, "Text", None, None).unwrap();
    doc.delete_block(&first);
    let second = doc.add_block(&registry, "Text", None, None).unwrap();

    assert_ne!(first, second);
}

#[test]
fn test_move_up_and_down_at_boundaries() {
    let (mut doc, registry) = setup();
    let a = doc.add_block(&registry, "Text", None, None).unwrap();
    let b = doc.add_block(&registry, "Text", None, None).unwrap();

    assert!(!doc.move_up(&a));
    assert!(!doc.move_down(&b));
    assert_eq!(root_children(&doc), vec![a.clone(), b.clone()]);

    assert!(doc.move_up(&b));
    assert_eq!(root_children(&doc), vec![b, a]);
}

#[test]
fn test_move_within_column() {
    let (mut doc, registry) = setup();
    let cols = doc.add_block(&registry, "Columns", None, None).unwrap();
    let a = doc.add_block_to_column(&registry, "Text", &cols, 1).unwrap();
    let b = doc.add_block_to_column(&registry, "Text", &cols, 1).unwrap();

    assert!(doc.move_down(&a));
    assert_eq!(
        doc.get(&cols).unwrap().data.column_children_ids,
        Some(vec![vec![], vec![b, a]])
    );
}

#[test]
fn test_move_after() {
    let (mut doc, registry) = setup();
    let a = doc.add_block(&registry, "Text", None, None).unwrap();
    let b = doc.add_block(&registry, "Text", None, None).unwrap();
    let c = doc.add_block(&registry, "Text", None, None).unwrap();

    assert!(doc.move_after(&a, &c));
    assert_eq!(root_children(&doc), vec![b.clone(), c.clone(), a.clone()]);

    assert!(doc.move_after(&c, &a));
    assert_eq!(root_children(&doc), vec![b.clone(), a.clone(), c.clone()]);

    assert!(!doc.move_after(&a, &a));
    assert!(!doc.move_after(&a, "nope"));
}

#[test]
fn test_move_after_ignores_nested_blocks() {
    let (mut doc, registry) = setup();
    let container = doc.add_block(&registry, "Container", None, None).unwrap();
    let nested = doc.add_block(&registry, "Text", None, Some(&container)).unwrap();
    let top = doc.add_block(&registry, "Text", None, None).unwrap();

    assert!(!doc.move_after(&nested, &top));
    assert_eq!(root_children(&doc), vec![container, top]);
}

#[test]
fn test_resize_columns_grow_and_shrink() {
    let (mut doc, registry) = setup();
    let cols = doc.add_block(&registry, "Columns", None, None).unwrap();
    let kept = doc.add_block_to_column(&registry, "Text", &cols, 0).unwrap();
    let dropped = doc.add_block_to_column(&registry, "Text", &cols, 1).unwrap();

    doc.resize_columns(&registry, &cols, 3).unwrap();
    let data = &doc.get(&cols).unwrap().data;
    assert_eq!(data.props["columns"], json!(3));
    assert_eq!(
        data.column_children_ids,
        Some(vec![vec![kept.clone()], vec![dropped.clone()], vec![]])
    );
    assert_eq!(data.props["columnWidths"][2], json!("33.333333333333336%"));

    let removed = doc.resize_columns(&registry, &cols, 1).unwrap();
    assert_eq!(removed, vec![dropped.clone()]);
    assert!(!doc.contains(&dropped));
    assert_eq!(
        doc.get(&cols).unwrap().data.column_children_ids,
        Some(vec![vec![kept]])
    );
    assert!(doc.orphans().is_empty());
}

#[test]
fn test_resize_unknown_or_plain_block_is_noop() {
    let (mut doc, registry) = setup();
    let text = doc.add_block(&registry, "Text", None, None).unwrap();
    let before = doc.clone();

    assert_eq!(doc.resize_columns(&registry, "nope", 3), None);
    assert_eq!(doc.resize_columns(&registry, &text, 3), None);
    assert_eq!(doc, before);

    let result = Mutation::ResizeColumns {
        block_id: "nope".into(),
        columns: 3,
    }
    .apply(&mut doc, &registry)
    .unwrap();
    assert!(!result.changed);
}

#[test]
fn test_resize_caps_column_count() {
    let (mut doc, registry) = setup();
    let cols = doc.add_block(&registry, "Columns", None, None).unwrap();

    doc.resize_columns(&registry, &cols, usize::MAX).unwrap();
    let data = &doc.get(&cols).unwrap().data;
    assert_eq!(data.column_children_ids.as_ref().unwrap().len(), MAX_COLUMNS);
    assert_eq!(data.props["columnWidths"].as_array().unwrap().len(), MAX_COLUMNS);
}

#[test]
fn test_add_columns_with_overridden_count() {
    let (mut doc, registry) = setup();
    let overrides = DataOverrides::new().with_props(
        json!({ "columns": 3 }).as_object().cloned().unwrap(),
    );
    let cols = doc
        .add_block(&registry, "Columns", Some(&overrides), None)
        .unwrap();

    let data = &doc.get(&cols).unwrap().data;
    assert_eq!(data.column_count(), 3);
    assert_eq!(data.column_children_ids, Some(vec![vec![], vec![], vec![]]));

    let html = render_document_static(&doc, &registry).unwrap();
    assert_eq!(html.matches("class=\"column-children\"").count(), 3);
}

#[test]
fn test_mutations_on_missing_blocks_are_noops() {
    let (mut doc, registry) = setup();
    let before = doc.clone();

    assert_eq!(doc.reparent(&registry, "nope", &Placement::children("root")), Ok(false));
    assert_eq!(doc.set_field(&registry, "nope", "props.text", json!("x")), Ok(None));
    assert_eq!(doc, before);
}

#[test]
fn test_mutation_enum_applies() {
    let (mut doc, registry) = setup();
    let result = Mutation::AddBlock {
        kind: "Image".into(),
        overrides: None,
        parent_id: None,
    }
    .apply(&mut doc, &registry)
    .unwrap();

    let id = result.created.unwrap();
    Mutation::SetField {
        block_id: id.clone(),
        path: "props.alt".into(),
        value: json!("Logo"),
    }
    .apply(&mut doc, &registry)
    .unwrap();

    assert_eq!(doc.get(&id).unwrap().data.props["alt"], json!("Logo"));
}
