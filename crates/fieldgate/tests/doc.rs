use fieldgate::{DocError, Engine, EngineEvent, FieldKind, FormDoc, doc_schema};

const ORDER_FORM: &str = include_str!("fixtures/order_form.json");

#[test]
fn fixture_parses_and_round_trips() {
    let doc = FormDoc::from_json(ORDER_FORM).expect("fixture parses");
    assert_eq!(doc.id, "order");
    assert_eq!(doc.fields.len(), 7);

    let json = serde_json::to_string(&doc).expect("serializes");
    let back = FormDoc::from_json(&json).expect("round trips");
    assert_eq!(doc, back);
}

#[test]
fn registry_conversion_maps_kinds() {
    let doc = FormDoc::from_json(ORDER_FORM).unwrap();
    let registry = doc.build_registry().expect("converts");

    assert!(matches!(
        registry.get("country").unwrap().kind,
        FieldKind::Scalar { .. }
    ));
    assert!(matches!(
        registry.get("hasDiscount").unwrap().kind,
        FieldKind::Checkbox { .. }
    ));
    assert!(matches!(
        registry.get("tags").unwrap().kind,
        FieldKind::CheckboxGroup { .. }
    ));
    assert!(matches!(
        registry.get("shipping").unwrap().kind,
        FieldKind::Fieldset
    ));
    assert_eq!(
        registry.get("note").unwrap().parent.as_deref(),
        Some("shipping")
    );
}

#[test]
fn fixture_drives_the_engine() {
    let doc = FormDoc::from_json(ORDER_FORM).unwrap();
    let mut engine = Engine::new(doc.build_registry().unwrap());
    engine.take_events();

    assert_eq!(engine.is_visible("state"), Some(true));
    assert_eq!(engine.is_visible("discountCode"), Some(false));
    assert_eq!(engine.is_visible("note"), Some(false));

    engine.set_option_checked("tags", "fragile", true);
    let events = engine.take_events();
    assert_eq!(engine.is_visible("note"), Some(true));
    // The note lives in a collapsed fieldset; revealing it opens the
    // container first.
    assert!(events.contains(&EngineEvent::AncestorOpened("shipping".into())));
    assert_eq!(engine.is_required("note"), Some(false));

    engine.set_option_checked("tags", "express", true);
    assert_eq!(engine.is_required("note"), Some(true));
}

#[test]
fn duplicate_field_is_rejected() {
    let doc = FormDoc::from_json(
        r#"{"id":"x","fields":[{"name":"a"},{"name":"a"}]}"#,
    )
    .unwrap();
    assert!(matches!(
        doc.build_registry(),
        Err(DocError::DuplicateField(name)) if name == "a"
    ));
}

#[test]
fn unknown_parent_is_rejected() {
    let doc = FormDoc::from_json(
        r#"{"id":"x","fields":[{"name":"a","parent":"ghost"}]}"#,
    )
    .unwrap();
    assert!(matches!(
        doc.build_registry(),
        Err(DocError::UnknownParent { parent, .. }) if parent == "ghost"
    ));
}

#[test]
fn group_without_options_is_rejected() {
    let doc = FormDoc::from_json(r#"{"id":"x","fields":[{"name":"a","kind":"radio"}]}"#).unwrap();
    assert!(matches!(
        doc.build_registry(),
        Err(DocError::EmptyGroup(name)) if name == "a"
    ));
}

#[test]
fn schema_describes_the_document() {
    let schema = doc_schema();
    let props = schema
        .get("properties")
        .and_then(|value| value.as_object())
        .expect("schema has properties");
    assert!(props.contains_key("id"));
    assert!(props.contains_key("fields"));
}
