//! Tests for loosely-typed JSON records keyed by a configured field.

use markset::model::MarkedModelBuilder;
use markset::{CheckState, Error, MarkedModel, MarkedModelConfig};
use serde_json::{Value, json};

fn photos() -> Vec<Value> {
    (1..=5)
        .map(|id| {
            json!({
                "albumId": 1 + id / 3,
                "id": id,
                "title": format!("photo {id}"),
                "url": format!("https://example.invalid/{id}.png"),
            })
        })
        .collect()
}

#[test]
fn default_key_field_is_id() {
    let mut model = MarkedModel::<Value>::from_config(&MarkedModelConfig::new().with_multiple(true));
    let page = photos();

    model.mark(&page[..2]).unwrap();

    assert_eq!(model.marked_keys().collect::<Vec<_>>(), vec!["1", "2"]);
    assert!(model.is_marked(&json!({"id": 1, "title": "different payload"})));
}

#[test]
fn custom_key_field_from_toml() {
    let config = MarkedModelConfig::from_toml_str(
        r#"
        multiple = true
        key_field = "albumId"
        "#,
    )
    .unwrap();
    let mut model = MarkedModel::<Value>::from_config(&config);
    let page = photos();

    model.mark(&page).unwrap();

    // Photos sharing an album collapse onto one key.
    assert_eq!(model.marked_keys().collect::<Vec<_>>(), vec!["1", "2"]);
    assert_eq!(model.marked_count(), 2);
}

#[test]
fn record_without_key_is_rejected_before_mutation() {
    let mut model = MarkedModel::<Value>::with_key_field(true, "id");
    let good = json!({"id": 1});
    let bad = json!({"title": "no id"});

    let err = model.mark(&[good.clone(), bad.clone()]).unwrap_err();

    assert!(matches!(err, Error::MissingKey { ref field } if field == "id"));
    assert!(model.is_markation_empty());
    assert!(!model.is_marked(&bad));
    assert!(model.toggle(&bad).is_err());
}

#[test]
fn builder_from_json_config_marks_initial_records_silently() {
    let config = MarkedModelConfig::from_json_str(r#"{"multiple": false, "emitChanges": true}"#).unwrap();
    let page = photos();
    let model = MarkedModelBuilder::<Value>::from_config(config)
        .initially_marked(page.iter().cloned())
        .build()
        .unwrap();

    assert!(!model.is_multiple_selection());
    assert_eq!(model.marked().marked_items(), &page[..1]);
}

#[test]
fn page_rendering_under_select_all() {
    let mut model = MarkedModel::<Value>::with_key_field(true, "id");
    let page = photos();

    model.select_all();
    model.deselect(&[page[1].clone()]).unwrap();

    let states: Vec<CheckState> = page.iter().map(|p| model.check_state(p)).collect();
    assert_eq!(
        states,
        vec![
            CheckState::Checked,
            CheckState::Unchecked,
            CheckState::Checked,
            CheckState::Checked,
            CheckState::Checked,
        ]
    );
    assert_eq!(model.header_check_state(), CheckState::PartiallyChecked);
    assert_eq!(model.selected_in(&page).len(), 4);
    assert_eq!(model.selected_count(5000), 4999);

    let snapshot = serde_json::to_value(model.marked()).unwrap();
    assert_eq!(snapshot["containSelected"], json!(true));
    assert_eq!(snapshot["markedItems"][0]["id"], json!(2));
}
