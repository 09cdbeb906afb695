//! Paged table demo.
//!
//! Drives a `MarkedModel` the way a checkbox table over a paginated photo
//! list would, and prints each page after every action.
//!
//! Run with `RUST_LOG=markset=debug cargo run -p markset --example paged_table`.

use markset::{CheckState, MarkedModel, MarkedModelConfig};
use serde_json::{Value, json};
use tracing_subscriber::EnvFilter;

const TOTAL: usize = 23;
const PAGE_SIZE: usize = 5;

fn page(index: usize) -> Vec<Value> {
    let start = index * PAGE_SIZE + 1;
    let end = (start + PAGE_SIZE).min(TOTAL + 1);
    (start..end)
        .map(|id| json!({"albumId": 1 + id / 50, "id": id, "title": format!("photo {id}")}))
        .collect()
}

fn glyph(state: CheckState) -> &'static str {
    match state {
        CheckState::Unchecked => "[ ]",
        CheckState::PartiallyChecked => "[-]",
        CheckState::Checked => "[x]",
    }
}

fn render(model: &MarkedModel<Value>, page_index: usize, action: &str) {
    println!("\n== {action}");
    println!(
        "{} select all ({} of {TOTAL} selected)",
        glyph(model.header_check_state()),
        model.selected_count(TOTAL)
    );
    for record in page(page_index) {
        println!("  {} {}", glyph(model.check_state(&record)), record["title"]);
    }
}

fn main() -> markset::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = MarkedModelConfig::from_toml_str("multiple = true")?;
    let mut model = MarkedModel::<Value>::from_config(&config);

    model.changed.connect(|change| {
        println!(
            "  ({} changed: +{} -{})",
            change.source,
            change.added.len(),
            change.removed.len()
        );
    });
    model.inversion_changed.connect(|inverted| {
        println!("  (inverted -> {inverted})");
    });

    let first = page(0);
    render(&model, 0, "initial");

    model.toggle(&first[0])?;
    model.toggle(&first[2])?;
    render(&model, 0, "toggle rows 1 and 3");

    model.toggle_select_all();
    render(&model, 0, "header click on partial selection");

    model.toggle_select_all();
    render(&model, 0, "header click selects everything");

    let third = page(2);
    model.toggle(&third[4])?;
    render(&model, 2, "untick one row on page 3");

    println!("\nsnapshot: {}", serde_json::to_string(&model.marked())?);

    model.dispose();
    Ok(())
}
