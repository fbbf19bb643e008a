//! Benchmarks for snippet generation and highlighting.
//!
//! Run with: cargo bench -p specimen_snippet

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use serde_json::json;
use specimen_knobs::{
    scan_templates, CssValue, DemoId, KnobEntry, KnobValues, SlotValue, TemplateRegistry,
};
use specimen_snippet::{generate_markup, highlight, Grammar, SnippetInput};

// =============================================================================
// Test Data
// =============================================================================

const TEMPLATES: &str = r#"
<template data-element="data-grid" data-target="prefix">
  <h2 id="grid-title">Users</h2>
</template>
<template data-element="data-grid" data-target="wrapper">
  <section aria-labelledby="grid-title"></section>
</template>
"#;

fn entry(knob_type: &str, value: serde_json::Value) -> KnobEntry {
    KnobEntry {
        knob_type: knob_type.to_string(),
        value,
        attribute: None,
        custom: false,
    }
}

/// A knob set the size of a large real-world element.
fn values(count: usize) -> KnobValues {
    (0..count).fold(KnobValues::new(), |values, i| match i % 4 {
        0 => values.with(format!("flag{i}"), entry("boolean", json!(i % 8 == 0))),
        1 => values.with(format!("count{i}"), entry("number", json!(i))),
        2 => values.with(format!("mode{i}"), entry("'a' | 'b'", json!("a"))),
        _ => values.with(format!("label{i}"), entry("string", json!("Row & column"))),
    })
}

fn slots() -> Vec<SlotValue> {
    vec![
        SlotValue::new("header", "Users"),
        SlotValue::new("footer", "10 rows"),
        SlotValue::new("", "Content"),
    ]
}

fn css() -> Vec<CssValue> {
    (0..12)
        .map(|i| {
            CssValue::new(format!("--data-grid-var-{i}"))
                .with_default("0px")
                .with_value(format!("{i}px"))
        })
        .collect()
}

// =============================================================================
// Benchmarks
// =============================================================================

fn bench_generate(c: &mut Criterion) {
    let mut registry = TemplateRegistry::new();
    registry.set_templates(DemoId(0), scan_templates(TEMPLATES).unwrap_or_default());
    let slots = slots();
    let css = css();

    let mut group = c.benchmark_group("snippet_generate");
    for count in [4, 32] {
        let values = values(count);
        group.bench_function(format!("{count}_knobs"), |b| {
            b.iter(|| {
                let markup = generate_markup(black_box(&SnippetInput {
                    registry: &registry,
                    id: DemoId(0),
                    tag: "data-grid",
                    values: &values,
                    slots: &slots,
                    css: &css,
                }));
                black_box(markup.len());
            });
        });
    }
    group.finish();
}

fn bench_highlight(c: &mut Criterion) {
    let registry = TemplateRegistry::new();
    let values = values(16);
    let slots = slots();
    let css = css();
    let markup = generate_markup(&SnippetInput {
        registry: &registry,
        id: DemoId(0),
        tag: "data-grid",
        values: &values,
        slots: &slots,
        css: &css,
    });

    let mut group = c.benchmark_group("snippet_highlight");
    group.bench_function("markup_with_style", |b| {
        b.iter(|| {
            let html = highlight(black_box(&markup), Grammar::Markup).unwrap();
            black_box(html.len());
        });
    });
    group.finish();
}

criterion_group!(benches, bench_generate, bench_highlight);
criterion_main!(benches);
