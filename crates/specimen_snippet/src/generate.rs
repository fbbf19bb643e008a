//! Snippet text generation.
//!
//! Produces the markup (and optional `<style>` block) that reproduces the
//! current demo state. Output is deterministic: attributes are emitted in
//! knob key order, never in declaration order.

use once_cell::sync::Lazy;
use regex::Regex;
use specimen_knobs::{
    CssValue, DemoId, KnobKind, KnobValues, SlotValue, TemplateKind, TemplateRegistry,
};

use crate::unindent::{trim_blank_lines, unindent, INDENT};

/// Opening tag of a wrapper template, e.g. `<div class="row">`.
static WRAPPER_OPEN: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"<([a-z][a-z0-9]*(?:-[a-z0-9]+)*)(\s[^>]*)?>").ok());

/// Everything the generator reads for one snippet.
#[derive(Debug, Clone, Copy)]
pub struct SnippetInput<'a> {
    pub registry: &'a TemplateRegistry,
    pub id: DemoId,
    pub tag: &'a str,
    pub values: &'a KnobValues,
    pub slots: &'a [SlotValue],
    pub css: &'a [CssValue],
}

/// Build the plain snippet text.
pub fn generate_markup(input: &SnippetInput<'_>) -> String {
    let SnippetInput {
        registry,
        id,
        tag,
        values,
        slots,
        css,
    } = *input;

    let mut out = String::with_capacity(256);
    let mut prepend = "";

    if let Some(prefix) = registry.template(id, tag, TemplateKind::Prefix) {
        out.push_str(&unindent(trim_blank_lines(&prefix.content), ""));
        out.push('\n');
    }

    let wrapper = registry
        .template(id, tag, TemplateKind::Wrapper)
        .and_then(|node| wrapper_open(&node.content));
    if let Some((open, _)) = wrapper {
        out.push_str(open);
        out.push('\n');
        out.push_str(INDENT);
        prepend = INDENT;
    }

    out.push('<');
    out.push_str(tag);
    push_attributes(&mut out, values);
    out.push('>');

    if let Some(slot) = registry.template(id, tag, TemplateKind::Slot) {
        let inner = format!("{prepend}{INDENT}");
        out.push('\n');
        out.push_str(&unindent(trim_blank_lines(&slot.content), &inner));
        out.push('\n');
        out.push_str(prepend);
    } else if let [only] = slots {
        if only.is_default() {
            out.push_str(&htmlize::escape_text(only.content.as_str()));
        } else {
            push_slots(&mut out, slots, prepend);
        }
    } else {
        push_slots(&mut out, slots, prepend);
    }

    out.push_str("</");
    out.push_str(tag);
    out.push('>');

    if let Some((_, name)) = wrapper {
        out.push_str("\n</");
        out.push_str(name);
        out.push('>');
    }

    if let Some(suffix) = registry.template(id, tag, TemplateKind::Suffix) {
        out.push('\n');
        out.push_str(&unindent(trim_blank_lines(&suffix.content), ""));
    }

    if let Some(style) = style_block(tag, css) {
        out.push('\n');
        out.push_str(&style);
    }

    out
}

/// Opening tag and tag name of the first non self-closing element.
fn wrapper_open(content: &str) -> Option<(&str, &str)> {
    let re = WRAPPER_OPEN.as_ref()?;
    re.captures_iter(content).find_map(|caps| {
        let open = caps.get(0)?.as_str();
        if open.ends_with("/>") {
            return None;
        }
        Some((open, caps.get(1)?.as_str()))
    })
}

fn push_attributes(out: &mut String, values: &KnobValues) {
    for (key, entry) in values.iter() {
        let Some(value) = entry.attribute_value() else {
            continue;
        };
        let name = entry.attribute_name(key);
        if entry.kind() == KnobKind::Boolean {
            out.push(' ');
            out.push_str(name);
        } else {
            push_attribute(out, name, &value);
        }
    }
}

#[inline]
fn push_attribute(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    out.push_str(&htmlize::escape_attribute(value));
    out.push('"');
}

fn push_slots(out: &mut String, slots: &[SlotValue], prepend: &str) {
    let mut emitted = false;
    for slot in slots.iter().filter(|s| !s.content.is_empty()) {
        emitted = true;
        out.push('\n');
        out.push_str(prepend);
        out.push_str(INDENT);
        let content = htmlize::escape_text(slot.content.as_str());
        if slot.is_default() {
            out.push_str(&content);
        } else {
            out.push_str("<div slot=\"");
            out.push_str(&htmlize::escape_attribute(slot.name.as_str()));
            out.push_str("\">");
            out.push_str(&content);
            out.push_str("</div>");
        }
    }
    if emitted {
        out.push('\n');
        out.push_str(prepend);
    }
}

/// `<style>` block for overridden CSS custom properties, if any.
pub fn style_block(tag: &str, css: &[CssValue]) -> Option<String> {
    let declarations: Vec<String> = css
        .iter()
        .filter(|value| value.is_overridden())
        .filter_map(|value| {
            value
                .value
                .as_deref()
                .map(|v| format!("{INDENT}{INDENT}{}: {};", value.name, v))
        })
        .collect();

    if declarations.is_empty() {
        return None;
    }

    Some(format!(
        "<style>\n{INDENT}{tag} {{\n{}\n{INDENT}}}\n</style>",
        declarations.join("\n")
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use specimen_knobs::{KnobEntry, TemplateNode};

    fn entry(knob_type: &str, value: Value) -> KnobEntry {
        KnobEntry {
            knob_type: knob_type.to_string(),
            value,
            attribute: None,
            custom: false,
        }
    }

    fn generate(values: &KnobValues, slots: &[SlotValue], css: &[CssValue]) -> String {
        let registry = TemplateRegistry::new();
        generate_markup(&SnippetInput {
            registry: &registry,
            id: DemoId(0),
            tag: "foo-bar",
            values,
            slots,
            css,
        })
    }

    #[test]
    fn test_boolean_attribute_toggles() {
        let on = KnobValues::new().with("disabled", entry("boolean", json!(true)));
        let off = on.with("disabled", entry("boolean", json!(false)));

        assert_eq!(generate(&on, &[], &[]), "<foo-bar disabled></foo-bar>");
        assert_eq!(generate(&off, &[], &[]), "<foo-bar></foo-bar>");
    }

    #[test]
    fn test_attribute_rules() {
        let values = KnobValues::new()
            .with("value", entry("number", json!(50)))
            .with("label", entry("string", json!("Say \"hi\"")))
            .with("size", entry("'s' | 'l'", json!("")))
            .with("mode", entry("'a' | 'b'", json!("b")))
            .with("unset", entry("string", Value::Null))
            .with(
                "maxItems",
                KnobEntry {
                    attribute: Some("max-items".to_string()),
                    ..entry("number", json!(3))
                },
            );

        assert_eq!(
            generate(&values, &[], &[]),
            r#"<foo-bar label="Say &quot;hi&quot;" max-items="3" mode="b" value="50"></foo-bar>"#
        );
    }

    #[test]
    fn test_single_unnamed_slot_inline() {
        let slots = [SlotValue::new("", "Hi")];
        assert_eq!(generate(&KnobValues::new(), &slots, &[]), "<foo-bar>Hi</foo-bar>");
    }

    #[test]
    fn test_named_slots_on_own_lines() {
        let slots = [
            SlotValue::new("header", "Title"),
            SlotValue::new("footer", ""),
            SlotValue::new("", "Body"),
        ];
        assert_eq!(
            generate(&KnobValues::new(), &slots, &[]),
            "<foo-bar>\n  <div slot=\"header\">Title</div>\n  Body\n</foo-bar>"
        );
    }

    #[test]
    fn test_style_block_only_for_overrides() {
        let same = [CssValue::new("--x").with_default("1px").with_value("1px")];
        assert_eq!(generate(&KnobValues::new(), &[], &same), "<foo-bar></foo-bar>");

        let changed = [
            CssValue::new("--x").with_default("1px").with_value("2px"),
            CssValue::new("--y").with_default("red").with_value("red"),
        ];
        assert_eq!(
            generate(&KnobValues::new(), &[], &changed),
            "<foo-bar></foo-bar>\n<style>\n  foo-bar {\n    --x: 2px;\n  }\n</style>"
        );
    }

    #[test]
    fn test_wrapper_open() {
        assert_eq!(
            wrapper_open("\n  <div class=\"row\"></div>"),
            Some(("<div class=\"row\">", "div"))
        );
        assert_eq!(wrapper_open("<br/><section>"), Some(("<section>", "section")));
        assert_eq!(wrapper_open("text only"), None);
    }

    #[test]
    fn test_templates() {
        let mut registry = TemplateRegistry::new();
        registry.set_templates(
            DemoId(3),
            vec![
                TemplateNode::new("foo-bar", TemplateKind::Prefix, "\n    <label>Pick</label>\n  "),
                TemplateNode::new("foo-bar", TemplateKind::Wrapper, "<form-field></form-field>"),
                TemplateNode::new("foo-bar", TemplateKind::Slot, "\n\t<b>one</b>\n\t<i>two</i>\n"),
                TemplateNode::new("foo-bar", TemplateKind::Suffix, "<p>after</p>"),
            ],
        );
        let values = KnobValues::new();
        let out = generate_markup(&SnippetInput {
            registry: &registry,
            id: DemoId(3),
            tag: "foo-bar",
            values: &values,
            slots: &[SlotValue::new("", "ignored")],
            css: &[],
        });

        assert_eq!(
            out,
            "<label>Pick</label>\n<form-field>\n  <foo-bar>\n    <b>one</b>\n    <i>two</i>\n  </foo-bar>\n</form-field>\n<p>after</p>"
        );
    }
}
