//! Custom knobs declared through author templates.
//!
//! ```html
//! <template data-element="x-select" data-target="knob" data-attr="size" data-type="select">
//!   <select>
//!     <option>small</option>
//!     <option>large</option>
//!   </select>
//! </template>
//! ```

use crate::knob::Knob;
use crate::markup::select_options;
use crate::registry::{DemoId, TemplateRegistry};
use crate::template::{TemplateKind, TemplateNode};

/// Knobs from every `knob` template registered for `tag`.
///
/// Templates of an unsupported shape yield no knob. A later template for
/// an attribute already defined is ignored.
pub fn derive_custom_knobs(registry: &TemplateRegistry, id: DemoId, tag: &str) -> Vec<Knob> {
    let mut knobs: Vec<Knob> = Vec::new();

    for node in registry.templates(id, tag, TemplateKind::Knob) {
        let Some(knob) = custom_knob(node) else {
            tracing::trace!(tag, attr = ?node.data("attr"), "ignoring knob template");
            continue;
        };
        if knobs.iter().any(|k| k.attribute_name() == knob.attribute_name()) {
            continue;
        }
        knobs.push(knob);
    }

    knobs
}

fn custom_knob(node: &TemplateNode) -> Option<Knob> {
    let attr = node.data("attr").filter(|a| !a.is_empty())?;
    let knob_type = node.data("type")?;

    let options = match knob_type {
        "select" => {
            let options = select_options(&node.content);
            if options.len() < 2 {
                return None;
            }
            options
        }
        "string" | "boolean" => Vec::new(),
        _ => return None,
    };

    let mut knob = Knob::new(attr, knob_type);
    knob.attribute = Some(attr.to_string());
    knob.custom = true;
    knob.options = options;
    Some(knob)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::KnobKind;

    fn knob_template(attr: &str, ty: &str, content: &str) -> TemplateNode {
        TemplateNode::new("x-el", TemplateKind::Knob, content)
            .with_data("attr", attr)
            .with_data("type", ty)
    }

    fn derive(templates: Vec<TemplateNode>) -> Vec<Knob> {
        let mut registry = TemplateRegistry::new();
        registry.set_templates(DemoId(7), templates);
        derive_custom_knobs(&registry, DemoId(7), "x-el")
    }

    #[test]
    fn test_select_knob() {
        let knobs = derive(vec![knob_template(
            "size",
            "select",
            "<select><option>small</option><option value=\"lg\">Large</option></select>",
        )]);

        assert_eq!(knobs.len(), 1);
        assert_eq!(knobs[0].name, "size");
        assert_eq!(knobs[0].attribute.as_deref(), Some("size"));
        assert_eq!(knobs[0].kind(), KnobKind::Select);
        assert_eq!(knobs[0].options, vec!["small", "lg"]);
        assert!(knobs[0].custom);
    }

    #[test]
    fn test_string_and_boolean_knobs() {
        let knobs = derive(vec![
            knob_template("dense", "boolean", "<input type=\"checkbox\">"),
            knob_template("aria-label", "string", "<input>"),
        ]);

        assert_eq!(knobs.len(), 2);
        assert_eq!(knobs[0].kind(), KnobKind::Boolean);
        assert_eq!(knobs[1].kind(), KnobKind::Text);
        assert!(knobs[1].options.is_empty());
    }

    #[test]
    fn test_malformed_templates_are_dropped() {
        let knobs = derive(vec![
            // single option
            knob_template("size", "select", "<select><option>one</option></select>"),
            // no select at all
            knob_template("mode", "select", "<input>"),
            knob_template("count", "number", "<input type=\"number\">"),
            TemplateNode::new("x-el", TemplateKind::Knob, "").with_data("type", "string"),
            knob_template("", "string", ""),
        ]);
        assert!(knobs.is_empty());
    }

    #[test]
    fn test_duplicate_attribute_keeps_first() {
        let knobs = derive(vec![
            knob_template("dense", "boolean", ""),
            knob_template("dense", "string", ""),
        ]);
        assert_eq!(knobs.len(), 1);
        assert_eq!(knobs[0].knob_type, "boolean");
    }

    #[test]
    fn test_other_tags_ignored() {
        let mut registry = TemplateRegistry::new();
        registry.set_templates(DemoId(1), vec![knob_template("dense", "boolean", "")]);
        assert!(derive_custom_knobs(&registry, DemoId(1), "x-other").is_empty());
    }
}
