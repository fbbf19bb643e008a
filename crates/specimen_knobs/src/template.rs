//! Author template nodes.
//!
//! A demo host may carry `<template>` children that customize the demo of
//! one element:
//!
//! ```html
//! <template data-element="fancy-button" data-target="host">
//!   <fancy-button variant="primary"></fancy-button>
//! </template>
//! ```
//!
//! `data-element` names the tag, `data-target` the [`TemplateKind`].

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::TemplateError;
use crate::markup::{attributes, line_of, next_block, BlockScan};

/// What a template customizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateKind {
    /// Initial attributes for the live instance.
    Host,
    /// A custom knob definition.
    Knob,
    /// Replacement slot content; disables the slots controller.
    Slot,
    /// An element wrapping the demo instance in the snippet.
    Wrapper,
    /// Markup emitted before the instance in the snippet.
    Prefix,
    /// Markup emitted after the instance in the snippet.
    Suffix,
}

impl TemplateKind {
    pub const ALL: [TemplateKind; 6] = [
        Self::Host,
        Self::Knob,
        Self::Slot,
        Self::Wrapper,
        Self::Prefix,
        Self::Suffix,
    ];

    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Host => "host",
            Self::Knob => "knob",
            Self::Slot => "slot",
            Self::Wrapper => "wrapper",
            Self::Prefix => "prefix",
            Self::Suffix => "suffix",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == s)
    }
}

/// One author template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateNode {
    /// Tag the template applies to.
    pub element: String,
    pub target: TemplateKind,
    /// `data-*` attributes, keyed without the `data-` prefix.
    pub dataset: FxHashMap<String, String>,
    /// Raw inner markup.
    pub content: String,
}

impl TemplateNode {
    pub fn new(element: impl Into<String>, target: TemplateKind, content: impl Into<String>) -> Self {
        let element = element.into();
        let mut dataset = FxHashMap::default();
        dataset.insert("element".to_string(), element.clone());
        dataset.insert("target".to_string(), target.as_str().to_string());
        Self {
            element,
            target,
            dataset,
            content: content.into(),
        }
    }

    /// Add a `data-*` entry.
    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.dataset.insert(key.into(), value.into());
        self
    }

    #[inline]
    pub fn data(&self, key: &str) -> Option<&str> {
        self.dataset.get(key).map(String::as_str)
    }

    #[inline]
    pub fn matches(&self, tag: &str, kind: TemplateKind) -> bool {
        self.element == tag && self.target == kind
    }
}

/// Collect every `<template>` in `markup` that names an element and a
/// known target.
///
/// Templates missing `data-element`, or with a `data-target` that is not a
/// [`TemplateKind`], are skipped.
pub fn scan_templates(markup: &str) -> Result<Vec<TemplateNode>, TemplateError> {
    let mut nodes = Vec::new();
    let mut pos = 0;

    loop {
        match next_block(markup, "template", pos) {
            BlockScan::None => break,
            BlockScan::Unterminated { start } => {
                return Err(TemplateError::Unterminated {
                    tag: "template".to_string(),
                    line: line_of(markup, start),
                });
            }
            BlockScan::Found(block, end) => {
                pos = end;

                let mut dataset = FxHashMap::default();
                for (name, value) in attributes(block.attrs) {
                    if let Some(key) = name.strip_prefix("data-") {
                        dataset.insert(key.to_string(), value.unwrap_or_default().to_string());
                    }
                }

                let element = dataset.get("element").filter(|e| !e.is_empty()).cloned();
                let target = dataset.get("target").and_then(|t| TemplateKind::parse(t));
                let (Some(element), Some(target)) = (element, target) else {
                    tracing::trace!(
                        line = line_of(markup, block.start),
                        "skipping template without element or known target"
                    );
                    continue;
                };

                nodes.push(TemplateNode {
                    element,
                    target,
                    dataset,
                    content: block.content.to_string(),
                });
            }
        }
    }

    Ok(nodes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_roundtrip() {
        for kind in TemplateKind::ALL {
            assert_eq!(TemplateKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(TemplateKind::parse("footer"), None);
    }

    #[test]
    fn test_scan_templates() {
        let markup = r#"
<template data-element="fancy-button" data-target="host">
  <fancy-button variant="primary"></fancy-button>
</template>
<template data-element="fancy-button" data-target="knob" data-attr="dense" data-type="boolean">
  <input type="checkbox">
</template>
<template data-element="fancy-button" data-target="footer"></template>
<template data-target="prefix"></template>
"#;
        let nodes = scan_templates(markup).unwrap();

        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].target, TemplateKind::Host);
        assert!(nodes[0].content.contains("variant=\"primary\""));
        assert_eq!(nodes[1].target, TemplateKind::Knob);
        assert_eq!(nodes[1].data("attr"), Some("dense"));
        assert_eq!(nodes[1].data("type"), Some("boolean"));
    }

    #[test]
    fn test_unterminated_template() {
        let err = scan_templates("\n\n<template data-element=\"x-y\" data-target=\"slot\">oops")
            .unwrap_err();
        assert_eq!(
            err,
            TemplateError::Unterminated {
                tag: "template".to_string(),
                line: 3
            }
        );
    }

    #[test]
    fn test_builder() {
        let node = TemplateNode::new("x-y", TemplateKind::Knob, "").with_data("attr", "size");
        assert!(node.matches("x-y", TemplateKind::Knob));
        assert!(!node.matches("x-y", TemplateKind::Slot));
        assert_eq!(node.data("attr"), Some("size"));
        assert_eq!(node.data("element"), Some("x-y"));
    }
}
