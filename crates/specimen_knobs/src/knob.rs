//! Knob derivation from property descriptors.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use specimen_manifest::PropertyDescriptor;

use crate::kind::{literal_options, normalize_type, unquote, KnobKind};
use crate::values::{number_value, KnobEntry};

/// An editable control bound to one property (or, for custom knobs, one
/// attribute) of the element under demonstration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Knob {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribute: Option<String>,
    /// Normalized type text, e.g. `boolean`, `string`, `'a' | 'b'`.
    pub knob_type: String,
    /// Current value. `null` means unset.
    #[serde(default)]
    pub value: Value,
    /// Declared default literal, as written in the manifest.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Declared through an author template rather than the manifest.
    #[serde(default)]
    pub custom: bool,
    /// Select options.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    #[serde(default)]
    pub deprecated: bool,
}

impl Knob {
    /// A manifest-less knob with just a name and type.
    pub fn new(name: impl Into<String>, knob_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attribute: None,
            knob_type: knob_type.into(),
            value: Value::Null,
            default: None,
            description: None,
            custom: false,
            options: Vec::new(),
            deprecated: false,
        }
    }

    #[inline]
    pub fn kind(&self) -> KnobKind {
        if !self.options.is_empty() {
            KnobKind::Select
        } else {
            KnobKind::from_type(&self.knob_type)
        }
    }

    /// Attribute the knob serializes to.
    #[inline]
    pub fn attribute_name(&self) -> &str {
        self.attribute.as_deref().unwrap_or(&self.name)
    }

    /// Value map entry carrying `value`.
    pub fn entry(&self, value: Value) -> KnobEntry {
        KnobEntry {
            knob_type: self.knob_type.clone(),
            value,
            attribute: self.attribute.clone(),
            custom: self.custom,
        }
    }
}

/// Turn property descriptors into knobs.
///
/// A property is skipped when it is read-only or when its name occurs in
/// `exclude` (substring match, so `exclude` may be any separated list).
/// Duplicate names keep the first occurrence. The input is not modified.
pub fn derive_knobs(properties: &[PropertyDescriptor], exclude: &str) -> Vec<Knob> {
    let mut knobs: Vec<Knob> = Vec::with_capacity(properties.len());

    for prop in properties {
        if prop.readonly || exclude.contains(prop.name.as_str()) {
            continue;
        }
        if knobs.iter().any(|k| k.name == prop.name) {
            continue;
        }

        let knob_type = prop
            .type_text
            .as_deref()
            .map(normalize_type)
            .unwrap_or_default();
        let options = literal_options(&knob_type);
        let kind = if options.is_empty() {
            KnobKind::from_type(&knob_type)
        } else {
            KnobKind::Select
        };
        let value = prop
            .default
            .as_deref()
            .map(|literal| default_value(kind, literal))
            .unwrap_or(Value::Null);

        knobs.push(Knob {
            name: prop.name.clone(),
            attribute: prop.attribute.clone(),
            knob_type,
            value,
            default: prop.default.clone(),
            description: prop.description.clone(),
            custom: false,
            options,
            deprecated: prop.deprecated,
        });
    }

    knobs
}

/// Live value of a default literal for the given knob kind.
///
/// - boolean: anything but `"false"` is `true`
/// - number: numeric coercion, `null` when not a number
/// - otherwise: the literal without surrounding quotes; the bare
///   literals `null` and `undefined` mean unset
pub fn default_value(kind: KnobKind, literal: &str) -> Value {
    match kind {
        KnobKind::Boolean => Value::Bool(literal != "false"),
        KnobKind::Number => literal
            .trim()
            .parse::<f64>()
            .map(number_value)
            .unwrap_or(Value::Null),
        _ => match literal.trim() {
            "null" | "undefined" => Value::Null,
            other => Value::String(unquote(other).to_string()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_boolean_default() {
        let props = vec![PropertyDescriptor::new("disabled", "boolean").with_default("false")];
        let knobs = derive_knobs(&props, "");

        assert_eq!(knobs.len(), 1);
        assert_eq!(knobs[0].name, "disabled");
        assert_eq!(knobs[0].knob_type, "boolean");
        assert_eq!(knobs[0].kind(), KnobKind::Boolean);
        assert_eq!(knobs[0].value, json!(false));
    }

    #[test]
    fn test_number_and_string_defaults() {
        let props = vec![
            PropertyDescriptor::new("max", "number | undefined").with_default("100"),
            PropertyDescriptor::new("step", "number").with_default("0.5"),
            PropertyDescriptor::new("label", "string").with_default("\"Volume\""),
            PropertyDescriptor::new("name", "string").with_default("'level'"),
            PropertyDescriptor::new("hint", "string | null").with_default("null"),
        ];
        let knobs = derive_knobs(&props, "");

        assert_eq!(knobs[0].knob_type, "number");
        assert_eq!(knobs[0].value, json!(100));
        assert_eq!(knobs[1].value, json!(0.5));
        assert_eq!(knobs[2].value, json!("Volume"));
        assert_eq!(knobs[3].value, json!("level"));
        assert_eq!(knobs[4].knob_type, "string");
        assert_eq!(knobs[4].value, Value::Null);
    }

    #[test]
    fn test_excluded_and_readonly() {
        let props = vec![
            PropertyDescriptor::new("value", "number"),
            PropertyDescriptor::new("items", "Array<string>"),
            PropertyDescriptor::new("size", "number").readonly(),
            PropertyDescriptor::new("label", "string"),
        ];
        let knobs = derive_knobs(&props, "items,renderer");
        let names: Vec<_> = knobs.iter().map(|k| k.name.as_str()).collect();
        assert_eq!(names, vec!["value", "label"]);
        // input untouched
        assert_eq!(props.len(), 4);
    }

    #[test]
    fn test_literal_union_is_select() {
        let props =
            vec![PropertyDescriptor::new("size", "'small' | 'large' | undefined").with_default("'small'")];
        let knobs = derive_knobs(&props, "");

        assert_eq!(knobs[0].kind(), KnobKind::Select);
        assert_eq!(knobs[0].options, vec!["small", "large"]);
        assert_eq!(knobs[0].value, json!("small"));
    }

    #[test]
    fn test_untyped_property() {
        let props = vec![PropertyDescriptor {
            name: "data".to_string(),
            ..PropertyDescriptor::default()
        }];
        let knobs = derive_knobs(&props, "");
        assert_eq!(knobs[0].knob_type, "");
        assert_eq!(knobs[0].kind(), KnobKind::Other);
    }

    #[test]
    fn test_duplicate_names_keep_first() {
        let props = vec![
            PropertyDescriptor::new("value", "number"),
            PropertyDescriptor::new("value", "string"),
        ];
        let knobs = derive_knobs(&props, "");
        assert_eq!(knobs.len(), 1);
        assert_eq!(knobs[0].knob_type, "number");
    }

    #[test]
    fn test_non_numeric_default() {
        assert_eq!(default_value(KnobKind::Number, "abc"), Value::Null);
        assert_eq!(default_value(KnobKind::Boolean, "true"), json!(true));
    }
}
