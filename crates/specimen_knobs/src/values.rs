//! The knob value map.
//!
//! The map is never mutated in place. Every change produces a new
//! [`KnobValues`] that shares untouched entries with the previous one, so
//! one change means one replacement and exactly one new entry.

use std::collections::BTreeMap;
use std::rc::Rc;

use serde::Serialize;
use serde_json::Value;

use crate::kind::KnobKind;

/// Current state of one knob in the value map.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KnobEntry {
    /// Normalized type text.
    pub knob_type: String,
    pub value: Value,
    pub attribute: Option<String>,
    pub custom: bool,
}

impl KnobEntry {
    #[inline]
    pub fn kind(&self) -> KnobKind {
        KnobKind::from_type(&self.knob_type)
    }

    /// Serialized attribute name: `attribute`, else the map key.
    #[inline]
    pub fn attribute_name<'a>(&'a self, key: &'a str) -> &'a str {
        self.attribute.as_deref().unwrap_or(key)
    }

    /// Attribute text this entry serializes to, or `None` when the
    /// attribute is left off. A present boolean attribute has empty text.
    ///
    /// The live instance and the snippet both go through here, so they
    /// never disagree on whether an attribute exists.
    pub fn attribute_value(&self) -> Option<String> {
        match self.kind() {
            KnobKind::Boolean => is_truthy(&self.value).then(String::new),
            KnobKind::Select => self
                .value
                .as_str()
                .filter(|v| !v.is_empty())
                .map(str::to_string),
            _ if self.value.is_null() => None,
            _ => Some(display_value(&self.value)),
        }
    }
}

/// Knob values keyed by knob name, iterated in lexicographic key order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KnobValues {
    entries: BTreeMap<String, Rc<KnobEntry>>,
}

impl KnobValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// A new map with `key` set to `entry`. `self` is left untouched.
    #[must_use]
    pub fn with(&self, key: impl Into<String>, entry: KnobEntry) -> Self {
        let mut entries = self.entries.clone();
        entries.insert(key.into(), Rc::new(entry));
        Self { entries }
    }

    #[inline]
    pub fn get(&self, key: &str) -> Option<&Rc<KnobEntry>> {
        self.entries.get(key)
    }

    /// Entries sorted by key.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Rc<KnobEntry>)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// JavaScript-style truthiness, used for boolean attributes.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Text form of a value as it appears in an attribute.
///
/// Integral numbers print without a fractional part (`50`, not `50.0`).
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => match (n.as_i64(), n.as_f64()) {
            (Some(i), _) => i.to_string(),
            (None, Some(f)) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
            _ => n.to_string(),
        },
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// JSON number from a float, keeping integral values integral.
///
/// `NaN` and infinities have no JSON form and become `null`.
pub fn number_value(f: f64) -> Value {
    if f.fract() == 0.0 && f.abs() < 1e15 {
        Value::from(f as i64)
    } else {
        serde_json::Number::from_f64(f)
            .map(Value::Number)
            .unwrap_or(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entry(value: Value) -> KnobEntry {
        KnobEntry {
            knob_type: "string".to_string(),
            value,
            attribute: None,
            custom: false,
        }
    }

    #[test]
    fn test_with_replaces_one_entry() {
        let first = KnobValues::new()
            .with("a", entry(json!("1")))
            .with("b", entry(json!("2")));
        let second = first.with("b", entry(json!("3")));

        assert!(Rc::ptr_eq(first.get("a").unwrap(), second.get("a").unwrap()));
        assert!(!Rc::ptr_eq(first.get("b").unwrap(), second.get("b").unwrap()));
        assert_eq!(first.get("b").unwrap().value, json!("2"));
        assert_eq!(second.get("b").unwrap().value, json!("3"));
    }

    #[test]
    fn test_iteration_is_sorted() {
        let values = KnobValues::new()
            .with("zeta", entry(json!(1)))
            .with("alpha", entry(json!(2)))
            .with("mid", entry(json!(3)));
        let keys: Vec<_> = values.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["alpha", "mid", "zeta"]);
    }

    #[test]
    fn test_truthiness() {
        assert!(!is_truthy(&Value::Null));
        assert!(!is_truthy(&json!(false)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!("")));
        assert!(is_truthy(&json!("x")));
        assert!(is_truthy(&json!(2.5)));
        assert!(is_truthy(&json!([])));
    }

    #[test]
    fn test_display_value() {
        assert_eq!(display_value(&json!(50)), "50");
        assert_eq!(display_value(&json!(50.0)), "50");
        assert_eq!(display_value(&json!(1.5)), "1.5");
        assert_eq!(display_value(&json!(true)), "true");
        assert_eq!(display_value(&json!("hi")), "hi");
        assert_eq!(display_value(&Value::Null), "");
        assert_eq!(display_value(&json!(["a"])), r#"["a"]"#);
    }

    #[test]
    fn test_attribute_value() {
        let select = |value: Value| KnobEntry {
            knob_type: "select".to_string(),
            value,
            attribute: Some("size".to_string()),
            custom: true,
        };
        assert_eq!(select(json!("l")).attribute_value().as_deref(), Some("l"));
        assert_eq!(select(json!("")).attribute_value(), None);
        assert_eq!(select(Value::Null).attribute_value(), None);

        let flag = |value: Value| KnobEntry {
            knob_type: "boolean".to_string(),
            ..entry(value)
        };
        assert_eq!(flag(json!(true)).attribute_value().as_deref(), Some(""));
        assert_eq!(flag(json!(false)).attribute_value(), None);

        assert_eq!(entry(json!("")).attribute_value().as_deref(), Some(""));
        assert_eq!(entry(json!(3)).attribute_value().as_deref(), Some("3"));
        assert_eq!(entry(Value::Null).attribute_value(), None);
    }

    #[test]
    fn test_number_value() {
        assert_eq!(number_value(3.0), json!(3));
        assert_eq!(number_value(0.25), json!(0.25));
        assert_eq!(number_value(f64::NAN), Value::Null);
    }
}
