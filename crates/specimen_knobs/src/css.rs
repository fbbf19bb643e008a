//! CSS custom property knobs.

use serde::{Deserialize, Serialize};
use specimen_manifest::CssPropertyDescriptor;

use crate::kind::unquote;

/// State of one CSS custom property in the demo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CssValue {
    /// Custom property name, including the leading `--`.
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Captured default. `None` until known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    /// Current value on the live instance.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl CssValue {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            default: None,
            value: None,
        }
    }

    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Whether the current value is set, non-empty and differs from the
    /// default. Only overridden values appear in the snippet.
    pub fn is_overridden(&self) -> bool {
        match self.value.as_deref() {
            Some(value) if !value.is_empty() => self.default.as_deref() != Some(value),
            _ => false,
        }
    }
}

/// Initial values for declared CSS custom properties.
///
/// An author default is taken without surrounding quotes. `value` stays
/// unset until the live instance provides one.
pub fn derive_css_values(properties: &[CssPropertyDescriptor]) -> Vec<CssValue> {
    properties
        .iter()
        .map(|prop| CssValue {
            name: prop.name.clone(),
            description: prop.description.clone(),
            default: prop
                .default
                .as_deref()
                .map(|d| unquote(d).to_string())
                .filter(|d| !d.is_empty()),
            value: None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_overridden() {
        assert!(!CssValue::new("--x").with_default("1px").with_value("1px").is_overridden());
        assert!(CssValue::new("--x").with_default("1px").with_value("2px").is_overridden());
        assert!(!CssValue::new("--x").with_default("1px").with_value("").is_overridden());
        assert!(!CssValue::new("--x").is_overridden());
        assert!(CssValue::new("--x").with_value("red").is_overridden());
    }

    #[test]
    fn test_author_default_unquoted() {
        let props = vec![
            CssPropertyDescriptor::new("--font").with_default("\"Inter\""),
            CssPropertyDescriptor::new("--gap").with_default("'4px'"),
            CssPropertyDescriptor::new("--color"),
        ];
        let values = derive_css_values(&props);

        assert_eq!(values[0].default.as_deref(), Some("Inter"));
        assert_eq!(values[1].default.as_deref(), Some("4px"));
        assert_eq!(values[2].default, None);
        assert!(values.iter().all(|v| v.value.is_none()));
    }
}
