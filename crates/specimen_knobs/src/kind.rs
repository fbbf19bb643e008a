//! Knob type normalization.
//!
//! A knob's type is the declared type text with optional-union members
//! (`undefined`, `null`) removed. The rendering hint is derived from that
//! normalized text.

use serde::{Deserialize, Serialize};

/// Rendering hint for a knob.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum KnobKind {
    /// Checkbox; serialized as a boolean attribute.
    Boolean,
    /// Number input.
    Number,
    /// Free text input.
    Text,
    /// Dropdown with a fixed set of options.
    Select,
    /// Any other declared type. Kept, but has no editing control.
    Other,
}

impl KnobKind {
    /// Derive the hint from normalized type text.
    pub fn from_type(knob_type: &str) -> Self {
        match knob_type {
            "boolean" => Self::Boolean,
            "number" => Self::Number,
            "string" => Self::Text,
            "select" => Self::Select,
            other if !literal_options(other).is_empty() => Self::Select,
            _ => Self::Other,
        }
    }

    /// Whether the knob gets an input control.
    #[inline]
    pub const fn is_editable(self) -> bool {
        !matches!(self, Self::Other)
    }
}

/// Strip `undefined` and `null` members from a union type.
///
/// `"string | undefined"` becomes `"string"`. A type made only of
/// `null`/`undefined` is returned unchanged.
pub fn normalize_type(type_text: &str) -> String {
    let parts: Vec<&str> = type_text
        .split('|')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect();
    let kept: Vec<&str> = parts
        .iter()
        .copied()
        .filter(|part| *part != "undefined" && *part != "null")
        .collect();

    if kept.is_empty() {
        type_text.trim().to_string()
    } else {
        kept.join(" | ")
    }
}

/// Options of a string literal union such as `'small' | "large"`.
///
/// Returns an empty list unless every member is a quoted literal.
pub fn literal_options(type_text: &str) -> Vec<String> {
    if !type_text.contains('|') {
        return Vec::new();
    }

    let mut options = Vec::new();
    for part in type_text.split('|').map(str::trim) {
        if !is_quoted(part) {
            return Vec::new();
        }
        let value = unquote(part);
        if !options.iter().any(|o| o == value) {
            options.push(value.to_string());
        }
    }
    options
}

/// Remove one pair of surrounding quotes. Both `'` and `"` are accepted.
#[inline]
pub fn unquote(literal: &str) -> &str {
    let trimmed = literal.trim();
    if is_quoted(trimmed) {
        &trimmed[1..trimmed.len() - 1]
    } else {
        trimmed
    }
}

#[inline]
fn is_quoted(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() >= 2
        && (bytes[0] == b'\'' || bytes[0] == b'"')
        && bytes[bytes.len() - 1] == bytes[0]
}
