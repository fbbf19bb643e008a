//! Normalized element declaration.
//!
//! The demo engine never works on raw manifest members. A selected
//! [`Declaration`] is flattened once into an [`ElementDeclaration`], which
//! stays immutable until another element is selected.

use serde::{Deserialize, Serialize};

use crate::schema::{Declaration, MemberKind};

/// A property of the element, as exposed to knob derivation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDescriptor {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribute: Option<String>,
    /// Nominal type text, possibly a union with `null` / `undefined`.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_text: Option<String>,
    /// Default value as literal text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "static", default)]
    pub is_static: bool,
    #[serde(default)]
    pub reflects: bool,
    #[serde(default)]
    pub deprecated: bool,
    #[serde(default)]
    pub readonly: bool,
}

impl PropertyDescriptor {
    /// Create a descriptor with a name and a type.
    pub fn new(name: impl Into<String>, type_text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_text: Some(type_text.into()),
            ..Self::default()
        }
    }

    /// Set the literal default value.
    #[inline]
    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Set the bound attribute name.
    #[inline]
    pub fn with_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.attribute = Some(attribute.into());
        self
    }

    /// Mark the property read-only.
    #[inline]
    pub fn readonly(mut self) -> Self {
        self.readonly = true;
        self
    }
}

/// An attribute of the element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeDescriptor {
    pub name: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A public method.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodDescriptor {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// `name: type` pairs, in declaration order.
    #[serde(default)]
    pub parameters: Vec<(String, Option<String>)>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_type: Option<String>,
}

/// An event the element fires.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDescriptor {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl EventDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
        }
    }
}

/// A slot. The unnamed (default) slot has `name == ""`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotDescriptor {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl SlotDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
        }
    }
}

/// A CSS shadow part.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CssPartDescriptor {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A CSS custom property.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CssPropertyDescriptor {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}

impl CssPropertyDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            default: None,
        }
    }

    #[inline]
    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }
}

/// The public API of one custom element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementDeclaration {
    /// Tag name, e.g. `foo-bar`.
    pub name: String,
    /// Class name from the manifest.
    #[serde(default)]
    pub class_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub properties: Vec<PropertyDescriptor>,
    #[serde(default)]
    pub attributes: Vec<AttributeDescriptor>,
    #[serde(default)]
    pub methods: Vec<MethodDescriptor>,
    #[serde(default)]
    pub events: Vec<EventDescriptor>,
    #[serde(default)]
    pub slots: Vec<SlotDescriptor>,
    #[serde(default)]
    pub css_parts: Vec<CssPartDescriptor>,
    #[serde(default)]
    pub css_properties: Vec<CssPropertyDescriptor>,
}

impl ElementDeclaration {
    /// Create an empty declaration for a tag.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Find a property by name.
    pub fn property(&self, name: &str) -> Option<&PropertyDescriptor> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// Flatten a manifest declaration.
    ///
    /// Properties are public, non-static fields; methods are public,
    /// non-static methods. Everything else is copied as-is.
    pub fn from_manifest(tag: &str, decl: &Declaration) -> Self {
        let mut properties = Vec::new();
        let mut methods = Vec::new();

        for member in decl.members.iter().filter(|m| m.is_public() && !m.is_static) {
            match member.kind {
                MemberKind::Field => properties.push(PropertyDescriptor {
                    name: member.name.clone(),
                    attribute: member.attribute.clone(),
                    type_text: member.type_ref.as_ref().map(|t| t.text.clone()),
                    default: member.default.clone(),
                    description: member.description.clone(),
                    is_static: member.is_static,
                    reflects: member.reflects,
                    deprecated: member
                        .deprecated
                        .as_ref()
                        .is_some_and(|d| d.is_deprecated()),
                    readonly: member.readonly,
                }),
                MemberKind::Method => methods.push(MethodDescriptor {
                    name: member.name.clone(),
                    description: member.description.clone(),
                    parameters: member
                        .parameters
                        .iter()
                        .map(|p| (p.name.clone(), p.type_ref.as_ref().map(|t| t.text.clone())))
                        .collect(),
                    return_type: member
                        .return_value
                        .as_ref()
                        .and_then(|r| r.type_ref.as_ref())
                        .map(|t| t.text.clone()),
                }),
                MemberKind::Unknown => {}
            }
        }

        Self {
            name: tag.to_string(),
            class_name: decl.name.clone(),
            description: decl
                .description
                .clone()
                .or_else(|| decl.summary.clone())
                .unwrap_or_default(),
            properties,
            attributes: decl
                .attributes
                .iter()
                .map(|a| AttributeDescriptor {
                    name: a.name.clone(),
                    type_text: a.type_ref.as_ref().map(|t| t.text.clone()),
                    default: a.default.clone(),
                    field_name: a.field_name.clone(),
                    description: a.description.clone(),
                })
                .collect(),
            methods,
            events: decl
                .events
                .iter()
                .map(|e| EventDescriptor {
                    name: e.name.clone(),
                    description: e.description.clone(),
                })
                .collect(),
            slots: decl
                .slots
                .iter()
                .map(|s| SlotDescriptor {
                    name: s.name.clone(),
                    description: s.description.clone(),
                })
                .collect(),
            css_parts: decl
                .css_parts
                .iter()
                .map(|p| CssPartDescriptor {
                    name: p.name.clone(),
                    description: p.description.clone(),
                })
                .collect(),
            css_properties: decl
                .css_properties
                .iter()
                .map(|p| CssPropertyDescriptor {
                    name: p.name.clone(),
                    description: p.description.clone(),
                    default: p.default.clone(),
                })
                .collect(),
        }
    }
}
