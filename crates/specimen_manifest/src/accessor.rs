//! Element lookup over a parsed manifest.

use crate::declaration::ElementDeclaration;
use crate::error::ManifestError;
use crate::schema::{Declaration, Manifest};

/// A custom element found in the manifest.
#[derive(Debug, Clone, Copy)]
pub struct ElementRef<'a> {
    /// Resolved tag name.
    pub tag_name: &'a str,
    /// Raw manifest declaration.
    pub declaration: &'a Declaration,
}

/// Whether the manifest declares at least one custom element.
pub fn has_custom_elements(manifest: &Manifest) -> bool {
    !custom_elements(manifest, None).is_empty()
}

/// List the custom elements exposed by the manifest, in manifest order.
///
/// `only` is an optional comma separated list of tag names; when present,
/// elements not named in it are skipped.
pub fn custom_elements<'a>(manifest: &'a Manifest, only: Option<&str>) -> Vec<ElementRef<'a>> {
    let filter: Option<Vec<&str>> = only.map(|only| {
        only.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    });

    let mut elements = Vec::new();
    for module in &manifest.modules {
        for declaration in &module.declarations {
            if !declaration.custom_element {
                continue;
            }
            let Some(tag_name) = resolve_tag_name(manifest, declaration) else {
                tracing::trace!("skipping {}: no tag name", declaration.name);
                continue;
            };
            if let Some(ref filter) = filter {
                if !filter.contains(&tag_name) {
                    continue;
                }
            }
            elements.push(ElementRef {
                tag_name,
                declaration,
            });
        }
    }
    elements
}

/// Tag names of the exposed elements.
pub fn element_names(manifest: &Manifest, only: Option<&str>) -> Vec<String> {
    custom_elements(manifest, only)
        .into_iter()
        .map(|e| e.tag_name.to_string())
        .collect()
}

/// Normalized declaration for the element with tag `name`.
///
/// Fails with [`ManifestError::DeclarationNotFound`] when the tag is not
/// among the exposed elements.
pub fn element_declaration(
    manifest: &Manifest,
    only: Option<&str>,
    name: &str,
) -> Result<ElementDeclaration, ManifestError> {
    custom_elements(manifest, only)
        .into_iter()
        .find(|e| e.tag_name == name)
        .map(|e| ElementDeclaration::from_manifest(e.tag_name, e.declaration))
        .ok_or_else(|| ManifestError::DeclarationNotFound {
            name: name.to_string(),
        })
}

/// Declaration for the first exposed element, used when nothing is selected yet.
pub fn first_declaration(
    manifest: &Manifest,
    only: Option<&str>,
) -> Result<ElementDeclaration, ManifestError> {
    custom_elements(manifest, only)
        .first()
        .map(|e| ElementDeclaration::from_manifest(e.tag_name, e.declaration))
        .ok_or(ManifestError::NoCustomElements)
}

/// Tag name from the declaration, falling back to a
/// `custom-element-definition` export that points at it.
fn resolve_tag_name<'a>(manifest: &'a Manifest, declaration: &'a Declaration) -> Option<&'a str> {
    if let Some(ref tag) = declaration.tag_name {
        return Some(tag.as_str());
    }
    manifest
        .modules
        .iter()
        .flat_map(|m| m.exports.iter())
        .find(|e| {
            e.kind == "custom-element-definition"
                && e.declaration
                    .as_ref()
                    .is_some_and(|d| d.name == declaration.name)
        })
        .map(|e| e.name.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manifest() -> Manifest {
        serde_json::from_value(serde_json::json!({
            "schemaVersion": "1.0.0",
            "modules": [
                {
                    "kind": "javascript-module",
                    "path": "src/foo-bar.js",
                    "declarations": [
                        { "kind": "class", "name": "FooBar", "customElement": true, "tagName": "foo-bar" },
                        { "kind": "class", "name": "Helper" }
                    ]
                },
                {
                    "kind": "javascript-module",
                    "path": "src/baz-qux.js",
                    "declarations": [
                        { "kind": "class", "name": "BazQux", "customElement": true }
                    ],
                    "exports": [
                        { "kind": "custom-element-definition", "name": "baz-qux", "declaration": { "name": "BazQux" } }
                    ]
                }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_custom_elements() {
        let manifest = manifest();
        assert_eq!(element_names(&manifest, None), vec!["foo-bar", "baz-qux"]);
        assert!(has_custom_elements(&manifest));
    }

    #[test]
    fn test_only_filter() {
        let manifest = manifest();
        assert_eq!(element_names(&manifest, Some("baz-qux")), vec!["baz-qux"]);
        assert_eq!(
            element_names(&manifest, Some(" baz-qux , foo-bar")),
            vec!["foo-bar", "baz-qux"]
        );
    }

    #[test]
    fn test_missing_declaration() {
        let manifest = manifest();
        let err = element_declaration(&manifest, None, "nope-nope").unwrap_err();
        assert!(matches!(err, ManifestError::DeclarationNotFound { ref name } if name == "nope-nope"));

        let err = element_declaration(&manifest, Some("foo-bar"), "baz-qux").unwrap_err();
        assert!(matches!(err, ManifestError::DeclarationNotFound { .. }));
    }

    #[test]
    fn test_first_declaration() {
        let empty = Manifest::default();
        assert!(matches!(
            first_declaration(&empty, None),
            Err(ManifestError::NoCustomElements)
        ));
        assert_eq!(first_declaration(&manifest(), None).unwrap().name, "foo-bar");
    }
}
