//! Docs command - Print the API documentation of one element

use clap::Args;
use specimen_manifest::{
    element_declaration, first_declaration, DocSections, ElementDeclaration, Manifest,
    ManifestError, SectionKind,
};

use super::{CommandResult, Context};

#[derive(Args)]
pub struct DocsArgs {
    /// Tag name of the element (default: the first exposed element)
    pub tag: Option<String>,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text")]
    pub format: String,
}

pub fn run(ctx: &Context, args: DocsArgs) -> CommandResult {
    let manifest = ctx.load_manifest()?;
    let decl = declaration(&manifest, ctx.only(), args.tag.as_deref())?;

    if args.format == "json" {
        println!("{}", serde_json::to_string_pretty(&decl)?);
        return Ok(());
    }

    print!("{}", render_docs(&decl));
    Ok(())
}

fn declaration(
    manifest: &Manifest,
    only: Option<&str>,
    tag: Option<&str>,
) -> Result<ElementDeclaration, ManifestError> {
    match tag {
        Some(tag) => element_declaration(manifest, only, tag),
        None => first_declaration(manifest, only),
    }
}

/// Plain text documentation. Descriptions are printed as written.
fn render_docs(decl: &ElementDeclaration) -> String {
    let mut out = String::new();
    out.push_str(&format!("<{}>", decl.name));
    if !decl.class_name.is_empty() {
        out.push_str(&format!(" ({})", decl.class_name));
    }
    out.push('\n');
    if !decl.description.is_empty() {
        out.push('\n');
        out.push_str(decl.description.trim_end());
        out.push('\n');
    }

    let sections = DocSections::for_declaration(decl);
    for section in sections.visible() {
        out.push_str(&format!("\n{} ({})\n", section.kind.label(), section.count));
        for line in section_lines(decl, section.kind) {
            out.push_str("  ");
            out.push_str(&line);
            out.push('\n');
        }
    }

    out
}

fn with_description(head: String, description: Option<&str>) -> String {
    match description.filter(|d| !d.is_empty()) {
        Some(description) => format!("{head} - {description}"),
        None => head,
    }
}

fn section_lines(decl: &ElementDeclaration, kind: SectionKind) -> Vec<String> {
    match kind {
        SectionKind::Properties => decl
            .properties
            .iter()
            .map(|p| {
                let mut head = p.name.clone();
                if let Some(ty) = &p.type_text {
                    head.push_str(&format!(": {ty}"));
                }
                if let Some(default) = &p.default {
                    head.push_str(&format!(" = {default}"));
                }
                if let Some(attribute) = &p.attribute {
                    head.push_str(&format!(" [{attribute}]"));
                }
                if p.deprecated {
                    head.push_str(" (deprecated)");
                }
                with_description(head, p.description.as_deref())
            })
            .collect(),
        SectionKind::Attributes => decl
            .attributes
            .iter()
            .map(|a| {
                let mut head = a.name.clone();
                if let Some(ty) = &a.type_text {
                    head.push_str(&format!(": {ty}"));
                }
                if let Some(field) = &a.field_name {
                    head.push_str(&format!(" -> {field}"));
                }
                with_description(head, a.description.as_deref())
            })
            .collect(),
        SectionKind::Methods => decl
            .methods
            .iter()
            .map(|m| {
                let params: Vec<String> = m
                    .parameters
                    .iter()
                    .map(|(name, ty)| match ty {
                        Some(ty) => format!("{name}: {ty}"),
                        None => name.clone(),
                    })
                    .collect();
                let mut head = format!("{}({})", m.name, params.join(", "));
                if let Some(ret) = &m.return_type {
                    head.push_str(&format!(": {ret}"));
                }
                with_description(head, m.description.as_deref())
            })
            .collect(),
        SectionKind::Events => decl
            .events
            .iter()
            .map(|e| with_description(e.name.clone(), e.description.as_deref()))
            .collect(),
        SectionKind::Slots => decl
            .slots
            .iter()
            .map(|s| {
                let name = if s.name.is_empty() {
                    "(default)".to_string()
                } else {
                    s.name.clone()
                };
                with_description(name, s.description.as_deref())
            })
            .collect(),
        SectionKind::CssParts => decl
            .css_parts
            .iter()
            .map(|p| with_description(p.name.clone(), p.description.as_deref()))
            .collect(),
        SectionKind::CssProperties => decl
            .css_properties
            .iter()
            .map(|p| {
                let mut head = p.name.clone();
                if let Some(default) = &p.default {
                    head.push_str(&format!(" = {default}"));
                }
                with_description(head, p.description.as_deref())
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use specimen_manifest::{parse_manifest, EventDescriptor, PropertyDescriptor, SlotDescriptor};

    #[test]
    fn test_declaration_defaults_to_first_element() {
        let manifest = parse_manifest(
            r#"{
              "schemaVersion": "1.0.0",
              "modules": [{
                "kind": "javascript-module",
                "path": "a.js",
                "declarations": [
                  { "kind": "class", "name": "A", "customElement": true, "tagName": "a-el" },
                  { "kind": "class", "name": "B", "customElement": true, "tagName": "b-el" }
                ]
              }]
            }"#,
        )
        .unwrap();

        assert_eq!(declaration(&manifest, None, None).unwrap().name, "a-el");
        assert_eq!(declaration(&manifest, Some("b-el"), None).unwrap().name, "b-el");
        assert_eq!(declaration(&manifest, None, Some("b-el")).unwrap().name, "b-el");
        assert!(matches!(
            declaration(&manifest, Some("c-el"), None),
            Err(ManifestError::NoCustomElements)
        ));
    }

    #[test]
    fn test_render_docs_hides_empty_sections() {
        let mut decl = ElementDeclaration::new("foo-bar");
        decl.class_name = "FooBar".to_string();
        decl.description = "A bar of foo.".to_string();
        decl.properties
            .push(PropertyDescriptor::new("disabled", "boolean").with_default("false"));
        decl.events.push(EventDescriptor::new("change"));
        decl.slots.push(SlotDescriptor::new(""));

        let text = render_docs(&decl);
        assert_eq!(
            text,
            "<foo-bar> (FooBar)\n\
             \n\
             A bar of foo.\n\
             \n\
             Properties (1)\n  disabled: boolean = false\n\
             \n\
             Events (1)\n  change\n\
             \n\
             Slots (1)\n  (default)\n"
        );
    }
}
