//! Elements command - List the custom elements of a manifest

use clap::Args;
use serde::Serialize;
use specimen_manifest::{custom_elements, has_custom_elements, ElementDeclaration, ManifestError};

use super::{summary, CommandResult, Context};

#[derive(Args)]
pub struct ElementsArgs {
    /// Output format (text, json)
    #[arg(short, long, default_value = "text")]
    pub format: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ElementEntry<'a> {
    tag_name: &'a str,
    class_name: &'a str,
    summary: &'a str,
}

pub fn run(ctx: &Context, args: ElementsArgs) -> CommandResult {
    let manifest = ctx.load_manifest()?;
    if !has_custom_elements(&manifest) {
        return Err(ManifestError::NoCustomElements.into());
    }

    let declarations: Vec<ElementDeclaration> = custom_elements(&manifest, ctx.only())
        .into_iter()
        .map(|e| ElementDeclaration::from_manifest(e.tag_name, e.declaration))
        .collect();
    tracing::debug!(
        manifest = %ctx.manifest_path().display(),
        count = declarations.len(),
        "listing elements"
    );

    match args.format.as_str() {
        "json" => {
            let entries: Vec<ElementEntry<'_>> = declarations
                .iter()
                .map(|decl| ElementEntry {
                    tag_name: &decl.name,
                    class_name: &decl.class_name,
                    summary: summary(&decl.description),
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
        _ => {
            let width = declarations.iter().map(|d| d.name.len()).max().unwrap_or(0);
            for decl in &declarations {
                println!("{:<width$}  {}", decl.name, summary(&decl.description));
            }
        }
    }

    Ok(())
}
