//! Snippet command - Render an element and print its snippet

use clap::Args;
use specimen_demo::{DemoHost, MemoryDom};

use super::{knob_value, parse_assignment, CommandResult, Context};

#[derive(Args)]
pub struct SnippetArgs {
    /// Tag name of the element
    pub tag: String,

    /// Set a knob (`name=value`, repeatable)
    #[arg(long = "set", value_name = "NAME=VALUE")]
    pub knobs: Vec<String>,

    /// Set slot content (`name=content`, empty name for the default slot)
    #[arg(long = "slot", value_name = "NAME=CONTENT")]
    pub slots: Vec<String>,

    /// Set a CSS custom property (`--name=value`)
    #[arg(long = "css", value_name = "NAME=VALUE", allow_hyphen_values = true)]
    pub css: Vec<String>,

    /// Print plain text instead of highlighted HTML
    #[arg(long)]
    pub plain: bool,
}

pub fn run(ctx: &Context, args: SnippetArgs) -> CommandResult {
    let manifest = ctx.load_manifest()?;
    let mut host = ctx.demo_host(&manifest, &args.tag)?;

    apply_knobs(&mut host, &args.knobs)?;
    for assignment in &args.slots {
        let (name, content) = parse_assignment(assignment);
        if !host.set_slot(name, content) {
            return Err(format!("<{}> has no slot \"{}\"", args.tag, name).into());
        }
    }
    for assignment in &args.css {
        let (name, value) = parse_assignment(assignment);
        if !host.set_css(name, value) {
            return Err(format!("<{}> has no CSS custom property {}", args.tag, name).into());
        }
    }
    let ticks = host.run_until_idle();
    tracing::debug!(ticks, "demo settled");

    let snippet = if args.plain || !ctx.highlight() {
        host.snippet_markup()
    } else {
        host.snippet_html()
    };
    if let Some(snippet) = snippet {
        println!("{snippet}");
    }
    Ok(())
}

fn apply_knobs(host: &mut DemoHost<MemoryDom>, assignments: &[String]) -> CommandResult {
    let knobs: Vec<_> = host
        .knobs()
        .into_iter()
        .chain(host.custom_knobs())
        .collect();

    for assignment in assignments {
        let (name, text) = parse_assignment(assignment);
        let Some(knob) = knobs
            .iter()
            .find(|k| k.name == name || k.attribute.as_deref() == Some(name))
        else {
            return Err(format!("unknown knob \"{name}\"").into());
        };
        if !knob.kind().is_editable() {
            tracing::warn!(knob = %knob.name, "knob type {} has no editor", knob.knob_type);
        }
        host.set_knob(&knob.name, knob_value(knob.kind(), text));
    }
    Ok(())
}
