//! Knobs command - Show what the demo of one element can edit

use clap::Args;
use serde::Serialize;
use specimen_demo::DemoPanels;
use specimen_knobs::{display_value, CssValue, Knob, SlotValue};

use super::{CommandResult, Context};

#[derive(Args)]
pub struct KnobsArgs {
    /// Tag name of the element
    pub tag: String,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text")]
    pub format: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct KnobsReport {
    knobs: Vec<Knob>,
    custom_knobs: Vec<Knob>,
    slots: Vec<SlotValue>,
    css_values: Vec<CssValue>,
    panels: DemoPanels,
}

pub fn run(ctx: &Context, args: KnobsArgs) -> CommandResult {
    let manifest = ctx.load_manifest()?;
    let host = ctx.demo_host(&manifest, &args.tag)?;

    let report = KnobsReport {
        knobs: host.knobs(),
        custom_knobs: host.custom_knobs(),
        slots: host.slots(),
        css_values: host.css_values(),
        panels: host.panels(),
    };

    if args.format == "json" {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    for knob in report.knobs.iter().chain(&report.custom_knobs) {
        let mut line = format!("{} ({:?})", knob.name, knob.kind());
        if !knob.knob_type.is_empty() {
            line.push_str(&format!(": {}", knob.knob_type));
        }
        if !knob.value.is_null() {
            line.push_str(&format!(" = {}", display_value(&knob.value)));
        }
        if knob.custom {
            line.push_str(" [custom]");
        }
        if !knob.options.is_empty() {
            line.push_str(&format!(" {{{}}}", knob.options.join(", ")));
        }
        println!("knob  {line}");
    }
    for slot in &report.slots {
        let name = if slot.is_default() { "(default)" } else { &slot.name };
        println!("slot  {name} = {}", slot.content);
    }
    for css in &report.css_values {
        println!(
            "css   {} = {}",
            css.name,
            css.value.as_deref().or(css.default.as_deref()).unwrap_or_default()
        );
    }

    Ok(())
}
