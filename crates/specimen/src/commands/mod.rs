//! CLI commands.

pub mod docs;
pub mod elements;
pub mod knobs;
pub mod snippet;

use std::path::{Path, PathBuf};

use serde_json::Value;
use specimen_demo::{DemoError, DemoHost, ElementDefinition, MemoryDom};
use specimen_knobs::{number_value, DemoId, KnobKind};
use specimen_manifest::{element_declaration, Manifest, ManifestError, ManifestLoader};

use crate::config::SpecimenConfig;

pub type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// Manifest used when neither the flag nor the config names one.
pub const DEFAULT_MANIFEST: &str = "custom-elements.json";

/// Settings shared by every command: config values with flag overrides.
pub struct Context {
    config: SpecimenConfig,
    manifest: PathBuf,
    only: Option<String>,
}

impl Context {
    pub fn new(config: SpecimenConfig, manifest: Option<PathBuf>, only: Option<String>) -> Self {
        let manifest = manifest
            .or_else(|| config.manifest.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_MANIFEST));
        let only = only.or_else(|| config.only.clone());
        Self {
            config,
            manifest,
            only,
        }
    }

    #[inline]
    pub fn only(&self) -> Option<&str> {
        self.only.as_deref()
    }

    #[inline]
    pub fn exclude(&self) -> &str {
        self.config.exclude.as_deref().unwrap_or_default()
    }

    #[inline]
    pub fn highlight(&self) -> bool {
        self.config.highlight
    }

    pub fn manifest_path(&self) -> &Path {
        &self.manifest
    }

    pub fn load_manifest(&self) -> Result<Manifest, ManifestError> {
        let mut loader = ManifestLoader::new();
        loader.load_path(&self.manifest).cloned()
    }

    /// Author templates, or an empty document when none are configured.
    pub fn templates(&self) -> std::io::Result<String> {
        match &self.config.templates {
            Some(path) => std::fs::read_to_string(path),
            None => Ok(String::new()),
        }
    }

    /// A connected demo host with `tag` selected, rendered and idle.
    ///
    /// The in-process page defines the element from its declaration, so
    /// properties start at their declared defaults.
    pub fn demo_host(
        &self,
        manifest: &Manifest,
        tag: &str,
    ) -> Result<DemoHost<MemoryDom>, Box<dyn std::error::Error>> {
        let declaration = element_declaration(manifest, self.only(), tag).map_err(DemoError::from)?;

        let dom = MemoryDom::new();
        dom.define(tag, ElementDefinition::from_declaration(&declaration));

        let mut host = DemoHost::new(dom, DemoId(0));
        host.set_templates(&self.templates()?)?;
        host.connect();
        host.select_declaration(declaration, self.exclude());
        host.run_until_idle();
        Ok(host)
    }
}

/// Split `name=value`. A bare `name` has an empty value.
pub fn parse_assignment(text: &str) -> (&str, &str) {
    match text.split_once('=') {
        Some((name, value)) => (name.trim(), value),
        None => (text.trim(), ""),
    }
}

/// Knob value typed for the knob kind.
///
/// Booleans accept `true`, `false` or nothing (true). Numbers that do not
/// parse are unset. Untyped knobs take JSON when it parses, else text.
pub fn knob_value(kind: KnobKind, text: &str) -> Value {
    match kind {
        KnobKind::Boolean => Value::Bool(!matches!(text.trim(), "false" | "0")),
        KnobKind::Number => text
            .trim()
            .parse::<f64>()
            .map(number_value)
            .unwrap_or(Value::Null),
        KnobKind::Text | KnobKind::Select => Value::String(text.to_string()),
        KnobKind::Other => {
            serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
        }
    }
}

/// First line of a description, for one-line listings.
pub fn summary(description: &str) -> &str {
    description.lines().next().unwrap_or_default().trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_assignment() {
        assert_eq!(parse_assignment("label=Hi there"), ("label", "Hi there"));
        assert_eq!(parse_assignment("--x=a=b"), ("--x", "a=b"));
        assert_eq!(parse_assignment("disabled"), ("disabled", ""));
        assert_eq!(parse_assignment("=Body"), ("", "Body"));
    }

    #[test]
    fn test_knob_value() {
        assert_eq!(knob_value(KnobKind::Boolean, ""), json!(true));
        assert_eq!(knob_value(KnobKind::Boolean, "false"), json!(false));
        assert_eq!(knob_value(KnobKind::Number, "12"), json!(12));
        assert_eq!(knob_value(KnobKind::Number, "x"), Value::Null);
        assert_eq!(knob_value(KnobKind::Text, "12"), json!("12"));
        assert_eq!(knob_value(KnobKind::Other, "[1,2]"), json!([1, 2]));
        assert_eq!(knob_value(KnobKind::Other, "plain"), json!("plain"));
    }

    #[test]
    fn test_context_overrides() {
        let config = SpecimenConfig {
            manifest: Some(PathBuf::from("from-config.json")),
            only: Some("x-a".to_string()),
            ..SpecimenConfig::default()
        };
        let ctx = Context::new(config, Some(PathBuf::from("flag.json")), None);
        assert_eq!(ctx.manifest_path(), Path::new("flag.json"));
        assert_eq!(ctx.only(), Some("x-a"));

        let ctx = Context::new(SpecimenConfig::default(), None, None);
        assert_eq!(ctx.manifest_path(), Path::new(DEFAULT_MANIFEST));
        assert_eq!(ctx.exclude(), "");
        assert!(ctx.highlight());
    }
}
