//! Configuration file loading for specimen.
//!
//! Reads `specimen.config.json` from the current working directory, or the
//! file given with `--config`. Command line flags override every value.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "specimen.config.json";

/// Top-level specimen configuration.
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecimenConfig {
    /// JSON Schema reference (for editor autocompletion).
    #[serde(rename = "$schema", default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Path to `custom-elements.json`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manifest: Option<PathBuf>,

    /// Comma separated list of tags to expose.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub only: Option<String>,

    /// Property names that never get a knob.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude: Option<String>,

    /// HTML file holding the author `<template>` elements.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub templates: Option<PathBuf>,

    /// Highlight snippets. Defaults to `true`.
    #[serde(default = "default_highlight")]
    pub highlight: bool,
}

fn default_highlight() -> bool {
    true
}

impl Default for SpecimenConfig {
    fn default() -> Self {
        Self {
            schema: None,
            manifest: None,
            only: None,
            exclude: None,
            templates: None,
            highlight: true,
        }
    }
}

/// Load the config file. `path` overrides `./specimen.config.json`.
///
/// A missing default file is not an error. Anything else that goes wrong
/// prints a warning and yields the defaults.
pub fn load_config(path: Option<&Path>) -> SpecimenConfig {
    let config_path = match path {
        Some(path) => path.to_path_buf(),
        None => {
            let base = std::env::current_dir().unwrap_or_default();
            let default_path = base.join(CONFIG_FILE);
            if !default_path.exists() {
                return SpecimenConfig::default();
            }
            default_path
        }
    };

    match std::fs::read_to_string(&config_path) {
        Ok(content) => match serde_json::from_str(&content) {
            Ok(config) => config,
            Err(e) => {
                eprintln!(
                    "\x1b[33mWarning:\x1b[0m Failed to parse {}: {}",
                    config_path.display(),
                    e
                );
                SpecimenConfig::default()
            }
        },
        Err(e) => {
            eprintln!(
                "\x1b[33mWarning:\x1b[0m Failed to read {}: {}",
                config_path.display(),
                e
            );
            SpecimenConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config: SpecimenConfig = serde_json::from_str("{}").unwrap();
        assert!(config.highlight);
        assert!(config.manifest.is_none());
        assert!(config.only.is_none());
    }

    #[test]
    fn test_full_config() {
        let config: SpecimenConfig = serde_json::from_str(
            r#"{
              "$schema": "./node_modules/specimen/schema.json",
              "manifest": "dist/custom-elements.json",
              "only": "x-button,x-card",
              "exclude": "renderer",
              "templates": "demo/templates.html",
              "highlight": false
            }"#,
        )
        .unwrap();

        assert_eq!(config.manifest, Some(PathBuf::from("dist/custom-elements.json")));
        assert_eq!(config.only.as_deref(), Some("x-button,x-card"));
        assert_eq!(config.exclude.as_deref(), Some("renderer"));
        assert_eq!(config.templates, Some(PathBuf::from("demo/templates.html")));
        assert!(!config.highlight);
    }

    #[test]
    fn test_unreadable_file_falls_back() {
        let config = load_config(Some(Path::new("/nonexistent/specimen.config.json")));
        assert!(config.highlight);
        assert!(config.manifest.is_none());
    }
}
