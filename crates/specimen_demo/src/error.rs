//! Error types for the demo host.

use specimen_knobs::TemplateError;
use specimen_manifest::ManifestError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DemoError {
    /// The selected tag has no custom element definition yet.
    #[error("<{tag}> is not defined")]
    NotDefined { tag: String },

    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error("Copy to clipboard failed: {0}")]
    Clipboard(String),

    /// A browser DOM call failed.
    #[error("DOM error: {0}")]
    Dom(String),
}
