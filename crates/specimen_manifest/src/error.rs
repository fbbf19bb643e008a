//! Error types for manifest access.

use thiserror::Error;

/// Errors raised while loading or querying a manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// The selected tag is not declared (or filtered out by `only`).
    #[error("Could not find declaration for <{name}>")]
    DeclarationNotFound { name: String },

    /// The manifest exposes no custom elements at all.
    #[error("No custom elements found in manifest")]
    NoCustomElements,

    /// The manifest JSON could not be decoded.
    #[error("Failed to parse manifest: {0}")]
    Json(#[from] serde_json::Error),

    /// The manifest file could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
