//! # Specimen
//!
//! Live demos and copyable snippets for custom elements, driven by a
//! custom elements manifest.
//!
//! This crate re-exports all Specimen sub-crates for unified documentation.
//!
//! ## Crates
//!
//! - [`manifest`] - Custom elements manifest schema and accessors
//! - [`knobs`] - Knob derivation, value map and author templates
//! - [`snippet`] - Snippet generation and highlighting
//! - [`demo`] - Live demo host with synchronized knobs

/// Custom elements manifest schema and accessors.
pub use specimen_manifest as manifest;

/// Knob derivation, value map and author templates.
pub use specimen_knobs as knobs;

/// Snippet generation and highlighting.
pub use specimen_snippet as snippet;

/// Live demo host with synchronized knobs.
pub use specimen_demo as demo;
