//! # specimen_snippet
//!
//! Snippet - the source view of a Specimen demo.
//!
//! ## Name Origin
//!
//! A **snippet** is a small cut piece of something larger. Here it is the
//! few lines of markup and style that reproduce exactly what the live demo
//! currently shows, ready to be copied into a page.
//!
//! ## Usage
//!
//! ```rust
//! use serde_json::json;
//! use specimen_knobs::{DemoId, KnobEntry, KnobValues, SlotValue, TemplateRegistry};
//! use specimen_snippet::{generate_markup, SnippetInput};
//!
//! let values = KnobValues::new().with(
//!     "disabled",
//!     KnobEntry { knob_type: "boolean".into(), value: json!(true), attribute: None, custom: false },
//! );
//! let registry = TemplateRegistry::new();
//! let markup = generate_markup(&SnippetInput {
//!     registry: &registry,
//!     id: DemoId(0),
//!     tag: "foo-bar",
//!     values: &values,
//!     slots: &[SlotValue::new("", "Hi")],
//!     css: &[],
//! });
//! assert_eq!(markup, "<foo-bar disabled>Hi</foo-bar>");
//! ```

pub mod error;
pub mod generate;
pub mod highlight;
pub mod unindent;

pub use error::SnippetError;
pub use generate::{generate_markup, style_block, SnippetInput};
pub use highlight::{highlight, plain, Grammar};
pub use unindent::{trim_blank_lines, unindent, INDENT};

/// Generate the snippet for `input` and highlight it.
pub fn render_snippet(input: &SnippetInput<'_>) -> Result<String, SnippetError> {
    highlight(&generate_markup(input), Grammar::Markup)
}

/// Like [`render_snippet`], falling back to escaped plain text when the
/// highlighter fails.
pub fn render_snippet_or_plain(input: &SnippetInput<'_>) -> String {
    let markup = generate_markup(input);
    highlight(&markup, Grammar::Markup).unwrap_or_else(|err| {
        tracing::warn!("{err}, showing plain snippet");
        plain(&markup, Grammar::Markup)
    })
}
