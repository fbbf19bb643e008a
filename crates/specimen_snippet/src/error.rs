//! Error types for snippet rendering.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SnippetError {
    #[error("Highlighting failed: {0}")]
    Highlight(String),
}

impl From<syntect::Error> for SnippetError {
    fn from(err: syntect::Error) -> Self {
        Self::Highlight(err.to_string())
    }
}
