//! Copying the snippet.

use serde::Serialize;

use crate::error::DemoError;

/// Platform clipboard.
pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> Result<(), DemoError>;
}

/// Transient status of the copy button.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CopyStatus {
    #[default]
    Idle,
    Copied,
    Failed,
}

impl CopyStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Idle => "Copy",
            Self::Copied => "Copied",
            Self::Failed => "Copy failed",
        }
    }
}

/// Clipboard held in memory. `unavailable()` models a platform without a
/// clipboard API.
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    contents: Option<String>,
    unavailable: bool,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn unavailable() -> Self {
        Self {
            contents: None,
            unavailable: true,
        }
    }

    #[inline]
    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), DemoError> {
        if self.unavailable {
            return Err(DemoError::Clipboard("clipboard API unavailable".to_string()));
        }
        self.contents = Some(text.to_string());
        Ok(())
    }
}

/// Copy `text`, reporting failure as a status instead of an error.
pub fn copy_text(clipboard: &mut impl Clipboard, text: &str) -> CopyStatus {
    match clipboard.write_text(text) {
        Ok(()) => CopyStatus::Copied,
        Err(err) => {
            tracing::warn!("{err}");
            CopyStatus::Failed
        }
    }
}
