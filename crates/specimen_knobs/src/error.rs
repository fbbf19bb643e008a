//! Error types for template scanning.

use thiserror::Error;

/// Error while scanning author `<template>` markup.
///
/// Only structurally broken markup is an error. Templates with unknown
/// targets or shapes are skipped silently.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("Unterminated <{tag}> block at line {line}")]
    Unterminated { tag: String, line: u32 },
}
