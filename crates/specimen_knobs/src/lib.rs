//! # specimen_knobs
//!
//! Knobs - editable controls derived from a custom element's public API.
//!
//! ## Name Origin
//!
//! A **knob** is the dial on a mixing desk: turn it and the sound changes
//! while the track keeps playing. Each knob here is bound to one property,
//! attribute, slot or CSS custom property of the element being demoed.
//!
//! ## Features
//!
//! - Knob derivation from manifest properties ([`derive_knobs`])
//! - Custom knobs from author `<template>` markup ([`derive_custom_knobs`])
//! - The immutable knob value map ([`KnobValues`])
//! - Slot and CSS custom property values
//! - The per-host template registry ([`TemplateRegistry`])

pub mod css;
pub mod custom;
pub mod error;
pub mod kind;
pub mod knob;
pub mod markup;
pub mod registry;
pub mod slots;
pub mod template;
pub mod values;

pub use css::{derive_css_values, CssValue};
pub use custom::derive_custom_knobs;
pub use error::TemplateError;
pub use kind::{literal_options, normalize_type, unquote, KnobKind};
pub use knob::{default_value, derive_knobs, Knob};
pub use registry::{DemoId, TemplateRegistry};
pub use slots::{derive_slot_values, placeholder, sort_slots, SlotValue};
pub use template::{scan_templates, TemplateKind, TemplateNode};
pub use values::{display_value, is_truthy, number_value, KnobEntry, KnobValues};
