//! # specimen_demo
//!
//! Demo - the live element demo of Specimen, with knobs kept in sync.
//!
//! ## Name Origin
//!
//! A **demo** is where an element is put to work in front of an audience.
//! This crate owns the live instance, feeds it knob values, listens to what
//! it reports back and keeps the snippet in step with both.
//!
//! ## Backends
//!
//! The engine only talks to the page through the [`Dom`] trait.
//!
//! - [`MemoryDom`] - an in-process page used by the CLI and by tests
//! - `web` feature - the browser page through `web-sys`
//!
//! ## Usage
//!
//! ```rust
//! use serde_json::json;
//! use specimen_demo::{DemoHost, ElementDefinition, MemoryDom};
//! use specimen_knobs::DemoId;
//! use specimen_manifest::{ElementDeclaration, PropertyDescriptor};
//!
//! let mut decl = ElementDeclaration::new("foo-bar");
//! decl.properties.push(PropertyDescriptor::new("disabled", "boolean").with_default("false"));
//!
//! let dom = MemoryDom::new();
//! dom.define("foo-bar", ElementDefinition::from_declaration(&decl));
//!
//! let mut host = DemoHost::new(dom, DemoId(0));
//! host.connect();
//! host.select_declaration(decl, "");
//! host.run_until_idle();
//!
//! host.set_knob("disabled", json!(true));
//! host.run_until_idle();
//! assert_eq!(host.snippet_markup().as_deref(), Some("<foo-bar disabled></foo-bar>"));
//! ```

pub mod clipboard;
pub mod controllers;
pub mod dom;
pub mod error;
pub mod host;
pub mod memory;
pub mod panels;
pub mod renderer;
pub mod sync;

#[cfg(feature = "web")]
pub mod web;

pub use clipboard::{copy_text, Clipboard, CopyStatus, MemoryClipboard};
pub use controllers::{
    Controller, EventLogEntry, EventsController, SlotsController, StylesController,
    UpdateScheduler,
};
pub use dom::{Dom, DomEvent, ElementHandle, Listener, ListenerId};
pub use error::DemoError;
pub use host::{DemoHost, HostEvent, RenderState};
pub use memory::{ElementDefinition, MemoryDom, MemoryElement, MemoryNode, PropertyBinding};
pub use panels::{DemoPanel, DemoPanelKind, DemoPanels};
pub use renderer::{apply_values, LiveRenderer, RenderOutcome};
pub use sync::{changed_event, changed_property, read_value, KnobState, KnobSync};
