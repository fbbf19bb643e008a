//! # specimen_manifest
//!
//! Manifest - read access to a custom elements manifest for Specimen.
//!
//! ## Name Origin
//!
//! A **manifest** is the cargo list of a ship: everything on board, in one
//! place. `custom-elements.json` plays the same role for a package of web
//! components, and this crate is the only part of Specimen that knows its
//! shape.
//!
//! ## Usage
//!
//! ```rust
//! use specimen_manifest::{element_declaration, parse_manifest};
//!
//! let manifest = parse_manifest(r#"{
//!   "schemaVersion": "1.0.0",
//!   "modules": [{
//!     "kind": "javascript-module",
//!     "path": "foo-bar.js",
//!     "declarations": [{
//!       "kind": "class",
//!       "name": "FooBar",
//!       "customElement": true,
//!       "tagName": "foo-bar",
//!       "members": [
//!         { "kind": "field", "name": "disabled", "type": { "text": "boolean" }, "default": "false" }
//!       ]
//!     }]
//!   }]
//! }"#).unwrap();
//!
//! let decl = element_declaration(&manifest, None, "foo-bar").unwrap();
//! assert_eq!(decl.properties[0].name, "disabled");
//! ```

pub mod accessor;
pub mod declaration;
pub mod docs;
pub mod error;
pub mod loader;
pub mod schema;

pub use accessor::{
    custom_elements, element_declaration, element_names, first_declaration, has_custom_elements,
    ElementRef,
};
pub use declaration::{
    AttributeDescriptor, CssPartDescriptor, CssPropertyDescriptor, ElementDeclaration,
    EventDescriptor, MethodDescriptor, PropertyDescriptor, SlotDescriptor,
};
pub use docs::{DocSection, DocSections, SectionKind};
pub use error::ManifestError;
pub use loader::{parse_manifest, FetchTicket, ManifestLoader};
pub use schema::Manifest;
