//! The DOM surface the demo engine runs against.
//!
//! Everything the engine does to the page goes through [`Dom`] and
//! [`ElementHandle`]. [`crate::memory::MemoryDom`] implements them in
//! process; the `web` feature implements them over `web-sys`.

use std::fmt::Debug;
use std::rc::Rc;

use serde::Serialize;
use serde_json::Value;

use crate::error::DemoError;

/// An event observed on an element.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DomEvent {
    /// Event type, e.g. `click` or `value-changed`.
    pub kind: String,
    /// `CustomEvent.detail`, or `null`.
    pub detail: Value,
}

impl DomEvent {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            detail: Value::Null,
        }
    }

    pub fn with_detail(mut self, detail: Value) -> Self {
        self.detail = detail;
        self
    }
}

/// Event callback. Receives the element the listener was added to.
pub type Listener<E> = Rc<dyn Fn(&E, &DomEvent)>;

/// Handle returned by [`ElementHandle::add_listener`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u32);

/// A live element. Handles are cheap to clone and refer to the same node.
pub trait ElementHandle: Clone + Debug + 'static {
    fn tag_name(&self) -> String;

    fn is_connected(&self) -> bool;

    /// Read a JavaScript property. Missing properties read as `null`.
    fn property(&self, name: &str) -> Value;

    fn set_property(&self, name: &str, value: &Value);

    fn attribute(&self, name: &str) -> Option<String>;

    fn set_attribute(&self, name: &str, value: &str);

    fn remove_attribute(&self, name: &str);

    /// Add (`force = true`) or remove a boolean attribute.
    fn toggle_attribute(&self, name: &str, force: bool) {
        if force {
            self.set_attribute(name, "");
        } else {
            self.remove_attribute(name);
        }
    }

    /// Remove every light DOM child.
    fn clear_children(&self);

    fn append_text(&self, text: &str);

    /// Append `<div slot="{slot}">{text}</div>`.
    fn append_slotted(&self, slot: &str, text: &str);

    /// Replace the light DOM with parsed markup.
    fn set_inner_markup(&self, markup: &str);

    /// Set an inline style property, e.g. a `--custom-property`.
    fn set_style_property(&self, name: &str, value: &str);

    fn remove_style_property(&self, name: &str);

    /// Computed value of a style property, untrimmed.
    fn computed_style_property(&self, name: &str) -> String;

    fn add_listener(&self, event: &str, listener: Listener<Self>) -> ListenerId;

    fn remove_listener(&self, id: ListenerId);
}

/// The page hosting the demo output region.
pub trait Dom {
    type Element: ElementHandle;

    /// Whether `tag` is in the custom element registry.
    fn is_defined(&self, tag: &str) -> bool;

    fn create_element(&self, tag: &str) -> Result<Self::Element, DemoError>;

    /// Insert into the demo output region.
    fn mount(&self, element: &Self::Element);

    fn unmount(&self, element: &Self::Element);

    /// Run `callback` once `tag` gets defined. May never run.
    fn when_defined(&self, tag: &str, callback: Box<dyn FnOnce()>);
}
