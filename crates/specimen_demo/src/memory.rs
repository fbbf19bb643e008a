//! In-process DOM.
//!
//! Models just enough of a browser for the demo engine: a custom element
//! registry, element properties with attribute reflection, light DOM
//! children, inline and computed styles, and event listeners. Used by the
//! command line front end and by tests.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use rustc_hash::FxHashMap;
use serde_json::Value;
use specimen_knobs::{
    default_value, display_value, is_truthy, normalize_type, number_value, KnobKind,
};
use specimen_manifest::ElementDeclaration;

use crate::dom::{Dom, DomEvent, ElementHandle, Listener, ListenerId};
use crate::error::DemoError;

/// A property as the element class declares it.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyBinding {
    pub name: String,
    pub attribute: Option<String>,
    pub kind: KnobKind,
    pub reflects: bool,
    /// Value a fresh instance starts with.
    pub initial: Value,
}

/// What a defined custom element looks like from the outside.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementDefinition {
    pub properties: Vec<PropertyBinding>,
    /// Computed values of CSS custom properties when nothing overrides them.
    pub css_defaults: FxHashMap<String, String>,
}

impl ElementDefinition {
    pub fn new() -> Self {
        Self::default()
    }

    /// Definition matching a manifest declaration.
    pub fn from_declaration(decl: &ElementDeclaration) -> Self {
        let properties = decl
            .properties
            .iter()
            .map(|prop| {
                let kind = KnobKind::from_type(&normalize_type(
                    prop.type_text.as_deref().unwrap_or_default(),
                ));
                PropertyBinding {
                    name: prop.name.clone(),
                    attribute: prop.attribute.clone(),
                    kind,
                    reflects: prop.reflects,
                    initial: prop
                        .default
                        .as_deref()
                        .map(|d| default_value(kind, d))
                        .unwrap_or(Value::Null),
                }
            })
            .collect();

        let css_defaults = decl
            .css_properties
            .iter()
            .filter_map(|css| {
                css.default
                    .as_ref()
                    .map(|d| (css.name.clone(), d.clone()))
            })
            .collect();

        Self {
            properties,
            css_defaults,
        }
    }

    pub fn with_property(mut self, binding: PropertyBinding) -> Self {
        self.properties.push(binding);
        self
    }

    pub fn with_css_default(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.css_defaults.insert(name.into(), value.into());
        self
    }

    fn by_attribute(&self, attribute: &str) -> Option<&PropertyBinding> {
        self.properties
            .iter()
            .find(|p| p.attribute.as_deref() == Some(attribute))
    }

    fn by_name(&self, name: &str) -> Option<&PropertyBinding> {
        self.properties.iter().find(|p| p.name == name)
    }
}

/// A light DOM child.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemoryNode {
    Text(String),
    /// `<div slot="{slot}">{text}</div>`
    Slotted { slot: String, text: String },
    /// Unparsed markup.
    Markup(String),
}

struct ElementData {
    tag: String,
    definition: Option<Rc<ElementDefinition>>,
    properties: FxHashMap<String, Value>,
    attributes: Vec<(String, String)>,
    children: Vec<MemoryNode>,
    style: Vec<(String, String)>,
    listeners: Vec<(ListenerId, String, Listener<MemoryElement>)>,
    next_listener: u32,
    connected: bool,
}

impl ElementData {
    fn write_attribute(&mut self, name: &str, value: &str) {
        match self.attributes.iter_mut().find(|(n, _)| n == name) {
            Some((_, v)) => *v = value.to_string(),
            None => self.attributes.push((name.to_string(), value.to_string())),
        }
    }

    fn drop_attribute(&mut self, name: &str) {
        self.attributes.retain(|(n, _)| n != name);
    }
}

/// Element of a [`MemoryDom`].
#[derive(Clone)]
pub struct MemoryElement {
    inner: Rc<RefCell<ElementData>>,
}

impl fmt::Debug for MemoryElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.inner.borrow();
        f.debug_struct("MemoryElement")
            .field("tag", &data.tag)
            .field("attributes", &data.attributes)
            .field("connected", &data.connected)
            .finish()
    }
}

impl MemoryElement {
    fn new(tag: &str, definition: Option<Rc<ElementDefinition>>) -> Self {
        let properties = definition
            .iter()
            .flat_map(|def| def.properties.iter())
            .filter(|p| !p.initial.is_null())
            .map(|p| (p.name.clone(), p.initial.clone()))
            .collect();

        Self {
            inner: Rc::new(RefCell::new(ElementData {
                tag: tag.to_string(),
                definition,
                properties,
                attributes: Vec::new(),
                children: Vec::new(),
                style: Vec::new(),
                listeners: Vec::new(),
                next_listener: 0,
                connected: false,
            })),
        }
    }

    /// Fire `event` at the element, calling matching listeners in the
    /// order they were added.
    pub fn dispatch(&self, event: &DomEvent) {
        let listeners: Vec<Listener<Self>> = self
            .inner
            .borrow()
            .listeners
            .iter()
            .filter(|(_, kind, _)| *kind == event.kind)
            .map(|(_, _, listener)| Rc::clone(listener))
            .collect();

        for listener in listeners {
            listener(self, event);
        }
    }

    pub fn children(&self) -> Vec<MemoryNode> {
        self.inner.borrow().children.clone()
    }

    /// Attributes in insertion order.
    pub fn attributes(&self) -> Vec<(String, String)> {
        self.inner.borrow().attributes.clone()
    }

    #[inline]
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attribute(name).is_some()
    }

    /// Inline style value, if set.
    pub fn inline_style(&self, name: &str) -> Option<String> {
        self.inner
            .borrow()
            .style
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.clone())
    }

    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    /// Whether both handles point at the same element.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    fn set_connected(&self, connected: bool) {
        self.inner.borrow_mut().connected = connected;
    }
}

/// Property value an attribute string stands for.
fn attribute_to_property(kind: KnobKind, value: Option<&str>) -> Value {
    match (kind, value) {
        (KnobKind::Boolean, v) => Value::Bool(v.is_some()),
        (_, None) => Value::Null,
        (KnobKind::Number, Some(v)) => v
            .trim()
            .parse::<f64>()
            .map(number_value)
            .unwrap_or(Value::Null),
        (_, Some(v)) => Value::String(v.to_string()),
    }
}

impl ElementHandle for MemoryElement {
    fn tag_name(&self) -> String {
        self.inner.borrow().tag.clone()
    }

    fn is_connected(&self) -> bool {
        self.inner.borrow().connected
    }

    fn property(&self, name: &str) -> Value {
        self.inner
            .borrow()
            .properties
            .get(name)
            .cloned()
            .unwrap_or(Value::Null)
    }

    fn set_property(&self, name: &str, value: &Value) {
        let mut data = self.inner.borrow_mut();
        data.properties.insert(name.to_string(), value.clone());

        let Some(binding) = data.definition.as_ref().and_then(|d| d.by_name(name)).cloned() else {
            return;
        };
        let (true, Some(attribute)) = (binding.reflects, binding.attribute.as_deref()) else {
            return;
        };
        match (binding.kind, value) {
            (KnobKind::Boolean, v) if is_truthy(v) => data.write_attribute(attribute, ""),
            (_, Value::Null) | (KnobKind::Boolean, _) => data.drop_attribute(attribute),
            (_, v) => data.write_attribute(attribute, &display_value(v)),
        }
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.inner
            .borrow()
            .attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.clone())
    }

    fn set_attribute(&self, name: &str, value: &str) {
        let mut data = self.inner.borrow_mut();
        data.write_attribute(name, value);
        if let Some(binding) = data.definition.as_ref().and_then(|d| d.by_attribute(name)).cloned() {
            data.properties
                .insert(binding.name, attribute_to_property(binding.kind, Some(value)));
        }
    }

    fn remove_attribute(&self, name: &str) {
        let mut data = self.inner.borrow_mut();
        data.drop_attribute(name);
        if let Some(binding) = data.definition.as_ref().and_then(|d| d.by_attribute(name)).cloned() {
            data.properties
                .insert(binding.name, attribute_to_property(binding.kind, None));
        }
    }

    fn clear_children(&self) {
        self.inner.borrow_mut().children.clear();
    }

    fn append_text(&self, text: &str) {
        self.inner
            .borrow_mut()
            .children
            .push(MemoryNode::Text(text.to_string()));
    }

    fn append_slotted(&self, slot: &str, text: &str) {
        self.inner.borrow_mut().children.push(MemoryNode::Slotted {
            slot: slot.to_string(),
            text: text.to_string(),
        });
    }

    fn set_inner_markup(&self, markup: &str) {
        self.inner.borrow_mut().children = vec![MemoryNode::Markup(markup.to_string())];
    }

    fn set_style_property(&self, name: &str, value: &str) {
        let mut data = self.inner.borrow_mut();
        match data.style.iter_mut().find(|(n, _)| n == name) {
            Some((_, v)) => *v = value.to_string(),
            None => data.style.push((name.to_string(), value.to_string())),
        }
    }

    fn remove_style_property(&self, name: &str) {
        self.inner.borrow_mut().style.retain(|(n, _)| n != name);
    }

    fn computed_style_property(&self, name: &str) -> String {
        if let Some(inline) = self.inline_style(name) {
            return inline;
        }
        self.inner
            .borrow()
            .definition
            .as_ref()
            .and_then(|d| d.css_defaults.get(name).cloned())
            .unwrap_or_default()
    }

    fn add_listener(&self, event: &str, listener: Listener<Self>) -> ListenerId {
        let mut data = self.inner.borrow_mut();
        let id = ListenerId(data.next_listener);
        data.next_listener += 1;
        data.listeners.push((id, event.to_string(), listener));
        id
    }

    fn remove_listener(&self, id: ListenerId) {
        self.inner
            .borrow_mut()
            .listeners
            .retain(|(listener_id, _, _)| *listener_id != id);
    }
}

#[derive(Default)]
struct DomState {
    definitions: FxHashMap<String, Rc<ElementDefinition>>,
    waiting: Vec<(String, Box<dyn FnOnce()>)>,
    mounted: Vec<MemoryElement>,
}

/// In-process [`Dom`].
#[derive(Clone, Default)]
pub struct MemoryDom {
    state: Rc<RefCell<DomState>>,
}

impl fmt::Debug for MemoryDom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("MemoryDom")
            .field("defined", &state.definitions.keys().collect::<Vec<_>>())
            .field("mounted", &state.mounted.len())
            .finish()
    }
}

impl MemoryDom {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `tag` and run every callback waiting for it.
    pub fn define(&self, tag: &str, definition: ElementDefinition) {
        let callbacks: Vec<Box<dyn FnOnce()>> = {
            let mut state = self.state.borrow_mut();
            state
                .definitions
                .insert(tag.to_string(), Rc::new(definition));
            let (ready, waiting): (Vec<_>, Vec<_>) = std::mem::take(&mut state.waiting)
                .into_iter()
                .partition(|(waiting_tag, _)| waiting_tag == tag);
            state.waiting = waiting;
            ready.into_iter().map(|(_, callback)| callback).collect()
        };

        for callback in callbacks {
            callback();
        }
    }

    /// Elements currently in the output region.
    pub fn mounted(&self) -> Vec<MemoryElement> {
        self.state.borrow().mounted.clone()
    }
}

impl Dom for MemoryDom {
    type Element = MemoryElement;

    fn is_defined(&self, tag: &str) -> bool {
        self.state.borrow().definitions.contains_key(tag)
    }

    fn create_element(&self, tag: &str) -> Result<MemoryElement, DemoError> {
        let definition = self.state.borrow().definitions.get(tag).cloned();
        Ok(MemoryElement::new(tag, definition))
    }

    fn mount(&self, element: &MemoryElement) {
        element.set_connected(true);
        self.state.borrow_mut().mounted.push(element.clone());
    }

    fn unmount(&self, element: &MemoryElement) {
        element.set_connected(false);
        self.state
            .borrow_mut()
            .mounted
            .retain(|mounted| !mounted.ptr_eq(element));
    }

    fn when_defined(&self, tag: &str, callback: Box<dyn FnOnce()>) {
        self.state
            .borrow_mut()
            .waiting
            .push((tag.to_string(), callback));
    }
}
