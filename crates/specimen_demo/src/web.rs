//! Browser backend over `web-sys`, plus the `wasm-bindgen` surface.
//!
//! The embedding page owns the loop: after any call that may request an
//! update it schedules [`SpecimenDemo::tick`] (e.g. with `queueMicrotask`)
//! until `tick` returns `false`.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use serde::Serialize;
use serde_json::Value;
use specimen_knobs::DemoId;
use specimen_manifest::parse_manifest;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CustomEvent, Document, Element, Event, HtmlElement, Window};

use crate::dom::{Dom, DomEvent, ElementHandle, Listener, ListenerId};
use crate::error::DemoError;
use crate::host::{DemoHost, HostEvent, RenderState};

impl From<JsValue> for DemoError {
    fn from(value: JsValue) -> Self {
        Self::Dom(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

/// Log a failed DOM call. Element operations have no caller to report to.
fn log_err<T>(result: Result<T, JsValue>, operation: &str) {
    if let Err(err) = result {
        tracing::warn!(operation, "{}", DemoError::from(err));
    }
}

/// Serialize with maps as plain objects.
fn to_js_value<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    value
        .serialize(&serializer)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

fn from_js_value(value: JsValue) -> Value {
    if value.is_undefined() || value.is_null() {
        return Value::Null;
    }
    serde_wasm_bindgen::from_value(value).unwrap_or(Value::Null)
}

type JsListener = Closure<dyn FnMut(Event)>;
type JsCallback = Closure<dyn FnMut(JsValue)>;
type ListenerTable = RefCell<Vec<(ListenerId, String, JsListener)>>;

/// A live element in the page.
#[derive(Clone)]
pub struct WebElement {
    element: HtmlElement,
    listeners: Rc<ListenerTable>,
    next_listener: Rc<Cell<u32>>,
}

impl std::fmt::Debug for WebElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebElement")
            .field("tag", &self.element.tag_name())
            .field("listeners", &self.listeners.borrow().len())
            .finish()
    }
}

impl WebElement {
    fn new(element: HtmlElement) -> Self {
        Self {
            element,
            listeners: Rc::default(),
            next_listener: Rc::default(),
        }
    }

    #[inline]
    pub fn element(&self) -> &HtmlElement {
        &self.element
    }

    fn document(&self) -> Option<Document> {
        self.element.owner_document()
    }
}

impl ElementHandle for WebElement {
    fn tag_name(&self) -> String {
        self.element.tag_name().to_ascii_lowercase()
    }

    fn is_connected(&self) -> bool {
        self.element.is_connected()
    }

    fn property(&self, name: &str) -> Value {
        js_sys::Reflect::get(&self.element, &JsValue::from_str(name))
            .map(from_js_value)
            .unwrap_or(Value::Null)
    }

    fn set_property(&self, name: &str, value: &Value) {
        match to_js_value(value) {
            Ok(js) => log_err(
                js_sys::Reflect::set(&self.element, &JsValue::from_str(name), &js),
                "set property",
            ),
            Err(err) => log_err::<()>(Err(err), "serialize property"),
        }
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.element.get_attribute(name)
    }

    fn set_attribute(&self, name: &str, value: &str) {
        log_err(self.element.set_attribute(name, value), "set attribute");
    }

    fn remove_attribute(&self, name: &str) {
        log_err(self.element.remove_attribute(name), "remove attribute");
    }

    fn toggle_attribute(&self, name: &str, force: bool) {
        log_err(
            self.element.toggle_attribute_with_force(name, force),
            "toggle attribute",
        );
    }

    fn clear_children(&self) {
        self.element.set_inner_html("");
    }

    fn append_text(&self, text: &str) {
        let Some(document) = self.document() else {
            return;
        };
        let node = document.create_text_node(text);
        log_err(self.element.append_child(&node), "append text");
    }

    fn append_slotted(&self, slot: &str, text: &str) {
        let Some(document) = self.document() else {
            return;
        };
        match document.create_element("div") {
            Ok(div) => {
                log_err(div.set_attribute("slot", slot), "set slot");
                div.set_text_content(Some(text));
                log_err(self.element.append_child(&div), "append slotted");
            }
            Err(err) => log_err::<()>(Err(err), "create slotted"),
        }
    }

    fn set_inner_markup(&self, markup: &str) {
        self.element.set_inner_html(markup);
    }

    fn set_style_property(&self, name: &str, value: &str) {
        log_err(self.element.style().set_property(name, value), "set style");
    }

    fn remove_style_property(&self, name: &str) {
        log_err(self.element.style().remove_property(name), "remove style");
    }

    fn computed_style_property(&self, name: &str) -> String {
        let Some(window) = web_sys::window() else {
            return String::new();
        };
        window
            .get_computed_style(&self.element)
            .ok()
            .flatten()
            .and_then(|style| style.get_property_value(name).ok())
            .unwrap_or_default()
    }

    fn add_listener(&self, event: &str, listener: Listener<Self>) -> ListenerId {
        let id = ListenerId(self.next_listener.get());
        self.next_listener.set(id.0 + 1);

        let element = self.element.clone();
        let table: Weak<ListenerTable> = Rc::downgrade(&self.listeners);
        let next_listener = Rc::clone(&self.next_listener);
        let closure = JsListener::new(move |event: Event| {
            let Some(listeners) = table.upgrade() else {
                return;
            };
            let handle = WebElement {
                element: element.clone(),
                listeners,
                next_listener: Rc::clone(&next_listener),
            };
            let detail = event
                .dyn_ref::<CustomEvent>()
                .map(|custom| from_js_value(custom.detail()))
                .unwrap_or(Value::Null);
            listener(&handle, &DomEvent::new(event.type_()).with_detail(detail));
        });

        log_err(
            self.element
                .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref()),
            "add listener",
        );
        self.listeners
            .borrow_mut()
            .push((id, event.to_string(), closure));
        id
    }

    fn remove_listener(&self, id: ListenerId) {
        let mut listeners = self.listeners.borrow_mut();
        let Some(index) = listeners.iter().position(|(listener_id, _, _)| *listener_id == id)
        else {
            return;
        };
        let (_, event, closure) = listeners.remove(index);
        log_err(
            self.element
                .remove_event_listener_with_callback(&event, closure.as_ref().unchecked_ref()),
            "remove listener",
        );
    }
}

/// The page, with the demo output region at a known element.
///
/// At most one definition wait is outstanding. Starting a new one drops the
/// previous callback, so abandoned waits do not accumulate.
#[derive(Debug, Clone)]
pub struct WebDom {
    window: Window,
    document: Document,
    region: Element,
    pending: Rc<RefCell<Option<JsCallback>>>,
    // rejections of a dropped wait's promise land here
    ignore_rejection: Rc<JsCallback>,
}

impl WebDom {
    /// Attach to the element with id `region_id`.
    pub fn new(region_id: &str) -> Result<Self, DemoError> {
        let window = web_sys::window().ok_or_else(|| DemoError::Dom("no window".into()))?;
        let document = window
            .document()
            .ok_or_else(|| DemoError::Dom("no document".into()))?;
        let region = document
            .get_element_by_id(region_id)
            .ok_or_else(|| DemoError::Dom(format!("#{region_id} not found")))?;

        let ignore_rejection = JsCallback::new(|err: JsValue| {
            tracing::trace!(?err, "abandoned definition wait");
        });
        Ok(Self {
            window,
            document,
            region,
            pending: Rc::new(RefCell::new(None)),
            ignore_rejection: Rc::new(ignore_rejection),
        })
    }

    #[inline]
    pub fn region(&self) -> &Element {
        &self.region
    }
}

impl Dom for WebDom {
    type Element = WebElement;

    fn is_defined(&self, tag: &str) -> bool {
        !self.window.custom_elements().get(tag).is_undefined()
    }

    fn create_element(&self, tag: &str) -> Result<WebElement, DemoError> {
        let element = self
            .document
            .create_element(tag)?
            .dyn_into::<HtmlElement>()
            .map_err(|e| DemoError::from(JsValue::from(e)))?;
        Ok(WebElement::new(element))
    }

    fn mount(&self, element: &WebElement) {
        log_err(self.region.append_child(&element.element), "mount");
    }

    fn unmount(&self, element: &WebElement) {
        element.element.remove();
    }

    fn when_defined(&self, tag: &str, callback: Box<dyn FnOnce()>) {
        match self.window.custom_elements().when_defined(tag) {
            Ok(promise) => {
                let closure = Closure::once(move |_: JsValue| callback());
                let _ = promise
                    .then(&closure)
                    .catch(&self.ignore_rejection);
                // drops the callback of a wait that never resolved
                self.pending.replace(Some(closure));
            }
            Err(err) => log_err::<()>(Err(err), "when defined"),
        }
    }
}

// =============================================================================
// wasm-bindgen surface
// =============================================================================

static NEXT_DEMO: std::sync::atomic::AtomicU32 = std::sync::atomic::AtomicU32::new(0);

/// Notification as seen from JavaScript.
#[derive(Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
enum JsHostEvent {
    Rendered,
    PropertyChanged { name: String, value: Value },
}

/// A demo bound to one output region of the page.
#[wasm_bindgen]
pub struct SpecimenDemo {
    host: DemoHost<WebDom>,
}

#[wasm_bindgen]
impl SpecimenDemo {
    /// Create a demo rendering into `#regionId`, with the author templates
    /// found in `templates`.
    #[wasm_bindgen(constructor)]
    pub fn new(region_id: &str, templates: Option<String>) -> Result<SpecimenDemo, JsValue> {
        let dom = WebDom::new(region_id).map_err(|e| JsValue::from_str(&e.to_string()))?;
        let id = DemoId(NEXT_DEMO.fetch_add(1, std::sync::atomic::Ordering::Relaxed));
        let mut host = DemoHost::new(dom, id);
        if let Some(markup) = templates {
            host.set_templates(&markup)
                .map_err(|e| JsValue::from_str(&e.to_string()))?;
        }
        host.connect();
        Ok(Self { host })
    }

    pub fn disconnect(&mut self) {
        self.host.disconnect();
    }

    pub fn connect(&mut self) {
        self.host.connect();
    }

    /// Select element `name` from manifest JSON text.
    pub fn select(
        &mut self,
        manifest: &str,
        name: &str,
        only: Option<String>,
        exclude: Option<String>,
    ) -> Result<(), JsValue> {
        let manifest = parse_manifest(manifest).map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.host
            .select(
                &manifest,
                only.as_deref(),
                name,
                exclude.as_deref().unwrap_or_default(),
            )
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Run one turn of the update loop.
    pub fn tick(&mut self) -> bool {
        self.host.tick()
    }

    #[wasm_bindgen(js_name = "setKnob")]
    pub fn set_knob(&mut self, name: &str, value: JsValue) -> bool {
        self.host.set_knob(name, from_js_value(value))
    }

    #[wasm_bindgen(js_name = "setSlot")]
    pub fn set_slot(&mut self, name: &str, content: &str) -> bool {
        self.host.set_slot(name, content)
    }

    #[wasm_bindgen(js_name = "setCss")]
    pub fn set_css(&mut self, name: &str, value: &str) -> bool {
        self.host.set_css(name, value)
    }

    pub fn knobs(&self) -> Result<JsValue, JsValue> {
        to_js_value(&self.host.knobs())
    }

    #[wasm_bindgen(js_name = "customKnobs")]
    pub fn custom_knobs(&self) -> Result<JsValue, JsValue> {
        to_js_value(&self.host.custom_knobs())
    }

    pub fn slots(&self) -> Result<JsValue, JsValue> {
        to_js_value(&self.host.slots())
    }

    #[wasm_bindgen(js_name = "cssValues")]
    pub fn css_values(&self) -> Result<JsValue, JsValue> {
        to_js_value(&self.host.css_values())
    }

    #[wasm_bindgen(js_name = "eventLog")]
    pub fn event_log(&self) -> Result<JsValue, JsValue> {
        to_js_value(&self.host.event_log())
    }

    #[wasm_bindgen(js_name = "clearEventLog")]
    pub fn clear_event_log(&mut self) {
        self.host.clear_event_log();
    }

    pub fn panels(&self) -> Result<JsValue, JsValue> {
        to_js_value(&self.host.panels())
    }

    /// `true` while waiting for the selected tag to be defined.
    #[wasm_bindgen(js_name = "isPending")]
    pub fn is_pending(&self) -> bool {
        matches!(self.host.render_state(), RenderState::NotDefined { .. })
    }

    #[wasm_bindgen(js_name = "snippetMarkup")]
    pub fn snippet_markup(&self) -> Option<String> {
        self.host.snippet_markup()
    }

    #[wasm_bindgen(js_name = "snippetHtml")]
    pub fn snippet_html(&self) -> Option<String> {
        self.host.snippet_html()
    }

    /// Drain `rendered` and `propertyChanged` notifications.
    #[wasm_bindgen(js_name = "takeEvents")]
    pub fn take_events(&mut self) -> Result<JsValue, JsValue> {
        let events: Vec<JsHostEvent> = self
            .host
            .take_events()
            .into_iter()
            .map(|event| match event {
                HostEvent::Rendered(_) => JsHostEvent::Rendered,
                HostEvent::PropertyChanged { name, value } => {
                    JsHostEvent::PropertyChanged { name, value }
                }
            })
            .collect();
        to_js_value(&events)
    }

    /// The live instance, if any.
    pub fn instance(&self) -> Option<HtmlElement> {
        self.host.instance().map(|i| i.element().clone())
    }
}
