//! The demo host: one selected element, its knobs and its live instance.
//!
//! Work is driven by [`DemoHost::tick`], one turn of a cooperative update
//! loop:
//!
//! 1. apply element definitions that arrived since the last turn, ignoring
//!    those for a tag that is no longer selected
//! 2. render once if any update was requested, however many requests were
//!    made
//! 3. deliver the rendered notification of a newly created instance
//!
//! Nothing here blocks. Waiting for a definition is a callback registered
//! with the [`Dom`], and the manifest arrives already parsed.

use std::cell::RefCell;
use std::rc::Rc;

use serde_json::Value;
use specimen_knobs::{
    derive_css_values, derive_custom_knobs, derive_knobs, derive_slot_values, scan_templates,
    CssValue, DemoId, Knob, KnobValues, SlotValue, TemplateKind, TemplateNode, TemplateRegistry,
};
use specimen_manifest::{element_declaration, ElementDeclaration, Manifest};
use specimen_snippet::{generate_markup, render_snippet_or_plain, SnippetInput};

use crate::clipboard::{copy_text, Clipboard, CopyStatus};
use crate::controllers::{
    Controller, EventLogEntry, EventsController, SlotsController, StylesController,
    UpdateScheduler,
};
use crate::dom::{Dom, ElementHandle};
use crate::error::DemoError;
use crate::panels::DemoPanels;
use crate::renderer::{LiveRenderer, RenderOutcome};
use crate::sync::{read_value, KnobState, KnobSync};

/// Upper bound on turns taken by [`DemoHost::run_until_idle`].
const MAX_TICKS: usize = 16;

/// What the output region shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderState {
    /// Nothing selected yet.
    Idle,
    /// The selected name has no declaration. Nothing is rendered.
    Missing { name: String },
    /// Waiting for the tag to be defined.
    NotDefined { tag: String },
    /// The instance could not be created.
    Failed { tag: String, message: String },
    Live { tag: String },
}

/// Notifications for whoever embeds the host.
#[derive(Debug, Clone)]
pub enum HostEvent<E> {
    /// A new live instance finished its first render.
    Rendered(E),
    /// The user changed a knob. Not emitted for values read back from the
    /// instance.
    PropertyChanged { name: String, value: Value },
}

/// Per-tag state. Replaced as a whole when the selection changes.
#[derive(Debug)]
struct Selection<E: ElementHandle> {
    declaration: ElementDeclaration,
    knobs: Rc<RefCell<KnobState>>,
    events: EventsController<E>,
    slots: SlotsController<E>,
    styles: StylesController<E>,
    reset: bool,
}

impl<E: ElementHandle> Selection<E> {
    fn tag(&self) -> &str {
        &self.declaration.name
    }

    /// Fill the slot and style controllers from the declaration.
    fn populate(&mut self, scheduler: &UpdateScheduler) {
        self.slots.set_slots(derive_slot_values(&self.declaration.slots));
        self.styles = StylesController::new(
            scheduler.clone(),
            derive_css_values(&self.declaration.css_properties),
        );
        self.reset = false;
    }

    fn disconnect(&mut self) {
        self.events.host_disconnected();
        self.slots.host_disconnected();
        self.styles.host_disconnected();
        self.reset = true;
    }
}

pub struct DemoHost<D: Dom> {
    id: DemoId,
    dom: D,
    registry: TemplateRegistry,
    scheduler: UpdateScheduler,
    renderer: LiveRenderer<D::Element>,
    selection: Option<Selection<D::Element>>,
    render_state: RenderState,
    defined: Rc<RefCell<Vec<String>>>,
    waiting_for: Option<String>,
    events: Vec<HostEvent<D::Element>>,
    copy_status: CopyStatus,
}

impl<D: Dom> DemoHost<D> {
    /// A disconnected host with no templates and nothing selected.
    pub fn new(dom: D, id: DemoId) -> Self {
        Self {
            id,
            dom,
            registry: TemplateRegistry::new(),
            scheduler: UpdateScheduler::new(),
            renderer: LiveRenderer::new(),
            selection: None,
            render_state: RenderState::Idle,
            defined: Rc::default(),
            waiting_for: None,
            events: Vec::new(),
            copy_status: CopyStatus::Idle,
        }
    }

    #[inline]
    pub fn id(&self) -> DemoId {
        self.id
    }

    #[inline]
    pub fn dom(&self) -> &D {
        &self.dom
    }

    #[inline]
    pub fn registry(&self) -> &TemplateRegistry {
        &self.registry
    }

    #[inline]
    pub fn scheduler(&self) -> &UpdateScheduler {
        &self.scheduler
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Register the author templates found in the host's markup. Must run
    /// before the first selection.
    pub fn set_templates(&mut self, markup: &str) -> Result<usize, DemoError> {
        let nodes = scan_templates(markup)?;
        let count = nodes.len();
        self.set_template_nodes(nodes);
        Ok(count)
    }

    pub fn set_template_nodes(&mut self, nodes: Vec<TemplateNode>) {
        self.registry.set_templates(self.id, nodes);
    }

    pub fn connect(&mut self) {
        self.scheduler.set_connected(true);
        if let Some(selection) = self.selection.as_mut().filter(|s| s.reset) {
            selection.populate(&self.scheduler);
        }
        self.scheduler.request_update();
    }

    /// Detach every controller, reset them and remove the live instance.
    pub fn disconnect(&mut self) {
        if let Some(selection) = &mut self.selection {
            selection.disconnect();
        }
        self.renderer.clear(&self.dom);
        self.scheduler.set_connected(false);
        self.waiting_for = None;
    }

    #[inline]
    pub fn is_connected(&self) -> bool {
        self.scheduler.is_connected()
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// Select element `name` of `manifest`.
    ///
    /// A name without a declaration clears the demo and leaves it in the
    /// [`RenderState::Missing`] state.
    pub fn select(
        &mut self,
        manifest: &Manifest,
        only: Option<&str>,
        name: &str,
        exclude: &str,
    ) -> Result<(), DemoError> {
        match element_declaration(manifest, only, name) {
            Ok(declaration) => {
                self.select_declaration(declaration, exclude);
                Ok(())
            }
            Err(err) => {
                self.clear_selection();
                self.render_state = RenderState::Missing {
                    name: name.to_string(),
                };
                Err(err.into())
            }
        }
    }

    /// Select an already normalized declaration.
    pub fn select_declaration(&mut self, declaration: ElementDeclaration, exclude: &str) {
        let tag = declaration.name.clone();
        let props = derive_knobs(&declaration.properties, exclude);
        let custom = derive_custom_knobs(&self.registry, self.id, &tag);
        let slots_enabled = !self.registry.has_template(self.id, &tag, TemplateKind::Slot);
        tracing::debug!(
            %tag,
            props = props.len(),
            custom = custom.len(),
            slots_enabled,
            "element selected"
        );

        let mut selection = Selection {
            knobs: Rc::new(RefCell::new(KnobState::new(props, custom))),
            events: EventsController::new(self.scheduler.clone()),
            slots: SlotsController::new(self.scheduler.clone(), slots_enabled),
            styles: StylesController::new(self.scheduler.clone(), Vec::new()),
            declaration,
            reset: true,
        };
        selection.populate(&self.scheduler);

        self.clear_selection();
        self.selection = Some(selection);
        self.render_state = RenderState::Idle;
        self.scheduler.request_update();
    }

    fn clear_selection(&mut self) {
        if let Some(mut old) = self.selection.take() {
            old.disconnect();
        }
        self.renderer.clear(&self.dom);
        self.waiting_for = None;
        self.copy_status = CopyStatus::Idle;
    }

    #[inline]
    pub fn tag(&self) -> Option<&str> {
        self.selection.as_ref().map(Selection::tag)
    }

    pub fn declaration(&self) -> Option<&ElementDeclaration> {
        self.selection.as_ref().map(|s| &s.declaration)
    }

    #[inline]
    pub fn render_state(&self) -> &RenderState {
        &self.render_state
    }

    pub fn instance(&self) -> Option<D::Element> {
        self.renderer.instance().cloned()
    }

    // =========================================================================
    // Update loop
    // =========================================================================

    /// Run one turn. Returns whether another turn has work to do.
    pub fn tick(&mut self) -> bool {
        self.apply_definitions();
        if self.scheduler.take_request() {
            self.render();
        }
        self.deliver_rendered();
        self.scheduler.is_requested()
    }

    /// Tick until no update is pending. Returns the number of turns taken.
    pub fn run_until_idle(&mut self) -> usize {
        let mut ticks = 0;
        while ticks < MAX_TICKS {
            ticks += 1;
            if !self.tick() {
                break;
            }
        }
        ticks
    }

    fn apply_definitions(&mut self) {
        let defined: Vec<String> = self.defined.borrow_mut().drain(..).collect();
        for tag in defined {
            if self.tag() == Some(tag.as_str()) {
                tracing::debug!(%tag, "element defined, rendering");
                self.waiting_for = None;
                self.scheduler.request_update();
            } else {
                tracing::debug!(%tag, "ignoring definition of a tag no longer selected");
            }
        }
    }

    fn render(&mut self) {
        if !self.scheduler.is_connected() {
            return;
        }
        let Some(selection) = &mut self.selection else {
            return;
        };

        let tag = selection.tag().to_string();
        let values = selection.knobs.borrow().values().clone();
        let host = self.registry.template(self.id, &tag, TemplateKind::Host);
        let slot = self.registry.template(self.id, &tag, TemplateKind::Slot);

        self.scheduler.record_render();
        match self.renderer.render(&self.dom, &tag, &values, host, slot) {
            RenderOutcome::NotDefined { tag } => {
                if self.waiting_for.as_deref() != Some(tag.as_str()) {
                    tracing::warn!("{}", DemoError::NotDefined { tag: tag.clone() });
                    let queue = Rc::clone(&self.defined);
                    let waited = tag.clone();
                    self.dom
                        .when_defined(&tag, Box::new(move || queue.borrow_mut().push(waited)));
                    self.waiting_for = Some(tag.clone());
                }
                self.render_state = RenderState::NotDefined { tag };
            }
            RenderOutcome::Failed { tag, message } => {
                tracing::error!(%tag, "failed to create element: {message}");
                self.render_state = RenderState::Failed { tag, message };
            }
            RenderOutcome::Rendered { instance, created } => {
                if created {
                    selection
                        .events
                        .bind(&instance, &selection.declaration.events, &selection.knobs);
                    selection.slots.bind(instance.clone());
                    selection.styles.bind(instance);
                }
                self.render_state = RenderState::Live { tag };
            }
        }
    }

    /// Emit the rendered notification and, with a host template, read the
    /// template's values back into the knobs.
    fn deliver_rendered(&mut self) {
        let Some(instance) = self.renderer.take_rendered() else {
            return;
        };

        if let Some(selection) = &self.selection {
            if self
                .registry
                .has_template(self.id, selection.tag(), TemplateKind::Host)
                && sync_all(&selection.knobs, &instance)
            {
                self.scheduler.request_update();
            }
        }

        self.events.push(HostEvent::Rendered(instance));
    }

    /// Drain pending notifications.
    pub fn take_events(&mut self) -> Vec<HostEvent<D::Element>> {
        std::mem::take(&mut self.events)
    }

    // =========================================================================
    // Knobs, slots, styles, events
    // =========================================================================

    pub fn knobs(&self) -> Vec<Knob> {
        self.selection
            .as_ref()
            .map(|s| s.knobs.borrow().props().to_vec())
            .unwrap_or_default()
    }

    pub fn custom_knobs(&self) -> Vec<Knob> {
        self.selection
            .as_ref()
            .map(|s| s.knobs.borrow().custom().to_vec())
            .unwrap_or_default()
    }

    /// Current value map. Shares entries with earlier maps.
    pub fn values(&self) -> KnobValues {
        self.selection
            .as_ref()
            .map(|s| s.knobs.borrow().values().clone())
            .unwrap_or_default()
    }

    /// Set a knob from user input. Returns `false` for an unknown knob.
    pub fn set_knob(&mut self, name: &str, value: Value) -> bool {
        let Some(selection) = &self.selection else {
            return false;
        };
        if !selection.knobs.borrow_mut().set_value(name, value.clone()) {
            return false;
        }

        self.events.push(HostEvent::PropertyChanged {
            name: name.to_string(),
            value,
        });
        self.scheduler.request_update();
        true
    }

    pub fn slots(&self) -> Vec<SlotValue> {
        self.selection
            .as_ref()
            .map(|s| s.slots.slots().to_vec())
            .unwrap_or_default()
    }

    pub fn set_slot(&mut self, name: &str, content: impl Into<String>) -> bool {
        self.selection
            .as_mut()
            .is_some_and(|s| s.slots.set_value(name, content))
    }

    pub fn css_values(&self) -> Vec<CssValue> {
        self.selection
            .as_ref()
            .map(|s| s.styles.values().to_vec())
            .unwrap_or_default()
    }

    pub fn set_css(&mut self, name: &str, value: impl Into<String>) -> bool {
        self.selection
            .as_mut()
            .is_some_and(|s| s.styles.set_value(name, value))
    }

    pub fn event_log(&self) -> Vec<EventLogEntry> {
        self.selection
            .as_ref()
            .map(|s| s.events.log())
            .unwrap_or_default()
    }

    pub fn clear_event_log(&mut self) {
        if let Some(selection) = &mut self.selection {
            selection.events.clear();
        }
    }

    pub fn panels(&self) -> DemoPanels {
        let Some(selection) = &self.selection else {
            return DemoPanels::new(0, 0, 0, 0);
        };
        let knobs = selection.knobs.borrow();
        DemoPanels::new(
            knobs.props().len() + knobs.custom().len(),
            if selection.slots.enabled() {
                selection.slots.slots().len()
            } else {
                0
            },
            selection.declaration.css_properties.len(),
            selection.declaration.events.len(),
        )
    }

    // =========================================================================
    // Snippet
    // =========================================================================

    /// Plain snippet text for the current state.
    pub fn snippet_markup(&self) -> Option<String> {
        let selection = self.selection.as_ref()?;
        let values = selection.knobs.borrow().values().clone();
        Some(generate_markup(&SnippetInput {
            registry: &self.registry,
            id: self.id,
            tag: selection.tag(),
            values: &values,
            slots: selection.slots.slots(),
            css: selection.styles.values(),
        }))
    }

    /// Highlighted snippet HTML.
    pub fn snippet_html(&self) -> Option<String> {
        let selection = self.selection.as_ref()?;
        let values = selection.knobs.borrow().values().clone();
        Some(render_snippet_or_plain(&SnippetInput {
            registry: &self.registry,
            id: self.id,
            tag: selection.tag(),
            values: &values,
            slots: selection.slots.slots(),
            css: selection.styles.values(),
        }))
    }

    /// Copy the snippet text. Failure shows up only in the returned status.
    pub fn copy_snippet(&mut self, clipboard: &mut impl Clipboard) -> CopyStatus {
        let Some(markup) = self.snippet_markup() else {
            return self.copy_status;
        };
        self.copy_status = copy_text(clipboard, &markup);
        self.scheduler.request_update();
        self.copy_status
    }

    #[inline]
    pub fn copy_status(&self) -> CopyStatus {
        self.copy_status
    }

    /// Return the copy status to idle once it has been shown.
    pub fn reset_copy_status(&mut self) {
        if self.copy_status != CopyStatus::Idle {
            self.copy_status = CopyStatus::Idle;
            self.scheduler.request_update();
        }
    }
}

/// Sync every knob whose instance value differs from the knob value.
/// Returns whether anything changed.
fn sync_all<E: ElementHandle>(knobs: &Rc<RefCell<KnobState>>, instance: &E) -> bool {
    let mut state = knobs.borrow_mut();
    let all: Vec<Knob> = state.props().iter().chain(state.custom()).cloned().collect();

    let mut changed = false;
    for knob in &all {
        if read_value(instance, knob) != knob.value {
            state.sync_knob(instance, knob);
            changed = true;
        }
    }
    changed
}

impl<D: Dom> std::fmt::Debug for DemoHost<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DemoHost")
            .field("id", &self.id)
            .field("tag", &self.tag())
            .field("render_state", &self.render_state)
            .field("connected", &self.is_connected())
            .finish()
    }
}
