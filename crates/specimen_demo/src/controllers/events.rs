//! Event log and two-way property sync.

use std::cell::RefCell;
use std::rc::Rc;

use serde::Serialize;
use serde_json::Value;
use specimen_manifest::EventDescriptor;

use super::{Controller, UpdateScheduler};
use crate::dom::{DomEvent, ElementHandle, ListenerId};
use crate::sync::{changed_property, KnobState, KnobSync};

/// One captured event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventLogEntry {
    pub kind: String,
    pub detail: Value,
}

impl EventLogEntry {
    /// `kind`, or `kind: detail` when the event carries a detail.
    pub fn describe(&self) -> String {
        match &self.detail {
            Value::Null => self.kind.clone(),
            Value::String(s) => format!("{}: {s}", self.kind),
            other => format!("{}: {other}", self.kind),
        }
    }
}

impl From<&DomEvent> for EventLogEntry {
    fn from(event: &DomEvent) -> Self {
        Self {
            kind: event.kind.clone(),
            detail: event.detail.clone(),
        }
    }
}

/// Listens to every declared event of the live instance.
///
/// Each event is appended to the log. A `<property>-changed` event also
/// reads the property back into the knob state, before any re-render.
#[derive(Debug)]
pub struct EventsController<E: ElementHandle> {
    log: Rc<RefCell<Vec<EventLogEntry>>>,
    listeners: Vec<(E, ListenerId)>,
    scheduler: UpdateScheduler,
}

impl<E: ElementHandle> EventsController<E> {
    pub fn new(scheduler: UpdateScheduler) -> Self {
        Self {
            log: Rc::default(),
            listeners: Vec::new(),
            scheduler,
        }
    }

    /// Listen on a freshly created instance, replacing earlier listeners.
    pub fn bind(
        &mut self,
        instance: &E,
        events: &[EventDescriptor],
        knobs: &Rc<RefCell<KnobState>>,
    ) {
        self.unbind();

        for event in events {
            let log = Rc::clone(&self.log);
            let knobs = Rc::clone(knobs);
            let scheduler = self.scheduler.clone();

            let id = instance.add_listener(
                &event.name,
                Rc::new(move |instance: &E, event: &DomEvent| {
                    log.borrow_mut().push(EventLogEntry::from(event));

                    if let Some(property) = changed_property(&event.kind) {
                        let mut state = knobs.borrow_mut();
                        let knob = KnobSync::<E>::get_knob(&*state, property).cloned();
                        if let Some(knob) = knob {
                            state.sync_knob(instance, &knob);
                        }
                    }

                    scheduler.request_update();
                }),
            );
            self.listeners.push((instance.clone(), id));
        }
    }

    fn unbind(&mut self) {
        for (instance, id) in self.listeners.drain(..) {
            instance.remove_listener(id);
        }
    }

    /// Captured events, oldest first.
    pub fn log(&self) -> Vec<EventLogEntry> {
        self.log.borrow().clone()
    }

    pub fn clear(&mut self) {
        self.log.borrow_mut().clear();
        self.scheduler.request_update();
    }
}

impl<E: ElementHandle> Controller for EventsController<E> {
    fn host_disconnected(&mut self) {
        self.unbind();
        self.log.borrow_mut().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_describe() {
        let plain = EventLogEntry {
            kind: "click".to_string(),
            detail: Value::Null,
        };
        assert_eq!(plain.describe(), "click");

        let text = EventLogEntry {
            kind: "select".to_string(),
            detail: json!("apple"),
        };
        assert_eq!(text.describe(), "select: apple");

        let object = EventLogEntry {
            kind: "value-changed".to_string(),
            detail: json!({ "value": 3 }),
        };
        assert_eq!(object.describe(), r#"value-changed: {"value":3}"#);
    }
}
