//! Slotted content of the live instance.

use specimen_knobs::{sort_slots, SlotValue};

use super::{Controller, UpdateScheduler};
use crate::dom::ElementHandle;

/// Owns the light DOM children of the live instance while enabled.
///
/// Disabled when an author slot template supplies the content; the
/// controller then never touches the instance's children.
#[derive(Debug)]
pub struct SlotsController<E: ElementHandle> {
    instance: Option<E>,
    enabled: bool,
    slots: Vec<SlotValue>,
    scheduler: UpdateScheduler,
}

impl<E: ElementHandle> SlotsController<E> {
    pub fn new(scheduler: UpdateScheduler, enabled: bool) -> Self {
        Self {
            instance: None,
            enabled,
            slots: Vec::new(),
            scheduler,
        }
    }

    #[inline]
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    #[inline]
    pub fn slots(&self) -> &[SlotValue] {
        &self.slots
    }

    /// Attach to a freshly created instance and fill its children.
    pub fn bind(&mut self, instance: E) {
        self.instance = Some(instance);
        self.rebuild();
    }

    /// Replace the whole slot list.
    pub fn set_slots(&mut self, mut slots: Vec<SlotValue>) {
        sort_slots(&mut slots);
        self.slots = slots;
        self.rebuild();
        self.scheduler.request_update();
    }

    /// Replace the content of slot `name`. Other slots are left as they
    /// are. Returns `false` for an unknown slot.
    pub fn set_value(&mut self, name: &str, content: impl Into<String>) -> bool {
        let Some(slot) = self.slots.iter_mut().find(|s| s.name == name) else {
            return false;
        };
        slot.content = content.into();
        self.rebuild();
        self.scheduler.request_update();
        true
    }

    /// Recreate the instance's children from the slot list.
    ///
    /// Slots with empty content produce no node.
    fn rebuild(&self) {
        if !self.enabled {
            return;
        }
        let Some(instance) = self.instance.as_ref().filter(|i| i.is_connected()) else {
            return;
        };

        instance.clear_children();
        for slot in self.slots.iter().filter(|s| !s.content.is_empty()) {
            if slot.is_default() {
                instance.append_text(&slot.content);
            } else {
                instance.append_slotted(&slot.name, &slot.content);
            }
        }
    }
}

impl<E: ElementHandle> Controller for SlotsController<E> {
    fn host_disconnected(&mut self) {
        self.instance = None;
        self.slots.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{MemoryDom, MemoryElement, MemoryNode};
    use crate::Dom;

    fn mounted() -> (MemoryDom, MemoryElement) {
        let dom = MemoryDom::new();
        let el = dom.create_element("x-card").unwrap();
        dom.mount(&el);
        (dom, el)
    }

    fn connected_scheduler() -> UpdateScheduler {
        let scheduler = UpdateScheduler::new();
        scheduler.set_connected(true);
        scheduler
    }

    #[test]
    fn test_rebuild_children() {
        let (_dom, el) = mounted();
        let mut slots = SlotsController::new(connected_scheduler(), true);
        slots.bind(el.clone());
        slots.set_slots(vec![
            SlotValue::new("", "Body"),
            SlotValue::new("title", "Title"),
        ]);

        assert_eq!(
            el.children(),
            vec![
                MemoryNode::Slotted {
                    slot: "title".to_string(),
                    text: "Title".to_string()
                },
                MemoryNode::Text("Body".to_string()),
            ]
        );
    }

    #[test]
    fn test_set_value_only_touches_one_slot() {
        let (_dom, el) = mounted();
        let mut slots = SlotsController::new(connected_scheduler(), true);
        slots.bind(el.clone());
        slots.set_slots(vec![SlotValue::new("a", "A"), SlotValue::new("b", "B")]);

        assert!(slots.set_value("b", "Changed"));
        assert!(!slots.set_value("c", "nope"));
        assert_eq!(slots.slots()[0].content, "A");
        assert_eq!(slots.slots()[1].content, "Changed");
        assert_eq!(el.children().len(), 2);
    }

    #[test]
    fn test_disabled_never_touches_children() {
        let (_dom, el) = mounted();
        el.set_inner_markup("<b>author</b>");
        let mut slots = SlotsController::new(connected_scheduler(), false);
        slots.bind(el.clone());
        slots.set_slots(vec![SlotValue::new("", "Content")]);

        assert_eq!(el.children(), vec![MemoryNode::Markup("<b>author</b>".to_string())]);
    }

    #[test]
    fn test_disconnect_resets() {
        let (_dom, el) = mounted();
        let mut slots = SlotsController::new(connected_scheduler(), true);
        slots.bind(el);
        slots.set_slots(vec![SlotValue::new("", "Content")]);
        slots.host_disconnected();
        assert!(slots.slots().is_empty());
    }
}
