//! Slot knobs.

use serde::{Deserialize, Serialize};
use specimen_manifest::SlotDescriptor;

/// Content of one slot in the demo.
///
/// An empty `name` is the default (unnamed) slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotValue {
    pub name: String,
    pub content: String,
}

impl SlotValue {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    #[inline]
    pub fn is_default(&self) -> bool {
        self.name.is_empty()
    }
}

/// Slot values for declared slots, with placeholder content, sorted.
pub fn derive_slot_values(slots: &[SlotDescriptor]) -> Vec<SlotValue> {
    let mut values: Vec<SlotValue> = Vec::with_capacity(slots.len());
    for slot in slots {
        if values.iter().any(|v| v.name == slot.name) {
            continue;
        }
        values.push(SlotValue::new(slot.name.clone(), placeholder(&slot.name)));
    }
    sort_slots(&mut values);
    values
}

/// Named slots in lexicographic order, the unnamed slot last.
pub fn sort_slots(values: &mut [SlotValue]) {
    values.sort_by(|a, b| {
        a.is_default()
            .cmp(&b.is_default())
            .then_with(|| a.name.cmp(&b.name))
    });
}

/// `"Content"` for the unnamed slot, otherwise the capitalized name.
pub fn placeholder(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        None => "Content".to_string(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder() {
        assert_eq!(placeholder(""), "Content");
        assert_eq!(placeholder("header"), "Header");
        assert_eq!(placeholder("Footer"), "Footer");
    }

    #[test]
    fn test_unnamed_slot_sorts_last() {
        let slots = vec![
            SlotDescriptor::new(""),
            SlotDescriptor::new("suffix"),
            SlotDescriptor::new("prefix"),
            SlotDescriptor::new("label"),
        ];
        let values = derive_slot_values(&slots);
        let names: Vec<_> = values.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, vec!["label", "prefix", "suffix", ""]);
        assert_eq!(values[3].content, "Content");
        assert_eq!(values[0].content, "Label");
    }

    #[test]
    fn test_sort_is_independent_of_input_order() {
        let orders = [
            ["b", "", "a"],
            ["", "a", "b"],
            ["a", "b", ""],
        ];
        for order in orders {
            let mut values: Vec<_> = order.iter().map(|n| SlotValue::new(*n, "x")).collect();
            sort_slots(&mut values);
            let names: Vec<_> = values.iter().map(|v| v.name.as_str()).collect();
            assert_eq!(names, vec!["a", "b", ""]);
        }
    }

    #[test]
    fn test_duplicate_slots() {
        let values = derive_slot_values(&[SlotDescriptor::new("x"), SlotDescriptor::new("x")]);
        assert_eq!(values.len(), 1);
    }
}
