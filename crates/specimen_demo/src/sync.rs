//! Knob state and instance-to-knob synchronization.
//!
//! Instance state wins over UI state in exactly one place:
//! [`KnobSync::sync_knob`]. It is used when a host template sets initial
//! values and when the element announces a change with a
//! `<property>-changed` event.

use serde_json::Value;
use specimen_knobs::{Knob, KnobKind, KnobValues};

use crate::dom::ElementHandle;

/// Suffix of the property change notification convention.
pub const CHANGED_SUFFIX: &str = "-changed";

/// Property announced by a `<property>-changed` event, if `event` follows
/// the convention.
#[inline]
pub fn changed_property(event: &str) -> Option<&str> {
    event
        .strip_suffix(CHANGED_SUFFIX)
        .filter(|name| !name.is_empty())
}

/// `<property>-changed`.
#[inline]
pub fn changed_event(property: &str) -> String {
    format!("{property}{CHANGED_SUFFIX}")
}

/// Knob lookup and instance read-back.
pub trait KnobSync<E: ElementHandle> {
    /// A knob by name, or by attribute name.
    fn get_knob(&self, name: &str) -> Option<&Knob>;

    /// Read the knob's current value from `instance` into the knob state.
    fn sync_knob(&mut self, instance: &E, knob: &Knob);
}

/// Knobs of the selected element and their value map.
#[derive(Debug, Clone, Default)]
pub struct KnobState {
    props: Vec<Knob>,
    custom: Vec<Knob>,
    values: KnobValues,
}

impl KnobState {
    /// Fresh state. The value map starts empty: the live instance keeps its
    /// own defaults until a knob is touched.
    ///
    /// A custom knob whose attribute is already covered by a property knob
    /// is dropped; the property knob owns that attribute.
    pub fn new(props: Vec<Knob>, mut custom: Vec<Knob>) -> Self {
        custom.retain(|knob| {
            let attribute = knob.attribute_name();
            let shadowed = props
                .iter()
                .any(|p| p.name == attribute || p.attribute_name() == attribute);
            if shadowed {
                tracing::debug!(attribute, "custom knob shadowed by a property knob");
            }
            !shadowed
        });
        Self {
            props,
            custom,
            values: KnobValues::new(),
        }
    }

    #[inline]
    pub fn props(&self) -> &[Knob] {
        &self.props
    }

    #[inline]
    pub fn custom(&self) -> &[Knob] {
        &self.custom
    }

    #[inline]
    pub fn values(&self) -> &KnobValues {
        &self.values
    }

    /// Store `value` for the knob named `name`. Returns `false` when no
    /// such knob exists.
    pub fn set_value(&mut self, name: &str, value: Value) -> bool {
        let Some(knob) = self
            .props
            .iter_mut()
            .chain(self.custom.iter_mut())
            .find(|k| k.name == name)
        else {
            return false;
        };

        self.values = self.values.with(knob.name.clone(), knob.entry(value.clone()));
        knob.value = value;
        true
    }
}

impl<E: ElementHandle> KnobSync<E> for KnobState {
    fn get_knob(&self, name: &str) -> Option<&Knob> {
        self.props
            .iter()
            .chain(self.custom.iter())
            .find(|k| k.name == name)
            .or_else(|| {
                self.props
                    .iter()
                    .chain(self.custom.iter())
                    .find(|k| k.attribute.as_deref() == Some(name))
            })
    }

    fn sync_knob(&mut self, instance: &E, knob: &Knob) {
        let value = read_value(instance, knob);
        tracing::trace!(knob = %knob.name, %value, "sync from instance");
        self.set_value(&knob.name, value);
    }
}

/// Current value of `knob` on the instance. Custom knobs exist only as
/// attributes and are read as such.
pub fn read_value<E: ElementHandle>(instance: &E, knob: &Knob) -> Value {
    if !knob.custom {
        return instance.property(&knob.name);
    }
    let attribute = instance.attribute(knob.attribute_name());
    match knob.kind() {
        KnobKind::Boolean => Value::Bool(attribute.is_some()),
        _ => attribute.map(Value::String).unwrap_or(Value::Null),
    }
}
