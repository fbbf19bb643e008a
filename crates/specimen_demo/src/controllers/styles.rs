//! CSS custom properties of the live instance.

use specimen_knobs::CssValue;

use super::{Controller, UpdateScheduler};
use crate::dom::ElementHandle;

/// Applies CSS custom property values as inline styles.
///
/// The default of each property is captured once: the author default if
/// the manifest has one, else the instance's computed value.
#[derive(Debug)]
pub struct StylesController<E: ElementHandle> {
    instance: Option<E>,
    values: Vec<CssValue>,
    scheduler: UpdateScheduler,
}

impl<E: ElementHandle> StylesController<E> {
    pub fn new(scheduler: UpdateScheduler, values: Vec<CssValue>) -> Self {
        Self {
            instance: None,
            values,
            scheduler,
        }
    }

    #[inline]
    pub fn values(&self) -> &[CssValue] {
        &self.values
    }

    /// Attach to a freshly created instance, capture defaults and apply the
    /// current values.
    pub fn bind(&mut self, instance: E) {
        for css in &mut self.values {
            if css.default.is_none() {
                let computed = instance.computed_style_property(&css.name);
                css.default = Some(computed.trim().to_string());
            }
            if css.value.is_none() {
                css.value = css.default.clone();
            }
            if let Some(value) = css.value.as_deref().filter(|v| !v.is_empty()) {
                instance.set_style_property(&css.name, value);
            }
        }
        self.instance = Some(instance);
        self.scheduler.request_update();
    }

    /// Set property `name`. A value equal to the default removes the
    /// inline override. Returns `false` for an unknown property.
    pub fn set_value(&mut self, name: &str, value: impl Into<String>) -> bool {
        let Some(css) = self.values.iter_mut().find(|c| c.name == name) else {
            return false;
        };
        let value = value.into();

        if let Some(instance) = &self.instance {
            if css.default.as_deref() == Some(value.as_str()) || value.is_empty() {
                instance.remove_style_property(name);
            } else {
                instance.set_style_property(name, &value);
            }
        }
        css.value = Some(value);
        self.scheduler.request_update();
        true
    }
}

impl<E: ElementHandle> Controller for StylesController<E> {
    fn host_disconnected(&mut self) {
        self.instance = None;
        self.values.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{ElementDefinition, MemoryDom};
    use crate::Dom;

    #[test]
    fn test_defaults_from_author_or_computed() {
        let dom = MemoryDom::new();
        dom.define(
            "x-card",
            ElementDefinition::new().with_css_default("--card-pad", "  8px "),
        );
        let el = dom.create_element("x-card").unwrap();
        dom.mount(&el);

        let mut styles = StylesController::new(
            UpdateScheduler::new(),
            vec![
                CssValue::new("--card-bg").with_default("white"),
                CssValue::new("--card-pad"),
                CssValue::new("--card-unset"),
            ],
        );
        styles.bind(el.clone());

        let values = styles.values();
        assert_eq!(values[0].default.as_deref(), Some("white"));
        assert_eq!(values[1].default.as_deref(), Some("8px"));
        assert_eq!(values[1].value.as_deref(), Some("8px"));
        assert_eq!(values[2].default.as_deref(), Some(""));
        assert_eq!(el.inline_style("--card-bg").as_deref(), Some("white"));
        assert_eq!(el.inline_style("--card-unset"), None);
    }

    #[test]
    fn test_set_value_overrides_and_restores() {
        let dom = MemoryDom::new();
        let el = dom.create_element("x-card").unwrap();
        let mut styles = StylesController::new(
            UpdateScheduler::new(),
            vec![CssValue::new("--x").with_default("1px")],
        );
        styles.bind(el.clone());

        assert!(styles.set_value("--x", "2px"));
        assert_eq!(el.inline_style("--x").as_deref(), Some("2px"));
        assert!(styles.values()[0].is_overridden());

        assert!(styles.set_value("--x", "1px"));
        assert_eq!(el.inline_style("--x"), None);
        assert!(!styles.values()[0].is_overridden());

        assert!(!styles.set_value("--y", "0"));
    }
}
