//! The live instance of the selected element.

use specimen_knobs::{is_truthy, markup, KnobKind, KnobValues, TemplateNode};

use crate::dom::{Dom, ElementHandle};

/// Result of one render pass.
#[derive(Debug, Clone)]
pub enum RenderOutcome<E> {
    /// The instance exists and carries the current knob values.
    Rendered { instance: E, created: bool },
    /// The tag has no definition yet; nothing is shown but a warning.
    NotDefined { tag: String },
    /// The page refused to create the element.
    Failed { tag: String, message: String },
}

/// Keeps exactly one live instance in the output region.
///
/// The instance is reused while the tag stays the same and recreated when
/// it changes. A rendered notification is queued only on creation.
#[derive(Debug)]
pub struct LiveRenderer<E: ElementHandle> {
    current: Option<(String, E)>,
    rendered: Option<E>,
}

impl<E: ElementHandle> Default for LiveRenderer<E> {
    fn default() -> Self {
        Self {
            current: None,
            rendered: None,
        }
    }
}

impl<E: ElementHandle> LiveRenderer<E> {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn instance(&self) -> Option<&E> {
        self.current.as_ref().map(|(_, instance)| instance)
    }

    /// Ensure an instance of `tag` exists and apply `values` to it.
    ///
    /// `host` attributes are copied onto a newly created instance; `slot`
    /// markup becomes its light DOM.
    pub fn render<D: Dom<Element = E>>(
        &mut self,
        dom: &D,
        tag: &str,
        values: &KnobValues,
        host: Option<&TemplateNode>,
        slot: Option<&TemplateNode>,
    ) -> RenderOutcome<E> {
        if !dom.is_defined(tag) {
            self.clear(dom);
            return RenderOutcome::NotDefined {
                tag: tag.to_string(),
            };
        }

        let reuse = matches!(&self.current, Some((current, _)) if current == tag);
        let created = !reuse;
        if created {
            self.clear(dom);
            let instance = match dom.create_element(tag) {
                Ok(instance) => instance,
                Err(err) => {
                    return RenderOutcome::Failed {
                        tag: tag.to_string(),
                        message: err.to_string(),
                    };
                }
            };
            if let Some(host) = host {
                apply_host_template(&instance, tag, host);
            }
            if let Some(slot) = slot {
                instance.set_inner_markup(slot.content.trim());
            }
            dom.mount(&instance);
            tracing::debug!(tag, "instance created");
            self.rendered = Some(instance.clone());
            self.current = Some((tag.to_string(), instance));
        }

        let Some((_, instance)) = &self.current else {
            return RenderOutcome::NotDefined {
                tag: tag.to_string(),
            };
        };
        apply_values(instance, values);

        RenderOutcome::Rendered {
            instance: instance.clone(),
            created,
        }
    }

    /// The instance created by the last render, once.
    pub fn take_rendered(&mut self) -> Option<E> {
        self.rendered.take()
    }

    /// Remove the current instance from the page.
    pub fn clear<D: Dom<Element = E>>(&mut self, dom: &D) {
        if let Some((_, instance)) = self.current.take() {
            dom.unmount(&instance);
        }
        self.rendered = None;
    }
}

/// Copy the attributes of the template's root element when it is an
/// element of `tag`.
fn apply_host_template<E: ElementHandle>(instance: &E, tag: &str, host: &TemplateNode) {
    let Some(root) = markup::root_element(&host.content) else {
        return;
    };
    if root.tag != tag {
        tracing::debug!(tag, found = root.tag, "host template root is another element");
        return;
    }
    for (name, value) in root.attrs {
        instance.set_attribute(name, value.unwrap_or_default());
    }
}

/// Boolean knobs toggle their attribute. Custom knobs exist only as
/// attributes. Everything else is assigned as a property, keeping its type.
pub fn apply_values<E: ElementHandle>(instance: &E, values: &KnobValues) {
    for (key, entry) in values.iter() {
        let attribute = entry.attribute_name(key);
        match entry.kind() {
            KnobKind::Boolean => instance.toggle_attribute(attribute, is_truthy(&entry.value)),
            _ if entry.custom => match entry.attribute_value() {
                Some(text) => instance.set_attribute(attribute, &text),
                None => instance.remove_attribute(attribute),
            },
            _ => instance.set_property(key, &entry.value),
        }
    }
}
