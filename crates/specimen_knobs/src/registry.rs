//! Per-host registry of author templates.
//!
//! Each demo host owns one [`TemplateRegistry`]. Entries are keyed by the
//! host's [`DemoId`] and populated once, before knobs are derived or a
//! snippet is generated. Setting templates for an id again replaces them.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::template::{TemplateKind, TemplateNode};

/// Identifier of a demo host instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DemoId(pub u32);

impl std::fmt::Display for DemoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "demo-{}", self.0)
    }
}

#[derive(Debug, Clone, Default)]
pub struct TemplateRegistry {
    entries: FxHashMap<DemoId, Vec<TemplateNode>>,
}

impl TemplateRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace every template of `id`.
    pub fn set_templates(&mut self, id: DemoId, templates: Vec<TemplateNode>) {
        tracing::debug!(%id, count = templates.len(), "templates registered");
        self.entries.insert(id, templates);
    }

    #[inline]
    pub fn has_template(&self, id: DemoId, tag: &str, kind: TemplateKind) -> bool {
        self.template(id, tag, kind).is_some()
    }

    /// First template of `kind` for `tag`.
    pub fn template(&self, id: DemoId, tag: &str, kind: TemplateKind) -> Option<&TemplateNode> {
        self.entries
            .get(&id)?
            .iter()
            .find(|node| node.matches(tag, kind))
    }

    /// Every template of `kind` for `tag`, in document order.
    pub fn templates<'a>(
        &'a self,
        id: DemoId,
        tag: &'a str,
        kind: TemplateKind,
    ) -> impl Iterator<Item = &'a TemplateNode> + 'a {
        self.entries
            .get(&id)
            .into_iter()
            .flatten()
            .filter(move |node| node.matches(tag, kind))
    }
}
