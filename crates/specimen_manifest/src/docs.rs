//! Section summary for the documentation view.
//!
//! The tab widget only needs to know which sections exist and how many
//! entries each holds; empty sections are hidden instead of rendered.

use serde::{Deserialize, Serialize};

use crate::declaration::ElementDeclaration;

/// One documentation section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SectionKind {
    Properties,
    Attributes,
    Methods,
    Events,
    Slots,
    CssParts,
    CssProperties,
}

impl SectionKind {
    /// All sections in display order.
    pub const ALL: [SectionKind; 7] = [
        Self::Properties,
        Self::Attributes,
        Self::Methods,
        Self::Events,
        Self::Slots,
        Self::CssParts,
        Self::CssProperties,
    ];

    /// Tab label.
    #[inline]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Properties => "Properties",
            Self::Attributes => "Attributes",
            Self::Methods => "Methods",
            Self::Events => "Events",
            Self::Slots => "Slots",
            Self::CssParts => "CSS Shadow Parts",
            Self::CssProperties => "CSS Custom Properties",
        }
    }
}

/// A section with its entry count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocSection {
    pub kind: SectionKind,
    pub count: usize,
}

impl DocSection {
    #[inline]
    pub fn hidden(&self) -> bool {
        self.count == 0
    }
}

/// Ordered sections of one element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocSections {
    pub sections: Vec<DocSection>,
}

impl DocSections {
    /// Count every section of a declaration.
    pub fn for_declaration(decl: &ElementDeclaration) -> Self {
        let sections = SectionKind::ALL
            .iter()
            .map(|&kind| DocSection {
                kind,
                count: match kind {
                    SectionKind::Properties => decl.properties.len(),
                    SectionKind::Attributes => decl.attributes.len(),
                    SectionKind::Methods => decl.methods.len(),
                    SectionKind::Events => decl.events.len(),
                    SectionKind::Slots => decl.slots.len(),
                    SectionKind::CssParts => decl.css_parts.len(),
                    SectionKind::CssProperties => decl.css_properties.len(),
                },
            })
            .collect();
        Self { sections }
    }

    /// Sections that have at least one entry.
    pub fn visible(&self) -> impl Iterator<Item = &DocSection> {
        self.sections.iter().filter(|s| !s.hidden())
    }

    /// Number of hidden sections.
    pub fn hidden_count(&self) -> usize {
        self.sections.iter().filter(|s| s.hidden()).count()
    }

    /// `true` when the element documents nothing beyond its description.
    pub fn is_empty(&self) -> bool {
        self.sections.iter().all(DocSection::hidden)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::declaration::{EventDescriptor, PropertyDescriptor, SlotDescriptor};

    #[test]
    fn test_sections_hide_empty() {
        let mut decl = ElementDeclaration::new("foo-bar");
        decl.properties.push(PropertyDescriptor::new("disabled", "boolean"));
        decl.events.push(EventDescriptor::new("change"));
        decl.slots.push(SlotDescriptor::new(""));
        decl.slots.push(SlotDescriptor::new("icon"));

        let sections = DocSections::for_declaration(&decl);
        let visible: Vec<_> = sections.visible().map(|s| (s.kind.label(), s.count)).collect();
        assert_eq!(
            visible,
            vec![("Properties", 1), ("Events", 1), ("Slots", 2)]
        );
        assert_eq!(sections.hidden_count(), 4);
        assert!(!sections.is_empty());
    }

    #[test]
    fn test_empty_declaration() {
        let sections = DocSections::for_declaration(&ElementDeclaration::new("x-empty"));
        assert!(sections.is_empty());
        assert_eq!(sections.visible().count(), 0);
    }
}
