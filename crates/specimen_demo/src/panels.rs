//! Demo panel visibility.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DemoPanelKind {
    Knobs,
    Slots,
    Styles,
    Events,
    Source,
}

impl DemoPanelKind {
    pub const ALL: [DemoPanelKind; 5] = [
        Self::Knobs,
        Self::Slots,
        Self::Styles,
        Self::Events,
        Self::Source,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Knobs => "Knobs",
            Self::Slots => "Slots",
            Self::Styles => "Styles",
            Self::Events => "Events",
            Self::Source => "Source",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DemoPanel {
    pub kind: DemoPanelKind,
    pub count: usize,
    pub hidden: bool,
}

/// Panels of the demo, in display order. Empty panels are hidden; the
/// source panel is always shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DemoPanels {
    pub panels: Vec<DemoPanel>,
}

impl DemoPanels {
    pub fn new(knobs: usize, slots: usize, styles: usize, events: usize) -> Self {
        let panels = DemoPanelKind::ALL
            .into_iter()
            .map(|kind| {
                let count = match kind {
                    DemoPanelKind::Knobs => knobs,
                    DemoPanelKind::Slots => slots,
                    DemoPanelKind::Styles => styles,
                    DemoPanelKind::Events => events,
                    DemoPanelKind::Source => 1,
                };
                DemoPanel {
                    kind,
                    count,
                    hidden: count == 0,
                }
            })
            .collect();
        Self { panels }
    }

    pub fn visible(&self) -> impl Iterator<Item = &DemoPanel> {
        self.panels.iter().filter(|p| !p.hidden)
    }

    pub fn is_hidden(&self, kind: DemoPanelKind) -> bool {
        self.panels.iter().any(|p| p.kind == kind && p.hidden)
    }
}
