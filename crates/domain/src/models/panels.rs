//! Edit-panel metadata.
//!
//! Describes which fields each page kind exposes to editors and in what
//! order: the base page fields first, then the variant's own fields in
//! declared order. Page chooser panels carry a hint naming the intended
//! target kind; the hint drives chooser UIs only and is not enforced by
//! the data layer.

use serde::Serialize;

use crate::models::page::PageKind;

/// One field exposed in the editing panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "panel", rename_all = "snake_case")]
pub enum FieldPanel {
    /// Plain field editor.
    Field { name: &'static str },
    /// Page reference chooser, hinted at a target kind.
    PageChooser {
        name: &'static str,
        target: PageKind,
    },
    /// Ordered block-list editor.
    BlockList { name: &'static str },
}

/// Base fields shared by every page, always first in the panel.
const BASE_PANELS: [FieldPanel; 2] = [
    FieldPanel::Field { name: "title" },
    FieldPanel::Field { name: "slug" },
];

/// The editor field list for a page kind, in display order.
pub fn content_panels(kind: PageKind) -> Vec<FieldPanel> {
    let mut panels = BASE_PANELS.to_vec();
    match kind {
        PageKind::Home => {
            panels.push(FieldPanel::Field { name: "body" });
            panels.push(FieldPanel::PageChooser {
                name: "about_page",
                target: PageKind::About,
            });
            panels.push(FieldPanel::PageChooser {
                name: "gallery_page",
                target: PageKind::Gallery,
            });
            panels.push(FieldPanel::PageChooser {
                name: "contact_page",
                target: PageKind::Contact,
            });
        }
        PageKind::About => {
            panels.push(FieldPanel::Field { name: "intro" });
        }
        PageKind::Gallery => {
            panels.push(FieldPanel::BlockList {
                name: "gallery_images",
            });
        }
        PageKind::Contact => {
            panels.push(FieldPanel::Field { name: "body" });
        }
    }
    panels
}
