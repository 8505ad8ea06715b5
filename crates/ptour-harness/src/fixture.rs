#![forbid(unsafe_code)]

//! Reference proposal-editor page with every target of the built-in tour.
//!
//! ```text
//! +--------------------------------------------------------------+
//! | header                                                       |
//! +---------+----------+---------+--------+----------+-----------+
//! | sidebar | document | design  | team   | preview  |           |
//! |         +----------+---------+--------+----------+-----------+
//! |         | proposal preview                       | quick     |
//! |         |                                        | stats     |
//! |         |                                        |           |
//! |         |                                        | financing |  <- below the fold
//! +---------+----------------------------------------+-----------+
//! ```

use ptour_core::geometry::{Rect, Size};

use crate::page::{PageElement, StaticPage};

pub const SOLAR_VIEWPORT: Size = Size::new(1440.0, 900.0);
pub const SOLAR_DOCUMENT: Size = Size::new(1440.0, 2600.0);

/// A fresh copy of the reference page, scrolled to the top.
pub fn solar_proposal_page() -> StaticPage {
    StaticPage::new(SOLAR_VIEWPORT, SOLAR_DOCUMENT)
        .with_element(PageElement::new("body", Rect::from_size(SOLAR_DOCUMENT)))
        .with_element(
            PageElement::new("header", Rect::new(0.0, 0.0, 1440.0, 64.0)).with_class("topbar"),
        )
        .with_element(
            PageElement::new("aside", Rect::new(0.0, 64.0, 240.0, 2536.0))
                .with_class("sidebar")
                .tutorial("left-sidebar"),
        )
        .with_element(
            PageElement::new("div", Rect::new(264.0, 88.0, 320.0, 48.0))
                .with_class("toolbar-group")
                .tutorial("document-controls"),
        )
        .with_element(
            PageElement::new("div", Rect::new(600.0, 88.0, 280.0, 48.0))
                .with_class("toolbar-group")
                .tutorial("design-controls"),
        )
        .with_element(
            PageElement::new("div", Rect::new(896.0, 88.0, 220.0, 48.0))
                .with_class("toolbar-group")
                .tutorial("team-controls"),
        )
        .with_element(
            PageElement::new("div", Rect::new(1132.0, 88.0, 284.0, 48.0))
                .with_class("toolbar-group")
                .tutorial("preview-send"),
        )
        .with_element(
            PageElement::new("main", Rect::new(264.0, 160.0, 872.0, 2400.0))
                .with_id("proposal-preview"),
        )
        .with_element(
            PageElement::new("section", Rect::new(1160.0, 160.0, 256.0, 360.0))
                .with_class("panel")
                .tutorial("quick-stats"),
        )
        .with_element(
            PageElement::new("section", Rect::new(1160.0, 1800.0, 256.0, 520.0))
                .with_class("panel")
                .tutorial("financing-options"),
        )
}
