#![forbid(unsafe_code)]

//! JSON page descriptions.
//!
//! ```json
//! {
//!   "viewport": { "width": 1280, "height": 800 },
//!   "document": { "width": 1280, "height": 2400 },
//!   "elements": [
//!     { "tag": "body", "rect": { "x": 0, "y": 0, "width": 1280, "height": 2400 } },
//!     { "tag": "aside", "attributes": { "data-tutorial": "left-sidebar" },
//!       "rect": { "x": 0, "y": 64, "width": 240, "height": 1200 } }
//!   ]
//! }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use ptour_core::geometry::{Point, Rect, Size};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::page::{PageElement, StaticPage};

#[derive(Debug, Error)]
pub enum PageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid page layout: {}", .0.join("; "))]
    Validation(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ElementLayout {
    pub tag: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub classes: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
    /// Document-space bounds.
    pub rect: Rect,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PageLayout {
    pub viewport: Size,
    pub document: Size,
    #[serde(default)]
    pub scroll: Point,
    /// Document order.
    pub elements: Vec<ElementLayout>,
}

impl PageLayout {
    pub fn from_json_str(s: &str) -> Result<Self, PageError> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, PageError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn to_json_string(&self) -> Result<String, PageError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Snapshot of `page`, including its current scroll offset.
    pub fn from_page(page: &StaticPage) -> Self {
        Self {
            viewport: page.viewport(),
            document: page.document(),
            scroll: page.scroll_offset(),
            elements: page
                .elements()
                .iter()
                .map(|el| ElementLayout {
                    tag: el.tag.clone(),
                    id: el.id.clone(),
                    classes: el.classes.clone(),
                    attributes: el.attributes.clone(),
                    rect: el.rect,
                })
                .collect(),
        }
    }

    /// Collect every problem rather than stopping at the first.
    pub fn validate(&self) -> Result<(), PageError> {
        let mut errors = Vec::new();
        if !(self.viewport.width > 0.0 && self.viewport.height > 0.0) {
            errors.push(format!(
                "viewport must be positive, got {}x{}",
                self.viewport.width, self.viewport.height
            ));
        }
        if !(self.document.width >= 0.0 && self.document.height >= 0.0) {
            errors.push("document size must be non-negative".to_string());
        }
        for (index, el) in self.elements.iter().enumerate() {
            if el.tag.trim().is_empty() {
                errors.push(format!("elements[{index}]: empty tag"));
            }
            let r = el.rect;
            if ![r.x, r.y, r.width, r.height].iter().all(|v| v.is_finite()) {
                errors.push(format!("elements[{index}]: rect must be finite"));
            } else if r.width < 0.0 || r.height < 0.0 {
                errors.push(format!("elements[{index}]: negative rect size"));
            }
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(PageError::Validation(errors))
        }
    }

    /// Validate and build the page. The scroll offset is clamped.
    pub fn into_page(self) -> Result<StaticPage, PageError> {
        self.validate()?;
        let mut page = StaticPage::new(self.viewport, self.document);
        for el in self.elements {
            page.push(PageElement {
                tag: el.tag,
                id: el.id,
                classes: el.classes,
                attributes: el.attributes,
                rect: el.rect,
            });
        }
        page.scroll_to(self.scroll);
        Ok(page)
    }
}
