#![forbid(unsafe_code)]

//! In-memory document implementing the tour host traits.
//!
//! Element bounds are stored in document space. The locator reports them
//! relative to the viewport (document rect minus scroll offset), the way a
//! bounding-client-rect query would.
//!
//! Scrolling follows the usual scroll-into-view rules: the vertical axis
//! aligns to the requested [`ScrollBlock`], the horizontal axis scrolls the
//! minimum needed, and the resulting offset is clamped to the document.
//! Instant scrolls apply immediately. Smooth scrolls are held as a pending
//! animation until [`StaticPage::finish_animations`] runs, which lets tests
//! observe the controller while a scroll is in flight.

use std::collections::BTreeMap;

use ptour::{
    ElementSnapshot, ScrollBehavior, ScrollBlock, ScrollCompletion, ScrollRequest, ScrollTicket,
    Selector, SelectorSubject, TargetLocator, ViewportScroller, scroll_signal,
};
use ptour_core::geometry::{Point, Rect, Size};

/// One element of a [`StaticPage`].
#[derive(Debug, Clone, PartialEq)]
pub struct PageElement {
    pub tag: String,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub attributes: BTreeMap<String, String>,
    /// Bounds in document space (scroll offset not applied).
    pub rect: Rect,
}

impl PageElement {
    pub fn new(tag: impl Into<String>, rect: Rect) -> Self {
        Self {
            tag: tag.into(),
            id: None,
            classes: Vec::new(),
            attributes: BTreeMap::new(),
            rect,
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    #[must_use]
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Shorthand for `data-tutorial="<name>"`.
    #[must_use]
    pub fn tutorial(self, name: impl Into<String>) -> Self {
        self.with_attr("data-tutorial", name)
    }
}

impl SelectorSubject for PageElement {
    fn tag_name(&self) -> &str {
        &self.tag
    }

    fn element_id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        match name {
            "id" => self.id.as_deref(),
            _ => self.attributes.get(name).map(String::as_str),
        }
    }
}

#[derive(Debug)]
struct Animation {
    to: Point,
    completion: ScrollCompletion,
}

/// A viewport over a fixed document.
#[derive(Debug)]
pub struct StaticPage {
    viewport: Size,
    document: Size,
    scroll: Point,
    elements: Vec<PageElement>,
    animation: Option<Animation>,
    scroll_requests: usize,
}

impl StaticPage {
    /// An empty page scrolled to the top.
    pub fn new(viewport: Size, document: Size) -> Self {
        Self {
            viewport,
            document,
            scroll: Point::default(),
            elements: Vec::new(),
            animation: None,
            scroll_requests: 0,
        }
    }

    #[must_use]
    pub fn with_element(mut self, element: PageElement) -> Self {
        self.push(element);
        self
    }

    /// Append an element. Later elements come later in document order.
    pub fn push(&mut self, element: PageElement) {
        self.elements.push(element);
    }

    pub fn elements(&self) -> &[PageElement] {
        &self.elements
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    pub fn document(&self) -> Size {
        self.document
    }

    pub fn scroll_offset(&self) -> Point {
        self.scroll
    }

    /// Resize the viewport, re-clamping the scroll offset.
    pub fn set_viewport(&mut self, viewport: Size) {
        self.viewport = viewport;
        self.scroll = self.clamp_scroll(self.scroll);
    }

    /// Jump to `offset` (clamped), as a user scroll would. Interrupts any
    /// animation in flight.
    pub fn scroll_to(&mut self, offset: Point) {
        self.interrupt();
        self.scroll = self.clamp_scroll(offset);
    }

    /// Largest valid scroll offset on each axis.
    pub fn max_scroll(&self) -> Point {
        Point::new(
            (self.document.width - self.viewport.width).max(0.0),
            (self.document.height - self.viewport.height).max(0.0),
        )
    }

    /// First element in document order matching `selector`.
    pub fn query(&self, selector: &Selector) -> Option<&PageElement> {
        self.elements.iter().find(|el| selector.matches(*el))
    }

    /// Bounds of `element` relative to the viewport.
    pub fn viewport_rect(&self, element: &PageElement) -> Rect {
        element.rect.translate(-self.scroll.x, -self.scroll.y)
    }

    /// Whether a smooth scroll is waiting to be finished.
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Complete the pending smooth scroll, if any. Returns `true` if one ran.
    pub fn finish_animations(&mut self) -> bool {
        let Some(animation) = self.animation.take() else {
            return false;
        };
        // The viewport may have been resized since the animation started.
        self.scroll = self.clamp_scroll(animation.to);
        animation.completion.complete();
        tracing::trace!(
            target: "ptour.harness",
            x = self.scroll.x,
            y = self.scroll.y,
            "smooth scroll finished"
        );
        true
    }

    /// Number of scroll-into-view requests received so far.
    pub fn scroll_requests(&self) -> usize {
        self.scroll_requests
    }

    /// Offset that brings `rect` into view under `block`.
    pub fn reveal_offset(&self, rect: Rect, block: ScrollBlock) -> Point {
        self.clamp_scroll(Point::new(
            align(
                ScrollBlock::Nearest,
                rect.x,
                rect.width,
                self.scroll.x,
                self.viewport.width,
            ),
            align(
                block,
                rect.y,
                rect.height,
                self.scroll.y,
                self.viewport.height,
            ),
        ))
    }

    fn clamp_scroll(&self, offset: Point) -> Point {
        let max = self.max_scroll();
        Point::new(offset.x.clamp(0.0, max.x), offset.y.clamp(0.0, max.y))
    }

    fn interrupt(&mut self) {
        // Dropping the completion settles its ticket.
        if self.animation.take().is_some() {
            tracing::trace!(target: "ptour.harness", "smooth scroll interrupted");
        }
    }
}

/// Scroll position along one axis that places `[start, start + len)` per `block`.
fn align(block: ScrollBlock, start: f64, len: f64, current: f64, view: f64) -> f64 {
    match block {
        ScrollBlock::Start => start,
        ScrollBlock::Center => start + len / 2.0 - view / 2.0,
        ScrollBlock::End => start + len - view,
        ScrollBlock::Nearest => {
            let end = start + len;
            if start >= current && end <= current + view {
                current
            } else if start < current || len > view {
                start
            } else {
                end - view
            }
        }
    }
}

impl TargetLocator for StaticPage {
    fn resolve(&self, selector: &Selector) -> Option<ElementSnapshot> {
        self.query(selector)
            .map(|el| ElementSnapshot::new(self.viewport_rect(el)))
    }
}

impl ViewportScroller for StaticPage {
    fn scroll_into_view(&mut self, selector: &Selector, request: ScrollRequest) -> ScrollTicket {
        self.scroll_requests += 1;
        let Some(rect) = self.query(selector).map(|el| el.rect) else {
            return ScrollTicket::settled();
        };
        let to = self.reveal_offset(rect, request.block);
        self.interrupt();
        if to == self.scroll || request.behavior == ScrollBehavior::Instant {
            self.scroll = to;
            return ScrollTicket::settled();
        }
        let (completion, ticket) = scroll_signal();
        self.animation = Some(Animation { to, completion });
        ticket
    }
}
