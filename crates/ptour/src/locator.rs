#![forbid(unsafe_code)]

//! Target Resolver.
//!
//! The engine never touches a rendering surface directly. Hosts inject a
//! [`TargetLocator`] that answers "where is the element matching this
//! selector right now?" with a geometry snapshot, or `None`.

use ptour_core::geometry::Rect;

use crate::registry::TourStep;
use crate::selector::Selector;

/// Bounds of a matched element at the moment it was queried.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementSnapshot {
    /// Bounding box relative to the viewport's top-left corner.
    pub rect: Rect,
}

impl ElementSnapshot {
    pub const fn new(rect: Rect) -> Self {
        Self { rect }
    }
}

/// Looks up live elements by selector.
///
/// Contract: pure read. When several elements match, return the first in
/// document order. Return `None` when nothing matches.
pub trait TargetLocator {
    fn resolve(&self, selector: &Selector) -> Option<ElementSnapshot>;
}

impl<T: TargetLocator + ?Sized> TargetLocator for &T {
    fn resolve(&self, selector: &Selector) -> Option<ElementSnapshot> {
        (**self).resolve(selector)
    }
}

impl<T: TargetLocator + ?Sized> TargetLocator for &mut T {
    fn resolve(&self, selector: &Selector) -> Option<ElementSnapshot> {
        (**self).resolve(selector)
    }
}

impl<T: TargetLocator + ?Sized> TargetLocator for Box<T> {
    fn resolve(&self, selector: &Selector) -> Option<ElementSnapshot> {
        (**self).resolve(selector)
    }
}

/// Adapts a closure into a locator.
pub struct FnLocator<F>(pub F);

impl<F> TargetLocator for FnLocator<F>
where
    F: Fn(&Selector) -> Option<ElementSnapshot>,
{
    fn resolve(&self, selector: &Selector) -> Option<ElementSnapshot> {
        (self.0)(selector)
    }
}

/// Resolve the target of `step`, logging misses.
pub fn resolve_target<L: TargetLocator + ?Sized>(
    locator: &L,
    step: &TourStep,
) -> Option<ElementSnapshot> {
    let resolved = locator.resolve(&step.target);
    if resolved.is_none() {
        tracing::debug!(
            target: "ptour.controller",
            step_id = %step.id,
            selector = %step.target,
            "target not found; using centered placement"
        );
    }
    resolved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placement::Side;

    #[test]
    fn fn_locator_forwards_selector() {
        let locator = FnLocator(|sel: &Selector| {
            (sel.as_str() == "body").then(|| ElementSnapshot::new(Rect::new(0.0, 0.0, 10.0, 10.0)))
        });
        let body = TourStep::new("a", "t", "d", "body", Side::Bottom).unwrap();
        let nav = TourStep::new("b", "t", "d", "#nav", Side::Bottom).unwrap();
        assert!(resolve_target(&locator, &body).is_some());
        assert!(resolve_target(&locator, &nav).is_none());
    }

    #[test]
    fn boxed_locator_is_a_locator() {
        let boxed: Box<dyn TargetLocator> = Box::new(FnLocator(|_: &Selector| None));
        let step = TourStep::new("a", "t", "d", "body", Side::Top).unwrap();
        assert!(resolve_target(&boxed, &step).is_none());
    }
}
