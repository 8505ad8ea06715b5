//! Property-based invariant tests for the geometry primitives.
//!
//! 1. `outset` followed by `inner` with the same margin is the identity
//! 2. `centered_on` always reports the requested center
//! 3. An outset rect contains the original

use ptour_core::geometry::{Point, Rect, Sides, Size};
use proptest::prelude::*;

// Integral pixel values keep float comparisons exact.
fn coord() -> impl Strategy<Value = f64> {
    (-4000i32..4000).prop_map(f64::from)
}

fn extent() -> impl Strategy<Value = f64> {
    (0i32..2000).prop_map(f64::from)
}

fn rect_strategy() -> impl Strategy<Value = Rect> {
    (coord(), coord(), extent(), extent()).prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
}

proptest! {
    #[test]
    fn outset_then_inner_is_identity(rect in rect_strategy(), margin in 0i32..64) {
        let sides = Sides::all(f64::from(margin));
        prop_assert_eq!(rect.outset(sides).inner(sides), rect);
    }

    #[test]
    fn outset_contains_original(rect in rect_strategy(), margin in 0i32..64) {
        let grown = rect.outset(Sides::all(f64::from(margin)));
        prop_assert!(grown.contains_rect(&rect));
    }

    #[test]
    fn centered_on_reports_center(x in coord(), y in coord(), w in extent(), h in extent()) {
        let center = Point::new(x, y);
        let rect = Rect::centered_on(center, Size::new(w, h));
        prop_assert_eq!(rect.center(), center);
    }
}
