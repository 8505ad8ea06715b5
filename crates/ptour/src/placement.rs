#![forbid(unsafe_code)]

//! Placement Calculator.
//!
//! Turns a target's viewport-relative bounds and the step's preferred side
//! into a highlight box (bounds grown by a fixed margin) and a tooltip anchor
//! point. The tooltip box is drawn centered on the anchor, i.e. translated by
//! -50%/-50% of its own size.
//!
//! When the target did not resolve, there is no highlight and the anchor is
//! the viewport center. Zero-size targets are not special-cased: they yield a
//! degenerate but well-formed highlight.
//!
//! No clamping happens here. [`Placement::clamped_tooltip_box`] exists for
//! hosts that opt into keeping the tooltip on-screen.

use ptour_core::geometry::{Point, Rect, Sides, Size};

/// Margin added on every side of the target for the highlight outline.
pub const HIGHLIGHT_MARGIN: f64 = 4.0;

/// Distance between the target edge and the tooltip anchor.
pub const TOOLTIP_OFFSET: f64 = 10.0;

/// Side of the target the tooltip attaches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "config",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Side {
    Top,
    #[default]
    Bottom,
    Left,
    Right,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::Top, Side::Bottom, Side::Left, Side::Right];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::Right => "right",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|side| side.as_str().eq_ignore_ascii_case(value))
    }
}

/// Margin and offset used by [`compute`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementParams {
    pub highlight_margin: f64,
    pub tooltip_offset: f64,
}

impl Default for PlacementParams {
    fn default() -> Self {
        Self {
            highlight_margin: HIGHLIGHT_MARGIN,
            tooltip_offset: TOOLTIP_OFFSET,
        }
    }
}

/// Where the tooltip's center goes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TooltipAnchor {
    /// A point in viewport coordinates.
    At(Point),
    /// 50% / 50% of whatever the viewport is at render time.
    ViewportCenter,
}

impl TooltipAnchor {
    pub fn resolve(self, viewport: Size) -> Point {
        match self {
            Self::At(point) => point,
            Self::ViewportCenter => viewport.center(),
        }
    }
}

/// Output of the calculator for one step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Outline drawn over the target; `None` when the target is missing.
    pub highlight: Option<Rect>,
    pub anchor: TooltipAnchor,
    pub side: Side,
}

impl Placement {
    /// Fallback for an unresolved target.
    pub const fn centered(side: Side) -> Self {
        Self {
            highlight: None,
            anchor: TooltipAnchor::ViewportCenter,
            side,
        }
    }

    pub fn is_centered(&self) -> bool {
        self.anchor == TooltipAnchor::ViewportCenter
    }

    pub fn anchor_point(&self, viewport: Size) -> Point {
        self.anchor.resolve(viewport)
    }

    /// Tooltip box centered on the anchor. May extend past the viewport.
    pub fn tooltip_box(&self, viewport: Size, tooltip: Size) -> Rect {
        Rect::centered_on(self.anchor_point(viewport), tooltip)
    }

    /// Tooltip box shifted the minimum distance needed to sit inside the
    /// viewport. A tooltip larger than the viewport is pinned to its
    /// top/left edge.
    pub fn clamped_tooltip_box(&self, viewport: Size, tooltip: Size) -> Rect {
        let rect = self.tooltip_box(viewport, tooltip);
        let max_x = (viewport.width - rect.width).max(0.0);
        let max_y = (viewport.height - rect.height).max(0.0);
        Rect::new(
            rect.x.clamp(0.0, max_x),
            rect.y.clamp(0.0, max_y),
            rect.width,
            rect.height,
        )
    }
}

/// Target bounds grown by `margin` on all sides.
pub fn highlight_box(target: Rect, margin: f64) -> Rect {
    target.outset(Sides::all(margin))
}

/// Anchor point next to `target` on `side`, `offset` pixels out.
pub fn anchor_point(target: Rect, side: Side, offset: f64) -> Point {
    let center = target.center();
    match side {
        Side::Top => Point::new(center.x, target.top() - offset),
        Side::Bottom => Point::new(center.x, target.bottom() + offset),
        Side::Left => Point::new(target.left() - offset, center.y),
        Side::Right => Point::new(target.right() + offset, center.y),
    }
}

/// Full placement for a (possibly missing) target.
pub fn compute(target: Option<Rect>, side: Side, params: PlacementParams) -> Placement {
    let Some(rect) = target else {
        return Placement::centered(side);
    };
    let placement = Placement {
        highlight: Some(highlight_box(rect, params.highlight_margin)),
        anchor: TooltipAnchor::At(anchor_point(rect, side, params.tooltip_offset)),
        side,
    };
    tracing::trace!(
        target: "ptour.placement",
        side = side.as_str(),
        x = rect.x,
        y = rect.y,
        width = rect.width,
        height = rect.height,
        "placement computed"
    );
    placement
}

#[cfg(test)]
mod tests {
    use super::*;

    const TARGET: Rect = Rect::new(200.0, 100.0, 50.0, 30.0);

    #[test]
    fn anchor_for_each_side() {
        let p = |side| anchor_point(TARGET, side, TOOLTIP_OFFSET);
        assert_eq!(p(Side::Top), Point::new(225.0, 90.0));
        assert_eq!(p(Side::Bottom), Point::new(225.0, 140.0));
        assert_eq!(p(Side::Left), Point::new(190.0, 115.0));
        assert_eq!(p(Side::Right), Point::new(260.0, 115.0));
    }

    #[test]
    fn highlight_grows_by_margin() {
        assert_eq!(
            highlight_box(TARGET, HIGHLIGHT_MARGIN),
            Rect::new(196.0, 96.0, 58.0, 38.0)
        );
    }

    #[test]
    fn compute_with_target() {
        let placement = compute(Some(TARGET), Side::Bottom, PlacementParams::default());
        assert_eq!(placement.highlight, Some(Rect::new(196.0, 96.0, 58.0, 38.0)));
        assert_eq!(
            placement.anchor,
            TooltipAnchor::At(Point::new(225.0, 140.0))
        );
        assert!(!placement.is_centered());
    }

    #[test]
    fn compute_without_target_falls_back_to_center() {
        let placement = compute(None, Side::Right, PlacementParams::default());
        assert!(placement.highlight.is_none());
        assert!(placement.is_centered());
        let viewport = Size::new(1440.0, 900.0);
        assert_eq!(placement.anchor_point(viewport), Point::new(720.0, 450.0));
    }

    #[test]
    fn zero_size_target_gives_degenerate_box() {
        let placement = compute(
            Some(Rect::new(50.0, 60.0, 0.0, 0.0)),
            Side::Top,
            PlacementParams::default(),
        );
        assert_eq!(placement.highlight, Some(Rect::new(46.0, 56.0, 8.0, 8.0)));
        assert_eq!(placement.anchor, TooltipAnchor::At(Point::new(50.0, 50.0)));
    }

    #[test]
    fn custom_params_are_honored() {
        let params = PlacementParams {
            highlight_margin: 0.0,
            tooltip_offset: 24.0,
        };
        let placement = compute(Some(TARGET), Side::Left, params);
        assert_eq!(placement.highlight, Some(TARGET));
        assert_eq!(placement.anchor, TooltipAnchor::At(Point::new(176.0, 115.0)));
    }

    #[test]
    fn tooltip_box_is_centered_and_unclamped() {
        let placement = compute(
            Some(Rect::new(0.0, 0.0, 20.0, 20.0)),
            Side::Left,
            PlacementParams::default(),
        );
        let viewport = Size::new(800.0, 600.0);
        let tooltip = placement.tooltip_box(viewport, Size::new(200.0, 100.0));
        assert_eq!(tooltip, Rect::new(-110.0, -40.0, 200.0, 100.0));

        let clamped = placement.clamped_tooltip_box(viewport, Size::new(200.0, 100.0));
        assert_eq!(clamped, Rect::new(0.0, 0.0, 200.0, 100.0));
        assert!(Rect::from_size(viewport).contains_rect(&clamped));
    }

    #[test]
    fn clamp_pins_oversized_tooltip() {
        let placement = Placement::centered(Side::Bottom);
        let viewport = Size::new(100.0, 100.0);
        let clamped = placement.clamped_tooltip_box(viewport, Size::new(300.0, 50.0));
        assert_eq!(clamped.x, 0.0);
        assert_eq!(clamped.y, 25.0);
    }

    #[test]
    fn side_parse() {
        assert_eq!(Side::parse("LEFT"), Some(Side::Left));
        assert_eq!(Side::parse("middle"), None);
        for side in Side::ALL {
            assert_eq!(Side::parse(side.as_str()), Some(side));
        }
    }
}
