#![forbid(unsafe_code)]

//! Render-ready view of the open tour.
//!
//! A [`TourOverlay`] exists only while the tour is open; its presence means
//! "draw the dimming backdrop". While the current step's scroll is settling
//! the overlay carries no geometry and hosts draw the backdrop alone.

use ptour_core::geometry::{Point, Rect, Size};

use crate::registry::TourStep;
use crate::session::PlacementPhase;

/// Forward button of the tooltip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimaryAction {
    Next,
    /// Shown on the last step instead of Next.
    Finish,
}

impl PrimaryAction {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Next => "Next",
            Self::Finish => "Finish",
        }
    }
}

#[derive(Debug, Clone)]
pub struct TourOverlay<'a> {
    pub step: &'a TourStep,
    pub step_index: usize,
    pub step_count: usize,
    /// Previous is disabled on the first step.
    pub can_go_back: bool,
    pub primary: PrimaryAction,
    pub phase: PlacementPhase,
    pub viewport: Size,
    pub clamp_to_viewport: bool,
}

impl<'a> TourOverlay<'a> {
    pub fn title(&self) -> &'a str {
        &self.step.title
    }

    pub fn description(&self) -> &'a str {
        &self.step.description
    }

    /// `"3 of 8"`.
    pub fn progress_label(&self) -> String {
        format!("{} of {}", self.step_index + 1, self.step_count)
    }

    pub fn is_settling(&self) -> bool {
        matches!(self.phase, PlacementPhase::Settling)
    }

    /// Outline over the target, if placed and resolved.
    pub fn highlight(&self) -> Option<Rect> {
        self.phase.placement().and_then(|placement| placement.highlight)
    }

    /// Tooltip center in viewport coordinates, once placed.
    pub fn anchor(&self) -> Option<Point> {
        self.phase
            .placement()
            .map(|placement| placement.anchor_point(self.viewport))
    }

    /// Tooltip box for a tooltip of the given size, once placed.
    pub fn tooltip_box(&self, tooltip: Size) -> Option<Rect> {
        let placement = self.phase.placement()?;
        Some(if self.clamp_to_viewport {
            placement.clamped_tooltip_box(self.viewport, tooltip)
        } else {
            placement.tooltip_box(self.viewport, tooltip)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placement::{Placement, PlacementParams, Side, compute};

    fn overlay(step: &TourStep, phase: PlacementPhase, clamp: bool) -> TourOverlay<'_> {
        TourOverlay {
            step,
            step_index: 2,
            step_count: 8,
            can_go_back: true,
            primary: PrimaryAction::Next,
            phase,
            viewport: Size::new(1000.0, 800.0),
            clamp_to_viewport: clamp,
        }
    }

    #[test]
    fn progress_label_is_one_based() {
        let step = TourStep::new("s", "Title", "Body", "body", Side::Bottom).unwrap();
        let view = overlay(&step, PlacementPhase::Settling, false);
        assert_eq!(view.progress_label(), "3 of 8");
        assert_eq!(view.title(), "Title");
        assert_eq!(view.description(), "Body");
    }

    #[test]
    fn settling_overlay_has_no_geometry() {
        let step = TourStep::new("s", "t", "d", "body", Side::Bottom).unwrap();
        let view = overlay(&step, PlacementPhase::Settling, false);
        assert!(view.is_settling());
        assert!(view.highlight().is_none());
        assert!(view.anchor().is_none());
        assert!(view.tooltip_box(Size::new(10.0, 10.0)).is_none());
    }

    #[test]
    fn centered_overlay_uses_viewport_center() {
        let step = TourStep::new("s", "t", "d", "#missing", Side::Left).unwrap();
        let view = overlay(&step, PlacementPhase::Placed(Placement::centered(Side::Left)), false);
        assert!(view.highlight().is_none());
        assert_eq!(view.anchor(), Some(Point::new(500.0, 400.0)));
    }

    #[test]
    fn clamp_flag_selects_clamped_box() {
        let step = TourStep::new("s", "t", "d", "body", Side::Top).unwrap();
        let placement = compute(
            Some(Rect::new(0.0, 0.0, 40.0, 20.0)),
            Side::Top,
            PlacementParams::default(),
        );
        let tooltip = Size::new(200.0, 80.0);
        let free = overlay(&step, PlacementPhase::Placed(placement), false);
        let clamped = overlay(&step, PlacementPhase::Placed(placement), true);
        assert_eq!(
            free.tooltip_box(tooltip),
            Some(Rect::new(-80.0, -50.0, 200.0, 80.0))
        );
        assert_eq!(
            clamped.tooltip_box(tooltip),
            Some(Rect::new(0.0, 0.0, 200.0, 80.0))
        );
    }

    #[test]
    fn primary_labels() {
        assert_eq!(PrimaryAction::Next.label(), "Next");
        assert_eq!(PrimaryAction::Finish.label(), "Finish");
    }
}
