//! One printed snapshot of the tour after a button press.

use std::fmt;

use ptour::{CloseReason, TourController, TourEvent};
use ptour_core::geometry::{Point, Rect, Size};
use ptour_harness::StaticPage;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepFrame {
    pub index: usize,
    pub id: String,
    pub title: String,
    pub progress: String,
    pub side: &'static str,
    pub can_go_back: bool,
    pub primary: &'static str,
    /// No target on the page; the tooltip sits in the viewport center.
    pub centered: bool,
    pub highlight: Option<Rect>,
    pub anchor: Option<Point>,
    pub tooltip: Option<Rect>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub action: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event: Option<String>,
    pub scroll: Point,
    /// `None` while the tour is closed.
    pub step: Option<StepFrame>,
}

impl Frame {
    pub fn capture(
        action: &str,
        event: Option<TourEvent>,
        tour: &TourController<StaticPage>,
        tooltip: Size,
    ) -> Self {
        let viewport = tour.host().viewport();
        let step = tour.overlay(viewport).map(|overlay| StepFrame {
            index: overlay.step_index,
            id: overlay.step.id.clone(),
            title: overlay.title().to_string(),
            progress: overlay.progress_label(),
            side: overlay.step.preferred_side.as_str(),
            can_go_back: overlay.can_go_back,
            primary: overlay.primary.label(),
            centered: overlay
                .phase
                .placement()
                .is_some_and(|placement| placement.is_centered()),
            highlight: overlay.highlight(),
            anchor: overlay.anchor(),
            tooltip: overlay.tooltip_box(tooltip),
        });
        Self {
            action: action.to_string(),
            event: event.as_ref().map(describe_event),
            scroll: tour.host().scroll_offset(),
            step,
        }
    }
}

pub fn describe_event(event: &TourEvent) -> String {
    match event {
        TourEvent::Opened { step_count } => format!("opened ({step_count} steps)"),
        TourEvent::StepChanged { from, to, .. } => format!("step {} -> {}", from + 1, to + 1),
        TourEvent::Closed { reason, at_step } => {
            let reason = match reason {
                CloseReason::Dismissed => "dismissed",
                CloseReason::Finished => "finished",
                CloseReason::Hidden => "hidden",
            };
            format!("closed: {reason} at step {}", at_step + 1)
        }
    }
}

struct RectText(Rect);

impl fmt::Display for RectText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({},{} {}x{})",
            self.0.x, self.0.y, self.0.width, self.0.height
        )
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<8} ", self.action)?;
        match &self.step {
            None => write!(f, "closed")?,
            Some(step) => {
                write!(f, "{} {} {}", step.progress, step.id, step.side)?;
                match (step.anchor, step.centered) {
                    (None, _) => write!(f, " settling")?,
                    (Some(anchor), true) => write!(f, " centered anchor=({},{})", anchor.x, anchor.y)?,
                    (Some(anchor), false) => {
                        if let Some(highlight) = step.highlight {
                            write!(f, " highlight={}", RectText(highlight))?;
                        }
                        write!(f, " anchor=({},{})", anchor.x, anchor.y)?;
                    }
                }
            }
        }
        write!(f, " scroll=({},{})", self.scroll.x, self.scroll.y)?;
        if let Some(event) = &self.event {
            write!(f, " | {event}")?;
        }
        Ok(())
    }
}
