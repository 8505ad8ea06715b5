//! End-to-end walkthrough of the built-in tour over the reference page.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use ptour::{
    CloseReason, PrimaryAction, ScrollBehavior, Selector, StepRegistry, TargetLocator,
    TooltipAnchor, TourConfig, TourController, TourEvent, TourState,
};
use ptour_core::geometry::{Point, Rect, Sides};
use ptour_harness::{PageLayout, SOLAR_VIEWPORT, StaticPage, solar_proposal_page};

fn instant_config() -> TourConfig {
    TourConfig {
        scroll_behavior: ScrollBehavior::Instant,
        ..TourConfig::default()
    }
}

fn instant_tour() -> TourController<StaticPage> {
    TourController::new(
        StepRegistry::solar_proposal().unwrap(),
        instant_config(),
        solar_proposal_page(),
    )
    .unwrap()
}

fn viewport_rect(page: &StaticPage, selector: &str) -> Rect {
    page.resolve(&Selector::parse(selector).unwrap()).unwrap().rect
}

#[test]
fn full_walkthrough_reaches_finish() {
    let closes = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&closes);
    let mut tour = instant_tour().with_on_close(move |reason| sink.borrow_mut().push(reason));

    assert_eq!(tour.open(), Some(TourEvent::Opened { step_count: 8 }));
    assert!(tour.placement().is_some());

    for expected in 1..8 {
        tour.next();
        assert_eq!(tour.cursor(), Some(expected));
        let placement = tour.placement().expect("instant scroll places immediately");
        assert!(placement.highlight.is_some(), "step {expected} should resolve");
    }

    // Next on the last step is a no-op; the button reads Finish.
    assert_eq!(tour.next(), None);
    assert_eq!(tour.cursor(), Some(7));
    assert_eq!(tour.primary_action(), Some(PrimaryAction::Finish));

    assert_eq!(
        tour.activate_primary(),
        Some(TourEvent::Closed {
            reason: CloseReason::Finished,
            at_step: 7,
        })
    );
    assert_eq!(tour.state(), TourState::Closed);
    assert_eq!(*closes.borrow(), [CloseReason::Finished]);
}

#[test]
fn below_the_fold_target_is_centered_then_placed() {
    let mut tour = instant_tour();
    tour.open();
    while tour.next().is_some() {}

    let step = tour.current_step().unwrap();
    assert_eq!(step.id, "step8");
    // 1800 + 520 / 2 - 900 / 2
    assert_eq!(tour.host().scroll_offset(), Point::new(0.0, 1610.0));

    let target = viewport_rect(tour.host(), "[data-tutorial='financing-options']");
    assert_eq!(target, Rect::new(1160.0, 190.0, 256.0, 520.0));

    let placement = tour.placement().unwrap();
    assert_eq!(placement.highlight, Some(Rect::new(1156.0, 186.0, 264.0, 528.0)));
    assert_eq!(placement.anchor, TooltipAnchor::At(Point::new(1150.0, 450.0)));

    let overlay = tour.overlay(SOLAR_VIEWPORT).unwrap();
    assert_eq!(overlay.progress_label(), "8 of 8");
    assert_eq!(overlay.title(), "Financing Options");
    assert!(overlay.can_go_back);
}

#[test]
fn smooth_scroll_defers_placement_until_finished() {
    let mut tour = TourController::solar_proposal(solar_proposal_page()).unwrap();
    tour.open();
    tour.next();
    assert_eq!(tour.current_step().unwrap().id, "step2");

    // The sidebar scroll is still animating: no geometry yet.
    assert!(tour.host().is_animating());
    assert!(tour.placement().is_none());
    assert!(tour.overlay(SOLAR_VIEWPORT).unwrap().is_settling());
    assert!(!tour.poll());

    assert!(tour.host_mut().finish_animations());
    assert!(tour.poll());

    let sidebar = viewport_rect(tour.host(), "[data-tutorial='left-sidebar']");
    let placement = tour.placement().unwrap();
    assert_eq!(placement.highlight, Some(sidebar.outset(Sides::all(4.0))));
    assert_eq!(
        placement.anchor,
        TooltipAnchor::At(Point::new(sidebar.right() + 10.0, sidebar.center().y))
    );
}

#[test]
fn moving_on_before_the_scroll_ends_measures_the_new_step() {
    let mut tour = TourController::solar_proposal(solar_proposal_page()).unwrap();
    tour.open();
    tour.next();
    assert!(tour.host().is_animating());

    // Jump ahead to quick stats while the sidebar scroll is in flight.
    tour.next();
    tour.next();
    tour.next();
    tour.next();
    tour.next();
    assert_eq!(tour.current_step().unwrap().id, "step7");
    tour.host_mut().finish_animations();
    tour.poll();

    let stats = viewport_rect(tour.host(), "[data-tutorial='quick-stats']");
    assert_eq!(
        tour.placement().unwrap().highlight,
        Some(stats.outset(Sides::all(4.0)))
    );
}

#[test]
fn host_that_never_settles_times_out() {
    let mut tour = TourController::solar_proposal(solar_proposal_page()).unwrap();
    tour.open();
    tour.next();
    assert!(!tour.tick(Duration::from_millis(300)));
    assert!(tour.placement().is_none());
    assert!(tour.tick(Duration::from_millis(300)));

    // Measured against the pre-scroll position.
    let placement = tour.placement().unwrap();
    assert_eq!(
        placement.highlight,
        Some(Rect::new(0.0, 64.0, 240.0, 2536.0).outset(Sides::all(4.0)))
    );
}

#[test]
fn missing_target_centers_tooltip_without_scrolling() {
    let mut layout = PageLayout::from_page(&solar_proposal_page());
    layout
        .elements
        .retain(|el| el.attributes.get("data-tutorial").map(String::as_str) != Some("quick-stats"));
    let page = layout.into_page().unwrap();

    let mut tour =
        TourController::new(StepRegistry::solar_proposal().unwrap(), instant_config(), page)
            .unwrap();
    tour.open();
    for _ in 0..5 {
        tour.next();
    }
    let before = tour.host().scroll_requests();
    tour.next();
    assert_eq!(tour.current_step().unwrap().id, "step7");
    assert_eq!(tour.host().scroll_requests(), before);
    assert!(tour.resolved_target().is_none());

    let placement = tour.placement().unwrap();
    assert!(placement.is_centered());
    assert_eq!(placement.anchor_point(SOLAR_VIEWPORT), Point::new(720.0, 450.0));
    assert!(tour.overlay(SOLAR_VIEWPORT).unwrap().highlight().is_none());

    // The tour still advances past the gap.
    tour.next();
    assert!(!tour.placement().unwrap().is_centered());
}

#[test]
fn refresh_remeasures_after_resize() {
    let mut tour = instant_tour();
    tour.open();
    tour.next();
    let before = tour.placement().unwrap();

    tour.host_mut().set_viewport(ptour_core::geometry::Size::new(1024.0, 600.0));
    tour.refresh();
    let after = tour.placement().unwrap();
    assert_ne!(before, after);

    let sidebar = viewport_rect(tour.host(), "[data-tutorial='left-sidebar']");
    assert_eq!(after.highlight, Some(sidebar.outset(Sides::all(4.0))));
}

#[test]
fn dismiss_and_hide_report_different_reasons() {
    let closes = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&closes);
    let mut tour = instant_tour().with_on_close(move |reason| sink.borrow_mut().push(reason));

    tour.open();
    tour.next();
    tour.next();
    assert_eq!(
        tour.dismiss(),
        Some(TourEvent::Closed {
            reason: CloseReason::Dismissed,
            at_step: 2,
        })
    );

    tour.set_open(true);
    assert_eq!(tour.cursor(), Some(0));
    tour.set_open(false);
    assert_eq!(tour.state(), TourState::Closed);

    // Hiding does not invoke the callback.
    assert_eq!(*closes.borrow(), [CloseReason::Dismissed]);
    assert!(tour.overlay(SOLAR_VIEWPORT).is_none());
}
