#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use ptour::{ScrollBehavior, ScrollBlock, StepRegistry, TourConfig, TourController};
use ptour_core::geometry::Size;
use ptour_harness::solar_proposal_page;

#[derive(Debug, Arbitrary)]
enum Op {
    Open,
    Next,
    Previous,
    Dismiss,
    Finish,
    Hide,
    Refresh,
    FinishScroll,
    Tick(u16),
    Resize(u16, u16),
}

#[derive(Debug, Arbitrary)]
struct Input {
    smooth: bool,
    block: u8,
    clamp: bool,
    ops: Vec<Op>,
}

fuzz_target!(|input: Input| {
    let config = TourConfig {
        scroll_behavior: if input.smooth {
            ScrollBehavior::Smooth
        } else {
            ScrollBehavior::Instant
        },
        scroll_block: match input.block % 4 {
            0 => ScrollBlock::Start,
            1 => ScrollBlock::Center,
            2 => ScrollBlock::End,
            _ => ScrollBlock::Nearest,
        },
        clamp_to_viewport: input.clamp,
        ..TourConfig::default()
    };
    let registry = StepRegistry::solar_proposal().expect("builtin registry");
    let len = registry.len();
    let mut tour =
        TourController::new(registry, config, solar_proposal_page()).expect("default config");

    for op in input.ops.iter().take(256) {
        match *op {
            Op::Open => {
                let _ = tour.open();
            }
            Op::Next => {
                let _ = tour.next();
            }
            Op::Previous => {
                let _ = tour.previous();
            }
            Op::Dismiss => {
                let _ = tour.dismiss();
            }
            Op::Finish => {
                let _ = tour.finish();
            }
            Op::Hide => {
                let _ = tour.set_open(false);
            }
            Op::Refresh => tour.refresh(),
            Op::FinishScroll => {
                tour.host_mut().finish_animations();
                tour.poll();
            }
            Op::Tick(ms) => {
                let _ = tour.tick(std::time::Duration::from_millis(u64::from(ms)));
            }
            Op::Resize(w, h) => {
                let size = Size::new(f64::from(w.max(1)), f64::from(h.max(1)));
                tour.host_mut().set_viewport(size);
            }
        }

        if let Some(cursor) = tour.cursor() {
            assert!(cursor < len, "cursor {cursor} out of range");
        }
        let (scroll, max) = (tour.host().scroll_offset(), tour.host().max_scroll());
        assert!(
            (0.0..=max.x).contains(&scroll.x) && (0.0..=max.y).contains(&scroll.y),
            "scroll {scroll:?} outside 0..={max:?}"
        );
        let viewport = tour.host().viewport();
        if let Some(overlay) = tour.overlay(viewport)
            && let Some(tooltip) = overlay.tooltip_box(Size::new(320.0, 160.0))
        {
            assert!(tooltip.width.is_finite() && tooltip.height.is_finite());
        }
    }
});
