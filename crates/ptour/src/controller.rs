#![forbid(unsafe_code)]

//! Tour Controller: owns the registry, the session, and the host handle.
//!
//! Every cursor change (and every open) runs the same pipeline:
//!
//! 1. resolve the current step's target through the host locator;
//! 2. if found, ask the host to scroll it into view and wait for the scroll
//!    ticket (polled via [`TourController::poll`] / [`TourController::tick`]);
//! 3. once settled, re-query the target and compute the placement.
//!
//! A missing target skips the scroll and places the tooltip in the viewport
//! center. A closed controller performs no queries and renders nothing.

use std::time::Duration;

use ptour_core::geometry::Size;

use crate::config::TourConfig;
use crate::error::Result;
use crate::locator::{ElementSnapshot, TargetLocator, resolve_target};
use crate::overlay::{PrimaryAction, TourOverlay};
use crate::placement::{self, Placement};
use crate::registry::{StepRegistry, TourStep};
use crate::session::{AdvanceReason, PlacementPhase, TourSession, TourState};
use crate::visibility::{SyncStatus, ViewportScroller, VisibilitySync};

/// Everything the controller needs from the page hosting the tour.
pub trait TourHost: TargetLocator + ViewportScroller {}

impl<T: TargetLocator + ViewportScroller + ?Sized> TourHost for T {}

/// Why the tour closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    /// The user pressed the close button.
    Dismissed,
    /// The user pressed Finish on the last step.
    Finished,
    /// The host lowered the open signal. The close callback is not invoked.
    Hidden,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TourEvent {
    Opened {
        step_count: usize,
    },
    StepChanged {
        from: usize,
        to: usize,
        reason: AdvanceReason,
    },
    Closed {
        reason: CloseReason,
        at_step: usize,
    },
}

type CloseCallback = Box<dyn FnMut(CloseReason)>;

pub struct TourController<H> {
    registry: StepRegistry,
    config: TourConfig,
    host: H,
    session: Option<TourSession>,
    sync: VisibilitySync,
    on_close: Option<CloseCallback>,
}

impl<H: TourHost> TourController<H> {
    /// Build a closed controller. Fails only on an invalid config.
    pub fn new(registry: StepRegistry, config: TourConfig, host: H) -> Result<Self> {
        config.validate()?;
        let sync = VisibilitySync::new(config.scroll_request(), config.settle_timeout());
        Ok(Self {
            registry,
            config,
            host,
            session: None,
            sync,
            on_close: None,
        })
    }

    /// The solar proposal tour with default settings.
    pub fn solar_proposal(host: H) -> Result<Self> {
        Self::new(StepRegistry::solar_proposal()?, TourConfig::default(), host)
    }

    /// Register the callback invoked on dismiss and finish.
    #[must_use]
    pub fn with_on_close(mut self, callback: impl FnMut(CloseReason) + 'static) -> Self {
        self.set_on_close(callback);
        self
    }

    pub fn set_on_close(&mut self, callback: impl FnMut(CloseReason) + 'static) {
        self.on_close = Some(Box::new(callback));
    }

    pub fn registry(&self) -> &StepRegistry {
        &self.registry
    }

    pub fn config(&self) -> &TourConfig {
        &self.config
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn state(&self) -> TourState {
        match &self.session {
            None => TourState::Closed,
            Some(session) => TourState::Active {
                cursor: session.cursor.index(),
            },
        }
    }

    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    pub fn cursor(&self) -> Option<usize> {
        self.session.as_ref().map(|session| session.cursor.index())
    }

    pub fn current_step(&self) -> Option<&TourStep> {
        self.registry.get(self.cursor()?)
    }

    pub fn resolved_target(&self) -> Option<ElementSnapshot> {
        self.session.as_ref()?.resolved_target
    }

    pub fn phase(&self) -> Option<PlacementPhase> {
        self.session.as_ref().map(|session| session.phase)
    }

    /// Placement for the current step, once known.
    pub fn placement(&self) -> Option<Placement> {
        self.phase()?.placement().copied()
    }

    pub fn primary_action(&self) -> Option<PrimaryAction> {
        let session = self.session.as_ref()?;
        Some(if session.cursor.is_last() {
            PrimaryAction::Finish
        } else {
            PrimaryAction::Next
        })
    }

    /// `Closed -> Active(0)`. No-op while already open.
    pub fn open(&mut self) -> Option<TourEvent> {
        if self.session.is_some() {
            return None;
        }
        let step_count = self.registry.len();
        self.session = Some(TourSession::new(step_count));
        tracing::info!(target: "ptour.controller", step_count, "tour opened");
        self.sync_target();
        Some(TourEvent::Opened { step_count })
    }

    /// Follow the host's open signal. Lowering it closes without the callback.
    pub fn set_open(&mut self, open: bool) -> Option<TourEvent> {
        if open {
            self.open()
        } else {
            self.close(CloseReason::Hidden)
        }
    }

    /// `Active(i) -> Active(i+1)`; no-op on the last step or when closed.
    pub fn next(&mut self) -> Option<TourEvent> {
        let (from, to) = self.session.as_mut()?.cursor.next()?;
        self.step_changed(from, to, AdvanceReason::Next)
    }

    /// `Active(i) -> Active(i-1)`; no-op on the first step or when closed.
    pub fn previous(&mut self) -> Option<TourEvent> {
        let (from, to) = self.session.as_mut()?.cursor.previous()?;
        self.step_changed(from, to, AdvanceReason::Previous)
    }

    /// Close button: always closes an open tour.
    pub fn dismiss(&mut self) -> Option<TourEvent> {
        self.close(CloseReason::Dismissed)
    }

    /// Finish button: closes only from the last step.
    pub fn finish(&mut self) -> Option<TourEvent> {
        if !self.session.as_ref()?.cursor.is_last() {
            return None;
        }
        self.close(CloseReason::Finished)
    }

    /// Press whatever the forward button currently shows.
    pub fn activate_primary(&mut self) -> Option<TourEvent> {
        match self.primary_action()? {
            PrimaryAction::Next => self.next(),
            PrimaryAction::Finish => self.finish(),
        }
    }

    /// Check for scroll completion. Returns `true` if a placement was computed.
    pub fn poll(&mut self) -> bool {
        if self.session.is_none() {
            return false;
        }
        let status = self.sync.poll();
        self.apply(status)
    }

    /// Like [`poll`](Self::poll), also advancing the settle timeout clock.
    pub fn tick(&mut self, delta: Duration) -> bool {
        if self.session.is_none() {
            return false;
        }
        let status = self.sync.tick(delta);
        self.apply(status)
    }

    /// Re-resolve and re-place the current step (e.g. after a resize).
    pub fn refresh(&mut self) {
        if self.session.is_some() {
            self.sync_target();
        }
    }

    /// View model for rendering; `None` while closed.
    pub fn overlay(&self, viewport: Size) -> Option<TourOverlay<'_>> {
        let session = self.session.as_ref()?;
        let step_index = session.cursor.index();
        let step = self.registry.get(step_index)?;
        Some(TourOverlay {
            step,
            step_index,
            step_count: self.registry.len(),
            can_go_back: !session.cursor.is_first(),
            primary: if session.cursor.is_last() {
                PrimaryAction::Finish
            } else {
                PrimaryAction::Next
            },
            phase: session.phase,
            viewport,
            clamp_to_viewport: self.config.clamp_to_viewport,
        })
    }

    fn step_changed(&mut self, from: usize, to: usize, reason: AdvanceReason) -> Option<TourEvent> {
        tracing::debug!(
            target: "ptour.controller",
            from,
            to,
            reason = ?reason,
            "step changed"
        );
        self.sync_target();
        Some(TourEvent::StepChanged { from, to, reason })
    }

    fn close(&mut self, reason: CloseReason) -> Option<TourEvent> {
        let session = self.session.take()?;
        self.sync.abandon();
        let at_step = session.cursor.index();
        tracing::info!(
            target: "ptour.controller",
            reason = ?reason,
            at_step,
            "tour closed"
        );
        if reason != CloseReason::Hidden
            && let Some(callback) = self.on_close.as_mut()
        {
            callback(reason);
        }
        Some(TourEvent::Closed { reason, at_step })
    }

    fn apply(&mut self, status: SyncStatus) -> bool {
        if status.should_measure() {
            self.measure();
            true
        } else {
            false
        }
    }

    fn sync_target(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let cursor = session.cursor.index();
        let Some(step) = self.registry.get(cursor) else {
            return;
        };
        let _span = tracing::debug_span!(
            "tour.step",
            step_id = %step.id,
            cursor,
            selector = %step.target,
        )
        .entered();

        let resolved = resolve_target(&self.host, step);
        session.resolved_target = resolved;
        if resolved.is_none() {
            self.sync.abandon();
            session.phase = PlacementPhase::Placed(Placement::centered(step.preferred_side));
            return;
        }

        session.phase = PlacementPhase::Settling;
        let status = self.sync.begin(&mut self.host, &step.target);
        if status.should_measure() {
            self.measure();
        }
    }

    fn measure(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let Some(step) = self.registry.get(session.cursor.index()) else {
            return;
        };
        let snapshot = resolve_target(&self.host, step);
        session.resolved_target = snapshot;
        let placement = placement::compute(
            snapshot.map(|snapshot| snapshot.rect),
            step.preferred_side,
            self.config.placement_params(),
        );
        session.phase = PlacementPhase::Placed(placement);
        tracing::debug!(
            target: "ptour.controller",
            step_id = %step.id,
            resolved = snapshot.is_some(),
            "placement ready"
        );
    }
}
