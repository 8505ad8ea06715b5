//! Visibility Synchronizer: scroll the target into view, then measure.
//!
//! A scroll request hands the host a [`ScrollCompletion`] and keeps the paired
//! [`ScrollTicket`]. The host fires the completion when its scroll animation
//! ends (immediately for instant scrolls). Placement geometry is measured
//! only after that, so the highlight never lands on pre-scroll coordinates.
//!
//! Nothing blocks: the controller polls the ticket from its event loop and a
//! settle timeout covers hosts that never signal. Requests superseded by a
//! cursor move or a close are dropped, not cancelled; the host's animation
//! finishes on its own and its completion reaches nobody.
//!
//! # Example
//!
//! ```
//! use ptour::visibility::scroll_signal;
//!
//! let (completion, ticket) = scroll_signal();
//! assert!(!ticket.is_settled());
//!
//! // Host side, when the smooth scroll ends:
//! completion.complete();
//! assert!(ticket.is_settled());
//! ```

#![forbid(unsafe_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Condvar, Mutex};
use std::time::Duration;

use crate::selector::Selector;

/// How the host should animate the scroll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "config",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum ScrollBehavior {
    #[default]
    Smooth,
    Instant,
}

/// Where in the viewport the target should end up (vertical alignment).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "config",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum ScrollBlock {
    Start,
    #[default]
    Center,
    End,
    Nearest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollRequest {
    pub behavior: ScrollBehavior,
    pub block: ScrollBlock,
}

/// Host capability: bring an element into the viewport.
pub trait ViewportScroller {
    /// Start scrolling the element matching `selector` into view and return
    /// a ticket that settles when the scroll is done. Must not block.
    fn scroll_into_view(&mut self, selector: &Selector, request: ScrollRequest) -> ScrollTicket;
}

impl<T: ViewportScroller + ?Sized> ViewportScroller for &mut T {
    fn scroll_into_view(&mut self, selector: &Selector, request: ScrollRequest) -> ScrollTicket {
        (**self).scroll_into_view(selector, request)
    }
}

impl<T: ViewportScroller + ?Sized> ViewportScroller for Box<T> {
    fn scroll_into_view(&mut self, selector: &Selector, request: ScrollRequest) -> ScrollTicket {
        (**self).scroll_into_view(selector, request)
    }
}

struct SignalInner {
    settled: AtomicBool,
    notify: (Mutex<()>, Condvar),
}

impl SignalInner {
    fn new(settled: bool) -> Arc<Self> {
        Arc::new(Self {
            settled: AtomicBool::new(settled),
            notify: (Mutex::new(()), Condvar::new()),
        })
    }
}

/// Create a pending completion/ticket pair.
pub fn scroll_signal() -> (ScrollCompletion, ScrollTicket) {
    let inner = SignalInner::new(false);
    (
        ScrollCompletion {
            inner: Arc::clone(&inner),
        },
        ScrollTicket { inner },
    )
}

/// Host-side handle. Dropping it without calling [`complete`](Self::complete)
/// also settles the ticket: a host that loses track of its animation should
/// not stall the tour until the timeout.
pub struct ScrollCompletion {
    inner: Arc<SignalInner>,
}

impl ScrollCompletion {
    pub fn complete(&self) {
        self.inner.settled.store(true, Ordering::Release);
        let (lock, cvar) = &self.inner.notify;
        let _guard = lock.lock().unwrap_or_else(|e| e.into_inner());
        cvar.notify_all();
    }

    pub fn is_completed(&self) -> bool {
        self.inner.settled.load(Ordering::Acquire)
    }
}

impl Drop for ScrollCompletion {
    fn drop(&mut self) {
        if !self.is_completed() {
            self.complete();
        }
    }
}

impl std::fmt::Debug for ScrollCompletion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScrollCompletion")
            .field("completed", &self.is_completed())
            .finish()
    }
}

/// Engine-side view of a scroll request.
#[derive(Clone)]
pub struct ScrollTicket {
    inner: Arc<SignalInner>,
}

impl ScrollTicket {
    /// A ticket that is already settled (instant scrolls, no-op hosts).
    pub fn settled() -> Self {
        Self {
            inner: SignalInner::new(true),
        }
    }

    #[inline]
    pub fn is_settled(&self) -> bool {
        self.inner.settled.load(Ordering::Acquire)
    }

    /// Block until settled or the timeout elapses. Returns `true` if settled.
    ///
    /// For hosts driving the engine from a worker thread; the controller
    /// itself only polls.
    pub fn wait_timeout(&self, duration: Duration) -> bool {
        if self.is_settled() {
            return true;
        }
        let (lock, cvar) = &self.inner.notify;
        let mut guard = lock.lock().unwrap_or_else(|e| e.into_inner());
        let start = web_time::Instant::now();
        let mut remaining = duration;
        loop {
            if self.is_settled() {
                return true;
            }
            let (new_guard, result) = cvar
                .wait_timeout(guard, remaining)
                .unwrap_or_else(|e| e.into_inner());
            guard = new_guard;
            if self.is_settled() {
                return true;
            }
            if result.timed_out() {
                return false;
            }
            let elapsed = start.elapsed();
            if elapsed >= duration {
                return false;
            }
            remaining = duration - elapsed;
        }
    }
}

impl std::fmt::Debug for ScrollTicket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScrollTicket")
            .field("settled", &self.is_settled())
            .finish()
    }
}

/// Result of driving the synchronizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStatus {
    /// Nothing in flight.
    Idle,
    /// Waiting for the host to finish scrolling.
    Settling,
    /// The scroll finished; measure now.
    Ready,
    /// The host never signalled; measure anyway.
    TimedOut,
}

impl SyncStatus {
    /// Whether placement should be computed now.
    pub fn should_measure(self) -> bool {
        matches!(self, Self::Ready | Self::TimedOut)
    }
}

#[derive(Debug)]
struct PendingScroll {
    ticket: ScrollTicket,
    waited: Duration,
}

/// Tracks at most one outstanding scroll request.
#[derive(Debug)]
pub struct VisibilitySync {
    request: ScrollRequest,
    settle_timeout: Duration,
    pending: Option<PendingScroll>,
}

impl VisibilitySync {
    pub fn new(request: ScrollRequest, settle_timeout: Duration) -> Self {
        Self {
            request,
            settle_timeout,
            pending: None,
        }
    }

    pub fn request(&self) -> ScrollRequest {
        self.request
    }

    pub fn is_settling(&self) -> bool {
        self.pending.is_some()
    }

    /// Ask `scroller` to reveal `selector`. Replaces any previous request.
    pub fn begin<S: ViewportScroller + ?Sized>(
        &mut self,
        scroller: &mut S,
        selector: &Selector,
    ) -> SyncStatus {
        self.abandon();
        let ticket = scroller.scroll_into_view(selector, self.request);
        tracing::debug!(
            target: "ptour.visibility",
            selector = %selector,
            behavior = ?self.request.behavior,
            settled = ticket.is_settled(),
            "scroll requested"
        );
        if ticket.is_settled() {
            return SyncStatus::Ready;
        }
        self.pending = Some(PendingScroll {
            ticket,
            waited: Duration::ZERO,
        });
        SyncStatus::Settling
    }

    /// Check the outstanding ticket without advancing time.
    pub fn poll(&mut self) -> SyncStatus {
        match &self.pending {
            None => SyncStatus::Idle,
            Some(pending) if pending.ticket.is_settled() => {
                self.pending = None;
                SyncStatus::Ready
            }
            Some(_) => SyncStatus::Settling,
        }
    }

    /// Advance the settle clock by `delta` and check the ticket.
    pub fn tick(&mut self, delta: Duration) -> SyncStatus {
        let Some(pending) = self.pending.as_mut() else {
            return SyncStatus::Idle;
        };
        if pending.ticket.is_settled() {
            self.pending = None;
            return SyncStatus::Ready;
        }
        pending.waited = pending.waited.saturating_add(delta);
        if pending.waited >= self.settle_timeout {
            tracing::warn!(
                target: "ptour.visibility",
                waited_ms = pending.waited.as_millis() as u64,
                timeout_ms = self.settle_timeout.as_millis() as u64,
                "scroll did not settle in time; measuring anyway"
            );
            self.pending = None;
            return SyncStatus::TimedOut;
        }
        SyncStatus::Settling
    }

    /// Forget the outstanding request. The host's scroll is left to finish.
    pub fn abandon(&mut self) {
        if self.pending.take().is_some() {
            tracing::debug!(target: "ptour.visibility", "pending scroll abandoned");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    struct Recorder {
        calls: Vec<(String, ScrollRequest)>,
        instant: bool,
        handles: Vec<ScrollCompletion>,
    }

    impl Recorder {
        fn new(instant: bool) -> Self {
            Self {
                calls: Vec::new(),
                instant,
                handles: Vec::new(),
            }
        }
    }

    impl ViewportScroller for Recorder {
        fn scroll_into_view(&mut self, selector: &Selector, request: ScrollRequest) -> ScrollTicket {
            self.calls.push((selector.to_string(), request));
            if self.instant {
                return ScrollTicket::settled();
            }
            let (completion, ticket) = scroll_signal();
            self.handles.push(completion);
            ticket
        }
    }

    fn body() -> Selector {
        Selector::parse("body").unwrap()
    }

    #[test]
    fn signal_starts_pending_and_completes() {
        let (completion, ticket) = scroll_signal();
        assert!(!ticket.is_settled());
        assert!(!completion.is_completed());
        completion.complete();
        assert!(ticket.is_settled());
        assert!(ticket.clone().is_settled());
    }

    #[test]
    fn dropping_completion_settles_ticket() {
        let (completion, ticket) = scroll_signal();
        drop(completion);
        assert!(ticket.is_settled());
    }

    #[test]
    fn wait_timeout_returns_false_on_timeout() {
        let (_completion, ticket) = scroll_signal();
        assert!(!ticket.wait_timeout(Duration::from_millis(10)));
    }

    #[test]
    fn wait_timeout_wakes_on_complete_from_other_thread() {
        let (completion, ticket) = scroll_signal();
        let handle = thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            completion.complete();
        });
        assert!(ticket.wait_timeout(Duration::from_secs(10)));
        handle.join().unwrap();
    }

    #[test]
    fn instant_scroll_is_ready_immediately() {
        let mut host = Recorder::new(true);
        let mut sync = VisibilitySync::new(ScrollRequest::default(), Duration::from_millis(600));
        assert_eq!(sync.begin(&mut host, &body()), SyncStatus::Ready);
        assert!(!sync.is_settling());
        assert_eq!(host.calls.len(), 1);
        assert_eq!(host.calls[0].1.block, ScrollBlock::Center);
        assert_eq!(host.calls[0].1.behavior, ScrollBehavior::Smooth);
    }

    #[test]
    fn smooth_scroll_waits_for_completion() {
        let mut host = Recorder::new(false);
        let mut sync = VisibilitySync::new(ScrollRequest::default(), Duration::from_millis(600));
        assert_eq!(sync.begin(&mut host, &body()), SyncStatus::Settling);
        assert_eq!(sync.poll(), SyncStatus::Settling);
        assert_eq!(sync.tick(Duration::from_millis(100)), SyncStatus::Settling);
        host.handles[0].complete();
        assert_eq!(sync.poll(), SyncStatus::Ready);
        assert_eq!(sync.poll(), SyncStatus::Idle);
    }

    #[test]
    fn tick_times_out() {
        let mut host = Recorder::new(false);
        let mut sync = VisibilitySync::new(ScrollRequest::default(), Duration::from_millis(300));
        sync.begin(&mut host, &body());
        assert_eq!(sync.tick(Duration::from_millis(200)), SyncStatus::Settling);
        assert_eq!(sync.tick(Duration::from_millis(100)), SyncStatus::TimedOut);
        assert_eq!(sync.tick(Duration::from_millis(100)), SyncStatus::Idle);
    }

    #[test]
    fn superseded_request_is_ignored() {
        let mut host = Recorder::new(false);
        let mut sync = VisibilitySync::new(ScrollRequest::default(), Duration::from_millis(600));
        sync.begin(&mut host, &body());
        sync.begin(&mut host, &Selector::parse("#nav").unwrap());
        // First animation finishing does not release the second request.
        host.handles[0].complete();
        assert_eq!(sync.poll(), SyncStatus::Settling);
        host.handles[1].complete();
        assert_eq!(sync.poll(), SyncStatus::Ready);
    }

    #[test]
    fn abandon_clears_pending() {
        let mut host = Recorder::new(false);
        let mut sync = VisibilitySync::new(ScrollRequest::default(), Duration::from_millis(600));
        sync.begin(&mut host, &body());
        sync.abandon();
        assert!(!sync.is_settling());
        assert_eq!(sync.poll(), SyncStatus::Idle);
    }

    #[test]
    fn should_measure_only_when_done() {
        assert!(SyncStatus::Ready.should_measure());
        assert!(SyncStatus::TimedOut.should_measure());
        assert!(!SyncStatus::Settling.should_measure());
        assert!(!SyncStatus::Idle.should_measure());
    }
}
