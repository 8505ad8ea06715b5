#![forbid(unsafe_code)]

//! Step Cursor and the per-open tour session.
//!
//! ```text
//! Closed --open--> Active(0)
//! Active(i) --next-->     Active(i+1)   if i + 1 < len, else no-op
//! Active(i) --previous--> Active(i-1)   if i > 0, else no-op
//! Active(i) --close/finish--> Closed
//! ```
//!
//! The cursor never wraps and never skips. A session is created fresh on
//! every open, so there is no resume of a previous position.

use crate::locator::ElementSnapshot;
use crate::placement::Placement;

/// Why the cursor moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceReason {
    Next,
    Previous,
}

/// Externally visible lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TourState {
    Closed,
    Active { cursor: usize },
}

impl TourState {
    pub fn is_open(self) -> bool {
        matches!(self, Self::Active { .. })
    }

    pub fn cursor(self) -> Option<usize> {
        match self {
            Self::Closed => None,
            Self::Active { cursor } => Some(cursor),
        }
    }
}

/// Bounded position in a registry of `len` steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepCursor {
    index: usize,
    len: usize,
}

impl StepCursor {
    /// Cursor at the first of `len` steps. `len` must be non-zero.
    pub fn new(len: usize) -> Self {
        debug_assert!(len > 0, "cursor over an empty registry");
        Self { index: 0, len }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_first(&self) -> bool {
        self.index == 0
    }

    pub fn is_last(&self) -> bool {
        self.index + 1 >= self.len
    }

    /// Move forward. Returns `(from, to)` or `None` at the last step.
    pub fn next(&mut self) -> Option<(usize, usize)> {
        if self.is_last() {
            return None;
        }
        let from = self.index;
        self.index += 1;
        Some((from, self.index))
    }

    /// Move back. Returns `(from, to)` or `None` at the first step.
    pub fn previous(&mut self) -> Option<(usize, usize)> {
        if self.is_first() {
            return None;
        }
        let from = self.index;
        self.index -= 1;
        Some((from, self.index))
    }
}

/// Whether the placement for the current step is known yet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlacementPhase {
    /// A scroll is in flight; geometry will be measured when it settles.
    Settling,
    Placed(Placement),
}

impl PlacementPhase {
    pub fn placement(&self) -> Option<&Placement> {
        match self {
            Self::Settling => None,
            Self::Placed(placement) => Some(placement),
        }
    }
}

/// Mutable state that exists only while the tour is open.
#[derive(Debug, Clone)]
pub struct TourSession {
    pub cursor: StepCursor,
    /// Match for the current step, refreshed on every cursor change.
    pub resolved_target: Option<ElementSnapshot>,
    pub phase: PlacementPhase,
}

impl TourSession {
    pub fn new(step_count: usize) -> Self {
        Self {
            cursor: StepCursor::new(step_count),
            resolved_target: None,
            phase: PlacementPhase::Settling,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_walks_forward_and_stops() {
        let mut cursor = StepCursor::new(3);
        assert!(cursor.is_first());
        assert_eq!(cursor.next(), Some((0, 1)));
        assert_eq!(cursor.next(), Some((1, 2)));
        assert!(cursor.is_last());
        assert_eq!(cursor.next(), None);
        assert_eq!(cursor.index(), 2);
    }

    #[test]
    fn cursor_previous_stops_at_zero() {
        let mut cursor = StepCursor::new(3);
        assert_eq!(cursor.previous(), None);
        cursor.next();
        assert_eq!(cursor.previous(), Some((1, 0)));
        assert_eq!(cursor.previous(), None);
        assert_eq!(cursor.index(), 0);
    }

    #[test]
    fn single_step_is_first_and_last() {
        let mut cursor = StepCursor::new(1);
        assert!(cursor.is_first());
        assert!(cursor.is_last());
        assert_eq!(cursor.next(), None);
        assert_eq!(cursor.previous(), None);
    }

    #[test]
    fn tour_state_accessors() {
        assert!(!TourState::Closed.is_open());
        assert_eq!(TourState::Closed.cursor(), None);
        let active = TourState::Active { cursor: 4 };
        assert!(active.is_open());
        assert_eq!(active.cursor(), Some(4));
    }

    #[test]
    fn new_session_starts_settling_at_zero() {
        let session = TourSession::new(8);
        assert_eq!(session.cursor.index(), 0);
        assert_eq!(session.cursor.len(), 8);
        assert!(session.resolved_target.is_none());
        assert!(session.phase.placement().is_none());
    }
}
