#![forbid(unsafe_code)]

//! Guided tour engine for the solar proposal editor.
//!
//! # Role in the workspace
//! `ptour` owns the onboarding walkthrough: an ordered registry of steps, a
//! cursor state machine, and the geometry that places a highlight outline
//! and a tooltip next to each step's on-screen target.
//!
//! # Primary responsibilities
//! - **StepRegistry**: immutable, validated catalog of [`TourStep`]s.
//! - **TourController**: open / next / previous / dismiss / finish lifecycle.
//! - **TargetLocator**: injected lookup from selector to element geometry.
//! - **VisibilitySync**: scroll-into-view with a completion ticket, so
//!   placement is measured after the scroll settles.
//! - **Placement**: highlight box and tooltip anchor per preferred side.
//!
//! # How it fits in the system
//! The engine has no rendering dependency. A host (a browser shell, a test
//! page, `ptour-harness`) implements [`TargetLocator`] and
//! [`ViewportScroller`], feeds user actions to the controller, and draws the
//! [`TourOverlay`] it gets back.

pub mod config;
pub mod controller;
pub mod error;
pub mod locator;
pub mod overlay;
pub mod placement;
pub mod registry;
pub mod selector;
pub mod session;
pub mod visibility;

pub use config::TourConfig;
pub use controller::{CloseReason, TourController, TourEvent, TourHost};
pub use error::{Result, TourError};
pub use locator::{ElementSnapshot, FnLocator, TargetLocator};
pub use overlay::{PrimaryAction, TourOverlay};
pub use placement::{Placement, PlacementParams, Side, TooltipAnchor};
pub use registry::{StepDef, StepRegistry, TourStep};
pub use selector::{Selector, SelectorError, SelectorSubject};
pub use session::{AdvanceReason, PlacementPhase, StepCursor, TourState};
pub use visibility::{
    ScrollBehavior, ScrollBlock, ScrollCompletion, ScrollRequest, ScrollTicket, ViewportScroller,
    VisibilitySync, scroll_signal,
};
