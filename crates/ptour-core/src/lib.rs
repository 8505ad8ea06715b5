#![forbid(unsafe_code)]

//! Core: geometry and logging setup shared by the proposal tour crates.
//!
//! # Role in the workspace
//! `ptour-core` is the leaf crate. It owns the floating-point geometry the
//! placement math runs on (CSS pixel rectangles, points, sizes, margins) and
//! the tracing subscriber bootstrap used by binaries.
//!
//! # How it fits in the system
//! `ptour` (the tour engine) computes highlight boxes and tooltip anchors in
//! terms of [`geometry::Rect`] and [`geometry::Point`]. Hosts such as
//! `ptour-harness` report element bounds in the same types, so no unit
//! conversion happens at the seam.

pub mod geometry;
pub mod logging;
