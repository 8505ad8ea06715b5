#![forbid(unsafe_code)]

//! Test host for the proposal tour.
//!
//! [`StaticPage`] is a small in-memory document: a viewport, a scroll offset
//! and an ordered list of elements with document-space bounds. It implements
//! both host capabilities the tour controller needs, so the whole
//! open/next/scroll/measure pipeline can run without a browser.
//!
//! Pages are built in code, loaded from a JSON [`PageLayout`], or taken from
//! [`solar_proposal_page`], which carries every target of the built-in tour.

pub mod fixture;
pub mod layout;
pub mod page;

pub use fixture::{SOLAR_DOCUMENT, SOLAR_VIEWPORT, solar_proposal_page};
pub use layout::{ElementLayout, PageError, PageLayout};
pub use page::{PageElement, StaticPage};
