#![forbid(unsafe_code)]

//! `ptour`: drive the proposal tour from the command line.
//!
//! - `ptour steps` lists the built-in registry.
//! - `ptour run` replays a sequence of button presses over a page and prints
//!   the overlay after each one.
//! - `ptour check-config` loads and validates a config file.
//! - `ptour page` prints the reference page as a JSON layout, a starting
//!   point for `run --layout`.

pub mod cli;
pub mod error;
pub mod frame;
pub mod run;

pub use cli::{Cli, Commands, run, run_from_env};
pub use error::{CliError, Result};
