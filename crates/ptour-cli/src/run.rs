//! `ptour run`: open the tour over a page and replay button presses.
//!
//! Scroll animations are completed after every press, so each frame shows
//! the settled placement.

use std::io::Write;
use std::path::PathBuf;

use clap::{Args, ValueEnum};
use ptour::{StepRegistry, TourConfig, TourController, TourEvent};
use ptour_core::geometry::Size;
use ptour_harness::{PageLayout, StaticPage, solar_proposal_page};

use crate::cli::OutputFormat;
use crate::error::Result;
use crate::frame::Frame;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Action {
    Next,
    #[value(alias = "previous")]
    Prev,
    Finish,
    Dismiss,
    Refresh,
    Open,
}

impl Action {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Next => "next",
            Self::Prev => "prev",
            Self::Finish => "finish",
            Self::Dismiss => "dismiss",
            Self::Refresh => "refresh",
            Self::Open => "open",
        }
    }
}

#[derive(Debug, Args)]
pub struct RunArgs {
    /// JSON page layout. Defaults to the built-in proposal page.
    #[arg(long)]
    pub layout: Option<PathBuf>,

    /// Comma-separated presses applied after the tour opens.
    #[arg(long, value_enum, value_delimiter = ',')]
    pub actions: Vec<Action>,

    /// Tour config (TOML, or JSON by extension).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Viewport override, `WIDTHxHEIGHT`.
    #[arg(long, value_parser = parse_size)]
    pub viewport: Option<Size>,

    /// Tooltip size used for the reported tooltip box, `WIDTHxHEIGHT`.
    #[arg(long, value_parser = parse_size, default_value = "320x160")]
    pub tooltip: Size,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Parse `1440x900`.
pub fn parse_size(value: &str) -> std::result::Result<Size, String> {
    let (w, h) = value
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got `{value}`"))?;
    let parse = |part: &str| {
        part.trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && *v > 0.0)
            .ok_or_else(|| format!("invalid dimension `{part}` in `{value}`"))
    };
    Ok(Size::new(parse(w)?, parse(h)?))
}

pub fn run_tour(args: RunArgs, out: &mut dyn Write) -> Result<()> {
    let frames = replay(&args)?;
    match args.format {
        OutputFormat::Text => {
            for frame in &frames {
                writeln!(out, "{frame}")?;
            }
        }
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(&frames)?)?,
    }
    Ok(())
}

/// Build the tour described by `args` and capture one frame per press,
/// starting with the initial open.
pub fn replay(args: &RunArgs) -> Result<Vec<Frame>> {
    let config = match &args.config {
        Some(path) => TourConfig::from_file(path)?,
        None => TourConfig::default(),
    };
    let mut page = match &args.layout {
        Some(path) => PageLayout::from_file(path)?.into_page()?,
        None => solar_proposal_page(),
    };
    if let Some(viewport) = args.viewport {
        page.set_viewport(viewport);
    }

    let mut tour = TourController::new(StepRegistry::solar_proposal()?, config, page)?;
    let mut frames = Vec::with_capacity(args.actions.len() + 1);

    let event = tour.open();
    settle(&mut tour);
    frames.push(Frame::capture("open", event, &tour, args.tooltip));

    for &action in &args.actions {
        let event = apply(&mut tour, action);
        settle(&mut tour);
        tracing::debug!(
            target: "ptour.cli",
            action = action.as_str(),
            cursor = ?tour.cursor(),
            "action applied"
        );
        frames.push(Frame::capture(action.as_str(), event, &tour, args.tooltip));
    }
    Ok(frames)
}

fn apply(tour: &mut TourController<StaticPage>, action: Action) -> Option<TourEvent> {
    match action {
        Action::Next => tour.next(),
        Action::Prev => tour.previous(),
        Action::Finish => tour.finish(),
        Action::Dismiss => tour.dismiss(),
        Action::Open => tour.open(),
        Action::Refresh => {
            tour.refresh();
            None
        }
    }
}

fn settle(tour: &mut TourController<StaticPage>) {
    if tour.host_mut().finish_animations() {
        tour.poll();
    }
}
