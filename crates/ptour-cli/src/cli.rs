use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use ptour::{StepRegistry, TourConfig};
use ptour_core::logging::{self, InitOutcome, LogFormat};
use ptour_harness::{PageLayout, solar_proposal_page};

use crate::error::Result;
use crate::run::{RunArgs, run_tour};

#[derive(Debug, Parser)]
#[command(
    name = "ptour",
    about = "Guided tour driver for the solar proposal editor",
    version
)]
pub struct Cli {
    /// Log output on stderr. Filter with PTOUR_LOG.
    #[arg(long = "log-format", global = true, value_enum, default_value_t = LogFormatArg::Text)]
    pub log_format: LogFormatArg,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List the built-in tour steps.
    Steps(StepsArgs),

    /// Replay button presses over a page and print each frame.
    Run(RunArgs),

    /// Load and validate a config file (TOML, or JSON by extension).
    #[command(name = "check-config")]
    CheckConfig(CheckConfigArgs),

    /// Print the reference page as a JSON layout.
    Page,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogFormatArg {
    /// Human-readable lines.
    #[default]
    #[value(alias = "pretty")]
    Text,
    /// One JSON object per line.
    #[value(alias = "jsonl")]
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(arg: LogFormatArg) -> Self {
        match arg {
            LogFormatArg::Text => Self::Text,
            LogFormatArg::Json => Self::Json,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Args)]
pub struct StepsArgs {
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Debug, Args)]
pub struct CheckConfigArgs {
    pub path: PathBuf,
}

pub fn run_from_env() -> Result<()> {
    let cli = Cli::parse();
    if logging::init(cli.log_format.into(), "warn") == InitOutcome::AlreadySet {
        tracing::debug!(target: "ptour.cli", "subscriber already installed");
    }
    run(cli)
}

pub fn run(cli: Cli) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_with_output(cli, &mut out)
}

/// Dispatch `cli`, writing command output to `out`.
pub fn run_with_output(cli: Cli, out: &mut dyn Write) -> Result<()> {
    match cli.command {
        Commands::Steps(args) => print_steps(args.format, out),
        Commands::Run(args) => run_tour(args, out),
        Commands::CheckConfig(args) => check_config(args, out),
        Commands::Page => {
            let layout = PageLayout::from_page(&solar_proposal_page());
            writeln!(out, "{}", layout.to_json_string()?)?;
            Ok(())
        }
    }
}

fn print_steps(format: OutputFormat, out: &mut dyn Write) -> Result<()> {
    let registry = StepRegistry::solar_proposal()?;
    match format {
        OutputFormat::Text => {
            for (index, step) in registry.iter().enumerate() {
                writeln!(
                    out,
                    "{:>2}. {:<6} {:<7} {}",
                    index + 1,
                    step.id,
                    step.preferred_side.as_str(),
                    step.target
                )?;
                writeln!(out, "    {}", step.title)?;
                writeln!(out, "    {}", step.description)?;
            }
        }
        OutputFormat::Json => {
            let steps: Vec<_> = registry
                .iter()
                .map(|step| {
                    serde_json::json!({
                        "id": step.id,
                        "title": step.title,
                        "description": step.description,
                        "target": step.target.as_str(),
                        "side": step.preferred_side.as_str(),
                    })
                })
                .collect();
            writeln!(out, "{}", serde_json::to_string_pretty(&steps)?)?;
        }
    }
    Ok(())
}

fn check_config(args: CheckConfigArgs, out: &mut dyn Write) -> Result<()> {
    let config = TourConfig::from_file(&args.path)?;
    tracing::info!(target: "ptour.cli", path = %args.path.display(), "config ok");
    writeln!(out, "config ok: {}", args.path.display())?;
    writeln!(out, "{}", serde_json::to_string_pretty(&config)?)?;
    Ok(())
}
