#![forbid(unsafe_code)]

//! Logging bootstrap.
//!
//! Library crates only emit `tracing` events. Binaries call [`init`] once to
//! install a subscriber; the filter comes from `PTOUR_LOG` (same syntax as
//! `RUST_LOG`) and falls back to the supplied default directive.
//!
//! Without the `tracing-json` feature [`init`] is a no-op that reports
//! [`InitOutcome::Unavailable`], so callers never need their own `cfg`.

/// Environment variable holding the filter directives.
pub const LOG_ENV: &str = "PTOUR_LOG";

/// Output format for the installed subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines on stderr.
    #[default]
    Text,
    /// One JSON object per line on stderr.
    Json,
}

/// What [`init`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitOutcome {
    /// A subscriber was installed.
    Installed,
    /// Another global subscriber was already set; nothing changed.
    AlreadySet,
    /// Built without `tracing-json`.
    Unavailable,
}

/// Install the global subscriber.
#[cfg(feature = "tracing-json")]
pub fn init(format: LogFormat, default_directive: &str) -> InitOutcome {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_directive));
    let registry = tracing_subscriber::registry().with(filter);
    let result = match format {
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .try_init(),
        LogFormat::Text => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init(),
    };
    match result {
        Ok(()) => InitOutcome::Installed,
        Err(_) => InitOutcome::AlreadySet,
    }
}

/// Install the global subscriber.
#[cfg(not(feature = "tracing-json"))]
pub fn init(_format: LogFormat, _default_directive: &str) -> InitOutcome {
    InitOutcome::Unavailable
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(not(feature = "tracing-json"))]
    #[test]
    fn init_without_subscriber_feature_is_unavailable() {
        assert_eq!(init(LogFormat::Json, "debug"), InitOutcome::Unavailable);
    }

    #[cfg(feature = "tracing-json")]
    #[test]
    fn second_init_reports_already_set() {
        let first = init(LogFormat::Text, "warn");
        let second = init(LogFormat::Json, "warn");
        assert!(matches!(
            first,
            InitOutcome::Installed | InitOutcome::AlreadySet
        ));
        assert_eq!(second, InitOutcome::AlreadySet);
    }
}
