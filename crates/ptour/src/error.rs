use thiserror::Error;

use crate::selector::SelectorError;

pub type Result<T> = std::result::Result<T, TourError>;

/// Configuration errors reported when the tour is assembled.
///
/// Nothing on the navigation path returns these: an unresolvable target or an
/// out-of-range Next/Previous is absorbed by the controller.
#[derive(Debug, Error)]
pub enum TourError {
    #[error("step registry is empty")]
    EmptyRegistry,

    #[error("duplicate step id: {id}")]
    DuplicateStepId { id: String },

    #[error("step {step}: invalid target selector {selector:?}: {source}")]
    InvalidSelector {
        step: String,
        selector: String,
        #[source]
        source: SelectorError,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "config")]
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[cfg(feature = "config")]
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid configuration: {}", .0.join("; "))]
    Validation(Vec<String>),
}
