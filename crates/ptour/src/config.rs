#![forbid(unsafe_code)]

//! Tour configuration as data.
//!
//! Every tunable of the engine lives in [`TourConfig`], loadable from TOML or
//! JSON at startup. Defaults equal the built-in constants, so
//! `TourConfig::default()` behaves exactly like an unconfigured tour.
//!
//! ```toml
//! # ptour.toml
//! highlight_margin = 4.0
//! tooltip_offset = 10.0
//! scroll_behavior = "smooth"
//! scroll_block = "center"
//! settle_timeout_ms = 600
//! clamp_to_viewport = false
//! ```

#[cfg(feature = "config")]
use std::path::Path;
use std::time::Duration;

use crate::error::{Result, TourError};
use crate::placement::{HIGHLIGHT_MARGIN, PlacementParams, TOOLTIP_OFFSET};
use crate::visibility::{ScrollBehavior, ScrollBlock, ScrollRequest};

/// Default wait for a host scroll to report completion.
pub const DEFAULT_SETTLE_TIMEOUT_MS: u64 = 600;

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "config", serde(default, deny_unknown_fields))]
pub struct TourConfig {
    /// Outline margin around the target. Default: 4.
    pub highlight_margin: f64,
    /// Gap between target edge and tooltip anchor. Default: 10.
    pub tooltip_offset: f64,
    /// Default: smooth.
    pub scroll_behavior: ScrollBehavior,
    /// Default: center.
    pub scroll_block: ScrollBlock,
    /// Measure anyway after this long without a scroll completion. Default: 600.
    pub settle_timeout_ms: u64,
    /// Keep the tooltip box inside the viewport. Default: false.
    pub clamp_to_viewport: bool,
}

impl Default for TourConfig {
    fn default() -> Self {
        Self {
            highlight_margin: HIGHLIGHT_MARGIN,
            tooltip_offset: TOOLTIP_OFFSET,
            scroll_behavior: ScrollBehavior::Smooth,
            scroll_block: ScrollBlock::Center,
            settle_timeout_ms: DEFAULT_SETTLE_TIMEOUT_MS,
            clamp_to_viewport: false,
        }
    }
}

impl TourConfig {
    /// Load from a TOML string.
    #[cfg(feature = "config")]
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "config")]
    pub fn from_json_str(s: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a file, picking the format from the extension
    /// (`.json` is JSON, anything else TOML).
    #[cfg(feature = "config")]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_toml_str(&content)
        }
    }

    /// Serialize to TOML.
    #[cfg(feature = "config")]
    pub fn to_toml_string(&self) -> std::result::Result<String, toml::ser::Error> {
        toml::to_string(self)
    }

    /// Collect every problem at once.
    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();
        if !self.highlight_margin.is_finite() || self.highlight_margin < 0.0 {
            errors.push(format!(
                "highlight_margin must be a finite, non-negative number (got {})",
                self.highlight_margin
            ));
        }
        if !self.tooltip_offset.is_finite() || self.tooltip_offset < 0.0 {
            errors.push(format!(
                "tooltip_offset must be a finite, non-negative number (got {})",
                self.tooltip_offset
            ));
        }
        if self.settle_timeout_ms == 0 {
            errors.push("settle_timeout_ms must be greater than zero".to_string());
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(TourError::Validation(errors))
        }
    }

    pub fn placement_params(&self) -> PlacementParams {
        PlacementParams {
            highlight_margin: self.highlight_margin,
            tooltip_offset: self.tooltip_offset,
        }
    }

    pub fn scroll_request(&self) -> ScrollRequest {
        ScrollRequest {
            behavior: self.scroll_behavior,
            block: self.scroll_block,
        }
    }

    pub fn settle_timeout(&self) -> Duration {
        Duration::from_millis(self.settle_timeout_ms)
    }
}
