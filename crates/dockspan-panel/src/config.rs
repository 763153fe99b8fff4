#![forbid(unsafe_code)]

//! Dock-wide configuration.
//!
//! [`DockConfig`] gathers every tunable the panel controller and tab handles
//! read. The defaults reproduce the stock behaviour, so
//! `DockConfig::default()` is what most hosts want.
//!
//! # Loading
//!
//! With the `config` feature enabled the struct can be read from TOML or
//! JSON; missing keys fall back to their defaults.
//!
//! ```toml
//! # dockspan.toml
//! tab_drag_threshold = 12.0
//! display_maximize_button = false
//! ```
//!
//! ```rust,ignore
//! let config = DockConfig::from_toml_file("dockspan.toml")?;
//! ```

#[cfg(feature = "config")]
use std::path::Path;

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

use dockspan_core::gesture::{TAB_DRAG_THRESHOLD, UNDOCK_DRAG_THRESHOLD};

use crate::error::ConfigError;

/// Title shown when neither the caller nor the content supplies one.
pub const DEFAULT_PANEL_TITLE: &str = "Panel";

/// Suffix appended to the title of a maximize placeholder.
pub const SHADOW_TITLE_SUFFIX: &str = " (popped up)";

/// Tunables for panels and tab handles.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct DockConfig {
    /// Horizontal distance (px) before a tab press becomes a drag.
    pub tab_drag_threshold: f64,
    /// Vertical distance (px) before a title-bar or tab pull undocks.
    pub undock_threshold: f64,
    /// Height of a panel title bar; subtracted when sizing hosted content.
    pub title_bar_height: f64,
    /// Fallback panel title.
    pub default_title: String,
    /// Suffix for placeholder titles.
    pub shadow_title_suffix: String,
    /// First z-index handed out to tab handles.
    pub tab_handle_z_index: i32,
    /// Whether tab strips attach a close button to each tab.
    pub display_close_button: bool,
    /// Whether tab strips attach a maximize button to each tab.
    pub display_maximize_button: bool,
    /// Whether new panels may be undocked.
    pub undock_enabled: bool,
}

impl Default for DockConfig {
    fn default() -> Self {
        Self {
            tab_drag_threshold: TAB_DRAG_THRESHOLD,
            undock_threshold: UNDOCK_DRAG_THRESHOLD,
            title_bar_height: 25.0,
            default_title: DEFAULT_PANEL_TITLE.to_owned(),
            shadow_title_suffix: SHADOW_TITLE_SUFFIX.to_owned(),
            tab_handle_z_index: 1000,
            display_close_button: true,
            display_maximize_button: true,
            undock_enabled: true,
        }
    }
}

impl DockConfig {
    /// Load from a TOML string.
    #[cfg(feature = "config")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s).map_err(ConfigError::Toml)?;
        config.validated()
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "config")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s).map_err(ConfigError::Json)?;
        config.validated()
    }

    /// Validate all parameters are within acceptable ranges.
    ///
    /// Returns a list of problems. An empty list means the config is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if !(self.tab_drag_threshold.is_finite() && self.tab_drag_threshold > 0.0) {
            errors.push(format!(
                "tab_drag_threshold must be > 0, got {}",
                self.tab_drag_threshold
            ));
        }
        if !(self.undock_threshold.is_finite() && self.undock_threshold > 0.0) {
            errors.push(format!(
                "undock_threshold must be > 0, got {}",
                self.undock_threshold
            ));
        }
        if !(self.title_bar_height.is_finite() && self.title_bar_height >= 0.0) {
            errors.push(format!(
                "title_bar_height must be >= 0, got {}",
                self.title_bar_height
            ));
        }
        if self.default_title.is_empty() {
            errors.push("default_title must not be empty".into());
        }

        errors
    }

    /// Return `self` if [`validate`](Self::validate) finds nothing.
    pub fn validated(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}
