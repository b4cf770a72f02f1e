//! Timeline configuration.
//!
//! Every field carries `#[serde(default)]` so a partial JSON file is valid:
//! missing keys fall back to the built-in defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::{Rgba, DEFAULT_PALETTE};

/// Iteration cap for level assignment. Inputs needing more are unsupported.
pub const DEFAULT_MAX_ITERATIONS: usize = 5000;

const CONFIG_FILE: &str = "timeline.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineConfig {
    /// When false, hover and leave events are ignored.
    pub interactive: bool,
    pub popup_enabled: bool,
    /// Debounce delay before a hovered item's popup opens, in milliseconds.
    pub popup_delay_ms: u64,
    /// Popup body width in pixels.
    pub popup_width: f32,
    /// Vertical distance between rows in pixels.
    pub event_gap: f32,
    /// Minor segments per year on the axis.
    pub sub_segments: u32,
    pub line_thickness: f32,
    pub timeline_color: Rgba,
    pub popup_background: Rgba,
    /// Colours assigned by item index when an item has none.
    pub palette: Vec<Rgba>,
    pub max_iterations: usize,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            interactive: true,
            popup_enabled: true,
            popup_delay_ms: 100,
            popup_width: 400.0,
            event_gap: 15.0,
            sub_segments: 3,
            line_thickness: 6.0,
            timeline_color: Rgba::BLACK,
            popup_background: Rgba::rgba(22, 22, 22, 102),
            palette: DEFAULT_PALETTE.to_vec(),
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

/// The part of the configuration the layout engine reads.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    pub event_gap: f32,
    pub palette: Vec<Rgba>,
    pub max_iterations: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        TimelineConfig::default().layout()
    }
}

/// The part of the configuration the focus state machine reads.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FocusConfig {
    pub interactive: bool,
    pub popup_enabled: bool,
    pub popup_delay_ms: u64,
    pub popup_width: f32,
}

impl Default for FocusConfig {
    fn default() -> Self {
        TimelineConfig::default().focus()
    }
}

impl TimelineConfig {
    pub fn layout(&self) -> LayoutConfig {
        LayoutConfig {
            event_gap: self.event_gap,
            palette: self.palette.clone(),
            max_iterations: self.max_iterations,
        }
    }

    pub fn focus(&self) -> FocusConfig {
        FocusConfig {
            interactive: self.interactive,
            popup_enabled: self.popup_enabled,
            popup_delay_ms: self.popup_delay_ms,
            popup_width: self.popup_width,
        }
    }

    /// Location of the user config file, if the OS exposes a config dir.
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "StaticTimeline")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    /// Load the user config file, falling back to defaults.
    pub fn load() -> Self {
        Self::load_or(Self::default)
    }

    /// Load the user config file, falling back to `fallback()` when there is
    /// none or it cannot be read.
    pub fn load_or(fallback: impl FnOnce() -> Self) -> Self {
        let Some(path) = Self::default_path() else {
            return fallback();
        };
        if !path.exists() {
            return fallback();
        }
        match Self::load_from(&path) {
            Ok(config) => {
                tracing::info!(path = %path.display(), "loaded timeline config");
                config
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to read config, using fallback");
                fallback()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }
}
