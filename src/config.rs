//! Application configuration.
//!
//! Handles loading configuration from environment variables and .env files.

use dotenv::dotenv;
use std::env;
use std::path::PathBuf;

use crate::constants::timeline::{
    DEFAULT_FRAME_HEIGHT, DEFAULT_FRAME_WIDTH, DEFAULT_HOLD_EPSILON, DEFAULT_LINE_HEIGHT,
};
use crate::error::{Error, Result};
use crate::timeline::{FrameSize, TimelineConfig};

/// Configuration for the application.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Vertical distance between lyric lines, in pixels
    pub line_height: f64,
    /// Gap between the pre-yank hold and the yank, in seconds
    pub hold_epsilon: f64,
    /// Host frame size the text block is centered in
    pub frame: FrameSize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            line_height: DEFAULT_LINE_HEIGHT,
            hold_epsilon: DEFAULT_HOLD_EPSILON,
            frame: FrameSize {
                width: DEFAULT_FRAME_WIDTH,
                height: DEFAULT_FRAME_HEIGHT,
            },
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn load() -> Result<Self> {
        // Try to load .env file if present
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from any key lookup, falling back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(v) = read_number(&lookup, "LYRICYANK_LINE_HEIGHT", "Line height is a number of pixels, e.g. 100")? {
            config.line_height = v;
        }
        if let Some(v) = read_number(&lookup, "LYRICYANK_HOLD_EPSILON", "Hold epsilon is a number of seconds, e.g. 0.1")? {
            config.hold_epsilon = v;
        }
        if let Some(v) = read_number(&lookup, "LYRICYANK_FRAME_WIDTH", "Frame width is a number of pixels, e.g. 1920")? {
            config.frame.width = v;
        }
        if let Some(v) = read_number(&lookup, "LYRICYANK_FRAME_HEIGHT", "Frame height is a number of pixels, e.g. 1080")? {
            config.frame.height = v;
        }

        Ok(config)
    }

    /// Timeline config that centers `line_count` lines in the frame.
    #[allow(clippy::cast_precision_loss)] // line counts stay far below 2^52
    pub fn timeline_for(&self, line_count: usize) -> TimelineConfig {
        let block_height = line_count.max(1) as f64 * self.line_height;
        TimelineConfig::centered(self.frame, block_height, self.line_height)
            .with_hold_epsilon(self.hold_epsilon)
    }
}

fn read_number(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    hint: &'static str,
) -> Result<Option<f64>> {
    let Some(raw) = lookup(key) else {
        return Ok(None);
    };
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(Some(v)),
        _ => Err(Error::config(format!("{key} is not a number: {raw:?}"), hint)),
    }
}

/// Expand `~` in a user-supplied path.
pub fn expand_path(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).to_string())
}
