//! Keyframe timeline builder.
//!
//! Turns an ordered list of lyric start times into position samples for a
//! host animation property. The host interpolates linearly between any two
//! stored samples, so every transition is pinned by three samples: the old
//! value `hold_epsilon` before the next line, the old value at the next
//! line's start, and the new value at that same instant. The result reads as
//! a hard "yank" upward instead of a slow drift across the whole line.
//!
//! Building is pure. Applying the result to a host goes through
//! [`sink::KeyframeSink`].

pub mod sink;

use serde::{Deserialize, Serialize};

use crate::constants::timeline::{
    DEFAULT_FRAME_HEIGHT, DEFAULT_FRAME_WIDTH, DEFAULT_HOLD_EPSILON, DEFAULT_LINE_HEIGHT,
    GAP_TOLERANCE,
};
use crate::error::{Error, Result};
use crate::types::{KeyframeRole, LyricEvent, Position, PositionKeyframe};

pub use sink::{apply, KeyframeSink, RecordingSink};

/// Visible frame size of the host composition, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameSize {
    /// Frame width.
    pub width: f64,
    /// Frame height.
    pub height: f64,
}

impl Default for FrameSize {
    fn default() -> Self {
        Self {
            width: DEFAULT_FRAME_WIDTH,
            height: DEFAULT_FRAME_HEIGHT,
        }
    }
}

/// Geometry and timing constants for one timeline build.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimelineConfig {
    /// Vertical distance between consecutive lines' rest positions.
    pub line_height: f64,
    /// Seconds between the pre-yank hold sample and the yank.
    pub hold_epsilon: f64,
    /// Horizontal position of the text layer.
    pub center_x: f64,
    /// Vertical position of the text layer while the first line is current.
    pub base_y: f64,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        let frame = FrameSize::default();
        Self {
            line_height: DEFAULT_LINE_HEIGHT,
            hold_epsilon: DEFAULT_HOLD_EPSILON,
            center_x: frame.width / 2.0,
            base_y: frame.height / 2.0,
        }
    }
}

impl TimelineConfig {
    /// Config that centers a text block of `text_block_height` pixels in `frame`.
    ///
    /// The layer's anchor sits on the first line, so the block is centered
    /// when the anchor is half a block minus half a line below frame center.
    pub fn centered(frame: FrameSize, text_block_height: f64, line_height: f64) -> Self {
        Self {
            line_height,
            hold_epsilon: DEFAULT_HOLD_EPSILON,
            center_x: frame.width / 2.0,
            base_y: frame.height / 2.0 + (text_block_height - line_height) / 2.0,
        }
    }

    /// Set the pre-yank hold gap
    #[must_use]
    pub const fn with_hold_epsilon(mut self, hold_epsilon: f64) -> Self {
        self.hold_epsilon = hold_epsilon;
        self
    }

    /// Rest position of the layer while line `index` is current.
    #[allow(clippy::cast_precision_loss)] // line counts stay far below 2^52
    pub fn position_for(&self, index: usize) -> Position {
        Position::new(self.center_x, self.base_y - index as f64 * self.line_height)
    }

    /// Reject geometry the host cannot represent.
    pub fn validate(&self) -> Result<()> {
        if !self.line_height.is_finite() {
            return Err(Error::config(
                format!("line height must be finite, got {}", self.line_height),
                "Set LYRICYANK_LINE_HEIGHT or --line-height to a number of pixels",
            ));
        }
        if !self.hold_epsilon.is_finite() || self.hold_epsilon < 0.0 {
            return Err(Error::config(
                format!("hold epsilon must be a non-negative number, got {}", self.hold_epsilon),
                "Set LYRICYANK_HOLD_EPSILON or --hold-epsilon to seconds, e.g. 0.1",
            ));
        }
        if !self.center_x.is_finite() || !self.base_y.is_finite() {
            return Err(Error::config(
                format!("layer position must be finite, got ({}, {})", self.center_x, self.base_y),
                "Check the frame size and text block height",
            ));
        }
        Ok(())
    }
}

/// Number of keyframes [`build_keyframes`] emits for `line_count` lines.
pub const fn keyframe_count(line_count: usize) -> usize {
    match line_count {
        0 | 1 => line_count,
        n => 3 * n - 1,
    }
}

/// Check that every start time leaves room for its pre-yank sample.
///
/// Line `i + 1` must start at least `hold_epsilon` after line `i`, otherwise
/// its pre-yank sample would land before line `i` starts and the samples
/// would be out of order. The gap is compared with [`GAP_TOLERANCE`] of
/// slack, so a gap of exactly `hold_epsilon` passes wherever it sits on the
/// timeline.
pub fn validate_timing(events: &[LyricEvent], hold_epsilon: f64) -> Result<()> {
    let mut previous: Option<f64> = None;

    for (index, event) in events.iter().enumerate() {
        let current = event.start_time;
        if !current.is_finite() || current < 0.0 {
            return Err(Error::InvalidStartTime { index, value: current });
        }

        if let Some(previous) = previous {
            if current < previous || current - previous < hold_epsilon - GAP_TOLERANCE {
                return Err(Error::TimingOrder {
                    index,
                    previous,
                    current,
                    hold_epsilon,
                });
            }
        }
        previous = Some(current);
    }

    Ok(())
}

/// Build the yank-scroll keyframe sequence for `events`.
///
/// Output is ordered by time. Samples at equal times keep emission order:
/// the hold comes before the yank, so a host that replaces samples at an
/// identical time ends on the moved value.
pub fn build_keyframes(events: &[LyricEvent], config: &TimelineConfig) -> Result<Vec<PositionKeyframe>> {
    config.validate()?;
    validate_timing(events, config.hold_epsilon)?;

    let Some(first) = events.first() else {
        return Ok(Vec::new());
    };

    let mut keyframes = Vec::with_capacity(keyframe_count(events.len()));
    keyframes.push(PositionKeyframe::new(
        first.start_time,
        config.position_for(0),
        KeyframeRole::Rest,
    ));

    for (index, pair) in events.windows(2).enumerate() {
        let [previous, next] = pair else { continue };
        let held = config.position_for(index);
        let moved = config.position_for(index + 1);

        // A gap within tolerance of epsilon can put the raw pre-yank time a
        // hair before the previous line's start.
        keyframes.push(PositionKeyframe::new(
            (next.start_time - config.hold_epsilon).max(previous.start_time),
            held,
            KeyframeRole::PreYank,
        ));
        keyframes.push(PositionKeyframe::new(next.start_time, held, KeyframeRole::Hold));
        keyframes.push(PositionKeyframe::new(next.start_time, moved, KeyframeRole::Yank));
    }

    if let [_, .., last] = events {
        keyframes.push(PositionKeyframe::new(
            last.start_time,
            config.position_for(events.len() - 1),
            KeyframeRole::FinalHold,
        ));
    }

    tracing::debug!("Built {} keyframes for {} lyric lines", keyframes.len(), events.len());
    Ok(keyframes)
}
