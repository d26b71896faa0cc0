//! Core type definitions shared by the parser, the timeline builder and the sinks.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A lyric line and the moment it starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LyricEvent {
    /// Start time in seconds.
    pub start_time: f64,
    /// Lyric text as it appears on screen.
    pub text: String,
}

impl LyricEvent {
    /// Create a new lyric event.
    pub fn new(start_time: f64, text: impl Into<String>) -> Self {
        Self {
            start_time,
            text: text.into(),
        }
    }
}

/// A 2-D point in host frame pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate, growing downwards.
    pub y: f64,
}

impl Position {
    /// Create a new position.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.x, self.y)
    }
}

/// Why a keyframe exists in the timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyframeRole {
    /// First line's resting position at its own start.
    Rest,
    /// Sample just before a transition that pins the current value.
    PreYank,
    /// Previous value held up to the instant the next line starts.
    Hold,
    /// The jump to the next line's position.
    Yank,
    /// Closing sample at the last line's start.
    FinalHold,
}

impl KeyframeRole {
    /// Returns the human-readable name of this role.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Rest => "rest",
            Self::PreYank => "pre-yank",
            Self::Hold => "hold",
            Self::Yank => "yank",
            Self::FinalHold => "final-hold",
        }
    }
}

impl fmt::Display for KeyframeRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A position sample at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionKeyframe {
    /// Time in seconds.
    pub time: f64,
    /// Position value at `time`.
    pub position: Position,
    /// Diagnostic tag; sinks only ever see `time` and `position`.
    pub role: KeyframeRole,
}

impl PositionKeyframe {
    /// Create a new keyframe.
    #[must_use]
    pub const fn new(time: f64, position: Position, role: KeyframeRole) -> Self {
        Self { time, position, role }
    }
}
