//! Application constants.
//!
//! Centralizes magic numbers and configuration values for better maintainability.

/// Keyframe timeline defaults.
pub mod timeline {
    /// Default vertical distance between consecutive lyric lines, in pixels.
    pub const DEFAULT_LINE_HEIGHT: f64 = 100.0;

    /// Default gap between the pre-yank hold sample and the yank, in seconds.
    pub const DEFAULT_HOLD_EPSILON: f64 = 0.1;

    /// Default host frame width in pixels.
    pub const DEFAULT_FRAME_WIDTH: f64 = 1920.0;

    /// Default host frame height in pixels.
    pub const DEFAULT_FRAME_HEIGHT: f64 = 1080.0;

    /// Slack allowed when comparing a line gap against the hold epsilon, so
    /// millisecond-rounded times exactly one epsilon apart are accepted.
    pub const GAP_TOLERANCE: f64 = 1e-9;
}

/// Lyric CSV constants.
pub mod lyrics {
    /// Placeholder written in the unused end-time column.
    pub const END_TIME_PLACEHOLDER: &str = "0";

    /// Default shift applied by the batch timestamp tool, in seconds.
    pub const DEFAULT_SHIFT_SECONDS: f64 = 0.5;
}

/// SRT merge constants.
pub mod srt {
    /// Frames per second of the `MM:SS:FF` album timecodes.
    pub const TIMECODE_FPS: f64 = 32.0;

    /// Longest a cue stays on screen, in seconds.
    pub const MAX_CUE_DURATION: f64 = 4.0;

    /// Gap left before the next cue starts, in seconds.
    pub const CUE_GAP: f64 = 0.01;

    /// Shortest cue emitted so that end is always after start, in seconds.
    pub const MIN_CUE_DURATION: f64 = 0.01;

    /// Name of the album offsets file.
    pub const STARTS_FILE: &str = "starts.txt";

    /// Suffix of the per-track lyric files, after the track label.
    pub const TRACK_FILE_SUFFIX: &str = "-lyrics-aligned.csv";
}

/// Tap session constants.
pub mod tap {
    /// Default countdown before tapping starts, in seconds.
    pub const DEFAULT_COUNTDOWN: u64 = 3;

    /// Default output file for tapped timestamps.
    pub const DEFAULT_OUTPUT: &str = "aligned_lines.txt";
}
