//! Manual tap-to-sync sessions.
//!
//! The user plays the song and taps once per lyric line; each tap records
//! the elapsed time for the current line. Time spent paused is subtracted so
//! stamps stay aligned with the song. Playback itself happens elsewhere.

use std::time::{Duration, Instant};

use crate::error::{Error, Result};
use crate::lyrics::format_lyric_row;
use crate::types::LyricEvent;

/// Source of monotonic time for a session.
pub trait Clock {
    /// Time elapsed since an arbitrary fixed origin.
    fn now(&self) -> Duration;
}

/// Wall clock backed by [`Instant`].
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    /// Clock whose origin is the moment of creation.
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// A line of user input during a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapCommand {
    /// Stamp the current line.
    Mark,
    /// Drop the last stamp and step back one line.
    Undo,
    /// Pause, or resume if already paused.
    TogglePause,
    /// Stop early, keeping the stamps so far.
    Quit,
}

impl TapCommand {
    /// Interpret one line of input; anything unrecognized marks.
    pub fn parse(input: &str) -> Self {
        match input.trim().to_lowercase().as_str() {
            "u" => Self::Undo,
            "p" => Self::TogglePause,
            "q" => Self::Quit,
            _ => Self::Mark,
        }
    }
}

/// What a command did.
#[derive(Debug, Clone, PartialEq)]
pub enum TapOutcome {
    /// Line `index` was stamped at `time` seconds.
    Marked {
        /// Zero-based line index.
        index: usize,
        /// Stamp in seconds.
        time: f64,
    },
    /// The last stamp was removed.
    Undone(LyricEvent),
    /// Undo with no stamps.
    NothingToUndo,
    /// The session is now paused.
    Paused,
    /// The session resumed.
    Resumed,
    /// Mark refused because the session is paused.
    IgnoredWhilePaused,
    /// The session was stopped early.
    Quit,
}

/// State of one tapping run over a list of lyric lines.
#[derive(Debug)]
pub struct TapSession<C: Clock> {
    clock: C,
    lines: Vec<String>,
    stamps: Vec<LyricEvent>,
    started: Duration,
    paused_at: Option<Duration>,
    paused_total: Duration,
    quit: bool,
}

impl<C: Clock> TapSession<C> {
    /// Start a session now.
    pub fn new(lines: Vec<String>, clock: C) -> Self {
        let started = clock.now();
        Self {
            clock,
            lines,
            stamps: Vec::new(),
            started,
            paused_at: None,
            paused_total: Duration::ZERO,
            quit: false,
        }
    }

    /// Seconds since start, not counting completed pauses.
    pub fn elapsed(&self) -> f64 {
        self.clock
            .now()
            .saturating_sub(self.started)
            .saturating_sub(self.paused_total)
            .as_secs_f64()
    }

    /// Zero-based index of the line awaiting a tap.
    pub fn position(&self) -> usize {
        self.stamps.len()
    }

    /// Total number of lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the session has no lines at all.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The line awaiting a tap, if any.
    pub fn current_line(&self) -> Option<&str> {
        if self.quit {
            return None;
        }
        self.lines.get(self.stamps.len()).map(String::as_str)
    }

    /// Whether the session is paused.
    pub const fn is_paused(&self) -> bool {
        self.paused_at.is_some()
    }

    /// Whether every line is stamped or the user quit.
    pub fn is_finished(&self) -> bool {
        self.quit || self.stamps.len() >= self.lines.len()
    }

    /// Stamps recorded so far.
    pub fn stamps(&self) -> &[LyricEvent] {
        &self.stamps
    }

    /// Apply one command.
    pub fn handle(&mut self, command: TapCommand) -> TapOutcome {
        match command {
            TapCommand::Quit => {
                self.quit = true;
                TapOutcome::Quit
            }
            TapCommand::Undo => self
                .stamps
                .pop()
                .map_or(TapOutcome::NothingToUndo, TapOutcome::Undone),
            TapCommand::TogglePause => {
                let now = self.clock.now();
                match self.paused_at.take() {
                    Some(since) => {
                        self.paused_total += now.saturating_sub(since);
                        TapOutcome::Resumed
                    }
                    None => {
                        self.paused_at = Some(now);
                        TapOutcome::Paused
                    }
                }
            }
            TapCommand::Mark => {
                if self.is_paused() {
                    return TapOutcome::IgnoredWhilePaused;
                }
                let index = self.stamps.len();
                let Some(text) = self.lines.get(index) else {
                    self.quit = true;
                    return TapOutcome::Quit;
                };
                let time = self.elapsed();
                self.stamps.push(LyricEvent::new(time, text.clone()));
                TapOutcome::Marked { index, time }
            }
        }
    }

    /// Whether an autosave is due after the latest mark. `every == 0` disables autosave.
    pub fn autosave_due(&self, every: usize) -> bool {
        every > 0 && !self.stamps.is_empty() && self.stamps.len() % every == 0
    }

    /// Stamps as lyric CSV, shifted by `offset` seconds and clamped at zero.
    pub fn render_csv(&self, offset: f64) -> String {
        self.stamps
            .iter()
            .map(|s| format_lyric_row((s.start_time + offset).max(0.0), &s.text) + "\n")
            .collect()
    }
}

/// Lyric lines to tap: trimmed, blank lines dropped.
pub fn load_tap_lyrics(text: &str) -> Result<Vec<String>> {
    let lines: Vec<String> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(String::from)
        .collect();

    if lines.is_empty() {
        return Err(Error::Msg("No non-empty lines in lyrics file".to_string()));
    }
    Ok(lines)
}
