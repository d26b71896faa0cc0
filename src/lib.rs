//! `lyricyank` - timed lyric lines to yank-scroll position keyframes.
//!
//! The core is [`timeline::build_keyframes`], which turns lyric start times
//! into position samples for a host animation property. The surrounding
//! modules read and rewrite lyric CSV files, merge albums into SRT subtitles
//! and run manual tap-to-sync sessions.

pub mod config;
pub mod constants;
pub mod error;
pub mod export;
pub mod lyrics;
pub mod srt;
pub mod tap;
pub mod timeline;
pub mod types;

pub use error::{Error, Result};
pub use timeline::{build_keyframes, TimelineConfig};
pub use types::{KeyframeRole, LyricEvent, Position, PositionKeyframe};
