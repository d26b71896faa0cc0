//! Host animation property abstraction.
//!
//! A host exposes its position property as something that accepts
//! timestamped samples. Keyframes are computed first and then pushed through
//! a [`KeyframeSink`] in a single pass.

use std::convert::Infallible;

use crate::types::{Position, PositionKeyframe};

/// A destination for time/value samples on a 2-D position property.
///
/// Implementations can target a live host, a file, or memory.
pub trait KeyframeSink {
    /// The error type for this sink.
    type Error: std::error::Error;

    /// Store `value` at `time` seconds.
    fn append_sample(&mut self, time: f64, value: Position) -> Result<(), Self::Error>;
}

/// Push every keyframe into `sink` in order, returning how many were applied.
///
/// An empty sequence leaves the sink untouched.
pub fn apply<S>(keyframes: &[PositionKeyframe], sink: &mut S) -> Result<usize, S::Error>
where
    S: KeyframeSink + ?Sized,
{
    for keyframe in keyframes {
        sink.append_sample(keyframe.time, keyframe.position)?;
    }
    Ok(keyframes.len())
}

/// In-memory sink that records samples exactly as received.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordingSink {
    /// Recorded `(time, value)` pairs in arrival order.
    pub samples: Vec<(f64, Position)>,
}

impl RecordingSink {
    /// Create an empty recording sink.
    pub const fn new() -> Self {
        Self { samples: Vec::new() }
    }
}

impl KeyframeSink for RecordingSink {
    type Error = Infallible;

    fn append_sample(&mut self, time: f64, value: Position) -> Result<(), Self::Error> {
        self.samples.push((time, value));
        Ok(())
    }
}
