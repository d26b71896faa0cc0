//! Keyframe sinks that write to files instead of a live host.
//!
//! [`JsonSink`] produces a document a host-side import script can read.
//! [`ScriptSink`] writes `setValueAtTime` calls that host scripting runs
//! directly against a position property.

use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::timeline::{KeyframeSink, TimelineConfig};
use crate::types::Position;

/// Errors that can occur during export
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// An I/O error occurred during file operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The keyframe document could not be encoded
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// One stored sample in a [`KeyframeDocument`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SampleRecord {
    /// Time in seconds.
    pub time: f64,
    /// Horizontal position.
    pub x: f64,
    /// Vertical position.
    pub y: f64,
}

/// Serialized form of a keyframe timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyframeDocument {
    /// Line height the timeline was built with.
    pub line_height: f64,
    /// Pre-yank hold gap the timeline was built with.
    pub hold_epsilon: f64,
    /// Samples in application order.
    pub keyframes: Vec<SampleRecord>,
}

/// Sink that collects samples into a [`KeyframeDocument`].
#[derive(Debug, Clone, PartialEq)]
pub struct JsonSink {
    document: KeyframeDocument,
}

impl JsonSink {
    /// Create an empty sink recording `config`'s line height and epsilon.
    pub const fn new(config: &TimelineConfig) -> Self {
        Self {
            document: KeyframeDocument {
                line_height: config.line_height,
                hold_epsilon: config.hold_epsilon,
                keyframes: Vec::new(),
            },
        }
    }

    /// The document collected so far.
    pub const fn document(&self) -> &KeyframeDocument {
        &self.document
    }

    /// Pretty-printed JSON for the collected document.
    pub fn to_json(&self) -> Result<String, ExportError> {
        Ok(serde_json::to_string_pretty(&self.document)?)
    }

    /// Write the collected document to `path`.
    pub fn write_to(&self, path: &Path) -> Result<(), ExportError> {
        let json = self.to_json()?;
        fs_err::write(path, json)?;
        tracing::info!(
            "Wrote {} keyframes to {}",
            self.document.keyframes.len(),
            path.display()
        );
        Ok(())
    }
}

impl KeyframeSink for JsonSink {
    type Error = ExportError;

    fn append_sample(&mut self, time: f64, value: Position) -> Result<(), Self::Error> {
        self.document.keyframes.push(SampleRecord {
            time,
            x: value.x,
            y: value.y,
        });
        Ok(())
    }
}

/// Property binding used when no other is given: the first selected layer's position.
pub const DEFAULT_PROPERTY_BINDING: &str =
    "app.project.activeItem.selectedLayers[0].property(\"Transform\").property(\"Position\")";

/// Sink that writes one `setValueAtTime` call per sample.
pub struct ScriptSink<W: Write> {
    writer: W,
    variable: String,
    written: usize,
}

impl<W: Write> ScriptSink<W> {
    /// Start a script that binds `variable` to `binding` and targets it.
    pub fn new(mut writer: W, variable: &str, binding: &str) -> std::io::Result<Self> {
        writeln!(writer, "var {variable} = {binding};")?;
        Ok(Self {
            writer,
            variable: variable.to_string(),
            written: 0,
        })
    }

    /// Number of samples written so far.
    pub const fn written(&self) -> usize {
        self.written
    }

    /// Flush and hand back the underlying writer.
    pub fn finish(mut self) -> std::io::Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

impl<W: Write> KeyframeSink for ScriptSink<W> {
    type Error = std::io::Error;

    fn append_sample(&mut self, time: f64, value: Position) -> Result<(), Self::Error> {
        writeln!(
            self.writer,
            "{}.setValueAtTime({time}, {value});",
            self.variable
        )?;
        self.written += 1;
        Ok(())
    }
}
