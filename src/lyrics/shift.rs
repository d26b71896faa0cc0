//! Shift lyric timestamps in place.
//!
//! Used to nudge a whole folder of tapped lyric files when the taps were
//! consistently early or late.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{Error, Result};

/// Result of shifting one CSV text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftedCsv {
    /// Rewritten text.
    pub text: String,
    /// Rows whose start time was shifted.
    pub shifted: usize,
    /// Non-blank rows left as they were because the start time did not parse.
    pub untouched: usize,
}

/// Per-file outcome of [`shift_folder`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftReport {
    /// File that was rewritten.
    pub path: PathBuf,
    /// Rows whose start time was shifted.
    pub shifted: usize,
    /// Rows left untouched.
    pub untouched: usize,
}

/// Add `seconds` to the first column of every row.
///
/// Shifted times clamp at zero and are written with millisecond precision.
/// Everything after the first comma, line endings included, is preserved.
pub fn shift_csv_text(text: &str, seconds: f64) -> ShiftedCsv {
    let mut out = String::with_capacity(text.len());
    let mut shifted = 0;
    let mut untouched = 0;

    for chunk in text.split_inclusive('\n') {
        let body = chunk.trim_end_matches(['\n', '\r']);
        let ending = &chunk[body.len()..];
        let (first, rest) = body.split_at(body.find(',').unwrap_or(body.len()));

        match first.trim().parse::<f64>() {
            Ok(t) if t.is_finite() => {
                out.push_str(&format!("{:.3}", (t + seconds).max(0.0)));
                out.push_str(rest);
                shifted += 1;
            }
            _ => {
                if !body.trim().is_empty() {
                    untouched += 1;
                }
                out.push_str(body);
            }
        }
        out.push_str(ending);
    }

    ShiftedCsv { text: out, shifted, untouched }
}

/// Shift every `*.csv` file directly inside `dir`, rewriting each in place.
///
/// Files are processed one at a time in name order.
pub fn shift_folder(dir: &Path, seconds: f64) -> Result<Vec<ShiftReport>> {
    let mut reports = Vec::new();

    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|e| Error::io(e.into(), dir.to_path_buf()))?;
        let path = entry.path();
        if !entry.file_type().is_file() || path.extension().is_none_or(|ext| ext != "csv") {
            continue;
        }

        let text = fs_err::read_to_string(path).map_err(|e| Error::io(e, path.to_path_buf()))?;
        let result = shift_csv_text(&text, seconds);
        fs_err::write(path, &result.text).map_err(|e| Error::io(e, path.to_path_buf()))?;

        tracing::info!(
            "Processed {} ({} rows shifted, {} untouched)",
            path.display(),
            result.shifted,
            result.untouched
        );
        reports.push(ShiftReport {
            path: path.to_path_buf(),
            shifted: result.shifted,
            untouched: result.untouched,
        });
    }

    Ok(reports)
}
