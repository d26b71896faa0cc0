//! Three-column lyric CSV files.
//!
//! Each row is `start_time,end_time,text`. The first two fields are numeric;
//! the end time is carried for compatibility and otherwise ignored. The text
//! is everything after the second comma, so it may contain commas of its own.
//! The text field is trimmed of surrounding whitespace first. Quoted text
//! then has its outer quotes stripped and `\"` or `""` unescaped, so
//! whitespace inside the quotes is kept.

pub mod shift;

use std::path::Path;

use crate::constants::lyrics::END_TIME_PLACEHOLDER;
use crate::error::{Error, Result};
use crate::types::LyricEvent;

/// Events read from a lyric CSV plus the rows that had to be skipped.
#[derive(Debug, Default)]
pub struct ParsedLyrics {
    /// Well-formed rows in file order.
    pub events: Vec<LyricEvent>,
    /// One [`Error::Parse`] per skipped row.
    pub skipped: Vec<Error>,
}

/// Parse lyric CSV text, skipping malformed rows with a warning.
pub fn parse_lyrics_csv(text: &str) -> ParsedLyrics {
    let mut parsed = ParsedLyrics::default();
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    for (idx, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match parse_row(idx + 1, line) {
            Ok(event) => parsed.events.push(event),
            Err(e) => {
                tracing::warn!("Skipping lyric row: {e}");
                parsed.skipped.push(e);
            }
        }
    }

    parsed
}

/// Read and parse a lyric CSV file.
pub fn load_lyrics_csv(path: &Path) -> Result<ParsedLyrics> {
    let text = fs_err::read_to_string(path).map_err(|e| Error::io(e, path.to_path_buf()))?;
    let mut parsed = parse_lyrics_csv(&text);
    parsed.skipped = parsed
        .skipped
        .into_iter()
        .map(|e| e.with_file(path))
        .collect();

    tracing::info!(
        "Loaded {} lyric lines from {} ({} skipped)",
        parsed.events.len(),
        path.display(),
        parsed.skipped.len()
    );
    Ok(parsed)
}

/// Parse one row; `row` is the one-based line number used in errors.
pub fn parse_row(row: usize, line: &str) -> Result<LyricEvent> {
    let mut fields = line.splitn(3, ',');
    let start = fields.next().unwrap_or_default();
    let end = fields
        .next()
        .ok_or_else(|| Error::parse(row, "end_time", "missing field"))?;
    let text = fields
        .next()
        .ok_or_else(|| Error::parse(row, "text", "missing field"))?;

    let start_time = parse_seconds(row, "start_time", start)?;
    if start_time < 0.0 {
        return Err(Error::parse(row, "start_time", format!("negative time {start_time}")));
    }
    parse_seconds(row, "end_time", end)?;

    Ok(LyricEvent::new(start_time, unquote(text)))
}

fn parse_seconds(row: usize, field: &'static str, raw: &str) -> Result<f64> {
    let raw = raw.trim();
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(Error::parse(row, field, format!("not a number: {raw:?}"))),
    }
}

/// Trim a text field, then strip surrounding quotes and unescape embedded ones.
pub(crate) fn unquote(text: &str) -> String {
    let trimmed = text.trim();
    match trimmed
        .strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
    {
        Some(inner) => inner.replace("\\\"", "\"").replace("\"\"", "\""),
        None => trimmed.to_string(),
    }
}

/// Render one row in the quoted form written by the tap tool.
pub fn format_lyric_row(start_time: f64, text: &str) -> String {
    format!(
        "{start_time:.3},{END_TIME_PLACEHOLDER},\"{}\"",
        text.replace('"', "\\\"")
    )
}

/// Render events as lyric CSV text, one row per event.
pub fn render_lyrics_csv(events: &[LyricEvent]) -> String {
    events
        .iter()
        .map(|e| format_lyric_row(e.start_time, &e.text) + "\n")
        .collect()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic, clippy::float_cmp)]

    use super::*;

    #[test]
    fn parses_plain_and_quoted_rows() {
        let parsed = parse_lyrics_csv("0,0,First\n0.5,0,\"Second, with comma\"\n100.000,0,Third\n");
        assert!(parsed.skipped.is_empty());
        assert_eq!(
            parsed.events,
            vec![
                LyricEvent::new(0.0, "First"),
                LyricEvent::new(0.5, "Second, with comma"),
                LyricEvent::new(100.0, "Third"),
            ]
        );
    }

    #[test]
    fn unquoted_text_keeps_embedded_commas() {
        let event = parse_row(1, "1.5,0,well, well, well").unwrap();
        assert_eq!(event.text, "well, well, well");
    }

    #[test]
    fn escaped_quotes_are_unescaped() {
        assert_eq!(parse_row(1, r#"1,0,"say \"hi\"""#).unwrap().text, "say \"hi\"");
        assert_eq!(parse_row(1, r#"1,0,"say ""hi""""#).unwrap().text, "say \"hi\"");
    }

    #[test]
    fn text_is_trimmed_outside_quotes_only() {
        assert_eq!(parse_row(1, "1,0,  plain words  ").unwrap().text, "plain words");
        assert_eq!(parse_row(1, "1,0,  \"  padded  \" ").unwrap().text, "  padded  ");
    }

    #[test]
    fn empty_text_is_allowed() {
        let event = parse_row(3, "12.0,0,").unwrap();
        assert_eq!(event, LyricEvent::new(12.0, ""));
    }

    #[test]
    fn missing_fields_name_the_field() {
        match parse_row(7, "1.0,0").unwrap_err() {
            Error::Parse { row, field, .. } => {
                assert_eq!(row, 7);
                assert_eq!(field, "text");
            }
            other => panic!("Expected Parse error, got {other:?}"),
        }
        assert!(matches!(
            parse_row(8, "1.0").unwrap_err(),
            Error::Parse { field: "end_time", .. }
        ));
    }

    #[test]
    fn non_numeric_times_are_rejected() {
        assert!(matches!(
            parse_row(1, "abc,0,text").unwrap_err(),
            Error::Parse { field: "start_time", .. }
        ));
        assert!(matches!(
            parse_row(1, "1.0,x,text").unwrap_err(),
            Error::Parse { field: "end_time", .. }
        ));
        assert!(matches!(
            parse_row(1, "NaN,0,text").unwrap_err(),
            Error::Parse { field: "start_time", .. }
        ));
        assert!(parse_row(1, "-2,0,text").is_err());
    }

    #[test]
    fn malformed_rows_are_skipped_not_fatal() {
        let parsed = parse_lyrics_csv("start,end,text\n0,0,a\n\n  \nbroken\n2,0,b\n");
        assert_eq!(parsed.events.len(), 2);
        assert_eq!(parsed.skipped.len(), 2);
        assert!(matches!(parsed.skipped[0], Error::Parse { row: 1, .. }));
        assert!(matches!(parsed.skipped[1], Error::Parse { row: 5, .. }));
    }

    #[test]
    fn byte_order_mark_is_ignored() {
        let parsed = parse_lyrics_csv("\u{feff}1,0,a\r\n2,0,b\r\n");
        assert_eq!(parsed.events[0].start_time, 1.0);
        assert_eq!(parsed.events[1].text, "b");
    }

    #[test]
    fn load_attaches_file_to_skipped_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("song.csv");
        std::fs::write(&path, "0,0,a\nbad\n").unwrap();

        let parsed = load_lyrics_csv(&path).unwrap();
        assert_eq!(parsed.events.len(), 1);
        match &parsed.skipped[0] {
            Error::Parse { file: Some(f), .. } => assert_eq!(f, &path),
            other => panic!("Expected Parse error with file, got {other:?}"),
        }
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let err = load_lyrics_csv(Path::new("/nonexistent/lyricyank/song.csv")).unwrap_err();
        assert!(matches!(err, Error::Io { path: Some(_), .. }));
    }

    #[test]
    fn rendered_rows_parse_back() {
        let events = vec![LyricEvent::new(1.5, "He said \"go, now\""), LyricEvent::new(3.25, "")];
        let csv = render_lyrics_csv(&events);
        assert!(csv.starts_with("1.500,0,\"He said \\\"go, now\\\"\"\n"));
        assert_eq!(parse_lyrics_csv(&csv).events, events);
    }
}
