//! Album-wide SRT subtitles from per-track lyric files.
//!
//! A folder holds `starts.txt` with one `<track> <MM:SS:FF>` line per track
//! (frames counted at 32 per second) and a `<track>-lyrics-aligned.csv` for
//! each track. Track-local start times are offset by the track's album start
//! and merged into a single cue list.

use std::fmt::Write as _;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::constants::srt::{
    CUE_GAP, MAX_CUE_DURATION, MIN_CUE_DURATION, STARTS_FILE, TIMECODE_FPS, TRACK_FILE_SUFFIX,
};
use crate::error::{Error, Result};
use crate::lyrics::unquote;
use crate::types::LyricEvent;

/// Regex matching `MM:SS:FF` timecodes.
#[allow(clippy::expect_used)]
static RE_TIMECODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+):(\d+):(\d+)$").expect("valid regex: RE_TIMECODE")
});

/// A track's label and where it starts on the album.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackStart {
    /// Track label as written in `starts.txt`, e.g. `01`.
    pub track: String,
    /// Album offset in seconds.
    pub offset: f64,
}

/// One subtitle cue.
#[derive(Debug, Clone, PartialEq)]
pub struct Cue {
    /// Start time in seconds.
    pub start: f64,
    /// End time in seconds, always after `start`.
    pub end: f64,
    /// Cue text, possibly empty.
    pub text: String,
}

/// Parse an `MM:SS:FF` timecode with 32 frames per second into seconds.
pub fn parse_timecode_base32(tc: &str) -> Option<f64> {
    let caps = RE_TIMECODE.captures(tc.trim())?;
    let minutes = caps.get(1)?.as_str().parse::<u32>().ok()?;
    let seconds = caps.get(2)?.as_str().parse::<u32>().ok()?;
    let frames = caps.get(3)?.as_str().parse::<u32>().ok()?;
    Some(f64::from(minutes) * 60.0 + f64::from(seconds) + f64::from(frames) / TIMECODE_FPS)
}

/// Parse `starts.txt` content, sorted by track label.
pub fn parse_starts(text: &str) -> Result<Vec<TrackStart>> {
    let mut starts = Vec::new();

    for (idx, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        let [track, tc] = parts.as_slice() else {
            return Err(Error::parse(idx + 1, "line", format!("expected `<track> <MM:SS:FF>`, got {line:?}")));
        };
        let offset = parse_timecode_base32(tc).ok_or_else(|| {
            Error::parse(idx + 1, "timecode", format!("bad timecode {tc:?} (expected MM:SS:FF base-32)"))
        })?;

        starts.push(TrackStart {
            track: (*track).to_string(),
            offset,
        });
    }

    starts.sort_by(|a, b| a.track.cmp(&b.track));
    Ok(starts)
}

/// Parse a track's lyric CSV for subtitles.
///
/// Looser than the keyframe reader: the text column may be missing, which
/// yields an empty cue that clears the screen, and the end-time column is
/// not checked. A start time that is not a number fails the whole file.
pub fn parse_track_rows(text: &str) -> Result<Vec<LyricEvent>> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut events = Vec::new();

    for (idx, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let mut fields = line.splitn(3, ',');
        let raw = fields.next().unwrap_or_default().trim();
        let start_time = match raw.parse::<f64>() {
            Ok(v) if v.is_finite() => v,
            _ => return Err(Error::parse(idx + 1, "start_time", format!("invalid start time: {line:?}"))),
        };
        let text = fields.nth(1).map(unquote).unwrap_or_default();
        events.push(LyricEvent::new(start_time, text));
    }

    events.sort_by(|a, b| a.start_time.total_cmp(&b.start_time));
    Ok(events)
}

/// Read every track listed in `dir/starts.txt` and merge them in album time.
pub fn collect_entries(dir: &Path) -> Result<Vec<LyricEvent>> {
    let starts_path = dir.join(STARTS_FILE);
    let text = fs_err::read_to_string(&starts_path).map_err(|e| Error::io(e, starts_path.clone()))?;
    let starts = parse_starts(&text).map_err(|e| e.with_file(&starts_path))?;

    let mut entries = Vec::new();
    for start in &starts {
        let path = dir.join(format!("{}{TRACK_FILE_SUFFIX}", start.track));
        let text = fs_err::read_to_string(&path).map_err(|e| Error::io(e, path.clone()))?;
        let events = parse_track_rows(&text).map_err(|e| e.with_file(&path))?;

        entries.extend(
            events
                .into_iter()
                .map(|e| LyricEvent::new(start.offset + e.start_time, e.text)),
        );
    }

    entries.sort_by(|a, b| a.start_time.total_cmp(&b.start_time));
    tracing::debug!("Collected {} entries from {} tracks", entries.len(), starts.len());
    Ok(entries)
}

/// Turn time-sorted entries into cues.
///
/// A cue ends just before the next one starts, but never lasts longer than
/// the maximum duration. The last cue gets the maximum duration. Cues that
/// would end at or before their start get the minimum duration instead.
pub fn compute_cues(entries: &[LyricEvent]) -> Vec<Cue> {
    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let start = entry.start_time;
            let mut end = entries.get(i + 1).map_or(start + MAX_CUE_DURATION, |next| {
                (start + MAX_CUE_DURATION).min(next.start_time - CUE_GAP)
            });
            if end <= start {
                end = start + MIN_CUE_DURATION;
            }
            Cue {
                start,
                end,
                text: entry.text.clone(),
            }
        })
        .collect()
}

/// Format seconds as an SRT timestamp `HH:MM:SS,mmm`. Negative times clamp to zero.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // clamped to >= 0 and rounded
pub fn format_srt_timestamp(seconds: f64) -> String {
    let ms_total = (seconds.max(0.0) * 1000.0).round() as u64;
    let hh = ms_total / 3_600_000;
    let mm = ms_total % 3_600_000 / 60_000;
    let ss = ms_total % 60_000 / 1000;
    let ms = ms_total % 1000;
    format!("{hh:02}:{mm:02}:{ss:02},{ms:03}")
}

/// Render cues as SRT text, numbered from 1. Empty cues are kept so they clear the screen.
pub fn render_srt(cues: &[Cue]) -> String {
    let mut out = String::new();
    for (idx, cue) in cues.iter().enumerate() {
        let _ = write!(
            out,
            "{}\n{} --> {}\n{}\n\n",
            idx + 1,
            format_srt_timestamp(cue.start),
            format_srt_timestamp(cue.end),
            cue.text
        );
    }
    out
}

/// Merge the album in `dir` into one SRT file at `out`, returning the cue count.
pub fn merge_folder_to_srt(dir: &Path, out: &Path) -> Result<usize> {
    let entries = collect_entries(dir)?;
    let cues = compute_cues(&entries);
    fs_err::write(out, render_srt(&cues)).map_err(|e| Error::io(e, out.to_path_buf()))?;

    tracing::info!("Wrote {} with {} cues", out.display(), cues.len());
    Ok(cues.len())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic, clippy::float_cmp)]

    use super::*;

    #[test]
    fn timecode_counts_thirty_two_frames_per_second() {
        assert_eq!(parse_timecode_base32("00:00:00"), Some(0.0));
        assert_eq!(parse_timecode_base32("01:02:16"), Some(62.5));
        assert_eq!(parse_timecode_base32(" 10:00:08 "), Some(600.25));
    }

    #[test]
    fn timecode_rejects_other_shapes() {
        assert_eq!(parse_timecode_base32("1:02"), None);
        assert_eq!(parse_timecode_base32("aa:bb:cc"), None);
        assert_eq!(parse_timecode_base32("01:02:03:04"), None);
    }

    #[test]
    fn starts_are_sorted_by_track() {
        let starts = parse_starts("02 03:00:00\n\n01 00:00:16\n").unwrap();
        assert_eq!(
            starts,
            vec![
                TrackStart { track: "01".into(), offset: 0.5 },
                TrackStart { track: "02".into(), offset: 180.0 },
            ]
        );
    }

    #[test]
    fn starts_reject_malformed_lines() {
        assert!(matches!(
            parse_starts("01 00:00:00\n02\n").unwrap_err(),
            Error::Parse { row: 2, field: "line", .. }
        ));
        assert!(matches!(
            parse_starts("01 0:0\n").unwrap_err(),
            Error::Parse { row: 1, field: "timecode", .. }
        ));
    }

    #[test]
    fn track_rows_without_text_become_empty_entries() {
        let events = parse_track_rows("5.000,0,bye\n0.000,0,\"hello, you\"\n\n2.000,0\n").unwrap();
        assert_eq!(
            events,
            vec![
                LyricEvent::new(0.0, "hello, you"),
                LyricEvent::new(2.0, ""),
                LyricEvent::new(5.0, "bye"),
            ]
        );
    }

    #[test]
    fn track_rows_with_bad_start_time_fail() {
        let err = parse_track_rows("0.0,0,a\nsoon,0,b\n").unwrap_err();
        assert!(matches!(err, Error::Parse { row: 2, field: "start_time", .. }));
    }

    #[test]
    fn cues_end_before_next_or_after_max_duration() {
        let entries = vec![
            LyricEvent::new(0.0, "a"),
            LyricEvent::new(2.0, "b"),
            LyricEvent::new(10.0, "c"),
            LyricEvent::new(10.005, "d"),
        ];
        let cues = compute_cues(&entries);

        assert_eq!(cues[0].end, 2.0 - CUE_GAP);
        assert_eq!(cues[1].end, 2.0 + MAX_CUE_DURATION);
        assert_eq!(cues[2].end, 10.0 + MIN_CUE_DURATION);
        assert_eq!(cues[3].end, 10.005 + MAX_CUE_DURATION);
    }

    #[test]
    fn srt_timestamps_round_to_milliseconds() {
        assert_eq!(format_srt_timestamp(0.0), "00:00:00,000");
        assert_eq!(format_srt_timestamp(-3.0), "00:00:00,000");
        assert_eq!(format_srt_timestamp(3661.2346), "01:01:01,235");
        assert_eq!(format_srt_timestamp(59.9996), "00:01:00,000");
    }

    #[test]
    fn render_keeps_empty_cues() {
        let cues = vec![
            Cue { start: 0.0, end: 1.5, text: "hello".into() },
            Cue { start: 1.5, end: 2.0, text: String::new() },
        ];
        assert_eq!(
            render_srt(&cues),
            "1\n00:00:00,000 --> 00:00:01,500\nhello\n\n2\n00:00:01,500 --> 00:00:02,000\n\n\n"
        );
    }

    #[test]
    fn missing_starts_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = collect_entries(dir.path()).unwrap_err();
        assert!(matches!(err, Error::Io { path: Some(p), .. } if p.ends_with(STARTS_FILE)));
    }
}
