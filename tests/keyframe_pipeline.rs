//! End-to-end tests: lyric CSV on disk to keyframes applied through sinks.

#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic, clippy::float_cmp)]

use lyricyank::config::Config;
use lyricyank::export::{JsonSink, KeyframeDocument, ScriptSink};
use lyricyank::lyrics::load_lyrics_csv;
use lyricyank::timeline::{apply, build_keyframes, RecordingSink};
use lyricyank::{Error, KeyframeRole, Position, TimelineConfig};

fn write_csv(dir: &tempfile::TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn csv_to_recorded_samples() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(&dir, "song.csv", "0.000,0,\"First\"\n0.500,0,\"Second\"\n100.000,0,\"Third\"\n");

    let parsed = load_lyrics_csv(&path).unwrap();
    let timeline = Config::default().timeline_for(parsed.events.len());
    let keyframes = build_keyframes(&parsed.events, &timeline).unwrap();

    let mut sink = RecordingSink::new();
    apply(&keyframes, &mut sink).unwrap();

    let expected = vec![
        (0.0, Position::new(960.0, 640.0)),
        (0.5 - 0.1, Position::new(960.0, 640.0)),
        (0.5, Position::new(960.0, 640.0)),
        (0.5, Position::new(960.0, 540.0)),
        (100.0 - 0.1, Position::new(960.0, 540.0)),
        (100.0, Position::new(960.0, 540.0)),
        (100.0, Position::new(960.0, 440.0)),
        (100.0, Position::new(960.0, 440.0)),
    ];
    assert_eq!(sink.samples, expected);
}

#[test]
fn malformed_rows_do_not_stop_the_run() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(&dir, "song.csv", "0,0,a\nnot,a,row\n2,0,b\n3\n");

    let parsed = load_lyrics_csv(&path).unwrap();
    assert_eq!(parsed.events.len(), 2);
    assert_eq!(parsed.skipped.len(), 2);

    let keyframes = build_keyframes(&parsed.events, &TimelineConfig::default()).unwrap();
    assert_eq!(keyframes.len(), 5);
    assert_eq!(keyframes.last().unwrap().role, KeyframeRole::FinalHold);
}

#[test]
fn out_of_order_file_fails_before_any_sample_is_applied() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(&dir, "song.csv", "5,0,late\n1,0,early\n");

    let parsed = load_lyrics_csv(&path).unwrap();
    let err = build_keyframes(&parsed.events, &TimelineConfig::default()).unwrap_err();
    assert!(matches!(err, Error::TimingOrder { index: 1, .. }));
}

#[test]
fn empty_file_leaves_sinks_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(&dir, "song.csv", "");

    let parsed = load_lyrics_csv(&path).unwrap();
    let timeline = Config::default().timeline_for(0);
    let keyframes = build_keyframes(&parsed.events, &timeline).unwrap();

    let mut json = JsonSink::new(&timeline);
    assert_eq!(apply(&keyframes, &mut json).unwrap(), 0);
    assert!(json.document().keyframes.is_empty());
}

#[test]
fn json_export_round_trips_through_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(&dir, "song.csv", "1,0,a\n2,0,b\n");
    let out = dir.path().join("keys.json");

    let parsed = load_lyrics_csv(&path).unwrap();
    let timeline = TimelineConfig::default();
    let keyframes = build_keyframes(&parsed.events, &timeline).unwrap();

    let mut sink = JsonSink::new(&timeline);
    apply(&keyframes, &mut sink).unwrap();
    sink.write_to(&out).unwrap();

    let doc: KeyframeDocument = serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(doc.line_height, 100.0);
    let times: Vec<f64> = doc.keyframes.iter().map(|k| k.time).collect();
    assert_eq!(times, vec![1.0, 2.0 - 0.1, 2.0, 2.0, 2.0]);
}

#[test]
fn script_export_writes_one_call_per_keyframe() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(&dir, "song.csv", "0,0,only line\n");

    let parsed = load_lyrics_csv(&path).unwrap();
    let keyframes = build_keyframes(&parsed.events, &TimelineConfig::default()).unwrap();

    let mut sink = ScriptSink::new(Vec::new(), "p", "thisLayer.position").unwrap();
    apply(&keyframes, &mut sink).unwrap();
    let script = String::from_utf8(sink.finish().unwrap()).unwrap();

    assert_eq!(script, "var p = thisLayer.position;\np.setValueAtTime(0, [960, 540]);\n");
}
