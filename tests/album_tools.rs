//! Filesystem tests for the album SRT merge and batch timestamp shift.

#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

use lyricyank::lyrics::shift::shift_folder;
use lyricyank::srt::merge_folder_to_srt;
use lyricyank::Error;

#[test]
fn merges_tracks_with_album_offsets() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("starts.txt"), "02 00:10:00\n01 00:00:00\n").unwrap();
    std::fs::write(
        dir.path().join("01-lyrics-aligned.csv"),
        "1.000,0,\"one, a\"\n0.000,0,\"\"\n",
    )
    .unwrap();
    std::fs::write(dir.path().join("02-lyrics-aligned.csv"), "0.5,0,two\n").unwrap();

    let out = dir.path().join("album.srt");
    let count = merge_folder_to_srt(dir.path(), &out).unwrap();
    assert_eq!(count, 3);

    let srt = std::fs::read_to_string(&out).unwrap();
    assert_eq!(
        srt,
        "1\n00:00:00,000 --> 00:00:00,990\n\n\n\
         2\n00:00:01,000 --> 00:00:05,000\none, a\n\n\
         3\n00:00:10,500 --> 00:00:14,500\ntwo\n\n"
    );
}

#[test]
fn row_without_text_clears_the_previous_lyric() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("starts.txt"), "01 00:00:00\n").unwrap();
    std::fs::write(
        dir.path().join("01-lyrics-aligned.csv"),
        "0.000,0,hello\n2.000,0\n5.000,0,bye\n",
    )
    .unwrap();

    let out = dir.path().join("album.srt");
    assert_eq!(merge_folder_to_srt(dir.path(), &out).unwrap(), 3);

    let srt = std::fs::read_to_string(&out).unwrap();
    assert_eq!(
        srt,
        "1\n00:00:00,000 --> 00:00:01,990\nhello\n\n\
         2\n00:00:02,000 --> 00:00:04,990\n\n\n\
         3\n00:00:05,000 --> 00:00:09,000\nbye\n\n"
    );
}

#[test]
fn unreadable_start_time_fails_the_merge() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("starts.txt"), "01 00:00:00\n").unwrap();
    std::fs::write(dir.path().join("01-lyrics-aligned.csv"), "0.000,0,a\nlater,0,b\n").unwrap();

    let err = merge_folder_to_srt(dir.path(), &dir.path().join("out.srt")).unwrap_err();
    match err {
        Error::Parse { file: Some(f), row, .. } => {
            assert!(f.ends_with("01-lyrics-aligned.csv"));
            assert_eq!(row, 2);
        }
        other => panic!("Expected Parse error with file, got {other:?}"),
    }
}

#[test]
fn missing_track_file_names_the_path() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("starts.txt"), "01 00:00:00\n").unwrap();

    let err = merge_folder_to_srt(dir.path(), &dir.path().join("out.srt")).unwrap_err();
    match err {
        Error::Io { path: Some(p), .. } => assert!(p.ends_with("01-lyrics-aligned.csv")),
        other => panic!("Expected Io error with path, got {other:?}"),
    }
}

#[test]
fn shifting_twice_accumulates() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("01.csv");
    std::fs::write(&path, "1.000,0,\"a\"\n").unwrap();

    shift_folder(dir.path(), 0.5).unwrap();
    shift_folder(dir.path(), 0.25).unwrap();

    assert_eq!(std::fs::read_to_string(&path).unwrap(), "1.750,0,\"a\"\n");
}
