//! Debug tool to dump the keyframe timeline built from a lyric CSV.
//!
//! Usage:
//!   `cargo run --bin dump_keyframes -- <lyrics.csv>`
//!   `cargo run --bin dump_keyframes -- <lyrics.csv> --json`
//!
//! Prints every keyframe with its role so timing problems can be traced
//! back to the lyric line that caused them.

// Development/debug binary - allow expect/unwrap for simpler error handling
#![allow(clippy::expect_used, clippy::unwrap_used)]

use lyricyank::config::Config;
use lyricyank::lyrics::load_lyrics_csv;
use lyricyank::timeline::build_keyframes;
use lyricyank::{KeyframeRole, LyricEvent, PositionKeyframe};
use std::env;
use std::path::Path;

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <lyrics.csv> [--json]", args[0]);
        std::process::exit(1);
    }

    let path = Path::new(&args[1]);
    let parsed = load_lyrics_csv(path).unwrap_or_else(|e| {
        eprintln!("Failed to read {}: {e}", path.display());
        std::process::exit(1);
    });

    let config = Config::load().unwrap_or_else(|e| {
        eprintln!("{e}");
        std::process::exit(1);
    });
    let timeline = config.timeline_for(parsed.events.len());

    let keyframes = build_keyframes(&parsed.events, &timeline).unwrap_or_else(|e| {
        eprintln!("{e}");
        std::process::exit(1);
    });

    if args.contains(&"--json".to_string()) {
        println!("{}", serde_json::to_string_pretty(&keyframes).unwrap());
        return;
    }

    println!("╔══════════════════════════════════════════════════════════════════╗");
    println!("║ Keyframe Timeline: {}", path.file_name().unwrap().to_string_lossy());
    println!("╚══════════════════════════════════════════════════════════════════╝");
    println!();

    println!("⚙️  CONFIG");
    println!("├─ Line height: {}", timeline.line_height);
    println!("├─ Hold epsilon: {}s", timeline.hold_epsilon);
    println!("├─ Center X: {}", timeline.center_x);
    println!("└─ Base Y: {}", timeline.base_y);
    println!();

    if !parsed.skipped.is_empty() {
        println!("⚠️  SKIPPED ROWS ({} total)", parsed.skipped.len());
        for (i, err) in parsed.skipped.iter().enumerate() {
            let prefix = if i == parsed.skipped.len() - 1 { "└" } else { "├" };
            println!("{prefix}─ {err}");
        }
        println!();
    }

    dump_keyframes(&parsed.events, &keyframes);
}

fn dump_keyframes(events: &[LyricEvent], keyframes: &[PositionKeyframe]) {
    println!("🎬 KEYFRAMES ({} total for {} lines)", keyframes.len(), events.len());

    // Rest and Yank samples start a new line; label them with its text
    let mut line = 0;
    for (i, keyframe) in keyframes.iter().enumerate() {
        let prefix = if i == keyframes.len() - 1 { "└" } else { "├" };
        let label = match keyframe.role {
            KeyframeRole::Rest => events.first().map(|e| e.text.as_str()),
            KeyframeRole::Yank => {
                line += 1;
                events.get(line).map(|e| e.text.as_str())
            }
            _ => None,
        };

        print!(
            "{prefix}─ {:>10.3}s  {:<10}  {}",
            keyframe.time,
            keyframe.role.name(),
            keyframe.position
        );
        match label {
            Some(text) => println!("  \"{text}\""),
            None => println!(),
        }
    }
}
