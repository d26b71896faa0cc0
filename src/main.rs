//! `lyricyank` - command-line front end for lyric keyframes, SRT merging,
//! timestamp shifting and tap-to-sync sessions.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use lyricyank::config::{expand_path, Config};
use lyricyank::constants::lyrics::DEFAULT_SHIFT_SECONDS;
use lyricyank::constants::tap::{DEFAULT_COUNTDOWN, DEFAULT_OUTPUT};
use lyricyank::export::{JsonSink, ScriptSink, DEFAULT_PROPERTY_BINDING};
use lyricyank::lyrics::load_lyrics_csv;
use lyricyank::lyrics::shift::shift_folder;
use lyricyank::srt::merge_folder_to_srt;
use lyricyank::tap::{load_tap_lyrics, SystemClock, TapCommand, TapOutcome, TapSession};
use lyricyank::timeline::{apply, build_keyframes};

/// Timed lyric lines to yank-scroll keyframes, plus the tools around them
#[derive(Parser)]
#[command(name = "lyricyank")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build position keyframes from a lyric CSV
    Keyframes {
        /// Lyric CSV (`start_time,end_time,text` rows)
        csv: String,

        /// Pixels between lyric lines (overrides LYRICYANK_LINE_HEIGHT)
        #[arg(long)]
        line_height: Option<f64>,

        /// Seconds between the pre-yank hold and the yank (overrides LYRICYANK_HOLD_EPSILON)
        #[arg(long)]
        hold_epsilon: Option<f64>,

        /// Host frame width in pixels (overrides LYRICYANK_FRAME_WIDTH)
        #[arg(long)]
        frame_width: Option<f64>,

        /// Host frame height in pixels (overrides LYRICYANK_FRAME_HEIGHT)
        #[arg(long)]
        frame_height: Option<f64>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,

        /// Output file (default: stdout)
        #[arg(long)]
        out: Option<String>,
    },

    /// Merge per-track lyric CSVs into one album SRT using starts.txt
    Srt {
        /// Folder holding starts.txt and the NN-lyrics-aligned.csv files
        folder: String,

        /// SRT file to write
        out: String,
    },

    /// Shift the start times of every CSV in a folder, in place
    Shift {
        /// Folder whose *.csv files are rewritten
        folder: String,

        /// Seconds to add (negative to move earlier)
        #[arg(long, default_value_t = DEFAULT_SHIFT_SECONDS, allow_hyphen_values = true)]
        seconds: f64,
    },

    /// Tap in lyric start times while the song plays elsewhere
    Tap {
        /// Lyrics text file, one line per lyric line
        lyrics: String,

        /// CSV file to write
        #[arg(long, default_value = DEFAULT_OUTPUT)]
        out: String,

        /// Seconds added to every stamp when saving
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        offset: f64,

        /// Countdown seconds before tapping starts
        #[arg(long, default_value_t = DEFAULT_COUNTDOWN)]
        countdown: u64,

        /// Autosave after every N taps (0 = off)
        #[arg(long, default_value_t = 0)]
        autosave_every: usize,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// JSON keyframe document
    Json,
    /// Host script of setValueAtTime calls
    Script,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Keyframes {
            csv,
            line_height,
            hold_epsilon,
            frame_width,
            frame_height,
            format,
            out,
        } => {
            let overrides = Overrides {
                line_height,
                hold_epsilon,
                frame_width,
                frame_height,
            };
            cmd_keyframes(&expand_path(&csv), &overrides, format, out.as_deref().map(expand_path))
        }
        Commands::Srt { folder, out } => cmd_srt(&expand_path(&folder), &expand_path(&out)),
        Commands::Shift { folder, seconds } => cmd_shift(&expand_path(&folder), seconds),
        Commands::Tap {
            lyrics,
            out,
            offset,
            countdown,
            autosave_every,
        } => cmd_tap(&expand_path(&lyrics), &expand_path(&out), offset, countdown, autosave_every),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Command-line values that win over the environment.
struct Overrides {
    line_height: Option<f64>,
    hold_epsilon: Option<f64>,
    frame_width: Option<f64>,
    frame_height: Option<f64>,
}

impl Overrides {
    fn apply_to(&self, config: &mut Config) {
        if let Some(v) = self.line_height {
            config.line_height = v;
        }
        if let Some(v) = self.hold_epsilon {
            config.hold_epsilon = v;
        }
        if let Some(v) = self.frame_width {
            config.frame.width = v;
        }
        if let Some(v) = self.frame_height {
            config.frame.height = v;
        }
    }
}

fn cmd_keyframes(
    csv: &Path,
    overrides: &Overrides,
    format: OutputFormat,
    out: Option<PathBuf>,
) -> Result<()> {
    let mut config = Config::load()?;
    overrides.apply_to(&mut config);

    let parsed = load_lyrics_csv(csv)?;
    let timeline = config.timeline_for(parsed.events.len());
    let keyframes = build_keyframes(&parsed.events, &timeline)
        .with_context(|| format!("building keyframes for {}", csv.display()))?;

    if keyframes.is_empty() {
        tracing::info!("No lyric lines in {}; the text layer stays static", csv.display());
    }

    match format {
        OutputFormat::Json => {
            let mut sink = JsonSink::new(&timeline);
            apply(&keyframes, &mut sink)?;
            match out {
                Some(path) => sink.write_to(&path)?,
                None => println!("{}", sink.to_json()?),
            }
        }
        OutputFormat::Script => {
            let writer: Box<dyn Write> = match &out {
                Some(path) => Box::new(io::BufWriter::new(
                    fs_err::File::create(path).with_context(|| format!("creating {}", path.display()))?,
                )),
                None => Box::new(io::stdout().lock()),
            };
            let mut sink = ScriptSink::new(writer, "position", DEFAULT_PROPERTY_BINDING)?;
            let applied = apply(&keyframes, &mut sink)?;
            sink.finish()?;
            tracing::info!("Wrote {applied} setValueAtTime calls");
        }
    }

    Ok(())
}

fn cmd_srt(folder: &Path, out: &Path) -> Result<()> {
    if !folder.is_dir() {
        anyhow::bail!("Input folder not found: {}", folder.display());
    }
    let cues = merge_folder_to_srt(folder, out)?;
    println!("Wrote {} with {cues} cues.", out.display());
    Ok(())
}

fn cmd_shift(folder: &Path, seconds: f64) -> Result<()> {
    let reports = shift_folder(folder, seconds)?;
    for report in &reports {
        let name = report
            .path
            .file_name()
            .map_or_else(|| report.path.display().to_string(), |n| n.to_string_lossy().to_string());
        println!("Processed {name}");
    }
    if reports.is_empty() {
        println!("No .csv files in {}", folder.display());
    }
    Ok(())
}

const TAP_HELP: &str = "ENTER mark | u undo | p pause/resume | q abort+save";

fn cmd_tap(lyrics: &Path, out: &Path, offset: f64, countdown: u64, autosave_every: usize) -> Result<()> {
    let text = fs_err::read_to_string(lyrics)?;
    let lines = load_tap_lyrics(&text)?;
    println!("Lyrics: {} lines -> {}", lines.len(), out.display());

    for n in (1..=countdown).rev() {
        println!("{n} …");
        thread::sleep(Duration::from_secs(1));
    }
    if countdown > 0 {
        println!("Go!");
    }

    let mut session = TapSession::new(lines, SystemClock::new());
    let stdin = io::stdin();
    let mut input = stdin.lock().lines();

    while let Some(line) = session.current_line() {
        println!("\n---");
        println!("Line {}/{}: \"{line}\"", session.position() + 1, session.len());
        println!("{TAP_HELP}");

        let Some(raw) = input.next().transpose()? else {
            println!("Input closed; saving current results…");
            break;
        };

        match session.handle(TapCommand::parse(&raw)) {
            TapOutcome::Marked { time, .. } => {
                println!("Marked {time:.3}s");
                if session.autosave_due(autosave_every) {
                    match fs_err::write(out, session.render_csv(offset)) {
                        Ok(()) => println!("(Autosaved {} lines to {})", session.stamps().len(), out.display()),
                        Err(e) => println!("(Autosave failed: {e})"),
                    }
                }
            }
            TapOutcome::Undone(event) => println!("Undid {:.3}s -> {:?}", event.start_time, event.text),
            TapOutcome::NothingToUndo => println!("Nothing to undo."),
            TapOutcome::Paused => println!("Pausing…"),
            TapOutcome::Resumed => println!("Resuming…"),
            TapOutcome::IgnoredWhilePaused => println!("You are paused. Press p to resume, then tap."),
            TapOutcome::Quit => {
                println!("Aborting and saving partial results…");
                break;
            }
        }
    }

    fs_err::write(out, session.render_csv(offset))?;
    println!("\nSaved {} lines to {}", session.stamps().len(), out.display());
    Ok(())
}
