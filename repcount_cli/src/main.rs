use clap::{Parser, Subcommand};
use repcount_core::*;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "repcount")]
#[command(about = "Exercise repetition counter for pose landmark streams", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Load configuration from this file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a captured frame log and count reps
    Replay {
        /// JSON Lines file with one landmark frame per line
        frames: PathBuf,

        /// Exercise being performed (squat, pushup, bicep_curl, generic)
        #[arg(long, short)]
        exercise: String,

        /// Also write every rep event to this CSV file
        #[arg(long)]
        events_csv: Option<PathBuf>,
    },

    /// One-shot posture check on a single frame
    Check {
        /// JSON file holding one landmark frame
        frame: PathBuf,

        /// Exercise about to be performed
        #[arg(long, short)]
        exercise: String,
    },

    /// Show the effective threshold table
    Thresholds,
}

fn main() -> Result<()> {
    // Initialize logging
    repcount_core::logging::init();

    let cli = Cli::parse();

    let config = match cli.config {
        Some(ref path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let engine = Engine::new(&config)?;

    match cli.command {
        Commands::Replay {
            frames,
            exercise,
            events_csv,
        } => cmd_replay(engine, &frames, &exercise, events_csv.as_deref()),
        Commands::Check { frame, exercise } => cmd_check(&engine, &frame, &exercise),
        Commands::Thresholds => {
            cmd_thresholds(&engine);
            Ok(())
        }
    }
}

fn cmd_replay(engine: Engine, frames_path: &Path, exercise: &str, events_csv: Option<&Path>) -> Result<()> {
    let kind: ExerciseKind = exercise.parse()?;
    let frames = read_frames(frames_path)?;

    if engine.profile(kind).is_none() {
        println!("Note: {} has no rep-counting rule; reps will not be counted.", kind);
    }

    let mut monitor = Monitor::new(engine);
    monitor.start(kind)?;

    let mut events = Vec::new();
    for frame in &frames {
        let Some(outcome) = monitor.process_frame(frame) else {
            break;
        };

        if let Some(event) = &outcome.rep {
            println!(
                "{:>9.0} ms  rep {:>3}  set {}",
                event.timestamp_ms, event.reps, event.sets
            );
        }
        if let Some(feedback) = outcome.feedback {
            println!("              {}", feedback);
        }
        if let Some(event) = outcome.rep {
            if event.completes_set {
                println!(
                    "              Set complete! Moving to set {}",
                    event.sets
                );
            }
            events.push(event);
        }
    }

    let Some(summary) = monitor.stop() else {
        return Err(Error::Monitor("monitor was not running".into()));
    };

    println!();
    println!("✓ {}", summary);
    println!(
        "  Frames: {} ({} skipped)",
        summary.frames_processed, summary.frames_skipped
    );
    tracing::debug!(
        started = %summary.started_at.to_rfc3339(),
        elapsed_s = summary.duration_seconds(),
        "Replay finished"
    );

    if let Some(path) = events_csv {
        let count = write_rep_events(path, &events)?;
        println!("  Exported {} reps to {}", count, path.display());
    }

    Ok(())
}

fn cmd_check(engine: &Engine, frame_path: &Path, exercise: &str) -> Result<()> {
    let kind: ExerciseKind = exercise.parse()?;
    let frame = read_frame(frame_path)?;

    let verdict = engine.quick_check(kind, &frame);
    println!("{}", verdict);
    Ok(())
}

fn cmd_thresholds(engine: &Engine) {
    println!("{:<12} {:>8} {:>8}  {}", "exercise", "down", "up", "feedback");
    for kind in ExerciseKind::ALL {
        match engine.profile(kind) {
            Some(profile) => println!(
                "{:<12} {:>7.1}° {:>7.1}°  {}",
                kind,
                profile.thresholds.down(),
                profile.thresholds.up(),
                if profile.feedback_on_rep { "yes" } else { "no" }
            ),
            None => println!("{:<12} {:>8} {:>8}  {}", kind, "-", "-", "no rule"),
        }
    }
    println!();
    println!("Set size: {} reps", engine.set_size());
}
