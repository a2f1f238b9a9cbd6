//! Application orchestration.
//!
//! Parses the command line, sets up logging and configuration, loads the audio
//! file and runs the visualization until the user quits.

use crate::audio::SampleSource;
use crate::config::VisualizerConfig;
use crate::logging;
use crate::visualizer::{Session, TerminalSurface};
use anyhow::anyhow;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use clap_complete::{generate, Shell};
use signal_hook::consts::{SIGINT, SIGTERM};
use std::io;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

/// Real-time stereo bar-graph visualizer for WAV files
#[derive(Parser)]
#[command(name = "stereobars")]
#[command(version)]
#[command(
    long_about = "Real-time stereo bar-graph visualizer for WAV files.\n\nThe left channel is drawn upward and the right channel downward from the\nmiddle of the screen. Playback loops until you press q, Escape or Ctrl+C."
)]
#[command(
    after_help = "CONFIGURATION:\n    Config file:        ~/.config/stereobars/stereobars.toml\n    Logs:               ~/.local/state/stereobars/stereobars.log.*"
)]
struct Cli {
    /// Path to a PCM WAV file
    #[arg(value_name = "FILE", required_unless_present = "completions")]
    file: Option<PathBuf>,

    /// Read settings from this TOML file instead of the default location
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Print a shell completion script and exit
    #[arg(long, value_enum, value_name = "SHELL", exclusive = true)]
    completions: Option<Shell>,
}

/// Runs the visualizer based on command-line arguments.
///
/// # Exit Codes
/// - 0: Quit by the user
/// - 1: Configuration, decode or terminal error
/// - 2: Usage error (handled by clap)
///
/// # Errors
/// - If logging initialization fails
/// - If the configuration is invalid
/// - If the audio file cannot be loaded
/// - If the terminal cannot be set up or drawn to
pub fn run() -> Result<(), anyhow::Error> {
    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        generate(shell, &mut Cli::command(), "stereobars", &mut io::stdout());
        return Ok(());
    }

    let Some(file) = cli.file else {
        Cli::command()
            .error(ErrorKind::MissingRequiredArgument, "no audio file given")
            .exit();
    };

    logging::init_logging()?;
    tracing::info!("=== stereobars Started ===");

    let config = VisualizerConfig::load(cli.config.as_deref()).map_err(|e| {
        tracing::error!("Failed to load configuration: {e:#}");
        e
    })?;

    tracing::info!(
        "Display: {}x{} canvas, {} bars, {} fps, {} samples per frame",
        config.display.width,
        config.display.height,
        config.display.bar_count,
        config.display.fps,
        config.display.frame_size
    );

    let source = SampleSource::load(&file).map_err(|e| {
        tracing::error!("Failed to load audio: {e}");
        e
    })?;

    let quit_signal = Arc::new(AtomicBool::new(false));
    for signal in [SIGINT, SIGTERM] {
        signal_hook::flag::register(signal, Arc::clone(&quit_signal))
            .map_err(|e| anyhow!("Failed to register signal handler: {e}"))?;
    }

    let mut surface = TerminalSurface::new(&config, quit_signal)
        .map_err(|e| anyhow!("Failed to initialize terminal: {e}"))?;
    let mut session = Session::new(source, &config);

    let result = session.run(&mut surface);
    surface
        .cleanup()
        .map_err(|e| anyhow!("Cleanup failed: {e}"))?;

    let summary = result.map_err(|e| {
        tracing::error!("Display loop failed: {e:#}");
        e
    })?;

    tracing::info!(
        "=== stereobars Exited: {} ticks, {} frames, {} loops ===",
        summary.ticks,
        summary.frames,
        summary.loops
    );
    Ok(())
}
