//! timerbell - alarm playback and notification CLI for timer utilities
//!
//! When a countdown elsewhere reaches zero, this binary rings the alarm:
//! a looped clip bounded by a duration, plus a dismissible notification
//! that silences the clip immediately.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::Result;
use clap::{CommandFactory, Parser};

use timerbell::alarm::AlarmController;
use timerbell::cli::{Cli, Commands, Display, RingArgs};
use timerbell::notify::NotificationCoordinator;
use timerbell::types::AlarmConfig;

/// Interval at which the ring command polls for silence.
const WAIT_INTERVAL: Duration = Duration::from_millis(100);

/// Main entry point
fn main() {
    // Initialize logging
    init_tracing();

    // Parse command line arguments
    let cli = Cli::parse();

    // Execute command
    if let Err(e) = execute(cli) {
        Display::show_error(&e.to_string());
        std::process::exit(1);
    }
}

/// Initializes the tracing subscriber for logging.
fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();
}

/// Executes the CLI command.
fn execute(cli: Cli) -> Result<()> {
    if cli.verbose {
        tracing::info!("Verbose mode enabled");
    }

    match cli.command {
        Commands::Ring(args) => ring(args),
        Commands::List(args) => {
            let controller = AlarmController::new(args.sounds_dir);
            Display::show_clips(&controller.available_clips());
            Ok(())
        }
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
            Ok(())
        }
    }
}

/// Rings the alarm: starts looped playback, shows the notification wired to
/// stop it, then waits until either the deadline or a dismissal silences it.
fn ring(args: RingArgs) -> Result<()> {
    let mut config = AlarmConfig::default()
        .with_sound_enabled(!args.no_sound)
        .with_duration_seconds(args.duration);
    if let Some(path) = &args.clip_path {
        config = config.with_custom_clip_path(path);
    }

    let controller = Arc::new(AlarmController::new(args.sounds_dir));
    let coordinator = NotificationCoordinator::new();

    if config.sound_enabled {
        let clip = config.clip_identifier(&args.clip);
        controller.start(&clip, config.clamped_duration());
        Display::show_ring_started(&clip, config.duration_seconds);
    }

    {
        let controller = Arc::clone(&controller);
        coordinator.show(&args.title, &args.message, move || controller.stop());
    }

    while controller.is_ringing() {
        thread::sleep(WAIT_INTERVAL);
    }

    Display::show_ring_finished();
    Ok(())
}
