//! Command definitions for the timerbell CLI.
//!
//! Uses clap derive macro for argument parsing.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

// ============================================================================
// CLI Structure
// ============================================================================

/// timerbell - alarm playback and notifications for timer utilities
#[derive(Parser, Debug)]
#[command(
    name = "timerbell",
    version,
    about = "タイマー用アラーム再生・通知CLI",
    long_about = "カウントダウン満了時のアラームを担当するツール。\n\
                  アラーム音は指定時間ループ再生され、通知を閉じると直ちに停止します。",
    propagate_version = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

// ============================================================================
// Subcommands
// ============================================================================

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Ring the alarm: looped playback plus a dismissible notification
    Ring(RingArgs),

    /// List the available alarm clips
    List(ListArgs),

    /// Generate shell completion scripts
    Completions {
        /// Shell type for completion script
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ============================================================================
// Ring Command Arguments
// ============================================================================

/// Arguments for the ring command
#[derive(Args, Debug, Clone)]
pub struct RingArgs {
    /// Clip to play, by file name within the sounds directory
    #[arg(short, long, default_value = "default.wav")]
    pub clip: String,

    /// Full path to a clip file overriding --clip
    #[arg(long)]
    pub clip_path: Option<PathBuf>,

    /// Alarm duration in seconds (1-30)
    #[arg(
        short,
        long,
        default_value = "10",
        value_parser = clap::value_parser!(u32).range(1..=30)
    )]
    pub duration: u32,

    /// Notification title
    #[arg(long, default_value = "タイマー終了")]
    pub title: String,

    /// Notification message
    #[arg(long, default_value = "タイマーが終了しました")]
    pub message: String,

    /// Directory holding the alarm clips
    #[arg(long, default_value = "sounds")]
    pub sounds_dir: PathBuf,

    /// Disable the audible alarm (notification only)
    #[arg(long)]
    pub no_sound: bool,
}

// ============================================================================
// List Command Arguments
// ============================================================================

/// Arguments for the list command
#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    /// Directory holding the alarm clips
    #[arg(long, default_value = "sounds")]
    pub sounds_dir: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_structure() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_ring_defaults() {
        let cli = Cli::try_parse_from(["timerbell", "ring"]).unwrap();
        match cli.command {
            Commands::Ring(args) => {
                assert_eq!(args.clip, "default.wav");
                assert_eq!(args.duration, 10);
                assert_eq!(args.sounds_dir, PathBuf::from("sounds"));
                assert!(!args.no_sound);
                assert!(args.clip_path.is_none());
            }
            _ => panic!("expected ring command"),
        }
    }

    #[test]
    fn test_parse_ring_arguments() {
        let cli = Cli::try_parse_from([
            "timerbell",
            "ring",
            "--clip",
            "beep.wav",
            "--duration",
            "3",
            "--sounds-dir",
            "/tmp/sounds",
            "--no-sound",
        ])
        .unwrap();
        match cli.command {
            Commands::Ring(args) => {
                assert_eq!(args.clip, "beep.wav");
                assert_eq!(args.duration, 3);
                assert_eq!(args.sounds_dir, PathBuf::from("/tmp/sounds"));
                assert!(args.no_sound);
            }
            _ => panic!("expected ring command"),
        }
    }

    #[test]
    fn test_parse_ring_rejects_out_of_range_duration() {
        assert!(Cli::try_parse_from(["timerbell", "ring", "--duration", "0"]).is_err());
        assert!(Cli::try_parse_from(["timerbell", "ring", "--duration", "31"]).is_err());
    }

    #[test]
    fn test_parse_list() {
        let cli = Cli::try_parse_from(["timerbell", "list", "--sounds-dir", "/tmp/x"]).unwrap();
        match cli.command {
            Commands::List(args) => assert_eq!(args.sounds_dir, PathBuf::from("/tmp/x")),
            _ => panic!("expected list command"),
        }
    }

    #[test]
    fn test_no_subcommand_is_error() {
        assert!(Cli::try_parse_from(["timerbell"]).is_err());
    }
}
