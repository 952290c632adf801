//! CLI argument definitions using Clap

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// HearSay - interactive audio language lessons in the terminal
#[derive(Parser, Debug)]
#[command(name = "hearsay")]
#[command(version)]
#[command(about = "Play short listening and speaking lessons in the terminal")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Play a lesson
    Play {
        /// Lesson id, or path to a lesson JSON file
        lesson: String,

        /// Directory holding lesson JSON files
        #[arg(long, value_name = "DIR")]
        lessons_dir: Option<String>,

        /// Use silent audio adapters (no speaker or microphone)
        #[arg(short, long)]
        mute: bool,

        /// Start each step's audio without waiting for a play command
        #[arg(short, long)]
        autoplay: bool,

        /// Write the attempt summary JSON to a file
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,
    },

    /// List available lessons
    List {
        /// Directory holding lesson JSON files
        #[arg(long, value_name = "DIR")]
        lessons_dir: Option<String>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// Parsed play options after config merging
#[derive(Debug, Clone)]
pub struct PlayOptions {
    pub lesson: String,
    pub lessons_dir: String,
    pub mute: bool,
    pub autoplay: bool,
    pub out: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_parses_play() {
        let cli = Cli::parse_from(["hearsay", "play", "3"]);
        match cli.command {
            Commands::Play {
                lesson,
                lessons_dir,
                mute,
                autoplay,
                out,
            } => {
                assert_eq!(lesson, "3");
                assert!(lessons_dir.is_none());
                assert!(!mute);
                assert!(!autoplay);
                assert!(out.is_none());
            }
            other => panic!("expected play command, got {:?}", other),
        }
    }

    #[test]
    fn cli_parses_play_flags() {
        let cli = Cli::parse_from([
            "hearsay",
            "play",
            "lesson.json",
            "--mute",
            "--autoplay",
            "--lessons-dir",
            "fixtures",
            "--out",
            "attempt.json",
        ]);
        match cli.command {
            Commands::Play {
                lesson,
                lessons_dir,
                mute,
                autoplay,
                out,
            } => {
                assert_eq!(lesson, "lesson.json");
                assert_eq!(lessons_dir.as_deref(), Some("fixtures"));
                assert!(mute);
                assert!(autoplay);
                assert_eq!(out, Some(PathBuf::from("attempt.json")));
            }
            other => panic!("expected play command, got {:?}", other),
        }
    }

    #[test]
    fn cli_parses_list() {
        let cli = Cli::parse_from(["hearsay", "list"]);
        assert!(matches!(
            cli.command,
            Commands::List { lessons_dir: None }
        ));
    }

    #[test]
    fn cli_parses_config_actions() {
        let cli = Cli::parse_from(["hearsay", "config", "init"]);
        assert!(matches!(
            cli.command,
            Commands::Config {
                action: ConfigAction::Init
            }
        ));

        let cli = Cli::parse_from(["hearsay", "config", "path"]);
        assert!(matches!(
            cli.command,
            Commands::Config {
                action: ConfigAction::Path
            }
        ));
    }

    #[test]
    fn verify_cli() {
        // Verify the CLI definition is valid
        Cli::command().debug_assert();
    }
}
