//! Command-line interface for forca.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use forca::Difficulty;

/// Forca - hangman in the terminal with AI-generated words
#[derive(Parser, Debug)]
#[command(name = "forca")]
#[command(about = "Hangman game with AI-generated words", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play in the terminal UI
    Play {
        /// Path to a TOML config file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// File receiving the logs while the UI owns the terminal
        #[arg(long, default_value = "forca.log")]
        log_file: PathBuf,
    },

    /// Generate one word and print it as JSON
    Word {
        /// Topic for the word; random when absent
        #[arg(short, long)]
        topic: Option<String>,

        /// Word difficulty
        #[arg(short, long, value_enum, default_value_t = Difficulty::Medium)]
        difficulty: Difficulty,

        /// Fail instead of printing a fallback word
        #[arg(long)]
        strict: bool,

        /// Path to a TOML config file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_defaults() {
        let cli = Cli::parse_from(["forca", "word"]);
        match cli.command {
            Command::Word {
                topic,
                difficulty,
                strict,
                config,
            } => {
                assert_eq!(topic, None);
                assert_eq!(difficulty, Difficulty::Medium);
                assert!(!strict);
                assert_eq!(config, None);
            }
            Command::Play { .. } => panic!("expected word command"),
        }
    }

    #[test]
    fn test_play_log_file() {
        let cli = Cli::parse_from(["forca", "play", "--log-file", "x.log"]);
        assert!(matches!(cli.command, Command::Play { log_file, .. } if log_file == PathBuf::from("x.log")));
    }

    #[test]
    fn test_difficulty_values() {
        let cli = Cli::parse_from(["forca", "word", "-d", "hard", "-t", "Roma"]);
        assert!(matches!(
            cli.command,
            Command::Word { difficulty: Difficulty::Hard, topic: Some(_), .. }
        ));
    }
}
