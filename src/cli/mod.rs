//! CLI command definitions for lui-config
//!
//! This module defines the CLI structure using clap's derive macros.
//! The main entry point is the `Cli` struct which contains subcommands.

use clap::{Parser, Subcommand};

/// Inspect an NSPanel Lovelace UI panel configuration
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file (default: $LUI_CONFIG_PATH, ./apps.yaml, user config dir)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// App section to read from the file (e.g. `nspanel-1` in apps.yaml)
    #[arg(short, long, global = true)]
    pub section: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Logging output: 0/off, 1/stdout, 2/stderr (default), or filename
    #[arg(short, long, default_value = "2", global = true)]
    pub log: String,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Summarize cards, navigation order and screensaver (default)
    Show,

    /// Print the value at a dotted path, falling back to the defaults
    Get {
        /// Dotted path, e.g. `screensaver.entity`
        path: String,
    },

    /// Find a card by id, slug or key (a `navigate.` prefix is accepted)
    Search {
        target: String,
    },

    /// List every entity reference used by the panel
    Entities,

    /// Resolve the card shown after the screensaver
    DefaultCard {
        /// Template variable for `{{ name }}` placeholders, as name=value
        #[arg(long = "var", value_parser = parse_var)]
        vars: Vec<(String, String)>,
    },

    /// Card after the given one in navigation order
    Next {
        target: String,
    },

    /// Card before the given one in navigation order
    Prev {
        target: String,
    },
}

/// Parse a `name=value` pair.
fn parse_var(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(name, value)| (name.trim().to_string(), value.to_string()))
        .ok_or_else(|| format!("expected name=value, got '{s}'"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_var() {
        assert_eq!(
            parse_var("room=kitchen"),
            Ok(("room".to_string(), "kitchen".to_string()))
        );
        assert!(parse_var("room").is_err());
    }

    #[test]
    fn test_cli_parses_subcommands() {
        let cli = Cli::parse_from(["lui-config", "-c", "apps.yaml", "search", "navigate.a_k2"]);
        assert_eq!(cli.config.as_deref(), Some("apps.yaml"));
        assert!(matches!(cli.command, Some(Command::Search { ref target }) if target == "navigate.a_k2"));

        let cli = Cli::parse_from(["lui-config", "default-card", "--var", "room=den"]);
        match cli.command {
            Some(Command::DefaultCard { vars }) => {
                assert_eq!(vars, vec![("room".to_string(), "den".to_string())]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
