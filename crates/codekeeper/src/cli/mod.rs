//! Command-line interface for codekeeper.
//!
//! This module provides the CLI structure for the `codekeep` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    AddCommand, ConfigCommand, DeleteCommand, EditCommand, ListCommand, LocateCommand,
    ModeCommand, NearbyCommand,
};

/// codekeep - keep venue access codes at hand
///
/// A local record keeper for venue access codes (restroom entry codes and
/// the like), with search, city grouping, and a proximity view based on
/// your current location.
#[derive(Debug, Parser)]
#[command(name = "codekeep")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Add a new entry
    Add(AddCommand),

    /// Edit an existing entry (wholesale replacement of its fields)
    Edit(EditCommand),

    /// Delete an entry
    Delete(DeleteCommand),

    /// List entries, most recently updated first
    List(ListCommand),

    /// List entries near the current location
    Nearby(NearbyCommand),

    /// Resolve and print the current location
    Locate(LocateCommand),

    /// View or change the display mode
    #[command(subcommand)]
    Mode(ModeCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_name() {
        let cli = Cli::command();
        assert_eq!(cli.get_name(), "codekeep");
    }

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbosity_quiet() {
        let cli = Cli::parse_from(["codekeep", "--quiet", "list"]);
        assert_eq!(cli.verbosity(), crate::logging::Verbosity::Quiet);
    }

    #[test]
    fn test_verbosity_levels() {
        let cli = Cli::parse_from(["codekeep", "list"]);
        assert_eq!(cli.verbosity(), crate::logging::Verbosity::Normal);

        let cli = Cli::parse_from(["codekeep", "-v", "list"]);
        assert_eq!(cli.verbosity(), crate::logging::Verbosity::Verbose);

        let cli = Cli::parse_from(["codekeep", "-vv", "list"]);
        assert_eq!(cli.verbosity(), crate::logging::Verbosity::Trace);
    }

    #[test]
    fn test_parse_add_command() {
        let cli = Cli::parse_from([
            "codekeep",
            "add",
            "--name",
            "Corner Cafe",
            "--address",
            "12 Main St, Brooklyn, NY",
            "--male-code",
            "1234",
        ]);
        match cli.command {
            Command::Add(cmd) => {
                assert_eq!(cmd.name, "Corner Cafe");
                assert_eq!(cmd.address.as_deref(), Some("12 Main St, Brooklyn, NY"));
                assert_eq!(cmd.male_code.as_deref(), Some("1234"));
                assert!(cmd.female_code.is_none());
                assert!(!cmd.here);
            }
            other => panic!("parsed wrong command: {other:?}"),
        }
    }

    #[test]
    fn test_lat_requires_lon() {
        let result = Cli::try_parse_from(["codekeep", "add", "--name", "X", "--lat", "40.0"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_here_conflicts_with_coordinates() {
        let result = Cli::try_parse_from([
            "codekeep", "add", "--name", "X", "--here", "--lat", "40.0", "--lon", "-74.0",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_nearby_with_radius() {
        let cli = Cli::parse_from(["codekeep", "nearby", "--radius", "10"]);
        match cli.command {
            Command::Nearby(cmd) => {
                assert_eq!(cmd.radius, Some(10.0));
                assert!(cmd.lat.is_none());
            }
            other => panic!("parsed wrong command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_mode_toggle() {
        let cli = Cli::parse_from(["codekeep", "mode", "toggle"]);
        assert!(matches!(cli.command, Command::Mode(ModeCommand::Toggle)));
    }
}
