//! Command-line interface for survey-recorder.
//!
//! This module provides the CLI structure for the `surveyrec` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{ConfigCommand, InitCommand, ServeCommand, StatusCommand};

use crate::config::Config;
use crate::logging::Verbosity;

/// surveyrec - Collect income and expense survey responses
///
/// Serves a short web form and appends every accepted response as a row to
/// a CSV file.
#[derive(Debug, Parser)]
#[command(name = "surveyrec")]
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
    /// Serve the survey form
    Serve(ServeCommand),

    /// Create the record store if it does not exist
    Init(InitCommand),

    /// Show record store status
    Status(StatusCommand),

    /// View or check configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else {
            match self.verbose {
                0 => Verbosity::Normal,
                1 => Verbosity::Verbose,
                _ => Verbosity::Trace,
            }
        }
    }
}

impl ServeCommand {
    /// Apply command-line overrides to a loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the resulting configuration is invalid.
    pub fn apply(&self, config: &mut Config) -> crate::Result<()> {
        if let Some(listen) = &self.listen {
            config.server.listen.clone_from(listen);
        }
        if let Some(data) = &self.data {
            config.storage.data_path = Some(data.clone());
        }
        if self.strict_numeric {
            config.survey.strict_numeric = true;
        }
        config.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn cli_with(verbose: u8, quiet: bool) -> Cli {
        Cli {
            config: None,
            verbose,
            quiet,
            command: Command::Status(StatusCommand {
                data: None,
                json: false,
            }),
        }
    }

    #[test]
    fn test_cli_name() {
        let cli = Cli::command();
        assert_eq!(cli.get_name(), "surveyrec");
    }

    #[test]
    fn test_verbosity_quiet() {
        assert_eq!(cli_with(0, true).verbosity(), Verbosity::Quiet);
    }

    #[test]
    fn test_verbosity_normal() {
        assert_eq!(cli_with(0, false).verbosity(), Verbosity::Normal);
    }

    #[test]
    fn test_verbosity_verbose() {
        assert_eq!(cli_with(1, false).verbosity(), Verbosity::Verbose);
    }

    #[test]
    fn test_verbosity_trace() {
        assert_eq!(cli_with(2, false).verbosity(), Verbosity::Trace);
    }

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_serve() {
        let args = vec!["surveyrec", "serve", "--listen", "0.0.0.0:8080"];
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Command::Serve(cmd) => assert_eq!(cmd.listen.as_deref(), Some("0.0.0.0:8080")),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_init_with_data() {
        let args = vec!["surveyrec", "init", "--data", "/tmp/out.csv"];
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Command::Init(cmd) => assert_eq!(cmd.data, Some(PathBuf::from("/tmp/out.csv"))),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_config_show() {
        let args = vec!["surveyrec", "config", "show", "--json"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert!(matches!(
            cli.command,
            Command::Config(ConfigCommand::Show { json: true })
        ));
    }

    #[test]
    fn test_parse_with_config() {
        let args = vec!["surveyrec", "-c", "/custom/config.toml", "status"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/custom/config.toml")));
    }

    #[test]
    fn test_parse_with_verbose() {
        let args = vec!["surveyrec", "-vv", "serve"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_serve_apply_overrides() {
        let cmd = ServeCommand {
            listen: Some("0.0.0.0:8080".to_string()),
            data: Some(PathBuf::from("/srv/responses.csv")),
            strict_numeric: true,
        };
        let mut config = Config::default();
        cmd.apply(&mut config).unwrap();

        assert_eq!(config.server.listen, "0.0.0.0:8080");
        assert_eq!(config.data_path(), PathBuf::from("/srv/responses.csv"));
        assert!(config.survey.strict_numeric);
    }

    #[test]
    fn test_serve_apply_rejects_bad_listen() {
        let cmd = ServeCommand {
            listen: Some("nope".to_string()),
            data: None,
            strict_numeric: false,
        };
        let mut config = Config::default();
        assert!(cmd.apply(&mut config).is_err());
    }
}
