//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Serve command arguments.
#[derive(Debug, Args)]
pub struct ServeCommand {
    /// Address to listen on (overrides `server.listen`)
    #[arg(short, long, value_name = "ADDR")]
    pub listen: Option<String>,

    /// Record store file (overrides `storage.data_path`)
    #[arg(short, long, value_name = "FILE")]
    pub data: Option<PathBuf>,

    /// Reject unparseable age or income with 400 instead of 500
    #[arg(long)]
    pub strict_numeric: bool,
}

/// Init command arguments.
#[derive(Debug, Args)]
pub struct InitCommand {
    /// Record store file (overrides `storage.data_path`)
    #[arg(short, long, value_name = "FILE")]
    pub data: Option<PathBuf>,
}

/// Status command arguments.
#[derive(Debug, Args)]
pub struct StatusCommand {
    /// Record store file (overrides `storage.data_path`)
    #[arg(short, long, value_name = "FILE")]
    pub data: Option<PathBuf>,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}
