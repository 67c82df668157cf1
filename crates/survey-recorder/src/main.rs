//! `surveyrec` - CLI for survey-recorder
//!
//! This binary serves the survey form and provides helpers for inspecting the
//! record store and configuration.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use anyhow::Context;
use clap::Parser;

use survey_recorder::cli::{Cli, Command, ConfigCommand, InitCommand, StatusCommand};
use survey_recorder::{init_logging, server, Config, RecordStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbosity());

    let mut config = Config::load_from(cli.config.clone()).context("loading configuration")?;

    match cli.command {
        Command::Serve(serve_cmd) => {
            serve_cmd.apply(&mut config)?;
            server::serve(&config).await?;
            Ok(())
        }
        Command::Init(init_cmd) => handle_init(&config, &init_cmd),
        Command::Status(status_cmd) => handle_status(&config, &status_cmd),
        Command::Config(config_cmd) => handle_config(&config, config_cmd),
    }
}

fn handle_init(config: &Config, cmd: &InitCommand) -> anyhow::Result<()> {
    let path = cmd.data.clone().unwrap_or_else(|| config.data_path());
    let store = RecordStore::new(path);
    if store.ensure_initialized()? {
        println!("Created record store at {}", store.path().display());
    } else {
        println!("Record store already exists at {}", store.path().display());
    }
    Ok(())
}

fn handle_status(config: &Config, cmd: &StatusCommand) -> anyhow::Result<()> {
    let path = cmd.data.clone().unwrap_or_else(|| config.data_path());
    let stats = RecordStore::new(path).stats()?;

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        println!("surveyrec status");
        println!("----------------");
        println!("Record store:  {}", stats.path.display());
        println!(
            "Initialized:   {}",
            if stats.exists { "yes" } else { "no" }
        );
        println!("Size:          {} bytes", stats.size_bytes);
        println!("Responses:     {}", stats.responses);
    }
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Server]");
                println!("  Listen:             {}", config.server.listen);
                println!();
                println!("[Storage]");
                println!("  Data path:          {}", config.data_path().display());
                println!();
                println!("[Survey]");
                println!("  Strict numeric:     {}", config.survey.strict_numeric);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}
