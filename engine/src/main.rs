//! Rocky binary entry point

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use rocky_engine::cli::{Cli, Command, ConfigAction};
use rocky_engine::config::Config;
use rocky_engine::{handlers, telemetry};

#[tokio::main]
async fn main() -> Result<()> {
    let Cli {
        json,
        log,
        config,
        command,
    } = Cli::parse();

    let config_path = match &config {
        Some(path) => path.clone(),
        None => Config::default_path()?,
    };

    match command {
        Command::Config { action } => {
            telemetry::init_telemetry_with_level(log.as_deref().unwrap_or("warn"));
            match action {
                ConfigAction::Show => handlers::handle_config_show(&config_path, json),
                ConfigAction::Validate => handlers::handle_config_validate(&config_path),
            }
        }
        Command::Run => {
            let config = load_config(&config)?;
            telemetry::init_telemetry_with_level(log.as_deref().unwrap_or(&config.core.log_level));
            handlers::handle_run(config).await
        }
        Command::Say { speaker, text } => {
            let config = load_config(&config)?;
            telemetry::init_telemetry_with_level(log.as_deref().unwrap_or(&config.core.log_level));
            handlers::handle_say(config, speaker, text, json).await
        }
    }
}

fn load_config(path_override: &Option<PathBuf>) -> Result<Config> {
    let config = match path_override {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load_or_create()?,
    };
    Ok(config)
}
