//! CLI interface
//!
//! Command-line surface of the `rocky` binary, built with clap derive.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "rocky",
    about = "Conversational tool-calling bridge between in-world chat and a remote reasoning agent",
    version
)]
pub struct Cli {
    /// Emit command output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Log level override (error, warn, info, debug, trace)
    #[arg(long, global = true)]
    pub log: Option<String>,

    /// Path to the config file (default: ~/.rocky/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the chat bridge and process utterances until interrupted
    Run,

    /// Send a single utterance and print the agent's reply
    Say {
        /// Speaker name to attribute the utterance to
        #[arg(long)]
        speaker: Option<String>,

        /// The utterance text
        text: String,
    },

    /// Inspect or validate the configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the resolved configuration
    Show,

    /// Check the config file for errors
    Validate,
}
