//! Configuration management
//!
//! This module handles loading, validation, and management of the Rocky
//! configuration. Configuration is stored in TOML format at
//! ~/.rocky/config.toml.
//!
//! # Configuration Sections
//!
//! - **core**: Log level, default speaker name
//! - **agent**: Remote reasoning agent identity and endpoint
//! - **minecraft**: World connection settings consumed by the actuator
//! - **tools**: Tool group enablement flags
//!
//! # Path Expansion
//!
//! The configuration system expands `~` to the user's home directory when
//! resolving the config file location.
//!
//! # Examples
//!
//! ```no_run
//! use rocky_engine::config::Config;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::load_or_create()?;
//! println!("Agent: {}", config.agent.agent_id);
//! # Ok(())
//! # }
//! ```

use sdk::errors::AgentError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure
///
/// Represents the complete Rocky configuration loaded from
/// ~/.rocky/config.toml.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Core engine settings
    #[serde(default)]
    pub core: CoreConfig,

    /// Remote agent configuration
    pub agent: AgentConfig,

    /// World connection settings (passed through to the actuator)
    #[serde(default)]
    pub minecraft: MinecraftConfig,

    /// Tool group enablement
    #[serde(default)]
    pub tools: ToolsConfig,
}

/// Core engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoreConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Speaker name used for utterances submitted from the CLI
    #[serde(default = "default_speaker")]
    pub default_speaker: String,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            default_speaker: default_speaker(),
        }
    }
}

/// Remote reasoning agent configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Base URL of the agent runtime service
    #[serde(default = "default_agent_base_url")]
    pub base_url: String,

    /// Agent identifier
    pub agent_id: String,

    /// Agent alias identifier
    pub agent_alias_id: String,

    /// Maximum tool-call rounds per turn
    #[serde(default = "default_max_rounds")]
    pub max_rounds: usize,

    /// Per-round request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// World connection configuration, consumed by the external actuator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MinecraftConfig {
    /// Server host
    #[serde(default = "default_mc_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_mc_port")]
    pub port: u16,

    /// Bot username
    #[serde(default = "default_mc_username")]
    pub username: String,

    /// Authentication mode ("offline" or "microsoft")
    #[serde(default = "default_mc_auth")]
    pub auth: String,

    /// Protocol version
    #[serde(default = "default_mc_version")]
    pub version: String,
}

impl Default for MinecraftConfig {
    fn default() -> Self {
        Self {
            host: default_mc_host(),
            port: default_mc_port(),
            username: default_mc_username(),
            auth: default_mc_auth(),
            version: default_mc_version(),
        }
    }
}

/// Tool group enablement configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolsConfig {
    /// Enable movement tools (jump, move to location)
    #[serde(default = "default_true")]
    pub movement: bool,

    /// Enable world query tools (time, weather, locations, entities)
    #[serde(default = "default_true")]
    pub world: bool,

    /// Enable combat tools
    #[serde(default)]
    pub combat: bool,

    /// Enable digging / collecting / building tools
    #[serde(default = "default_true")]
    pub building: bool,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            movement: default_true(),
            world: default_true(),
            combat: false,
            building: default_true(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_speaker() -> String {
    "console".to_string()
}

fn default_agent_base_url() -> String {
    "http://localhost:9400".to_string()
}

fn default_max_rounds() -> usize {
    8
}

fn default_timeout_secs() -> u64 {
    120
}

fn default_mc_host() -> String {
    "127.0.0.1".to_string()
}

fn default_mc_port() -> u16 {
    25565
}

fn default_mc_username() -> String {
    "Rocky".to_string()
}

fn default_mc_auth() -> String {
    "offline".to_string()
}

fn default_mc_version() -> String {
    "1.20.1".to_string()
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load configuration from the default location, creating a starter
    /// file if none exists.
    pub fn load_or_create() -> Result<Self, AgentError> {
        let path = Self::default_path()?;
        if !path.exists() {
            let starter = Self::starter_toml();
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&path, starter)?;
            tracing::info!("Created starter config at {:?}", path);
        }
        Self::load_from_path(&path)
    }

    /// Load configuration from an explicit path.
    pub fn load_from_path(path: &Path) -> Result<Self, AgentError> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| AgentError::Config(format!("failed to parse {:?}: {}", path, e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Default configuration file location: ~/.rocky/config.toml
    pub fn default_path() -> Result<PathBuf, AgentError> {
        let home = dirs::home_dir()
            .ok_or_else(|| AgentError::Config("cannot determine home directory".to_string()))?;
        Ok(home.join(".rocky").join("config.toml"))
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), AgentError> {
        if self.agent.agent_id.trim().is_empty() {
            return Err(AgentError::Config("agent.agent_id must be set".to_string()));
        }
        if self.agent.agent_alias_id.trim().is_empty() {
            return Err(AgentError::Config(
                "agent.agent_alias_id must be set".to_string(),
            ));
        }
        if self.agent.max_rounds == 0 {
            return Err(AgentError::Config(
                "agent.max_rounds must be at least 1".to_string(),
            ));
        }
        if !self.agent.base_url.starts_with("http://") && !self.agent.base_url.starts_with("https://")
        {
            return Err(AgentError::Config(format!(
                "agent.base_url must be an http(s) URL, got '{}'",
                self.agent.base_url
            )));
        }

        let valid_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_levels.contains(&self.core.log_level.as_str()) {
            return Err(AgentError::Config(format!(
                "core.log_level must be one of {:?}, got '{}'",
                valid_levels, self.core.log_level
            )));
        }

        Ok(())
    }

    /// Starter config written on first run.
    fn starter_toml() -> &'static str {
        r#"[core]
log_level = "info"
default_speaker = "console"

[agent]
base_url = "http://localhost:9400"
agent_id = "CHANGE_ME"
agent_alias_id = "CHANGE_ME"
max_rounds = 8
timeout_secs = 120

[minecraft]
host = "127.0.0.1"
port = 25565
username = "Rocky"
auth = "offline"
version = "1.20.1"

[tools]
movement = true
world = true
combat = false
building = true
"#
    }
}
