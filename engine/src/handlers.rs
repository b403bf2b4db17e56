//! Command handlers
//!
//! One function per CLI subcommand. Handlers wire the config, the HTTP
//! client, the tool registry, and the chat bridge together and own the
//! process lifecycle for their command.

use anyhow::{Context, Result};
use async_trait::async_trait;
use sdk::actuator::{Actuator, ActuatorError, Position, Sighting};
use std::path::Path;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use crate::agent::{SessionManager, TurnExecutor};
use crate::chat::{ChatBridge, ChatMessage};
use crate::config::Config;
use crate::remote::http::HttpAgentClient;
use crate::remote::AgentClient;
use crate::tools::ToolRegistry;

/// Actuator used when no world client is linked in.
///
/// Chat output goes to stdout; every world action reports itself as
/// unavailable, which flows back to the agent as a soft tool failure. A
/// real deployment swaps this for a game-client implementation of the
/// `Actuator` trait.
struct OfflineActuator;

impl OfflineActuator {
    fn offline<T>() -> Result<T, ActuatorError> {
        Err(ActuatorError::Unavailable(
            "no world client connected".to_string(),
        ))
    }
}

#[async_trait]
impl Actuator for OfflineActuator {
    async fn say(&self, message: &str) -> Result<(), ActuatorError> {
        println!("[rocky] {}", message);
        Ok(())
    }

    async fn jump(&self) -> Result<(), ActuatorError> {
        Self::offline()
    }

    async fn halt(&self) -> Result<(), ActuatorError> {
        Ok(())
    }

    async fn time_of_day(&self) -> Result<String, ActuatorError> {
        Self::offline()
    }

    async fn is_raining(&self) -> Result<bool, ActuatorError> {
        Self::offline()
    }

    async fn player_location(&self, _player_name: &str) -> Result<Option<Position>, ActuatorError> {
        Self::offline()
    }

    async fn move_to(&self, _target: Position, _range: f64) -> Result<(), ActuatorError> {
        Self::offline()
    }

    async fn find_entity(&self, _entity_name: &str) -> Result<Option<Sighting>, ActuatorError> {
        Self::offline()
    }

    async fn attack_nearest(&self, _entity_name: &str) -> Result<Option<String>, ActuatorError> {
        Self::offline()
    }

    async fn collect_blocks(&self, _block_type: &str, _count: u32) -> Result<u32, ActuatorError> {
        Self::offline()
    }

    async fn excavate(&self, _depth: u32, _width: u32) -> Result<(), ActuatorError> {
        Self::offline()
    }

    async fn build_structure(&self, _description: &str) -> Result<String, ActuatorError> {
        Self::offline()
    }
}

struct Wiring {
    bridge: ChatBridge,
    outbound_rx: mpsc::Receiver<String>,
}

fn wire(config: &Config, actuator: Arc<dyn Actuator>) -> Result<Wiring> {
    let client: Arc<dyn AgentClient> = Arc::new(
        HttpAgentClient::new(&config.agent).context("failed to build the agent HTTP client")?,
    );
    let session = Arc::new(SessionManager::new());
    let registry = Arc::new(ToolRegistry::from_config(
        &config.tools,
        Arc::clone(&actuator),
    ));
    tracing::info!(tools = ?registry.available_tool_names(), "tool registry ready");

    let executor = Arc::new(TurnExecutor::new(
        client,
        registry,
        Arc::clone(&session),
        config.agent.max_rounds,
    ));

    let (outbound_tx, outbound_rx) = mpsc::channel(32);
    let bridge = ChatBridge::new(
        executor,
        session,
        actuator,
        config.minecraft.username.clone(),
        outbound_tx,
    );
    Ok(Wiring {
        bridge,
        outbound_rx,
    })
}

/// `rocky run`: start the bridge and feed it utterances from stdin.
pub async fn handle_run(config: Config) -> Result<()> {
    let actuator: Arc<dyn Actuator> = Arc::new(OfflineActuator);
    let Wiring {
        bridge,
        mut outbound_rx,
    } = wire(&config, Arc::clone(&actuator))?;

    // Outbound text goes back into world chat.
    let chat_actuator = Arc::clone(&actuator);
    tokio::spawn(async move {
        while let Some(text) = outbound_rx.recv().await {
            if let Err(e) = chat_actuator.say(&text).await {
                tracing::warn!(error = %e, "failed to send chat message");
            }
        }
    });

    let (inbound_tx, inbound_rx) = mpsc::channel(32);
    let bridge_task = tokio::spawn(bridge.run(inbound_rx));

    tracing::info!(
        agent = %config.agent.agent_id,
        "bridge running; reading utterances from stdin"
    );

    let speaker = config.core.default_speaker.clone();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let text = line.trim().to_string();
        if text.is_empty() {
            continue;
        }
        let message = ChatMessage {
            speaker: speaker.clone(),
            text,
        };
        if inbound_tx.send(message).await.is_err() {
            break;
        }
    }

    drop(inbound_tx);
    bridge_task.await.context("chat bridge task panicked")?;
    Ok(())
}

/// `rocky say`: run a single utterance through a fresh session and print
/// the reply.
pub async fn handle_say(
    config: Config,
    speaker: Option<String>,
    text: String,
    json: bool,
) -> Result<()> {
    let actuator: Arc<dyn Actuator> = Arc::new(OfflineActuator);
    let Wiring {
        bridge,
        mut outbound_rx,
    } = wire(&config, actuator)?;

    let message = ChatMessage {
        speaker: speaker.unwrap_or_else(|| config.core.default_speaker.clone()),
        text,
    };
    bridge.handle(message).await;
    drop(bridge);

    let mut replies = Vec::new();
    while let Some(reply) = outbound_rx.recv().await {
        replies.push(reply);
    }

    if json {
        println!("{}", serde_json::json!({ "replies": replies }));
    } else if replies.is_empty() {
        println!("(no reply)");
    } else {
        for reply in replies {
            println!("{}", reply);
        }
    }
    Ok(())
}

/// `rocky config show`
pub fn handle_config_show(path: &Path, json: bool) -> Result<()> {
    let config = Config::load_from_path(path)
        .with_context(|| format!("failed to load config from {}", path.display()))?;
    if json {
        println!("{}", serde_json::to_string_pretty(&config)?);
    } else {
        println!("{}", toml::to_string_pretty(&config)?);
    }
    Ok(())
}

/// `rocky config validate`
pub fn handle_config_validate(path: &Path) -> Result<()> {
    Config::load_from_path(path)
        .with_context(|| format!("configuration at {} is invalid", path.display()))?;
    println!("Configuration is valid: {}", path.display());
    Ok(())
}
