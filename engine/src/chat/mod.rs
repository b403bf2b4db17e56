//! Chat bridge
//!
//! The inbound boundary between in-world chat and the turn executor. A
//! single consumer task reads messages off an mpsc channel, so an
//! in-flight turn is never interleaved with the next one; later
//! utterances simply queue.
//!
//! Reserved commands are handled before any turn starts: "reset" swaps
//! the session id and acknowledges, "stop" clears actuator motion.
//! Server-generated noise (messages ending in `]`, teleport spam, the
//! bot's own chat) is dropped silently.

use sdk::actuator::Actuator;
use sdk::errors::AgentErrorExt;
use std::sync::Arc;
use tokio::sync::mpsc;

use crate::agent::{SessionManager, TurnExecutor};

/// One utterance heard in the world
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub speaker: String,
    pub text: String,
}

pub struct ChatBridge {
    executor: Arc<TurnExecutor>,
    session: Arc<SessionManager>,
    actuator: Arc<dyn Actuator>,
    bot_name: String,
    outbound: mpsc::Sender<String>,
}

impl ChatBridge {
    pub fn new(
        executor: Arc<TurnExecutor>,
        session: Arc<SessionManager>,
        actuator: Arc<dyn Actuator>,
        bot_name: String,
        outbound: mpsc::Sender<String>,
    ) -> Self {
        Self {
            executor,
            session,
            actuator,
            bot_name,
            outbound,
        }
    }

    /// Consume messages until the inbound channel closes.
    pub async fn run(self, mut inbound: mpsc::Receiver<ChatMessage>) {
        while let Some(message) = inbound.recv().await {
            self.handle(message).await;
        }
        tracing::info!("chat channel closed, bridge stopping");
    }

    /// Process one message end to end.
    pub async fn handle(&self, message: ChatMessage) {
        if self.should_ignore(&message) {
            return;
        }

        match message.text.trim() {
            "reset" => {
                self.session.reset();
                self.send("Session reset").await;
            }
            "stop" => {
                if let Err(e) = self.actuator.halt().await {
                    tracing::warn!(error = %e, "halt failed");
                }
                self.send("Stopping bot...").await;
            }
            text => {
                let prompt = format!("{} says: {}", message.speaker, text);
                match self.executor.run_turn(prompt, &self.outbound).await {
                    Ok(report) => {
                        tracing::debug!(rounds = report.rounds, delivered = report.delivered, "turn finished");
                    }
                    Err(e) => {
                        // A failed turn produces no chat output; the player
                        // can just ask again.
                        tracing::error!(error = %e, hint = e.user_hint(), "turn failed");
                    }
                }
            }
        }
    }

    fn should_ignore(&self, message: &ChatMessage) -> bool {
        if message.speaker == self.bot_name {
            return true;
        }
        // Teleport spam and bracketed server messages (weather, time)
        // are system noise, not player speech.
        if message.text.contains("Teleport") {
            return true;
        }
        if message.text.trim_end().ends_with(']') {
            return true;
        }
        false
    }

    async fn send(&self, text: &str) {
        if self.outbound.send(text.to_string()).await.is_err() {
            tracing::warn!("outbound chat channel closed");
        }
    }
}
