//! Turn executor
//!
//! One turn is a bounded loop of rounds: send input, drain the response
//! stream, and either dispatch the requested tool and go again or deliver
//! the final text and stop. The loop carries the evolving `TurnInput` as
//! its state; everything else is built fresh per round.
//!
//! Error recovery is deliberately asymmetric. Transport, decode, and
//! protocol errors end the turn. Everything a tool can get wrong is
//! serialized into the result envelope and sent back, so the agent reads
//! the failure and reacts in natural language instead of the turn dying.

use sdk::errors::{AgentError, AgentErrorExt};
use sdk::types::ContinuationHint;
use serde_json::json;
use std::sync::Arc;
use tokio::sync::mpsc;

use crate::remote::{AgentClient, ToolCallRequest, ToolResultEnvelope, TurnInput};
use crate::stream::drain_round;
use crate::tools::{params, ToolRegistry};

use super::SessionManager;

/// What a completed turn did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnReport {
    /// Rounds the turn took, including the final one
    pub rounds: usize,

    /// Whether final text was delivered to the outbound channel
    pub delivered: bool,
}

pub struct TurnExecutor {
    client: Arc<dyn AgentClient>,
    registry: Arc<ToolRegistry>,
    session: Arc<SessionManager>,
    max_rounds: usize,
}

impl TurnExecutor {
    pub fn new(
        client: Arc<dyn AgentClient>,
        registry: Arc<ToolRegistry>,
        session: Arc<SessionManager>,
        max_rounds: usize,
    ) -> Self {
        Self {
            client,
            registry,
            session,
            max_rounds,
        }
    }

    /// Run one full turn for the given utterance.
    ///
    /// Only the final round's text is delivered, at most once, and never
    /// when empty. Intermediate rounds' text is logged and dropped.
    pub async fn run_turn(
        &self,
        utterance: String,
        delivery: &mpsc::Sender<String>,
    ) -> Result<TurnReport, AgentError> {
        let mut input = TurnInput::Utterance(utterance);

        for round in 1..=self.max_rounds {
            // Re-read the id each round so a reset between rounds takes
            // effect immediately.
            let session_id = self.session.current();
            tracing::debug!(round, session_id = %session_id, "sending round");

            let frames = self.client.invoke(&session_id, input).await?;
            let output = drain_round(frames).await?;

            match output.request {
                None => {
                    let delivered = if output.text.trim().is_empty() {
                        false
                    } else {
                        delivery.send(output.text).await.is_ok()
                    };
                    tracing::info!(rounds = round, delivered, "turn complete");
                    return Ok(TurnReport {
                        rounds: round,
                        delivered,
                    });
                }
                Some(request) => {
                    if !output.text.is_empty() {
                        tracing::debug!(text = %output.text, "intermediate round text dropped");
                    }
                    let envelope = self.execute(request).await?;
                    input = TurnInput::ToolResult(envelope);
                }
            }
        }

        Err(AgentError::MaxRoundsExceeded(self.max_rounds))
    }

    /// Coerce arguments and dispatch the tool, folding tool-level failures
    /// into the envelope.
    async fn execute(&self, request: ToolCallRequest) -> Result<ToolResultEnvelope, AgentError> {
        let outcome = match params::coerce(&request.parameters) {
            Ok(args) => self.registry.dispatch(&request.tool_name, &args).await,
            Err(e) => Err(e),
        };

        let (body, response_state) = match outcome {
            Ok((payload, hint)) => (payload, hint),
            Err(e) if e.is_tool_level() => {
                tracing::warn!(tool = %request.tool_name, error = %e, "tool failed; reporting to agent");
                (json!({ "error": e.to_string() }), ContinuationHint::Reprompt)
            }
            Err(e) => return Err(e),
        };

        Ok(ToolResultEnvelope {
            invocation_id: request.invocation_id,
            action_group: request.action_group,
            tool_name: request.tool_name,
            body,
            response_state,
        })
    }
}
