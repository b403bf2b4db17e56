//! HTTP agent client
//!
//! Talks to the agent runtime over HTTP. Each round is a single POST to
//! the session text endpoint; the response body is newline-delimited JSON,
//! one frame per line, surfaced as a `FrameStream` without buffering the
//! whole response.

use super::{AgentClient, Frame, FrameStream, TurnInput};
use async_trait::async_trait;
use futures::StreamExt;
use sdk::errors::AgentError;
use std::time::Duration;

use crate::config::AgentConfig;

/// Reqwest-backed implementation of [`AgentClient`]
pub struct HttpAgentClient {
    client: reqwest::Client,
    base_url: String,
    agent_id: String,
    agent_alias_id: String,
}

impl HttpAgentClient {
    pub fn new(config: &AgentConfig) -> Result<Self, AgentError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AgentError::Transport(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            agent_id: config.agent_id.clone(),
            agent_alias_id: config.agent_alias_id.clone(),
        })
    }

    fn session_url(&self, session_id: &str) -> String {
        format!(
            "{}/agents/{}/agentAliases/{}/sessions/{}/text",
            self.base_url, self.agent_id, self.agent_alias_id, session_id
        )
    }
}

#[async_trait]
impl AgentClient for HttpAgentClient {
    async fn invoke(&self, session_id: &str, input: TurnInput) -> Result<FrameStream, AgentError> {
        let url = self.session_url(session_id);
        tracing::debug!(url = %url, "invoking remote agent");

        let response = self
            .client
            .post(&url)
            .json(&input.to_request_body())
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AgentError::Transport(format!(
                "agent runtime returned {}: {}",
                status,
                body.chars().take(200).collect::<String>()
            )));
        }

        Ok(frame_stream(response))
    }
}

fn map_reqwest_error(e: reqwest::Error) -> AgentError {
    if e.is_timeout() {
        AgentError::Transport("request to agent runtime timed out".to_string())
    } else if e.is_connect() {
        AgentError::Transport(format!("cannot reach agent runtime: {}", e))
    } else {
        AgentError::Transport(format!("agent request failed: {}", e))
    }
}

/// Turn a streaming HTTP response into a stream of decoded frames.
fn frame_stream(response: reqwest::Response) -> FrameStream {
    let bytes = response.bytes_stream().fuse();
    let state = (bytes, LineBuffer::default());

    Box::pin(futures::stream::try_unfold(
        state,
        |(mut bytes, mut buffer)| async move {
            loop {
                while let Some(line) = buffer.next_line() {
                    if line.is_empty() {
                        continue;
                    }
                    let frame = parse_frame(&line)?;
                    return Ok(Some((frame, (bytes, buffer))));
                }

                match bytes.next().await {
                    Some(Ok(chunk)) => buffer.extend(&chunk),
                    Some(Err(e)) => return Err(map_reqwest_error(e)),
                    None => {
                        // Stream closed; a trailing unterminated line is
                        // still a frame.
                        match buffer.take_remainder() {
                            Some(line) => {
                                let frame = parse_frame(&line)?;
                                return Ok(Some((frame, (bytes, buffer))));
                            }
                            None => return Ok(None),
                        }
                    }
                }
            }
        },
    ))
}

fn parse_frame(line: &str) -> Result<Frame, AgentError> {
    serde_json::from_str(line).map_err(|e| {
        AgentError::Decode(format!(
            "bad frame '{}': {}",
            line.chars().take(120).collect::<String>(),
            e
        ))
    })
}

/// Accumulates byte chunks and yields complete newline-terminated lines.
#[derive(Default)]
struct LineBuffer {
    buf: Vec<u8>,
}

impl LineBuffer {
    fn extend(&mut self, chunk: &[u8]) {
        self.buf.extend_from_slice(chunk);
    }

    fn next_line(&mut self) -> Option<String> {
        let pos = self.buf.iter().position(|&b| b == b'\n')?;
        let line: Vec<u8> = self.buf.drain(..=pos).collect();
        Some(String::from_utf8_lossy(&line).trim().to_string())
    }

    fn take_remainder(&mut self) -> Option<String> {
        if self.buf.is_empty() {
            return None;
        }
        let line = String::from_utf8_lossy(&self.buf).trim().to_string();
        self.buf.clear();
        if line.is_empty() {
            None
        } else {
            Some(line)
        }
    }
}
