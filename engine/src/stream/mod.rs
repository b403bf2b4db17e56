//! Stream event decoding
//!
//! Converts raw response frames into engine events and drains one round
//! of the agent stream into a single `RoundOutput`. Draining always reads
//! the stream to completion, even after a tool call shows up, so the
//! connection is never left with unread frames.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use futures::StreamExt;
use sdk::errors::AgentError;

use crate::remote::{Frame, FrameStream, ToolCallRequest};

/// A decoded frame
#[derive(Debug, Clone, PartialEq)]
pub enum StreamEvent {
    /// Fragment of the agent's natural-language reply
    TextFragment(String),

    /// The agent wants a tool run before it continues
    ToolCall(ToolCallRequest),
}

/// Everything one round of the agent produced
#[derive(Debug, Clone, PartialEq)]
pub struct RoundOutput {
    /// Concatenated text fragments, in arrival order
    pub text: String,

    /// The tool call to dispatch, if the agent handed control back
    pub request: Option<ToolCallRequest>,
}

impl RoundOutput {
    /// A round without a tool call is the turn's final round.
    pub fn is_final(&self) -> bool {
        self.request.is_none()
    }
}

/// Decode a single frame into an event.
pub fn decode_frame(frame: Frame) -> Result<StreamEvent, AgentError> {
    match frame {
        Frame::Chunk(chunk) => {
            let bytes = BASE64
                .decode(chunk.bytes.as_bytes())
                .map_err(|e| AgentError::Decode(format!("chunk is not valid base64: {}", e)))?;
            let text = String::from_utf8(bytes)
                .map_err(|e| AgentError::Decode(format!("chunk is not valid UTF-8: {}", e)))?;
            Ok(StreamEvent::TextFragment(text))
        }
        Frame::ReturnControl(control) => Ok(StreamEvent::ToolCall(control.into_request()?)),
    }
}

/// Read an entire round off the stream.
///
/// Text fragments are concatenated in order. The first return-control
/// frame selects the round's tool call; any further control frames are
/// logged and discarded. Transport and decode errors abort the round.
pub async fn drain_round(mut frames: FrameStream) -> Result<RoundOutput, AgentError> {
    let mut text = String::new();
    let mut request: Option<ToolCallRequest> = None;

    while let Some(frame) = frames.next().await {
        match decode_frame(frame?)? {
            StreamEvent::TextFragment(fragment) => text.push_str(&fragment),
            StreamEvent::ToolCall(call) => {
                if request.is_some() {
                    tracing::warn!(
                        tool = %call.tool_name,
                        invocation_id = %call.invocation_id,
                        "ignoring extra return-control frame in the same round"
                    );
                } else {
                    request = Some(call);
                }
            }
        }
    }

    Ok(RoundOutput { text, request })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::{
        ChunkFrame, ControlFrame, FunctionInvocationInput, InvocationInput, RawParameter,
    };

    fn chunk(text: &str) -> Frame {
        Frame::Chunk(ChunkFrame {
            bytes: BASE64.encode(text),
        })
    }

    fn control(invocation_id: &str, function: &str) -> Frame {
        Frame::ReturnControl(ControlFrame {
            invocation_id: invocation_id.to_string(),
            invocation_inputs: vec![InvocationInput {
                function_invocation_input: FunctionInvocationInput {
                    action_group: "action-group-rocky".to_string(),
                    function: function.to_string(),
                    parameters: vec![RawParameter {
                        name: "depth".to_string(),
                        param_type: "number".to_string(),
                        value: "3".to_string(),
                    }],
                },
            }],
        })
    }

    fn stream_of(frames: Vec<Frame>) -> FrameStream {
        Box::pin(futures::stream::iter(frames.into_iter().map(Ok)))
    }

    #[tokio::test]
    async fn test_drain_text_only_round() {
        let out = drain_round(stream_of(vec![chunk("Hello "), chunk("there!")]))
            .await
            .unwrap();
        assert_eq!(out.text, "Hello there!");
        assert!(out.is_final());
    }

    #[tokio::test]
    async fn test_drain_tool_call_round() {
        let out = drain_round(stream_of(vec![chunk("Sure! "), control("inv-1", "action_dig")]))
            .await
            .unwrap();
        assert_eq!(out.text, "Sure! ");
        let request = out.request.unwrap();
        assert_eq!(request.invocation_id, "inv-1");
        assert_eq!(request.tool_name, "action_dig");
    }

    #[tokio::test]
    async fn test_text_after_control_is_still_collected() {
        let out = drain_round(stream_of(vec![
            control("inv-1", "action_jump"),
            chunk("trailing"),
        ]))
        .await
        .unwrap();
        assert_eq!(out.text, "trailing");
        assert!(out.request.is_some());
    }

    #[tokio::test]
    async fn test_first_control_frame_wins() {
        let out = drain_round(stream_of(vec![
            control("inv-1", "action_jump"),
            control("inv-2", "action_dig"),
        ]))
        .await
        .unwrap();
        let request = out.request.unwrap();
        assert_eq!(request.invocation_id, "inv-1");
        assert_eq!(request.tool_name, "action_jump");
    }

    #[tokio::test]
    async fn test_multi_invocation_frame_is_violation() {
        let input = InvocationInput {
            function_invocation_input: FunctionInvocationInput {
                action_group: "g".to_string(),
                function: "action_jump".to_string(),
                parameters: vec![],
            },
        };
        let frame = Frame::ReturnControl(ControlFrame {
            invocation_id: "inv-1".to_string(),
            invocation_inputs: vec![input.clone(), input],
        });
        let err = drain_round(stream_of(vec![frame])).await.unwrap_err();
        assert!(matches!(err, AgentError::ProtocolViolation(_)));
    }

    #[tokio::test]
    async fn test_transport_error_aborts_round() {
        let frames: FrameStream = Box::pin(futures::stream::iter(vec![
            Ok(chunk("partial")),
            Err(AgentError::Transport("connection reset".to_string())),
        ]));
        let err = drain_round(frames).await.unwrap_err();
        assert!(matches!(err, AgentError::Transport(_)));
    }

    #[tokio::test]
    async fn test_bad_base64_is_decode_error() {
        let frame = Frame::Chunk(ChunkFrame {
            bytes: "@@not-base64@@".to_string(),
        });
        let err = drain_round(stream_of(vec![frame])).await.unwrap_err();
        assert!(matches!(err, AgentError::Decode(_)));
    }

    #[tokio::test]
    async fn test_empty_round() {
        let out = drain_round(stream_of(vec![])).await.unwrap();
        assert_eq!(out.text, "");
        assert!(out.is_final());
    }
}
