//! Remote agent client boundary
//!
//! Defines the wire types exchanged with the remote reasoning agent and
//! the `AgentClient` trait the turn executor drives. The agent answers a
//! turn request with a stream of frames: text chunks carrying base64 bytes,
//! and at most one return-control frame naming a tool the agent wants run.
//!
//! The HTTP implementation lives in [`http`].

pub mod http;

use async_trait::async_trait;
use futures::Stream;
use sdk::errors::AgentError;
use sdk::types::ContinuationHint;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::pin::Pin;

/// Stream of frames produced by one round of the remote agent
pub type FrameStream = Pin<Box<dyn Stream<Item = Result<Frame, AgentError>> + Send>>;

/// One frame of the agent response stream
///
/// Frames arrive as newline-delimited JSON objects with a single key
/// naming the frame kind.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Frame {
    /// A fragment of the agent's natural-language reply
    #[serde(rename = "chunk")]
    Chunk(ChunkFrame),

    /// The agent is handing control back to run a tool
    #[serde(rename = "returnControl")]
    ReturnControl(ControlFrame),
}

/// Text fragment payload, base64-encoded on the wire
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChunkFrame {
    pub bytes: String,
}

/// Return-control payload
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ControlFrame {
    /// Correlation id; must be echoed back with the tool result
    pub invocation_id: String,

    /// Requested invocations. The protocol allows exactly one entry.
    pub invocation_inputs: Vec<InvocationInput>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InvocationInput {
    #[serde(rename = "functionInvocationInput")]
    pub function_invocation_input: FunctionInvocationInput,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FunctionInvocationInput {
    pub action_group: String,
    pub function: String,
    #[serde(default)]
    pub parameters: Vec<RawParameter>,
}

/// A tool parameter exactly as it appears on the wire
///
/// Values always arrive as strings; the declared type tells the coercion
/// layer how to interpret them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RawParameter {
    pub name: String,

    #[serde(rename = "type")]
    pub param_type: String,

    pub value: String,
}

/// A decoded tool-call request, flattened from a control frame
#[derive(Debug, Clone, PartialEq)]
pub struct ToolCallRequest {
    pub invocation_id: String,
    pub action_group: String,
    pub tool_name: String,
    pub parameters: Vec<RawParameter>,
}

impl ControlFrame {
    /// Flatten this frame into a single tool-call request.
    ///
    /// Returns `ProtocolViolation` unless the frame carries exactly one
    /// invocation input.
    pub fn into_request(self) -> Result<ToolCallRequest, AgentError> {
        if self.invocation_inputs.len() != 1 {
            return Err(AgentError::ProtocolViolation(format!(
                "control frame carries {} invocation inputs, expected 1",
                self.invocation_inputs.len()
            )));
        }
        let input = self
            .invocation_inputs
            .into_iter()
            .next()
            .map(|i| i.function_invocation_input)
            .ok_or_else(|| {
                AgentError::ProtocolViolation("control frame carries no invocation input".into())
            })?;
        Ok(ToolCallRequest {
            invocation_id: self.invocation_id,
            action_group: input.action_group,
            tool_name: input.function,
            parameters: input.parameters,
        })
    }
}

/// Result of a tool execution, ready to send back to the agent
#[derive(Debug, Clone, PartialEq)]
pub struct ToolResultEnvelope {
    /// Echo of the control frame's correlation id
    pub invocation_id: String,
    pub action_group: String,
    pub tool_name: String,

    /// Tool payload; serialized to text inside the envelope
    pub body: Value,

    pub response_state: ContinuationHint,
}

impl ToolResultEnvelope {
    /// Session-state object carried in the follow-up turn request.
    pub fn to_session_state(&self) -> Value {
        json!({
            "invocationId": self.invocation_id,
            "returnControlInvocationResults": [{
                "functionResult": {
                    "actionGroup": self.action_group,
                    "function": self.tool_name,
                    "responseBody": {
                        "TEXT": { "body": self.body.to_string() }
                    },
                    "responseState": self.response_state.as_str(),
                }
            }]
        })
    }
}

/// Input for one round of the turn loop
///
/// A round either opens the turn with the human's utterance or continues
/// it with a tool result. Never both, never neither.
#[derive(Debug, Clone)]
pub enum TurnInput {
    Utterance(String),
    ToolResult(ToolResultEnvelope),
}

impl TurnInput {
    /// Request body for the agent runtime.
    pub fn to_request_body(&self) -> Value {
        match self {
            TurnInput::Utterance(text) => json!({ "inputText": text }),
            TurnInput::ToolResult(envelope) => json!({
                "sessionState": envelope.to_session_state()
            }),
        }
    }
}

/// Client for the remote reasoning agent
///
/// One `invoke` call is one round: it sends the input under the given
/// session id and yields the agent's response frames as they arrive.
#[async_trait]
pub trait AgentClient: Send + Sync {
    async fn invoke(&self, session_id: &str, input: TurnInput) -> Result<FrameStream, AgentError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_chunk_frame() {
        let frame: Frame = serde_json::from_str(r#"{"chunk":{"bytes":"SGVsbG8="}}"#).unwrap();
        assert_eq!(
            frame,
            Frame::Chunk(ChunkFrame {
                bytes: "SGVsbG8=".to_string()
            })
        );
    }

    #[test]
    fn test_decode_control_frame() {
        let raw = r#"{
            "returnControl": {
                "invocationId": "inv-1",
                "invocationInputs": [{
                    "functionInvocationInput": {
                        "actionGroup": "action-group-rocky",
                        "function": "action_dig",
                        "parameters": [
                            {"name": "depth", "type": "number", "value": "3"},
                            {"name": "width", "type": "number", "value": "2"}
                        ]
                    }
                }]
            }
        }"#;
        let frame: Frame = serde_json::from_str(raw).unwrap();
        let Frame::ReturnControl(control) = frame else {
            panic!("expected a control frame");
        };
        let request = control.into_request().unwrap();
        assert_eq!(request.invocation_id, "inv-1");
        assert_eq!(request.tool_name, "action_dig");
        assert_eq!(request.parameters.len(), 2);
        assert_eq!(request.parameters[0].param_type, "number");
        assert_eq!(request.parameters[0].value, "3");
    }

    #[test]
    fn test_control_frame_parameters_default_empty() {
        let raw = r#"{
            "returnControl": {
                "invocationId": "inv-2",
                "invocationInputs": [{
                    "functionInvocationInput": {
                        "actionGroup": "action-group-rocky",
                        "function": "action_jump"
                    }
                }]
            }
        }"#;
        let frame: Frame = serde_json::from_str(raw).unwrap();
        let Frame::ReturnControl(control) = frame else {
            panic!("expected a control frame");
        };
        let request = control.into_request().unwrap();
        assert!(request.parameters.is_empty());
    }

    #[test]
    fn test_multiple_invocations_rejected() {
        let input = InvocationInput {
            function_invocation_input: FunctionInvocationInput {
                action_group: "g".into(),
                function: "action_jump".into(),
                parameters: vec![],
            },
        };
        let control = ControlFrame {
            invocation_id: "inv-3".into(),
            invocation_inputs: vec![input.clone(), input],
        };
        let err = control.into_request().unwrap_err();
        assert!(matches!(err, AgentError::ProtocolViolation(_)));
    }

    #[test]
    fn test_session_state_shape() {
        let envelope = ToolResultEnvelope {
            invocation_id: "inv-4".into(),
            action_group: "action-group-rocky".into(),
            tool_name: "action_get_time".into(),
            body: json!({ "time": "day" }),
            response_state: ContinuationHint::Reprompt,
        };
        let state = envelope.to_session_state();
        assert_eq!(state["invocationId"], "inv-4");
        let result = &state["returnControlInvocationResults"][0]["functionResult"];
        assert_eq!(result["actionGroup"], "action-group-rocky");
        assert_eq!(result["function"], "action_get_time");
        assert_eq!(result["responseState"], "REPROMPT");
        // Body travels as a JSON string, not a nested object
        assert_eq!(result["responseBody"]["TEXT"]["body"], r#"{"time":"day"}"#);
    }

    #[test]
    fn test_request_body_variants() {
        let utterance = TurnInput::Utterance("steve says: hi".into());
        assert_eq!(
            utterance.to_request_body(),
            json!({ "inputText": "steve says: hi" })
        );

        let envelope = ToolResultEnvelope {
            invocation_id: "inv-5".into(),
            action_group: "g".into(),
            tool_name: "action_jump".into(),
            body: json!({ "status": "jumped" }),
            response_state: ContinuationHint::Reprompt,
        };
        let body = TurnInput::ToolResult(envelope).to_request_body();
        assert!(body.get("inputText").is_none());
        assert_eq!(body["sessionState"]["invocationId"], "inv-5");
    }
}
