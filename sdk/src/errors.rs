//! Error types and handling
//!
//! This module provides the error types used throughout the Rocky engine.
//! All errors implement the `AgentErrorExt` trait which provides user-friendly
//! hints and indicates whether an error is tool-level (reported back to the
//! remote agent inside the tool result envelope, so the turn continues) or
//! fatal to the current turn.
//!
//! Only transport failures end a turn. Everything a tool can get wrong
//! (an unknown name, a bad argument, a failed actuator motion) is folded
//! into the result payload so the agent can read the error text and decide
//! how to react.

use thiserror::Error;

/// Trait for Rocky error extensions
///
/// Provides additional context for errors: a user-friendly hint and the
/// tool-level / turn-fatal classification that drives error recovery in
/// the turn executor.
pub trait AgentErrorExt {
    /// Returns a user-friendly hint for the error
    ///
    /// The hint is safe to display to end users and does not contain
    /// credentials or internal implementation details.
    fn user_hint(&self) -> &str;

    /// Returns whether the error is tool-level
    ///
    /// Tool-level errors are serialized into the tool result envelope and
    /// sent back to the remote agent; the turn keeps running. Errors that
    /// are not tool-level abort the turn.
    fn is_tool_level(&self) -> bool;
}

/// Main engine error type
///
/// # Error Categories
///
/// - **Transport**: the remote agent call failed or the stream broke
/// - **Protocol**: the remote agent sent frames the protocol does not allow
/// - **Tool**: unknown tool names, bad parameters, actuator failures
/// - **Configuration**: invalid or missing configuration
#[derive(Debug, Error)]
pub enum AgentError {
    // Remote call errors
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Frame decode error: {0}")]
    Decode(String),

    #[error("Protocol violation: {0}")]
    ProtocolViolation(String),

    // Turn executor errors
    #[error("Max rounds exceeded ({0})")]
    MaxRoundsExceeded(usize),

    // Tool errors
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Invalid argument '{name}': {reason}")]
    InvalidArgument { name: String, reason: String },

    #[error("Unsupported parameter type: {0}")]
    UnsupportedType(String),

    #[error("Actuator error: {0}")]
    Actuator(#[from] crate::actuator::ActuatorError),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    // Generic IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AgentErrorExt for AgentError {
    fn user_hint(&self) -> &str {
        match self {
            Self::Transport(_) => "The agent service is unreachable. Check your connection",
            Self::Decode(_) => "The agent service sent an unreadable response. Try again",
            Self::ProtocolViolation(_) => "The agent service sent an unexpected response",
            Self::MaxRoundsExceeded(_) => {
                "The request needed too many tool calls. Try a simpler instruction"
            }
            Self::UnknownTool(_) => "The requested action is not available",
            Self::InvalidArgument { .. } => "An action was requested with a bad parameter",
            Self::UnsupportedType(_) => "An action was requested with an unsupported parameter",
            Self::Actuator(_) => "The bot could not complete the action in the world",
            Self::Config(_) => "Check your config.toml file for errors",
            Self::Io(_) => "File system operation failed",
        }
    }

    fn is_tool_level(&self) -> bool {
        matches!(
            self,
            Self::UnknownTool(_)
                | Self::InvalidArgument { .. }
                | Self::UnsupportedType(_)
                | Self::Actuator(_)
        )
    }
}
