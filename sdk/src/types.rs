//! Tool result types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Continuation hint returned by a tool handler
///
/// Tells the remote agent whether to keep reasoning after seeing the tool
/// result. The hint is produced by the handler, never invented by the
/// orchestrator, and is carried verbatim on the wire.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContinuationHint {
    /// Proceed without prompting the model again
    Continue,

    /// Feed the result back and let the agent keep reasoning
    Reprompt,

    /// Stop reasoning after this result
    Stop,
}

impl ContinuationHint {
    /// Wire representation of the hint
    pub fn as_str(&self) -> &'static str {
        match self {
            ContinuationHint::Continue => "CONTINUE",
            ContinuationHint::Reprompt => "REPROMPT",
            ContinuationHint::Stop => "STOP",
        }
    }
}

impl fmt::Display for ContinuationHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
