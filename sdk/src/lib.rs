//! Rocky SDK
//!
//! Shared library providing traits and types for Rocky components.
//! This crate is used by the engine and by external actuator implementations.

/// Actuator trait and in-world value types
pub mod actuator;

/// Error types and handling
pub mod errors;

/// Tool result types
pub mod types;

// Re-export commonly used types
pub use actuator::{Actuator, ActuatorError, Position, Sighting};
pub use errors::{AgentError, AgentErrorExt};
pub use types::ContinuationHint;
