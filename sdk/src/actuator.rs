//! Actuator trait and in-world value types
//!
//! The actuator is the boundary between the orchestrator and the game
//! client library that actually moves the bot, digs, builds, and chats.
//! The engine's tool handlers translate typed arguments into calls on this
//! trait; the pathing and block-placement algorithms live behind it.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A position in the world
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Euclidean distance to another position
    pub fn distance_to(&self, other: &Position) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        let dz = other.z - self.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

/// A named entity observed in the world
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sighting {
    /// Entity name as reported by the world
    pub name: String,

    /// Where the entity was seen
    pub position: Position,
}

/// Errors raised by actuator operations
///
/// These are tool-level by design: the registry catches them and reports
/// the message in the tool result payload so the remote agent can react.
#[derive(Debug, Error)]
pub enum ActuatorError {
    #[error("target unreachable: {0}")]
    Unreachable(String),

    #[error("world client unavailable: {0}")]
    Unavailable(String),

    #[error("{0}")]
    Failed(String),
}

/// In-world effector used by the tool handlers
///
/// Implementations wrap a concrete game client. Every method may take
/// multiple seconds (pathing, digging); callers await them one at a time.
/// The orchestrator never overlaps two actuator operations in a turn.
#[async_trait]
pub trait Actuator: Send + Sync {
    /// Send a chat message into the world
    async fn say(&self, message: &str) -> Result<(), ActuatorError>;

    /// Make the bot jump once
    async fn jump(&self) -> Result<(), ActuatorError>;

    /// Clear all in-progress motion (the "stop" command)
    async fn halt(&self) -> Result<(), ActuatorError>;

    /// Current in-world time of day as a display string
    async fn time_of_day(&self) -> Result<String, ActuatorError>;

    /// Whether it is currently raining
    async fn is_raining(&self) -> Result<bool, ActuatorError>;

    /// Location of a named player, or `None` if they are not visible
    async fn player_location(&self, player_name: &str) -> Result<Option<Position>, ActuatorError>;

    /// Walk to within `range` blocks of the target position
    async fn move_to(&self, target: Position, range: f64) -> Result<(), ActuatorError>;

    /// Nearest entity matching the given name, if any
    async fn find_entity(&self, entity_name: &str) -> Result<Option<Sighting>, ActuatorError>;

    /// Attack the nearest entity matching the name; returns the name of the
    /// entity attacked, or `None` if nothing matched
    async fn attack_nearest(&self, entity_name: &str) -> Result<Option<String>, ActuatorError>;

    /// Collect up to `count` nearby blocks whose type matches `block_type`;
    /// returns the number actually collected
    async fn collect_blocks(&self, block_type: &str, count: u32) -> Result<u32, ActuatorError>;

    /// Dig a hole of the given depth and radius at the targeted block
    async fn excavate(&self, depth: u32, width: u32) -> Result<(), ActuatorError>;

    /// Design and place a structure from a natural-language description;
    /// returns a short status message
    async fn build_structure(&self, description: &str) -> Result<String, ActuatorError>;
}
