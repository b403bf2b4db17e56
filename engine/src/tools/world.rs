//! World query tools
//!
//! Read-only lookups against the world state. Not-found results are soft:
//! they come back as payload messages, never as errors, so the agent can
//! explain them to the player.

use sdk::actuator::{Actuator, Position};
use sdk::errors::AgentError;
use sdk::types::ContinuationHint;
use serde_json::json;
use std::sync::Arc;

use super::params::ToolArgs;
use super::ToolOutcome;

pub struct WorldTools {
    actuator: Arc<dyn Actuator>,
}

impl WorldTools {
    pub fn new(actuator: Arc<dyn Actuator>) -> Self {
        Self { actuator }
    }

    pub async fn get_time(&self) -> Result<ToolOutcome, AgentError> {
        let time = self.actuator.time_of_day().await?;
        Ok((json!({ "time": time }), ContinuationHint::Reprompt))
    }

    pub async fn is_raining(&self) -> Result<ToolOutcome, AgentError> {
        let raining = self.actuator.is_raining().await?;
        Ok((json!({ "isRaining": raining }), ContinuationHint::Reprompt))
    }

    pub async fn get_player_location(&self, args: &ToolArgs) -> Result<ToolOutcome, AgentError> {
        let player_name = args.str("player_name")?;
        let payload = match self.actuator.player_location(player_name).await? {
            Some(pos) => json!({ "location": { "x": pos.x, "y": pos.y, "z": pos.z } }),
            None => json!({ "message": format!("Player {} not found", player_name) }),
        };
        Ok((payload, ContinuationHint::Reprompt))
    }

    /// Distance between two positions given as JSON `[x, y, z]` strings.
    ///
    /// Pure math; no actuator call. A malformed location is reported in
    /// the payload so the agent can re-issue the call with fixed input.
    pub async fn get_distance_between(&self, args: &ToolArgs) -> Result<ToolOutcome, AgentError> {
        let a = parse_location(args.str("location_1")?);
        let b = parse_location(args.str("location_2")?);
        let payload = match (a, b) {
            (Some(a), Some(b)) => json!({ "distance": a.distance_to(&b) }),
            _ => json!({ "error": "Invalid JSON list" }),
        };
        Ok((payload, ContinuationHint::Reprompt))
    }

    pub async fn find_entity(&self, args: &ToolArgs) -> Result<ToolOutcome, AgentError> {
        let entity_name = args.str("entity_name")?;
        let payload = match self.actuator.find_entity(entity_name).await? {
            Some(sighting) => json!({
                "found": sighting.name,
                "location": {
                    "x": sighting.position.x,
                    "y": sighting.position.y,
                    "z": sighting.position.z,
                }
            }),
            None => json!({ "message": "No entity found" }),
        };
        Ok((payload, ContinuationHint::Reprompt))
    }
}

fn parse_location(raw: &str) -> Option<Position> {
    let [x, y, z]: [f64; 3] = serde_json::from_str(raw).ok()?;
    Some(Position::new(x, y, z))
}
