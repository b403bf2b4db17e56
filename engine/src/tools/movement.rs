//! Movement tools

use sdk::actuator::{Actuator, Position};
use sdk::errors::AgentError;
use sdk::types::ContinuationHint;
use serde_json::json;
use std::sync::Arc;

use super::params::ToolArgs;
use super::ToolOutcome;

/// How close to the target counts as arrived, in blocks
const ARRIVAL_RANGE: f64 = 1.0;

pub struct MovementTools {
    actuator: Arc<dyn Actuator>,
}

impl MovementTools {
    pub fn new(actuator: Arc<dyn Actuator>) -> Self {
        Self { actuator }
    }

    pub async fn jump(&self) -> Result<ToolOutcome, AgentError> {
        self.actuator.jump().await?;
        Ok((json!({ "message": "Jumping" }), ContinuationHint::Reprompt))
    }

    pub async fn move_to_location(&self, args: &ToolArgs) -> Result<ToolOutcome, AgentError> {
        let target = Position::new(
            args.f64("location_x")?,
            args.f64("location_y")?,
            args.f64("location_z")?,
        );
        self.actuator.move_to(target, ARRIVAL_RANGE).await?;
        Ok((
            json!({ "message": "Arrived at location." }),
            ContinuationHint::Reprompt,
        ))
    }
}
