//! Digging, collecting, and building tools
//!
//! The heavy lifting (path planning, block selection, blueprint layout)
//! lives in the actuator library. These handlers validate arguments and
//! shape the result message the agent reads back to the player.

use sdk::actuator::Actuator;
use sdk::errors::AgentError;
use sdk::types::ContinuationHint;
use serde_json::json;
use std::sync::Arc;

use super::params::ToolArgs;
use super::ToolOutcome;

pub struct BuildingTools {
    actuator: Arc<dyn Actuator>,
}

impl BuildingTools {
    pub fn new(actuator: Arc<dyn Actuator>) -> Self {
        Self { actuator }
    }

    pub async fn collect_block(&self, args: &ToolArgs) -> Result<ToolOutcome, AgentError> {
        let block_type = args.str("block_type")?;
        let count = args.u32("count")?;

        let collected = self.actuator.collect_blocks(block_type, count).await?;
        let message = if collected == 0 {
            format!("Could not find blocks with name: {}", block_type)
        } else {
            format!("Collected {} blocks of {}.", collected, block_type)
        };
        Ok((json!({ "message": message }), ContinuationHint::Reprompt))
    }

    pub async fn dig(&self, args: &ToolArgs) -> Result<ToolOutcome, AgentError> {
        let depth = args.u32("depth")?;
        let width = args.u32("width")?;

        self.actuator.excavate(depth, width).await?;
        Ok((
            json!({ "message": "Done digging." }),
            ContinuationHint::Reprompt,
        ))
    }

    pub async fn build(&self, args: &ToolArgs) -> Result<ToolOutcome, AgentError> {
        let description = args.str("structure_description")?;
        let status = self.actuator.build_structure(description).await?;
        Ok((json!({ "message": status }), ContinuationHint::Reprompt))
    }
}
