//! Tool registry and action handlers
//!
//! The registry maps wire tool names to handlers. Handlers are thin: they
//! read typed arguments, call the actuator, and shape a JSON payload plus
//! a continuation hint for the agent. Tool groups are individually
//! enable-able through `[tools]` in the config; a name whose group is
//! disabled dispatches exactly like a name that never existed.

pub mod building;
pub mod combat;
pub mod movement;
pub mod params;
pub mod world;

use sdk::actuator::Actuator;
use sdk::errors::AgentError;
use sdk::types::ContinuationHint;
use serde_json::Value;
use std::sync::Arc;

use crate::config::ToolsConfig;
use building::BuildingTools;
use combat::CombatTools;
use movement::MovementTools;
use params::ToolArgs;
use world::WorldTools;

/// Payload plus continuation hint returned by every handler
pub type ToolOutcome = (Value, ContinuationHint);

/// Registry of available tools
pub struct ToolRegistry {
    movement: Option<MovementTools>,
    world: Option<WorldTools>,
    combat: Option<CombatTools>,
    building: Option<BuildingTools>,
}

impl ToolRegistry {
    /// Build the registry from config, enabling groups as configured.
    pub fn from_config(config: &ToolsConfig, actuator: Arc<dyn Actuator>) -> Self {
        Self {
            movement: config
                .movement
                .then(|| MovementTools::new(Arc::clone(&actuator))),
            world: config.world.then(|| WorldTools::new(Arc::clone(&actuator))),
            combat: config
                .combat
                .then(|| CombatTools::new(Arc::clone(&actuator))),
            building: config.building.then(|| BuildingTools::new(actuator)),
        }
    }

    /// Registry with every group enabled.
    pub fn with_all(actuator: Arc<dyn Actuator>) -> Self {
        Self::from_config(
            &ToolsConfig {
                movement: true,
                world: true,
                combat: true,
                building: true,
            },
            actuator,
        )
    }

    /// Run the named tool with already-coerced arguments.
    ///
    /// Unknown names, names in disabled groups, and actuator failures are
    /// all tool-level errors; the caller folds them into the result
    /// envelope instead of ending the turn.
    pub async fn dispatch(&self, tool_name: &str, args: &ToolArgs) -> Result<ToolOutcome, AgentError> {
        tracing::debug!(tool = %tool_name, "dispatching tool");

        match tool_name {
            "action_jump" => self.movement(tool_name)?.jump().await,
            "action_move_to_location" => self.movement(tool_name)?.move_to_location(args).await,

            "action_get_time" => self.world(tool_name)?.get_time().await,
            "action_is_raining" => self.world(tool_name)?.is_raining().await,
            "action_get_player_location" => self.world(tool_name)?.get_player_location(args).await,
            "action_get_distance_between_to_entities" => {
                self.world(tool_name)?.get_distance_between(args).await
            }
            "action_find_entity" => self.world(tool_name)?.find_entity(args).await,

            "action_attack_nearest_entity" => {
                self.combat(tool_name)?.attack_nearest_entity(args).await
            }

            "action_collect_block" => self.building(tool_name)?.collect_block(args).await,
            "action_dig" => self.building(tool_name)?.dig(args).await,
            "action_build" => self.building(tool_name)?.build(args).await,

            other => Err(AgentError::UnknownTool(other.to_string())),
        }
    }

    /// Names the registry currently answers to.
    pub fn available_tool_names(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        if self.movement.is_some() {
            names.extend(["action_jump", "action_move_to_location"]);
        }
        if self.world.is_some() {
            names.extend([
                "action_get_time",
                "action_is_raining",
                "action_get_player_location",
                "action_get_distance_between_to_entities",
                "action_find_entity",
            ]);
        }
        if self.combat.is_some() {
            names.push("action_attack_nearest_entity");
        }
        if self.building.is_some() {
            names.extend(["action_collect_block", "action_dig", "action_build"]);
        }
        names
    }

    // A name in a disabled group dispatches exactly like a name that was
    // never registered; the error carries the requested tool name so the
    // text the agent reads back stays coherent.
    fn movement(&self, tool_name: &str) -> Result<&MovementTools, AgentError> {
        self.movement
            .as_ref()
            .ok_or_else(|| AgentError::UnknownTool(tool_name.to_string()))
    }

    fn world(&self, tool_name: &str) -> Result<&WorldTools, AgentError> {
        self.world
            .as_ref()
            .ok_or_else(|| AgentError::UnknownTool(tool_name.to_string()))
    }

    fn combat(&self, tool_name: &str) -> Result<&CombatTools, AgentError> {
        self.combat
            .as_ref()
            .ok_or_else(|| AgentError::UnknownTool(tool_name.to_string()))
    }

    fn building(&self, tool_name: &str) -> Result<&BuildingTools, AgentError> {
        self.building
            .as_ref()
            .ok_or_else(|| AgentError::UnknownTool(tool_name.to_string()))
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::StubActuator;
    use super::*;
    use crate::remote::RawParameter;

    fn args(params: &[(&str, &str, &str)]) -> ToolArgs {
        let raw: Vec<RawParameter> = params
            .iter()
            .map(|(name, param_type, value)| RawParameter {
                name: name.to_string(),
                param_type: param_type.to_string(),
                value: value.to_string(),
            })
            .collect();
        params::coerce(&raw).unwrap()
    }

    #[tokio::test]
    async fn test_dispatch_unknown_tool() {
        let registry = ToolRegistry::with_all(Arc::new(StubActuator::default()));
        let err = registry
            .dispatch("action_teleport", &ToolArgs::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AgentError::UnknownTool(_)));
    }

    #[tokio::test]
    async fn test_dispatch_disabled_group() {
        let config = ToolsConfig {
            movement: true,
            world: true,
            combat: false,
            building: true,
        };
        let registry = ToolRegistry::from_config(&config, Arc::new(StubActuator::default()));
        let err = registry
            .dispatch(
                "action_attack_nearest_entity",
                &args(&[("entity_name", "string", "zombie")]),
            )
            .await
            .unwrap_err();
        // The error names the tool that was asked for, not the group.
        assert!(
            matches!(err, AgentError::UnknownTool(ref name) if name == "action_attack_nearest_entity")
        );
        assert_eq!(
            err.to_string(),
            "Unknown tool: action_attack_nearest_entity"
        );
        assert!(!registry
            .available_tool_names()
            .contains(&"action_attack_nearest_entity"));
    }

    #[tokio::test]
    async fn test_dispatch_jump_reaches_actuator() {
        let actuator = Arc::new(StubActuator::default());
        let registry = ToolRegistry::with_all(Arc::clone(&actuator) as Arc<dyn Actuator>);
        let (payload, hint) = registry
            .dispatch("action_jump", &ToolArgs::default())
            .await
            .unwrap();
        assert_eq!(payload["message"], "Jumping");
        assert_eq!(hint, ContinuationHint::Reprompt);
        assert_eq!(actuator.calls(), vec!["jump".to_string()]);
    }

    #[tokio::test]
    async fn test_all_names_dispatchable() {
        let registry = ToolRegistry::with_all(Arc::new(StubActuator::default()));
        assert_eq!(registry.available_tool_names().len(), 11);
    }
}
