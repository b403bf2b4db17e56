//! Combat tools

use sdk::actuator::Actuator;
use sdk::errors::AgentError;
use sdk::types::ContinuationHint;
use serde_json::json;
use std::sync::Arc;

use super::params::ToolArgs;
use super::ToolOutcome;

pub struct CombatTools {
    actuator: Arc<dyn Actuator>,
}

impl CombatTools {
    pub fn new(actuator: Arc<dyn Actuator>) -> Self {
        Self { actuator }
    }

    pub async fn attack_nearest_entity(&self, args: &ToolArgs) -> Result<ToolOutcome, AgentError> {
        let entity_name = args.str("entity_name")?;
        let payload = match self.actuator.attack_nearest(entity_name).await? {
            Some(attacked) => json!({ "message": format!("Attacking {}.", attacked) }),
            None => json!({ "message": format!("No entity called {} found.", entity_name) }),
        };
        Ok((payload, ContinuationHint::Reprompt))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::RawParameter;
    use crate::tools::params::coerce;
    use crate::tools::test_support::StubActuator;
    use sdk::actuator::{Position, Sighting};

    fn entity_args(name: &str) -> ToolArgs {
        coerce(&[RawParameter {
            name: "entity_name".to_string(),
            param_type: "string".to_string(),
            value: name.to_string(),
        }])
        .unwrap()
    }

    #[tokio::test]
    async fn test_attack_found_entity() {
        let actuator = StubActuator {
            sighting: Some(Sighting {
                name: "zombie".to_string(),
                position: Position::new(0.0, 64.0, 0.0),
            }),
            ..Default::default()
        };
        let tools = CombatTools::new(Arc::new(actuator));
        let (payload, hint) = tools
            .attack_nearest_entity(&entity_args("zombie"))
            .await
            .unwrap();
        assert_eq!(payload["message"], "Attacking zombie.");
        assert_eq!(hint, ContinuationHint::Reprompt);
    }

    #[tokio::test]
    async fn test_attack_nothing_nearby_is_soft() {
        let tools = CombatTools::new(Arc::new(StubActuator::default()));
        let (payload, _) = tools
            .attack_nearest_entity(&entity_args("creeper"))
            .await
            .unwrap();
        assert_eq!(payload["message"], "No entity called creeper found.");
    }
}
