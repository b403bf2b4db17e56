//! Tool parameter coercion
//!
//! Wire parameters arrive as (name, type, value) string triples. This
//! module turns them into typed arguments before any handler runs, so a
//! handler never sees a raw wire value. Coercion failures are tool-level
//! errors; they go back to the agent, not to the user.

use sdk::errors::AgentError;
use std::collections::HashMap;

use crate::remote::RawParameter;

/// A coerced argument value
#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    Number(f64),
    Text(String),
}

/// Typed arguments for one tool call, keyed by parameter name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToolArgs {
    values: HashMap<String, ArgValue>,
}

impl ToolArgs {
    /// Numeric argument by name.
    pub fn f64(&self, name: &str) -> Result<f64, AgentError> {
        match self.values.get(name) {
            Some(ArgValue::Number(n)) => Ok(*n),
            Some(ArgValue::Text(_)) => Err(AgentError::InvalidArgument {
                name: name.to_string(),
                reason: "expected a number, got a string".to_string(),
            }),
            None => Err(AgentError::InvalidArgument {
                name: name.to_string(),
                reason: "missing".to_string(),
            }),
        }
    }

    /// Numeric argument truncated to a non-negative integer.
    pub fn u32(&self, name: &str) -> Result<u32, AgentError> {
        let n = self.f64(name)?;
        if !n.is_finite() || n < 0.0 || n > u32::MAX as f64 {
            return Err(AgentError::InvalidArgument {
                name: name.to_string(),
                reason: format!("{} is out of range", n),
            });
        }
        Ok(n as u32)
    }

    /// String argument by name.
    pub fn str(&self, name: &str) -> Result<&str, AgentError> {
        match self.values.get(name) {
            Some(ArgValue::Text(s)) => Ok(s),
            Some(ArgValue::Number(_)) => Err(AgentError::InvalidArgument {
                name: name.to_string(),
                reason: "expected a string, got a number".to_string(),
            }),
            None => Err(AgentError::InvalidArgument {
                name: name.to_string(),
                reason: "missing".to_string(),
            }),
        }
    }
}

/// Coerce wire parameters into typed arguments.
///
/// Recognized declared types are "number" and "string". Anything else is
/// an `UnsupportedType` error before any handler executes.
pub fn coerce(parameters: &[RawParameter]) -> Result<ToolArgs, AgentError> {
    let mut values = HashMap::with_capacity(parameters.len());
    for param in parameters {
        let value = match param.param_type.as_str() {
            "number" => {
                let n: f64 =
                    param
                        .value
                        .trim()
                        .parse()
                        .map_err(|_| AgentError::InvalidArgument {
                            name: param.name.clone(),
                            reason: format!("cannot parse '{}' as a number", param.value),
                        })?;
                ArgValue::Number(n)
            }
            "string" => ArgValue::Text(param.value.clone()),
            other => return Err(AgentError::UnsupportedType(other.to_string())),
        };
        values.insert(param.name.clone(), value);
    }
    Ok(ToolArgs { values })
}
