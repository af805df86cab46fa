//! `calculate_pizza_for_people` function tool

use jsonschema::{Draft, JSONSchema};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::pizza::PizzaEstimator;
use crate::tools::ToolHandler;
use crate::types::tool::ToolDefinition;
use crate::{Error, ErrorContext, Result};

pub const TOOL_NAME: &str = "calculate_pizza_for_people";

const DESCRIPTION: &str =
    "Calculate how many pizzas to order for a group, given the number of people and their appetite level.";

#[derive(Debug, Deserialize)]
struct PizzaArgs {
    people_count: i64,
    appetite_level: String,
}

/// Exposes [`PizzaEstimator`] to the agent as a strict function tool.
#[derive(Debug, Clone, Default)]
pub struct PizzaTool {
    estimator: PizzaEstimator,
}

impl PizzaTool {
    pub fn new(estimator: PizzaEstimator) -> Self {
        Self { estimator }
    }

    /// Strict parameter schema: both fields required, no extras.
    pub fn parameters_schema() -> Value {
        json!({
            "type": "object",
            "properties": {
                "people_count": {
                    "type": "integer",
                    "description": "Number of people who will be eating"
                },
                "appetite_level": {
                    "type": "string",
                    "enum": ["light", "normal", "heavy"],
                    "description": "How hungry the group is"
                }
            },
            "required": ["people_count", "appetite_level"],
            "additionalProperties": false
        })
    }

    fn validate(arguments: &Value) -> Result<()> {
        let schema_value = Self::parameters_schema();
        let schema = JSONSchema::options()
            .with_draft(Draft::Draft7)
            .compile(&schema_value)
            .map_err(|e| {
                Error::runtime_with_context(
                    format!("failed to compile parameter schema: {e}"),
                    ErrorContext::new().with_source(TOOL_NAME),
                )
            })?;

        if let Err(errors) = schema.validate(arguments) {
            let details: Vec<String> = errors
                .map(|e| format!("{} at '{}'", e, e.instance_path))
                .collect();
            return Err(Error::invalid_argument_with_context(
                "arguments do not match the tool schema",
                ErrorContext::new()
                    .with_details(details.join("; "))
                    .with_source(TOOL_NAME),
            ));
        }
        Ok(())
    }
}

impl ToolHandler for PizzaTool {
    fn name(&self) -> &str {
        TOOL_NAME
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition::Function {
            name: TOOL_NAME.to_string(),
            description: Some(DESCRIPTION.to_string()),
            parameters: Self::parameters_schema(),
            strict: true,
        }
    }

    fn call(&self, arguments: Value) -> Result<Value> {
        Self::validate(&arguments)?;
        let args: PizzaArgs = serde_json::from_value(arguments)?;
        let estimate = self.estimator.estimate(args.people_count, &args.appetite_level)?;
        Ok(serde_json::to_value(estimate)?)
    }
}
