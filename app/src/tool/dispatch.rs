use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::core::state::Domain;

use super::PlanningTools;

/// A function call issued by the assistant. `arguments` is a JSON-encoded object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCall {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub arguments: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolOutput {
    pub tool_call_id: String,
    pub output: String,
}

impl ToolOutput {
    pub fn new(tool_call_id: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            tool_call_id: tool_call_id.into(),
            output: output.into(),
        }
    }
}

impl<D: Domain + Clone> PlanningTools<D> {
    /// Routes a call to `apply_operator` or `create_plan`. Argument problems are
    /// reported in the output, never as a failure.
    pub fn handle_tool_call(&self, call: &ToolCall) -> ToolOutput {
        let output = match self.dispatch(call) {
            Ok(output) | Err(output) => output,
        };

        ToolOutput::new(call.id.clone(), output)
    }

    fn dispatch(&self, call: &ToolCall) -> Result<String, String> {
        match call.name.as_str() {
            "apply_operator" => {
                let arguments = parse_arguments(&call.arguments)?;
                let start_conditions = string_list(&arguments, "start_conditions")?;
                let operator = string(&arguments, "operator")?;

                Ok(self.apply_operator(&start_conditions, &operator))
            }
            "create_plan" => {
                let arguments = parse_arguments(&call.arguments)?;
                let start_conditions = string_list(&arguments, "start_conditions")?;
                let goal_conditions = string_list(&arguments, "goal_conditions")?;

                Ok(self.create_plan(&start_conditions, &goal_conditions))
            }
            other => Err(format!(
                "Error: UnknownTool - '{other}' is not a known tool, use 'apply_operator' or 'create_plan'"
            )),
        }
    }
}

fn parse_arguments(arguments: &str) -> Result<Map<String, Value>, String> {
    if arguments.trim().is_empty() {
        return Err(missing_arguments());
    }

    match serde_json::from_str::<Value>(arguments) {
        Ok(Value::Object(map)) if map.is_empty() => Err(missing_arguments()),
        Ok(Value::Object(map)) => Ok(map),
        Ok(Value::Null) => Err(missing_arguments()),
        Ok(_) => Err("Error: InvalidArguments - Arguments must be a JSON object".to_string()),
        Err(e) => Err(format!("Error: InvalidArguments - Arguments are not valid JSON: {e}")),
    }
}

fn missing_arguments() -> String {
    "Error: MissingArguments - No arguments provided".to_string()
}

fn field<'a>(arguments: &'a Map<String, Value>, name: &str) -> Result<&'a Value, String> {
    arguments
        .get(name)
        .ok_or_else(|| format!("Error: MissingArguments - Missing argument '{name}'"))
}

fn string_list(arguments: &Map<String, Value>, name: &str) -> Result<Vec<String>, String> {
    let invalid = || format!("Error: InvalidArguments - Invalid format for '{name}', expected a list of condition strings");

    field(arguments, name)?
        .as_array()
        .ok_or_else(invalid)?
        .iter()
        .map(|value| value.as_str().map(str::to_string).ok_or_else(invalid))
        .collect()
}

fn string(arguments: &Map<String, Value>, name: &str) -> Result<String, String> {
    field(arguments, name)?
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| format!("Error: InvalidArguments - Invalid format for '{name}', expected a string"))
}
