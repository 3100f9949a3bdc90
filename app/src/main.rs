use std::io::{BufRead, Write};

use anyhow::Context as _;
use planning_tutor::settings::Settings;
use planning_tutor::tool::{ToolCall, ToolOutput};

//one JSON tool call per stdin line, one JSON tool output per stdout line
pub fn main() -> anyhow::Result<()> {
    let settings = Settings::new().context("Error reading configuration")?;

    settings
        .monitoring
        .init()
        .map_err(|e| anyhow::anyhow!("Error initializing monitoring: {e}"))?;

    let tools = settings.planner.new_tools().context("Error initializing planner")?;
    tracing::info!(operators = ?tools.operators().names(), "Planning tools ready");

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout().lock();

    for line in stdin.lock().lines() {
        let line = line.context("Error reading tool call")?;
        if line.trim().is_empty() {
            continue;
        }

        let output = match serde_json::from_str::<ToolCall>(&line) {
            Ok(call) => {
                tracing::debug!(id = %call.id, name = %call.name, "Handling tool call");
                tools.handle_tool_call(&call)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Malformed tool call");
                ToolOutput::new("", format!("Error: InvalidToolCall - {e}"))
            }
        };

        serde_json::to_writer(&mut stdout, &output).context("Error writing tool output")?;
        writeln!(stdout).context("Error writing tool output")?;
        stdout.flush().context("Error writing tool output")?;
    }

    tracing::info!("Input closed, shutting down");
    Ok(())
}
