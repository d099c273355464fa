use serde::Serialize;
use serde_json::{json, Value};

use crate::output::{CommandOutput, ErrorReport, OutputHandler, RequestResult, RequestSummary};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Envelope printed once per invocation in agent mode. Fields are declared in
/// key order.
#[derive(Debug, Serialize)]
pub struct AgentResponse<'a> {
    pub error: Option<&'a ErrorReport>,
    pub mode: &'static str,
    pub operation: &'a str,
    pub result: Option<&'a RequestResult>,
    pub success: bool,
    pub timestamp: &'a str,
    pub version: &'static str,
}

impl<'a> From<&'a CommandOutput> for AgentResponse<'a> {
    fn from(output: &'a CommandOutput) -> Self {
        Self {
            success: output.ok,
            version: VERSION,
            mode: "agent",
            operation: &output.command,
            timestamp: &output.timestamp,
            result: output.result.as_ref(),
            error: output.error.as_ref(),
        }
    }
}

// Going through `Value` orders every object by key.
pub(crate) fn render_agent_json(output: &CommandOutput) -> Result<String, serde_json::Error> {
    let value = serde_json::to_value(AgentResponse::from(output))?;
    serde_json::to_string_pretty(&value)
}

fn serialization_failure(output: &CommandOutput, err: &serde_json::Error) -> Value {
    json!({
        "success": false,
        "version": VERSION,
        "mode": "agent",
        "operation": output.command,
        "timestamp": output.timestamp,
        "result": null,
        "error": {
            "code": 9999,
            "name": "INTERNAL_ERROR",
            "message": format!("serialization failed: {err}"),
        },
    })
}

#[derive(Debug, Default)]
pub struct AgentOutputHandler;

impl OutputHandler for AgentOutputHandler {
    fn start_operation(&mut self, _operation: &str) {}

    fn progress(&mut self, _message: &str) {}

    fn display_request(&mut self, _summary: &RequestSummary) {}

    fn complete(&mut self, output: &CommandOutput) {
        match render_agent_json(output) {
            Ok(json) => println!("{json}"),
            Err(err) => println!("{}", serialization_failure(output, &err)),
        }
    }
}
