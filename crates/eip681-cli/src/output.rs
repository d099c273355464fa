use chrono::{SecondsFormat, Utc};
use eip681_core::{IntentKind, PaymentUri};
use serde::Serialize;
use serde_json::Value;

/// What was built, for display before completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestSummary {
    pub kind: String,
    pub chain_id: u64,
    pub target: String,
    pub recipient: String,
    pub base_units: String,
    pub uri: String,
}

/// Result of a successful command. `data_uri` and `file` are set by `qr` only.
///
/// Fields are declared in wire-key order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestResult {
    pub base_units: String,
    pub chain_id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    pub kind: IntentKind,
    pub payload_bytes: usize,
    pub uri: String,
}

impl From<&PaymentUri> for RequestResult {
    fn from(uri: &PaymentUri) -> Self {
        Self {
            uri: uri.uri.clone(),
            kind: uri.kind,
            chain_id: uri.chain_id.as_u64(),
            base_units: uri.base_units.clone(),
            payload_bytes: uri.payload_bytes,
            data_uri: None,
            file: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorReport {
    pub code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
    pub message: String,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub ok: bool,
    pub command: String,
    pub message: String,
    pub timestamp: String,
    pub result: Option<RequestResult>,
    pub error: Option<ErrorReport>,
}

impl CommandOutput {
    pub fn success(command: &str, message: &str, result: RequestResult) -> Self {
        Self {
            ok: true,
            command: command.to_string(),
            message: message.to_string(),
            timestamp: timestamp(),
            result: Some(result),
            error: None,
        }
    }

    pub fn failure(command: &str, error: ErrorReport) -> Self {
        Self {
            ok: false,
            command: command.to_string(),
            message: error.message.clone(),
            timestamp: timestamp(),
            result: None,
            error: Some(error),
        }
    }

    /// The image produced by `qr`: its file path, or the data URI when none was written.
    pub fn artifact(&self) -> Option<&str> {
        let result = self.result.as_ref()?;
        result.file.as_deref().or(result.data_uri.as_deref())
    }
}

pub trait OutputHandler {
    fn start_operation(&mut self, operation: &str);
    fn progress(&mut self, message: &str);
    fn display_request(&mut self, summary: &RequestSummary);
    fn complete(&mut self, output: &CommandOutput);
}

fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}
