//! Output mode for CLI results - human text or JSON documents

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    #[default]
    Human,
    Json,
}

impl OutputMode {
    pub fn from_flag(json: bool) -> Self {
        if json { OutputMode::Json } else { OutputMode::Human }
    }

    pub fn is_human(&self) -> bool {
        matches!(self, OutputMode::Human)
    }
}

#[derive(Debug, Serialize)]
struct Envelope<'a, T: Serialize> {
    status: &'a str,
    command: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Render a success document: `{"status":"ok","command":..,"data":..}`
pub fn success_document<T: Serialize>(command: &str, data: T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&Envelope {
        status: "ok",
        command,
        data: Some(data),
        error: None,
    })
}

/// Render an error document: `{"status":"error","command":..,"error":..}`
pub fn error_document(command: &str, message: &str) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&Envelope::<()> {
        status: "error",
        command,
        data: None,
        error: Some(message.to_string()),
    })
}

/// Print a success document when in JSON mode. Human output is left to the caller.
pub fn emit_success<T: Serialize>(mode: OutputMode, command: &str, data: T) -> serde_json::Result<()> {
    if mode == OutputMode::Json {
        println!("{}", success_document(command, data)?);
    }
    Ok(())
}
