//! Chat state indicators.
//!
//! Renders the controller's state transitions while a request is in flight
//! so the user sees what is happening. Indicators go to **stderr** so
//! stdout carries only the answers.

use std::io::Write;

use clap::ValueEnum;

use crate::chat::ChatState;

/// A state change worth showing to the user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChatProgressEvent {
    State(ChatState),
    /// The request failed with this message.
    Failed(String),
}

/// Reports chat progress. Implementations write to stderr (human or JSON).
pub trait ChatProgressReporter: Send + Sync {
    fn report(&self, event: &ChatProgressEvent);
}

const LOADING_LINE: &str = "Buscando documentos...";
const STREAMING_LINE: &str = "Gerando resposta...";

/// Human-readable line for an event, or `None` if nothing should be shown.
pub fn indicator_line(event: &ChatProgressEvent) -> Option<String> {
    match event {
        ChatProgressEvent::State(ChatState::Loading) => Some(LOADING_LINE.to_string()),
        ChatProgressEvent::State(ChatState::Streaming) => Some(STREAMING_LINE.to_string()),
        ChatProgressEvent::State(_) => None,
        ChatProgressEvent::Failed(message) => {
            Some(format!("Erro: {message}\nType /retry to try again."))
        }
    }
}

/// Human-friendly indicators on stderr.
pub struct StderrProgress;

impl ChatProgressReporter for StderrProgress {
    fn report(&self, event: &ChatProgressEvent) {
        if let Some(line) = indicator_line(event) {
            let mut err = std::io::stderr().lock();
            let _ = writeln!(err, "{line}");
            let _ = err.flush();
        }
    }
}

/// Machine-readable progress: one JSON object per line on stderr.
pub struct JsonProgress;

impl ChatProgressReporter for JsonProgress {
    fn report(&self, event: &ChatProgressEvent) {
        let obj = match event {
            ChatProgressEvent::State(state) => serde_json::json!({
                "event": "state",
                "state": state,
            }),
            ChatProgressEvent::Failed(message) => serde_json::json!({
                "event": "error",
                "message": message,
            }),
        };
        if let Ok(line) = serde_json::to_string(&obj) {
            let mut err = std::io::stderr().lock();
            let _ = writeln!(err, "{line}");
            let _ = err.flush();
        }
    }
}

/// No-op reporter when progress is disabled.
pub struct NoProgress;

impl ChatProgressReporter for NoProgress {
    fn report(&self, _event: &ChatProgressEvent) {}
}

/// Progress mode for the CLI: off, human (stderr), or JSON (stderr).
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum ProgressMode {
    Off,
    Human,
    Json,
}

impl ProgressMode {
    /// Default: human progress when stderr is a TTY, otherwise off.
    pub fn default_for_tty() -> Self {
        if atty::is(atty::Stream::Stderr) {
            ProgressMode::Human
        } else {
            ProgressMode::Off
        }
    }

    pub fn reporter(&self) -> Box<dyn ChatProgressReporter> {
        match self {
            ProgressMode::Off => Box::new(NoProgress),
            ProgressMode::Human => Box::new(StderrProgress),
            ProgressMode::Json => Box::new(JsonProgress),
        }
    }
}
