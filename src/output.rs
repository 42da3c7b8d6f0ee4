// ABOUTME: Output formatting for CLI results.
// ABOUTME: Supports pretty JSON for humans and JSON lines for scripting.

use podwrap::record::Record;
use serde::Serialize;

/// Output mode for CLI results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Pretty-printed JSON and plain messages
    Normal,
    /// JSON lines for scripting
    Json,
}

/// Handles CLI output based on the configured mode.
pub struct Output {
    mode: OutputMode,
}

impl Output {
    pub fn new(mode: OutputMode) -> Self {
        Self { mode }
    }

    /// Print a list of records.
    pub fn records(&self, records: &[Record]) {
        match self.mode {
            OutputMode::Normal => self.pretty(records),
            OutputMode::Json => {
                for record in records {
                    if let Ok(json) = serde_json::to_string(record) {
                        println!("{json}");
                    }
                }
            }
        }
    }

    /// Print a single record.
    pub fn record(&self, record: &Record) {
        match self.mode {
            OutputMode::Normal => self.pretty(record),
            OutputMode::Json => {
                if let Ok(json) = serde_json::to_string(record) {
                    println!("{json}");
                }
            }
        }
    }

    /// Print a plain message, wrapped in an event object in JSON mode.
    pub fn message(&self, event: &str, message: &str) {
        match self.mode {
            OutputMode::Normal => println!("{message}"),
            OutputMode::Json => {
                if let Ok(json) = serde_json::to_string(&JsonEvent { event, message }) {
                    println!("{json}");
                }
            }
        }
    }

    /// Print an error message.
    pub fn error(&self, message: &str) {
        match self.mode {
            OutputMode::Normal => eprintln!("Error: {message}"),
            OutputMode::Json => {
                let event = JsonEvent {
                    event: "error",
                    message,
                };
                if let Ok(json) = serde_json::to_string(&event) {
                    eprintln!("{json}");
                }
            }
        }
    }

    fn pretty<T: Serialize + ?Sized>(&self, value: &T) {
        if let Ok(json) = serde_json::to_string_pretty(value) {
            println!("{json}");
        }
    }
}

#[derive(Serialize)]
struct JsonEvent<'a> {
    event: &'a str,
    message: &'a str,
}
