//! Event command for linkgate.
//!
//! Reads one JSON-encoded payment sheet event and prints the name and params
//! it reports as.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::analytics::PaymentSheetEvent;
use crate::error::{LinkGateError, Result};

/// Options for the event command.
#[derive(Debug, Clone, Default)]
pub struct EventOptions {
    /// Output as JSON.
    pub json: bool,
    /// Suppress output.
    pub quiet: bool,
}

/// Output format for the event command.
#[derive(Debug, Clone, Serialize)]
pub struct EventOutput {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_name: Option<String>,
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub params: Map<String, Value>,
    /// Error message if the input could not be read.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl EventOutput {
    pub fn success(event: &PaymentSheetEvent) -> Self {
        let record = event.to_record();
        Self {
            success: true,
            event_name: Some(record.event_name),
            params: record.params,
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            event_name: None,
            params: Map::new(),
            error: Some(error.into()),
        }
    }
}

/// Parse an event from JSON.
pub fn parse_event(input: &str) -> Result<PaymentSheetEvent> {
    if input.trim().is_empty() {
        return Err(LinkGateError::input("expected a JSON event on stdin"));
    }
    Ok(serde_json::from_str(input)?)
}

/// The event command implementation.
#[derive(Debug, Default)]
pub struct EventCommand;

impl EventCommand {
    pub fn new() -> Self {
        Self
    }

    /// Run the event command on raw JSON input.
    pub fn run(&self, input: &str) -> EventOutput {
        match parse_event(input) {
            Ok(event) => {
                tracing::debug!(event = %event.event_name(), "rendered analytics event");
                EventOutput::success(&event)
            }
            Err(e) => EventOutput::failure(e.to_string()),
        }
    }

    /// Format output based on options.
    pub fn format_output(&self, output: &EventOutput, options: &EventOptions) -> String {
        if options.quiet {
            return String::new();
        }

        if options.json {
            serde_json::to_string_pretty(output).unwrap_or_else(|_| "{}".to_string())
        } else {
            self.format_human_readable(output)
        }
    }

    fn format_human_readable(&self, output: &EventOutput) -> String {
        if !output.success {
            return format!(
                "Event failed: {}\n",
                output.error.as_deref().unwrap_or("unknown error")
            );
        }

        let mut out = format!("{}\n", output.event_name.as_deref().unwrap_or_default());
        let mut keys: Vec<&String> = output.params.keys().collect();
        keys.sort();
        for key in keys {
            out.push_str(&format!("  {} = {}\n", key, output.params[key.as_str()]));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FORM_SHOWN: &str = r#"{"event": "show_payment_option_form", "code": "card"}"#;

    #[test]
    fn test_event_success() {
        let output = EventCommand::new().run(FORM_SHOWN);

        assert!(output.success);
        assert_eq!(output.event_name.as_deref(), Some("mc_form_shown"));
        assert_eq!(output.params["selected_lpm"], "card");
        assert_eq!(output.params["link_enabled"], false);
        assert!(output.error.is_none());
    }

    #[test]
    fn test_event_empty_input() {
        let output = EventCommand::new().run("   \n");

        assert!(!output.success);
        assert!(output.error.unwrap().contains("expected a JSON event"));
    }

    #[test]
    fn test_event_unknown_event() {
        let output = EventCommand::new().run(r#"{"event": "mc_not_a_thing"}"#);

        assert!(!output.success);
        assert!(output.event_name.is_none());
        assert!(output.params.is_empty());
    }

    #[test]
    fn test_format_output_json() {
        let cmd = EventCommand::new();
        let output = cmd.run(FORM_SHOWN);
        let options = EventOptions {
            json: true,
            quiet: false,
        };
        let json: Value = serde_json::from_str(&cmd.format_output(&output, &options)).unwrap();

        assert_eq!(json["success"], true);
        assert_eq!(json["event_name"], "mc_form_shown");
        assert_eq!(json["params"]["google_pay_enabled"], false);
        assert!(json.get("error").is_none());
    }

    #[test]
    fn test_format_output_human_sorted() {
        let cmd = EventCommand::new();
        let output = cmd.run(FORM_SHOWN);
        let formatted = cmd.format_output(&output, &EventOptions::default());

        let lines: Vec<&str> = formatted.lines().collect();
        assert_eq!(lines[0], "mc_form_shown");
        assert_eq!(lines[1], "  google_pay_enabled = false");
        assert_eq!(lines[4], "  selected_lpm = \"card\"");
    }

    #[test]
    fn test_format_output_human_failure() {
        let cmd = EventCommand::new();
        let output = EventOutput::failure("bad input");
        let formatted = cmd.format_output(&output, &EventOptions::default());
        assert_eq!(formatted, "Event failed: bad input\n");
    }

    #[test]
    fn test_format_output_quiet() {
        let cmd = EventCommand::new();
        let output = cmd.run(FORM_SHOWN);
        let options = EventOptions {
            json: false,
            quiet: true,
        };
        assert!(cmd.format_output(&output, &options).is_empty());
    }
}
