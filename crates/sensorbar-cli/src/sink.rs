//! Line-oriented display sink.
//!
//! Each update becomes one JSON object on stdout, e.g.
//! `{"name":"cpu","text":"52°C","tooltip":"52°C","class":"warning","hidden":false}`.

use sensorbar_core::{DisplaySink, Output};
use serde::Serialize;
use std::io::Write;
use tracing::warn;

#[derive(Debug, Serialize)]
struct Line<'a> {
    name: &'a str,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    tooltip: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    class: Option<&'static str>,
    hidden: bool,
}

/// Writes every output of one sensor to stdout as a JSON line.
#[derive(Debug, Clone)]
pub struct StdoutSink {
    name: String,
}

impl StdoutSink {
    /// Creates a sink tagging lines with `name`.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }

    /// Serializes an output the way it is printed.
    pub fn to_line(&self, output: &Output) -> serde_json::Result<String> {
        serde_json::to_string(&Line {
            name: &self.name,
            text: &output.text,
            tooltip: output.tooltip.as_deref(),
            class: output.classification.css_class(),
            hidden: output.hidden,
        })
    }
}

impl DisplaySink for StdoutSink {
    fn update(&mut self, output: Output) {
        let line = match self.to_line(&output) {
            Ok(line) => line,
            Err(e) => {
                warn!("Failed to serialize output of {}: {}", self.name, e);
                return;
            }
        };

        // Lock so lines from concurrent pollers never interleave.
        let mut stdout = std::io::stdout().lock();
        if let Err(e) = writeln!(stdout, "{}", line).and_then(|_| stdout.flush()) {
            warn!("Failed to write output of {}: {}", self.name, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sensorbar_core::Classification;

    #[test]
    fn test_line_with_class_and_tooltip() {
        let sink = StdoutSink::new("cpu");
        let output = Output {
            text: "85°C!!".to_string(),
            tooltip: Some("85°C".to_string()),
            hidden: false,
            classification: Classification::Critical,
        };
        assert_eq!(
            sink.to_line(&output).unwrap(),
            r#"{"name":"cpu","text":"85°C!!","tooltip":"85°C","class":"critical","hidden":false}"#
        );
    }

    #[test]
    fn test_hidden_line_omits_optional_fields() {
        let sink = StdoutSink::new("fan");
        let output = Output {
            hidden: true,
            ..Default::default()
        };
        assert_eq!(
            sink.to_line(&output).unwrap(),
            r#"{"name":"fan","text":"","hidden":true}"#
        );
    }

    #[test]
    fn test_unavailable_class() {
        let sink = StdoutSink::new("power");
        let line = sink
            .to_line(&Output::unavailable("Can't read from /x", false))
            .unwrap();
        assert!(line.contains(r#""class":"unavailable""#));
    }
}
