//! Display and tooltip text rendering.
//!
//! Templates use named placeholders such as `{temperatureC}` or
//! `{icon}`. A placeholder may carry a fill/align/width spec
//! (`{fan:>5}`, `{icon:*^3}`); `{{` and `}}` produce literal braces.
//! Unknown names are left in the output untouched.

use crate::{Classification, Reading, SensorConfig};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{\{|\}\}|\{([A-Za-z]+)(?::([^{}]*))?\}").expect("Invalid placeholder regex")
});

static SPEC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:(.)?([<>^]))?(\d*)$").expect("Invalid format spec regex"));

/// Result of one formatting pass, handed to the display sink.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Output {
    /// Display text (empty when hidden)
    pub text: String,
    /// Tooltip text, `None` when tooltips are disabled or nothing is shown
    pub tooltip: Option<String>,
    /// The selected template was empty; the sink should hide its container
    pub hidden: bool,
    /// Classification the text was rendered for
    pub classification: Classification,
}

impl Output {
    /// Output for a cycle whose sample could not be read.
    pub fn unavailable(reason: &str, tooltips: bool) -> Self {
        Self {
            text: String::new(),
            tooltip: tooltips.then(|| reason.to_string()),
            hidden: false,
            classification: Classification::Unavailable,
        }
    }
}

/// A placeholder value.
#[derive(Debug, Clone)]
enum Arg {
    Int(i64),
    Text(String),
}

/// Values substituted into templates for one reading.
#[derive(Debug, Clone)]
struct Placeholders {
    temperature_c: i64,
    temperature_f: i64,
    temperature_k: i64,
    fan: i64,
    power: i64,
    icon: String,
}

impl Placeholders {
    fn new(reading: &Reading, config: &SensorConfig) -> Self {
        Self {
            temperature_c: reading.celsius(),
            temperature_f: reading.fahrenheit(),
            temperature_k: reading.kelvin(),
            fan: reading.rpm(),
            power: reading.watts(),
            icon: config.icon_for(reading.rounded()),
        }
    }

    fn lookup(&self, name: &str) -> Option<Arg> {
        match name {
            "temperatureC" => Some(Arg::Int(self.temperature_c)),
            "temperatureF" => Some(Arg::Int(self.temperature_f)),
            "temperatureK" => Some(Arg::Int(self.temperature_k)),
            "fan" => Some(Arg::Int(self.fan)),
            "power" => Some(Arg::Int(self.power)),
            "icon" => Some(Arg::Text(self.icon.clone())),
            _ => None,
        }
    }
}

/// Pads `value` according to a `[[fill]align][width]` spec.
fn apply_spec(value: String, numeric: bool, spec: Option<&str>) -> String {
    let Some(caps) = spec.and_then(|s| SPEC.captures(s)) else {
        return value;
    };
    let width: usize = caps
        .get(3)
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0);
    let len = value.chars().count();
    if len >= width {
        return value;
    }

    let fill = caps
        .get(1)
        .and_then(|m| m.as_str().chars().next())
        .unwrap_or(' ');
    let align = caps
        .get(2)
        .map(|m| m.as_str())
        .unwrap_or(if numeric { ">" } else { "<" });
    let pad = width - len;
    let (left, right) = match align {
        ">" => (pad, 0),
        "^" => (pad / 2, pad - pad / 2),
        _ => (0, pad),
    };

    let mut out = String::with_capacity(value.len() + pad);
    out.extend(std::iter::repeat(fill).take(left));
    out.push_str(&value);
    out.extend(std::iter::repeat(fill).take(right));
    out
}

fn substitute(template: &str, values: &Placeholders) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures| {
            let whole = &caps[0];
            match whole {
                "{{" => return "{".to_string(),
                "}}" => return "}".to_string(),
                _ => {}
            }

            let spec = caps.get(2).map(|m| m.as_str());
            match values.lookup(&caps[1]) {
                Some(Arg::Int(n)) => apply_spec(n.to_string(), true, spec),
                Some(Arg::Text(s)) => apply_spec(s, false, spec),
                None => whole.to_string(),
            }
        })
        .into_owned()
}

/// Chooses the display template for a classification.
fn select_template(classification: Classification, config: &SensorConfig) -> &str {
    let specific = match classification {
        Classification::Critical => config.format_critical.as_deref(),
        Classification::Warning => config.format_warning.as_deref(),
        _ => None,
    };
    specific.unwrap_or_else(|| config.display_format())
}

/// Renders display and tooltip text for one reading.
///
/// `tooltips` is owned by the display sink's configuration; the tooltip is
/// skipped entirely when it is false.
pub fn render(
    reading: &Reading,
    classification: Classification,
    config: &SensorConfig,
    tooltips: bool,
) -> Output {
    let template = select_template(classification, config);
    if template.is_empty() {
        return Output {
            hidden: true,
            classification,
            ..Default::default()
        };
    }

    let values = Placeholders::new(reading, config);
    let text = substitute(template, &values);
    let tooltip = tooltips.then(|| substitute(config.tooltip_template(), &values));

    Output {
        text,
        tooltip,
        hidden: false,
        classification,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{classify, FormatIcons, SensorType};

    fn temperature(celsius: i64) -> Reading {
        Reading::from_raw(SensorType::Temperature, celsius * 1000)
    }

    #[test]
    fn test_critical_template_scenario() {
        let config = SensorConfig {
            critical_threshold: Some(80),
            warning_threshold: Some(60),
            format_critical: Some("{icon} {temperatureC}°C!!".to_string()),
            format_icons: Some(FormatIcons::Ramp(vec!["cool".into(), "hot".into()])),
            ..SensorConfig::new(SensorType::Temperature)
        };

        let reading = Reading::from_raw(SensorType::Temperature, 85000);
        let classification = classify(reading.rounded(), &config);
        assert_eq!(classification, Classification::Critical);

        let output = render(&reading, classification, &config, true);
        assert_eq!(output.text, "hot 85°C!!");
        assert_eq!(output.tooltip.as_deref(), Some("85°C"));
        assert!(!output.hidden);
    }

    #[test]
    fn test_warning_without_template_uses_default() {
        let config = SensorConfig {
            warning_threshold: Some(60),
            format: Some("{temperatureC}C / {temperatureF}F".to_string()),
            ..SensorConfig::new(SensorType::Temperature)
        };

        let output = render(&temperature(65), Classification::Warning, &config, false);
        assert_eq!(output.text, "65C / 149F");
        assert_eq!(output.tooltip, None);
        assert_eq!(output.classification, Classification::Warning);
    }

    #[test]
    fn test_empty_template_hides() {
        let config = SensorConfig {
            format: Some(String::new()),
            format_critical: Some("hot".to_string()),
            ..SensorConfig::new(SensorType::Temperature)
        };

        let output = render(&temperature(40), Classification::Normal, &config, true);
        assert!(output.hidden);
        assert!(output.text.is_empty());
        assert_eq!(output.tooltip, None);

        let output = render(&temperature(40), Classification::Critical, &config, true);
        assert!(!output.hidden);
        assert_eq!(output.text, "hot");
    }

    #[test]
    fn test_empty_critical_template_hides() {
        let config = SensorConfig {
            format_critical: Some(String::new()),
            ..SensorConfig::new(SensorType::Temperature)
        };
        assert!(render(&temperature(99), Classification::Critical, &config, true).hidden);
    }

    #[test]
    fn test_unused_placeholders_are_zero() {
        let config = SensorConfig {
            format: Some("{fan} {power} {temperatureC} {temperatureF} {temperatureK}".into()),
            ..SensorConfig::new(SensorType::Fan)
        };
        let reading = Reading::from_raw(SensorType::Fan, 2100);
        let output = render(&reading, Classification::Normal, &config, true);
        assert_eq!(output.text, "2100 0 0 0 0");
        assert_eq!(output.tooltip.as_deref(), Some("2100 RPM"));
    }

    #[test]
    fn test_power_tooltip_default_and_custom() {
        let reading = Reading::from_raw(SensorType::Power, 2_500_000);
        let config = SensorConfig::new(SensorType::Power);
        let output = render(&reading, Classification::Normal, &config, true);
        assert_eq!(output.text, "3W");
        assert_eq!(output.tooltip.as_deref(), Some("3W"));

        let config = SensorConfig {
            tooltip_format: Some("Draw: {power} W".into()),
            ..config
        };
        let output = render(&reading, Classification::Normal, &config, true);
        assert_eq!(output.tooltip.as_deref(), Some("Draw: 3 W"));
    }

    #[test]
    fn test_kelvin_and_icon_without_icons() {
        let config = SensorConfig {
            format: Some("{icon}{temperatureK}K".into()),
            ..SensorConfig::default()
        };
        let output = render(&temperature(45), Classification::Normal, &config, false);
        assert_eq!(output.text, "318K");
    }

    #[test]
    fn test_escapes_and_unknown_placeholders() {
        let config = SensorConfig {
            format: Some("{{{temperatureC}}} {load}".into()),
            ..SensorConfig::default()
        };
        let output = render(&temperature(50), Classification::Normal, &config, false);
        assert_eq!(output.text, "{50} {load}");
    }

    #[test]
    fn test_width_and_alignment() {
        let config = SensorConfig {
            format: Some("[{temperatureC:>4}][{temperatureC:<4}][{icon:*^5}][{fan:3}]".into()),
            format_icons: Some(FormatIcons::Single("T".into())),
            ..SensorConfig::default()
        };
        let output = render(&temperature(7), Classification::Normal, &config, false);
        assert_eq!(output.text, "[   7][7   ][**T**][  0]");
    }

    #[test]
    fn test_unavailable_output() {
        let output = Output::unavailable("Can't read from /x", true);
        assert_eq!(output.classification, Classification::Unavailable);
        assert_eq!(output.tooltip.as_deref(), Some("Can't read from /x"));
        assert!(!output.hidden);
        assert_eq!(Output::unavailable("x", false).tooltip, None);
    }
}
