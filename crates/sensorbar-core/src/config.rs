//! Sensor configuration.
//!
//! Built once at startup and never mutated afterwards. Keys follow the
//! kebab-case names used in the configuration file (`hwmon-path`,
//! `critical-threshold`, `format-warning`, ...).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Kind of quantity a sensor reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SensorType {
    /// Millidegrees Celsius on Linux, deci-Kelvin via sysctl.
    #[default]
    Temperature,
    /// Revolutions per minute.
    Fan,
    /// Microwatts.
    Power,
}

impl SensorType {
    /// Single-field template used when no format is configured.
    pub fn default_format(&self) -> &'static str {
        match self {
            SensorType::Temperature => "{temperatureC}°C",
            SensorType::Fan => "{fan} RPM",
            SensorType::Power => "{power}W",
        }
    }
}

impl std::fmt::Display for SensorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SensorType::Temperature => write!(f, "temperature"),
            SensorType::Fan => write!(f, "fan"),
            SensorType::Power => write!(f, "power"),
        }
    }
}

/// A single path or an ordered list of candidate paths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathList {
    One(PathBuf),
    Many(Vec<PathBuf>),
}

impl PathList {
    /// Iterates the candidates in configured order.
    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        let paths: &[PathBuf] = match self {
            PathList::One(path) => std::slice::from_ref(path),
            PathList::Many(paths) => paths,
        };
        paths.iter().map(PathBuf::as_path)
    }
}

impl From<&str> for PathList {
    fn from(path: &str) -> Self {
        PathList::One(PathBuf::from(path))
    }
}

impl<P: Into<PathBuf>> From<Vec<P>> for PathList {
    fn from(paths: Vec<P>) -> Self {
        PathList::Many(paths.into_iter().map(Into::into).collect())
    }
}

/// Icons substituted for the `{icon}` placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FormatIcons {
    /// Always the same icon.
    Single(String),
    /// Icons ordered from lowest to highest value.
    Ramp(Vec<String>),
    /// Icon sets keyed by alt name, with `default` as fallback.
    Keyed(BTreeMap<String, FormatIcons>),
}

impl FormatIcons {
    /// Picks the icon for `value` relative to `max` (100 when zero).
    pub fn icon(&self, value: i64, alt: &str, max: i64) -> String {
        match self {
            FormatIcons::Single(icon) => icon.clone(),
            FormatIcons::Ramp(icons) => {
                if icons.is_empty() {
                    return String::new();
                }
                let n = icons.len() as i64;
                let bound = if max == 0 { 100 } else { max };
                let step = (bound / n).max(1);
                let idx = (value / step).clamp(0, n - 1);
                icons[idx as usize].clone()
            }
            FormatIcons::Keyed(sets) => sets
                .get(alt)
                .or_else(|| sets.get("default"))
                .map(|set| set.icon(value, alt, max))
                .unwrap_or_default(),
        }
    }
}

/// Static configuration of one sensor instance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SensorConfig {
    /// Quantity to read
    #[serde(rename = "type", default)]
    pub sensor_type: SensorType,

    /// Explicit input file, or candidates tried in order
    #[serde(default)]
    pub hwmon_path: Option<PathList>,

    /// Directories whose `hwmon*` subdirectory holds `input_filename`
    #[serde(default)]
    pub hwmon_path_abs: Option<PathList>,

    /// Input file name inside the hwmon directory (e.g. "temp1_input")
    #[serde(default)]
    pub input_filename: Option<String>,

    /// Thermal zone index (default 0)
    #[serde(default)]
    pub thermal_zone: Option<u32>,

    /// Warning threshold in the primary display unit
    #[serde(default)]
    pub warning_threshold: Option<i64>,

    /// Critical threshold in the primary display unit, also the icon bound
    #[serde(default)]
    pub critical_threshold: Option<i64>,

    /// Default display template
    #[serde(default)]
    pub format: Option<String>,

    /// Display template used while at or above the warning threshold
    #[serde(default)]
    pub format_warning: Option<String>,

    /// Display template used while at or above the critical threshold
    #[serde(default)]
    pub format_critical: Option<String>,

    /// Tooltip template
    #[serde(default)]
    pub tooltip_format: Option<String>,

    /// Icons for the `{icon}` placeholder
    #[serde(default)]
    pub format_icons: Option<FormatIcons>,
}

impl SensorConfig {
    /// Creates an otherwise empty configuration for the given sensor type.
    pub fn new(sensor_type: SensorType) -> Self {
        Self {
            sensor_type,
            ..Default::default()
        }
    }

    /// Thermal zone index, defaulting to zone 0.
    pub fn thermal_zone(&self) -> u32 {
        self.thermal_zone.unwrap_or(0)
    }

    /// Upper bound of the icon ramp (critical threshold, or 0 when unset).
    pub fn icon_bound(&self) -> i64 {
        self.critical_threshold.unwrap_or(0)
    }

    /// Default display template.
    ///
    /// Without a configured `format` this falls back to the sensor type's
    /// own field (`{fan} RPM`, `{power}W`) rather than always
    /// `{temperatureC}°C`, so fan and power sensors show their value.
    pub fn display_format(&self) -> &str {
        self.format
            .as_deref()
            .unwrap_or_else(|| self.sensor_type.default_format())
    }

    /// Tooltip template.
    pub fn tooltip_template(&self) -> &str {
        self.tooltip_format
            .as_deref()
            .unwrap_or_else(|| self.sensor_type.default_format())
    }

    /// Resolves the `{icon}` token for a rounded sample.
    pub fn icon_for(&self, value: i64) -> String {
        self.format_icons
            .as_ref()
            .map(|icons| icons.icon(value, "", self.icon_bound()))
            .unwrap_or_default()
    }
}
