//! Threshold classification.

use crate::SensorConfig;

/// State of the latest sample relative to the configured thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Classification {
    /// Below every configured threshold.
    #[default]
    Normal,
    /// At or above the warning threshold.
    Warning,
    /// At or above the critical threshold.
    Critical,
    /// The sample could not be read this cycle. Never returned by [`classify`].
    Unavailable,
}

impl Classification {
    /// Style class a sink may attach, if any.
    pub fn css_class(&self) -> Option<&'static str> {
        match self {
            Classification::Normal => None,
            Classification::Warning => Some("warning"),
            Classification::Critical => Some("critical"),
            Classification::Unavailable => Some("unavailable"),
        }
    }
}

/// Classifies a rounded sample. Critical wins over warning; absent thresholds never trigger.
pub fn classify(sample: i64, config: &SensorConfig) -> Classification {
    if config.critical_threshold.is_some_and(|t| sample >= t) {
        Classification::Critical
    } else if config.warning_threshold.is_some_and(|t| sample >= t) {
        Classification::Warning
    } else {
        Classification::Normal
    }
}
