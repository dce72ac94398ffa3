//! Sensorbar Core Library
//!
//! Resolves a hardware sensor exposed by the kernel (hwmon, thermal zones,
//! or FreeBSD sysctl), samples it on a fixed interval, classifies each sample
//! against warning/critical thresholds and renders display text for an
//! external sink.

pub mod config;
pub mod error;
pub mod format;
pub mod poller;
pub mod reading;
pub mod source;
pub mod threshold;

pub use config::{FormatIcons, PathList, SensorConfig, SensorType};
pub use error::{Error, Result};
pub use format::{render, Output};
pub use poller::{DisplaySink, PollerHandle, SensorModule};
pub use reading::Reading;
pub use source::{FileSource, SensorSource, SysctlSource};
pub use threshold::{classify, Classification};

/// Default polling interval in seconds.
pub const DEFAULT_INTERVAL_SECS: u64 = 10;
