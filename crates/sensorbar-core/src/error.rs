//! Error types for sensor resolution and sampling.

use crate::SensorType;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when resolving or reading a sensor.
#[derive(Error, Debug)]
pub enum Error {
    /// None of the configured candidates produced a source.
    #[error("No {0} sensor found")]
    NoSensorFound(SensorType),

    /// The resolved file could not be opened for reading at construction.
    #[error("Can't open {}: {source}", .path.display())]
    SourceUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reading a sample from the source file failed.
    #[error("Can't read from {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Both sysctl identifiers for the thermal zone failed.
    #[error("sysctl hw.acpi.thermal.tz{zone}.temperature and dev.cpu.{zone}.temperature failed")]
    Sysctl { zone: u32 },

    /// The platform cannot read this kind of sensor.
    #[error("Only temperature sensor reading is supported on this platform, got {0}")]
    UnsupportedSensorType(SensorType),
}
