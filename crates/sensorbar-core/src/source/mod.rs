//! Sensor source resolution and sampling.
//!
//! Linux exposes sensors as plain-text integer files under sysfs; FreeBSD
//! exposes thermal zones through sysctl. Each backend implements
//! [`SensorSource`] and the platform one is picked once at build time.

mod file;
mod sysctl;

pub use file::{thermal_zone_path, FileSource, HWMON_PREFIX};
pub use sysctl::{SysctlQuery, SysctlSource};

use crate::{Reading, Result, SensorConfig};

/// A concrete, verified sensor handle that can produce samples.
pub trait SensorSource: Send + Sync + std::fmt::Debug {
    /// Resolves the source described by `config`.
    fn resolve(config: &SensorConfig) -> Result<Self>
    where
        Self: Sized;

    /// Samples the sensor once.
    fn read(&self) -> Result<Reading>;

    /// Human-readable location, used in logs.
    fn describe(&self) -> String;
}

/// Resolves the source for the platform this binary was built for.
pub fn open(config: &SensorConfig) -> Result<Box<dyn SensorSource>> {
    #[cfg(target_os = "freebsd")]
    let source = SysctlSource::resolve(config)?;
    #[cfg(not(target_os = "freebsd"))]
    let source = FileSource::resolve(config)?;

    Ok(Box::new(source))
}
