//! FreeBSD sysctl-backed temperature source.
//!
//! No single MIB name is guaranteed to exist, so nothing is validated up
//! front: each read probes the CPU identifier first, then the ACPI thermal
//! zone one.

use super::SensorSource;
use crate::{Error, Reading, Result, SensorConfig, SensorType};
use tracing::{debug, info};

/// Looks up an integer sysctl value by name.
pub type SysctlQuery = fn(&str) -> Option<i32>;

/// Temperature of a thermal zone read through sysctl.
#[derive(Clone, Copy)]
pub struct SysctlSource {
    zone: u32,
    query: SysctlQuery,
}

impl SysctlSource {
    /// Builds a source using a custom lookup instead of `sysctlbyname`.
    pub fn with_query(config: &SensorConfig, query: SysctlQuery) -> Result<Self> {
        if config.sensor_type != SensorType::Temperature {
            return Err(Error::UnsupportedSensorType(config.sensor_type));
        }

        Ok(Self {
            zone: config.thermal_zone(),
            query,
        })
    }

    /// Identifiers probed for this zone, in order.
    pub fn identifiers(&self) -> [String; 2] {
        [
            format!("dev.cpu.{}.temperature", self.zone),
            format!("hw.acpi.thermal.tz{}.temperature", self.zone),
        ]
    }
}

impl std::fmt::Debug for SysctlSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SysctlSource")
            .field("zone", &self.zone)
            .finish_non_exhaustive()
    }
}

impl SensorSource for SysctlSource {
    fn resolve(config: &SensorConfig) -> Result<Self> {
        let source = Self::with_query(config, sysctl_int)?;
        info!("Reading temperature of zone {} via sysctl", source.zone);
        Ok(source)
    }

    fn read(&self) -> Result<Reading> {
        for name in self.identifiers() {
            if let Some(raw) = (self.query)(&name) {
                return Ok(Reading::from_deci_kelvin(i64::from(raw)));
            }
            debug!("sysctl {} unavailable", name);
        }
        Err(Error::Sysctl { zone: self.zone })
    }

    fn describe(&self) -> String {
        format!("sysctl thermal zone {}", self.zone)
    }
}

#[cfg(target_os = "freebsd")]
fn sysctl_int(name: &str) -> Option<i32> {
    let name = std::ffi::CString::new(name).ok()?;
    let mut value: libc::c_int = 0;
    let mut size = std::mem::size_of::<libc::c_int>();

    // SAFETY: name is NUL-terminated, value/size describe a valid c_int buffer
    // and no new value is written.
    let rc = unsafe {
        libc::sysctlbyname(
            name.as_ptr(),
            &mut value as *mut libc::c_int as *mut libc::c_void,
            &mut size,
            std::ptr::null(),
            0,
        )
    };

    (rc == 0).then_some(value)
}

#[cfg(not(target_os = "freebsd"))]
fn sysctl_int(_name: &str) -> Option<i32> {
    None
}
