//! sysfs-backed sensor files (hwmon and thermal zones).

use super::SensorSource;
use crate::reading::parse_leading_int;
use crate::{Error, Reading, Result, SensorConfig, SensorType};
use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Name prefix of hardware-monitor directories.
pub const HWMON_PREFIX: &str = "hwmon";

/// Root of the thermal zone class directory.
const THERMAL_ROOT: &str = "/sys/class/thermal";

/// Returns the temperature file of a numbered thermal zone.
pub fn thermal_zone_path(zone: u32) -> PathBuf {
    Path::new(THERMAL_ROOT).join(format!("thermal_zone{}", zone)).join("temp")
}

/// A sensor read from a single integer file.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    sensor_type: SensorType,
}

impl FileSource {
    /// Returns the resolved input file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Picks the input file without checking that it can be opened.
    ///
    /// Order: first existing `hwmon-path` candidate, then `input-filename`
    /// inside the first `hwmon*` directory under a `hwmon-path-abs` base,
    /// then the thermal zone file for temperature sensors.
    pub fn locate(config: &SensorConfig) -> Result<PathBuf> {
        if let Some(candidates) = &config.hwmon_path {
            for candidate in candidates.iter() {
                if candidate.exists() {
                    debug!("Using hwmon-path candidate {}", candidate.display());
                    return Ok(candidate.to_path_buf());
                }
                debug!("hwmon-path candidate {} does not exist", candidate.display());
            }
        }

        if let (Some(input), Some(bases)) = (&config.input_filename, &config.hwmon_path_abs) {
            for base in bases.iter() {
                if let Some(path) = find_hwmon_input(base, input) {
                    debug!("Found {} under {}", path.display(), base.display());
                    return Ok(path);
                }
            }
        }

        if config.sensor_type == SensorType::Temperature {
            return Ok(thermal_zone_path(config.thermal_zone()));
        }

        Err(Error::NoSensorFound(config.sensor_type))
    }
}

/// Finds `input` inside the first `hwmon*` subdirectory of `base`.
///
/// Entries are ordered by the number after the prefix (`hwmon2` before
/// `hwmon10`), then by name, so the choice is stable across runs.
fn find_hwmon_input(base: &Path, input: &str) -> Option<PathBuf> {
    if !base.is_dir() {
        return None;
    }

    let mut entries: Vec<(u32, String, PathBuf)> = fs::read_dir(base)
        .ok()?
        .flatten()
        .filter_map(|entry| {
            let name = entry.file_name().to_string_lossy().into_owned();
            let index = name.strip_prefix(HWMON_PREFIX)?.parse().unwrap_or(u32::MAX);
            Some((index, name, entry.path()))
        })
        .filter(|(_, _, path)| path.is_dir())
        .collect();
    entries.sort();

    entries.into_iter().next().map(|(_, _, dir)| dir.join(input))
}

/// Opens and closes `path` to prove it is readable right now.
fn check_readable(path: &Path) -> Result<()> {
    let unreadable = |source| Error::SourceUnreadable {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(unreadable)?;
    let metadata = file.metadata().map_err(unreadable)?;
    if metadata.is_dir() {
        return Err(unreadable(std::io::Error::new(
            std::io::ErrorKind::Other,
            "is a directory",
        )));
    }
    Ok(())
}

impl SensorSource for FileSource {
    fn resolve(config: &SensorConfig) -> Result<Self> {
        let path = Self::locate(config)?;
        check_readable(&path)?;
        info!("Reading {} sensor from {}", config.sensor_type, path.display());

        Ok(Self {
            path,
            sensor_type: config.sensor_type,
        })
    }

    fn read(&self) -> Result<Reading> {
        let read_error = |source| Error::Read {
            path: self.path.clone(),
            source,
        };

        let file = File::open(&self.path).map_err(read_error)?;
        let mut line = String::new();
        BufReader::new(file)
            .read_line(&mut line)
            .map_err(read_error)?;

        Ok(Reading::from_raw(self.sensor_type, parse_leading_int(&line)))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
