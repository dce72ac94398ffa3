//! Sample conversion.
//!
//! A [`Reading`] carries the raw integer sample together with its value in
//! the sensor's natural unit: Celsius for temperature, RPM for fans and
//! Watts for power.

use crate::SensorType;

/// Offset between deci-Kelvin and deci-Celsius used by FreeBSD sysctl.
const DECI_KELVIN_OFFSET: i64 = 2732;

/// One converted sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    /// Kind of quantity sampled
    pub sensor_type: SensorType,
    /// Raw integer as reported by the kernel
    pub raw: i64,
    /// Value in the natural unit of `sensor_type`
    pub value: f64,
}

impl Reading {
    /// Converts a raw sysfs sample.
    ///
    /// Temperature is in millidegrees Celsius, power in microwatts and fan
    /// speed already in RPM.
    pub fn from_raw(sensor_type: SensorType, raw: i64) -> Self {
        let value = match sensor_type {
            SensorType::Temperature => raw as f64 / 1000.0,
            SensorType::Fan => raw as f64,
            SensorType::Power => raw as f64 / 1_000_000.0,
        };
        Self {
            sensor_type,
            raw,
            value,
        }
    }

    /// Converts a sysctl temperature in tenths of a degree Kelvin.
    pub fn from_deci_kelvin(raw: i64) -> Self {
        Self {
            sensor_type: SensorType::Temperature,
            raw,
            value: (raw - DECI_KELVIN_OFFSET) as f64 / 10.0,
        }
    }

    /// Value rounded to the nearest integer, as used for thresholds and display.
    pub fn rounded(&self) -> i64 {
        self.value.round() as i64
    }

    /// Temperature in Celsius, or 0 for other sensor types.
    pub fn celsius(&self) -> i64 {
        match self.sensor_type {
            SensorType::Temperature => self.rounded(),
            _ => 0,
        }
    }

    /// Temperature in Fahrenheit, or 0 for other sensor types.
    pub fn fahrenheit(&self) -> i64 {
        match self.sensor_type {
            SensorType::Temperature => (self.rounded() as f64 * 1.8 + 32.0).round() as i64,
            _ => 0,
        }
    }

    /// Temperature in Kelvin, or 0 for other sensor types.
    pub fn kelvin(&self) -> i64 {
        match self.sensor_type {
            SensorType::Temperature => (self.rounded() as f64 + 273.15).round() as i64,
            _ => 0,
        }
    }

    /// Fan speed in RPM, or 0 for other sensor types.
    pub fn rpm(&self) -> i64 {
        match self.sensor_type {
            SensorType::Fan => self.rounded(),
            _ => 0,
        }
    }

    /// Power draw in Watts, or 0 for other sensor types.
    pub fn watts(&self) -> i64 {
        match self.sensor_type {
            SensorType::Power => self.rounded(),
            _ => 0,
        }
    }
}

/// Parses a base-10 integer prefix the way `strtol` does.
///
/// Leading whitespace and a sign are accepted, trailing garbage is ignored
/// and input without digits yields 0. Out-of-range values saturate.
pub fn parse_leading_int(line: &str) -> i64 {
    let trimmed = line.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let mut value: i64 = 0;
    for byte in digits.bytes().take_while(u8::is_ascii_digit) {
        let digit = i64::from(byte - b'0');
        value = match value.checked_mul(10).and_then(|v| v.checked_add(digit)) {
            Some(v) => v,
            None => return if negative { i64::MIN } else { i64::MAX },
        };
    }

    if negative {
        -value
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temperature_conversion() {
        let reading = Reading::from_raw(SensorType::Temperature, 45000);
        assert_eq!(reading.value, 45.0);
        assert_eq!(reading.celsius(), 45);
        assert_eq!(reading.fahrenheit(), 113);
        assert_eq!(reading.kelvin(), 318);
        assert_eq!(reading.rpm(), 0);
        assert_eq!(reading.watts(), 0);
    }

    #[test]
    fn test_power_conversion_rounds_half_up() {
        let reading = Reading::from_raw(SensorType::Power, 2_500_000);
        assert_eq!(reading.value, 2.5);
        assert_eq!(reading.watts(), 3);
        assert_eq!(reading.celsius(), 0);
        assert_eq!(reading.fahrenheit(), 0);
    }

    #[test]
    fn test_fan_passthrough() {
        let reading = Reading::from_raw(SensorType::Fan, 1234);
        assert_eq!(reading.rpm(), 1234);
        assert_eq!(reading.kelvin(), 0);
    }

    #[test]
    fn test_deci_kelvin() {
        let reading = Reading::from_deci_kelvin(3182);
        assert_eq!(reading.value, 45.0);
        assert_eq!(reading.celsius(), 45);

        let reading = Reading::from_deci_kelvin(3187);
        assert_eq!(reading.value, 45.5);
        assert_eq!(reading.rounded(), 46);
    }

    #[test]
    fn test_parse_leading_int() {
        assert_eq!(parse_leading_int("45000\n"), 45000);
        assert_eq!(parse_leading_int("  -1200"), -1200);
        assert_eq!(parse_leading_int("+7"), 7);
        assert_eq!(parse_leading_int("123abc"), 123);
        assert_eq!(parse_leading_int("abc"), 0);
        assert_eq!(parse_leading_int(""), 0);
        assert_eq!(parse_leading_int("-"), 0);
        assert_eq!(parse_leading_int("99999999999999999999999"), i64::MAX);
    }
}
