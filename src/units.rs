/*
 * This file is part of Thermometer.
 *
 * Copyright (C) 2025 Thermometer contributors
 *
 * Thermometer is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * Thermometer is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with Thermometer. If not, see <https://www.gnu.org/licenses/>.
 */

//! Raw reading to temperature conversion

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::temperature::{FAHRENHEIT_OFFSET, FAHRENHEIT_SCALE, MILLIDEGREE_DIVISOR};
use crate::error::{Result, ThermometerError};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TemperatureUnit {
    #[serde(rename = "C", alias = "c", alias = "celsius")]
    Celsius,
    #[default]
    #[serde(rename = "F", alias = "f", alias = "fahrenheit")]
    Fahrenheit,
}

impl TemperatureUnit {
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Celsius => "C",
            Self::Fahrenheit => "F",
        }
    }

    /// Convert a raw millidegree reading into this unit
    pub fn convert(self, raw: i64) -> f64 {
        let celsius = raw as f64 / MILLIDEGREE_DIVISOR;
        match self {
            Self::Celsius => celsius,
            Self::Fahrenheit => celsius * FAHRENHEIT_SCALE + FAHRENHEIT_OFFSET,
        }
    }
}

impl FromStr for TemperatureUnit {
    type Err = ThermometerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "C" | "c" | "celsius" => Ok(Self::Celsius),
            "F" | "f" | "fahrenheit" => Ok(Self::Fahrenheit),
            other => Err(ThermometerError::invalid_argument(format!(
                "Unit must be F or C, got '{other}'"
            ))),
        }
    }
}

impl fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A temperature together with the unit it is expressed in
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Temperature {
    pub degrees: f64,
    pub unit: TemperatureUnit,
}

impl Temperature {
    pub fn new(degrees: f64, unit: TemperatureUnit) -> Self {
        Self { degrees, unit }
    }

    /// Build a temperature from a raw millidegree reading
    pub fn from_raw(raw: i64, unit: TemperatureUnit) -> Self {
        Self::new(unit.convert(raw), unit)
    }

    /// Same temperature expressed in Fahrenheit
    pub fn to_fahrenheit(self) -> f64 {
        match self.unit {
            TemperatureUnit::Fahrenheit => self.degrees,
            TemperatureUnit::Celsius => self.degrees * FAHRENHEIT_SCALE + FAHRENHEIT_OFFSET,
        }
    }
}

impl fmt::Display for Temperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°{}", self.degrees, self.unit)
    }
}

/// Convert a raw reading given a unit token (`"C"` or `"F"`)
pub fn convert_raw_temp(raw: i64, unit: &str) -> Result<f64> {
    Ok(unit.parse::<TemperatureUnit>()?.convert(raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_convert_zero() {
        assert_eq!(convert_raw_temp(0, "C").unwrap(), 0.0);
        assert_eq!(convert_raw_temp(0, "F").unwrap(), 32.0);
    }

    #[test]
    fn test_convert_relationships() {
        for raw in [-55000_i64, -10125, -1, 0, 1, 21500, 23125, 85000, 125000] {
            let c = convert_raw_temp(raw, "C").unwrap();
            let f = convert_raw_temp(raw, "F").unwrap();
            assert!(approx(c, raw as f64 / 1000.0), "raw={raw}");
            assert!(approx(f, c * 1.8 + 32.0), "raw={raw}");
        }
    }

    proptest! {
        #[test]
        fn test_convert_relationships_hold_for_any_reading(raw in any::<i32>()) {
            let raw = i64::from(raw);
            let c = convert_raw_temp(raw, "C").unwrap();
            let f = convert_raw_temp(raw, "F").unwrap();
            prop_assert!(approx(c, raw as f64 / 1000.0));
            prop_assert!((f - (c * 1.8 + 32.0)).abs() <= 1e-9 * f.abs().max(1.0));
        }
    }

    #[test]
    fn test_convert_invalid_unit() {
        for token in ["Q", "K", "", "INVALID"] {
            let err = convert_raw_temp(0, token).unwrap_err();
            assert!(matches!(err, ThermometerError::InvalidArgument(_)), "token={token:?}");
        }
    }

    #[test]
    fn test_unit_parsing_and_display() {
        assert_eq!("c".parse::<TemperatureUnit>().unwrap(), TemperatureUnit::Celsius);
        assert_eq!("fahrenheit".parse::<TemperatureUnit>().unwrap(), TemperatureUnit::Fahrenheit);
        assert_eq!(TemperatureUnit::default(), TemperatureUnit::Fahrenheit);
        assert_eq!(TemperatureUnit::Celsius.to_string(), "C");
    }

    #[test]
    fn test_temperature_carries_unit() {
        let t = Temperature::from_raw(100_000, TemperatureUnit::Celsius);
        assert_eq!(t.degrees, 100.0);
        assert!(approx(t.to_fahrenheit(), 212.0));
        assert_eq!(t.to_string(), "100°C");

        let f = Temperature::from_raw(0, TemperatureUnit::Fahrenheit);
        assert_eq!(f.to_fahrenheit(), 32.0);
    }

    #[test]
    fn test_unit_serde_tokens() {
        let json = serde_json::to_string(&TemperatureUnit::Celsius).unwrap();
        assert_eq!(json, "\"C\"");
        let unit: TemperatureUnit = serde_json::from_str("\"fahrenheit\"").unwrap();
        assert_eq!(unit, TemperatureUnit::Fahrenheit);
    }
}
