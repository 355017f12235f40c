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

//! Constants and defaults for the thermometer reader
//!
//! Centralizes paths, protocol markers, and default tolerances so the
//! reader, the strategies, and the CLI agree on a single set of values.

use std::time::Duration;

/// Filesystem locations exposed by the w1 kernel driver
pub mod paths {
    /// Directory holding one entry per one-wire slave device
    pub const DEVICE_FOLDER: &str = "/sys/bus/w1/devices/";

    /// Data file inside a slave device directory
    pub const DEVICE_SUFFIX: &str = "w1_slave";

    /// Name of the per-user configuration directory
    pub const CONFIG_DIR_NAME: &str = "thermometer";

    /// Configuration file inside the configuration directory
    pub const CONFIG_FILE: &str = "config.json";

    /// Environment variable naming the snapshot file
    pub const SNAPSHOT_ENV: &str = "THERMOMETER_SNAPSHOT_PATH";
}

/// Markers of the `w1_slave` text payload
pub mod protocol {
    /// Family code prefix of DS18B20-style temperature sensors
    pub const FAMILY_PREFIX: &str = "28-";

    /// Token ending the first line when the driver's CRC check passed
    pub const CRC_OK: &str = "YES";

    /// Field marker preceding the raw reading on the second line
    pub const TEMPERATURE_FIELD: &str = "t=";

    /// Number of lines in a well-formed payload
    pub const PAYLOAD_LINES: usize = 2;
}

/// Unit conversion factors
pub mod temperature {
    /// Raw readings are in thousandths of a degree Celsius
    pub const MILLIDEGREE_DIVISOR: f64 = 1000.0;

    pub const FAHRENHEIT_SCALE: f64 = 1.8;
    pub const FAHRENHEIT_OFFSET: f64 = 32.0;
}

/// Read retry defaults
pub mod retry {
    use super::Duration;

    /// Attempts after the first before a device error is surfaced
    pub const DEFAULT_RETRIES: u32 = 20;

    /// Fixed pause between device read attempts
    pub const WAIT_INTERVAL: Duration = Duration::from_millis(50);
}

/// Consistency strategy defaults
pub mod strict {
    /// Largest accepted difference between consecutive readings
    pub const DEFAULT_MAX_DELTA: f64 = 1.0;

    /// Samples collected per IQR round
    pub const DEFAULT_SAMPLES: usize = 10;

    /// Largest accepted interquartile range of one round
    pub const DEFAULT_MAX_IQR: f64 = 0.5;

    /// Quartiles
    pub const QUANTILE_DIVISIONS: usize = 4;
}

/// Output formatting
pub mod display {
    /// Decimal places printed by the `now` command
    pub const NOW_PRECISION: usize = 5;
}
