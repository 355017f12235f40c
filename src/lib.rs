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

//! Thermometer - one-wire temperature sensor reader for Linux
//!
//! Reads the `w1_slave` file the w1 therm driver exposes for DS18B20-style
//! sensors, converts the raw reading, and optionally checks that repeated
//! readings agree before trusting them.
//!
//! # Example
//!
//! ```no_run
//! use thermometer::{read_with, ReadOptions, Strategy};
//!
//! let t = read_with(ReadOptions::default(), &Strategy::default()).unwrap();
//! println!("{}", t);
//! ```

pub mod config;
pub mod constants;
pub mod device;
pub mod error;
pub mod logger;
pub mod parser;
pub mod reader;
pub mod snapshot;
pub mod stats;
pub mod strict;
pub mod units;

pub use device::{find_device, LocatorOptions};
pub use error::{Result, ThermometerError};
pub use parser::parse_raw;
pub use reader::{ReadOptions, RetryPolicy, TemperatureSource, Thermometer};
pub use stats::{median, quantiles};
pub use strict::{read_with, ConsistencyStrategy, DeltaStrategy, IqrStrategy, Strategy};
pub use units::{convert_raw_temp, Temperature, TemperatureUnit};
