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

//! Single-reading pipeline with bounded retry
//!
//! One attempt is: resolve the device, read `w1_slave`, parse, convert.
//! Device-level failures (no sensor, malformed payload) are retried after a
//! fixed pause; every other error is returned as-is.

use std::fs;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use tracing::{debug, trace};

use crate::constants::retry;
use crate::device::{find_device, LocatorOptions};
use crate::error::{Result, ThermometerError};
use crate::parser::parse_raw;
use crate::units::{Temperature, TemperatureUnit};

/// How many times a failing operation may be retried after the first attempt
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RetryPolicy {
    Bounded(u32),
    Unbounded,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::Bounded(retry::DEFAULT_RETRIES)
    }
}

impl RetryPolicy {
    /// Map a CLI/config retry count; any negative count means retry forever
    pub fn from_count(count: i64) -> Self {
        if count < 0 {
            Self::Unbounded
        } else {
            Self::Bounded(u32::try_from(count).unwrap_or(u32::MAX))
        }
    }

    /// Inverse of [`RetryPolicy::from_count`], with `-1` for unbounded
    pub fn as_count(self) -> i64 {
        match self {
            Self::Bounded(n) => i64::from(n),
            Self::Unbounded => -1,
        }
    }

    /// True once `attempts` failed retries have used up the budget
    pub fn is_exhausted(self, attempts: u64) -> bool {
        match self {
            Self::Bounded(n) => attempts >= u64::from(n),
            Self::Unbounded => false,
        }
    }
}

/// Where payload text comes from
#[cfg_attr(test, mockall::automock)]
pub trait PayloadSource {
    fn read_payload(&self, path: &Path) -> Result<String>;
}

/// Reads payloads straight from the filesystem
#[derive(Debug, Default, Clone, Copy)]
pub struct FsPayloadSource;

impl PayloadSource for FsPayloadSource {
    fn read_payload(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).map_err(|source| ThermometerError::FileRead {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Anything that yields one temperature per call
///
/// The consistency strategies only depend on this trait.
#[cfg_attr(test, mockall::automock)]
pub trait TemperatureSource {
    fn read(&mut self) -> Result<Temperature>;
}

/// Options for a single retried reading
#[derive(Debug, Clone, PartialEq)]
pub struct ReadOptions {
    /// Explicit data file; discovered on every attempt when `None`
    pub device: Option<PathBuf>,
    pub unit: TemperatureUnit,
    pub retries: RetryPolicy,
    /// Pause between failed attempts
    pub wait: Duration,
    pub locator: LocatorOptions,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            device: None,
            unit: TemperatureUnit::default(),
            retries: RetryPolicy::default(),
            wait: retry::WAIT_INTERVAL,
            locator: LocatorOptions::default(),
        }
    }
}

/// A one-wire thermometer reachable through a [`PayloadSource`]
pub struct Thermometer<S = FsPayloadSource> {
    options: ReadOptions,
    source: S,
}

impl Thermometer {
    pub fn new(options: ReadOptions) -> Self {
        Self::with_source(options, FsPayloadSource)
    }
}

impl<S: PayloadSource> Thermometer<S> {
    pub fn with_source(options: ReadOptions, source: S) -> Self {
        Self { options, source }
    }

    pub fn options(&self) -> &ReadOptions {
        &self.options
    }

    fn device_path(&self) -> Result<PathBuf> {
        match &self.options.device {
            Some(path) => Ok(path.clone()),
            None => find_device(&self.options.locator),
        }
    }

    /// One attempt without retry
    pub fn read_once(&self) -> Result<Temperature> {
        let path = self.device_path()?;
        let text = self.source.read_payload(&path)?;
        let raw = parse_raw(&text)?;
        trace!(raw, path = %path.display(), "Parsed raw reading");
        Ok(Temperature::from_raw(raw, self.options.unit))
    }

    /// Read a temperature, retrying device-level failures per the retry policy
    pub fn read_temperature(&self) -> Result<Temperature> {
        let mut attempts: u64 = 0;
        loop {
            match self.read_once() {
                Ok(temperature) => {
                    debug!(attempts, %temperature, "Read temperature");
                    return Ok(temperature);
                }
                Err(e) if e.is_retryable() => {
                    if self.options.retries.is_exhausted(attempts) {
                        debug!(attempts, "Giving up on sensor read");
                        return Err(e);
                    }
                    debug!(attempts, "Sensor read failed, retrying: {}", e);
                    thread::sleep(self.options.wait);
                }
                Err(e) => return Err(e),
            }
            attempts += 1;
        }
    }
}

impl<S: PayloadSource> TemperatureSource for Thermometer<S> {
    fn read(&mut self) -> Result<Temperature> {
        self.read_temperature()
    }
}
