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

//! User configuration
//!
//! Settings are read from `$XDG_CONFIG_HOME/thermometer/config.json`
//! (or `~/.config/thermometer/config.json`). Every field is optional; missing
//! fields take the built-in defaults and command-line flags override both.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::{paths, retry, strict};
use crate::device::LocatorOptions;
use crate::error::{Result, ThermometerError};
use crate::reader::{ReadOptions, RetryPolicy};
use crate::strict::{DeltaStrategy, IqrStrategy, Strategy, StrategyKind};
use crate::units::TemperatureUnit;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub unit: TemperatureUnit,
    /// Negative means retry forever
    pub retries: i64,
    pub wait_ms: u64,
    pub device: Option<PathBuf>,
    pub device_folder: PathBuf,
    pub device_suffix: PathBuf,
    pub strict: bool,
    pub strategy: StrategyKind,
    pub max_delta: f64,
    pub samples: usize,
    pub max_iqr: f64,
    pub snapshot_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            unit: TemperatureUnit::default(),
            retries: i64::from(retry::DEFAULT_RETRIES),
            wait_ms: retry::WAIT_INTERVAL.as_millis() as u64,
            device: None,
            device_folder: PathBuf::from(paths::DEVICE_FOLDER),
            device_suffix: PathBuf::from(paths::DEVICE_SUFFIX),
            strict: true,
            strategy: StrategyKind::default(),
            max_delta: strict::DEFAULT_MAX_DELTA,
            samples: strict::DEFAULT_SAMPLES,
            max_iqr: strict::DEFAULT_MAX_IQR,
            snapshot_path: None,
        }
    }
}

/// Default location of the config file
pub fn config_path() -> PathBuf {
    let base = env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))
        .or_else(dirs::config_dir)
        .unwrap_or_else(|| PathBuf::from("/etc"));
    base.join(paths::CONFIG_DIR_NAME).join(paths::CONFIG_FILE)
}

impl Settings {
    /// Load settings from `path`; a missing file yields the defaults
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No config at {:?}, using defaults", path);
            return Ok(Self::default());
        }
        let data = fs::read_to_string(path).map_err(|source| ThermometerError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        let settings: Self = serde_json::from_str(&data)?;
        debug!("Loaded config from {:?}", path);
        Ok(settings)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|source| ThermometerError::FileWrite {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Reject values the selected strategy cannot work with
    ///
    /// Options of strategies that are not in effect are ignored.
    pub fn validate(&self) -> Result<()> {
        if !self.strict {
            return Ok(());
        }
        match self.strategy {
            StrategyKind::Delta => {
                if self.max_delta.is_nan() || self.max_delta < 0.0 {
                    return Err(ThermometerError::invalid_argument(format!(
                        "max_delta must be a non-negative number, got {}",
                        self.max_delta
                    )));
                }
            }
            StrategyKind::Iqr => {
                if self.max_iqr.is_nan() || self.max_iqr < 0.0 {
                    return Err(ThermometerError::invalid_argument(format!(
                        "max_iqr must be a non-negative number, got {}",
                        self.max_iqr
                    )));
                }
                if self.samples < 2 {
                    return Err(ThermometerError::invalid_argument(format!(
                        "samples must be at least 2, got {}",
                        self.samples
                    )));
                }
            }
        }
        Ok(())
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::from_count(self.retries)
    }

    pub fn read_options(&self) -> ReadOptions {
        ReadOptions {
            device: self.device.clone(),
            unit: self.unit,
            retries: self.retry_policy(),
            wait: Duration::from_millis(self.wait_ms),
            locator: LocatorOptions {
                device_folder: self.device_folder.clone(),
                device_suffix: self.device_suffix.clone(),
            },
        }
    }

    pub fn strategy(&self) -> Strategy {
        if !self.strict {
            return Strategy::Plain;
        }
        match self.strategy {
            StrategyKind::Delta => Strategy::Delta(DeltaStrategy {
                max_delta: self.max_delta,
                retries: self.retry_policy(),
            }),
            StrategyKind::Iqr => Strategy::Iqr(IqrStrategy {
                samples: self.samples,
                max_iqr: self.max_iqr,
                retries: self.retry_policy(),
            }),
        }
    }
}
