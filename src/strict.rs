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

//! Strict reading: consistency strategies layered over the retried reader
//!
//! A strategy keeps asking a [`TemperatureSource`] for readings until they
//! agree within a tolerance, or its own retry budget runs out. Read failures
//! from the source are returned immediately and never consume a strategy
//! attempt.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::constants::strict;
use crate::error::{Result, ThermometerError};
use crate::reader::{ReadOptions, RetryPolicy, TemperatureSource, Thermometer};
use crate::stats::{interquartile_range, median};
use crate::units::Temperature;

/// A way of turning several raw readings into one trusted reading
pub trait ConsistencyStrategy {
    fn attempt(&self, source: &mut dyn TemperatureSource) -> Result<Temperature>;
}

/// Accept a reading once two consecutive readings differ by at most `max_delta`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeltaStrategy {
    pub max_delta: f64,
    pub retries: RetryPolicy,
}

impl Default for DeltaStrategy {
    fn default() -> Self {
        Self {
            max_delta: strict::DEFAULT_MAX_DELTA,
            retries: RetryPolicy::default(),
        }
    }
}

impl ConsistencyStrategy for DeltaStrategy {
    fn attempt(&self, source: &mut dyn TemperatureSource) -> Result<Temperature> {
        let mut attempts: u64 = 0;
        let mut reference = source.read()?;

        loop {
            let current = source.read()?;
            let delta = (current.degrees - reference.degrees).abs();
            if delta <= self.max_delta {
                info!(attempts, delta, "Consecutive readings agree");
                return Ok(current);
            }

            if self.retries.is_exhausted(attempts) {
                debug!(attempts, delta, max_delta = self.max_delta, "Readings never settled");
                return Err(ThermometerError::InconsistentTemperature {
                    attempts: attempts + 1,
                    detail: format!(
                        "did not obtain two consistent readings (last delta {delta}, max {})",
                        self.max_delta
                    ),
                });
            }

            debug!(
                attempts,
                reference = reference.degrees,
                current = current.degrees,
                "Readings differ, shifting reference"
            );
            reference = current;
            attempts += 1;
        }
    }
}

/// Accept the median of a round of samples whose interquartile range is at most `max_iqr`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IqrStrategy {
    pub samples: usize,
    pub max_iqr: f64,
    pub retries: RetryPolicy,
}

impl Default for IqrStrategy {
    fn default() -> Self {
        Self {
            samples: strict::DEFAULT_SAMPLES,
            max_iqr: strict::DEFAULT_MAX_IQR,
            retries: RetryPolicy::default(),
        }
    }
}

impl IqrStrategy {
    fn collect(&self, source: &mut dyn TemperatureSource) -> Result<Vec<Temperature>> {
        (0..self.samples).map(|_| source.read()).collect()
    }
}

impl ConsistencyStrategy for IqrStrategy {
    fn attempt(&self, source: &mut dyn TemperatureSource) -> Result<Temperature> {
        let mut attempts: u64 = 0;

        loop {
            let readings = self.collect(source)?;
            let degrees: Vec<f64> = readings.iter().map(|t| t.degrees).collect();
            let iqr = interquartile_range(&degrees)?;

            if iqr <= self.max_iqr {
                let value = median(&degrees)?;
                info!(attempts, iqr, median = value, "Sample round accepted");
                let unit = readings.first().map(|t| t.unit).unwrap_or_default();
                return Ok(Temperature::new(value, unit));
            }

            if self.retries.is_exhausted(attempts) {
                debug!(attempts, iqr, max_iqr = self.max_iqr, "Sample spread never settled");
                return Err(ThermometerError::InconsistentTemperature {
                    attempts: attempts + 1,
                    detail: format!(
                        "interquartile range {iqr} of {} samples exceeds {}",
                        self.samples, self.max_iqr
                    ),
                });
            }

            debug!(attempts, iqr, "Sample round too noisy, collecting a new one");
            attempts += 1;
        }
    }
}

/// Which strategy to apply, as chosen by configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Strategy {
    /// A single unchecked reading
    Plain,
    Delta(DeltaStrategy),
    Iqr(IqrStrategy),
}

impl Default for Strategy {
    fn default() -> Self {
        Self::Iqr(IqrStrategy::default())
    }
}

impl ConsistencyStrategy for Strategy {
    fn attempt(&self, source: &mut dyn TemperatureSource) -> Result<Temperature> {
        match self {
            Self::Plain => source.read(),
            Self::Delta(delta) => delta.attempt(source),
            Self::Iqr(iqr) => iqr.attempt(source),
        }
    }
}

/// Strategy names accepted by the CLI and the config file
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    #[default]
    Iqr,
    Delta,
}

/// Read the system thermometer once through `strategy`
pub fn read_with(options: ReadOptions, strategy: &Strategy) -> Result<Temperature> {
    let mut thermometer = Thermometer::new(options);
    strategy.attempt(&mut thermometer)
}
