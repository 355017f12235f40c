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

//! Command Line Interface
//!
//! Prints the current temperature of the attached one-wire sensor.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing::debug;

use thermometer::config::{config_path, Settings};
use thermometer::constants::display::NOW_PRECISION;
use thermometer::device::list_devices;
use thermometer::error::ThermometerError;
use thermometer::snapshot::{resolve_snapshot_path, Snapshot, SnapshotWriter};
use thermometer::strict::{read_with, StrategyKind};
use thermometer::units::{Temperature, TemperatureUnit};

#[derive(Parser, Debug)]
#[command(name = "temperature")]
#[command(version)]
#[command(about = "Print the current temperature of a one-wire sensor")]
#[command(long_about = "Print the current temperature of a one-wire sensor

Reads /sys/bus/w1/devices/28-*/w1_slave, converts the reading and, unless
--no-strict is given, only reports it once repeated readings agree.

EXAMPLES:
    temperature                          Strict reading in Fahrenheit
    temperature -u C --no-strict         Single unchecked reading in Celsius
    temperature --strategy delta --max-delta 0.5
    temperature now                      Strict reading rounded to 5 places
    temperature snapshot -o ~/temps.jsonl
    temperature devices                  List attached sensors

ENVIRONMENT VARIABLES:
    RUST_LOG=debug                  Enable debug logging
    THERMOMETER_SNAPSHOT_PATH       Default file for `snapshot`

FILES:
    ~/.config/thermometer/config.json   Default settings")]
pub struct Cli {
    #[command(flatten)]
    pub options: ReadArgs,

    /// Log retries and strategy decisions to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Print the temperature (default)
    Read,
    /// Print the temperature rounded to five decimals
    Now,
    /// Read the temperature and append a timestamped record
    Snapshot {
        /// JSON-lines file to append to
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List attached one-wire temperature sensors
    Devices,
}

#[derive(Args, Debug)]
pub struct ReadArgs {
    /// Celsius or Fahrenheit (C/F). Default Fahrenheit.
    #[arg(short, long, global = true)]
    pub unit: Option<TemperatureUnit>,

    /// Path to the sensor data file. Discovered if not provided.
    #[arg(short, long, global = true)]
    pub device: Option<PathBuf>,

    /// Retries on bad data or inconsistent readings; negative retries forever. Default 20.
    #[arg(short, long, global = true, allow_negative_numbers = true)]
    pub retries: Option<i64>,

    /// Folder holding the one-wire devices. Ignored if --device is given.
    #[arg(long, global = true)]
    pub device_folder: Option<PathBuf>,

    /// Data file name inside the device folder. Ignored if --device is given.
    #[arg(long, global = true)]
    pub device_suffix: Option<PathBuf>,

    /// Milliseconds to wait between read attempts
    #[arg(long, global = true)]
    pub wait_ms: Option<u64>,

    /// Turn off the strict reading handler
    #[arg(long, global = true)]
    pub no_strict: bool,

    /// Consistency check used for strict readings
    #[arg(long, global = true, value_enum)]
    pub strategy: Option<StrategyKind>,

    /// Maximum delta between consecutive readings (delta strategy)
    #[arg(long, global = true)]
    pub max_delta: Option<f64>,

    /// Maximum interquartile range of a sample round (iqr strategy)
    #[arg(long, global = true)]
    pub max_iqr: Option<f64>,

    /// Samples per round (iqr strategy)
    #[arg(long, global = true)]
    pub samples: Option<usize>,

    /// Settings file. Default ~/.config/thermometer/config.json
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

impl ReadArgs {
    /// Layer the flags over `settings`
    pub fn apply(&self, settings: &mut Settings) {
        if let Some(unit) = self.unit {
            settings.unit = unit;
        }
        if let Some(device) = &self.device {
            settings.device = Some(device.clone());
        }
        if let Some(retries) = self.retries {
            settings.retries = retries;
        }
        if let Some(folder) = &self.device_folder {
            settings.device_folder = folder.clone();
        }
        if let Some(suffix) = &self.device_suffix {
            settings.device_suffix = suffix.clone();
        }
        if let Some(wait_ms) = self.wait_ms {
            settings.wait_ms = wait_ms;
        }
        if self.no_strict {
            settings.strict = false;
        }
        if let Some(strategy) = self.strategy {
            settings.strategy = strategy;
        }
        if let Some(max_delta) = self.max_delta {
            settings.max_delta = max_delta;
        }
        if let Some(max_iqr) = self.max_iqr {
            settings.max_iqr = max_iqr;
        }
        if let Some(samples) = self.samples {
            settings.samples = samples;
        }
    }

    pub fn settings(&self) -> anyhow::Result<Settings> {
        let path = self.config.clone().unwrap_or_else(config_path);
        let mut settings = Settings::load(&path)
            .with_context(|| format!("loading settings from {}", path.display()))?;
        self.apply(&mut settings);
        settings.validate()?;
        debug!(?settings, "Effective settings");
        Ok(settings)
    }
}

fn measure(settings: &Settings) -> anyhow::Result<Temperature> {
    Ok(read_with(settings.read_options(), &settings.strategy())?)
}

/// Round to `places` decimals from the exact binary value, like Python's `round`
fn round_to(value: f64, places: usize) -> f64 {
    format!("{:.*}", places, value).parse().unwrap_or(value)
}

pub fn run_cli(cli: &Cli) -> anyhow::Result<()> {
    let settings = cli.options.settings()?;

    match cli.command.as_ref().unwrap_or(&Commands::Read) {
        Commands::Read => {
            println!("{}", measure(&settings)?.degrees);
        }
        Commands::Now => {
            let t = measure(&settings)?;
            println!("{}", round_to(t.degrees, NOW_PRECISION));
        }
        Commands::Snapshot { output } => {
            let path = resolve_snapshot_path(output.as_deref(), settings.snapshot_path.as_deref())?;
            let t = measure(&settings)?;
            SnapshotWriter::new(path).append(&Snapshot::now(t))?;
            println!("{}", t.degrees);
        }
        Commands::Devices => {
            let devices = list_devices(&settings.device_folder)?;
            if devices.is_empty() {
                return Err(ThermometerError::DeviceNotFound {
                    folder: settings.device_folder.clone(),
                }
                .into());
            }
            for device in devices {
                println!("{}", device.join(&settings.device_suffix).display());
            }
        }
    }
    Ok(())
}
