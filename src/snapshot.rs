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

//! Timestamped snapshot log
//!
//! Each strict reading taken by `temperature snapshot` is appended to a
//! JSON-lines file as `{"dttm_utc": ..., "fahrenheit": ...}`.

use std::env;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::constants::paths;
use crate::error::{Result, ThermometerError};
use crate::units::Temperature;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub dttm_utc: DateTime<Utc>,
    pub fahrenheit: f64,
}

impl Snapshot {
    pub fn new(dttm_utc: DateTime<Utc>, temperature: Temperature) -> Self {
        Self {
            dttm_utc,
            fahrenheit: temperature.to_fahrenheit(),
        }
    }

    /// Snapshot stamped with the current time
    pub fn now(temperature: Temperature) -> Self {
        Self::new(Utc::now(), temperature)
    }
}

/// Pick the snapshot file: explicit flag, then environment, then config
pub fn resolve_snapshot_path(explicit: Option<&Path>, configured: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    if let Some(path) = env::var_os(paths::SNAPSHOT_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(path));
    }
    configured.map(Path::to_path_buf).ok_or_else(|| {
        ThermometerError::invalid_argument(format!(
            "no snapshot file given: pass --output, set {} or snapshot_path in the config",
            paths::SNAPSHOT_ENV
        ))
    })
}

pub struct SnapshotWriter {
    path: PathBuf,
}

impl SnapshotWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&self, snapshot: &Snapshot) -> Result<()> {
        let write_err = |source| ThermometerError::FileWrite {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        let line = serde_json::to_string(snapshot)?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(write_err)?;
        writeln!(file, "{}", line).map_err(write_err)?;

        info!(path = %self.path.display(), fahrenheit = snapshot.fahrenheit, "Recorded snapshot");
        Ok(())
    }

    /// Read every snapshot recorded so far
    pub fn load(&self) -> Result<Vec<Snapshot>> {
        let data = fs::read_to_string(&self.path).map_err(|source| ThermometerError::FileRead {
            path: self.path.clone(),
            source,
        })?;
        data.lines()
            .filter(|l| !l.trim().is_empty())
            .map(|l| serde_json::from_str(l).map_err(ThermometerError::from))
            .collect()
    }
}
