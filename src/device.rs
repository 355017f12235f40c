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

//! One-wire device discovery
//!
//! The w1 kernel driver exposes every slave on the bus as a directory under
//! `/sys/bus/w1/devices/`, named `<family>-<serial>`. Temperature sensors of
//! the DS18B20 family use family code `28`.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use crate::constants::{paths, protocol};
use crate::error::{Result, ThermometerError};

/// Where to look for a sensor when no explicit device path is given
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatorOptions {
    pub device_folder: PathBuf,
    pub device_suffix: PathBuf,
}

impl Default for LocatorOptions {
    fn default() -> Self {
        Self {
            device_folder: PathBuf::from(paths::DEVICE_FOLDER),
            device_suffix: PathBuf::from(paths::DEVICE_SUFFIX),
        }
    }
}

/// List all temperature sensor directories in `device_folder`, sorted by name
pub fn list_devices(device_folder: &Path) -> Result<Vec<PathBuf>> {
    let not_found = || ThermometerError::DeviceNotFound {
        folder: device_folder.to_path_buf(),
    };

    let entries = fs::read_dir(device_folder).map_err(|e| {
        debug!("Cannot list {:?}: {}", device_folder, e);
        not_found()
    })?;

    let mut names: Vec<String> = entries
        .flatten()
        .map(|ent| ent.file_name().to_string_lossy().into_owned())
        .filter(|name| {
            let keep = name.starts_with(protocol::FAMILY_PREFIX);
            trace!(entry = %name, keep, "Checking w1 entry");
            keep
        })
        .collect();
    names.sort();

    Ok(names.into_iter().map(|n| device_folder.join(n)).collect())
}

/// Find the data file of the first temperature sensor
///
/// Returns `device_folder/<28-...>/device_suffix`. Fails with
/// [`ThermometerError::DeviceNotFound`] if the folder has no matching entry
/// or cannot be listed.
pub fn find_device(options: &LocatorOptions) -> Result<PathBuf> {
    let device = list_devices(&options.device_folder)?
        .into_iter()
        .next()
        .ok_or_else(|| ThermometerError::DeviceNotFound {
            folder: options.device_folder.clone(),
        })?;

    let path = device.join(&options.device_suffix);
    debug!("Located sensor at {:?}", path);
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn locator(dir: &TempDir, suffix: &str) -> LocatorOptions {
        LocatorOptions {
            device_folder: dir.path().to_path_buf(),
            device_suffix: PathBuf::from(suffix),
        }
    }

    #[test]
    fn test_default_locator_points_at_sysfs() {
        let opts = LocatorOptions::default();
        assert_eq!(opts.device_folder, PathBuf::from("/sys/bus/w1/devices/"));
        assert_eq!(opts.device_suffix, PathBuf::from("w1_slave"));
    }

    #[test]
    fn test_find_device_when_exists() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("28-0316a2795aff")).unwrap();

        let path = find_device(&locator(&dir, "w1_slave")).unwrap();
        assert_eq!(path, dir.path().join("28-0316a2795aff").join("w1_slave"));
    }

    #[test]
    fn test_find_device_ignores_other_families() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("w1_bus_master1")).unwrap();
        fs::create_dir(dir.path().join("10-000802b4f1c2")).unwrap();
        fs::create_dir(dir.path().join("28-0000075b4a1e")).unwrap();

        let path = find_device(&locator(&dir, "suffix")).unwrap();
        assert_eq!(path, dir.path().join("28-0000075b4a1e").join("suffix"));
    }

    #[test]
    fn test_find_device_picks_first_sorted() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("28-bbbb")).unwrap();
        fs::create_dir(dir.path().join("28-aaaa")).unwrap();

        let path = find_device(&locator(&dir, "w1_slave")).unwrap();
        assert_eq!(path, dir.path().join("28-aaaa").join("w1_slave"));
        assert_eq!(list_devices(dir.path()).unwrap().len(), 2);
    }

    #[test]
    fn test_find_device_empty_folder() {
        let dir = TempDir::new().unwrap();
        let err = find_device(&locator(&dir, "w1_slave")).unwrap_err();
        assert!(matches!(err, ThermometerError::DeviceNotFound { .. }));
    }

    #[test]
    fn test_find_device_non_matching_folder() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("w1_bus_master1")).unwrap();
        let err = find_device(&locator(&dir, "w1_slave")).unwrap_err();
        assert!(matches!(err, ThermometerError::DeviceNotFound { .. }));
    }

    #[test]
    fn test_find_device_missing_folder() {
        let dir = TempDir::new().unwrap();
        let opts = LocatorOptions {
            device_folder: dir.path().join("does-not-exist"),
            device_suffix: PathBuf::from("w1_slave"),
        };
        let err = find_device(&opts).unwrap_err();
        match err {
            ThermometerError::DeviceNotFound { folder } => assert_eq!(folder, opts.device_folder),
            other => panic!("unexpected error: {other}"),
        }
    }
}
