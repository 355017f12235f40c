/*
 * Integration tests for Thermometer
 *
 * These tests drive the full pipeline (discovery, file read, parse,
 * conversion, consistency check) against a fake w1 sysfs tree.
 */

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tempfile::TempDir;
use thermometer::config::Settings;
use thermometer::snapshot::{Snapshot, SnapshotWriter};
use thermometer::{
    read_with, ReadOptions, RetryPolicy, Strategy, TemperatureUnit, ThermometerError,
};

fn payload(raw: i64) -> String {
    format!("72 01 4b 46 7f ff 0e 10 57 : crc=57 YES\n72 01 4b 46 7f ff 0e 10 57 t={raw}\n")
}

fn fake_bus(sensors: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("w1_bus_master1")).unwrap();
    for (name, contents) in sensors {
        let sensor = dir.path().join(name);
        fs::create_dir(&sensor).unwrap();
        fs::write(sensor.join("w1_slave"), contents).unwrap();
    }
    dir
}

fn settings_for(bus: &Path) -> Settings {
    Settings {
        device_folder: bus.to_path_buf(),
        wait_ms: 0,
        retries: 2,
        ..Settings::default()
    }
}

#[test]
fn test_strict_read_from_discovered_sensor() {
    let raw = payload(21500);
    let bus = fake_bus(&[("28-0316a2795aff", raw.as_str())]);
    let settings = settings_for(bus.path());

    let t = read_with(settings.read_options(), &settings.strategy()).unwrap();
    assert_eq!(t.unit, TemperatureUnit::Fahrenheit);
    assert!((t.degrees - 70.7).abs() < 1e-9);
}

#[test]
fn test_delta_read_in_celsius() {
    let raw = payload(-10125);
    let bus = fake_bus(&[("28-0000075b4a1e", raw.as_str())]);
    let settings = Settings {
        unit: TemperatureUnit::Celsius,
        strategy: thermometer::strict::StrategyKind::Delta,
        ..settings_for(bus.path())
    };

    let t = read_with(settings.read_options(), &settings.strategy()).unwrap();
    assert_eq!(t.degrees, -10.125);
}

#[test]
fn test_explicit_device_path() {
    let dir = TempDir::new().unwrap();
    let device = dir.path().join("w1_slave");
    fs::write(&device, payload(0)).unwrap();

    let options = ReadOptions {
        device: Some(device),
        unit: TemperatureUnit::Celsius,
        wait: Duration::ZERO,
        ..ReadOptions::default()
    };
    assert_eq!(read_with(options, &Strategy::Plain).unwrap().degrees, 0.0);
}

#[test]
fn test_missing_sensor_exhausts_retries() {
    let bus = fake_bus(&[]);
    let settings = settings_for(bus.path());

    let err = read_with(settings.read_options(), &settings.strategy()).unwrap_err();
    assert!(matches!(err, ThermometerError::DeviceNotFound { .. }));
}

#[test]
fn test_crc_failure_exhausts_retries() {
    let bus = fake_bus(&[(
        "28-0316a2795aff",
        "72 01 4b 46 7f ff 0e 10 57 : crc=00 NO\n72 01 4b 46 7f ff 0e 10 57 t=23125\n",
    )]);
    let options = ReadOptions {
        retries: RetryPolicy::Bounded(0),
        wait: Duration::ZERO,
        locator: thermometer::LocatorOptions {
            device_folder: bus.path().to_path_buf(),
            device_suffix: PathBuf::from("w1_slave"),
        },
        ..ReadOptions::default()
    };

    let err = read_with(options, &Strategy::Plain).unwrap_err();
    assert!(matches!(err, ThermometerError::UnexpectedDeviceData { .. }));
}

#[test]
fn test_missing_explicit_device_is_not_retried() {
    let dir = TempDir::new().unwrap();
    let options = ReadOptions {
        device: Some(dir.path().join("gone")),
        retries: RetryPolicy::Unbounded,
        wait: Duration::ZERO,
        ..ReadOptions::default()
    };
    let err = read_with(options, &Strategy::Plain).unwrap_err();
    assert!(matches!(err, ThermometerError::FileRead { .. }));
}

#[test]
fn test_snapshot_of_strict_reading() {
    let raw = payload(23125);
    let bus = fake_bus(&[("28-0316a2795aff", raw.as_str())]);
    let settings = Settings {
        unit: TemperatureUnit::Celsius,
        ..settings_for(bus.path())
    };
    let t = read_with(settings.read_options(), &settings.strategy()).unwrap();

    let out = TempDir::new().unwrap();
    let writer = SnapshotWriter::new(out.path().join("snapshots.jsonl"));
    writer.append(&Snapshot::now(t)).unwrap();

    let recorded = writer.load().unwrap();
    assert_eq!(recorded.len(), 1);
    assert!((recorded[0].fahrenheit - 73.625).abs() < 1e-9);
}
