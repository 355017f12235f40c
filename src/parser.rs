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

//! `w1_slave` payload parsing
//!
//! The w1 therm driver renders each conversion as two lines:
//!
//! ```text
//! 72 01 4b 46 7f ff 0e 10 57 : crc=57 YES
//! 72 01 4b 46 7f ff 0e 10 57 t=23125
//! ```
//!
//! The first line ends in `YES` when the scratchpad CRC matched. The second
//! carries the reading in millidegrees Celsius.

use crate::constants::protocol;
use crate::error::{Result, ThermometerError};

/// Parse a raw payload into the signed millidegree reading
///
/// No range check is applied here; plausibility is the strategies' concern.
pub fn parse_raw(text: &str) -> Result<i64> {
    let lines: Vec<&str> = text.trim().split('\n').map(str::trim).collect();

    if lines.len() != protocol::PAYLOAD_LINES {
        return Err(ThermometerError::unexpected_data(
            format!(
                "Expected {} lines of text data, got {}",
                protocol::PAYLOAD_LINES,
                lines.len()
            ),
            text,
        ));
    }

    if !lines[0].ends_with(protocol::CRC_OK) {
        return Err(ThermometerError::unexpected_data(
            "Did not find YES indicator on first line",
            text,
        ));
    }

    let value = lines[1]
        .split_once(protocol::TEMPERATURE_FIELD)
        .map(|(_, rest)| rest.split(protocol::TEMPERATURE_FIELD).next().unwrap_or(rest))
        .ok_or_else(|| {
            ThermometerError::unexpected_data(
                "Unable to find temperature value (t=...) on second line",
                text,
            )
        })?;

    value.trim().parse::<i64>().map_err(|e| {
        ThermometerError::unexpected_data(
            format!("Temperature value '{}' is not an integer: {}", value.trim(), e),
            text,
        )
    })
}
