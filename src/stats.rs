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

//! Order statistics used by the IQR consistency check

use crate::error::{Result, ThermometerError};

fn sorted(data: &[f64]) -> Vec<f64> {
    let mut data = data.to_vec();
    data.sort_by(f64::total_cmp);
    data
}

/// Divide `data` into `n` intervals of equal probability
///
/// Returns the `n - 1` cut points, linearly interpolated between adjacent
/// sorted samples (the "exclusive" method: rank `i * (len + 1) / n`).
/// `n = 4` yields quartiles. Fails for `n < 1` or fewer than two samples.
pub fn quantiles(data: &[f64], n: usize) -> Result<Vec<f64>> {
    if n < 1 {
        return Err(ThermometerError::invalid_argument("n must be at least 1"));
    }

    let data = sorted(data);
    let ld = data.len();
    if ld < 2 {
        return Err(ThermometerError::invalid_argument(
            "must have at least two data points",
        ));
    }

    let n = n as i64;
    let m = ld as i64 + 1;
    let cuts = (1..n)
        .map(|i| {
            let j = (i * m / n).clamp(1, ld as i64 - 1);
            // exact integer weight of the upper neighbour
            let delta = i * m - j * n;
            let lo = data[(j - 1) as usize];
            let hi = data[j as usize];
            (lo * (n - delta) as f64 + hi * delta as f64) / n as f64
        })
        .collect();

    Ok(cuts)
}

/// Spread between the first and last quartile cut points
pub fn interquartile_range(data: &[f64]) -> Result<f64> {
    let cuts = quantiles(data, crate::constants::strict::QUANTILE_DIVISIONS)?;
    match (cuts.first(), cuts.last()) {
        (Some(q1), Some(q3)) => Ok(q3 - q1),
        _ => Err(ThermometerError::invalid_argument("no quartile cut points")),
    }
}

/// Middle value, or the mean of the two middle values for even lengths
pub fn median(data: &[f64]) -> Result<f64> {
    let data = sorted(data);
    let len = data.len();
    if len == 0 {
        return Err(ThermometerError::invalid_argument("no median for empty data"));
    }

    let mid = len / 2;
    if len % 2 == 1 {
        Ok(data[mid])
    } else {
        Ok((data[mid - 1] + data[mid]) / 2.0)
    }
}
