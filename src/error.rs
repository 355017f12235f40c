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

//! Error re-exports
//!
//! The error type lives in the `th-error` crate so that it can be shared by
//! every binary built on this library.

pub use th_error::{Result, ThermometerError};
