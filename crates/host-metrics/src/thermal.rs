// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! SoC temperature via `/sys/class/thermal/`.
//!
//! Thermal zone 0 reports the SoC temperature in millidegrees Celsius on
//! Raspberry Pi class boards.

use crate::MonitorError;
use std::path::Path;

/// Default sysfs path for the CPU thermal zone.
pub(crate) const THERMAL_ZONE_PATH: &str = "/sys/class/thermal/thermal_zone0/temp";

/// Reads the SoC temperature in degrees Celsius from the default thermal zone.
pub fn read_temperature() -> Result<f32, MonitorError> {
    read_temperature_from(Path::new(THERMAL_ZONE_PATH))
}

/// Reads a millidegree value (e.g. `54321` = 54.321 °C) from `path`.
pub(crate) fn read_temperature_from(path: &Path) -> Result<f32, MonitorError> {
    let content = read_sysfs_file(path)?;
    let millidegrees: i64 = content.parse::<i64>().map_err(|_| MonitorError::ParseError {
        path: path.display().to_string(),
        detail: format!("expected integer millidegrees, got '{content}'"),
    })?;
    Ok(millidegrees as f32 / 1000.0)
}

/// Reads a sysfs/procfs file and returns its trimmed content.
pub(crate) fn read_sysfs_file(path: &Path) -> Result<String, MonitorError> {
    if !path.exists() {
        return Err(MonitorError::NotAvailable {
            path: path.display().to_string(),
        });
    }
    std::fs::read_to_string(path)
        .map(|s| s.trim().to_string())
        .map_err(|e| MonitorError::ReadError {
            path: path.display().to_string(),
            source: e,
        })
}
