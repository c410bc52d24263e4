// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The [`MetricSource`] capability and its procfs/sysfs implementation.

use crate::{network, thermal, CpuTimes, MonitorError};
use std::net::IpAddr;
use std::path::PathBuf;

/// Supplies raw host metrics to the status display.
///
/// Implementations report failures as values; deciding what to show
/// instead is left to the caller. Every method must return well within a
/// scheduler tick.
pub trait MetricSource {
    /// The host name.
    fn hostname(&mut self) -> Result<String, MonitorError>;

    /// Best-effort outbound address; `None` while not connected.
    fn probe_ip(&mut self) -> Option<IpAddr>;

    /// SoC temperature in degrees Celsius.
    fn temperature(&mut self) -> Result<f32, MonitorError>;

    /// Current aggregate `(idle, total)` CPU counters.
    fn cpu_times(&mut self) -> Result<CpuTimes, MonitorError>;
}

/// Reads metrics from the running Linux kernel.
///
/// Paths default to the standard locations and can be redirected, which
/// is how the readers are exercised against fixture files.
#[derive(Debug, Clone)]
pub struct SysfsMetrics {
    hostname_path: PathBuf,
    thermal_path: PathBuf,
    stat_path: PathBuf,
}

impl SysfsMetrics {
    /// Uses the standard kernel paths.
    pub fn new() -> Self {
        Self {
            hostname_path: PathBuf::from(network::HOSTNAME_PATH),
            thermal_path: PathBuf::from(thermal::THERMAL_ZONE_PATH),
            stat_path: PathBuf::from(crate::cpu::PROC_STAT_PATH),
        }
    }

    /// Overrides the thermal zone file (boards whose SoC sensor is not zone 0).
    pub fn with_thermal_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.thermal_path = path.into();
        self
    }

    #[cfg(test)]
    pub(crate) fn with_paths(hostname: PathBuf, thermal: PathBuf, stat: PathBuf) -> Self {
        Self {
            hostname_path: hostname,
            thermal_path: thermal,
            stat_path: stat,
        }
    }
}

impl Default for SysfsMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricSource for SysfsMetrics {
    fn hostname(&mut self) -> Result<String, MonitorError> {
        network::read_hostname_from(&self.hostname_path)
    }

    fn probe_ip(&mut self) -> Option<IpAddr> {
        network::probe_outbound_ip()
    }

    fn temperature(&mut self) -> Result<f32, MonitorError> {
        thermal::read_temperature_from(&self.thermal_path)
    }

    fn cpu_times(&mut self) -> Result<CpuTimes, MonitorError> {
        CpuTimes::read_from(&self.stat_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::thermal::tests::write_temp;

    #[test]
    fn test_reads_from_fixture_paths() {
        let host = write_temp("src_host", "pi-zero\n");
        let therm = write_temp("src_therm", "48500\n");
        let stat = write_temp("src_stat", "cpu 10 0 10 70 10 0 0 0 0 0\n");

        let mut m = SysfsMetrics::with_paths(host.clone(), therm.clone(), stat.clone());
        assert_eq!(m.hostname().unwrap(), "pi-zero");
        assert!((m.temperature().unwrap() - 48.5).abs() < 0.001);
        assert_eq!(m.cpu_times().unwrap(), CpuTimes::new(80, 100));

        for p in [host, therm, stat] {
            let _ = std::fs::remove_file(p);
        }
    }

    #[test]
    fn test_missing_sensor_is_an_error_value() {
        let mut m = SysfsMetrics::new().with_thermal_path("/nonexistent/zone/temp");
        assert!(matches!(
            m.temperature(),
            Err(MonitorError::NotAvailable { .. })
        ));
    }
}
